use std::{path::PathBuf, str::FromStr, time::Duration};

/// Runtime settings of the terminal front end and the profiler.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Time between two generation steps, a.k.a. how often the maze is redrawn
    pub tick: Duration,
    /// Directory receiving the log file
    pub log_dir: PathBuf,
    /// Most verbose level written to the log file
    pub log_level: tracing::Level,
    /// Fixed seed for reproducible mazes, random when unset
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(20),
            log_dir: PathBuf::from("logs"),
            log_level: tracing::Level::INFO,
            seed: None,
        }
    }
}

impl AppConfig {
    pub const TICK_MS_VAR: &'static str = "STEPMAZE_TICK_MS";
    pub const LOG_DIR_VAR: &'static str = "STEPMAZE_LOG_DIR";
    pub const LOG_LEVEL_VAR: &'static str = "STEPMAZE_LOG_LEVEL";
    pub const SEED_VAR: &'static str = "STEPMAZE_SEED";

    /// Read overrides from the process environment.
    /// Returns the config plus a warning for every variable that could not be parsed; those keep
    /// their default. Logging is not up yet at this point, so the caller reports the warnings.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let mut warnings = Vec::new();

        if let Some(ms) = parse_var::<u64, _>(&lookup, Self::TICK_MS_VAR, &mut warnings) {
            config.tick = Duration::from_millis(ms);
        }
        if let Some(dir) = lookup(Self::LOG_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) =
            parse_var::<tracing::Level, _>(&lookup, Self::LOG_LEVEL_VAR, &mut warnings)
        {
            config.log_level = level;
        }
        if let Some(seed) = parse_var::<u64, _>(&lookup, Self::SEED_VAR, &mut warnings) {
            config.seed = Some(seed);
        }

        (config, warnings)
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("ignoring {}={:?}: not a valid value", name, raw));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let (config, warnings) = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_overrides_are_applied() {
        let (config, warnings) = AppConfig::from_lookup(lookup_from(&[
            (AppConfig::TICK_MS_VAR, "5"),
            (AppConfig::LOG_DIR_VAR, "/tmp/mazes"),
            (AppConfig::LOG_LEVEL_VAR, "debug"),
            (AppConfig::SEED_VAR, " 1234 "),
        ]));
        assert!(warnings.is_empty());
        assert_eq!(config.tick, Duration::from_millis(5));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/mazes"));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_bad_values_fall_back_with_warning() {
        let (config, warnings) = AppConfig::from_lookup(lookup_from(&[
            (AppConfig::TICK_MS_VAR, "fast"),
            (AppConfig::SEED_VAR, "-1"),
        ]));
        assert_eq!(config.tick, AppConfig::default().tick);
        assert_eq!(config.seed, None);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains(AppConfig::TICK_MS_VAR));
    }
}
