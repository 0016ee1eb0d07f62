use stepmaze::{
    Algorithm,
    app::{App, config::AppConfig},
    logging,
};

/// Usage: profile [cols] [rows] [iterations] [algorithm]
fn main() -> std::io::Result<()> {
    let (config, warnings) = AppConfig::from_env();
    let _guard = logging::init_tracing(&config)?;
    for warning in &warnings {
        tracing::warn!("[config] {}", warning);
    }

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let cols = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(255);
    let rows = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(255);
    let iterations = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let algorithms = match args.next() {
        Some(name) => vec![
            name.parse::<Algorithm>()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?,
        ],
        None => Algorithm::ALL.to_vec(),
    };

    let app = App::new(config);
    for report in app.profile(cols, rows, &algorithms, iterations)? {
        println!("{}", report);
    }
    Ok(())
}
