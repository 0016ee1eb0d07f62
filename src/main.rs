use stepmaze::{
    app::{App, config::AppConfig, terminal::TerminalSession},
    logging,
};

fn main() -> std::io::Result<()> {
    let (config, warnings) = AppConfig::from_env();
    let _guard = logging::init_tracing(&config)?;
    for warning in &warnings {
        tracing::warn!("[config] {}", warning);
    }

    let app = App::new(config);
    let mut stdout = std::io::stdout();
    let session = TerminalSession::open(&mut stdout)?;
    let result = app.run(&mut stdout);
    // Close the session even when the app failed, then report the app's error first
    let closed = session.close(&mut stdout);
    result.and(closed)
}
