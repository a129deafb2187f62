use std::env;

use ekubo_server::ServerBuilder;
use ekubo_server::config::load_config;

#[tokio::main]
async fn main() {
    // Load .env if present, before anything reads the environment.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    // Initialize tracing early with the default level.
    ekubo_server::observability::init_tracing();

    let config_path = resolve_config_path();
    let cfg = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        path = config_path.as_deref().unwrap_or("ekubo.toml"),
        "Configuration loaded"
    );
    ekubo_server::observability::apply_logging_level(&cfg.logging.level);

    let server = ServerBuilder::new(&cfg).build();
    if let Err(err) = server.run().await {
        eprintln!("Server error: {err}");
    }
}

/// Resolve the configuration file path: `--config <path>`, then the
/// `EKUBO_CONFIG` environment variable, then the default `ekubo.toml`.
fn resolve_config_path() -> Option<String> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return Some(path);
            }
        }
    }

    if let Ok(path) = env::var("EKUBO_CONFIG") {
        if !path.is_empty() {
            return Some(path);
        }
    }

    None
}
