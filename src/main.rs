use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use blogun::auth::LocalIdentityProvider;
use blogun::storage::FsObjectStore;
use blogun::web::WebServer;
use blogun::{Config, Database};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            // Env overrides still apply without a config file
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = blogun::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        blogun::logging::init_console_only(&config.logging.level);
    }

    info!("Blogun starting");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let identity = Arc::new(LocalIdentityProvider::new(db.clone()));
    let storage = Arc::new(FsObjectStore::new(
        &config.storage.path,
        &config.storage.public_base,
    ));

    let server = WebServer::new(&config, db, identity, storage);
    info!(
        "Serving on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
