//! Web server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::auth::IdentityProvider;
use crate::config::Config;
use crate::storage::ObjectStore;
use crate::Database;

use super::handlers::AppState;
use super::middleware::JwtState;
use super::router::{create_files_router, create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// JWT state.
    jwt_state: Arc<JwtState>,
    /// CORS origins.
    cors_origins: Vec<String>,
    /// Public base path for stored objects.
    files_public_base: String,
    /// Filesystem path of stored objects.
    files_storage_path: String,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        config: &Config,
        db: Database,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let app_state = AppState::new(
            db,
            identity,
            storage,
            &config.auth.jwt_secret,
            config.auth.access_token_expiry_secs,
        );
        let jwt_state = Arc::new(JwtState::new(&config.auth.jwt_secret));

        Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            cors_origins: config.server.cors_origins.clone(),
            files_public_base: config.storage.public_base.clone(),
            files_storage_path: config.storage.path.clone(),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the complete router.
    pub fn router(&self) -> axum::Router {
        create_router(
            self.app_state.clone(),
            self.jwt_state.clone(),
            &self.cors_origins,
        )
        .merge(create_health_router())
        .merge(create_files_router(
            &self.files_public_base,
            &self.files_storage_path,
        ))
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }
}
