use std::net::SocketAddr;

use axum::{Router, routing::get};
use ekubo_auth::TokenService;
use ekubo_search::{CatalogClient, LyricsClient};
use ekubo_store::RecordStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::routes;

/// Shared application state, cloned into every handler.
///
/// Immutable after startup; the clients inside are themselves cheap clones
/// around shared connection pools.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub tokens: TokenService,
    pub lyrics: LyricsClient,
    pub catalog: CatalogClient,
}

impl AppState {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let catalog = match (&cfg.spotify.token_url, &cfg.spotify.api_url) {
            (Some(token_url), Some(api_url)) => CatalogClient::with_endpoints(
                &cfg.spotify.client_id,
                &cfg.spotify.client_secret,
                token_url,
                api_url,
            ),
            _ => CatalogClient::new(&cfg.spotify.client_id, &cfg.spotify.client_secret),
        };
        Self {
            store: RecordStore::new(&cfg.store.url, &cfg.store.api_key),
            tokens: TokenService::new(&cfg.auth.jwt_secret, cfg.auth.jwt_expiration_hours),
            lyrics: LyricsClient::new(&cfg.lyrics.base_url),
            catalog,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/healthz", get(routes::healthz))
        .nest("/auth", routes::auth::router())
        .nest("/songs", routes::songs::router())
        .nest("/lyrics", routes::lyrics::router())
        .nest("/matched", routes::matched::router())
        .nest("/library", routes::library::router())
        .nest("/progress", routes::progress::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    state: AppState,
}

impl ServerBuilder {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            addr: cfg.addr(),
            state: AppState::from_config(cfg),
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn build(self) -> EkuboServer {
        EkuboServer {
            addr: self.addr,
            app: build_app(self.state),
        }
    }
}

pub struct EkuboServer {
    addr: SocketAddr,
    app: Router,
}

impl EkuboServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
