use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::room::{RelayService, RelayStats};
use crate::signaling::ws_handler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(flatten)]
    stats: RelayStats,
}

/// HTTP routes: the relay socket at `config.socket_path` and `/health`.
pub fn build_router(relay: RelayService, config: &RelayConfig) -> Router {
    let app = Router::new()
        .route(&config.socket_path, get(ws_handler))
        .route("/health", get(health))
        .with_state(relay);

    if !config.allow_any_origin {
        return app;
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    app.layer(cors)
}

async fn health(State(relay): State<RelayService>) -> Response {
    match relay.stats().await {
        Ok(stats) => Json(HealthResponse {
            status: "ok",
            stats,
        })
        .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}

/// A bound listener with its relay, ready to serve.
pub struct RelayServer {
    listener: TcpListener,
    relay: RelayService,
    app: Router,
}

impl RelayServer {
    /// Validate `config`, start the relay and bind the listener.
    pub async fn bind(config: RelayConfig) -> Result<Self, RelayError> {
        config.validate()?;

        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|source| RelayError::Bind {
                addr: config.bind_addr,
                source,
            })?;

        let relay = RelayService::start(config.command_buffer);
        let app = build_router(relay.clone(), &config);

        info!(
            addr = %config.bind_addr,
            path = %config.socket_path,
            "Signaling relay bound"
        );

        Ok(Self {
            listener,
            relay,
            app,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, RelayError> {
        self.listener.local_addr().map_err(RelayError::Serve)
    }

    pub fn relay(&self) -> &RelayService {
        &self.relay
    }

    /// Serve until `shutdown` resolves, then stop the router.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), RelayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self {
            listener,
            relay,
            app,
        } = self;

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(RelayError::Serve);

        relay.shutdown().await;
        served
    }
}
