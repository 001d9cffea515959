//! Axum HTTP server.

use std::future::Future;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::sheets::SheetSource;

use super::error::WebError;
use super::routes;

/// Shared state for all routes. Constructed once at startup; the sheet
/// source is a trait object so tests can inject a fake.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sheets: Arc<dyn SheetSource>,
}

impl AppState {
    /// Map an [`ApiError`] to a response, honoring the diagnostics flag.
    pub fn web_err(&self, err: ApiError) -> WebError {
        WebError::from_api(err, self.config.diagnostics.expose_details)
    }
}

/// Build the router for the given state. Split out so integration tests
/// can drive it without binding a socket.
pub fn build_router(state: AppState) -> Router {
    routes::api_routes(state.clone()).with_state(state)
}

pub struct WebServer {
    config: Arc<Config>,
    state: AppState,
}

impl WebServer {
    pub fn new(config: Arc<Config>, sheets: Arc<dyn SheetSource>) -> Self {
        Self {
            config: config.clone(),
            state: AppState { config, sheets },
        }
    }

    /// Start the HTTP server and run until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = build_router(self.state).layer(cors_layer(&self.config));

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.server.port));
        info!(port = self.config.server.port, "api server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparseable cors origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
