//! HTTP surface of the hotel sync backend: controllers, typed endpoint
//! params, error translation and the SSE channel lifecycle.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use domain::error::{DomainErrorKind, Error as DomainError};
use domain::gateway::insight::InsightProvider;
use domain::ReservationStore;
use events::EventPublisher;
use log::*;
use service::Config;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod controller;
pub mod error;
pub(crate) mod extractors;
pub(crate) mod params;
pub(crate) mod response;
pub mod router;
pub mod sse;

pub use error::{Error, Result};

/// Application state passed into every handler.
/// Needs to implement Clone to be able to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub reservation_store: Arc<dyn ReservationStore>,
    pub event_publisher: Arc<EventPublisher>,
    pub sse_manager: Arc<::sse::Manager>,
    pub insight_provider: Arc<dyn InsightProvider>,
}

impl AppState {
    pub fn new(
        config: Config,
        reservation_store: Arc<dyn ReservationStore>,
        event_publisher: Arc<EventPublisher>,
        sse_manager: Arc<::sse::Manager>,
        insight_provider: Arc<dyn InsightProvider>,
    ) -> Self {
        Self {
            config,
            reservation_store,
            event_publisher,
            sse_manager,
            insight_provider,
        }
    }

    pub fn store_ref(&self) -> &dyn ReservationStore {
        self.reservation_store.as_ref()
    }
}

/// Bind the configured interface and serve the router until shutdown.
pub async fn init_server(app_state: AppState) -> Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    info!("Server starting, listening on {server_url}");

    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([CONTENT_TYPE])
        .allow_origin(AllowOrigin::list(origins));

    let router = router::define_routes(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&server_url)
        .await
        .map_err(server_error)?;
    axum::serve(listener, router).await.map_err(server_error)?;

    Ok(())
}

fn server_error(err: std::io::Error) -> Error {
    Error::from(DomainError {
        source: Some(Box::new(err)),
        error_kind: DomainErrorKind::Internal("server I/O failure".to_string()),
    })
}
