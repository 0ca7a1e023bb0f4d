//! HTTP surface: a single edit endpoint plus its CORS preflight.

pub mod responses;
pub mod routes;

use crate::assistant::EditAssistant;
use crate::errors::AppError;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

pub const EDIT_PATH: &str = "/edit";

/// Whether the process can reach the model service. Decided once at startup.
pub enum Backend {
    Ready(Arc<EditAssistant>),
    /// No credential was available; every request fails fast.
    Unconfigured,
}

#[derive(Clone)]
pub struct AppState {
    backend: Arc<Backend>,
}

impl AppState {
    pub fn backend(&self) -> &Backend {
        &self.backend
    }
}

/// Builds the router. Methods other than POST and OPTIONS get 405.
pub fn router(backend: Backend, max_body_bytes: usize) -> Router {
    let state = AppState {
        backend: Arc::new(backend),
    };

    Router::new()
        .route(
            EDIT_PATH,
            post(routes::edit)
                .options(routes::preflight)
                .fallback(routes::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn serve(
    backend: Backend,
    host: &str,
    port: u16,
    max_body_bytes: usize,
) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    log::info!("Listening on http://{}{}", listener.local_addr()?, EDIT_PATH);

    axum::serve(listener, router(backend, max_body_bytes)).await?;
    Ok(())
}
