//! Catalog API: the `/services` collection resource over an in-memory
//! datastore.
//!
//! - `GET /health`
//! - `GET /services?category=&university=&search=&sort=`
//! - `POST /services`
//! - `GET /services/:id`
//! - `DELETE /services/:id`

pub mod handlers;
pub mod repository;

pub use repository::{sample_services, ServiceRepository};

use crate::utils::error::Result;
use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<ServiceRepository>,
}

pub fn router(repository: Arc<ServiceRepository>) -> Router {
    let state = AppState { repository };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/services",
            get(handlers::list_services)
                .post(handlers::create_service)
                .options(handlers::preflight),
        )
        .route(
            "/services/:id",
            get(handlers::get_service)
                .delete(handlers::delete_service)
                .options(handlers::preflight),
        )
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

async fn allow_any_origin(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

/// Serve until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, repository: Arc<ServiceRepository>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("🚀 Catalog API listening on http://{}", addr);
    tracing::info!("📊 Health check: http://{}/health", addr);

    axum::serve(listener, router(repository))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Catalog API stopped");
    Ok(())
}
