use crate::domain::model::{FilterSpec, NewService, ServiceId, ServiceRecord};
use crate::server::AppState;
use crate::utils::error::CatalogError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn not_found(id: &ServiceId) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: CatalogError::NotFoundError { id: id.to_string() }.to_string(),
            code: "NOT_FOUND".to_string(),
        }),
    )
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "campus-connect"
    }))
}

pub async fn list_services(
    State(state): State<AppState>,
    Query(spec): Query<FilterSpec>,
) -> Json<Vec<ServiceRecord>> {
    let services = state.repository.list(&spec).await;
    Json(services)
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceRecord>, ApiError> {
    let id = ServiceId::new(id);
    match state.repository.get(&id).await {
        Some(service) => Ok(Json(service)),
        None => Err(not_found(&id)),
    }
}

pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<NewService>,
) -> Result<(StatusCode, Json<ServiceRecord>), ApiError> {
    match state.repository.create(payload).await {
        Ok(service) => {
            info!("Service created: {} ({})", service.id, service.title);
            Ok((StatusCode::CREATED, Json(service)))
        }
        Err(e) => {
            warn!("Rejected new service: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.user_friendly_message(),
                    code: "VALIDATION_FAILED".to_string(),
                }),
            ))
        }
    }
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ServiceId::new(id);
    if state.repository.delete(&id).await {
        info!("Service deleted: {}", id);
        Ok(Json(serde_json::json!({
            "message": format!("Service {} deleted", id)
        })))
    } else {
        warn!("Delete requested for unknown service {}", id);
        Err(not_found(&id))
    }
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
