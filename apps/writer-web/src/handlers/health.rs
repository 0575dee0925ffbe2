//! Health check endpoint.

use actix_web::{HttpResponse, web};
use writer_shared::dto::HealthResponse;

use crate::state::AppState;

/// Server status, plus whether the primary post store is answering.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.posts.is_degraded() {
        "degraded"
    } else {
        "ok"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
