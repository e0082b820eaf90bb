//! Health check endpoints for Kubernetes liveness and readiness probes

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    pub capabilities: CapabilityHealth,
}

/// `configured` when the capability calls out, `fallback` when it serves canned data
#[derive(Serialize, ToSchema)]
pub struct CapabilityHealth {
    pub generation: String,
    pub search: String,
}

/// Which external capabilities are live, fixed at startup
#[derive(Debug, Clone, Copy)]
pub struct CapabilityState {
    pub generation: bool,
    pub search: bool,
}

fn mode(enabled: bool) -> String {
    if enabled { "configured" } else { "fallback" }.to_string()
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe endpoint
///
/// Reports which capabilities run live. Fallback mode is a supported
/// operating mode, so this always answers 200 OK.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(state: web::Data<CapabilityState>) -> impl Responder {
    HttpResponse::Ok().json(ReadinessStatus {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        capabilities: CapabilityHealth {
            generation: mode(state.generation),
            search: mode(state.search),
        },
    })
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}
