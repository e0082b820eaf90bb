//! REST API endpoint for text verification

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::health::{CapabilityHealth, HealthStatus, ReadinessStatus};
use crate::model::{Badge, ClaimResult, Source, VerdictStatus, VerificationReport};
use crate::service::VerificationService;

/// Request body for verification
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// Social media post or article snippet to fact-check
    pub text: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "CrediCheck API", description = "Claim extraction, source retrieval and credibility scoring"),
    paths(
        verify_text,
        crate::api::health::liveness,
        crate::api::health::readiness
    ),
    components(schemas(
        VerifyRequest,
        VerificationReport,
        ClaimResult,
        Source,
        VerdictStatus,
        Badge,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        CapabilityHealth
    )),
    tags(
        (name = "verification", description = "Fact-checking endpoints"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Verify the factual claims in a block of text
///
/// Extracts claims, gathers up to three sources per claim, classifies each
/// claim and aggregates a credibility score. Fallback data is used for any
/// capability that is not configured or fails; `degraded` is then set.
#[utoipa::path(
    post,
    path = "/api/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification report", body = VerificationReport),
        (status = 400, description = "Unreadable request body", body = ErrorResponse),
        (status = 502, description = "Upstream capability failed and policy forbids fallback", body = ErrorResponse)
    ),
    tag = "verification"
)]
#[post("/api/verify")]
pub async fn verify_text(
    service: web::Data<VerificationService>,
    body: web::Json<VerifyRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::debug!(text_length = body.text.len(), "Verification requested");

    let report = service.process(&body.text).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure verification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(verify_text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};

    use crate::model::{FallbackPolicy, PipelineConfig};
    use crate::service::testing::{ScriptedGenerator, ScriptedSearch};

    fn app_data(service: VerificationService) -> web::Data<VerificationService> {
        web::Data::new(service)
    }

    #[actix_web::test]
    async fn test_verify_without_credentials_returns_fallback_report() {
        let service = VerificationService::from_config(&PipelineConfig::default(), None, None);
        let app = test::init_service(
            App::new()
                .app_data(app_data(service))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/verify")
            .set_json(VerifyRequest {
                text: "Some post".to_string(),
            })
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["claims"][0]["claim"], "The Earth is round.");
        assert_eq!(body["claims"][1]["claim"], "Water boils at 100°C at sea level.");
        assert_eq!(body["claims"][0]["status"], "True");
        assert_eq!(body["claims"][0]["sources"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["claims"][1]["sources"][0]["link"],
            "https://en.wikipedia.org/wiki/Earth"
        );
        assert_eq!(body["credibility_score"], 100.0);
        assert_eq!(body["badge"], "Green");
        assert_eq!(body["explanation"], "Overall credibility based on 2 claims.");
        assert_eq!(body["degraded"], true);
    }

    #[actix_web::test]
    async fn test_unreadable_body_is_bad_request() {
        let service = VerificationService::from_config(&PipelineConfig::default(), None, None);
        let app = test::init_service(
            App::new()
                .app_data(app_data(service))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/verify")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"body": "missing text field"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["request_id"].as_str().is_some());
    }

    #[actix_web::test]
    async fn test_strict_policy_failure_is_bad_gateway() {
        let config = PipelineConfig {
            fallback: FallbackPolicy::strict(),
            ..PipelineConfig::default()
        };
        let service = VerificationService::from_config(
            &config,
            Some(Arc::new(ScriptedGenerator::failing())),
            Some(Arc::new(ScriptedSearch::with_hits(3))),
        );
        let app = test::init_service(
            App::new()
                .app_data(app_data(service))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/verify")
            .set_json(VerifyRequest {
                text: "Some post".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "external_service_error");
    }

    #[actix_web::test]
    async fn test_openapi_lists_verify_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/verify"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
