//! Cross-origin policy for browser clients

use actix_cors::Cors;
use actix_web::http::header;

/// Preflight answers are cached by browsers for this long
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for the API.
///
/// An empty origin list accepts any origin; otherwise only the listed
/// origins are echoed back.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(["GET", "POST"])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
