// src/middleware/api_version.rs

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::handlers::ApiVersion;

// Informa ao cliente quais versões existem e quais estão depreciadas.
pub async fn report_api_versions(
    State(version): State<ApiVersion>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert("api-supported-versions", HeaderValue::from_static("2.0"));
    headers.insert("api-deprecated-versions", HeaderValue::from_static("1.0"));
    if version.is_deprecated() {
        headers.insert("deprecation", HeaderValue::from_static("true"));
    }

    response
}
