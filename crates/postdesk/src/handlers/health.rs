//! Liveness probe.

use axum::http::StatusCode;

/// GET /livez - Returns 200 immediately. Never touches the store.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
