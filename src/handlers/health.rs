//! Liveness probe.
//! Used by: server.

use axum::Json;

use crate::response::SuccessResponse;

pub async fn health() -> Json<SuccessResponse<()>> {
    Json(SuccessResponse::new("ok", None))
}
