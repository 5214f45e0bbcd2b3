use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::AppState;

pub async fn health_check() -> Response {
    (StatusCode::OK, "").into_response()
}

/// 503 while Brevo does not accept the configured API key.
pub async fn newsletter_health_check(state: State<AppState>) -> Response {
    match state.newsletter_client.verify_api_key().await {
        Ok(()) => (StatusCode::OK, "").into_response(),
        Err(e) => {
            tracing::warn!(error.cause_chain = ?e, "Newsletter API is not usable");
            (StatusCode::SERVICE_UNAVAILABLE, "").into_response()
        }
    }
}
