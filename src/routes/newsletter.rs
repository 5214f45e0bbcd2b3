use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{
    SubscriptionOutcome, SubscriptionRequest, SubscriptionResponse, ALREADY_SUBSCRIBED,
    SUBSCRIPTION_FAILED,
};
use crate::newsletter::subscribe_to_newsletter;
use crate::AppState;

#[derive(Serialize)]
struct ErrorMessage {
    message: &'static str,
}

/// `POST /api/newsletter/subscribe`, the same-origin proxy in front of Brevo.
///
/// 200 on success, 400 for invalid input and already-subscribed emails,
/// 500 for everything else. Details of upstream failures stay in the logs.
#[tracing::instrument(name = "Newsletter subscription request", skip(state, payload))]
pub async fn subscribe(
    state: State<AppState>,
    payload: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error.message = %rejection, "Rejected an unreadable subscription body");
            return reply(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let outcome = subscribe_to_newsletter(&state.newsletter_client, request).await;
    match &outcome {
        SubscriptionOutcome::Subscribed => {
            (StatusCode::OK, Json(SubscriptionResponse::from(&outcome))).into_response()
        }
        SubscriptionOutcome::AlreadySubscribed => {
            reply(StatusCode::BAD_REQUEST, ALREADY_SUBSCRIBED)
        }
        SubscriptionOutcome::Invalid(message) => reply(StatusCode::BAD_REQUEST, message),
        _ => reply(StatusCode::INTERNAL_SERVER_ERROR, SUBSCRIPTION_FAILED),
    }
}

fn reply(status: StatusCode, message: &str) -> Response {
    let body = SubscriptionResponse {
        success: false,
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

/// CORS preflight without `Access-Control-Request-Method` ends up here.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorMessage {
            message: "Method not allowed",
        }),
    )
        .into_response()
}
