use askama_axum::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Form;

use crate::domain::{SubscriptionRequest, SubscriptionResponse};
use crate::newsletter::subscribe_to_newsletter;
use crate::AppState;

#[derive(Template)]
#[template(path = "home.html")]
struct Home {
    outcome: Option<SubscriptionResponse>,
}

pub async fn home() -> Response {
    Home { outcome: None }.into_response()
}

/// Form flavour of the newsletter widget: the landing page is rendered
/// again with the outcome, success-styled for duplicates too.
#[tracing::instrument(name = "Newsletter form submission", skip(state, form))]
pub async fn newsletter_signup(
    state: State<AppState>,
    form: Form<SubscriptionRequest>,
) -> Response {
    let outcome = subscribe_to_newsletter(&state.newsletter_client, form.0).await;
    Home {
        outcome: Some(SubscriptionResponse::from(&outcome)),
    }
    .into_response()
}
