use crate::domain::{NewSubscriber, SubscriptionOutcome, SubscriptionRequest};
use crate::newsletter_client::{NewsletterClient, NewsletterError};

/// Validates the request, then hands it to Brevo. Validation failures never
/// reach the network. There is no retry: a failed submission is resubmitted
/// by the visitor.
#[tracing::instrument(
    name = "Subscribe to the newsletter",
    skip(client, request),
    fields(subscriber_email = %request.email.as_deref().unwrap_or_default())
)]
pub async fn subscribe_to_newsletter(
    client: &NewsletterClient,
    request: SubscriptionRequest,
) -> SubscriptionOutcome {
    let subscriber: NewSubscriber = match request.try_into() {
        Ok(subscriber) => subscriber,
        Err(message) => return SubscriptionOutcome::Invalid(message),
    };

    match client.create_contact(&subscriber).await {
        Ok(()) => SubscriptionOutcome::Subscribed,
        Err(NewsletterError::DuplicateContact) => SubscriptionOutcome::AlreadySubscribed,
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Newsletter subscription failed");
            match e {
                NewsletterError::MissingApiKey => SubscriptionOutcome::NotConfigured,
                NewsletterError::Unauthorized => SubscriptionOutcome::InvalidApiKey,
                NewsletterError::Transport(_) => SubscriptionOutcome::Unreachable,
                NewsletterError::Rejected { .. } | NewsletterError::DuplicateContact => {
                    SubscriptionOutcome::Rejected
                }
            }
        }
    }
}
