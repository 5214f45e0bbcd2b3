use serde::Serialize;

pub const SUBSCRIBED: &str = "Successfully subscribed to newsletter!";
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed to our newsletter!";
pub const NOT_CONFIGURED: &str = "API configuration error. Please contact support.";
pub const INVALID_API_KEY: &str = "Invalid API key. Please contact support.";
pub const SUBSCRIPTION_FAILED: &str = "Failed to subscribe. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

/// What a newsletter submission ended up as, from the visitor's point of
/// view. `AlreadySubscribed` counts as a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Subscribed,
    AlreadySubscribed,
    /// Rejected locally; carries the validation message.
    Invalid(String),
    NotConfigured,
    InvalidApiKey,
    Rejected,
    Unreachable,
}

impl SubscriptionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Subscribed | Self::AlreadySubscribed)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Subscribed => SUBSCRIBED,
            Self::AlreadySubscribed => ALREADY_SUBSCRIBED,
            Self::Invalid(message) => message,
            Self::NotConfigured => NOT_CONFIGURED,
            Self::InvalidApiKey => INVALID_API_KEY,
            Self::Rejected => SUBSCRIPTION_FAILED,
            Self::Unreachable => NETWORK_ERROR,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionResponse {
    pub success: bool,
    pub message: String,
}

impl From<&SubscriptionOutcome> for SubscriptionResponse {
    fn from(outcome: &SubscriptionOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            message: outcome.message().to_string(),
        }
    }
}
