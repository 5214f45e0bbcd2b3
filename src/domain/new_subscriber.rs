use serde::Deserialize;

use super::{SubscriberEmail, SubscriberName};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_NAME: &str = "Please enter a valid name";

/// Subscriber record as submitted by the newsletter widget.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub first_name: Option<SubscriberName>,
    pub last_name: Option<SubscriberName>,
}

/// The error is the message shown back to the visitor.
impl TryFrom<SubscriptionRequest> for NewSubscriber {
    type Error = String;

    fn try_from(value: SubscriptionRequest) -> Result<Self, Self::Error> {
        let email = match value.email {
            Some(email) if !email.trim().is_empty() => email,
            _ => return Err(EMAIL_REQUIRED.to_string()),
        };
        let email = SubscriberEmail::parse(email).map_err(|_| INVALID_EMAIL.to_string())?;
        let first_name =
            SubscriberName::parse_optional(value.first_name).map_err(|_| INVALID_NAME.to_string())?;
        let last_name =
            SubscriberName::parse_optional(value.last_name).map_err(|_| INVALID_NAME.to_string())?;
        Ok(Self {
            email,
            first_name,
            last_name,
        })
    }
}
