use reqwest::{header, Client, ClientBuilder, Response, Url};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::configuration::NewsletterSettings;
use crate::domain::NewSubscriber;
use crate::utils::error_chain_fmt;

pub const DUPLICATE_PARAMETER: &str = "duplicate_parameter";
pub const UNAUTHORIZED: &str = "unauthorized";

pub struct NewsletterClient {
    http_client: Client,
    contacts_url: Url,
    account_url: Url,
    list_id: u64,
    has_api_key: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest<'a> {
    email: &'a str,
    attributes: ContactAttributes<'a>,
    list_ids: [u64; 1],
    update_enabled: bool,
}

#[derive(Serialize)]
pub struct ContactAttributes<'a> {
    #[serde(rename = "FIRSTNAME")]
    first_name: &'a str,
    #[serde(rename = "LASTNAME")]
    last_name: &'a str,
}

#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(thiserror::Error)]
pub enum NewsletterError {
    #[error("No newsletter API key is configured.")]
    MissingApiKey,
    #[error("The contact is already subscribed.")]
    DuplicateContact,
    #[error("The newsletter API refused the API key.")]
    Unauthorized,
    #[error("The newsletter API rejected the request with status {status} ({code:?}): {message:?}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    #[error("Failed to reach the newsletter API.")]
    Transport(#[source] reqwest::Error),
}

impl std::fmt::Debug for NewsletterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl NewsletterClient {
    pub fn new(config: NewsletterSettings) -> anyhow::Result<Self> {
        let url = Url::parse(&config.endpoint).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let contacts_url = url
            .join("/v3/contacts")
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let account_url = url
            .join("/v3/account")
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        let has_api_key = !config.api_key.expose_secret().trim().is_empty();
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "api-key",
            config
                .api_key
                .expose_secret()
                .parse()
                .map_err(|e| anyhow::anyhow!("Failed to parse api_key: {e}"))?,
        );
        headers.insert(
            header::ACCEPT,
            "application/json"
                .parse()
                .map_err(|e| anyhow::anyhow!("Failed to parse accept header: {e}"))?,
        );

        let http_client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        Ok(Self {
            http_client,
            contacts_url,
            account_url,
            list_id: config.list_id,
            has_api_key,
        })
    }

    /// Any 2xx status is a success and its body is never read.
    #[tracing::instrument(
        name = "Create newsletter contact",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn create_contact(&self, subscriber: &NewSubscriber) -> Result<(), NewsletterError> {
        if !self.has_api_key {
            return Err(NewsletterError::MissingApiKey);
        }
        let body = CreateContactRequest {
            email: subscriber.email.as_ref(),
            attributes: ContactAttributes {
                first_name: subscriber.first_name.as_ref().map_or("", |n| n.as_ref()),
                last_name: subscriber.last_name.as_ref().map_or("", |n| n.as_ref()),
            },
            list_ids: [self.list_id],
            update_enabled: true,
        };

        let response = self
            .http_client
            .post(self.contacts_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(NewsletterError::Transport)?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(rejection(response).await)
    }

    #[tracing::instrument(name = "Verify newsletter API key", skip(self))]
    pub async fn verify_api_key(&self) -> Result<(), NewsletterError> {
        if !self.has_api_key {
            return Err(NewsletterError::MissingApiKey);
        }
        let response = self
            .http_client
            .get(self.account_url.clone())
            .send()
            .await
            .map_err(NewsletterError::Transport)?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(rejection(response).await)
    }
}

async fn rejection(response: Response) -> NewsletterError {
    let status = response.status().as_u16();
    let body = read_error_body(response).await;
    if body.code.as_deref() == Some(DUPLICATE_PARAMETER) {
        return NewsletterError::DuplicateContact;
    }
    if body.code.as_deref() == Some(UNAUTHORIZED) || status == 401 {
        return NewsletterError::Unauthorized;
    }
    NewsletterError::Rejected {
        status,
        code: body.code,
        message: body.message,
    }
}

/// Only bodies announced as non-empty JSON are decoded.
async fn read_error_body(response: Response) -> ApiErrorBody {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.contains("application/json"));
    if !is_json || response.content_length() == Some(0) {
        return ApiErrorBody::default();
    }
    match response.json::<ApiErrorBody>().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error.cause_chain = ?e, "Failed to decode the newsletter API error body");
            ApiErrorBody::default()
        }
    }
}
