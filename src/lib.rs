use std::sync::Arc;

use content_client::ContentClient;
use newsletter_client::NewsletterClient;

pub mod configuration;
pub mod content;
pub mod content_client;
pub mod domain;
pub mod newsletter;
pub mod newsletter_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub newsletter_client: Arc<NewsletterClient>,
    pub content_client: Arc<ContentClient>,
}
