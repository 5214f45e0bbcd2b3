use reqwest::{header, Client, ClientBuilder, Url};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::configuration::{ContentSettings, PostDefaults};
use crate::content::{normalize_entry, AssetIndex, EntryCollection};
use crate::domain::BlogPost;
use crate::utils::error_chain_fmt;

const NEWEST_FIRST: &str = "-sys.createdAt";

pub struct ContentClient {
    http_client: Client,
    entries_url: Url,
    content_type: String,
    defaults: PostDefaults,
}

#[derive(thiserror::Error)]
pub enum ContentError {
    #[error("Failed to reach the content API.")]
    Transport(#[source] reqwest::Error),
    #[error("The content API answered with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode the content API response.")]
    Decode(#[source] reqwest::Error),
}

impl std::fmt::Debug for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// `{ "sys": { "type": "Error", "id": "InvalidQuery" }, "message": "..." }`
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl ContentClient {
    pub fn new(config: ContentSettings) -> anyhow::Result<Self> {
        let url = Url::parse(&config.endpoint).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let entries_url = url
            .join(&format!(
                "/spaces/{}/environments/{}/entries",
                config.space_id, config.environment
            ))
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", config.access_token.expose_secret())
                .parse()
                .map_err(|e| anyhow::anyhow!("Failed to parse access_token: {e}"))?,
        );

        let http_client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        Ok(Self {
            http_client,
            entries_url,
            content_type: config.content_type,
            defaults: config.defaults,
        })
    }

    #[tracing::instrument(name = "Fetch blog posts", skip(self))]
    pub async fn fetch_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let collection = self.get_entries(&[("order", NEWEST_FIRST)]).await?;
        let posts = self.into_posts(collection);
        tracing::info!("Fetched {} blog posts", posts.len());
        Ok(posts)
    }

    #[tracing::instrument(name = "Fetch blog posts by category", skip(self))]
    pub async fn fetch_posts_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<BlogPost>, ContentError> {
        let collection = self
            .get_entries(&[("fields.category", category), ("order", NEWEST_FIRST)])
            .await?;
        Ok(self.into_posts(collection))
    }

    /// `Ok(None)` when no entry matches. Normalized slugs fall back to the
    /// entry id, so the id is tried when the slug field matches nothing.
    #[tracing::instrument(name = "Fetch blog post", skip(self))]
    pub async fn fetch_post(&self, slug: &str) -> Result<Option<BlogPost>, ContentError> {
        let by_slug = self
            .get_entries(&[("fields.slug", slug), ("limit", "1")])
            .await?;
        if !by_slug.items.is_empty() {
            return Ok(self.into_posts(by_slug).into_iter().next());
        }

        let by_id = self.get_entries(&[("sys.id", slug), ("limit", "1")]).await?;
        let post = self.into_posts(by_id).into_iter().next();
        if post.is_none() {
            tracing::info!("No blog post matches {slug:?}");
        }
        Ok(post)
    }

    async fn get_entries(&self, query: &[(&str, &str)]) -> Result<EntryCollection, ContentError> {
        let response = self
            .http_client
            .get(self.entries_url.clone())
            .query(&[("content_type", self.content_type.as_str()), ("include", "2")])
            .query(query)
            .send()
            .await
            .map_err(ContentError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(ContentError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<EntryCollection>()
            .await
            .map_err(ContentError::Decode)
    }

    fn into_posts(&self, collection: EntryCollection) -> Vec<BlogPost> {
        let assets = AssetIndex::new(&collection.includes);
        collection
            .items
            .iter()
            .map(|entry| normalize_entry(entry, &assets, &self.defaults))
            .collect()
    }
}
