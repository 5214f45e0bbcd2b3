use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::content_client::ContentError;
use crate::domain::{BlogPost, ALL_CATEGORIES};
use crate::utils::error_chain_fmt;
use crate::AppState;

#[derive(thiserror::Error)]
pub enum PostsError {
    #[error("The requested post does not exist.")]
    NotFound,
    #[error(transparent)]
    Content(#[from] ContentError),
}

impl std::fmt::Debug for PostsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for PostsError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Content(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to load blog content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load blog posts. Please try again.".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

#[derive(Deserialize)]
pub struct PostsQuery {
    category: Option<String>,
}

/// `All` means every category.
#[tracing::instrument(name = "List posts", skip(state, query))]
pub async fn list_posts(
    state: State<AppState>,
    query: Query<PostsQuery>,
) -> Result<Json<Vec<BlogPost>>, PostsError> {
    let posts = match query.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() && category != ALL_CATEGORIES => {
            state.content_client.fetch_posts_by_category(category).await?
        }
        _ => state.content_client.fetch_posts().await?,
    };
    Ok(Json(posts))
}

#[tracing::instrument(name = "Get post", skip(state))]
pub async fn get_post(
    state: State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, PostsError> {
    state
        .content_client
        .fetch_post(&slug)
        .await?
        .map(Json)
        .ok_or(PostsError::NotFound)
}
