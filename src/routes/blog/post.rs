use askama_axum::Template;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::domain::BlogPost;
use crate::AppState;

#[derive(Template)]
#[template(path = "blog/post.html")]
struct PostPage {
    post: BlogPost,
}

#[derive(Template)]
#[template(path = "blog/not_found.html")]
struct NotFoundPage {
    slug: String,
}

/// Shown when the CMS could not be read. The retry link reloads the page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    message: String,
    retry_url: String,
}

impl ErrorPage {
    pub fn new(message: &str, uri: &Uri) -> Self {
        Self {
            message: message.to_string(),
            retry_url: uri.to_string(),
        }
    }
}

#[tracing::instrument(name = "Render blog post", skip(state, uri))]
pub async fn blog_post(state: State<AppState>, Path(slug): Path<String>, uri: Uri) -> Response {
    match state.content_client.fetch_post(&slug).await {
        Ok(Some(post)) => PostPage { post }.into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, NotFoundPage { slug }).into_response(),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to load blog post");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorPage::new("We couldn't load this article.", &uri),
            )
                .into_response()
        }
    }
}
