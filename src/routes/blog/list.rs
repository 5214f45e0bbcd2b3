use askama_axum::Template;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::ErrorPage;
use crate::domain::{categories, BlogPost, PostFilter};
use crate::AppState;

#[derive(Template)]
#[template(path = "blog/list.html")]
struct BlogList<'a> {
    featured: Vec<&'a BlogPost>,
    posts: Vec<&'a BlogPost>,
    categories: Vec<String>,
    selected_category: &'a str,
    search_term: String,
}

/// `GET /blog?category=..&q=..`. Filtering happens here, on the full list,
/// so the category bar always shows every category.
#[tracing::instrument(name = "Render blog list", skip(state, filter, uri))]
pub async fn blog_list(state: State<AppState>, filter: Query<PostFilter>, uri: Uri) -> Response {
    let all_posts = match state.content_client.fetch_posts().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to load blog posts");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorPage::new("We couldn't load the articles.", &uri),
            )
                .into_response();
        }
    };

    let (featured, posts): (Vec<&BlogPost>, Vec<&BlogPost>) = if filter.is_empty() {
        all_posts.iter().partition(|post| post.featured)
    } else {
        (vec![], filter.apply(&all_posts))
    };

    BlogList {
        featured,
        posts,
        categories: categories(&all_posts),
        selected_category: filter.selected_category(),
        search_term: filter.search_term(),
    }
    .into_response()
}
