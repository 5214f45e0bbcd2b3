use serde_json::{json, Value};
use wiremock::matchers::{any, header, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{collection, entry, spawn_app, TestApp, ENTRIES_PATH};

async fn serve_entries(app: &TestApp, items: Vec<Value>) {
    Mock::given(path(ENTRIES_PATH))
        .and(header("Authorization", "Bearer cda-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(items)))
        .mount(&app.content_server)
        .await;
}

async fn fail_entries(app: &TestApp) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&app.content_server)
        .await;
}

fn three_posts() -> Vec<Value> {
    vec![
        entry("lead", "Leading Quietly", "Leadership", true),
        entry("faith", "Faith at Work", "Faith", false),
        entry("grow", "Growing Slowly", "Leadership", false),
    ]
}

#[tokio::test]
async fn blog_list_shows_featured_posts_separately_when_unfiltered() {
    let app = spawn_app().await;
    serve_entries(&app, three_posts()).await;

    let response = app.get("/blog").await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    let (featured, rest) = html
        .split_once(r#"<section class="posts">"#)
        .expect("No post list on the page");
    assert!(featured.contains("<h2>Featured</h2>"));
    assert!(featured.contains("Leading Quietly"));
    assert!(!rest.contains("Leading Quietly"));
    assert!(rest.contains("Faith at Work"));
    assert!(rest.contains("Growing Slowly"));
    assert!(html.contains("March 5, 2024"));
}

#[tokio::test]
async fn blog_list_filters_by_category() {
    let app = spawn_app().await;
    serve_entries(&app, three_posts()).await;

    let html = app.get_html("/blog?category=Faith").await;

    assert!(!html.contains("<h2>Featured</h2>"));
    assert!(html.contains("Faith at Work"));
    assert!(!html.contains("Growing Slowly"));
    assert!(html.contains("<strong>Faith</strong>"));
}

#[tokio::test]
async fn blog_list_searches_titles_excerpts_and_tags() {
    let app = spawn_app().await;
    serve_entries(&app, three_posts()).await;

    let html = app.get_html("/blog?q=SLOWLY").await;
    assert!(html.contains("Growing Slowly"));
    assert!(!html.contains("Faith at Work"));

    let html = app.get_html("/blog?category=All&q=growth").await;
    assert!(html.contains("Growing Slowly"));
    assert!(html.contains("Faith at Work"));
}

#[tokio::test]
async fn blog_list_has_an_empty_state() {
    let app = spawn_app().await;
    serve_entries(&app, three_posts()).await;

    let html = app.get_html("/blog?q=nothing-matches-this").await;

    assert!(html.contains("No articles found. Try adjusting your search terms or filters."));
}

#[tokio::test]
async fn blog_list_shows_an_error_page_with_a_retry_link() {
    let app = spawn_app().await;
    fail_entries(&app).await;

    let response = app.get("/blog").await;

    assert_eq!(response.status().as_u16(), 500);
    let html = response.text().await.unwrap();
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("Try again</a>"));
}

#[tokio::test]
async fn blog_post_renders_the_post() {
    let app = spawn_app().await;
    Mock::given(path(ENTRIES_PATH))
        .and(query_param("fields.slug", "lead"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(collection(vec![entry(
                "lead",
                "Leading Quietly",
                "Leadership",
                true,
            )])),
        )
        .expect(1)
        .mount(&app.content_server)
        .await;

    let response = app.get("/blog/lead").await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("<h1>Leading Quietly</h1>"));
    assert!(html.contains(r#"<div class="content"><p>Body text</p></div>"#));
}

#[tokio::test]
async fn blog_post_is_404_for_an_unknown_slug() {
    let app = spawn_app().await;
    serve_entries(&app, vec![]).await;

    let response = app.get("/blog/missing").await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(response.text().await.unwrap().contains("Article not found"));
}

#[tokio::test]
async fn blog_post_shows_an_error_page_when_the_cms_fails() {
    let app = spawn_app().await;
    fail_entries(&app).await;

    let response = app.get("/blog/lead").await;

    assert_eq!(response.status().as_u16(), 500);
    assert!(response.text().await.unwrap().contains("Try again</a>"));
}

#[tokio::test]
async fn posts_api_returns_normalized_posts() {
    let app = spawn_app().await;
    serve_entries(&app, three_posts()).await;

    let response = app.get("/api/posts").await;

    assert_eq!(response.status().as_u16(), 200);
    let posts: Vec<Value> = response.json().await.unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0]["slug"], "lead");
    assert_eq!(posts[0]["readTime"], "5 min read");
    assert_eq!(posts[0]["author"], "Lucy James Abaji");
    assert_eq!(posts[0]["image"], "/api/placeholder/600/400");
    assert_eq!(posts[0]["tags"], json!(["growth"]));
}

#[tokio::test]
async fn posts_api_filters_by_category_upstream() {
    let app = spawn_app().await;
    Mock::given(path(ENTRIES_PATH))
        .and(query_param("fields.category", "Faith"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(collection(vec![entry(
                "faith",
                "Faith at Work",
                "Faith",
                false,
            )])),
        )
        .expect(1)
        .mount(&app.content_server)
        .await;

    let posts: Vec<Value> = app
        .get("/api/posts?category=Faith")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["category"], "Faith");
}

#[tokio::test]
async fn posts_api_returns_404_for_an_unknown_slug() {
    let app = spawn_app().await;
    serve_entries(&app, vec![]).await;

    let response = app.get("/api/posts/missing").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "The requested post does not exist." }));
}

#[tokio::test]
async fn posts_api_returns_500_when_the_cms_fails() {
    let app = spawn_app().await;
    fail_entries(&app).await;

    let response = app.get("/api/posts").await;
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "Failed to load blog posts. Please try again." })
    );

    assert_eq!(app.get("/api/posts/lead").await.status().as_u16(), 500);
}
