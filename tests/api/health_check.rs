use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get("/health_check").await;

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app().await;

    let response = app.get("/health_check").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn newsletter_health_check_reflects_the_api_key() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/v3/account"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&app.newsletter_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/account"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.newsletter_server)
        .await;

    assert_eq!(app.get("/health_check/newsletter").await.status().as_u16(), 200);
    assert_eq!(app.get("/health_check/newsletter").await.status().as_u16(), 503);
}
