use serde_json::{json, Value};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

#[tokio::test]
async fn subscribe_returns_200_for_a_valid_request() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/v3/contacts"))
        .and(header("api-key", "xkeysib-test"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&app.newsletter_server)
        .await;

    let response = app
        .post_subscribe(&json!({
            "email": "ursula_le_guin@gmail.com",
            "firstName": "Ursula",
            "lastName": "Le Guin"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "message": "Successfully subscribed to newsletter!" })
    );
}

#[tokio::test]
async fn subscribe_sends_the_contact_to_the_configured_list() {
    let app = spawn_app().await;

    Mock::given(path("/v3/contacts"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.newsletter_server)
        .await;

    app.post_subscribe(&json!({ "email": "ursula@domain.com", "firstName": "Ursula" }))
        .await;

    let requests = app.newsletter_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["email"], "ursula@domain.com");
    assert_eq!(body["attributes"]["FIRSTNAME"], "Ursula");
    assert_eq!(body["listIds"], json!([1]));
    assert_eq!(body["updateEnabled"], true);
}

#[tokio::test]
async fn subscribe_returns_400_for_invalid_input_without_calling_the_crm() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&app.newsletter_server)
        .await;

    let test_cases = vec![
        (json!({ "firstName": "Ursula" }), "Email is required"),
        (json!({ "email": "" }), "Email is required"),
        (json!({ "email": null, "firstName": "Ursula" }), "Email is required"),
        (json!({ "email": "not-an-email" }), "Please enter a valid email address"),
        (json!({ "email": "ursula@domain" }), "Please enter a valid email address"),
    ];

    for (invalid_body, message) in test_cases {
        let response = app.post_subscribe(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            invalid_body
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "success": false, "message": message }));
    }
}

#[tokio::test]
async fn subscribe_returns_400_for_an_unreadable_body() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/api/newsletter/subscribe", &app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn subscribe_returns_400_for_an_existing_contact() {
    let app = spawn_app().await;

    Mock::given(path("/v3/contacts"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "duplicate_parameter",
            "message": "Contact already exist"
        })))
        .expect(1)
        .mount(&app.newsletter_server)
        .await;

    let response = app.post_subscribe(&json!({ "email": "ursula@domain.com" })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": false, "message": "You are already subscribed to our newsletter!" })
    );
}

#[tokio::test]
async fn subscribe_returns_500_with_a_generic_message_when_the_crm_fails() {
    let app = spawn_app().await;

    for (status, code) in [(401, "unauthorized"), (500, "internal_error")] {
        Mock::given(path("/v3/contacts"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({ "code": code, "message": "Something broke" })),
            )
            .up_to_n_times(1)
            .mount(&app.newsletter_server)
            .await;

        let response = app.post_subscribe(&json!({ "email": "ursula@domain.com" })).await;

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "message": "Failed to subscribe. Please try again." })
        );
    }
}

#[tokio::test]
async fn preflight_requests_get_cors_headers() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/api/newsletter/subscribe", &app.address),
        )
        .header("Origin", "https://lucyjamesabaji.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_bare_options_request_is_answered_with_200() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/api/newsletter/subscribe", &app.address),
        )
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = spawn_app().await;

    let response = app.get("/api/newsletter/subscribe").await;

    assert_eq!(response.status().as_u16(), 405);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Method not allowed" }));
}

#[tokio::test]
async fn landing_page_shows_the_newsletter_form() {
    let app = spawn_app().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<form action="/newsletter" method="post">"#));
    assert!(!html.contains("class=\"message"));
}

#[tokio::test]
async fn form_submission_shows_the_outcome_on_the_page() {
    let app = spawn_app().await;

    Mock::given(path("/v3/contacts"))
        .respond_with(ResponseTemplate::new(201))
        .up_to_n_times(1)
        .mount(&app.newsletter_server)
        .await;
    Mock::given(path("/v3/contacts"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "code": "duplicate_parameter" })),
        )
        .mount(&app.newsletter_server)
        .await;

    let form = [("email", "ursula@domain.com"), ("firstName", "Ursula")];

    let html = app.post_newsletter_form(&form).await.text().await.unwrap();
    assert!(html.contains(r#"<p class="message success">Successfully subscribed to newsletter!</p>"#));

    let html = app.post_newsletter_form(&form).await.text().await.unwrap();
    assert!(html.contains(
        r#"<p class="message success">You are already subscribed to our newsletter!</p>"#
    ));

    let response = app.post_newsletter_form(&[("email", "nope")]).await;
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<p class="message error">Please enter a valid email address</p>"#));
}
