use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, DATE};
use axum::http::{HeaderName, Method, Request};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::configuration::Settings;
use crate::routes::{
    blog_list, blog_post, get_post, health_check, home, list_posts, method_not_allowed,
    newsletter_health_check, newsletter_signup, preflight, subscribe,
};
use crate::AppState;

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let app_state = AppState {
            newsletter_client: Arc::new(configuration.newsletter.client()?),
            content_client: Arc::new(configuration.content.client()?),
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: router(app_state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        axum::serve(self.listener, self.router.into_make_service()).await
    }
}

pub fn router(app_state: AppState) -> Router {
    let newsletter_api = Router::new()
        .route(
            "/api/newsletter/subscribe",
            post(subscribe)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors_layer());

    Router::new()
        .route("/", get(home))
        .route("/newsletter", post(newsletter_signup))
        .route("/health_check", get(health_check))
        .route("/health_check/newsletter", get(newsletter_health_check))
        .route("/blog", get(blog_list))
        .route("/blog/:slug", get(blog_post))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .merge(newsletter_api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default();
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(app_state)
}

/// The newsletter endpoint is called cross-origin by the static site.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            ACCEPT,
            HeaderName::from_static("accept-version"),
            CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            CONTENT_TYPE,
            DATE,
            HeaderName::from_static("x-api-version"),
        ])
}
