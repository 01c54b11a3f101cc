use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_me::get_me;
use super::handlers::ApiError;
use super::handlers::home::home;
use super::handlers::log_in::log_in;
use super::handlers::posts;
use super::handlers::products;
use super::handlers::sign_up::sign_up;
use super::middleware::authenticate as auth_middleware;
use super::middleware::AuthGate;
use super::middleware::ExemptRoutes;
use crate::domain::post::service::PostService;
use crate::domain::product::service::ProductService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresPostRepository;
use crate::outbound::repositories::PostgresProductRepository;
use crate::outbound::repositories::PostgresStore;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub post_service: Arc<PostService<PostgresPostRepository>>,
    pub product_service: Arc<ProductService<PostgresProductRepository>>,
    pub auth_gate: Arc<AuthGate>,
}

impl AppState {
    /// Wire the domain services over `store`, sharing one authenticator.
    pub fn new(store: &PostgresStore, authenticator: Arc<Authenticator>) -> Self {
        Self {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store.users),
                Arc::clone(&authenticator),
            )),
            post_service: Arc::new(PostService::new(Arc::clone(&store.posts))),
            product_service: Arc::new(ProductService::new(Arc::clone(&store.products))),
            auth_gate: Arc::new(AuthGate::new(authenticator, ExemptRoutes::default())),
        }
    }
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .route("/", get(home))
        .route("/signup", post(sign_up))
        .route("/login", post(log_in))
        .route("/me", get(get_me))
        .route("/posts", post(posts::create_post).get(posts::list_posts))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route(
            "/products/:product_id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // Dropping a timed-out handler future cancels its in-flight query.
    routes
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_envelope))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `TimeoutLayer` answers with a bare 408; give it the JSON error envelope.
async fn timeout_envelope(response: Response<Body>) -> axum::response::Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::RequestTimeout("Request timed out".to_string()).into_response();
    }
    response
}
