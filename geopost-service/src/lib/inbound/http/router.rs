use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::posts::count_posts;
use super::handlers::posts::create_post;
use super::handlers::posts::delete_post;
use super::handlers::posts::get_post;
use super::handlers::posts::list_posts;
use super::handlers::posts::nearby_posts;
use super::handlers::posts::update_post;
use super::handlers::register::register;
use super::middleware::authenticate;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    post_service: Arc<dyn PostServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
    };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/me", get(me))
        .route("/posts", post(create_post).get(list_posts))
        .route("/posts/nearby", get(nearby_posts))
        .route("/posts/count", get(count_posts))
        .route(
            "/posts/:post_id",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
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

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
