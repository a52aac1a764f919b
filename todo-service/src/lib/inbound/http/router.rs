use std::sync::Arc;
use std::time::Duration;

use auth::BearerResolver;
use auth::GrantFlow;
use auth::SessionIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::delete_todo::delete_todo;
use super::handlers::get_todo::get_todo;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::signup::signup;
use super::handlers::temp_code::temp_code;
use super::handlers::token::token;
use super::handlers::update_todo::full_update_todo;
use super::handlers::update_todo::partial_update_todo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::todo::service::TodoService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresTodoRepository;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub todo_service: Arc<TodoService<PostgresTodoRepository>>,
    pub session_issuer: Arc<SessionIssuer>,
    pub grant_flow: Arc<GrantFlow>,
    pub resolver: Arc<BearerResolver>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/oauth/login", post(login))
        .route("/api/oauth/signup", post(signup))
        .route("/api/oauth/token", post(token))
        .route("/api/oauth/temp-code", get(temp_code));

    let protected_routes = Router::new()
        .route("/api/users/me", get(me))
        .route("/api/todos", get(list_todos))
        .route("/api/todos", post(create_todo))
        .route("/api/todos/:todo_id", get(get_todo))
        .route("/api/todos/:todo_id", put(full_update_todo))
        .route("/api/todos/:todo_id", patch(partial_update_todo))
        .route("/api/todos/:todo_id", delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
