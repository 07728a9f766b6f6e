use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod attempt;
pub mod client;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use config::Config;
pub use services::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The browser client is served from another origin
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .nest("/api", api_routes())
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/quizzes",
            get(handlers::quizzes::list_quizzes).post(handlers::quizzes::create_quiz),
        )
        .route("/quizzes/{id}", get(handlers::quizzes::get_quiz))
        .route("/quizzes/{id}/submit", post(handlers::quizzes::submit_quiz))
        .route(
            "/quizzes/{id}/leaderboard",
            get(handlers::quizzes::get_leaderboard),
        )
        .route("/results/{result_id}", get(handlers::results::get_result))
}
