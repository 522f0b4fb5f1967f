// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{analytics, health, leaderboard, profile, tutor},
    state::AppState,
    utils::auth::bearer_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (analytics, student, tutor).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (collaborator clients and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let analytics_routes = Router::new()
        .route("/aggregate", post(analytics::aggregate_history))
        // Routes that read the caller's own history
        .merge(
            Router::new()
                .route("/summary", get(analytics::get_summary))
                .route("/topics/{topic}", get(analytics::get_topic_detail))
                .layer(middleware::from_fn(bearer_middleware)),
        );

    let student_routes = Router::new()
        .route("/api/profile", get(profile::get_profile))
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .layer(middleware::from_fn(bearer_middleware));

    let tutor_routes = Router::new()
        .route("/chat", post(tutor::chat))
        .route("/mind-map", post(tutor::mind_map))
        .layer(middleware::from_fn(bearer_middleware));

    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/analytics", analytics_routes)
        .nest("/api/tutor", tutor_routes)
        .merge(student_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
