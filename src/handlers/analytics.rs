// src/handlers/analytics.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;

use crate::{
    analytics::{aggregate, topic_detail},
    clients::StudentApi,
    error::AppError,
    fallback,
    models::{attempt::TestAttempt, sourced::Sourced},
    utils::auth::BearerToken,
};

/// Aggregates a test history supplied in the request body.
///
/// The body must be a JSON array; its elements may be as sparse as the
/// test-data API sends them.
pub async fn aggregate_history(Json(payload): Json<Value>) -> Result<impl IntoResponse, AppError> {
    let attempts = TestAttempt::list_from_value(payload)?;
    Ok(Json(aggregate(&attempts)))
}

/// Aggregates the caller's own test history.
///
/// If the test-data API fails, the built-in sample history is aggregated
/// instead and the response is marked `source: "fallback"`.
pub async fn get_summary(
    State(students): State<Arc<dyn StudentApi>>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse, AppError> {
    let response = match students.test_history(token.as_str()).await {
        Ok(attempts) => {
            tracing::info!("Aggregating {} test attempt(s)", attempts.len());
            Sourced::live(aggregate(&attempts))
        }
        Err(e) => {
            tracing::warn!("Test history unavailable, serving sample analytics: {}", e);
            Sourced::fallback(aggregate(&fallback::sample_attempts()), e.user_message())
        }
    };

    Ok(Json(response))
}

/// Drill-down over every question in the caller's history that matches `topic`.
pub async fn get_topic_detail(
    State(students): State<Arc<dyn StudentApi>>,
    Extension(token): Extension<BearerToken>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if topic.trim().is_empty() {
        return Err(AppError::BadRequest("Topic must not be empty".to_string()));
    }

    let attempts = students.test_history(token.as_str()).await?;
    let detail = topic_detail(&attempts, &topic);

    if detail.total_questions == 0 {
        return Err(AppError::NotFound(format!(
            "No questions found for topic '{}'",
            topic.trim()
        )));
    }

    Ok(Json(detail))
}
