// src/handlers/leaderboard.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    clients::StudentApi, error::AppError, fallback, models::sourced::Sourced,
    utils::auth::BearerToken,
};

/// Ranked leaderboard. Falls back to a fixed sample board when both the
/// leaderboard and the admin student list are unavailable.
pub async fn get_leaderboard(
    State(students): State<Arc<dyn StudentApi>>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse, AppError> {
    let response = match students.leaderboard(token.as_str()).await {
        Ok(entries) => Sourced::live(entries),
        Err(e) => {
            tracing::warn!("Leaderboard unavailable, serving sample board: {}", e);
            Sourced::fallback(fallback::sample_leaderboard(), e.user_message())
        }
    };

    Ok(Json(response))
}
