// src/handlers/profile.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{clients::StudentApi, error::AppError, utils::auth::BearerToken};

/// Get the current student's profile from the test-data API.
pub async fn get_profile(
    State(students): State<Arc<dyn StudentApi>>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse, AppError> {
    let profile = students.profile(token.as_str()).await?;
    Ok(Json(profile))
}
