// src/handlers/tutor.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    clients::{
        TutorModel,
        tutor::{chat_turns, extract_mind_map, mind_map_prompt},
    },
    error::AppError,
    models::tutor::{ChatReply, ChatRequest, MindMapRequest},
};

/// Sends the conversation to the model and returns its reply.
pub async fn chat(
    State(tutor): State<Arc<dyn TutorModel>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let turns = chat_turns(&payload.history, &payload.message);
    let reply = tutor.generate(&turns).await?;

    Ok(Json(ChatReply { reply }))
}

/// Asks the model for a concept graph of one topic and parses it.
pub async fn mind_map(
    State(tutor): State<Arc<dyn TutorModel>>,
    Json(payload): Json<MindMapRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let reply = tutor.generate(&mind_map_prompt(&payload.topic)).await?;
    let map = extract_mind_map(&reply)?;
    tracing::info!(
        "Built mind map for '{}' with {} node(s)",
        payload.topic.trim(),
        map.nodes.len()
    );

    Ok(Json(map))
}
