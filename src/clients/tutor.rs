// src/clients/tutor.rs

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

use crate::{
    error::AppError,
    models::tutor::{ChatTurn, MindMap, RawMindMap},
};

const TUTOR_PREAMBLE: &str = "You are a patient NEET tutor for Physics, Chemistry and Biology. \
Explain step by step, keep answers focused on the NEET syllabus, and point out common mistakes.";

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)```").expect("json fence pattern is valid"));

static ANY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)```").expect("fence pattern is valid"));

/// A generative model that continues a conversation with one reply.
#[async_trait]
pub trait TutorModel: Send + Sync {
    async fn generate(&self, turns: &[ChatTurn]) -> Result<String, AppError>;
}

/// `TutorModel` backed by a `generateContent`-style HTTP endpoint.
#[derive(Debug, Clone)]
pub struct GenerativeTutor {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GenerativeTutor {
    pub fn new(client: Client, endpoint: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl TutorModel for GenerativeTutor {
    async fn generate(&self, turns: &[ChatTurn]) -> Result<String, AppError> {
        let contents: Vec<Value> = turns
            .iter()
            .map(|turn| json!({"role": turn.role, "parts": [{"text": turn.text}]}))
            .collect();

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "contents": contents }));
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Model endpoint returned {}: {}", status, body);
            return Err(AppError::Upstream(
                "The tutor is unavailable right now. Please try again.".to_string(),
            ));
        }

        let payload: Value = response.json().await?;
        payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::TutorReply("reply carried no candidate text".to_string()))
    }
}

/// Conversation sent to the model: preamble, earlier turns, then the new message.
pub fn chat_turns(history: &[ChatTurn], message: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() + 3);
    turns.push(ChatTurn::user(TUTOR_PREAMBLE));
    turns.push(ChatTurn::model("Understood. What would you like to study?"));
    turns.extend(history.iter().cloned());
    turns.push(ChatTurn::user(message.trim()));
    turns
}

pub fn mind_map_prompt(topic: &str) -> Vec<ChatTurn> {
    vec![ChatTurn::user(format!(
        "Create a concept mind map for the NEET topic \"{}\". \
Reply with JSON only, inside a ```json code block, shaped as \
{{\"nodes\":[{{\"id\":\"1\",\"label\":\"...\",\"data\":{{}}}}], \
\"edges\":[{{\"source\":\"1\",\"target\":\"2\"}}]}}. \
Use the topic itself as node \"1\" and keep it under 25 nodes.",
        topic.trim()
    ))]
}

/// Pulls the mind-map graph out of a model reply.
///
/// Tries a ```json block, then any fenced block that holds an object, then
/// the span from the first `{` to the last `}`.
pub fn extract_mind_map(reply: &str) -> Result<MindMap, AppError> {
    let candidates = JSON_FENCE
        .captures_iter(reply)
        .chain(ANY_FENCE.captures_iter(reply))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .filter(|body| body.starts_with('{'))
        .chain(brace_span(reply));

    for candidate in candidates {
        if let Ok(raw) = serde_json::from_str::<RawMindMap>(candidate) {
            let map = MindMap::from(raw);
            if !map.nodes.is_empty() {
                return Ok(map);
            }
        }
    }

    Err(AppError::TutorReply(
        "no mind map JSON with nodes found in the reply".to_string(),
    ))
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
