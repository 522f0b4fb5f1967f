// src/models/tutor.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::lenient;

/// Longest conversation the tutor accepts in one request.
pub const MAX_HISTORY_TURNS: usize = 50;

/// Speaker of a chat turn, in the model endpoint's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// DTO for asking the tutor a question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Earlier turns of the conversation, oldest first.
    #[serde(default)]
    #[validate(custom(function = validate_history))]
    pub history: Vec<ChatTurn>,

    #[validate(length(
        min = 1,
        max = 4000,
        message = "Message length must be between 1 and 4000 characters."
    ))]
    pub message: String,
}

fn validate_history(history: &[ChatTurn]) -> Result<(), validator::ValidationError> {
    if history.len() > MAX_HISTORY_TURNS {
        return Err(validator::ValidationError::new("history_too_long"));
    }
    for turn in history {
        if turn.text.trim().is_empty() {
            return Err(validator::ValidationError::new("empty_turn"));
        }
        if turn.text.len() > 8000 {
            return Err(validator::ValidationError::new("turn_too_long"));
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// DTO for requesting a mind map of one topic.
#[derive(Debug, Deserialize, Validate)]
pub struct MindMapRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Topic length must be between 1 and 200 characters."
    ))]
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindMapEdge {
    pub source: String,
    pub target: String,
}

/// Concept graph returned to the front end for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindMap {
    pub nodes: Vec<MindMapNode>,
    pub edges: Vec<MindMapEdge>,
}

/// The graph as the model writes it; ids may be numbers, labels may be missing.
#[derive(Debug, Deserialize)]
pub struct RawMindMap {
    #[serde(default, deserialize_with = "lenient::list")]
    pub nodes: Vec<RawMindMapNode>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub edges: Vec<RawMindMapEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RawMindMapNode {
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawMindMapEdge {
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub target: Option<String>,
}

impl From<RawMindMap> for MindMap {
    /// Drops nodes without an id, duplicate ids, and edges that point at unknown nodes.
    fn from(raw: RawMindMap) -> Self {
        let mut seen = BTreeSet::new();
        let nodes: Vec<MindMapNode> = raw
            .nodes
            .into_iter()
            .filter_map(|node| {
                let id = node.id?;
                if !seen.insert(id.clone()) {
                    return None;
                }
                let label = node
                    .label
                    .or_else(|| {
                        node.data
                            .as_ref()
                            .and_then(|data| data.get("label"))
                            .and_then(Value::as_str)
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| id.clone());
                Some(MindMapNode {
                    id,
                    label,
                    data: node.data,
                })
            })
            .collect();

        let edges = raw
            .edges
            .into_iter()
            .filter_map(|edge| {
                let (source, target) = (edge.source?, edge.target?);
                (seen.contains(&source) && seen.contains(&target))
                    .then_some(MindMapEdge { source, target })
            })
            .collect();

        Self { nodes, edges }
    }
}
