// src/models/sourced.rs

use serde::Serialize;

/// Whether a response carries live upstream data or the built-in fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// Response envelope for views that stay populated when the upstream fails.
#[derive(Debug, Serialize)]
pub struct Sourced<T> {
    pub source: DataSource,
    /// Why the fallback was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            source: DataSource::Live,
            message: None,
            data,
        }
    }

    pub fn fallback(data: T, message: impl Into<String>) -> Self {
        Self {
            source: DataSource::Fallback,
            message: Some(message.into()),
            data,
        }
    }
}
