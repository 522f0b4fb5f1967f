// src/models/attempt.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::AppError, models::lenient};

/// One test attempt as returned by the test-data API.
///
/// Every field is optional and read leniently: a value of the wrong type is
/// treated as missing rather than failing the whole history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAttempt {
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub id: Option<String>,

    /// Document stores expose the identifier as `_id`.
    #[serde(default, rename = "_id", deserialize_with = "lenient::identifier")]
    pub object_id: Option<String>,

    /// Free-text subject label ("Physics", "phys", "NEET Chemistry", ...).
    /// A blank but non-empty label still counts and lands in `Other`.
    #[serde(default, deserialize_with = "lenient::label")]
    pub subject: Option<String>,

    /// Percentage score. Non-numeric values are dropped.
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,

    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub questions: Vec<RawQuestion>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub performance_metrics: Option<PerformanceMetrics>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub marks_per_question: Option<f64>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub question_count: Option<u32>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_questions: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    #[serde(default, deserialize_with = "lenient::keyed")]
    pub topic_wise_performance: BTreeMap<String, TopicSummary>,
}

/// Pre-aggregated per-topic counts supplied instead of per-question detail.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_questions: Option<u32>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub correct_answers: Option<u32>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub attempted: Option<u32>,
}

/// One question result in the shape the test-data API sends it.
///
/// Correctness and attempt state may be carried under several field names;
/// `QuestionResult::from_raw` folds them into one canonical record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default, deserialize_with = "lenient::text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subtopic: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub marks: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub max_marks: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub points: Option<f64>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_correct: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub correct: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient::present")]
    pub user_answer: Option<Value>,
    #[serde(default, deserialize_with = "lenient::present")]
    pub selected_answer: Option<Value>,
    #[serde(default, deserialize_with = "lenient::present")]
    pub correct_answer: Option<Value>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub attempted: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_answered: bool,

    #[serde(default, deserialize_with = "lenient::text")]
    pub difficulty: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub question_type: Option<String>,
}

impl TestAttempt {
    /// Reads a test-history payload. The root must be a JSON array;
    /// elements that are not objects are skipped.
    pub fn list_from_value(payload: Value) -> Result<Vec<TestAttempt>, AppError> {
        let Value::Array(items) = payload else {
            return Err(AppError::BadRequest(
                "Test history must be a JSON array".to_string(),
            ));
        };

        let total = items.len();
        let attempts: Vec<TestAttempt> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        if attempts.len() < total {
            tracing::debug!(
                "Skipped {} malformed test attempt(s) out of {}",
                total - attempts.len(),
                total
            );
        }

        Ok(attempts)
    }

    /// Identifier used for per-topic test sets. Falls back to the
    /// attempt's position in the history.
    pub fn key(&self, index: usize) -> String {
        self.id
            .clone()
            .or_else(|| self.object_id.clone())
            .unwrap_or_else(|| format!("attempt-{}", index + 1))
    }

    /// Score clamped to the 0–100 percentage range.
    pub fn percentage(&self) -> Option<f64> {
        self.score.map(|score| score.clamp(0.0, 100.0))
    }

    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        self.date.or(self.created_at)
    }

    pub fn topic_summaries(&self) -> Option<&BTreeMap<String, TopicSummary>> {
        self.performance_metrics
            .as_ref()
            .map(|metrics| &metrics.topic_wise_performance)
            .filter(|summaries| !summaries.is_empty())
    }
}
