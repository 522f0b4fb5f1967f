// src/models/question.rs

use crate::{
    analytics::evaluate::{is_attempted, is_correct},
    models::attempt::RawQuestion,
};

/// Canonical question result used by the aggregator.
///
/// Built once per raw question at the boundary, so aggregation code never
/// inspects the upstream field names directly.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    /// First non-empty of `topic`, `subtopic`, `subject`, `category`.
    pub topic: Option<String>,
    pub subtopic: Option<String>,
    pub marks: f64,
    pub correct: bool,
    pub attempted: bool,
    pub difficulty: Option<String>,
    pub question_type: Option<String>,
}

impl QuestionResult {
    /// `default_marks` is the attempt's marks-per-question, used when the
    /// question carries no positive mark value of its own.
    pub fn from_raw(raw: &RawQuestion, default_marks: f64) -> Self {
        let topic = [&raw.topic, &raw.subtopic, &raw.subject, &raw.category]
            .into_iter()
            .flatten()
            .map(|text| text.trim())
            .find(|text| !text.is_empty())
            .map(str::to_string);

        let marks = [raw.marks, raw.max_marks, raw.points]
            .into_iter()
            .flatten()
            .find(|marks| *marks > 0.0)
            .unwrap_or(default_marks);

        Self {
            topic,
            subtopic: raw.subtopic.as_deref().map(str::trim).map(str::to_string),
            marks,
            correct: is_correct(raw),
            attempted: is_attempted(raw),
            difficulty: raw.difficulty.as_deref().map(normalize_label),
            question_type: raw
                .question_type
                .as_deref()
                .or(raw.kind.as_deref())
                .map(normalize_label),
        }
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawQuestion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_topic_priority() {
        let q = QuestionResult::from_raw(
            &raw(json!({"subtopic": "Kinematics", "category": "Mechanics"})),
            1.0,
        );
        assert_eq!(q.topic.as_deref(), Some("Kinematics"));

        let q = QuestionResult::from_raw(&raw(json!({"topic": "  ", "category": "Optics"})), 1.0);
        assert_eq!(q.topic.as_deref(), Some("Optics"));

        let q = QuestionResult::from_raw(&raw(json!({})), 1.0);
        assert_eq!(q.topic, None);
    }

    #[test]
    fn test_marks_fallbacks() {
        assert_eq!(QuestionResult::from_raw(&raw(json!({"marks": 4})), 1.0).marks, 4.0);
        assert_eq!(QuestionResult::from_raw(&raw(json!({"maxMarks": 2})), 1.0).marks, 2.0);
        assert_eq!(QuestionResult::from_raw(&raw(json!({"points": 3})), 1.0).marks, 3.0);
        assert_eq!(QuestionResult::from_raw(&raw(json!({"marks": 0})), 4.0).marks, 4.0);
        assert_eq!(QuestionResult::from_raw(&raw(json!({})), 1.0).marks, 1.0);
    }

    #[test]
    fn test_labels_are_lowercased() {
        let q = QuestionResult::from_raw(
            &raw(json!({"difficulty": " Hard ", "type": "MCQ"})),
            1.0,
        );
        assert_eq!(q.difficulty.as_deref(), Some("hard"));
        assert_eq!(q.question_type.as_deref(), Some("mcq"));
    }
}
