// src/analytics/evaluate.rs

//! Correctness and attempt predicates over the raw question shape.
//! These are the only places that know which field names carry the answer state.

use serde_json::Value;

use crate::models::attempt::RawQuestion;

/// A question is correct if any of the upstream correctness signals says so.
pub fn is_correct(question: &RawQuestion) -> bool {
    question.is_correct
        || question.correct
        || question.status.as_deref() == Some("correct")
        || answer_matches(question)
}

/// A question counts as attempted when an answer key is present, even if it is null.
pub fn is_attempted(question: &RawQuestion) -> bool {
    question.user_answer.is_some()
        || question.selected_answer.is_some()
        || question.attempted
        || question.is_answered
}

fn answer_matches(question: &RawQuestion) -> bool {
    match (&question.user_answer, &question.correct_answer) {
        (Some(Value::Null), _) | (_, None) => false,
        (Some(given), Some(expected)) => given == expected,
        (None, _) => false,
    }
}
