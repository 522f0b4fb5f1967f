// src/models/analytics.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical subject buckets. Every raw subject label maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
    Other,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::Other => "Other",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a topic's numbers came from.
///
/// Ordered by how far the data is from real per-question results; merging
/// two origins keeps the weaker one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Folded from per-question results or topic-wise summaries.
    #[default]
    Measured,
    /// Estimated from a bare score.
    Estimated,
    /// Synthesized filler for an otherwise empty subject.
    Placeholder,
}

impl DataOrigin {
    pub fn merge(self, other: DataOrigin) -> DataOrigin {
        self.max(other)
    }
}

/// Per-topic counters under one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAggregate {
    pub name: String,
    pub origin: DataOrigin,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub attempted_questions: u32,
    pub total_marks: f64,
    pub marks_scored: f64,
    /// Ids of the attempts that touched this topic.
    pub tests: BTreeSet<String>,

    pub accuracy: u32,
    pub attempt_rate: u32,
    pub marks_percentage: u32,
    pub test_count: usize,
}

/// Read-only view of a topic used by the ranking lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStanding {
    pub topic: String,
    pub origin: DataOrigin,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub total_marks: f64,
    pub marks_scored: f64,
    pub accuracy: u32,
    pub marks_percentage: u32,
}

impl From<&TopicAggregate> for TopicStanding {
    fn from(topic: &TopicAggregate) -> Self {
        Self {
            topic: topic.name.clone(),
            origin: topic.origin,
            total_questions: topic.total_questions,
            correct_answers: topic.correct_answers,
            total_marks: topic.total_marks,
            marks_scored: topic.marks_scored,
            accuracy: topic.accuracy,
            marks_percentage: topic.marks_percentage,
        }
    }
}

/// Everything derived for one canonical subject in a single aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAggregate {
    pub subject: Subject,
    pub count: u32,
    pub valid_score_count: u32,
    pub total_score: f64,
    pub passed: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub total_marks: f64,
    pub marks_scored: f64,

    pub average_score: u32,
    pub pass_rate: u32,
    pub accuracy: u32,
    pub marks_percentage: u32,

    pub topics: BTreeMap<String, TopicAggregate>,
    /// All topics, most marks scored first.
    pub sorted_topics: Vec<TopicStanding>,
    pub strongest_topics: Vec<TopicStanding>,
    pub weakest_topics: Vec<TopicStanding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_attempts: u32,
    pub scored_attempts: u32,
    pub average_score: u32,
    pub pass_rate: u32,
}

/// Result of one aggregation run over a test history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub overall: OverallStats,
    pub by_subject: BTreeMap<Subject, SubjectAggregate>,
}

/// Question and correctness counts for one bucket of a drill-down.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub total: u32,
    pub correct: u32,
    pub accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePoint {
    pub attempt_id: String,
    pub subject: Subject,
    pub score: f64,
    pub taken_at: DateTime<Utc>,
}

/// Single-topic summary across every attempt whose questions match the topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetail {
    pub topic: String,
    pub total_tests: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub attempted_questions: u32,
    pub accuracy: u32,
    pub by_subtopic: BTreeMap<String, Tally>,
    pub by_difficulty: BTreeMap<String, Tally>,
    pub by_question_type: BTreeMap<String, Tally>,
    /// Newest first.
    pub recent_scores: Vec<ScorePoint>,
}
