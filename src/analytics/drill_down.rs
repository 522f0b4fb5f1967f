// src/analytics/drill_down.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    analytics::{
        aggregator::percent,
        matcher::match_topic,
        subject::normalize_subject,
        topic::{resolve_topic, resolve_topic_name},
    },
    config::{DEFAULT_MARKS_PER_QUESTION, RECENT_SCORE_LIMIT},
    models::{
        analytics::{ScorePoint, Tally, TopicDetail},
        attempt::TestAttempt,
        question::QuestionResult,
    },
};

const UNSPECIFIED: &str = "unspecified";

/// Collects every question related to `requested` into a single-topic summary.
///
/// Attempts without a timestamp are dated "now" in the score history.
pub fn topic_detail(attempts: &[TestAttempt], requested: &str) -> TopicDetail {
    topic_detail_at(attempts, requested, Utc::now())
}

pub fn topic_detail_at(
    attempts: &[TestAttempt],
    requested: &str,
    now: DateTime<Utc>,
) -> TopicDetail {
    let mut detail = TopicDetail {
        topic: requested.trim().to_string(),
        ..Default::default()
    };

    for (index, attempt) in attempts.iter().enumerate() {
        let Some(label) = attempt.subject.as_deref() else {
            continue;
        };
        let subject = normalize_subject(label);
        let mut touched = false;

        if !attempt.questions.is_empty() {
            let marks_per_question = attempt
                .marks_per_question
                .filter(|marks| *marks > 0.0)
                .unwrap_or(DEFAULT_MARKS_PER_QUESTION);

            for raw in &attempt.questions {
                let question = QuestionResult::from_raw(raw, marks_per_question);
                let key = resolve_topic(&question, subject, subject.as_str());
                if !match_topic(requested, &key) {
                    continue;
                }
                touched = true;

                let subtopic = question.subtopic.clone().unwrap_or_else(|| key.clone());
                let difficulty = question.difficulty.as_deref().unwrap_or(UNSPECIFIED);
                let question_type = question.question_type.as_deref().unwrap_or(UNSPECIFIED);

                detail.record(1, question.correct as u32, question.attempted as u32);
                bump(&mut detail.by_subtopic, &subtopic, 1, question.correct as u32);
                bump(&mut detail.by_difficulty, difficulty, 1, question.correct as u32);
                bump(&mut detail.by_question_type, question_type, 1, question.correct as u32);
            }
        } else if let Some(summaries) = attempt.topic_summaries() {
            for (name, summary) in summaries {
                let key = resolve_topic_name(Some(name.as_str()), subject, subject.as_str());
                if !match_topic(requested, &key) {
                    continue;
                }
                touched = true;

                let total = summary.total_questions.unwrap_or(0);
                let correct = summary.correct_answers.unwrap_or(0).min(total);
                let attempted = summary.attempted.unwrap_or(0).min(total);

                detail.record(total, correct, attempted);
                bump(&mut detail.by_subtopic, &key, total, correct);
                bump(&mut detail.by_difficulty, UNSPECIFIED, total, correct);
                bump(&mut detail.by_question_type, UNSPECIFIED, total, correct);
            }
        }

        if !touched {
            continue;
        }

        detail.total_tests = detail.total_tests.saturating_add(1);
        if let Some(score) = attempt.percentage() {
            detail.recent_scores.push(ScorePoint {
                attempt_id: attempt.key(index),
                subject,
                score,
                taken_at: attempt.taken_at().unwrap_or(now),
            });
        }
    }

    detail.accuracy = percent(detail.correct_answers as f64, detail.total_questions as f64);
    for tallies in [
        &mut detail.by_subtopic,
        &mut detail.by_difficulty,
        &mut detail.by_question_type,
    ] {
        for tally in tallies.values_mut() {
            tally.accuracy = percent(tally.correct as f64, tally.total as f64);
        }
    }

    detail.recent_scores.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    detail.recent_scores.truncate(RECENT_SCORE_LIMIT);

    detail
}

impl TopicDetail {
    fn record(&mut self, questions: u32, correct: u32, attempted: u32) {
        self.total_questions = self.total_questions.saturating_add(questions);
        self.correct_answers = self.correct_answers.saturating_add(correct);
        self.attempted_questions = self.attempted_questions.saturating_add(attempted);
    }
}

fn bump(tallies: &mut BTreeMap<String, Tally>, key: &str, total: u32, correct: u32) {
    let tally = tallies.entry(key.to_string()).or_default();
    tally.total = tally.total.saturating_add(total);
    tally.correct = tally.correct.saturating_add(correct);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history() -> Vec<TestAttempt> {
        TestAttempt::list_from_value(json!([
            {
                "id": "old",
                "subject": "Physics",
                "score": 40,
                "date": "2024-01-10T09:00:00Z",
                "questions": [
                    {"topic": "Units and Measurement", "subtopic": "Errors", "difficulty": "Easy",
                     "type": "MCQ", "isCorrect": true, "userAnswer": "A"},
                    {"topic": "Units and Measurement", "subtopic": "Dimensions",
                     "difficulty": "Hard", "type": "MCQ", "isCorrect": false, "userAnswer": "C"},
                    {"topic": "Optics", "isCorrect": true}
                ]
            },
            {
                "id": "new",
                "subject": "Physics",
                "score": 90,
                "date": "2024-02-10T09:00:00Z",
                "questions": [
                    {"topic": "units & measurements", "subtopic": "Errors", "difficulty": "easy",
                     "questionType": "numerical", "isCorrect": true}
                ]
            },
            {
                "id": "other",
                "subject": "Biology",
                "score": 70,
                "questions": [{"topic": "Genetics", "isCorrect": true}]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_collects_matching_questions() {
        let detail = topic_detail(&history(), "Physical World, Units, and Measurements");

        assert_eq!(detail.total_tests, 2);
        assert_eq!(detail.total_questions, 3);
        assert_eq!(detail.correct_answers, 2);
        assert_eq!(detail.attempted_questions, 2);
        assert_eq!(detail.accuracy, 67);

        assert_eq!(detail.by_subtopic["Errors"].total, 2);
        assert_eq!(detail.by_subtopic["Errors"].accuracy, 100);
        assert_eq!(detail.by_difficulty["hard"].correct, 0);
        assert_eq!(detail.by_question_type["mcq"].total, 2);
        assert_eq!(detail.by_question_type["numerical"].total, 1);
    }

    #[test]
    fn test_recent_scores_newest_first() {
        let detail = topic_detail(&history(), "units and measurement");
        let ids: Vec<&str> = detail.recent_scores.iter().map(|p| p.attempt_id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[test]
    fn test_undated_attempts_use_now() {
        let now = Utc::now();
        let detail = topic_detail_at(&history(), "Genetics", now);
        assert_eq!(detail.recent_scores.len(), 1);
        assert_eq!(detail.recent_scores[0].taken_at, now);
    }

    #[test]
    fn test_topic_wise_summaries_are_included() {
        let attempts = TestAttempt::list_from_value(json!([{
            "subject": "Chemistry",
            "score": 65,
            "performanceMetrics": {"topicWisePerformance": {
                "Ionic Equilibrium": {"totalQuestions": 6, "correctAnswers": 4, "attempted": 5}
            }}
        }]))
        .unwrap();

        let detail = topic_detail(&attempts, "Equilibrium");
        assert_eq!(detail.total_tests, 1);
        assert_eq!(detail.total_questions, 6);
        assert_eq!(detail.by_subtopic["Equilibrium"].correct, 4);
        assert_eq!(detail.by_difficulty[UNSPECIFIED].total, 6);
    }

    #[test]
    fn test_huge_summary_counts_saturate() {
        let attempts = TestAttempt::list_from_value(json!([{
            "subject": "Physics",
            "performanceMetrics": {"topicWisePerformance": {
                "Ray Optics": {"totalQuestions": 3000000000u64, "correctAnswers": 10},
                "Wave Optics": {"totalQuestions": 3000000000u64, "correctAnswers": 20}
            }}
        }]))
        .unwrap();

        let detail = topic_detail(&attempts, "Optics");
        assert_eq!(detail.total_questions, u32::MAX);
        assert_eq!(detail.correct_answers, 30);
        assert_eq!(detail.by_difficulty[UNSPECIFIED].total, u32::MAX);
        assert_eq!(detail.by_subtopic["Wave Optics"].total, 3_000_000_000);
    }

    #[test]
    fn test_no_match_is_empty() {
        let detail = topic_detail(&history(), "Electrostatics");
        assert_eq!(detail.total_tests, 0);
        assert_eq!(detail.total_questions, 0);
        assert!(detail.recent_scores.is_empty());
    }
}
