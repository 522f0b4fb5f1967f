// src/fallback.rs

//! Fixed sample data shown when the test-data API cannot be reached,
//! so dashboards stay populated. Always served with `source: "fallback"`.

use serde_json::json;

use crate::models::{
    attempt::TestAttempt,
    student::{LeaderboardEntry, rank_entries},
};

/// A small, fixed test history covering all three NEET subjects.
pub fn sample_attempts() -> Vec<TestAttempt> {
    let payload = json!([
        {
            "id": "sample-physics-1",
            "subject": "Physics",
            "score": 72,
            "date": "2024-01-15T10:00:00Z",
            "questions": [
                {"topic": "Laws of Motion", "marks": 4, "isCorrect": true, "userAnswer": "B"},
                {"topic": "Laws of Motion", "marks": 4, "isCorrect": true, "userAnswer": "A"},
                {"topic": "Laws of Motion", "marks": 4, "isCorrect": false, "userAnswer": "C"},
                {"topic": "Current Electricity", "marks": 4, "isCorrect": true, "userAnswer": "D"},
                {"topic": "Current Electricity", "marks": 4, "isCorrect": false, "userAnswer": "A"},
                {"topic": "Current Electricity", "marks": 4, "isCorrect": false}
            ]
        },
        {
            "id": "sample-chemistry-1",
            "subject": "Chemistry",
            "score": 64,
            "date": "2024-01-22T10:00:00Z",
            "marksPerQuestion": 4,
            "performanceMetrics": {
                "topicWisePerformance": {
                    "Chemical Bonding": {"totalQuestions": 5, "correctAnswers": 4, "attempted": 5},
                    "Hydrocarbons": {"totalQuestions": 5, "correctAnswers": 2, "attempted": 4},
                    "Equilibrium": {"totalQuestions": 4, "correctAnswers": 3, "attempted": 4}
                }
            }
        },
        {
            "id": "sample-biology-1",
            "subject": "Biology",
            "score": 81,
            "date": "2024-02-02T10:00:00Z",
            "questions": [
                {"topic": "Genetics", "marks": 4, "isCorrect": true, "userAnswer": "A"},
                {"topic": "Genetics", "marks": 4, "isCorrect": true, "userAnswer": "C"},
                {"topic": "Genetics", "marks": 4, "isCorrect": true, "userAnswer": "B"},
                {"topic": "Human Physiology", "marks": 4, "isCorrect": false, "userAnswer": "D"},
                {"topic": "Human Physiology", "marks": 4, "isCorrect": true, "userAnswer": "B"},
                {"topic": "Human Physiology", "marks": 4, "isCorrect": true, "userAnswer": "A"}
            ]
        },
        {
            "id": "sample-biology-2",
            "subject": "Botany",
            "score": 58,
            "date": "2024-02-12T10:00:00Z",
            "questionCount": 20
        }
    ]);

    TestAttempt::list_from_value(payload).unwrap_or_default()
}

/// A fixed leaderboard, already ranked.
pub fn sample_leaderboard() -> Vec<LeaderboardEntry> {
    let rows = [
        ("Ananya Sharma", 96.0, 24),
        ("Rohan Verma", 92.5, 21),
        ("Priya Nair", 89.0, 19),
        ("Kabir Singh", 85.5, 22),
        ("Meera Iyer", 81.0, 17),
    ];

    rank_entries(
        rows.into_iter()
            .map(|(name, score, tests)| LeaderboardEntry {
                rank: 0,
                name: name.to_string(),
                score,
                tests_taken: Some(tests),
            })
            .collect(),
    )
}
