// src/models/student.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::lenient;

/// Student profile as served by the test-data API.
/// Known fields are typed; anything else is passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(
        default,
        deserialize_with = "lenient::identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests_taken: Option<u32>,
}

const NAME_KEYS: [&str; 4] = ["name", "studentName", "username", "fullName"];
const SCORE_KEYS: [&str; 4] = ["score", "averageScore", "totalScore", "points"];
const TESTS_KEYS: [&str; 3] = ["testsTaken", "totalTests", "testCount"];

/// Array keys under which list endpoints wrap their rows.
const ROW_KEYS: [&str; 4] = ["leaderboard", "students", "data", "results"];

impl LeaderboardEntry {
    /// Reads a leaderboard or student row. Rows that are not objects are skipped.
    /// The rank is assigned later by `rank_entries`.
    pub fn from_value(row: &Value) -> Option<Self> {
        let row = row.as_object()?;

        let name = NAME_KEYS
            .iter()
            .filter_map(|key| row.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or("Anonymous")
            .to_string();

        let score = SCORE_KEYS
            .iter()
            .filter_map(|key| row.get(*key).and_then(Value::as_f64))
            .find(|score| score.is_finite())
            .unwrap_or(0.0);

        let tests_taken = TESTS_KEYS
            .iter()
            .filter_map(|key| row.get(*key).and_then(Value::as_u64))
            .next()
            .map(|n| n.min(u32::MAX as u64) as u32);

        Some(Self {
            rank: 0,
            name,
            score,
            tests_taken,
        })
    }
}

/// Reads the rows of a leaderboard-like payload: a bare array or an object
/// wrapping one under a well-known key.
pub fn leaderboard_rows(payload: &Value) -> Option<Vec<LeaderboardEntry>> {
    let rows = match payload {
        Value::Array(rows) => rows,
        Value::Object(map) => ROW_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))?,
        _ => return None,
    };

    Some(rows.iter().filter_map(LeaderboardEntry::from_value).collect())
}

/// Orders entries by score (highest first, then name) and numbers them from 1.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    entries
}
