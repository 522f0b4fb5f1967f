// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

/// Score (percentage) at or above which an attempt counts as passed.
pub const PASSING_SCORE: f64 = 70.0;

/// Marks awarded per question when neither the question nor the attempt says otherwise.
pub const DEFAULT_MARKS_PER_QUESTION: f64 = 1.0;

/// Question count assumed for attempts that only carry a score.
pub const DEFAULT_ESTIMATED_QUESTIONS: u32 = 10;

/// Topics need at least this many questions to appear in strongest/weakest lists.
pub const MIN_RANKED_TOPIC_QUESTIONS: u32 = 3;

/// Length of the strongest/weakest topic lists.
pub const RANKED_TOPIC_COUNT: usize = 3;

/// Number of score points kept in a topic drill-down history.
pub const RECENT_SCORE_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote test-data API (e.g. `https://api.example.com/api`).
    pub student_api_url: Url,
    /// Full URL of the generative model's `generateContent` endpoint.
    pub ai_api_url: Url,
    pub ai_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub upstream_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let student_api_url = required_url("STUDENT_API_URL")?;
        let ai_api_url = required_url("AI_API_URL")?;

        let ai_api_key = env::var("AI_API_KEY").ok().filter(|key| !key.trim().is_empty());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let upstream_timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("UPSTREAM_TIMEOUT_SECS is invalid: {}", e))
            })?,
            Err(_) => 30,
        };

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            student_api_url,
            ai_api_url,
            ai_api_key,
            bind_addr,
            allowed_origins,
            upstream_timeout_secs,
            rust_log,
        })
    }
}

fn required_url(key: &str) -> Result<Url, AppError> {
    let raw = env::var(key).map_err(|_| AppError::Config(format!("{} must be set", key)))?;
    Url::parse(&raw).map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", key, e)))
}
