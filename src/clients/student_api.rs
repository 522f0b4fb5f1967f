// src/clients/student_api.rs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{
    error::AppError,
    models::{
        attempt::TestAttempt,
        student::{LeaderboardEntry, StudentProfile, leaderboard_rows, rank_entries},
    },
};

/// Read access to the remote test-data API on behalf of one student.
///
/// `token` is the caller's bearer token, forwarded as-is.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn test_history(&self, token: &str) -> Result<Vec<TestAttempt>, AppError>;

    async fn profile(&self, token: &str) -> Result<StudentProfile, AppError>;

    async fn leaderboard(&self, token: &str) -> Result<Vec<LeaderboardEntry>, AppError>;
}

/// `StudentApi` over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: Client,
    base_url: Url,
}

impl HttpStudentApi {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| AppError::InternalServerError(e.to_string()))
    }

    /// GETs a JSON document. Non-success statuses become errors carrying
    /// the upstream `{message}` when it sent one.
    async fn get_json(&self, path: &str, token: &str) -> Result<Value, AppError> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("Request to /{} failed with status {}", path, status));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::AuthError(message)),
            _ => Err(AppError::Upstream(message)),
        }
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn test_history(&self, token: &str) -> Result<Vec<TestAttempt>, AppError> {
        let payload = self.get_json("student/all-test-history", token).await?;
        TestAttempt::list_from_value(payload).map_err(|e| AppError::Upstream(e.user_message()))
    }

    async fn profile(&self, token: &str) -> Result<StudentProfile, AppError> {
        let payload = self.get_json("student/profile", token).await?;
        serde_json::from_value(payload)
            .map_err(|e| AppError::Upstream(format!("Unreadable student profile: {}", e)))
    }

    /// Falls back to the admin student list when the leaderboard endpoint fails.
    async fn leaderboard(&self, token: &str) -> Result<Vec<LeaderboardEntry>, AppError> {
        let primary = match self.get_json("student/leaderboard", token).await {
            Ok(payload) => leaderboard_rows(&payload)
                .ok_or_else(|| AppError::Upstream("Unreadable leaderboard".to_string())),
            Err(e) => Err(e),
        };

        let rows = match primary {
            Ok(rows) => rows,
            Err(primary_err) => {
                tracing::warn!(
                    "Leaderboard unavailable ({}); trying the admin student list",
                    primary_err
                );
                let payload = self
                    .get_json("admin/students", token)
                    .await
                    .map_err(|_| primary_err)?;
                leaderboard_rows(&payload)
                    .ok_or_else(|| AppError::Upstream("Unreadable student list".to_string()))?
            }
        };

        Ok(rank_entries(rows))
    }
}
