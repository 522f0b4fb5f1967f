// src/state.rs

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;

use crate::{
    clients::{GenerativeTutor, HttpStudentApi, StudentApi, TutorModel},
    config::Config,
    error::AppError,
};

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentApi>,
    pub tutor: Arc<dyn TutorModel>,
    pub config: Config,
}

impl AppState {
    /// Wires the HTTP collaborators described by `config`, sharing one
    /// connection pool between them.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let students = HttpStudentApi::new(client.clone(), config.student_api_url.clone());
        let tutor = GenerativeTutor::new(
            client,
            config.ai_api_url.clone(),
            config.ai_api_key.clone(),
        );

        Ok(Self {
            students: Arc::new(students),
            tutor: Arc::new(tutor),
            config,
        })
    }
}

impl FromRef<AppState> for Arc<dyn StudentApi> {
    fn from_ref(state: &AppState) -> Self {
        state.students.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TutorModel> {
    fn from_ref(state: &AppState) -> Self {
        state.tutor.clone()
    }
}
