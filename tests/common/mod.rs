// tests/common/mod.rs

#![allow(dead_code)]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use neet_analytics::{config::Config, routes, state::AppState};
use serde_json::{Value, json};

pub const GOOD_TOKEN: &str = "good-token";

type StubResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Serves `app` on a random local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Spawns the service configured against the given stub upstream.
pub async fn spawn_app(upstream: &str) -> String {
    let config = Config {
        student_api_url: format!("{}/api", upstream).parse().unwrap(),
        ai_api_url: format!("{}/v1/generate", upstream).parse().unwrap(),
        ai_api_key: Some("test-key".to_string()),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        upstream_timeout_secs: 5,
        rust_log: "error".to_string(),
    };

    let state = AppState::from_config(config).expect("Failed to build app state");
    serve(routes::create_router(state)).await
}

pub fn history() -> Value {
    json!([
        {
            "id": "t1",
            "subject": "Physics",
            "score": 75,
            "date": "2024-03-01T09:00:00Z",
            "questions": [
                {"topic": "Mechanics", "marks": 2, "isCorrect": true, "difficulty": "easy"},
                {"topic": "Mechanics", "marks": 3, "isCorrect": false, "difficulty": "hard"}
            ]
        },
        {
            "id": "t2",
            "subject": "chem",
            "score": 60,
            "date": "2024-03-05T09:00:00Z",
            "performanceMetrics": {
                "topicWisePerformance": {
                    "Equilibrium": {"totalQuestions": 4, "correctAnswers": 3}
                }
            }
        },
        {"id": "t3", "subject": "Botany", "score": 90}
    ])
}

fn authorized(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {}", GOOD_TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Session expired"})),
        )),
    }
}

async fn stub_history(headers: HeaderMap) -> StubResult {
    authorized(&headers)?;
    Ok(Json(history()))
}

async fn stub_profile(headers: HeaderMap) -> StubResult {
    authorized(&headers)?;
    Ok(Json(json!({
        "id": 42,
        "name": "Asha Rao",
        "email": "asha@example.com",
        "targetYear": 2026
    })))
}

async fn stub_leaderboard(headers: HeaderMap) -> StubResult {
    authorized(&headers)?;
    Ok(Json(json!([
        {"name": "Ravi", "score": 81},
        {"name": "Asha", "score": 93, "testsTaken": 12}
    ])))
}

async fn stub_admin_students(headers: HeaderMap) -> StubResult {
    authorized(&headers)?;
    Ok(Json(json!({"students": [
        {"studentName": "Kiran", "averageScore": 70.5},
        {"studentName": "Dev", "averageScore": 88}
    ]})))
}

async fn stub_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "database down"})),
    )
}

/// Echoes the last user turn, or answers mind-map prompts with a fenced graph.
async fn stub_model(Json(body): Json<Value>) -> Json<Value> {
    let last = body["contents"]
        .as_array()
        .and_then(|turns| turns.last())
        .and_then(|turn| turn.pointer("/parts/0/text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let text = if last.contains("mind map") {
        if last.contains("Unmappable") {
            "Sorry, I cannot draw that one.".to_string()
        } else {
            r#"Here you go:
```json
{"nodes": [{"id": "1", "label": "Optics"}, {"id": "2", "label": "Lenses"},
           {"id": "3", "label": "Mirrors"}],
 "edges": [{"source": "1", "target": "2"}, {"source": "1", "target": "3"}]}
```"#
                .to_string()
        }
    } else {
        format!("Echo: {}", last)
    };

    Json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
}

/// Upstream where every collaborator answers normally.
pub fn healthy_upstream() -> Router {
    Router::new()
        .route("/api/student/all-test-history", get(stub_history))
        .route("/api/student/profile", get(stub_profile))
        .route("/api/student/leaderboard", get(stub_leaderboard))
        .route("/api/admin/students", get(stub_admin_students))
        .route("/v1/generate", post(stub_model))
}

/// Upstream without a leaderboard endpoint; only the admin student list works.
pub fn admin_only_upstream() -> Router {
    Router::new()
        .route("/api/student/leaderboard", get(stub_failure))
        .route("/api/admin/students", get(stub_admin_students))
}

/// Upstream where every data endpoint fails.
pub fn broken_upstream() -> Router {
    Router::new()
        .route("/api/student/all-test-history", get(stub_failure))
        .route("/api/student/profile", get(stub_failure))
        .route("/api/student/leaderboard", get(stub_failure))
        .route("/api/admin/students", get(stub_failure))
        .route("/v1/generate", post(stub_failure))
}
