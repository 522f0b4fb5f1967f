// tests/api_tests.rs

mod common;

use common::{GOOD_TOKEN, broken_upstream, healthy_upstream, history, serve, spawn_app};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn health_check_works() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/health", address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let missing = client
        .get(format!("{}/api/nothing-here", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn aggregate_endpoint_works() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/analytics/aggregate", address))
        .json(&history())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["overall"]["totalAttempts"], 3);
    assert_eq!(body["overall"]["averageScore"], 75);
    assert_eq!(body["overall"]["passRate"], 67);

    let physics = &body["bySubject"]["Physics"];
    assert_eq!(physics["totalQuestions"], 2);
    assert_eq!(physics["correctAnswers"], 1);
    assert_eq!(physics["totalMarks"], 5.0);
    assert_eq!(physics["marksScored"], 2.0);
    assert_eq!(physics["accuracy"], 50);
    assert_eq!(physics["marksPercentage"], 40);
    assert_eq!(physics["topics"]["Mechanics"]["testCount"], 1);

    let chemistry = &body["bySubject"]["Chemistry"];
    assert_eq!(chemistry["totalQuestions"], 4);
    assert_eq!(chemistry["topics"]["Equilibrium"]["accuracy"], 75);

    assert_eq!(body["bySubject"]["Biology"]["count"], 1);
}

#[tokio::test]
async fn aggregate_endpoint_rejects_non_array() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/analytics/aggregate", address))
        .json(&json!({"subject": "Physics", "score": 80}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn summary_requires_bearer_token() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/summary", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn summary_uses_live_history() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/summary", address))
        .bearer_auth(GOOD_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["source"], "live");
    assert!(body.get("message").is_none());
    assert_eq!(body["data"]["overall"]["totalAttempts"], 3);
    assert_eq!(body["data"]["bySubject"]["Physics"]["totalQuestions"], 2);
}

#[tokio::test]
async fn summary_falls_back_when_upstream_fails() {
    let upstream = serve(broken_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/summary", address))
        .bearer_auth(GOOD_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["message"], "database down");
    assert_eq!(body["data"]["overall"]["totalAttempts"], 4);
}

#[tokio::test]
async fn summary_falls_back_on_rejected_token() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/summary", address))
        .bearer_auth("stale-token")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["message"], "Session expired");
}

#[tokio::test]
async fn topic_detail_works() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/topics/Mechanics", address))
        .bearer_auth(GOOD_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["topic"], "Mechanics");
    assert_eq!(body["totalTests"], 1);
    assert_eq!(body["totalQuestions"], 2);
    assert_eq!(body["correctAnswers"], 1);
    assert_eq!(body["accuracy"], 50);
    assert_eq!(body["byDifficulty"]["easy"]["correct"], 1);
    assert_eq!(body["byDifficulty"]["hard"]["correct"], 0);
    assert_eq!(body["recentScores"][0]["attemptId"], "t1");
    assert_eq!(body["recentScores"][0]["score"], 75.0);
}

#[tokio::test]
async fn topic_detail_unknown_topic_is_404() {
    let upstream = serve(healthy_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/topics/Genetics", address))
        .bearer_auth(GOOD_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn topic_detail_propagates_upstream_failure() {
    let upstream = serve(broken_upstream()).await;
    let address = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/analytics/topics/Mechanics", address))
        .bearer_auth(GOOD_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "database down");
}
