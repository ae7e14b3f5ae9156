// E2E Test 1: Classify messages with the demonstration model
// Tests the complete flow: HTTP client → spam-api → model on disk

mod e2e;

use e2e::helpers::{demo_model_path, TestServer};
use serde_json::json;

#[tokio::test]
async fn test_e2e_1_health_and_model_info() {
    let server = TestServer::start(&demo_model_path()).await.expect("server start");

    let (status, health) = server.get("/health").await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(health, json!({ "status": "healthy", "model_loaded": true }));

    let (status, info) = server.get("/model-info").await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(info["vocabulary_size"], 40);
    assert_eq!(info["features"], 40);
    assert_eq!(info["prior_spam_probability"], 0.4);
    assert!(info["stopwords_count"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_e2e_1_spam_message() {
    let server = TestServer::start(&demo_model_path()).await.expect("server start");

    let message = "Congratulations! You have been selected as a lottery winner. \
                   Claim your FREE cash prize today, click here!";
    let (status, body) = server.predict(message).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["message"], message);
    assert_eq!(body["prediction"], "SPAM");
    assert_eq!(body["is_spam"], true);
    assert_eq!(
        body["cleaned_words"],
        json!([
            "congratulations", "selected", "lottery", "winner", "claim",
            "free", "cash", "prize", "today", "click"
        ])
    );
    assert_eq!(body["word_count"], 10);
    assert!(body["confidence"].as_f64().unwrap() > 1.0);
}

#[tokio::test]
async fn test_e2e_1_ham_message() {
    let server = TestServer::start(&demo_model_path()).await.expect("server start");

    let (status, body) = server
        .predict("Please review the attached report before our team meeting tomorrow.")
        .await
        .unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["prediction"], "HAM");
    assert_eq!(body["is_spam"], false);
    assert_eq!(body["word_count"], 7);
}

#[tokio::test]
async fn test_e2e_1_empty_message() {
    let server = TestServer::start(&demo_model_path()).await.expect("server start");

    let (status, body) = server.predict("").await.unwrap();

    // p_spam = 0.4, so the prior alone favours ham
    assert_eq!(status, 200);
    assert_eq!(body["prediction"], "HAM");
    assert_eq!(body["word_count"], 0);
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((confidence - (0.6f64.ln() - 0.4f64.ln())).abs() < 1e-9);
}

#[tokio::test]
async fn test_e2e_1_invalid_payload() {
    let server = TestServer::start(&demo_model_path()).await.expect("server start");

    let response = server
        .client
        .post(format!("{}/predict", server.base_url))
        .json(&json!({ "body": "no message field" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());
}
