//! HTTP collaborator clients against a mock server.

use std::time::Duration;

use axum::body::Bytes;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{AppError, UpstreamConfig};
use wellness_api::clients::{
    FaceClassifier, FaceClassifierClient, FaceDetection, ReplyGenerator, ReplyGeneratorClient,
    TextClassifier, TextClassifierClient,
};

fn upstream(server: &MockServer, route: &str, api_key: Option<&str>) -> UpstreamConfig {
    UpstreamConfig::new(
        format!("{}{}", server.uri(), route),
        api_key.map(str::to_string),
        5,
    )
}

// =============================================================================
// Face classifier
// =============================================================================

#[tokio::test]
async fn test_face_classifier_detected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(query_param("enforce_detection", "false"))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "dominant_emotion": "happy",
            "emotion": {"happy": 97.1, "neutral": 2.9}
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = FaceClassifierClient::new(&upstream(&server, "/analyze", None), false).unwrap();
    let detection = client.classify(Bytes::from_static(b"jpeg")).await.unwrap();

    match detection {
        FaceDetection::Detected(raw) => {
            assert_eq!(raw[0]["dominant_emotion"], "happy");
            assert_eq!(raw[0]["emotion"], json!({"happy": 0.971, "neutral": 0.029}));
        }
        FaceDetection::NoFaceFound => panic!("expected a detection"),
    }
}

#[tokio::test]
async fn test_face_classifier_no_face() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(query_param("enforce_detection", "true"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = FaceClassifierClient::new(&upstream(&server, "/analyze", None), true).unwrap();
    let detection = client.classify(Bytes::from_static(b"jpeg")).await.unwrap();
    assert_eq!(detection, FaceDetection::NoFaceFound);
}

#[tokio::test]
async fn test_face_classifier_bad_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let client = FaceClassifierClient::new(&upstream(&server, "/analyze", None), false).unwrap();
    let err = client.classify(Bytes::from_static(b"???")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == "Invalid image format"));
}

#[tokio::test]
async fn test_face_classifier_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let client = FaceClassifierClient::new(&upstream(&server, "/analyze", None), false).unwrap();
    let err = client.classify(Bytes::from_static(b"jpeg")).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Upstream { status: Some(500), ref detail, .. } if detail == "model crashed"
    ));
}

#[tokio::test]
async fn test_face_classifier_non_json_body_is_adapter_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = FaceClassifierClient::new(&upstream(&server, "/analyze", None), false).unwrap();
    let err = client.classify(Bytes::from_static(b"jpeg")).await.unwrap_err();
    assert!(matches!(err, AppError::Adapter(_)));
}

#[tokio::test]
async fn test_face_classifier_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = UpstreamConfig::new(format!("{}/analyze", server.uri()), None, 1);
    let client = FaceClassifierClient::new(&config, false).unwrap();
    let err = client.classify(Bytes::from_static(b"jpeg")).await.unwrap_err();
    assert!(matches!(err, AppError::UpstreamTimeout(_)));
}

// =============================================================================
// Text classifier
// =============================================================================

#[tokio::test]
async fn test_text_classifier_sends_bearer_and_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/emotion"))
        .and(header("authorization", "Bearer hf-test-key"))
        .and(body_json(json!({"inputs": "I feel great"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([[{"label": "joy", "score": 0.98}]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = upstream(&server, "/models/emotion", Some("hf-test-key"));
    let client = TextClassifierClient::new(&config).unwrap();
    let raw = client.classify("I feel great").await.unwrap();
    assert_eq!(raw[0][0]["label"], "joy");
}

#[tokio::test]
async fn test_text_classifier_propagates_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "Model is loading"})),
        )
        .mount(&server)
        .await;

    let config = upstream(&server, "/models/emotion", Some("hf-test-key"));
    let err = TextClassifierClient::new(&config)
        .unwrap()
        .classify("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream { status: Some(503), .. }));
}

#[test]
fn test_text_classifier_requires_api_key() {
    let config = UpstreamConfig::new("http://localhost:1/models/emotion", None, 5);
    assert!(TextClassifierClient::new(&config).is_err());
}

// =============================================================================
// Reply generator
// =============================================================================

#[tokio::test]
async fn test_reply_generator_reads_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "I am stressed"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "That sounds hard."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = upstream(&server, "/v1/chat/completions", Some("sk-test"));
    let client = ReplyGeneratorClient::new(&config, "gpt-3.5-turbo").unwrap();
    assert_eq!(client.reply("I am stressed").await.unwrap(), "That sounds hard.");
}

#[tokio::test]
async fn test_reply_generator_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let config = upstream(&server, "/v1/chat/completions", Some("sk-test"));
    let err = ReplyGeneratorClient::new(&config, "gpt-3.5-turbo")
        .unwrap()
        .reply("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream { status: None, .. }));
}

#[tokio::test]
async fn test_reply_generator_auth_failure_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "bad key"}})))
        .mount(&server)
        .await;

    let config = upstream(&server, "/v1/chat/completions", Some("sk-wrong"));
    let err = ReplyGeneratorClient::new(&config, "gpt-3.5-turbo")
        .unwrap()
        .reply("hi")
        .await
        .unwrap_err();
    assert_eq!(err.status().as_u16(), 401);
}
