use campaign_manager_core::ai::{ScriptGenerator, ScriptRequest};
use campaign_manager_core::core::config::AiConfig;
use campaign_manager_core::types::GenerationError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn generator(server_uri: &str, api_key: Option<&str>) -> ScriptGenerator {
    let config = AiConfig {
        endpoint: format!("{}{}", server_uri, COMPLETIONS_PATH),
        api_key: api_key.map(str::to_string),
        timeout_secs: 5,
        ..AiConfig::default()
    };
    ScriptGenerator::new(&config).unwrap()
}

fn campaign_request() -> ScriptRequest {
    ScriptRequest::Campaign {
        campaign_type: "Lead Magnet".into(),
        city: "Austin".into(),
        budget: "500".into(),
        agent_name: "Dana Reyes".into(),
    }
}

fn video_request() -> ScriptRequest {
    ScriptRequest::Video {
        video_type: "Property Tour".into(),
        city: "Miami".into(),
        agent_name: "Sam".into(),
        tone: "Luxury".into(),
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn campaign_script_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "temperature": 0.7,
            "max_tokens": 500,
            "messages": [
                {"role": "system", "content": "You are an expert in real estate marketing and Facebook Ads."},
                {"role": "user", "content": campaign_request().user_prompt("American")}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Headline: Find Your Austin Home")))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator(&server.uri(), Some("sk-test"))
        .generate(&campaign_request())
        .await;
    assert_eq!(text, "Headline: Find Your Austin Home");
}

#[tokio::test]
async fn video_script_uses_larger_cap() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({"max_tokens": 600})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Scene 1: drone shot")))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator(&server.uri(), Some("sk-test"))
        .try_generate(&video_request())
        .await
        .unwrap();
    assert_eq!(text, "Scene 1: drone shot");
}

#[tokio::test]
async fn non_success_status_is_an_error_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let gen = generator(&server.uri(), Some("sk-test"));
    let err = gen.try_generate(&campaign_request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Status { status: 500, ref body } if body == "upstream exploded"));

    let text = gen.generate(&campaign_request()).await;
    assert!(text.starts_with("Error: "), "{text}");
    assert!(text.contains("500"));
}

#[tokio::test]
async fn malformed_body_is_an_error_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let gen = generator(&server.uri(), Some("sk-test"));
    let err = gen.try_generate(&campaign_request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
    assert!(gen.generate(&campaign_request()).await.starts_with("Error: "));
}

#[tokio::test]
async fn empty_choices_is_an_error_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let gen = generator(&server.uri(), Some("sk-test"));
    let err = gen.try_generate(&video_request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyChoices));
    assert_eq!(
        gen.generate(&video_request()).await,
        "Error: response contained no choices"
    );
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let gen = generator(&server.uri(), None);
    let err = gen.try_generate(&campaign_request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingApiKey));
    assert!(gen.generate(&campaign_request()).await.starts_with("Error: "));
}

#[tokio::test]
async fn network_failure_is_an_error_string() {
    // Nothing listens on port 1
    let gen = generator("http://127.0.0.1:1", Some("sk-test"));
    let err = gen.try_generate(&campaign_request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Transport(_)));

    let text = gen.generate(&campaign_request()).await;
    assert!(text.starts_with("Error: "), "{text}");
}
