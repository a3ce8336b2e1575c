use anyhow::Result;
use mockito::Matcher;
use serde_json::Value;

use super::classify;
use super::router;
use super::RelayState;
use crate::infrastructure::gemini::ApiError;
use crate::infrastructure::gemini::Candidate;
use crate::infrastructure::gemini::Gemini;
use crate::infrastructure::gemini::GenerateContentResponse;
use crate::infrastructure::gemini::ResponseContent;
use crate::infrastructure::gemini::ResponsePart;
use crate::infrastructure::gemini::UsageMetadata;
use crate::infrastructure::relay::error::RelayError;

fn payload_with_text(text: &str) -> GenerateContentResponse {
    return GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(ResponseContent {
                parts: Some(vec![ResponsePart {
                    text: Some(text.to_string()),
                }]),
            }),
            finish_reason: Some("STOP".to_string()),
        }]),
        usage_metadata: Some(UsageMetadata {
            prompt_token_count: Some(9),
            candidates_token_count: Some(21),
            total_token_count: Some(30),
        }),
        error: None,
    };
}

async fn spawn_relay(gemini: Gemini) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;

    tokio::spawn(async move {
        return axum::serve(listener, router(RelayState { gemini })).await;
    });

    return Ok(format!("http://{address}"));
}

#[test]
fn it_classifies_successful_payloads() -> Result<()> {
    let reply = classify(200, payload_with_text("  All good.  "))?;

    assert_eq!(reply.response, "All good.");
    assert_eq!(reply.usage.prompt_tokens, 9);
    assert_eq!(reply.usage.candidates_tokens, 21);
    assert_eq!(reply.usage.total_tokens, 30);

    return Ok(());
}

#[test]
fn it_defaults_missing_usage_to_zero() -> Result<()> {
    let mut payload = payload_with_text("Hi.");
    payload.usage_metadata = None;

    let reply = classify(200, payload)?;

    assert_eq!(reply.usage.prompt_tokens, 0);
    assert_eq!(reply.usage.candidates_tokens, 0);
    assert_eq!(reply.usage.total_tokens, 0);

    return Ok(());
}

#[test]
fn it_mirrors_provider_statuses() {
    let payload = GenerateContentResponse {
        candidates: None,
        usage_metadata: None,
        error: Some(ApiError {
            message: Some("Forbidden".to_string()),
        }),
    };

    let err = classify(403, payload).unwrap_err();
    assert_eq!(
        err,
        RelayError::Provider {
            status: 403,
            message: "Forbidden".to_string()
        }
    );
}

#[test]
fn it_falls_back_to_unknown_provider_errors() {
    let err = classify(503, GenerateContentResponse::default()).unwrap_err();
    assert_eq!(
        err,
        RelayError::Provider {
            status: 503,
            message: "Unknown error".to_string()
        }
    );
}

#[test]
fn it_flags_error_payloads_on_successful_statuses() {
    let payload = GenerateContentResponse {
        candidates: None,
        usage_metadata: None,
        error: Some(ApiError {
            message: Some("Internal provider failure".to_string()),
        }),
    };

    let err = classify(200, payload).unwrap_err();
    assert_eq!(
        err,
        RelayError::Provider {
            status: 500,
            message: "Internal provider failure".to_string()
        }
    );
}

#[test]
fn it_requires_a_candidate() {
    let err = classify(200, GenerateContentResponse::default()).unwrap_err();
    assert_eq!(
        err,
        RelayError::EmptyResult {
            message: "No response candidate found.".to_string()
        }
    );
}

#[test]
fn it_rejects_empty_candidate_lists() {
    let payload = GenerateContentResponse {
        candidates: Some(vec![]),
        usage_metadata: None,
        error: None,
    };

    let err = classify(200, payload).unwrap_err();
    assert_eq!(
        err,
        RelayError::EmptyResult {
            message: "No response candidate found.".to_string()
        }
    );
}

#[test]
fn it_reports_truncated_output() {
    let mut payload = payload_with_text("Hi.");
    payload.candidates.as_mut().unwrap()[0].finish_reason = Some("MAX_TOKENS".to_string());

    let err = classify(200, payload).unwrap_err();
    assert_eq!(
        err,
        RelayError::AbnormalFinish {
            reason: "MAX_TOKENS".to_string()
        }
    );
    assert_eq!(err.message(), "Model output was cut off (MAX_TOKENS).");
}

#[test]
fn it_reports_unexpected_finish_reasons() {
    let mut payload = payload_with_text("Hi.");
    payload.candidates.as_mut().unwrap()[0].finish_reason = Some("SAFETY".to_string());

    let err = classify(200, payload).unwrap_err();
    assert_eq!(
        err,
        RelayError::AbnormalFinish {
            reason: "SAFETY".to_string()
        }
    );
}

#[test]
fn it_accepts_candidates_without_a_finish_reason() -> Result<()> {
    let mut payload = payload_with_text("Hi.");
    payload.candidates.as_mut().unwrap()[0].finish_reason = None;

    let reply = classify(200, payload)?;
    assert_eq!(reply.response, "Hi.");

    return Ok(());
}

#[test]
fn it_rejects_whitespace_only_output() {
    let err = classify(200, payload_with_text("   ")).unwrap_err();
    assert_eq!(
        err,
        RelayError::EmptyResult {
            message: "Invalid or empty response from Gemini API".to_string()
        }
    );
}

#[tokio::test]
async fn it_relays_generated_responses() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/test-1:generateContent?key=abc")
        .with_status(200)
        .with_body(serde_json::to_string(&payload_with_text("Doing well."))?)
        .create();

    let url = spawn_relay(Gemini::with_url(server.url())).await?;
    let res = reqwest::Client::new()
        .post(format!("{url}/api/empathic-chatbot"))
        .json(&serde_json::json!({ "text": "How are you?" }))
        .send()
        .await?;

    assert_eq!(res.status().as_u16(), 200);

    let reply = res.json::<Value>().await?;
    assert_eq!(reply["response"], "Doing well.");
    assert_eq!(reply["usage"]["promptTokens"], 9);
    assert_eq!(reply["usage"]["candidatesTokens"], 21);
    assert_eq!(reply["usage"]["totalTokens"], 30);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_rejects_invalid_input() -> Result<()> {
    let url = spawn_relay(Gemini::with_token(
        "http://localhost:1".to_string(),
        "abc".to_string(),
    ))
    .await?;

    let client = reqwest::Client::new();
    for body in [
        serde_json::json!({ "text": "" }),
        serde_json::json!({ "text": 42 }),
        serde_json::json!({}),
    ] {
        let res = client
            .post(format!("{url}/api/empathic-chatbot"))
            .json(&body)
            .send()
            .await?;

        assert_eq!(res.status().as_u16(), 400);

        let reply = res.json::<Value>().await?;
        assert_eq!(reply["error"], "Invalid input. Please provide text.");
    }

    return Ok(());
}

#[tokio::test]
async fn it_requires_an_api_key() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let url = spawn_relay(Gemini::with_token(server.url(), "".to_string())).await?;
    let res = reqwest::Client::new()
        .post(format!("{url}/api/empathic-chatbot"))
        .json(&serde_json::json!({ "text": "Hello" }))
        .send()
        .await?;

    assert_eq!(res.status().as_u16(), 500);

    let reply = res.json::<Value>().await?;
    assert_eq!(
        reply["error"],
        "Failed to generate response: Missing GEMINI_API_KEY environment variable."
    );
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_mirrors_provider_errors_over_http() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/test-1:generateContent?key=abc")
        .with_status(403)
        .with_body(serde_json::json!({ "error": { "message": "Forbidden" } }).to_string())
        .create();

    let url = spawn_relay(Gemini::with_url(server.url())).await?;
    let res = reqwest::Client::new()
        .post(format!("{url}/api/empathic-chatbot"))
        .json(&serde_json::json!({ "text": "Hello" }))
        .send()
        .await?;

    assert_eq!(res.status().as_u16(), 403);

    let reply = res.json::<Value>().await?;
    assert_eq!(reply["error"], "Gemini API error: Forbidden");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_unparseable_provider_payloads() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/test-1:generateContent?key=abc")
        .with_status(200)
        .with_body("pardon?")
        .create();

    let url = spawn_relay(Gemini::with_url(server.url())).await?;
    let res = reqwest::Client::new()
        .post(format!("{url}/api/empathic-chatbot"))
        .json(&serde_json::json!({ "text": "Hello" }))
        .send()
        .await?;

    assert_eq!(res.status().as_u16(), 500);

    let reply = res.json::<Value>().await?;
    let message = reply["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to generate response:"));
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_malformed_request_bodies() -> Result<()> {
    let url = spawn_relay(Gemini::with_token(
        "http://localhost:1".to_string(),
        "abc".to_string(),
    ))
    .await?;

    let res = reqwest::Client::new()
        .post(format!("{url}/api/empathic-chatbot"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert_eq!(res.status().as_u16(), 500);

    let reply = res.json::<Value>().await?;
    let message = reply["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to generate response:"));

    return Ok(());
}

#[tokio::test]
async fn it_serves_health_checks() -> Result<()> {
    let url = spawn_relay(Gemini::with_token(
        "http://localhost:1".to_string(),
        "abc".to_string(),
    ))
    .await?;

    let res = reqwest::Client::new()
        .get(format!("{url}/health"))
        .send()
        .await?;

    assert_eq!(res.status().as_u16(), 200);

    let reply = res.json::<Value>().await?;
    assert_eq!(reply["status"], "ok");

    return Ok(());
}
