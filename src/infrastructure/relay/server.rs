#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::config::ConfigKey;
use crate::domain::models::RelayReply;
use crate::domain::models::RelayUsage;
use crate::infrastructure::gemini::Gemini;
use crate::infrastructure::gemini::GenerateContentResponse;
use crate::infrastructure::relay::error::RelayError;

#[derive(Clone)]
pub struct RelayState {
    pub gemini: Gemini,
}

pub fn router(state: RelayState) -> Router {
    return Router::new()
        .route("/health", get(health))
        .route("/api/empathic-chatbot", post(generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
}

pub async fn start() -> Result<()> {
    let state = RelayState {
        gemini: Gemini::default(),
    };

    let address = Config::get(ConfigKey::ListenAddress);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = address.as_str(), "relay listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    return Ok(());
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn health() -> Json<Value> {
    return Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }));
}

async fn generate(
    State(state): State<RelayState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RelayReply>, RelayError> {
    let Json(body) = payload.map_err(|err| {
        return RelayError::Internal {
            message: err.body_text(),
        };
    })?;

    let text = match body.get("text") {
        Some(Value::String(text)) if !text.is_empty() => text.to_string(),
        _ => return Err(RelayError::InvalidInput),
    };

    tracing::info!(chars = text.len(), "relay request received");

    if !state.gemini.has_credential() {
        return Err(RelayError::MissingCredential);
    }

    let (status, res) = state.gemini.generate(&text).await.map_err(|err| {
        tracing::error!(error = ?err, "Gemini request failed");
        return RelayError::Internal {
            message: err.to_string(),
        };
    })?;

    return match classify(status, res) {
        Ok(reply) => Ok(Json(reply)),
        Err(err) => {
            tracing::error!(
                status = status,
                message = err.message().as_str(),
                "Gemini returned an unusable response"
            );
            Err(err)
        }
    };
}

fn classify(status: u16, payload: GenerateContentResponse) -> Result<RelayReply, RelayError> {
    let error_message = payload
        .error
        .as_ref()
        .and_then(|err| {
            return err.message.clone();
        })
        .filter(|message| {
            return !message.is_empty();
        })
        .unwrap_or_else(|| {
            return "Unknown error".to_string();
        });

    if !(200..300).contains(&status) {
        return Err(RelayError::Provider {
            status,
            message: error_message,
        });
    }

    if payload.error.is_some() {
        return Err(RelayError::Provider {
            status: 500,
            message: error_message,
        });
    }

    let candidate = match payload.candidates.as_ref().and_then(|candidates| {
        return candidates.first();
    }) {
        Some(candidate) => candidate,
        None => {
            return Err(RelayError::EmptyResult {
                message: "No response candidate found.".to_string(),
            });
        }
    };

    let finish_reason = candidate.finish_reason.clone().unwrap_or_default();
    if !finish_reason.is_empty() && finish_reason != "STOP" {
        return Err(RelayError::AbnormalFinish {
            reason: finish_reason,
        });
    }

    let text = candidate
        .content
        .as_ref()
        .and_then(|content| {
            return content.parts.as_ref();
        })
        .and_then(|parts| {
            return parts.first();
        })
        .and_then(|part| {
            return part.text.clone();
        })
        .map(|text| {
            return text.trim().to_string();
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(RelayError::EmptyResult {
            message: "Invalid or empty response from Gemini API".to_string(),
        });
    }

    let usage = payload.usage_metadata.unwrap_or_default();

    return Ok(RelayReply {
        response: text,
        usage: RelayUsage {
            prompt_tokens: usage.prompt_token_count.unwrap_or_default(),
            candidates_tokens: usage.candidates_token_count.unwrap_or_default(),
            total_tokens: usage.total_token_count.unwrap_or_default(),
        },
    });
}
