#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use std::fmt;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::domain::models::RelayErrorBody;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    InvalidInput,
    MissingCredential,
    Provider { status: u16, message: String },
    EmptyResult { message: String },
    AbnormalFinish { reason: String },
    Internal { message: String },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        return match self {
            RelayError::InvalidInput => StatusCode::BAD_REQUEST,
            RelayError::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
    }

    pub fn message(&self) -> String {
        return match self {
            RelayError::InvalidInput => "Invalid input. Please provide text.".to_string(),
            RelayError::MissingCredential => {
                "Failed to generate response: Missing GEMINI_API_KEY environment variable."
                    .to_string()
            }
            RelayError::Provider { message, .. } => format!("Gemini API error: {message}"),
            RelayError::EmptyResult { message } => message.to_string(),
            RelayError::AbnormalFinish { reason } => {
                if reason == "MAX_TOKENS" {
                    return "Model output was cut off (MAX_TOKENS).".to_string();
                }
                format!("Gemini stopped generating for an unexpected reason: {reason}")
            }
            RelayError::Internal { message } => format!("Failed to generate response: {message}"),
        };
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.message());
    }
}

impl std::error::Error for RelayError {}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = RelayErrorBody {
            error: self.message(),
        };

        return (self.status(), Json(body)).into_response();
    }
}
