//! Shared API response types
//!
//! Validation failures come back as `400 Bad Request` with a JSON array of
//! per-field errors. The messages are joined into one notice.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::services::{messages, Notifier};

/// One entry of a validation error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field the message refers to, when the server names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Join validation messages in server order, one per line
pub fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show the validation messages of a `400` response.
///
/// Returns the joined message that was shown. Passing any other status is a
/// programming error: it is logged and reported as an unexpected error.
pub async fn show_validated_message(response: Response, notifier: &dyn Notifier) -> Option<String> {
    if response.status() != StatusCode::BAD_REQUEST {
        tracing::error!(
            status = %response.status(),
            "show_validated_message called with a non-400 response"
        );
        notifier.error(messages::UNEXPECTED_ERROR);
        return None;
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "failed to read validation error body");
            notifier.error(messages::UNEXPECTED_ERROR);
            return None;
        }
    };

    match serde_json::from_str::<Vec<FieldError>>(&text) {
        Ok(errors) => {
            let message = join_messages(&errors);
            tracing::warn!(count = errors.len(), "server rejected input");
            notifier.error(&message);
            Some(message)
        }
        Err(e) => {
            tracing::error!(error = %e, body = %text, "malformed validation error body");
            notifier.error(messages::UNEXPECTED_ERROR);
            None
        }
    }
}
