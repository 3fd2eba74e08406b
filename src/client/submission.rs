//! Submission sink — posts completed feedback to the backend
//!
//! Success hands back the backend's confirmation message. Rejections carry
//! whatever the backend managed to say: a display message and, when present,
//! per-field errors the form merges into its own validation map.

use super::TOKEN_HEADER;
use crate::config::FeedbackConfig;
use crate::types::{FeedbackSubmission, FieldErrors, SubmissionAck, SubmissionErrorBody};
use std::time::Duration;
use tracing::{info, warn};

/// Submission endpoint, relative to the backend base URL.
pub const SUBMISSION_PATH: &str = "/feedbacks";

/// Submission errors
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The backend rejected the submission with a parseable error body.
    #[error("Submission rejected ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
        /// Server-side per-field errors, empty when the backend sent none.
        field_errors: FieldErrors,
    },
    /// Non-success status with a body we could not interpret.
    #[error("Server returned status {0}")]
    ServerError(reqwest::StatusCode),
}

/// HTTP client for the submission endpoint.
#[derive(Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SubmissionClient {
    /// Create a new submission client. `token` is sent verbatim in the
    /// `Token` header; `None` sends no auth header at all.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> SubmissionClient {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        SubmissionClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(|t| t.to_string()),
        }
    }

    pub fn from_config(config: &FeedbackConfig) -> SubmissionClient {
        SubmissionClient::new(
            &config.backend.base_url,
            config.backend.token_opt(),
            Duration::from_secs(config.backend.timeout_secs),
        )
    }

    /// Post one submission.
    ///
    /// Returns the backend's confirmation message on success (empty when the
    /// backend sent none).
    pub async fn submit(&self, submission: &FeedbackSubmission) -> Result<String, SubmissionError> {
        let url = format!("{}{}", self.base_url, SUBMISSION_PATH);

        let mut request = self.http.post(&url).json(submission);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if status.is_success() {
            // A success with an unreadable body is still a success.
            let ack: SubmissionAck = serde_json::from_slice(&body).unwrap_or_default();
            info!(
                allocation_id = submission.allocation_id,
                code = %submission.feedback.code,
                "feedback submitted"
            );
            Ok(ack.message)
        } else {
            warn!(
                allocation_id = submission.allocation_id,
                status = %status,
                "feedback submission rejected"
            );
            Err(rejection(status, &body))
        }
    }
}

/// Map a non-success response into the richest error we can build from it.
fn rejection(status: reqwest::StatusCode, body: &[u8]) -> SubmissionError {
    match serde_json::from_slice::<SubmissionErrorBody>(body) {
        Ok(parsed) => SubmissionError::Rejected {
            status,
            message: parsed
                .display_message()
                .unwrap_or("submission rejected")
                .to_string(),
            field_errors: parsed.field_errors(),
        },
        Err(_) => SubmissionError::ServerError(status),
    }
}
