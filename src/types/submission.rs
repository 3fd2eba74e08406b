//! Submission wire types and the per-field error map
//!
//! A completed form turns into a [`FeedbackSubmission`] posted to the
//! backend. Validation failures, local or server-side, are both expressed as
//! [`FieldErrors`] so the form renders them through one structure.

use crate::types::selection::FieldValues;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation errors, keyed by field name.
///
/// Field order is stable (sorted by name) so error listings render the same
/// way every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> FieldErrors {
        FieldErrors::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Append one message to a field's error list.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|messages| messages.as_slice())
    }

    /// Field names with errors, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Fold another error map in, appending messages field by field. Used to
    /// overlay server-side errors onto local ones.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Comma-separated field names, for toasts and error text.
    pub fn field_list(&self) -> String {
        self.fields().collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_list())
    }
}

impl FromIterator<(String, Vec<String>)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> FieldErrors {
        FieldErrors(iter.into_iter().collect())
    }
}

/// Body of `POST /feedbacks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackSubmission {
    /// The allocation (account assignment) this feedback belongs to.
    pub allocation_id: i64,
    pub feedback: FeedbackPayload,
}

/// The feedback object: two fixed keys plus the entered field values
/// flattened beside them.
///
/// On the wire this reads `{"code": "PTP", "subCode": "", "Amount": "5000"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackPayload {
    pub code: String,
    /// Empty string when the code carries no sub-codes.
    #[serde(rename = "subCode")]
    pub sub_code: String,
    #[serde(flatten)]
    pub values: FieldValues,
}

/// Success body from the submission endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionAck {
    /// Operator-facing confirmation, e.g. "Feedback recorded".
    #[serde(default)]
    pub message: String,
}

/// Error body from the submission endpoint. Backends are inconsistent about
/// which of the three members they send, so all are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Server-side per-field errors, same shape as [`FieldErrors`].
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

impl SubmissionErrorBody {
    /// Operator-facing message: `message` wins over `error`.
    pub fn display_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }

    /// Per-field errors, empty when the backend sent none.
    pub fn field_errors(&self) -> FieldErrors {
        self.errors.clone().unwrap_or_default()
    }
}
