//! Submit-time validation of required fields
//!
//! Synchronous and local: a field passes when it has a value and that value
//! is not the empty string. Whitespace is a value. Anything deeper (amount
//! ranges, date sanity) is the backend's call and comes back through the
//! submission error body.

use crate::types::{FieldErrors, FieldValues};
use thiserror::Error;

/// Message recorded for every missing or empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Check entered values against the required field list.
///
/// Returns one error entry per required field that is absent or empty. An
/// empty `required` list always validates.
pub fn validate(required: &[String], values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in required {
        let filled = values.get(field).map_or(false, |value| !value.is_empty());
        if !filled {
            errors.push(field.clone(), REQUIRED_MESSAGE);
        }
    }
    errors
}

/// Local submit blocker: one or more required fields failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("required fields missing or empty: {}", .errors.field_list())]
pub struct ValidationFailed {
    pub errors: FieldErrors,
}
