//! Transient selection state for one open feedback form
//!
//! Tracks what the operator has picked so far: the code, the sub-code where
//! one applies, and the values typed into the required fields. The clearing
//! rules live here so that values entered for one code can never ride along
//! into a submission for another.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to entered value, as collected by the form.
pub type FieldValues = BTreeMap<String, String>;

/// Everything the operator has picked in one open form.
///
/// Starts empty when the form opens and is dropped when it closes. Nothing
/// here survives across forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackSelection {
    /// Selected code, if any.
    pub code: Option<String>,
    /// Selected sub-code. Only meaningful while `code` names a
    /// sub-code-bearing catalog entry.
    pub sub_code: Option<String>,
    /// Values entered for the currently required fields.
    pub values: FieldValues,
}

impl FeedbackSelection {
    pub fn new() -> FeedbackSelection {
        FeedbackSelection::default()
    }

    /// Select a code. Drops the sub-code and every entered value, even when
    /// the same code is picked again.
    pub fn select_code(&mut self, code: impl Into<String>) {
        self.code = Some(code.into());
        self.sub_code = None;
        self.values.clear();
    }

    /// Select a sub-code. Drops entered values but keeps the code.
    pub fn select_sub_code(&mut self, sub_code: impl Into<String>) {
        self.sub_code = Some(sub_code.into());
        self.values.clear();
    }

    /// Record one field value. Overwrites any previous value for the field.
    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Where the selection sits in the code / sub-code progression.
    pub fn state(&self) -> SelectionState<'_> {
        match (&self.code, &self.sub_code) {
            (None, _) => SelectionState::NoCode,
            (Some(code), None) => SelectionState::Code(code),
            (Some(code), Some(sub)) => SelectionState::CodeAndSubCode(code, sub),
        }
    }
}

/// View of the selection progression, for form rendering and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState<'a> {
    /// Nothing picked yet.
    NoCode,
    /// A code is picked, no sub-code.
    Code(&'a str),
    /// Both levels picked.
    CodeAndSubCode(&'a str, &'a str),
}
