//! Feedback code types — catalog entries and their field requirements
//!
//! A feedback code is one selectable collection outcome ("PAID", "PTP",
//! "RTP", ...). Each code carries a visibility category and the names of
//! the data fields an operator must fill in before the outcome can be
//! submitted. Codes come off the wire as a flat list ([`RawFeedbackCode`])
//! and are normalized into [`FeedbackCode`] entries by the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Code for a fully collected payment. Carries extra submission rules: it is
/// pinned to the top of the dropdown and always requires a resolution choice.
pub const PAID_CODE: &str = "PAID";

/// Code for a partially paid account. Pinned directly below [`PAID_CODE`].
pub const PPD_CODE: &str = "PPD";

/// Visibility tag controlling which user roles may select a code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodeCategory {
    /// Phone-collection outcome, offered to callers.
    Calling,
    /// Field-visit outcome, offered to executives.
    Visit,
    /// Outcome shared by both channels.
    Both,
}

impl CodeCategory {
    /// Human-readable name for reports and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeCategory::Calling => "Calling",
            CodeCategory::Visit => "Visit",
            CodeCategory::Both => "Both",
        }
    }
}

impl fmt::Display for CodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Field requirements for one code.
///
/// Exactly one shape applies per code: either the fields are known as soon
/// as the code itself is selected, or the code carries sub-codes and each
/// sub-code names its own field list. The two shapes are never mixed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequiredFieldSet {
    /// Fields required directly by the code.
    Flat(Vec<String>),
    /// Fields keyed by sub-code; nothing is required until one is chosen.
    BySubCode(BTreeMap<String, Vec<String>>),
}

impl RequiredFieldSet {
    /// Whether field resolution needs a second-level sub-code selection.
    pub fn uses_sub_code(&self) -> bool {
        matches!(self, RequiredFieldSet::BySubCode(_))
    }

    /// Direct field list. Empty for sub-code-bearing codes.
    pub fn flat_fields(&self) -> &[String] {
        match self {
            RequiredFieldSet::Flat(fields) => fields,
            RequiredFieldSet::BySubCode(_) => &[],
        }
    }

    /// Fields for one sub-code, if this set is keyed by sub-code and the
    /// sub-code is known.
    pub fn sub_code_fields(&self, sub_code: &str) -> Option<&[String]> {
        match self {
            RequiredFieldSet::Flat(_) => None,
            RequiredFieldSet::BySubCode(options) => {
                options.get(sub_code).map(|fields| fields.as_slice())
            }
        }
    }

    /// Available sub-codes in display order. Empty for flat codes.
    pub fn sub_codes(&self) -> Vec<&str> {
        match self {
            RequiredFieldSet::Flat(_) => Vec::new(),
            RequiredFieldSet::BySubCode(options) => {
                options.keys().map(|k| k.as_str()).collect()
            }
        }
    }
}

/// One normalized catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackCode {
    /// Short outcome code, e.g. "PTP". Doubles as the catalog key.
    pub code: String,
    /// Operator-facing description shown beside the code.
    pub description: String,
    /// Role visibility tag.
    pub category: CodeCategory,
    /// Field requirements, shaped by whether the code uses sub-codes.
    pub requirements: RequiredFieldSet,
}

impl FeedbackCode {
    /// Build a normalized entry from its wire form.
    ///
    /// `use_sub_code` picks which half of the raw record is authoritative:
    /// the flat `fields` list or the per-sub-code mapping. The other half is
    /// dropped.
    pub fn from_raw(raw: RawFeedbackCode) -> Self {
        let requirements = if raw.use_sub_code {
            RequiredFieldSet::BySubCode(raw.sub_code_options)
        } else {
            RequiredFieldSet::Flat(raw.fields)
        };

        FeedbackCode {
            code: raw.code,
            description: raw.description,
            category: raw.category,
            requirements,
        }
    }

    /// Whether selecting this code opens a sub-code selector.
    pub fn uses_sub_code(&self) -> bool {
        self.requirements.uses_sub_code()
    }
}

/// One entry of the backend's `/feedback_codes` response, as sent.
///
/// `description`, `fields` and `sub_code_options` are frequently omitted by
/// the backend and default to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawFeedbackCode {
    pub code: String,
    pub use_sub_code: bool,
    pub category: CodeCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub sub_code_options: BTreeMap<String, Vec<String>>,
}
