//! Field rendering metadata and the PAID resolution options
//!
//! Required fields arrive from the catalog as bare names. The form decides
//! which input widget to render purely from the name, using the fixed
//! classification tables below. Unlisted names fall back to a plain text
//! input, so new backend fields degrade gracefully instead of breaking the
//! form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic field name injected for PAID submissions. Never appears in the
/// catalog; the resolution rules add it on top of the catalog fields.
pub const RESOLUTION_FIELD: &str = "resolution";

/// Fields rendered as currency inputs.
const AMOUNT_FIELDS: &[&str] = &[
    "Amount",
    "Emi Amount",
    "BCC Amount",
    "Total Amount",
    "Settlement Amount",
    "Paid Amount",
];

/// Fields rendered as date (or date-time) pickers.
const DATE_FIELDS: &[&str] = &[
    "Promise to Pay Date",
    "Callback Date",
    "Next Payment Date",
    "Settlement Date",
    "Settled Date",
    "PTP Date",
    "Callback Date/Time",
    "Next PTP Date",
];

/// Fields rendered as multi-line text areas.
const LONG_TEXT_FIELDS: &[&str] = &[
    "Remarks",
    "Detailed Feedback",
    "Dispute Details",
    "Door Lock Details",
    "Skip Details",
];

/// Input widget class for a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Currency input.
    Amount,
    /// Date or date-time picker.
    Date,
    /// Multi-line text area.
    LongText,
    /// Single-line text input. The fallback for unknown names.
    Text,
}

impl FieldKind {
    /// Classify a field name into its widget class. Case-sensitive; catalog
    /// field names are used verbatim.
    pub fn classify(field: &str) -> FieldKind {
        if AMOUNT_FIELDS.contains(&field) {
            FieldKind::Amount
        } else if DATE_FIELDS.contains(&field) {
            FieldKind::Date
        } else if LONG_TEXT_FIELDS.contains(&field) {
            FieldKind::LongText
        } else {
            FieldKind::Text
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Amount => "amount",
            FieldKind::Date => "date",
            FieldKind::LongText => "long-text",
            FieldKind::Text => "text",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fixed options for the PAID resolution dropdown.
///
/// The submitted value is the short form (`stab`, `norm`, `rb`, `flow`); the
/// label is what the operator reads. The serde representation is the short
/// form too, so a serialized option is exactly what [`Self::from_value`]
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionOption {
    /// Account settled and expected to stay current.
    #[serde(rename = "stab")]
    Stable,
    /// Account brought back into the normal payment schedule.
    #[serde(rename = "norm")]
    Normalize,
    /// Payment reversed a prior delinquency bucket.
    #[serde(rename = "rb")]
    Rollback,
    /// Payment kept the account in its current bucket.
    #[serde(rename = "flow")]
    Flow,
}

impl ResolutionOption {
    /// All options in display order.
    pub const ALL: [ResolutionOption; 4] = [
        ResolutionOption::Stable,
        ResolutionOption::Normalize,
        ResolutionOption::Rollback,
        ResolutionOption::Flow,
    ];

    /// Wire value stored in the submission.
    pub fn value(&self) -> &'static str {
        match self {
            ResolutionOption::Stable => "stab",
            ResolutionOption::Normalize => "norm",
            ResolutionOption::Rollback => "rb",
            ResolutionOption::Flow => "flow",
        }
    }

    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOption::Stable => "Stable",
            ResolutionOption::Normalize => "Normalize",
            ResolutionOption::Rollback => "Rollback",
            ResolutionOption::Flow => "Flow",
        }
    }

    /// Look an option up by its wire value.
    pub fn from_value(value: &str) -> Option<ResolutionOption> {
        match value {
            "stab" => Some(ResolutionOption::Stable),
            "norm" => Some(ResolutionOption::Normalize),
            "rb" => Some(ResolutionOption::Rollback),
            "flow" => Some(ResolutionOption::Flow),
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionOption {
    /// Dropdown rendering: label with the wire value in parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}
