//! Required-field resolution for the current selection
//!
//! Resolution walks the selection's progression: no code requires nothing; a
//! flat code requires its own field list; a sub-code-bearing code requires
//! nothing until a sub-code is picked, then that sub-code's list. Lookups
//! that miss (code gone after a catalog swap, sub-code the backend never
//! defined) resolve to the empty list rather than an error, so a form never
//! deadlocks on stale data.
//!
//! On top of the catalog sits one cross-cutting rule: PAID always demands a
//! resolution classification, whether or not the catalog mentions it.

use crate::catalog::CodeCatalog;
use crate::types::{FeedbackSelection, RequiredFieldSet, PAID_CODE, RESOLUTION_FIELD};
use tracing::debug;

/// Catalog-driven required fields for the selection, in catalog order.
pub fn required_fields(catalog: &CodeCatalog, selection: &FeedbackSelection) -> Vec<String> {
    let code = match selection.code.as_deref() {
        Some(code) => code,
        None => return Vec::new(),
    };

    let entry = match catalog.get(code) {
        Some(entry) => entry,
        None => {
            debug!(code, "selected code not in catalog, no fields required");
            return Vec::new();
        }
    };

    match &entry.requirements {
        RequiredFieldSet::Flat(fields) => fields.clone(),
        RequiredFieldSet::BySubCode(options) => match selection.sub_code.as_deref() {
            Some(sub_code) => match options.get(sub_code) {
                Some(fields) => fields.clone(),
                None => {
                    debug!(code, sub_code, "sub-code not in catalog, no fields required");
                    Vec::new()
                }
            },
            None => Vec::new(),
        },
    }
}

/// Fields required beyond the catalog for the given code.
///
/// The only rule today: PAID submissions must carry a resolution choice.
pub fn extra_required_fields(code: Option<&str>) -> &'static [&'static str] {
    match code {
        Some(PAID_CODE) => &[RESOLUTION_FIELD],
        _ => &[],
    }
}

/// Catalog fields plus cross-cutting extras: the exact set submit-time
/// validation runs over. Extras already present in the catalog list are not
/// duplicated.
pub fn fields_to_validate(catalog: &CodeCatalog, selection: &FeedbackSelection) -> Vec<String> {
    let mut fields = required_fields(catalog, selection);
    for extra in extra_required_fields(selection.code.as_deref()) {
        if !fields.iter().any(|field| field == extra) {
            fields.push((*extra).to_string());
        }
    }
    fields
}
