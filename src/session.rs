//! One open feedback form — snapshot, selection, and the submit gate
//!
//! A [`FormSession`] is created when the operator opens the feedback dialog
//! for an allocation and dropped when it closes. It pins a catalog snapshot
//! for its whole lifetime, so a background catalog swap never changes the
//! rules mid-form, and it caches the visible code list because the dropdown
//! re-reads it on every render.
//!
//! The session is also where selection transitions get their catalog-aware
//! guards: a sub-code pick only lands if the current code actually carries
//! sub-codes.

use crate::catalog::{CodeCatalog, SharedCatalog};
use crate::engine::{fields_to_validate, validate, visible_codes, ValidationFailed};
use crate::types::{
    FeedbackPayload, FeedbackSelection, FeedbackSubmission, FieldErrors, Role, SelectionState,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct FormSession {
    catalog: Arc<CodeCatalog>,
    role: Role,
    /// Cached display order; recomputed when the catalog or role changes.
    visible: Vec<String>,
    selection: FeedbackSelection,
}

impl FormSession {
    /// Open a form against a specific catalog snapshot.
    pub fn new(catalog: Arc<CodeCatalog>, role: Role) -> FormSession {
        let visible = visible_codes(&catalog, role);
        debug!(role = %role, visible = visible.len(), "form session opened");
        FormSession {
            catalog,
            role,
            visible,
            selection: FeedbackSelection::new(),
        }
    }

    /// Open a form against the process-wide catalog.
    pub fn open(shared: &SharedCatalog, role: Role) -> FormSession {
        FormSession::new(shared.load(), role)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn catalog(&self) -> &CodeCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &FeedbackSelection {
        &self.selection
    }

    /// Where the selection sits in the code / sub-code progression.
    pub fn state(&self) -> SelectionState<'_> {
        self.selection.state()
    }

    /// Codes this session's role may select, in display order.
    pub fn visible_codes(&self) -> &[String] {
        &self.visible
    }

    /// Swap the catalog snapshot this form runs against. Recomputes the
    /// visible list; the selection is left alone and re-resolves against the
    /// new snapshot.
    pub fn set_catalog(&mut self, catalog: Arc<CodeCatalog>) {
        self.catalog = catalog;
        self.visible = visible_codes(&self.catalog, self.role);
    }

    /// Change the acting role. Recomputes the visible list.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.visible = visible_codes(&self.catalog, role);
    }

    // ========================================================================
    // Selection transitions
    // ========================================================================

    /// Select a code. Clears the sub-code and all entered values, even when
    /// the same code is re-selected.
    pub fn select_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.catalog.contains(&code) {
            debug!(code = %code, "selected code not in catalog");
        }
        self.selection.select_code(code);
    }

    /// Select a sub-code. Only lands when the current code carries
    /// sub-codes; otherwise the pick is logged and ignored.
    pub fn select_sub_code(&mut self, sub_code: impl Into<String>) {
        let sub_code = sub_code.into();
        let uses_sub_code = self
            .selection
            .code
            .as_deref()
            .and_then(|code| self.catalog.get(code))
            .map_or(false, |entry| entry.uses_sub_code());

        if !uses_sub_code {
            warn!(
                sub_code = %sub_code,
                code = self.selection.code.as_deref().unwrap_or(""),
                "sub-code selected without a sub-code-bearing code, ignoring"
            );
            return;
        }
        self.selection.select_sub_code(sub_code);
    }

    /// Record one field value.
    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.selection.set_field(field, value);
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Whether the current code needs a sub-code before fields resolve.
    pub fn sub_code_required(&self) -> bool {
        self.selection
            .code
            .as_deref()
            .and_then(|code| self.catalog.get(code))
            .map_or(false, |entry| entry.uses_sub_code())
    }

    /// Sub-codes available for the current code, in display order.
    pub fn sub_code_options(&self) -> Vec<&str> {
        self.selection
            .code
            .as_deref()
            .and_then(|code| self.catalog.get(code))
            .map_or_else(Vec::new, |entry| entry.requirements.sub_codes())
    }

    /// Catalog-driven required fields for the current selection.
    pub fn required_fields(&self) -> Vec<String> {
        crate::engine::required_fields(&self.catalog, &self.selection)
    }

    /// Required fields plus cross-cutting extras (the PAID resolution rule).
    pub fn fields_to_validate(&self) -> Vec<String> {
        fields_to_validate(&self.catalog, &self.selection)
    }

    /// Run submit-time validation without preparing a submission.
    pub fn validate(&self) -> FieldErrors {
        validate(&self.fields_to_validate(), &self.selection.values)
    }

    // ========================================================================
    // Submit gate
    // ========================================================================

    /// Validate and, if clean, build the wire submission for an allocation.
    ///
    /// The session is left untouched either way; the caller decides whether
    /// to close the form after a successful post.
    pub fn prepare_submission(
        &self,
        allocation_id: i64,
    ) -> Result<FeedbackSubmission, ValidationFailed> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ValidationFailed { errors });
        }

        Ok(FeedbackSubmission {
            allocation_id,
            feedback: FeedbackPayload {
                code: self.selection.code.clone().unwrap_or_default(),
                sub_code: self.selection.sub_code.clone().unwrap_or_default(),
                values: self.selection.values.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawFeedbackCode;

    fn sample_catalog() -> Arc<CodeCatalog> {
        let raw: Vec<RawFeedbackCode> = serde_json::from_str(
            r#"[
                {"code": "PAID", "use_sub_code": false, "category": "BOTH",
                 "fields": ["Paid Amount"]},
                {"code": "PTP", "use_sub_code": false, "category": "CALLING",
                 "fields": ["Amount", "Promise to Pay Date"]},
                {"code": "DISPUTE", "use_sub_code": true, "category": "BOTH",
                 "sub_code_options": {"Billing": ["Dispute Details"]}},
                {"code": "LM", "use_sub_code": false, "category": "VISIT"}
            ]"#,
        )
        .unwrap();
        Arc::new(CodeCatalog::normalize(raw))
    }

    #[test]
    fn test_visible_list_is_cached_per_role() {
        let mut session = FormSession::new(sample_catalog(), Role::Caller);
        assert_eq!(session.visible_codes(), ["PAID", "DISPUTE", "PTP"]);

        session.set_role(Role::Executive);
        assert_eq!(session.visible_codes(), ["PAID", "DISPUTE", "LM"]);
    }

    #[test]
    fn test_sub_code_ignored_for_flat_code() {
        let mut session = FormSession::new(sample_catalog(), Role::Admin);
        session.select_code("PTP");
        session.set_field("Amount", "100");

        session.select_sub_code("Billing");

        // Pick did not land: no sub-code, values untouched.
        assert_eq!(session.state(), SelectionState::Code("PTP"));
        assert_eq!(
            session.selection().values.get("Amount").map(String::as_str),
            Some("100")
        );
    }

    #[test]
    fn test_sub_code_lands_for_sub_code_bearing_code() {
        let mut session = FormSession::new(sample_catalog(), Role::Admin);
        session.select_code("DISPUTE");
        assert!(session.sub_code_required());
        assert_eq!(session.sub_code_options(), ["Billing"]);

        session.select_sub_code("Billing");
        assert_eq!(
            session.state(),
            SelectionState::CodeAndSubCode("DISPUTE", "Billing")
        );
        assert_eq!(session.required_fields(), ["Dispute Details"]);
    }

    #[test]
    fn test_prepare_submission_blocks_on_missing_fields() {
        let mut session = FormSession::new(sample_catalog(), Role::Admin);
        session.select_code("PTP");
        session.set_field("Amount", "5000");

        let err = session.prepare_submission(7).unwrap_err();
        assert_eq!(err.errors.field_list(), "Promise to Pay Date");
    }

    #[test]
    fn test_prepare_submission_builds_payload() {
        let mut session = FormSession::new(sample_catalog(), Role::Admin);
        session.select_code("PTP");
        session.set_field("Amount", "5000");
        session.set_field("Promise to Pay Date", "2026-09-01");

        let submission = session.prepare_submission(7).unwrap();
        assert_eq!(submission.allocation_id, 7);
        assert_eq!(submission.feedback.code, "PTP");
        assert_eq!(submission.feedback.sub_code, "");
        assert_eq!(
            submission.feedback.values.get("Amount").map(String::as_str),
            Some("5000")
        );
    }

    #[test]
    fn test_paid_requires_resolution_before_submit() {
        let mut session = FormSession::new(sample_catalog(), Role::Admin);
        session.select_code("PAID");
        session.set_field("Paid Amount", "12000");

        let err = session.prepare_submission(7).unwrap_err();
        assert_eq!(err.errors.field_list(), "resolution");

        session.set_field("resolution", "stab");
        assert!(session.prepare_submission(7).is_ok());
    }

    #[test]
    fn test_empty_selection_submits_empty_payload() {
        // Nothing selected means nothing required; the gate passes and the
        // backend sees an empty code. Blocking this is the form's job.
        let session = FormSession::new(sample_catalog(), Role::Admin);

        let submission = session.prepare_submission(7).unwrap();
        assert_eq!(submission.feedback.code, "");
        assert!(submission.feedback.values.is_empty());
    }

    #[test]
    fn test_catalog_swap_mid_form_re_resolves() {
        let mut session = FormSession::new(sample_catalog(), Role::Admin);
        session.select_code("PTP");
        assert_eq!(session.required_fields().len(), 2);

        session.set_catalog(Arc::new(CodeCatalog::empty()));

        assert!(session.visible_codes().is_empty());
        assert!(session.required_fields().is_empty());
        assert_eq!(session.state(), SelectionState::Code("PTP"));
    }
}
