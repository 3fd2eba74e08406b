//! Role-based code visibility and dropdown ordering
//!
//! Visibility is a pure function of the catalog and the acting role. The
//! ordering contract for the code dropdown:
//! 1. PAID first, PPD second, each only when present in the catalog and
//!    visible to the role
//! 2. every other visible code, ascending by byte value
//!
//! The pinned pair are the outcomes operators record most, so they stay on
//! top regardless of alphabet.

use crate::catalog::CodeCatalog;
use crate::types::{Role, PAID_CODE, PPD_CODE};

/// Codes pinned to the top of the dropdown, in pinned order.
pub const PINNED_CODES: [&str; 2] = [PAID_CODE, PPD_CODE];

/// Codes the given role may select, in display order.
pub fn visible_codes(catalog: &CodeCatalog, role: Role) -> Vec<String> {
    let mut ordered = Vec::with_capacity(catalog.len());

    for pinned in PINNED_CODES {
        if let Some(entry) = catalog.get(pinned) {
            if role.may_select(entry.category) {
                ordered.push(entry.code.clone());
            }
        }
    }

    let mut rest: Vec<String> = catalog
        .codes()
        .filter(|entry| !PINNED_CODES.contains(&entry.code.as_str()))
        .filter(|entry| role.may_select(entry.category))
        .map(|entry| entry.code.clone())
        .collect();
    rest.sort_unstable();
    ordered.extend(rest);

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawFeedbackCode;

    fn catalog(entries: &[(&str, &str)]) -> CodeCatalog {
        let raw = entries
            .iter()
            .map(|(code, category)| {
                serde_json::from_str::<RawFeedbackCode>(&format!(
                    r#"{{"code": "{code}", "use_sub_code": false, "category": "{category}"}}"#
                ))
                .unwrap()
            })
            .collect();
        CodeCatalog::normalize(raw)
    }

    #[test]
    fn test_caller_sees_calling_and_both() {
        let catalog = catalog(&[
            ("CB", "CALLING"),
            ("PTP", "BOTH"),
            ("LM", "VISIT"),
        ]);

        assert_eq!(visible_codes(&catalog, Role::Caller), vec!["CB", "PTP"]);
    }

    #[test]
    fn test_executive_sees_visit_and_both() {
        let catalog = catalog(&[
            ("CB", "CALLING"),
            ("PTP", "BOTH"),
            ("LM", "VISIT"),
        ]);

        assert_eq!(visible_codes(&catalog, Role::Executive), vec!["LM", "PTP"]);
    }

    #[test]
    fn test_admin_sees_everything() {
        let catalog = catalog(&[
            ("CB", "CALLING"),
            ("PTP", "BOTH"),
            ("LM", "VISIT"),
        ]);

        assert_eq!(
            visible_codes(&catalog, Role::Admin),
            vec!["CB", "LM", "PTP"]
        );
    }

    #[test]
    fn test_paid_and_ppd_lead_the_ordering() {
        let catalog = catalog(&[
            ("AA", "BOTH"),
            ("PPD", "BOTH"),
            ("ZZ", "BOTH"),
            ("PAID", "BOTH"),
        ]);

        assert_eq!(
            visible_codes(&catalog, Role::Caller),
            vec!["PAID", "PPD", "AA", "ZZ"]
        );
    }

    #[test]
    fn test_pinned_codes_absent_from_catalog_are_not_synthesized() {
        let catalog = catalog(&[("BB", "BOTH"), ("AA", "BOTH")]);

        assert_eq!(visible_codes(&catalog, Role::Admin), vec!["AA", "BB"]);
    }

    #[test]
    fn test_pinned_code_hidden_from_role_is_skipped() {
        // PAID tagged VISIT: callers must not get a phantom entry up top.
        let catalog = catalog(&[("PAID", "VISIT"), ("PPD", "BOTH"), ("CB", "CALLING")]);

        assert_eq!(visible_codes(&catalog, Role::Caller), vec!["PPD", "CB"]);
        assert_eq!(
            visible_codes(&catalog, Role::Executive),
            vec!["PAID", "PPD"]
        );
    }

    #[test]
    fn test_ordering_is_byte_wise() {
        // Uppercase sorts before lowercase; digits before letters.
        let catalog = catalog(&[("b1", "BOTH"), ("B2", "BOTH"), ("3C", "BOTH")]);

        assert_eq!(visible_codes(&catalog, Role::Admin), vec!["3C", "B2", "b1"]);
    }

    #[test]
    fn test_empty_catalog_yields_no_codes() {
        assert!(visible_codes(&CodeCatalog::empty(), Role::Admin).is_empty());
    }
}
