//! User roles and their code visibility rules
//!
//! The session layer hands us the acting user's role as a free-form string.
//! Parsing is case-insensitive and total: anything we do not recognize maps
//! to [`Role::Unrecognized`], which sees every code just like an admin. The
//! catalog is a vocabulary, not an entitlement system, so the fallback is
//! permissive rather than empty.

use crate::types::code::CodeCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Acting user's role, normalized from the session's role string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Phone-collection agent. Sees `CALLING` and `BOTH` codes.
    Caller,
    /// Field-visit agent. Sees `VISIT` and `BOTH` codes.
    Executive,
    /// Back-office user. Sees every code.
    Admin,
    /// Role string that matched none of the known roles. Sees every code.
    Unrecognized,
}

impl Role {
    /// Parse a role string from the session layer.
    ///
    /// Matching ignores case and surrounding whitespace. Unknown strings are
    /// logged and mapped to [`Role::Unrecognized`].
    pub fn parse(raw: &str) -> Role {
        match raw.trim().to_lowercase().as_str() {
            "caller" => Role::Caller,
            "executive" => Role::Executive,
            "admin" => Role::Admin,
            other => {
                warn!(role = other, "unrecognized role, treating as all-access");
                Role::Unrecognized
            }
        }
    }

    /// Whether this role may select codes of the given category.
    pub fn may_select(&self, category: CodeCategory) -> bool {
        match self {
            Role::Caller => matches!(category, CodeCategory::Calling | CodeCategory::Both),
            Role::Executive => matches!(category, CodeCategory::Visit | CodeCategory::Both),
            Role::Admin | Role::Unrecognized => true,
        }
    }

    /// Human-readable name for reports and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Caller => "Caller",
            Role::Executive => "Executive",
            Role::Admin => "Admin",
            Role::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
