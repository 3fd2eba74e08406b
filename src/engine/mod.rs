//! Pure decision rules of the feedback code engine
//!
//! ## Rule layers
//!
//! - **Visibility**: which codes a role may select, and the dropdown order
//!   (PAID, PPD, then ascending)
//! - **Resolution**: which fields the current code / sub-code selection
//!   requires, plus the PAID resolution rule
//! - **Validation**: whether the entered values satisfy the required set
//!
//! Everything here is a pure function over a catalog snapshot and a
//! selection. State and I/O live in [`crate::session`] and [`crate::client`].

pub mod resolution;
pub mod validation;
pub mod visibility;

pub use resolution::{extra_required_fields, fields_to_validate, required_fields};
pub use validation::{validate, ValidationFailed, REQUIRED_MESSAGE};
pub use visibility::{visible_codes, PINNED_CODES};
