//! Feedback Code Engine: collection outcome recording rules
//!
//! Resolves which outcome codes a user may record against an allocation,
//! which data fields a selection requires, and whether the entered values
//! are complete enough to submit.
//!
//! ## Architecture
//!
//! - **Catalog**: normalized snapshot of the backend's code listing, held
//!   process-wide behind an atomic swap
//! - **Engine**: pure visibility / resolution / validation rules
//! - **Session**: one open form's selection state and submit gate
//! - **Clients**: catalog source and submission sink over HTTP

pub mod catalog;
pub mod client;
pub mod config;
pub mod engine;
pub mod session;
pub mod types;

// Re-export configuration
pub use config::FeedbackConfig;

// Re-export the catalog and session surfaces
pub use catalog::{CodeCatalog, SharedCatalog};
pub use session::FormSession;

// Re-export commonly used types
pub use types::{
    CodeCategory, FeedbackCode, FeedbackPayload, FeedbackSelection, FeedbackSubmission,
    FieldErrors, FieldKind, FieldValues, RawFeedbackCode, RequiredFieldSet, ResolutionOption,
    Role, SelectionState, PAID_CODE, PPD_CODE, RESOLUTION_FIELD,
};

// Re-export the engine rules
pub use engine::{
    extra_required_fields, fields_to_validate, required_fields, validate, visible_codes,
    ValidationFailed, PINNED_CODES, REQUIRED_MESSAGE,
};

// Re-export the backend collaborators
pub use client::{
    fetch_or_empty, CatalogFetchError, CatalogSource, FileCatalogSource, HttpCatalogSource,
    SubmissionClient, SubmissionError,
};
