//! Backend collaborators — catalog source and submission sink
//!
//! The engine never owns the backend; it consumes two interfaces:
//! - [`CatalogSource`]: where raw feedback-code listings come from (HTTP in
//!   production, a JSON file for tooling and tests)
//! - [`SubmissionClient`]: posts completed submissions and maps the
//!   backend's answer into ack / field errors
//!
//! Authentication on both is the session token in a `Token` header.

pub mod catalog;
pub mod submission;

pub use catalog::{
    fetch_or_empty, CatalogFetchError, FileCatalogSource, HttpCatalogSource, CATALOG_PATH,
};
pub use submission::{SubmissionClient, SubmissionError, SUBMISSION_PATH};

use crate::types::RawFeedbackCode;
use async_trait::async_trait;

/// Header carrying the session token, sent verbatim (no `Bearer` scheme).
pub const TOKEN_HEADER: &str = "Token";

/// Where raw feedback-code listings come from.
///
/// Implementations handle transport only; normalization happens in
/// [`crate::catalog::CodeCatalog`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the raw code list.
    async fn fetch_raw(&self) -> Result<Vec<RawFeedbackCode>, CatalogFetchError>;

    /// Short name for logs ("http", "file").
    fn source_name(&self) -> &str;
}
