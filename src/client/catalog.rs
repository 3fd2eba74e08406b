//! Catalog fetch — HTTP and file sources, plus the degrade-to-empty helper
//!
//! Fetch failures are survivable: a form opened while the backend is down
//! runs against an empty catalog instead of erroring out, so the operator
//! still gets a (temporarily bare) form. [`fetch_or_empty`] encodes that
//! policy.

use super::{CatalogSource, TOKEN_HEADER};
use crate::catalog::CodeCatalog;
use crate::config::FeedbackConfig;
use crate::types::RawFeedbackCode;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Catalog listing endpoint, relative to the backend base URL.
pub const CATALOG_PATH: &str = "/feedback_codes";

/// Catalog fetch errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("Malformed catalog payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ============================================================================
// Listing decode
// ============================================================================

/// Decode a raw listing body. The outer value must be a JSON array; entries
/// that fail to parse (unrecognized category, wrong field types) are skipped
/// with a warning, so one bad entry cannot take the rest of the listing down
/// with it.
fn decode_listing(body: &[u8]) -> Result<Vec<RawFeedbackCode>, CatalogFetchError> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(body)?;

    let mut raw = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawFeedbackCode>(entry) {
            Ok(code) => raw.push(code),
            Err(e) => warn!(index, error = %e, "skipping malformed catalog entry"),
        }
    }
    Ok(raw)
}

// ============================================================================
// HTTP source
// ============================================================================

/// Fetches the code listing from the collections backend.
#[derive(Clone)]
pub struct HttpCatalogSource {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalogSource {
    /// Create a new HTTP source. `token` is sent verbatim in the `Token`
    /// header; `None` sends no auth header at all.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> HttpCatalogSource {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        HttpCatalogSource {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(|t| t.to_string()),
        }
    }

    pub fn from_config(config: &FeedbackConfig) -> HttpCatalogSource {
        HttpCatalogSource::new(
            &config.backend.base_url,
            config.backend.token_opt(),
            Duration::from_secs(config.backend.timeout_secs),
        )
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_raw(&self) -> Result<Vec<RawFeedbackCode>, CatalogFetchError> {
        let url = format!("{}{}", self.base_url, CATALOG_PATH);
        debug!(url = %url, "fetching catalog");

        let mut request = self
            .http
            .get(&url)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(CatalogFetchError::ServerError(resp.status()));
        }

        let body = resp.bytes().await?;
        decode_listing(&body)
    }

    fn source_name(&self) -> &str {
        "http"
    }
}

// ============================================================================
// File source
// ============================================================================

/// Reads a code listing from a JSON file. Used by the diagnostic tools and
/// for offline work against a captured backend response.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl AsRef<Path>) -> FileCatalogSource {
        FileCatalogSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_raw(&self) -> Result<Vec<RawFeedbackCode>, CatalogFetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogFetchError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        decode_listing(&bytes)
    }

    fn source_name(&self) -> &str {
        "file"
    }
}

// ============================================================================
// Degrade policy
// ============================================================================

/// Fetch and normalize, degrading to an empty catalog on any failure.
pub async fn fetch_or_empty<S>(source: &S) -> CodeCatalog
where
    S: CatalogSource + ?Sized,
{
    match source.fetch_raw().await {
        Ok(raw) => CodeCatalog::normalize(raw),
        Err(e) => {
            warn!(
                source = source.source_name(),
                error = %e,
                "catalog fetch failed, continuing with empty catalog"
            );
            CodeCatalog::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_source_reads_listing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"code": "PTP", "use_sub_code": false, "category": "BOTH",
                 "fields": ["Amount"]}}]"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let raw = tokio_test::block_on(source.fetch_raw()).unwrap();

        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].code, "PTP");
    }

    #[test]
    fn test_file_source_missing_file_is_io_error() {
        let source = FileCatalogSource::new("/nonexistent/feedback_codes.json");
        let err = tokio_test::block_on(source.fetch_raw()).unwrap_err();

        assert!(matches!(err, CatalogFetchError::Io { .. }));
    }

    #[test]
    fn test_file_source_bad_json_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let source = FileCatalogSource::new(file.path());
        let err = tokio_test::block_on(source.fetch_raw()).unwrap_err();

        assert!(matches!(err, CatalogFetchError::Malformed(_)));
    }

    #[test]
    fn test_decode_skips_malformed_entries() {
        // A listing with one unrecognized category and one entry missing its
        // code keeps the surviving entries usable.
        let body = br#"[
            {"code": "PTP", "use_sub_code": false, "category": "CALLING",
             "fields": ["Amount"], "sort_order": 1},
            {"code": "EMAIL", "use_sub_code": false, "category": "EMAIL"},
            {"use_sub_code": false, "category": "BOTH"},
            {"code": "LM", "use_sub_code": false, "category": "VISIT"}
        ]"#;

        let raw = decode_listing(body).unwrap();

        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].code, "PTP");
        assert_eq!(raw[1].code, "LM");
    }

    #[test]
    fn test_decode_rejects_non_array_body() {
        let err = decode_listing(br#"{"codes": []}"#).unwrap_err();
        assert!(matches!(err, CatalogFetchError::Malformed(_)));
    }

    #[test]
    fn test_file_source_keeps_good_entries_past_bad_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"code": "CB", "use_sub_code": false, "category": "CALLING"}},
                {{"code": "BAD", "use_sub_code": false, "category": "CARRIER-PIGEON"}}]"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let raw = tokio_test::block_on(source.fetch_raw()).unwrap();

        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].code, "CB");
    }

    #[test]
    fn test_fetch_or_empty_degrades_on_failure() {
        let source = FileCatalogSource::new("/nonexistent/feedback_codes.json");
        let catalog = tokio_test::block_on(fetch_or_empty(&source));

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_fetch_or_empty_normalizes_on_success() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"code": "LM", "use_sub_code": false, "category": "VISIT"}}]"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let catalog = tokio_test::block_on(fetch_or_empty(&source));

        assert!(catalog.contains("LM"));
    }
}
