//! Code catalog — normalization and the process-wide snapshot
//!
//! The backend serves feedback codes as a flat JSON array. [`CodeCatalog`]
//! turns that list into an immutable map keyed by code, which is what every
//! lookup in the engine runs against. [`SharedCatalog`] holds the current
//! snapshot for the whole process: forms grab a cheap `Arc` on open, and a
//! background refresh swaps new snapshots in without blocking readers.

use crate::client::{CatalogFetchError, CatalogSource};
use crate::types::{FeedbackCode, RawFeedbackCode};
use arc_swap::{ArcSwap, ArcSwapOption};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ============================================================================
// Catalog
// ============================================================================

/// Immutable snapshot of the backend's feedback-code listing, keyed by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeCatalog {
    codes: HashMap<String, FeedbackCode>,
}

impl CodeCatalog {
    /// Empty catalog. What a form sees while the backend is unreachable.
    pub fn empty() -> CodeCatalog {
        CodeCatalog::default()
    }

    /// Normalize a raw wire listing into a keyed catalog.
    ///
    /// Duplicate codes keep the later entry, matching the backend's own
    /// "last write wins" semantics for its code table.
    pub fn normalize(raw: Vec<RawFeedbackCode>) -> CodeCatalog {
        let mut codes = HashMap::with_capacity(raw.len());
        for entry in raw {
            let normalized = FeedbackCode::from_raw(entry);
            if let Some(previous) = codes.insert(normalized.code.clone(), normalized) {
                warn!(
                    code = %previous.code,
                    "duplicate code in catalog listing, keeping the later entry"
                );
            }
        }
        debug!(codes = codes.len(), "catalog normalized");
        CodeCatalog { codes }
    }

    /// Look up one code.
    pub fn get(&self, code: &str) -> Option<&FeedbackCode> {
        self.codes.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// All entries, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = &FeedbackCode> {
        self.codes.values()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

// ============================================================================
// Shared snapshot
// ============================================================================

/// Process-wide catalog holder.
///
/// Readers call [`SharedCatalog::load`] and keep working off that snapshot;
/// a swap never invalidates a form that is already open. A failed refresh
/// keeps the previous snapshot in place.
pub struct SharedCatalog {
    current: ArcSwap<CodeCatalog>,
    last_refresh: ArcSwapOption<DateTime<Utc>>,
}

impl SharedCatalog {
    /// Start with an empty catalog.
    pub fn new() -> SharedCatalog {
        SharedCatalog {
            current: ArcSwap::from_pointee(CodeCatalog::empty()),
            last_refresh: ArcSwapOption::empty(),
        }
    }

    /// Start from an already-normalized catalog.
    pub fn from_catalog(catalog: CodeCatalog) -> SharedCatalog {
        SharedCatalog {
            current: ArcSwap::from_pointee(catalog),
            last_refresh: ArcSwapOption::empty(),
        }
    }

    /// Current snapshot. Cheap; safe to call per form open.
    pub fn load(&self) -> Arc<CodeCatalog> {
        self.current.load_full()
    }

    /// Swap in a new snapshot and stamp the refresh time.
    pub fn store(&self, catalog: CodeCatalog) {
        self.current.store(Arc::new(catalog));
        self.last_refresh.store(Some(Arc::new(Utc::now())));
    }

    /// Fetch from a source, normalize, and swap the result in.
    ///
    /// On fetch failure the previous snapshot stays current and the error is
    /// returned for the caller to report. Returns the new code count on
    /// success.
    pub async fn refresh<S>(&self, source: &S) -> Result<usize, CatalogFetchError>
    where
        S: CatalogSource + ?Sized,
    {
        match source.fetch_raw().await {
            Ok(raw) => {
                let catalog = CodeCatalog::normalize(raw);
                let count = catalog.len();
                self.store(catalog);
                info!(source = source.source_name(), codes = count, "catalog refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(
                    source = source.source_name(),
                    error = %e,
                    "catalog refresh failed, keeping previous snapshot"
                );
                Err(e)
            }
        }
    }

    /// When the snapshot was last replaced, if ever.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh.load_full().map(|ts| *ts)
    }
}

impl Default for SharedCatalog {
    fn default() -> SharedCatalog {
        SharedCatalog::new()
    }
}
