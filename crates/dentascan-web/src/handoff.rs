//! Typed handoff of one analysis result from the upload flow to the
//! results page.
//!
//! The redirect after an analysis carries only an opaque result id; the
//! store holds the actual result until the results page claims it. A
//! handoff can be claimed exactly once, so reloading a results URL shows
//! the no-results fallback instead of replaying a stale analysis.

use std::collections::HashMap;

use dentascan_inference::PredictionResult;

/// Everything the results page needs to render one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisHandoff {
    /// The service's result. Absent when the analysis failed.
    pub prediction: Option<PredictionResult>,
    /// Preview path of the image that was analyzed.
    pub original_image: Option<String>,
    /// `true` only for the transitional loading frame.
    pub is_loading: bool,
    /// User-facing failure text when the analysis failed.
    pub error: Option<String>,
}

/// In-memory store of handoffs waiting to be claimed, keyed by result id.
#[derive(Debug, Default)]
pub struct HandoffStore {
    entries: HashMap<String, AnalysisHandoff>,
    next_serial: u64,
}

impl HandoffStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a handoff and returns the id the results page claims it by.
    pub fn deposit(&mut self, handoff: AnalysisHandoff) -> String {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.next_serial += 1;

        let id = format!("{timestamp:x}-{:x}", self.next_serial);
        self.entries.insert(id.clone(), handoff);
        id
    }

    /// Removes and returns the handoff for the given id.
    ///
    /// Returns `None` for an unknown id, including one that has already
    /// been claimed.
    pub fn claim(&mut self, id: &str) -> Option<AnalysisHandoff> {
        self.entries.remove(id)
    }

    /// Returns the number of unclaimed handoffs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no handoffs are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
