//! DentaScan Scan Archive
//!
//! Typed client for the hosted archive backend that stores user accounts,
//! uploaded scan images, and per-scan findings.
//!
//! The backend exposes three surfaces under one base URL: an auth API
//! (`/auth/v1`), a REST API over the database tables (`/rest/v1`), and an
//! object store (`/storage/v1`). The tables are `profiles`, `scans`, and
//! `scan_results`; this crate owns the row types for all three and the
//! [`ArchiveClient`] that drives them.
//!
//! None of the live application flows call into this crate yet. It exists so
//! scans can be archived per user once accounts are wired up.

pub mod client;

pub use client::{ArchiveClient, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STORAGE_BUCKET};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the archive backend.
///
/// The taxonomy matches the other service clients in this workspace: the
/// backend answered with a failure, the backend never answered, or the
/// request could not be sent in the first place.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The backend responded with a non-success status.
    ///
    /// The message is the backend's own error text, passed through verbatim.
    #[error("{message}")]
    Service {
        /// Error text reported by the backend.
        message: String,
    },

    /// The request was sent but no response arrived.
    #[error("the archive backend did not respond\n\nSuggestion: Verify the archive base URL and your network connection")]
    Unreachable,

    /// The request could not be constructed or dispatched.
    #[error("failed to prepare the archive request: {message}")]
    RequestSetup {
        /// What went wrong before the request left the application.
        message: String,
    },
}

impl ArchiveError {
    /// Creates a `Service` error carrying the backend's message verbatim.
    #[must_use]
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Creates a `RequestSetup` error.
    #[must_use]
    pub fn request_setup(message: impl Into<String>) -> Self {
        Self::RequestSetup {
            message: message.into(),
        }
    }

    /// Returns `true` if the backend could not be reached at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

// ============================================================================
// Row Types
// ============================================================================

/// A row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile id, identical to the auth user id.
    pub id: String,
    /// Account email address.
    pub email: String,
    /// Display name, when the user provided one.
    pub full_name: Option<String>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A row of the `scans` table, optionally carrying its embedded findings.
///
/// Reads that join `scan_results` populate [`Self::scan_results`]; plain
/// inserts leave it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Scan id assigned by the backend.
    pub id: String,
    /// Owning user id.
    pub user_id: String,
    /// Public URL of the stored scan image.
    pub image_url: String,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Findings saved against this scan, when the read embedded them.
    #[serde(default)]
    pub scan_results: Vec<ScanResultRow>,
}

/// A row of the `scan_results` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResultRow {
    /// Finding id assigned by the backend.
    pub id: String,
    /// Scan this finding belongs to.
    pub scan_id: String,
    /// Name of the detected condition.
    pub condition_name: String,
    /// Severity as reported by the analysis.
    pub severity: String,
    /// Free-text description of the finding.
    pub description: Option<String>,
    /// Where in the image the condition was found.
    pub location: Option<String>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// One finding to save against a scan.
///
/// This is the insert-side counterpart of [`ScanResultRow`]: the backend
/// assigns `id`, `scan_id`, and `created_at` on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFinding {
    /// Name of the detected condition.
    pub condition_name: String,
    /// Severity as reported by the analysis.
    pub severity: String,
    /// Free-text description of the finding.
    pub description: Option<String>,
    /// Where in the image the condition was found.
    pub location: Option<String>,
}

impl ScanFinding {
    /// Creates a finding with the required fields only.
    #[must_use]
    pub fn new(condition_name: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            condition_name: condition_name.into(),
            severity: severity.into(),
            description: None,
            location: None,
        }
    }

    /// Attaches a description to the finding.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a location to the finding.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

// ============================================================================
// Auth Types
// ============================================================================

/// The authenticated user as reported by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user id.
    pub id: String,
    /// Email the account was registered with.
    pub email: Option<String>,
}

/// An access grant returned by sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for authenticated requests.
    pub access_token: String,
    /// Token type, `bearer` in practice.
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: u64,
    /// Token used to mint a fresh session.
    pub refresh_token: String,
    /// The user this session belongs to.
    pub user: AuthUser,
}
