//! Upload flow state machine.
//!
//! The upload page drives one shared flow: probe the segmentation service,
//! select an image, run the analysis. The flow gates every step on the one
//! before it, so an analysis request can never reach the service before a
//! file has been chosen or while the service is not known to be online.
//!
//! A finished analysis leaves the flow as an [`AnalysisHandoff`] (see
//! [`crate::handoff`]); the flow itself keeps only the current selection so
//! the preview URL stays resolvable.

use serde::{Deserialize, Serialize};

use dentascan_inference::PredictionResult;

use crate::error::{DentascanError, Result};
use crate::handoff::AnalysisHandoff;

/// Message shown when an analysis fails without a usable error text.
pub const ANALYZE_FAILURE_FALLBACK: &str = "Failed to analyze the image. Please try again.";

/// Content types accepted for upload.
const ACCEPTED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Status of the upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// Nothing has happened yet; the service has not been probed.
    Idle,
    /// A health probe is in flight.
    CheckingServer,
    /// The last health probe succeeded.
    ServerOnline,
    /// The last health probe failed.
    ServerOffline,
    /// An image has been submitted and the service is working on it.
    Analyzing,
    /// The last analysis completed and produced a result.
    Done,
    /// The last analysis failed.
    Failed,
}

impl UploadStatus {
    /// Returns the snake_case name used on the wire and in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CheckingServer => "checking_server",
            Self::ServerOnline => "server_online",
            Self::ServerOffline => "server_offline",
            Self::Analyzing => "analyzing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` while an analysis is in flight.
    ///
    /// # Examples
    ///
    /// ```
    /// use dentascan_web::UploadStatus;
    ///
    /// assert!(UploadStatus::Analyzing.is_analyzing());
    /// assert!(!UploadStatus::ServerOnline.is_analyzing());
    /// ```
    #[must_use]
    pub const fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing)
    }

    /// Returns `true` once an analysis has finished, successfully or not.
    ///
    /// # Examples
    ///
    /// ```
    /// use dentascan_web::UploadStatus;
    ///
    /// assert!(UploadStatus::Done.is_settled());
    /// assert!(UploadStatus::Failed.is_settled());
    /// assert!(!UploadStatus::Idle.is_settled());
    /// ```
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse availability of the segmentation service, as shown in the status
/// banner on the upload page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerHealth {
    /// No probe has completed yet.
    Checking,
    /// The service answered the last probe.
    Online,
    /// The service did not answer the last probe.
    Offline,
}

impl ServerHealth {
    /// Returns the snake_case name used on the wire and in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ServerHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image the user has chosen for analysis.
#[derive(Debug, Clone)]
pub struct UploadSelection {
    /// Identifier the preview URL is keyed on.
    pub id: String,
    /// File name as reported by the browser.
    pub file_name: String,
    /// Content type as reported by the browser.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Path the browser fetches the preview from.
    pub preview_path: String,
}

/// State machine for the upload page.
///
/// One instance is shared by all requests; the flow mirrors what a single
/// visitor sees on the upload page.
#[derive(Debug)]
pub struct UploadFlow {
    status: UploadStatus,
    selection: Option<UploadSelection>,
    error: Option<String>,
    service_url: String,
}

impl UploadFlow {
    /// Creates an idle flow fronting the segmentation service at the given
    /// base URL. The URL is only used in offline error messages.
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Idle,
            selection: None,
            error: None,
            service_url: service_url.into(),
        }
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> UploadStatus {
        self.status
    }

    /// Returns the current selection, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&UploadSelection> {
        self.selection.as_ref()
    }

    /// Returns the most recent user-facing error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the service availability implied by the current status.
    #[must_use]
    pub const fn server_health(&self) -> ServerHealth {
        match self.status {
            UploadStatus::Idle | UploadStatus::CheckingServer => ServerHealth::Checking,
            UploadStatus::ServerOffline => ServerHealth::Offline,
            UploadStatus::ServerOnline
            | UploadStatus::Analyzing
            | UploadStatus::Done
            | UploadStatus::Failed => ServerHealth::Online,
        }
    }

    /// Returns `true` when an analysis could be started right now.
    #[must_use]
    pub const fn can_analyze(&self) -> bool {
        matches!(self.status, UploadStatus::ServerOnline) && self.selection.is_some()
    }

    /// Marks a health probe as started.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the flow is `Idle` or
    /// `ServerOffline`.
    pub fn begin_health_check(&mut self) -> Result<()> {
        match self.status {
            UploadStatus::Idle | UploadStatus::ServerOffline => {
                self.status = UploadStatus::CheckingServer;
                Ok(())
            }
            other => Err(DentascanError::invalid_transition(
                other,
                "start a health check",
            )),
        }
    }

    /// Records a successful health probe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a probe is in flight.
    pub fn health_check_passed(&mut self) -> Result<()> {
        match self.status {
            UploadStatus::CheckingServer => {
                self.status = UploadStatus::ServerOnline;
                Ok(())
            }
            other => Err(DentascanError::invalid_transition(
                other,
                "record a passed health check",
            )),
        }
    }

    /// Records a failed health probe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a probe is in flight.
    pub fn health_check_failed(&mut self) -> Result<()> {
        match self.status {
            UploadStatus::CheckingServer => {
                self.status = UploadStatus::ServerOffline;
                Ok(())
            }
            other => Err(DentascanError::invalid_transition(
                other,
                "record a failed health check",
            )),
        }
    }

    /// Stores a new selection after validating its content type.
    ///
    /// Replacing the selection drops the previous one, so its preview URL
    /// stops resolving. Any earlier error is cleared.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFileType` for anything that is not a JPEG or PNG, and
    /// `InvalidTransition` while an analysis is in flight.
    pub fn select_file(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        if self.status.is_analyzing() {
            return Err(DentascanError::invalid_transition(
                self.status,
                "select a file",
            ));
        }

        let content_type = content_type.into();
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(DentascanError::invalid_file_type(content_type));
        }

        let id = generate_upload_id();
        let preview_path = format!("/uploads/{id}");
        self.selection = Some(UploadSelection {
            id,
            file_name: file_name.into(),
            content_type,
            bytes,
            preview_path,
        });
        self.error = None;
        Ok(())
    }

    /// Marks an analysis as started.
    ///
    /// # Errors
    ///
    /// Returns `MissingFile` when nothing is selected, `ServerOffline` when
    /// the service is not known to be online (an unverified service counts
    /// as offline), and `InvalidTransition` while an analysis is already in
    /// flight.
    pub fn begin_analysis(&mut self) -> Result<()> {
        if self.selection.is_none() {
            return Err(DentascanError::MissingFile);
        }

        match self.status {
            UploadStatus::Analyzing => Err(DentascanError::invalid_transition(
                self.status,
                "start an analysis",
            )),
            UploadStatus::Idle | UploadStatus::CheckingServer | UploadStatus::ServerOffline => {
                Err(DentascanError::server_offline(self.service_url.clone()))
            }
            UploadStatus::ServerOnline | UploadStatus::Done | UploadStatus::Failed => {
                self.status = UploadStatus::Analyzing;
                Ok(())
            }
        }
    }

    /// Records a completed analysis and returns the handoff for the results
    /// page.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless an analysis is in flight.
    pub fn finish_analysis(&mut self, prediction: PredictionResult) -> Result<AnalysisHandoff> {
        if !self.status.is_analyzing() {
            return Err(DentascanError::invalid_transition(
                self.status,
                "finish an analysis",
            ));
        }

        self.status = UploadStatus::Done;
        self.error = None;
        Ok(AnalysisHandoff {
            prediction: Some(prediction),
            original_image: self.preview_path(),
            is_loading: false,
            error: None,
        })
    }

    /// Records a failed analysis and returns the handoff for the results
    /// page.
    ///
    /// A blank message is replaced with [`ANALYZE_FAILURE_FALLBACK`]. The
    /// message is also kept on the flow so the upload page can show it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless an analysis is in flight.
    pub fn fail_analysis(&mut self, message: impl Into<String>) -> Result<AnalysisHandoff> {
        if !self.status.is_analyzing() {
            return Err(DentascanError::invalid_transition(
                self.status,
                "record a failed analysis",
            ));
        }

        let message = message.into();
        let message = if message.trim().is_empty() {
            ANALYZE_FAILURE_FALLBACK.to_string()
        } else {
            message
        };

        self.status = UploadStatus::Failed;
        self.error = Some(message.clone());
        Ok(AnalysisHandoff {
            prediction: None,
            original_image: self.preview_path(),
            is_loading: false,
            error: Some(message),
        })
    }

    fn preview_path(&self) -> Option<String> {
        self.selection
            .as_ref()
            .map(|selection| selection.preview_path.clone())
    }
}

/// Generates a unique identifier for an upload.
fn generate_upload_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static UPLOAD_SERIAL: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let serial = UPLOAD_SERIAL.fetch_add(1, Ordering::Relaxed);

    format!("{timestamp:x}-{serial:x}")
}
