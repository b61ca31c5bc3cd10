//! Error types for the DentaScan web server.
//!
//! This module defines the error hierarchy for all server operations,
//! including configuration loading, upload validation, the upload flow
//! state machine, and calls to the segmentation service.

use std::path::PathBuf;

use dentascan_inference::InferenceError;

/// A specialized `Result` type for DentaScan web operations.
pub type Result<T> = std::result::Result<T, DentascanError>;

/// Errors that can occur while serving the DentaScan application.
///
/// Error variants are organized by subsystem and include actionable
/// suggestions where possible to help users resolve issues.
#[derive(Debug, thiserror::Error)]
pub enum DentascanError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in the configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your dentascan.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Upload Validation Errors
    // ========================================================================
    /// The uploaded file is not one of the accepted image types.
    ///
    /// The message matches the alert the upload page shows; the rejected
    /// content type is kept for logging.
    #[error("Please upload a valid image file (PNG, JPG, JPEG)")]
    InvalidFileType {
        /// The content type the browser reported for the rejected file.
        content_type: String,
    },

    /// Analysis was requested before any file was selected.
    #[error("No file was selected. Please choose an image to analyze.")]
    MissingFile,

    /// Analysis was requested while the segmentation service is unreachable.
    #[error("The segmentation service cannot be reached. Make sure the server is running at {service_url}")]
    ServerOffline {
        /// Base URL the segmentation service was expected at.
        service_url: String,
    },

    // ========================================================================
    // Upload Flow Errors
    // ========================================================================
    /// An operation was attempted in an upload flow state that forbids it.
    #[error("Invalid upload flow transition: cannot {action} while {from}")]
    InvalidTransition {
        /// The upload flow status when the operation was attempted.
        from: String,
        /// The operation that was attempted.
        action: String,
    },

    // ========================================================================
    // Segmentation Service Errors
    // ========================================================================
    /// A health check or prediction call against the segmentation service
    /// failed. The service error text is shown to the user unchanged.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error, such as a request body that could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DentascanError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `InvalidFileType` error for a rejected content type.
    #[must_use]
    pub fn invalid_file_type(content_type: impl Into<String>) -> Self {
        Self::InvalidFileType {
            content_type: content_type.into(),
        }
    }

    /// Creates a new `ServerOffline` error naming the expected service address.
    #[must_use]
    pub fn server_offline(service_url: impl Into<String>) -> Self {
        Self::ServerOffline {
            service_url: service_url.into(),
        }
    }

    /// Creates a new `InvalidTransition` error.
    #[must_use]
    pub fn invalid_transition(from: impl std::fmt::Display, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    /// Returns `true` if this error is a rejected upload rather than a
    /// system failure.
    ///
    /// Validation errors are shown inline on the upload page; everything
    /// else reaches the results page or the server log.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType { .. } | Self::MissingFile | Self::ServerOffline { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_type_message_is_user_facing() {
        let err = DentascanError::invalid_file_type("application/pdf");
        assert_eq!(
            err.to_string(),
            "Please upload a valid image file (PNG, JPG, JPEG)"
        );
    }

    #[test]
    fn test_server_offline_names_the_service_url() {
        let err = DentascanError::server_offline("http://localhost:5000");
        let msg = err.to_string();
        assert!(msg.contains("cannot be reached"));
        assert!(msg.contains("http://localhost:5000"));
    }

    #[test]
    fn test_config_errors_carry_suggestions() {
        let err = DentascanError::config_parse("/tmp/dentascan.json", "trailing comma");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/dentascan.json"));
        assert!(msg.contains("Suggestion"));

        let err = DentascanError::config_validation("inference.baseUrl is empty", "Set it");
        let msg = err.to_string();
        assert!(msg.contains("inference.baseUrl is empty"));
        assert!(msg.contains("Suggestion: Set it"));
    }

    #[test]
    fn test_invalid_transition_names_state_and_action() {
        let err = DentascanError::invalid_transition("analyzing", "select a file");
        assert_eq!(
            err.to_string(),
            "Invalid upload flow transition: cannot select a file while analyzing"
        );
    }

    #[test]
    fn test_inference_errors_pass_through_unchanged() {
        let inner = InferenceError::service("Model not loaded");
        let expected = inner.to_string();
        let err = DentascanError::from(inner);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_is_validation() {
        assert!(DentascanError::MissingFile.is_validation());
        assert!(DentascanError::invalid_file_type("text/plain").is_validation());
        assert!(DentascanError::server_offline("http://localhost:5000").is_validation());
        assert!(!DentascanError::config_validation("bad", "fix it").is_validation());
        assert!(!DentascanError::invalid_transition("analyzing", "select a file").is_validation());
    }
}
