//! DentaScan Inference Contract
//!
//! Result types and HTTP client for the external tooth-segmentation service.
//!
//! The segmentation service analyzes a dental photograph and reports, per
//! segmentation class, how much of the image it covers. This crate owns the
//! JSON contract for that report ([`PredictionResult`]) and a bounded-timeout
//! client ([`InferenceClient`]) for the two service endpoints: a liveness
//! probe and the image submission endpoint.

pub mod client;

pub use client::{InferenceClient, DEFAULT_HEALTH_TIMEOUT, DEFAULT_SUBMIT_TIMEOUT};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the segmentation service.
///
/// The taxonomy is closed: either the service answered with a failure, the
/// service never answered, or the request could not be sent in the first
/// place. Callers are expected to match exhaustively.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The service responded with a non-success status.
    ///
    /// The message is the service's own error text, passed through verbatim
    /// so the user sees exactly what the service reported.
    #[error("{message}")]
    Service {
        /// Error text reported by the service.
        message: String,
    },

    /// The request was sent but no response arrived.
    ///
    /// Covers timeouts, refused connections, and name resolution failures.
    #[error("the prediction service did not respond\n\nSuggestion: Make sure the segmentation service is running and reachable (default: http://localhost:5000)")]
    Unreachable,

    /// The request could not be constructed or dispatched.
    #[error("failed to prepare the prediction request: {message}")]
    RequestSetup {
        /// What went wrong before the request left the application.
        message: String,
    },
}

impl InferenceError {
    /// Creates a `Service` error carrying the service's message verbatim.
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

    /// Returns `true` if the service could not be reached at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Severity tier reported by the segmentation service.
///
/// The numeric thresholds that produce a tier live in the service; on this
/// side severity only selects presentation color and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No pathological findings.
    #[default]
    Healthy,
    /// Minor findings worth monitoring.
    Mild,
    /// Noticeable findings that warrant a dental visit.
    Moderate,
    /// Serious findings needing prompt attention.
    Severe,
}

impl Severity {
    /// Returns the capitalized display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// Returns `true` when the service found nothing pathological.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Segmentation classes produced by the service.
///
/// Every per-class metric in a [`PredictionResult`] covers exactly these
/// four, in the fixed presentation order of [`ToothClass::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToothClass {
    /// Normal tooth structure.
    Tooth,
    /// Early-stage decay.
    Caries,
    /// Cavity formation.
    Cavity,
    /// Crack or fracture.
    Crack,
}

impl ToothClass {
    /// All classes in presentation order.
    pub const ALL: [Self; 4] = [Self::Tooth, Self::Caries, Self::Cavity, Self::Crack];

    /// Returns the capitalized display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tooth => "Tooth",
            Self::Caries => "Caries",
            Self::Cavity => "Cavity",
            Self::Crack => "Crack",
        }
    }

    /// Returns the lowercase wire key used by the service.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Tooth => "tooth",
            Self::Caries => "caries",
            Self::Cavity => "cavity",
            Self::Crack => "crack",
        }
    }
}

impl std::fmt::Display for ToothClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A per-class mapping with one value for each segmentation class.
///
/// Using a fixed-shape struct rather than a map makes the contract
/// structural: all four class keys are always present, and the three
/// per-class mappings in a result cannot disagree on which classes exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMap<T> {
    /// Value for normal tooth structure.
    pub tooth: T,
    /// Value for caries.
    pub caries: T,
    /// Value for cavities.
    pub cavity: T,
    /// Value for cracks.
    pub crack: T,
}

impl<T> ClassMap<T> {
    /// Returns the value for the given class.
    pub const fn get(&self, class: ToothClass) -> &T {
        match class {
            ToothClass::Tooth => &self.tooth,
            ToothClass::Caries => &self.caries,
            ToothClass::Cavity => &self.cavity,
            ToothClass::Crack => &self.crack,
        }
    }

    /// Iterates entries in [`ToothClass::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ToothClass, &T)> {
        ToothClass::ALL.iter().map(move |class| (*class, self.get(*class)))
    }
}

/// Analysis result for one submitted image.
///
/// Field names follow the service's JSON shape exactly. Percentages are not
/// guaranteed to sum to 100: classes may overlap and background pixels are
/// uncounted. The contract accepts this rather than validating it.
///
/// # Example
///
/// ```
/// use dentascan_inference::{PredictionResult, Severity};
///
/// let json = r#"{
///     "processed_image": "data:image/png;base64,iVBORw0KGgo=",
///     "detected_class": "Caries detected in the uploaded image",
///     "severity": "mild",
///     "class_percentages": {"tooth": 80.0, "caries": 15.0, "cavity": 3.0, "crack": 2.0},
///     "class_pixel_counts": {"tooth": 80000, "caries": 15000, "cavity": 3000, "crack": 2000},
///     "dominant_condition": "caries",
///     "legend": {"tooth": "Healthy tooth", "caries": "Caries", "cavity": "Cavity", "crack": "Crack"}
/// }"#;
///
/// let result: PredictionResult = serde_json::from_str(json)?;
/// assert_eq!(result.severity, Severity::Mild);
/// assert_eq!(result.dominant_condition, "caries");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Segmented overlay image, normally a base64 data URI.
    pub processed_image: String,
    /// Headline conclusion sentence for the analysis.
    pub detected_class: String,
    /// Overall severity tier.
    pub severity: Severity,
    /// Percentage of the image covered by each class (0 to 100).
    pub class_percentages: ClassMap<f64>,
    /// Pixel count attributed to each class.
    pub class_pixel_counts: ClassMap<u64>,
    /// Lowercase key of the strongest pathological class, or "healthy".
    pub dominant_condition: String,
    /// Legend text for each class.
    pub legend: ClassMap<String>,
}

impl PredictionResult {
    /// Returns `true` if `processed_image` can be embedded as an image.
    #[must_use]
    pub fn has_renderable_image(&self) -> bool {
        looks_like_image_data_uri(&self.processed_image)
    }
}

static IMAGE_DATA_URI: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^data:image/[a-zA-Z0-9.+-]+;base64,[A-Za-z0-9+/=]").ok());

/// Returns `true` if the string looks like a base64 image data URI.
///
/// The segmentation service embeds its overlay image this way; anything else
/// is treated as non-renderable and the presentation layer falls back to a
/// placeholder.
#[must_use]
pub fn looks_like_image_data_uri(value: &str) -> bool {
    IMAGE_DATA_URI
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "processed_image": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==",
            "detected_class": "Caries detected in the uploaded image",
            "severity": "mild",
            "class_percentages": {"tooth": 80.0, "caries": 15.0, "cavity": 3.0, "crack": 2.0},
            "class_pixel_counts": {"tooth": 80000, "caries": 15000, "cavity": 3000, "crack": 2000},
            "dominant_condition": "caries",
            "legend": {
                "tooth": "Healthy tooth structure",
                "caries": "Early-stage decay",
                "cavity": "Cavity formation",
                "crack": "Visible crack"
            }
        }"#
    }

    #[test]
    fn prediction_result_parses_service_payload() {
        let result: PredictionResult = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(result.severity, Severity::Mild);
        assert_eq!(result.detected_class, "Caries detected in the uploaded image");
        assert_eq!(result.dominant_condition, "caries");
        assert!((result.class_percentages.caries - 15.0).abs() < f64::EPSILON);
        assert_eq!(result.class_pixel_counts.tooth, 80_000);
        assert_eq!(result.legend.crack, "Visible crack");
    }

    #[test]
    fn prediction_result_ignores_unknown_fields() {
        let json = sample_json().replace(
            "\"dominant_condition\"",
            "\"model_version\": \"u-net-v3\", \"dominant_condition\"",
        );
        let result: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.dominant_condition, "caries");
    }

    #[test]
    fn severity_parses_lowercase_wire_values() {
        for (wire, expected) in [
            ("\"healthy\"", Severity::Healthy),
            ("\"mild\"", Severity::Mild),
            ("\"moderate\"", Severity::Moderate),
            ("\"severe\"", Severity::Severe),
        ] {
            let parsed: Severity = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn severity_labels_are_capitalized() {
        assert_eq!(Severity::Healthy.label(), "Healthy");
        assert_eq!(Severity::Mild.label(), "Mild");
        assert_eq!(Severity::Moderate.label(), "Moderate");
        assert_eq!(Severity::Severe.label(), "Severe");
    }

    #[test]
    fn severity_default_is_healthy() {
        assert_eq!(Severity::default(), Severity::Healthy);
        assert!(Severity::default().is_healthy());
        assert!(!Severity::Severe.is_healthy());
    }

    #[test]
    fn tooth_class_all_is_in_presentation_order() {
        let keys: Vec<&str> = ToothClass::ALL.iter().map(|class| class.key()).collect();
        assert_eq!(keys, vec!["tooth", "caries", "cavity", "crack"]);
    }

    #[test]
    fn class_map_get_matches_fields() {
        let map = ClassMap {
            tooth: 1,
            caries: 2,
            cavity: 3,
            crack: 4,
        };
        assert_eq!(*map.get(ToothClass::Tooth), 1);
        assert_eq!(*map.get(ToothClass::Caries), 2);
        assert_eq!(*map.get(ToothClass::Cavity), 3);
        assert_eq!(*map.get(ToothClass::Crack), 4);
    }

    #[test]
    fn class_map_iterates_in_all_order() {
        let map = ClassMap {
            tooth: "a",
            caries: "b",
            cavity: "c",
            crack: "d",
        };
        let collected: Vec<(ToothClass, &&str)> = map.iter().collect();
        assert_eq!(collected.len(), 4);
        assert_eq!(collected[0].0, ToothClass::Tooth);
        assert_eq!(*collected[1].1, "b");
        assert_eq!(collected[3].0, ToothClass::Crack);
    }

    #[test]
    fn class_map_rejects_missing_class_key() {
        let json = r#"{"tooth": 1.0, "caries": 2.0, "cavity": 3.0}"#;
        let result: std::result::Result<ClassMap<f64>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn data_uri_detection_accepts_png_and_jpeg() {
        assert!(looks_like_image_data_uri("data:image/png;base64,iVBORw0KGgo="));
        assert!(looks_like_image_data_uri("data:image/jpeg;base64,/9j/4AAQSkZJRg=="));
    }

    #[test]
    fn data_uri_detection_rejects_non_image_values() {
        assert!(!looks_like_image_data_uri(""));
        assert!(!looks_like_image_data_uri("https://example.com/image.png"));
        assert!(!looks_like_image_data_uri("data:text/plain;base64,aGVsbG8="));
        assert!(!looks_like_image_data_uri("data:image/png;base64,"));
    }

    #[test]
    fn service_error_carries_message_verbatim() {
        let err = InferenceError::service("No file provided");
        assert_eq!(err.to_string(), "No file provided");
    }

    #[test]
    fn unreachable_error_suggests_local_service_address() {
        let message = InferenceError::Unreachable.to_string();
        assert!(message.contains("did not respond"));
        assert!(message.contains("http://localhost:5000"));
    }

    #[test]
    fn request_setup_error_describes_failure() {
        let err = InferenceError::request_setup("invalid base URL");
        assert!(err.to_string().contains("invalid base URL"));
        assert!(!err.is_unreachable());
        assert!(InferenceError::Unreachable.is_unreachable());
    }

    #[test]
    fn percentages_are_not_validated_to_sum() {
        // Overlapping classes and uncounted background are accepted.
        let json = sample_json().replace("80.0", "95.5");
        let result: PredictionResult = serde_json::from_str(&json).unwrap();
        let total: f64 = result.class_percentages.iter().map(|(_, v)| *v).sum();
        assert!(total > 100.0);
    }
}
