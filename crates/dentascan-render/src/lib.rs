//! DentaScan HTML Rendering
//!
//! Pure string-building renderers for the analysis result view and the
//! site pages. Nothing here performs I/O: the route layer assembles view
//! data, and the generators in [`analysis`] and [`pages`] turn it into
//! complete HTML.

pub mod analysis;
pub mod pages;

pub use analysis::AnalysisGenerator;

use std::time::Duration;

use dentascan_inference::{PredictionResult, Severity, ToothClass};

/// Pause between finishing an analysis and presenting its content.
///
/// A presentation nicety carried over from the original result view; the
/// route layer applies it, rendering itself is synchronous.
pub const CONTENT_REVEAL_DELAY: Duration = Duration::from_millis(200);

/// View data for the analysis result renderer.
///
/// Mirrors the handoff produced by the upload flow: an optional prediction,
/// an optional reference to the originally uploaded image, a loading flag,
/// and an optional error message.
#[derive(Debug, Clone, Default)]
pub struct AnalysisView {
    /// Parsed prediction, when the analysis succeeded.
    pub prediction: Option<PredictionResult>,
    /// Reference to the originally uploaded image, when still available.
    pub original_image: Option<String>,
    /// Whether the analysis is still in flight.
    pub is_loading: bool,
    /// Error message, when the analysis failed.
    pub error: Option<String>,
}

impl AnalysisView {
    /// View for an analysis still in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// View for a completed analysis.
    #[must_use]
    pub fn completed(prediction: PredictionResult, original_image: Option<String>) -> Self {
        Self {
            prediction: Some(prediction),
            original_image,
            is_loading: false,
            error: None,
        }
    }

    /// View for a failed analysis.
    #[must_use]
    pub fn failed(error: impl Into<String>, original_image: Option<String>) -> Self {
        Self {
            prediction: None,
            original_image,
            is_loading: false,
            error: Some(error.into()),
        }
    }

    /// View for the explicit no-data state.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Returns the color tone for a severity tier.
///
/// The ramp is fixed: healthy is green, mild yellow, moderate orange,
/// severe red. Class suffixes like `panel-red` derive from it.
#[must_use]
pub const fn severity_tone(severity: Severity) -> &'static str {
    match severity {
        Severity::Healthy => "green",
        Severity::Mild => "yellow",
        Severity::Moderate => "orange",
        Severity::Severe => "red",
    }
}

/// Returns the color tone for a segmentation class.
///
/// Matches the overlay colors the segmentation service paints: tooth green,
/// caries yellow, cavity red, crack orange.
#[must_use]
pub const fn class_tone(class: ToothClass) -> &'static str {
    match class {
        ToothClass::Tooth => "green",
        ToothClass::Caries => "yellow",
        ToothClass::Cavity => "red",
        ToothClass::Crack => "orange",
    }
}

/// Escapes text for interpolation into HTML content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(ch),
        }
    }

    result
}
