//! Analysis result rendering.
//!
//! This module provides the [`AnalysisGenerator`] struct for converting an
//! [`AnalysisView`] into the HTML body of the results page. Rendering
//! follows a strict precedence:
//!
//! 1. A loading block while the analysis is in flight
//! 2. An error panel when the analysis failed
//! 3. An explicit empty state when no prediction is available
//! 4. The full result content otherwise
//!
//! # Example
//!
//! ```
//! use dentascan_render::{AnalysisGenerator, AnalysisView};
//!
//! let view = AnalysisView::failed("No file provided", None);
//! let generator = AnalysisGenerator::new(&view);
//! let html = generator.generate();
//! assert!(html.contains("Image Analysis Failed"));
//! assert!(html.contains("No file provided"));
//! ```

use std::fmt::Write;

use dentascan_inference::{PredictionResult, ToothClass};

use crate::{class_tone, escape_html, severity_tone, AnalysisView};

/// Generates the results page body from an analysis view.
///
/// The generator holds a reference to the view and produces a formatted
/// HTML string. Output is deterministic for a given view.
pub struct AnalysisGenerator<'a> {
    view: &'a AnalysisView,
}

impl<'a> AnalysisGenerator<'a> {
    /// Creates a new generator for the given view.
    #[must_use]
    pub const fn new(view: &'a AnalysisView) -> Self {
        Self { view }
    }

    /// Generates the analysis HTML, honoring the rendering precedence.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        if self.view.is_loading {
            Self::write_loading(&mut output);
            return output;
        }

        if let Some(error) = &self.view.error {
            Self::write_error(&mut output, error);
            return output;
        }

        let Some(prediction) = &self.view.prediction else {
            Self::write_empty(&mut output);
            return output;
        };

        self.write_image_pair(&mut output, prediction);
        Self::write_legend(&mut output, prediction);
        Self::write_conclusion(&mut output, prediction);
        Self::write_breakdown(&mut output, prediction);
        Self::write_disclaimer(&mut output);

        output
    }

    /// Writes the indeterminate progress block.
    fn write_loading(output: &mut String) {
        let _ = writeln!(output, "<div class=\"analysis-loading\">");
        let _ = writeln!(output, "  <div class=\"spinner\"></div>");
        let _ = writeln!(output, "  <p>Analyzing your dental image...</p>");
        let _ = writeln!(output, "  <p class=\"muted\">This may take a moment.</p>");
        let _ = writeln!(output, "</div>");
    }

    /// Writes the error panel with the literal error text.
    fn write_error(output: &mut String, error: &str) {
        let _ = writeln!(output, "<div class=\"analysis-error panel-red\">");
        let _ = writeln!(output, "  <p class=\"status-icon\">&#9888;</p>");
        let _ = writeln!(output, "  <h3>Image Analysis Failed</h3>");
        let _ = writeln!(output, "  <p>Something went wrong:</p>");
        let _ = writeln!(
            output,
            "  <p class=\"error-detail\">{}</p>",
            escape_html(error)
        );
        let _ = writeln!(
            output,
            "  <p class=\"muted\">Try uploading a different image or check your connection.</p>"
        );
        let _ = writeln!(output, "</div>");
    }

    /// Writes the no-data empty state, visually distinct from the error
    /// panel.
    fn write_empty(output: &mut String) {
        let _ = writeln!(output, "<div class=\"analysis-empty panel-yellow\">");
        let _ = writeln!(output, "  <p class=\"status-icon\">&#8505;</p>");
        let _ = writeln!(output, "  <h3>No Analysis Results</h3>");
        let _ = writeln!(output, "  <p>No analysis data is available.</p>");
        let _ = writeln!(output, "</div>");
    }

    /// Writes the original and processed image cards.
    ///
    /// The original card is omitted when no original reference survives; the
    /// processed card falls back to a placeholder when the service returned
    /// something that is not an embeddable image.
    fn write_image_pair(&self, output: &mut String, prediction: &PredictionResult) {
        let _ = writeln!(output, "<div class=\"image-pair\">");

        if let Some(original) = &self.view.original_image {
            let _ = writeln!(output, "  <div class=\"image-card\">");
            let _ = writeln!(output, "    <h3>Original Image</h3>");
            let _ = writeln!(
                output,
                "    <img src=\"{}\" alt=\"Original dental image\">",
                escape_html(original)
            );
            let _ = writeln!(output, "  </div>");
        }

        let _ = writeln!(output, "  <div class=\"image-card\">");
        let _ = writeln!(output, "    <h3>AI Segmentation Result</h3>");
        if prediction.has_renderable_image() {
            let _ = writeln!(
                output,
                "    <img src=\"{}\" alt=\"Segmented dental image\">",
                escape_html(&prediction.processed_image)
            );
        } else {
            let _ = writeln!(
                output,
                "    <p class=\"image-missing\">Segmented image unavailable.</p>"
            );
        }
        let _ = writeln!(output, "  </div>");

        let _ = writeln!(output, "</div>");
    }

    /// Writes the fixed four-entry color legend.
    fn write_legend(output: &mut String, prediction: &PredictionResult) {
        let _ = writeln!(output, "<div class=\"legend-card\">");
        let _ = writeln!(output, "  <h3>Segmentation Color Legend</h3>");
        let _ = writeln!(output, "  <div class=\"legend-grid\">");
        for class in ToothClass::ALL {
            let _ = writeln!(
                output,
                "    {}",
                legend_entry(class, prediction.legend.get(class))
            );
        }
        let _ = writeln!(output, "  </div>");
        let _ = writeln!(output, "</div>");
    }

    /// Writes the severity-toned conclusion banner.
    fn write_conclusion(output: &mut String, prediction: &PredictionResult) {
        let tone = severity_tone(prediction.severity);
        let icon = if prediction.severity.is_healthy() {
            // Check mark for a clean result, warning sign otherwise.
            "&#10003;"
        } else {
            "&#9888;"
        };

        let _ = writeln!(output, "<div class=\"conclusion-banner panel-{tone}\">");
        let _ = writeln!(output, "  <h3>Analysis Conclusion</h3>");
        let _ = writeln!(output, "  <p class=\"status-icon\">{icon}</p>");
        let _ = writeln!(
            output,
            "  <p class=\"detected-class\">{}</p>",
            escape_html(&prediction.detected_class)
        );
        let _ = writeln!(
            output,
            "  <p>Severity Level: <strong>{}</strong></p>",
            prediction.severity.label()
        );
        let _ = writeln!(
            output,
            "  <p>Dominant Condition: <strong>{}</strong></p>",
            escape_html(&capitalize_first(&prediction.dominant_condition))
        );
        let _ = writeln!(output, "</div>");
    }

    /// Writes the per-class percentage and pixel-count breakdown.
    fn write_breakdown(output: &mut String, prediction: &PredictionResult) {
        let _ = writeln!(output, "<div class=\"breakdown-card\">");
        let _ = writeln!(output, "  <h3>Detailed Percentages by Class</h3>");
        let _ = writeln!(output, "  <div class=\"breakdown-grid\">");

        for class in ToothClass::ALL {
            let tone = class_tone(class);
            let percentage = *prediction.class_percentages.get(class);
            let pixels = *prediction.class_pixel_counts.get(class);

            let _ = writeln!(output, "    <div class=\"stat-card stat-{tone}\">");
            let _ = writeln!(output, "      <span class=\"stat-label\">{}</span>", class.label());
            let _ = writeln!(
                output,
                "      <span class=\"stat-value\">{percentage:.2}%</span>"
            );
            let _ = writeln!(output, "      <span class=\"stat-pixels\">{pixels} pixels</span>");
            let _ = writeln!(output, "    </div>");
        }

        let _ = writeln!(output, "  </div>");
        let _ = writeln!(
            output,
            "  <p class=\"muted\"><strong>Note:</strong> Percentages show the proportion of the \
             detected area for each dental condition. Colors on the segmented image match the \
             legend above.</p>"
        );
        let _ = writeln!(output, "</div>");
    }

    /// Writes the screening disclaimer shown under every completed result.
    fn write_disclaimer(output: &mut String) {
        let _ = writeln!(output, "<div class=\"disclaimer panel-blue\">");
        let _ = writeln!(
            output,
            "  <p><strong>Important:</strong> This application is an AI-assisted educational and \
             early-screening aid, not a replacement for a professional medical diagnosis. For an \
             accurate diagnosis and treatment, always consult your dentist.</p>"
        );
        let _ = writeln!(output, "</div>");
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Renders one legend entry with its color swatch.
fn legend_entry(class: ToothClass, text: &str) -> String {
    format!(
        "<div class=\"legend-entry\"><span class=\"swatch swatch-{}\"></span><span>{}</span></div>",
        class_tone(class),
        escape_html(text)
    )
}

/// Uppercases the first character of a value for display.
fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

// ============================================================================
// Tests
// ============================================================================
