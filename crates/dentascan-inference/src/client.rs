//! HTTP client for the tooth-segmentation service.
//!
//! This module provides the [`InferenceClient`] struct for submitting dental
//! images to the external segmentation service and probing its liveness.

use std::time::Duration;

use reqwest::multipart;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::{InferenceError, PredictionResult, Result};

/// Default timeout for the liveness probe.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for image analysis.
///
/// Segmentation inference is slow on CPU-only hosts, so the submission
/// deadline is generous.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the external segmentation service.
///
/// Wraps a [`reqwest::Client`] with per-endpoint timeouts. The client never
/// retries: each failure maps to one [`InferenceError`] and surfaces once.
///
/// # Example
///
/// ```no_run
/// use dentascan_inference::InferenceClient;
///
/// # async fn example() -> Result<(), dentascan_inference::InferenceError> {
/// let client = InferenceClient::new("http://localhost:5000")?;
/// let status = client.check_health().await?;
/// println!("service says: {status}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InferenceClient {
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// Normalized service base URL, without a trailing slash.
    base_url: String,
    /// Timeout applied to the liveness probe.
    health_timeout: Duration,
    /// Timeout applied to image submission.
    submit_timeout: Duration,
}

impl InferenceClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// The URL is validated up front and normalized by trimming any trailing
    /// slash, so endpoint paths can be appended directly.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root, e.g. `http://localhost:5000`
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::RequestSetup`] if `base_url` is not a valid
    /// absolute URL or the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/').to_string();

        reqwest::Url::parse(&trimmed)
            .map_err(|e| InferenceError::request_setup(format!("invalid base URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| InferenceError::request_setup(e.to_string()))?;

        debug!(base_url = %trimmed, "Constructed inference client");

        Ok(Self {
            http,
            base_url: trimmed,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        })
    }

    /// Overrides the liveness probe timeout.
    #[must_use]
    pub const fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Overrides the image submission timeout.
    #[must_use]
    pub const fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Returns the normalized service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes the service liveness endpoint.
    ///
    /// Sends `GET {base}/health` with the health timeout and returns the
    /// service's status payload as opaque JSON.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Unreachable`] when no response arrives,
    /// [`InferenceError::Service`] when the service answers with a failure
    /// status, and [`InferenceError::RequestSetup`] for anything that
    /// prevented the request from completing normally.
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> Result<serde_json::Value> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .http
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Health probe answered with failure status");
            return Err(service_failure(status, &body));
        }

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        debug!("Health probe passed");
        Ok(payload)
    }

    /// Submits a dental image for analysis.
    ///
    /// Sends `POST {base}/predict_endpoint` as multipart form data with a
    /// single `file` part carrying the image bytes, then parses the JSON
    /// response into a [`PredictionResult`].
    ///
    /// # Arguments
    ///
    /// * `file_name` - Original file name, forwarded in the form part
    /// * `content_type` - Declared MIME type of the image
    /// * `bytes` - Raw image bytes
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Service`] with the service's own error text
    /// when the service rejects the image, [`InferenceError::Unreachable`]
    /// when no response arrives within the submission timeout, and
    /// [`InferenceError::RequestSetup`] when the multipart body cannot be
    /// built or the response cannot be decoded.
    #[instrument(skip(self, bytes), fields(file_name = %file_name, size = bytes.len()))]
    pub async fn submit_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<PredictionResult> {
        let url = format!("{}/predict_endpoint", self.base_url);

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| {
                InferenceError::request_setup(format!("invalid content type '{content_type}': {e}"))
            })?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(self.submit_timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Prediction request rejected by service");
            return Err(service_failure(status, &body));
        }

        let result = response
            .json::<PredictionResult>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        info!(
            severity = %result.severity,
            dominant_condition = %result.dominant_condition,
            "Prediction received"
        );

        Ok(result)
    }
}

/// Maps a transport-level failure onto the closed error taxonomy.
///
/// A request that left but got no answer is `Unreachable`; everything else
/// (builder failures, undecodable bodies) is treated as a setup problem.
fn map_transport_error(err: &reqwest::Error) -> InferenceError {
    if err.is_timeout() || err.is_connect() {
        return InferenceError::Unreachable;
    }
    InferenceError::request_setup(err.to_string())
}

/// Builds the `Service` error for a non-success response.
///
/// Prefers the `error` field of a JSON body, then the raw body text, and
/// finally the HTTP status line when the body carries nothing usable.
fn service_failure(status: StatusCode, body: &str) -> InferenceError {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        });

    let message = from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("the prediction service returned status {status}")
        } else {
            trimmed.to_owned()
        }
    });

    InferenceError::Service { message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_base_url() {
        let client = InferenceClient::new("http://localhost:5000").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = InferenceClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let result = InferenceClient::new("not a url");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            matches!(err, InferenceError::RequestSetup { .. }),
            "Expected RequestSetup, got: {err:?}"
        );
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn timeouts_default_to_contract_values() {
        let client = InferenceClient::new("http://localhost:5000").unwrap();
        assert_eq!(client.health_timeout, DEFAULT_HEALTH_TIMEOUT);
        assert_eq!(client.submit_timeout, DEFAULT_SUBMIT_TIMEOUT);
    }

    #[test]
    fn timeout_overrides_apply() {
        let client = InferenceClient::new("http://localhost:5000")
            .unwrap()
            .with_health_timeout(Duration::from_secs(2))
            .with_submit_timeout(Duration::from_secs(30));
        assert_eq!(client.health_timeout, Duration::from_secs(2));
        assert_eq!(client.submit_timeout, Duration::from_secs(30));
    }

    #[test]
    fn service_failure_prefers_json_error_field() {
        let err = service_failure(
            StatusCode::BAD_REQUEST,
            r#"{"error": "No file provided in the request"}"#,
        );
        assert_eq!(err.to_string(), "No file provided in the request");
    }

    #[test]
    fn service_failure_falls_back_to_raw_body() {
        let err = service_failure(StatusCode::INTERNAL_SERVER_ERROR, "model not loaded");
        assert_eq!(err.to_string(), "model not loaded");
    }

    #[test]
    fn service_failure_falls_back_to_status_line() {
        let err = service_failure(StatusCode::BAD_GATEWAY, "   ");
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn check_health_against_closed_port_is_unreachable() {
        // Port 1 is never serving; the connection is refused immediately.
        let client = InferenceClient::new("http://127.0.0.1:1").unwrap();
        let result = tokio_test::block_on(client.check_health());
        let err = result.unwrap_err();
        assert!(err.is_unreachable(), "Expected Unreachable, got: {err:?}");
    }

    #[test]
    fn submit_against_closed_port_is_unreachable() {
        let client = InferenceClient::new("http://127.0.0.1:1").unwrap();
        let result = tokio_test::block_on(client.submit_image(
            "tooth.jpg",
            "image/jpeg",
            vec![0xFF, 0xD8, 0xFF],
        ));
        let err = result.unwrap_err();
        assert!(err.is_unreachable(), "Expected Unreachable, got: {err:?}");
    }

    /// Probes a real segmentation service.
    ///
    /// Note: This test requires the segmentation service to be running
    /// locally on its default port.
    #[tokio::test]
    #[ignore = "requires a running segmentation service"]
    async fn check_health_against_live_service() {
        let client = InferenceClient::new("http://localhost:5000").unwrap();
        let result = client.check_health().await;
        assert!(result.is_ok(), "Health probe failed: {result:?}");
    }

    /// Submits a real image to a running segmentation service.
    ///
    /// Note: This test requires the segmentation service to be running
    /// locally on its default port.
    #[tokio::test]
    #[ignore = "requires a running segmentation service"]
    async fn submit_image_against_live_service() {
        let client = InferenceClient::new("http://localhost:5000").unwrap();
        // Minimal JPEG header; the service decides whether it is decodable.
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let result = client.submit_image("probe.jpg", "image/jpeg", bytes).await;
        // Either a parsed prediction or the service's own rejection text.
        match result {
            Ok(prediction) => assert!(!prediction.detected_class.is_empty()),
            Err(err) => assert!(matches!(err, InferenceError::Service { .. })),
        }
    }
}
