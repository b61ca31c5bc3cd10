//! End-to-end integration tests for the upload and analysis flow.
//!
//! These tests boot the DentaScan app against a stub segmentation service
//! (a second axum server speaking the real wire contract) and drive the
//! whole journey over HTTP: health probe, multipart upload, redirect to
//! the results page, and the claim-once semantics of stored results.

use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use dentascan_web::{create_router, AppState, Config};
use serde_json::{json, Value};

/// Tiny PNG header, enough to pass the content-type gate.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// What the stub service saw in the last prediction request.
#[derive(Debug, Clone, Default)]
struct ReceivedUpload {
    file_name: String,
    size: usize,
}

/// Shared handle for asserting on stub-side observations.
type Received = Arc<Mutex<Option<ReceivedUpload>>>;

/// State for the stub segmentation service.
#[derive(Clone)]
struct StubState {
    prediction: Value,
    received: Received,
}

/// A prediction payload in the service's wire format.
fn mild_caries_prediction() -> Value {
    json!({
        "processed_image": "data:image/png;base64,iVBORw0KGgo=",
        "detected_class": "Caries detected in the uploaded image",
        "severity": "mild",
        "class_percentages": {"tooth": 80.0, "caries": 15.0, "cavity": 3.0, "crack": 2.0},
        "class_pixel_counts": {"tooth": 80_000, "caries": 15_000, "cavity": 3_000, "crack": 2_000},
        "dominant_condition": "caries",
        "legend": {
            "tooth": "Healthy tooth structure",
            "caries": "Early-stage decay",
            "cavity": "Cavity formation",
            "crack": "Crack or fracture"
        }
    })
}

async fn stub_health() -> Json<Value> {
    Json(json!({"status": "healthy", "model_loaded": true}))
}

/// Records the uploaded file and answers with the configured prediction.
async fn stub_predict(State(state): State<StubState>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.expect("Failed to read field") {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.expect("Failed to read bytes");
            *state.received.lock().expect("Lock poisoned") = Some(ReceivedUpload {
                file_name,
                size: bytes.len(),
            });
        }
    }
    Json(state.prediction.clone())
}

/// Drains the upload and answers with a service-side error.
async fn stub_predict_failure(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Some(field) = multipart.next_field().await.expect("Failed to read field") {
        let _ = field.bytes().await;
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Model not loaded"})),
    )
}

/// Serves the router on an ephemeral port and returns the base URL.
async fn serve_on_ephemeral_port(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    format!("http://{addr}")
}

/// Spawns a healthy stub service and returns its URL and observations.
async fn spawn_stub_service() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(None));
    let state = StubState {
        prediction: mild_caries_prediction(),
        received: Arc::clone(&received),
    };
    let router = Router::new()
        .route("/health", get(stub_health))
        .route("/predict_endpoint", post(stub_predict))
        .with_state(state);

    let url = serve_on_ephemeral_port(router).await;
    (url, received)
}

/// Spawns a stub whose prediction endpoint always fails.
async fn spawn_failing_stub_service() -> String {
    let router = Router::new()
        .route("/health", get(stub_health))
        .route("/predict_endpoint", post(stub_predict_failure));
    serve_on_ephemeral_port(router).await
}

/// Finds an available port for a stub that must start later.
fn find_available_port() -> u16 {
    StdTcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

/// Builds the app config pointing at the given segmentation service URL.
fn app_config(service_url: &str) -> Config {
    let mut config = Config::default();
    config.inference.base_url = service_url.to_string();
    config.inference.health_timeout_secs = 2;
    config.inference.submit_timeout_secs = 5;
    config
}

/// Spawns the DentaScan app and returns its base URL.
async fn spawn_app(service_url: &str) -> String {
    let state = AppState::new(app_config(service_url)).expect("Failed to build app state");
    serve_on_ephemeral_port(create_router(state)).await
}

/// Loads the upload page, which probes the service on first visit.
async fn visit_upload_page(client: &reqwest::Client, base: &str) -> String {
    client
        .get(format!("{base}/upload"))
        .send()
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Failed to read body")
}

/// Posts a tooth image to the upload endpoint.
async fn post_upload(client: &reqwest::Client, base: &str) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(PNG_BYTES.to_vec())
        .file_name("tooth.png")
        .mime_str("image/png")
        .expect("Failed to build part");
    let form = reqwest::multipart::Form::new().part("file", part);

    client
        .post(format!("{base}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("Upload request failed")
}

// ============================================================================
// Happy Path Tests
// ============================================================================

/// Tests the whole journey: probe, upload, redirect, rendered results.
#[tokio::test]
async fn test_full_upload_flow_renders_results() {
    let (service_url, received) = spawn_stub_service().await;
    let base = spawn_app(&service_url).await;
    let client = reqwest::Client::new();

    // First visit probes the stub and reports it online
    let page = visit_upload_page(&client, &base).await;
    assert!(page.contains("Server Status: Online"));

    // The upload follows the redirect chain to the results page
    let response = post_upload(&client, &base).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.url().path().starts_with("/results/"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Analysis Conclusion"));
    assert!(body.contains("conclusion-banner panel-yellow"));
    assert!(body.contains("Severity Level: <strong>Mild</strong>"));
    assert!(body.contains("Dominant Condition: <strong>Caries</strong>"));
    for percentage in ["80.00%", "15.00%", "3.00%", "2.00%"] {
        assert!(body.contains(percentage), "missing card: {percentage}");
    }

    // The stub saw the original file name and payload
    let seen = received
        .lock()
        .expect("Lock poisoned")
        .clone()
        .expect("Stub never received the upload");
    assert_eq!(seen.file_name, "tooth.png");
    assert_eq!(seen.size, PNG_BYTES.len());
}

/// Tests that the upload responds with a redirect to the results page.
#[tokio::test]
async fn test_upload_redirects_to_results() {
    let (service_url, _received) = spawn_stub_service().await;
    let base = spawn_app(&service_url).await;

    // A client that does not follow redirects, to observe the redirect itself
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client");

    visit_upload_page(&client, &base).await;
    let response = post_upload(&client, &base).await;

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert!(location.starts_with("/results/"));
}

/// Tests that a result can be viewed once and only once.
#[tokio::test]
async fn test_results_page_is_claim_once() {
    let (service_url, _received) = spawn_stub_service().await;
    let base = spawn_app(&service_url).await;
    let client = reqwest::Client::new();

    visit_upload_page(&client, &base).await;
    let response = post_upload(&client, &base).await;
    let results_url = response.url().clone();
    let first = response.text().await.expect("Failed to read body");
    assert!(first.contains("Analysis Conclusion"));

    // The handoff is consumed by the first render
    let second = client
        .get(results_url)
        .send()
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Failed to read body");
    assert!(second.contains("No Results"));
    assert!(!second.contains("Analysis Conclusion"));
}

/// Tests that the status endpoint tracks the settled flow.
#[tokio::test]
async fn test_flow_status_tracks_the_upload() {
    let (service_url, _received) = spawn_stub_service().await;
    let base = spawn_app(&service_url).await;
    let client = reqwest::Client::new();

    visit_upload_page(&client, &base).await;
    post_upload(&client, &base).await;

    let value: Value = client
        .get(format!("{base}/api/status"))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse status");

    assert_eq!(value["status"], "done");
    assert_eq!(value["serverHealth"], "online");
    assert_eq!(value["hasSelection"], true);
}

// ============================================================================
// Failure Path Tests
// ============================================================================

/// Tests that uploads are blocked while the service is unreachable.
#[tokio::test]
async fn test_upload_blocked_while_service_offline() {
    // Nothing is listening on this address
    let base = spawn_app("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let page = visit_upload_page(&client, &base).await;
    assert!(page.contains("Server Status: Offline"));

    let response = post_upload(&client, &base).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("cannot be reached"));
    assert!(body.contains("http://127.0.0.1:1"));
}

/// Tests that a recheck recovers once the service comes online.
#[tokio::test]
async fn test_recheck_recovers_when_service_comes_online() {
    // Reserve a port for the stub, but start the app before the stub exists
    let port = find_available_port();
    let service_url = format!("http://127.0.0.1:{port}");
    let base = spawn_app(&service_url).await;
    let client = reqwest::Client::new();

    let before = visit_upload_page(&client, &base).await;
    assert!(before.contains("Server Status: Offline"));

    // Bring the stub up on the reserved port
    let received: Received = Arc::new(Mutex::new(None));
    let state = StubState {
        prediction: mild_caries_prediction(),
        received,
    };
    let router = Router::new()
        .route("/health", get(stub_health))
        .route("/predict_endpoint", post(stub_predict))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .expect("Reserved port was taken");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    // The recheck redirects back to the upload page, now online
    let after = client
        .post(format!("{base}/upload/recheck"))
        .send()
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Failed to read body");
    assert!(after.contains("Server Status: Online"));
}

/// Tests that a service-side failure lands on the failure results page.
#[tokio::test]
async fn test_service_failure_reaches_results_page() {
    let service_url = spawn_failing_stub_service().await;
    let base = spawn_app(&service_url).await;
    let client = reqwest::Client::new();

    visit_upload_page(&client, &base).await;
    let response = post_upload(&client, &base).await;
    assert!(response.url().path().starts_with("/results/"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Image Analysis Failed"));
    assert!(body.contains("Model not loaded"));
}
