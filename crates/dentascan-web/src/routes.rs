//! HTTP routes for the DentaScan application.
//!
//! This module wires the rendered pages, the upload flow, and the JSON
//! endpoints into one axum router.
//!
//! # Endpoints
//!
//! - `GET /` - Home page
//! - `GET /upload` / `POST /upload` - Upload page and analysis submission
//! - `POST /upload/recheck` - Manual health probe of the segmentation service
//! - `GET /uploads/:id` - Preview bytes for the current selection
//! - `GET /results/:id` - Analysis results (claimed exactly once)
//! - `GET /learn` / `GET /learn/:condition_id` - Education pages
//! - `GET /clinics` - Clinic directory (list or map)
//! - `GET /api/clinics` - Map marker data
//! - `GET /api/status` - Upload flow status for polling clients
//!
//! # Example
//!
//! ```no_run
//! use dentascan_web::{create_router, AppState, Config};
//!
//! # async fn example() {
//! let state = AppState::new(Config::default()).unwrap();
//!
//! let router = create_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use dentascan_content::{
    filter_clinics, filter_conditions, filter_studies, fixtures, specialty_options, Clinic,
    ClinicMarker, ClinicView, LearnTab,
};
use dentascan_inference::InferenceClient;
use dentascan_render::pages::{
    self, ClinicsPageView, NavItem, SelectedFileView, ServerStatusView, UploadPageView,
};
use dentascan_render::{escape_html, AnalysisGenerator, AnalysisView, CONTENT_REVEAL_DELAY};

use crate::config::Config;
use crate::error::DentascanError;
use crate::handoff::{AnalysisHandoff, HandoffStore};
use crate::upload::{ServerHealth, UploadFlow, UploadStatus};

/// Maximum accepted upload size in bytes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the learn page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearnParams {
    /// Selected tab, `conditions` or `studies`.
    pub tab: Option<String>,
    /// Search text.
    pub q: Option<String>,
}

/// Query parameters for the clinic directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClinicsParams {
    /// Search text.
    pub q: Option<String>,
    /// Exact specialty filter.
    pub specialty: Option<String>,
    /// Presentation mode, `list` or `map`.
    pub view: Option<String>,
    /// Clinic highlighted in map mode.
    pub selected: Option<String>,
}

/// Response body for the flow status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStatusResponse {
    /// Current upload flow status.
    pub status: UploadStatus,
    /// Availability of the segmentation service.
    pub server_health: ServerHealth,
    /// Whether an image is currently selected.
    pub has_selection: bool,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the HTTP server.
///
/// Contains the configuration, the segmentation service client, and the
/// mutable upload flow, all wrapped for sharing across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// Client for the segmentation service.
    pub inference: InferenceClient,
    /// The shared upload flow.
    pub upload_flow: Arc<Mutex<UploadFlow>>,
    /// Analysis results waiting to be claimed by a results page.
    pub handoffs: Arc<Mutex<HandoffStore>>,
}

impl AppState {
    /// Creates the application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the segmentation service URL in the
    /// configuration cannot be used to build a client.
    pub fn new(config: Config) -> Result<Self, DentascanError> {
        let inference = InferenceClient::new(config.inference.base_url.clone())?
            .with_health_timeout(config.inference.health_timeout())
            .with_submit_timeout(config.inference.submit_timeout());
        let upload_flow = UploadFlow::new(inference.base_url());

        Ok(Self {
            config,
            inference,
            upload_flow: Arc::new(Mutex::new(upload_flow)),
            handoffs: Arc::new(Mutex::new(HandoffStore::new())),
        })
    }
}

// ============================================================================
// Page Error Type
// ============================================================================

/// Internal error type for page handlers.
///
/// Reaching this means a bug or an unreadable request rather than a user
/// mistake; user mistakes are rendered inline on the page they happened on.
#[derive(Debug)]
struct PageError(DentascanError);

impl From<DentascanError> for PageError {
    fn from(err: DentascanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "Request failed");

        let body = format!(
            "<div class=\"card panel-red\"><h2>Something went wrong</h2><p>{}</p></div>",
            escape_html(&self.0.to_string())
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::render_page("Error", NavItem::None, &body)),
        )
            .into_response()
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all pages and API endpoints.
///
/// # Arguments
///
/// * `state` - The shared application state
///
/// # Returns
///
/// An axum `Router` configured with:
/// - All HTML pages at the root
/// - JSON endpoints under `/api`, with CORS for development
/// - Tracing middleware for request logging
/// - A 10 MB body limit on the upload route
pub fn create_router(state: AppState) -> Router {
    // Configure CORS for development (allow all origins)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the JSON API routes
    let api_routes = Router::new()
        .route("/clinics", get(handle_clinic_markers))
        .route("/status", get(handle_flow_status));

    // Combine with state and middleware
    Router::new()
        .route("/", get(handle_home))
        .route(
            "/upload",
            get(handle_upload_page)
                .post(handle_upload_submit)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/upload/recheck", post(handle_upload_recheck))
        .route("/uploads/:id", get(handle_upload_preview))
        .route("/results/:id", get(handle_results))
        .route("/learn", get(handle_learn))
        .route("/learn/:condition_id", get(handle_condition))
        .route("/clinics", get(handle_clinics))
        .nest("/api", api_routes.layer(cors))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

// ============================================================================
// Page Handlers
// ============================================================================

/// Handler for `GET /`.
async fn handle_home() -> Html<String> {
    Html(pages::home_page(fixtures::team()))
}

/// Handler for `GET /upload`.
///
/// Probes the segmentation service the first time the page is opened.
/// After that the last known health is shown until a manual recheck.
async fn handle_upload_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    let mut flow = state.upload_flow.lock().await;

    if flow.status() == UploadStatus::Idle {
        probe_service_health(&state, &mut flow).await?;
    }

    Ok(Html(render_upload_page(&state, &flow, None)))
}

/// Handler for `POST /upload`.
///
/// Validates the multipart upload, runs the analysis against the
/// segmentation service, and redirects to the results page. Rejected
/// uploads re-render the upload page with the error inline instead.
async fn handle_upload_submit(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let mut flow = state.upload_flow.lock().await;

    let file = match read_image_field(multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return Ok(rejected_upload(&state, &flow, &DentascanError::MissingFile));
        }
        Err(err) => return Ok(rejected_upload(&state, &flow, &err)),
    };

    info!(file_name = %file.file_name, size = file.bytes.len(), "Upload received");

    if let Err(err) = flow.select_file(file.file_name, file.content_type, file.bytes) {
        return Ok(rejected_upload(&state, &flow, &err));
    }

    if let Err(err) = flow.begin_analysis() {
        return Ok(rejected_upload(&state, &flow, &err));
    }

    let Some(selection) = flow.selection() else {
        return Ok(rejected_upload(&state, &flow, &DentascanError::MissingFile));
    };
    let file_name = selection.file_name.clone();
    let content_type = selection.content_type.clone();
    let bytes = selection.bytes.clone();

    let analysis = state
        .inference
        .submit_image(&file_name, &content_type, bytes)
        .await;

    // Brief pause so the loading frame does not flash away instantly
    tokio::time::sleep(CONTENT_REVEAL_DELAY).await;

    let handoff = match analysis {
        Ok(prediction) => flow.finish_analysis(prediction)?,
        Err(err) => {
            warn!(error = %err, "Analysis failed");
            flow.fail_analysis(err.to_string())?
        }
    };
    drop(flow);

    let result_id = state.handoffs.lock().await.deposit(handoff);
    info!(%result_id, "Analysis result ready");

    Ok(Redirect::to(&format!("/results/{result_id}")).into_response())
}

/// Handler for `POST /upload/recheck`.
///
/// Triggered by the retry button on the offline banner.
async fn handle_upload_recheck(State(state): State<Arc<AppState>>) -> Result<Redirect, PageError> {
    let mut flow = state.upload_flow.lock().await;

    if matches!(
        flow.status(),
        UploadStatus::Idle | UploadStatus::ServerOffline
    ) {
        probe_service_health(&state, &mut flow).await?;
    }

    Ok(Redirect::to("/upload"))
}

/// Handler for `GET /uploads/:id`.
///
/// Serves the preview bytes for the current selection. Unknown ids,
/// including ids of superseded selections, return 404.
async fn handle_upload_preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let flow = state.upload_flow.lock().await;

    match flow.selection() {
        Some(selection) if selection.id == id => (
            [(header::CONTENT_TYPE, selection.content_type.clone())],
            selection.bytes.clone(),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Handler for `GET /results/:id`.
///
/// Claims the handoff for the id and renders it. A missing handoff, which
/// includes reloading a results URL after it was already shown, renders
/// the no-results fallback.
async fn handle_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Html<String> {
    let handoff = state.handoffs.lock().await.claim(&id);

    let Some(handoff) = handoff else {
        return Html(pages::no_results_page());
    };

    let view = analysis_view(handoff);
    let analysis_html = AnalysisGenerator::new(&view).generate();
    Html(pages::results_page(&analysis_html))
}

/// Handler for `GET /learn`.
async fn handle_learn(Query(params): Query<LearnParams>) -> Html<String> {
    let tab = LearnTab::from_query(params.tab.as_deref());
    let query = params.q.unwrap_or_default();

    let conditions = filter_conditions(fixtures::conditions(), &query);
    let studies = filter_studies(fixtures::studies(), &query);

    Html(pages::learn_page(tab, &query, &conditions, &studies))
}

/// Handler for `GET /learn/:condition_id`.
async fn handle_condition(Path(condition_id): Path<String>) -> Response {
    match fixtures::condition_by_id(&condition_id) {
        Some(condition) => Html(pages::condition_page(condition)).into_response(),
        None => handle_not_found().await.into_response(),
    }
}

/// Handler for `GET /clinics`.
async fn handle_clinics(Query(params): Query<ClinicsParams>) -> Html<String> {
    let mode = ClinicView::from_query(params.view.as_deref());
    let query = params.q.unwrap_or_default();
    let specialty = params
        .specialty
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let clinics = filter_clinics(fixtures::clinics(), &query, specialty);
    let options = specialty_options(fixtures::clinics());
    let selected = params
        .selected
        .as_deref()
        .and_then(|id| clinics.iter().find(|clinic| clinic.id == id).copied());

    Html(pages::clinics_page(&ClinicsPageView {
        mode,
        query: &query,
        specialty,
        clinics: &clinics,
        specialty_options: &options,
        selected,
    }))
}

/// Fallback handler for unknown routes.
async fn handle_not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page()))
}

// ============================================================================
// API Handlers
// ============================================================================

/// Handler for `GET /api/clinics`.
///
/// Returns the map marker data for every clinic in the directory.
async fn handle_clinic_markers() -> Json<Vec<ClinicMarker>> {
    let markers = fixtures::clinics().iter().map(Clinic::marker).collect();
    Json(markers)
}

/// Handler for `GET /api/status`.
///
/// Reports the upload flow state for polling clients.
async fn handle_flow_status(State(state): State<Arc<AppState>>) -> Json<FlowStatusResponse> {
    let flow = state.upload_flow.lock().await;

    Json(FlowStatusResponse {
        status: flow.status(),
        server_health: flow.server_health(),
        has_selection: flow.selection().is_some(),
    })
}

// ============================================================================
// Upload Helpers
// ============================================================================

/// The file part pulled out of a multipart upload.
struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Reads the `file` field from a multipart upload.
///
/// Returns `Ok(None)` when the form carries no usable file.
async fn read_image_field(
    mut multipart: Multipart,
) -> Result<Option<UploadedFile>, DentascanError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .map(ToString::to_string)
            .unwrap_or_default();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

/// Runs one health probe and records the outcome on the flow.
async fn probe_service_health(
    state: &AppState,
    flow: &mut UploadFlow,
) -> Result<(), PageError> {
    flow.begin_health_check()?;

    match state.inference.check_health().await {
        Ok(_) => {
            info!("Segmentation service is online");
            flow.health_check_passed()?;
        }
        Err(err) => {
            warn!(error = %err, "Segmentation service health probe failed");
            flow.health_check_failed()?;
        }
    }

    Ok(())
}

/// Re-renders the upload page with a rejection message inline.
fn rejected_upload(state: &AppState, flow: &UploadFlow, err: &DentascanError) -> Response {
    info!(error = %err, "Upload rejected");
    Html(render_upload_page(state, flow, Some(err.to_string()))).into_response()
}

/// Builds the upload page view from the current flow.
///
/// `error_override` takes precedence over the error recorded on the flow,
/// for rejections that should not survive the current response.
fn render_upload_page(
    state: &AppState,
    flow: &UploadFlow,
    error_override: Option<String>,
) -> String {
    let status = match flow.server_health() {
        ServerHealth::Checking => ServerStatusView::Checking,
        ServerHealth::Online => ServerStatusView::Online,
        ServerHealth::Offline => ServerStatusView::Offline,
    };

    let selected = flow.selection().map(|selection| SelectedFileView {
        file_name: selection.file_name.clone(),
        size_bytes: selection.bytes.len() as u64,
        preview_path: selection.preview_path.clone(),
    });

    let error = error_override.or_else(|| flow.error().map(str::to_owned));

    pages::upload_page(&UploadPageView {
        status,
        selected,
        error,
        service_url: state.inference.base_url().to_string(),
    })
}

/// Converts a claimed handoff into the renderer's view model.
fn analysis_view(handoff: AnalysisHandoff) -> AnalysisView {
    if handoff.is_loading {
        return AnalysisView::loading();
    }
    if let Some(error) = handoff.error {
        return AnalysisView::failed(error, handoff.original_image);
    }
    match handoff.prediction {
        Some(prediction) => AnalysisView::completed(prediction, handoff.original_image),
        None => AnalysisView::empty(),
    }
}

// ============================================================================
// Tests
// ============================================================================
