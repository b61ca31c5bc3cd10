//! Integration tests for the DentaScan page routes.
//!
//! These tests boot the full router on a real TCP listener and drive it
//! over HTTP with reqwest, covering the read-only pages: home, the
//! education section, the clinic directory, and the JSON endpoints
//! behind the clinic map.

use dentascan_content::{fixtures, ClinicMarker};
use dentascan_web::{create_router, AppState, Config};

/// Builds a config whose segmentation service URL points at a closed port.
///
/// The read-only pages never talk to the service; a dead address keeps
/// these tests hermetic even when a real service is running locally.
fn offline_config() -> Config {
    let mut config = Config::default();
    config.inference.base_url = "http://127.0.0.1:1".to_string();
    config.inference.health_timeout_secs = 1;
    config
}

/// Spawns the app on an ephemeral port and returns its base URL.
async fn spawn_app(config: Config) -> String {
    let state = AppState::new(config).expect("Failed to build app state");
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    format!("http://{addr}")
}

/// Fetches a page and returns its status and body text.
async fn get_text(url: &str) -> (reqwest::StatusCode, String) {
    let response = reqwest::get(url).await.expect("Request failed");
    let status = response.status();
    let body = response.text().await.expect("Failed to read body");
    (status, body)
}

// ============================================================================
// Navigation Tests
// ============================================================================

/// Tests that the home page serves the landing content.
#[tokio::test]
async fn test_home_page_serves() {
    let base = spawn_app(offline_config()).await;
    let (status, body) = get_text(&format!("{base}/")).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("AI-Powered Dental Disease Detection"));
    assert!(body.contains("Meet Our Team"));
}

/// Tests that the home page lists every team member.
#[tokio::test]
async fn test_home_page_lists_every_team_member() {
    let base = spawn_app(offline_config()).await;
    let (_, body) = get_text(&format!("{base}/")).await;

    for member in fixtures::team() {
        assert!(
            body.contains(&member.name),
            "Home page missing team member: {}",
            member.name
        );
    }
}

/// Tests that every top-level navigation target resolves.
#[tokio::test]
async fn test_nav_targets_all_resolve() {
    let base = spawn_app(offline_config()).await;

    for path in ["/", "/upload", "/learn", "/clinics"] {
        let (status, _) = get_text(&format!("{base}{path}")).await;
        assert_eq!(status, reqwest::StatusCode::OK, "path: {path}");
    }
}

/// Tests that an unknown route falls through to the 404 page.
#[tokio::test]
async fn test_unknown_route_returns_not_found_page() {
    let base = spawn_app(offline_config()).await;
    let (status, body) = get_text(&format!("{base}/no-such-page")).await;

    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"));
}

// ============================================================================
// Education Section Tests
// ============================================================================

/// Tests that the search box narrows the condition list.
#[tokio::test]
async fn test_learn_search_narrows_conditions() {
    let base = spawn_app(offline_config()).await;
    let (status, body) = get_text(&format!("{base}/learn?q=caries")).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(body.contains("Dental Caries (Cavities)"));
    assert!(!body.contains("Gingivitis"));
}

/// Tests that the studies tab lists research publications.
#[tokio::test]
async fn test_learn_studies_tab_lists_publications() {
    let base = spawn_app(offline_config()).await;
    let (_, body) = get_text(&format!("{base}/learn?tab=studies")).await;

    assert!(body.contains("Deep learning for caries detection"));
}

/// Tests that every condition fixture has a working detail page.
#[tokio::test]
async fn test_condition_detail_page_for_every_fixture() {
    let base = spawn_app(offline_config()).await;

    for condition in fixtures::conditions() {
        let (status, body) = get_text(&format!("{base}/learn/{}", condition.id)).await;
        assert_eq!(status, reqwest::StatusCode::OK, "condition: {}", condition.id);
        assert!(
            body.contains(&condition.detail.title),
            "condition: {}",
            condition.id
        );
    }
}

/// Tests that an unknown condition id renders the 404 page.
#[tokio::test]
async fn test_unknown_condition_returns_not_found() {
    let base = spawn_app(offline_config()).await;
    let (status, body) = get_text(&format!("{base}/learn/toothache")).await;

    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"));
}

// ============================================================================
// Clinic Directory Tests
// ============================================================================

/// Tests that the specialty dropdown filters the directory.
#[tokio::test]
async fn test_clinic_directory_filters_by_specialty() {
    let base = spawn_app(offline_config()).await;
    let (_, body) = get_text(&format!("{base}/clinics?specialty=Orthodontics")).await;

    assert!(body.contains("Jakarta Orthodontic Center"));
    assert!(!body.contains("Family Dental Clinic"));
}

/// Tests that the map view highlights the clinic picked in the sidebar.
#[tokio::test]
async fn test_clinic_map_highlights_selection() {
    let base = spawn_app(offline_config()).await;
    let (_, body) = get_text(&format!("{base}/clinics?view=map&selected=clinic-002")).await;

    assert!(body.contains("sidebar-active"));
    assert!(body.contains("Smile Care Clinic"));
}

// ============================================================================
// JSON Endpoint Tests
// ============================================================================

/// Tests that the marker endpoint returns one marker per clinic.
#[tokio::test]
async fn test_clinic_markers_api_returns_all_clinics() {
    let base = spawn_app(offline_config()).await;
    let response = reqwest::get(format!("{base}/api/clinics"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let markers: Vec<ClinicMarker> = response.json().await.expect("Failed to parse markers");
    assert_eq!(markers.len(), fixtures::clinics().len());
    assert!(markers.iter().any(|m| m.id == "clinic-001"));
}

/// Tests that a fresh app reports an idle upload flow.
#[tokio::test]
async fn test_flow_status_api_starts_idle() {
    let base = spawn_app(offline_config()).await;
    let response = reqwest::get(format!("{base}/api/status"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let value: serde_json::Value = response.json().await.expect("Failed to parse status");
    assert_eq!(value["status"], "idle");
    assert_eq!(value["serverHealth"], "checking");
    assert_eq!(value["hasSelection"], false);
}
