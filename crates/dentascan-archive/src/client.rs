//! HTTP client for the archive backend.
//!
//! This module provides the [`ArchiveClient`] struct covering the three
//! backend surfaces: account auth, table reads and writes, and object
//! storage for the scan images themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{ArchiveError, AuthSession, AuthUser, Result, ScanFinding, ScanRecord, ScanResultRow};

/// Default timeout applied to every archive request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bucket the scan images are stored in unless overridden.
pub const DEFAULT_STORAGE_BUCKET: &str = "scans";

/// `Accept` value that asks the REST API for one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Select expression that embeds each scan's findings in the same read.
const EMBED_RESULTS: &str = "*,scan_results(*)";

/// Serial component of generated object paths.
static OBJECT_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Client for the archive backend.
///
/// Requests authenticate with the publishable anon key; [`sign_out`] is the
/// only operation that takes a per-user access token.
///
/// [`sign_out`]: ArchiveClient::sign_out
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// Normalized backend base URL, without a trailing slash.
    base_url: String,
    /// Publishable key sent with every request.
    anon_key: String,
    /// Bucket holding the scan images.
    bucket: String,
    /// Timeout applied to every request.
    request_timeout: Duration,
}

impl ArchiveClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root, e.g. `https://project.example.co`
    /// * `anon_key` - Publishable key for the project
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::RequestSetup`] if `base_url` is not a valid
    /// absolute URL or the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/').to_string();

        reqwest::Url::parse(&trimmed)
            .map_err(|e| ArchiveError::request_setup(format!("invalid base URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ArchiveError::request_setup(e.to_string()))?;

        debug!(base_url = %trimmed, "Constructed archive client");

        Ok(Self {
            http,
            base_url: trimmed,
            anon_key: anon_key.into(),
            bucket: DEFAULT_STORAGE_BUCKET.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Overrides the storage bucket scan images are written to.
    #[must_use]
    pub fn with_storage_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the normalized backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the storage bucket in use.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Registers an account and its profile row.
    ///
    /// Sends `POST {base}/auth/v1/signup`, then inserts the matching
    /// `profiles` row carrying `full_name`. Deployments that auto-confirm
    /// accounts answer the signup with a full session; the user is extracted
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] when either the signup or the
    /// profile insert is rejected, [`ArchiveError::Unreachable`] when the
    /// backend does not answer, and [`ArchiveError::RequestSetup`] when the
    /// response cannot be decoded.
    #[instrument(skip_all)]
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthUser> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .request(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Signup rejected by backend");
            return Err(service_failure(status, &body));
        }

        let outcome = response
            .json::<SignUpResponse>()
            .await
            .map_err(|e| map_transport_error(&e))?;
        let user = match outcome {
            SignUpResponse::Session(session) => session.user,
            SignUpResponse::User(user) => user,
        };

        self.insert_profile(&user.id, email, full_name).await?;

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    /// Signs in with email and password.
    ///
    /// Sends `POST {base}/auth/v1/token?grant_type=password` and returns the
    /// granted session.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] with the backend's own text when the
    /// credentials are rejected, [`ArchiveError::Unreachable`] when the
    /// backend does not answer, and [`ArchiveError::RequestSetup`] when the
    /// response cannot be decoded.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .request(self.http.post(&url))
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Sign-in rejected by backend");
            return Err(service_failure(status, &body));
        }

        let session = response
            .json::<AuthSession>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Revokes a session.
    ///
    /// Sends `POST {base}/auth/v1/logout` with the session's access token.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] when the backend rejects the token
    /// and [`ArchiveError::Unreachable`] when the backend does not answer.
    #[instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Sign-out rejected by backend");
            return Err(service_failure(status, &body));
        }

        debug!("Signed out");
        Ok(())
    }

    // ========================================================================
    // Scans
    // ========================================================================

    /// Stores a scan image and records its `scans` row.
    ///
    /// The image is written to the configured bucket under a generated
    /// per-user path, then a row carrying the public object URL is inserted
    /// and returned.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] when the storage write or the row
    /// insert is rejected, [`ArchiveError::Unreachable`] when the backend
    /// does not answer, and [`ArchiveError::RequestSetup`] when the inserted
    /// row cannot be decoded.
    #[instrument(skip(self, bytes), fields(file_name = %file_name, size = bytes.len()))]
    pub async fn upload_scan(
        &self,
        user_id: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ScanRecord> {
        let path = object_path(user_id, file_name);
        let url = format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket);

        let response = self
            .request(self.http.post(&url))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Storage write rejected by backend");
            return Err(service_failure(status, &body));
        }

        let image_url = self.public_object_url(&path);
        let insert_url = format!("{}/rest/v1/scans", self.base_url);
        let row = serde_json::json!([{ "user_id": user_id, "image_url": image_url }]);

        let response = self
            .request(self.http.post(&insert_url))
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(&row)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Scan row insert rejected by backend");
            return Err(service_failure(status, &body));
        }

        let record = response
            .json::<ScanRecord>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        info!(scan_id = %record.id, "Scan archived");
        Ok(record)
    }

    /// Saves a batch of findings against a scan.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] when the insert is rejected,
    /// [`ArchiveError::Unreachable`] when the backend does not answer, and
    /// [`ArchiveError::RequestSetup`] when the inserted rows cannot be
    /// decoded.
    #[instrument(skip(self, findings), fields(scan_id = %scan_id, count = findings.len()))]
    pub async fn save_scan_results(
        &self,
        scan_id: &str,
        findings: &[ScanFinding],
    ) -> Result<Vec<ScanResultRow>> {
        let url = format!("{}/rest/v1/scan_results", self.base_url);
        let rows: Vec<_> = findings
            .iter()
            .map(|finding| ScanResultInsert {
                scan_id,
                condition_name: &finding.condition_name,
                severity: &finding.severity,
                description: finding.description.as_deref(),
                location: finding.location.as_deref(),
            })
            .collect();

        let response = self
            .request(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Findings insert rejected by backend");
            return Err(service_failure(status, &body));
        }

        let saved = response
            .json::<Vec<ScanResultRow>>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        info!(saved = saved.len(), "Findings archived");
        Ok(saved)
    }

    /// Reads a user's scans with their findings embedded, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] when the read is rejected,
    /// [`ArchiveError::Unreachable`] when the backend does not answer, and
    /// [`ArchiveError::RequestSetup`] when the rows cannot be decoded.
    #[instrument(skip(self))]
    pub async fn get_user_scans(&self, user_id: &str) -> Result<Vec<ScanRecord>> {
        let url = format!("{}/rest/v1/scans", self.base_url);
        let filter = format!("eq.{user_id}");

        let response = self
            .request(self.http.get(&url))
            .query(&[
                ("select", EMBED_RESULTS),
                ("user_id", filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Scan read rejected by backend");
            return Err(service_failure(status, &body));
        }

        let scans = response
            .json::<Vec<ScanRecord>>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        debug!(count = scans.len(), "Scans read");
        Ok(scans)
    }

    /// Reads one scan with its findings embedded.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Service`] when no scan carries the id or the
    /// read is rejected, [`ArchiveError::Unreachable`] when the backend does
    /// not answer, and [`ArchiveError::RequestSetup`] when the row cannot be
    /// decoded.
    #[instrument(skip(self))]
    pub async fn get_scan_by_id(&self, scan_id: &str) -> Result<ScanRecord> {
        let url = format!("{}/rest/v1/scans", self.base_url);
        let filter = format!("eq.{scan_id}");

        let response = self
            .request(self.http.get(&url))
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", EMBED_RESULTS), ("id", filter.as_str())])
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Scan lookup rejected by backend");
            return Err(service_failure(status, &body));
        }

        let scan = response
            .json::<ScanRecord>()
            .await
            .map_err(|e| map_transport_error(&e))?;

        Ok(scan)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Applies the headers and timeout shared by anon-key requests.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .timeout(self.request_timeout)
    }

    /// Inserts the `profiles` row created alongside a new account.
    async fn insert_profile(&self, user_id: &str, email: &str, full_name: &str) -> Result<()> {
        let url = format!("{}/rest/v1/profiles", self.base_url);
        let row = serde_json::json!([{
            "id": user_id,
            "email": email,
            "full_name": full_name,
        }]);

        let response = self
            .request(self.http.post(&url))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Profile insert rejected by backend");
            return Err(service_failure(status, &body));
        }

        Ok(())
    }

    /// Builds the public download URL for an object in the bucket.
    fn public_object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url, self.bucket
        )
    }
}

/// Signup answers differ by deployment: auto-confirming backends return a
/// session, confirmation-required backends return the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(AuthSession),
    User(AuthUser),
}

/// Insert-side shape of a `scan_results` row.
#[derive(Debug, Serialize)]
struct ScanResultInsert<'a> {
    scan_id: &'a str,
    condition_name: &'a str,
    severity: &'a str,
    description: Option<&'a str>,
    location: Option<&'a str>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Maps a transport-level failure onto the closed error taxonomy.
fn map_transport_error(err: &reqwest::Error) -> ArchiveError {
    if err.is_timeout() || err.is_connect() {
        return ArchiveError::Unreachable;
    }
    ArchiveError::request_setup(err.to_string())
}

/// Builds the `Service` error for a non-success response.
///
/// The backend surfaces disagree on their error key, so the candidates are
/// tried in order before falling back to the raw body and the status line.
fn service_failure(status: StatusCode, body: &str) -> ArchiveError {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| {
                    value
                        .get(key)
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned)
                })
        });

    let message = from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("the archive backend returned status {status}")
        } else {
            trimmed.to_owned()
        }
    });

    ArchiveError::Service { message }
}

/// Builds the object path for an uploaded scan image.
///
/// Paths carry the owning user id as a prefix and keep the upload's
/// extension; a millisecond timestamp plus a process-local serial keep
/// concurrent uploads apart.
fn object_path(user_id: &str, file_name: &str) -> String {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let serial = OBJECT_SERIAL.fetch_add(1, Ordering::Relaxed);
    let ext = file_name.rsplit_once('.').map_or("bin", |(_, ext)| ext);
    format!("{user_id}/{stamp:x}-{serial:x}.{ext}")
}
