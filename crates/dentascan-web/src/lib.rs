//! DentaScan web server.
//!
//! This crate owns everything between the browser and the rest of the
//! workspace: the HTTP router and page handlers, the upload flow state
//! machine that gates analysis on segmentation service health, the typed
//! handoff that carries one analysis result from the upload flow to the
//! results page, and the JSON configuration file the server is started
//! from.

pub mod config;
pub mod error;
pub mod handoff;
pub mod routes;
pub mod upload;

pub use config::{ArchiveConfig, Config, InferenceConfig, ServerConfig};
pub use error::{DentascanError, Result};
pub use handoff::{AnalysisHandoff, HandoffStore};
pub use routes::{create_router, AppState};
pub use upload::{ServerHealth, UploadFlow, UploadSelection, UploadStatus};
