//! Client for the Modular YAML Manifest server
//!
//! Loads page manifests from YAML files or URLs, validates them, and asks the
//! server to render them as HTML, React, Vue or PHP.

pub mod api_client;
pub mod config;
pub mod console;
pub mod demo;
pub mod error;
pub mod format;
pub mod logging;
pub mod manifest;
pub mod validation;

pub use api_client::{BatchReport, ManifestClient, ManifestSource, DEFAULT_SERVER_URL};
pub use error::{ClientError, Result};
pub use format::OutputFormat;
pub use manifest::Manifest;
pub use validation::ValidationResult;
