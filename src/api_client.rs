//! Blocking client for the manifest conversion server
//!
//! Operations come in two flavours. The `try_*` methods return a
//! [`Result`] and never print; the unprefixed methods wrap them in the
//! best-effort policy used by the demo: log the failure, print a status
//! line, and hand back an empty/false/error-shaped value instead of an error.

use crate::console::Console;
use crate::error::{ClientError, Result};
use crate::format::OutputFormat;
use crate::manifest::Manifest;
use crate::validation::ValidationResult;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3009";

const HEALTH_PATH: &str = "/health";
const URL_TO_MANIFEST_PATH: &str = "/api/convert/url-to-manifest";
const VALIDATE_PATH: &str = "/api/validate";

/// Where a manifest comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Scraped by the server
    Url(String),
    /// Parsed locally as YAML
    File(PathBuf),
}

impl ManifestSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            ManifestSource::Url(source.to_string())
        } else {
            ManifestSource::File(PathBuf::from(source))
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, ManifestSource::Url(_))
    }
}

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    manifest: &'a Manifest,
    options: &'a Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct UrlRequest<'a> {
    url: &'a str,
}

/// Outcome of converting one manifest into every format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub written: Vec<(OutputFormat, PathBuf)>,
    pub failed: Vec<(OutputFormat, String)>,
}

impl BatchReport {
    /// True when every format was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn written_path(&self, format: OutputFormat) -> Option<&Path> {
        self.written
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, path)| path.as_path())
    }

    pub fn failure(&self, format: OutputFormat) -> Option<&str> {
        self.failed
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, message)| message.as_str())
    }

    fn fail_all(message: &str) -> Self {
        Self {
            written: Vec::new(),
            failed: OutputFormat::ALL
                .iter()
                .map(|f| (*f, message.to_string()))
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct ManifestClient {
    base_url: String,
    client: Client,
    console: Console,
}

impl ManifestClient {
    /// Client without a request timeout, printing status lines with default glyphs
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        // reqwest's blocking client defaults to 30s; None really means no timeout
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            console: Console::default(),
        })
    }

    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let timeout = config.server.timeout_secs.map(Duration::from_secs);
        Ok(Self::with_timeout(&config.server.base_url, timeout)?
            .with_console(Console::from_display(&config.display)))
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send()?;
        Self::ensure_success(response)
    }

    // ---- strict operations ----

    /// `Ok` iff `/health` answers with a success status
    pub fn try_health_check(&self) -> Result<()> {
        let url = self.url(HEALTH_PATH);
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        Self::ensure_success(response).map(|_| ())
    }

    /// Load from a URL (one server round trip) or a local YAML file (no request)
    pub fn try_load_manifest(&self, source: &str) -> Result<Manifest> {
        match ManifestSource::parse(source) {
            ManifestSource::Url(url) => self.try_convert_url_to_manifest(&url),
            ManifestSource::File(path) => {
                debug!("Reading manifest from {}", path.display());
                Manifest::from_yaml_file(&path)
            }
        }
    }

    /// Render `manifest` in `format`, returning the raw response body
    pub fn try_convert_to_format(&self, manifest: &Manifest, format: OutputFormat) -> Result<String> {
        let options = Map::new();
        let request = ConvertRequest {
            manifest,
            options: &options,
        };
        let response = self.post_json(&format.endpoint(), &request)?;
        Ok(response.text()?)
    }

    pub fn try_convert_url_to_manifest(&self, url: &str) -> Result<Manifest> {
        let response = self.post_json(URL_TO_MANIFEST_PATH, &UrlRequest { url })?;
        let body = response.text()?;
        Manifest::from_json_str(&body)
    }

    pub fn try_validate_manifest(&self, manifest: &Manifest) -> Result<ValidationResult> {
        let response = self.post_json(VALIDATE_PATH, manifest)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Convert into every format and save each result under `output_dir`.
    ///
    /// Fails only if `output_dir` cannot be created; per-format failures,
    /// including an empty conversion result, are collected in the report and
    /// never stop the loop.
    pub fn try_batch_convert(&self, manifest: &Manifest, output_dir: &Path) -> Result<BatchReport> {
        self.run_batch(manifest, output_dir, &Console::silent())
    }

    fn run_batch(&self, manifest: &Manifest, output_dir: &Path, console: &Console) -> Result<BatchReport> {
        fs::create_dir_all(output_dir).map_err(|e| ClientError::io(output_dir, e))?;

        let mut report = BatchReport::default();
        for format in OutputFormat::ALL {
            console.progress(&format!("Converting to {}...", format));
            match self.convert_and_save(manifest, format, output_dir) {
                Ok(path) => {
                    info!("Saved {} output to {}", format, path.display());
                    console.success(&format!("Saved: {}", path.display()));
                    report.written.push((format, path));
                }
                Err(e) => {
                    warn!("Failed to convert to {}: {}", format, e);
                    console.failure(&format!("Failed to convert to {}: {}", format, e));
                    report.failed.push((format, e.to_string()));
                }
            }
        }
        Ok(report)
    }

    fn convert_and_save(&self, manifest: &Manifest, format: OutputFormat, output_dir: &Path) -> Result<PathBuf> {
        let content = self.try_convert_to_format(manifest, format)?;
        if content.is_empty() {
            return Err(ClientError::EmptyOutput(format));
        }
        save_output(output_dir, format, &content)
    }

    // ---- best-effort operations ----

    pub fn health_check(&self) -> bool {
        match self.try_health_check() {
            Ok(()) => true,
            Err(e) => {
                debug!("Health check against {} failed: {}", self.base_url, e);
                false
            }
        }
    }

    /// Returns an empty manifest when the source cannot be loaded
    pub fn load_manifest(&self, source: &str) -> Manifest {
        self.try_load_manifest(source).unwrap_or_else(|e| {
            self.report_error(&format!("Error loading manifest: {}", e));
            Manifest::new()
        })
    }

    /// Returns an empty string when the conversion fails
    pub fn convert_to_format(&self, manifest: &Manifest, format: OutputFormat) -> String {
        self.try_convert_to_format(manifest, format)
            .unwrap_or_else(|e| {
                self.report_error(&format!("Error converting to {}: {}", format, e));
                String::new()
            })
    }

    pub fn convert_url_to_manifest(&self, url: &str) -> Manifest {
        self.try_convert_url_to_manifest(url).unwrap_or_else(|e| {
            self.report_error(&format!("Error converting URL to manifest: {}", e));
            Manifest::new()
        })
    }

    /// Failures come back as `valid: false` carrying the failure message
    pub fn validate_manifest(&self, manifest: &Manifest) -> ValidationResult {
        self.try_validate_manifest(manifest).unwrap_or_else(|e| {
            self.report_error(&format!("Error validating manifest: {}", e));
            ValidationResult::failed(e.to_string())
        })
    }

    /// Convert into every format, printing progress and saving non-empty results
    pub fn batch_convert(&self, manifest: &Manifest, output_dir: &Path) -> BatchReport {
        match self.run_batch(manifest, output_dir, &self.console) {
            Ok(report) => report,
            Err(e) => {
                let message = e.to_string();
                self.report_error(&format!("Cannot create output directory: {}", message));
                BatchReport::fail_all(&message)
            }
        }
    }

    fn report_error(&self, message: &str) {
        error!("{}", message);
        self.console.failure(message);
    }
}

fn save_output(output_dir: &Path, format: OutputFormat, content: &str) -> Result<PathBuf> {
    let path = output_dir.join(format.output_file_name());
    fs::write(&path, content).map_err(|e| ClientError::io(&path, e))?;
    Ok(path)
}
