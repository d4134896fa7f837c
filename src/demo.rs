//! Example session against a running manifest server
//!
//! Three independent examples run after a health check: convert a local
//! manifest into every format, scrape a URL into a manifest, and render a
//! manifest built in code. An empty manifest or a failed validation stops
//! only the example it belongs to.

use crate::api_client::{BatchReport, ManifestClient};
use crate::config::DemoConfig;
use crate::format::OutputFormat;
use crate::manifest::Manifest;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// What a demo run accomplished
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoSummary {
    pub server_healthy: bool,
    /// Result of the local manifest example, if the manifest file existed
    pub batch: Option<BatchReport>,
    /// Validation errors reported for the local manifest
    pub validation_errors: Vec<String>,
    /// Top-level keys of the manifest scraped from the sample URL
    pub url_manifest_keys: Option<Vec<String>>,
    /// HTML written for the dynamically built manifest
    pub generated_file: Option<PathBuf>,
}

/// Page description assembled in code rather than loaded from YAML
pub fn sample_manifest() -> Manifest {
    let value = json!({
        "metadata": {
            "title": "Rust Generated Page",
            "description": "Page created dynamically from Rust"
        },
        "styles": {
            "container": "max-width: 800px; margin: 0 auto; padding: 20px;",
            "header": "background: #007acc; color: white; padding: 20px; border-radius: 8px;",
            "content": "margin: 20px 0; line-height: 1.6;"
        },
        "structure": {
            "div": {
                "style": "container",
                "children": [
                    {
                        "h1": {
                            "style": "header",
                            "text": "Rust Integration Example"
                        }
                    },
                    {
                        "p": {
                            "style": "content",
                            "text": "This page was generated dynamically using Rust and the Modular YAML Manifest System!"
                        }
                    }
                ]
            }
        }
    });

    match value {
        serde_json::Value::Object(map) => Manifest::from_map(map),
        _ => Manifest::new(),
    }
}

pub fn run(client: &ManifestClient, config: &DemoConfig) -> DemoSummary {
    let console = client.console();
    let icons = console.icons().clone();
    let mut summary = DemoSummary::default();

    if !client.health_check() {
        console.failure("Manifest server is not running!");
        console.progress("Start it with: npm start");
        return summary;
    }
    summary.server_healthy = true;
    console.success("Connected to manifest server");

    // Example 1: load, validate and convert a local manifest
    if config.manifest_file.exists() {
        console.heading(
            &icons.file,
            &format!("Loading manifest: {}", config.manifest_file.display()),
        );
        let manifest = client.load_manifest(&config.manifest_file.to_string_lossy());

        if !manifest.is_empty() {
            let validation = client.validate_manifest(&manifest);
            if validation.is_valid() {
                console.success("Manifest is valid");
                let report = client.batch_convert(&manifest, &config.output_dir);
                print_batch_summary(client, &report);
                summary.batch = Some(report);
            } else {
                console.failure("Manifest validation failed:");
                for error in &validation.errors {
                    console.detail(error);
                }
                summary.validation_errors = validation.errors;
            }
        }
    } else {
        info!(
            "Skipping local manifest example, {} not found",
            config.manifest_file.display()
        );
    }

    // Example 2: scrape a URL into a manifest
    console.heading(&icons.url, "Converting URL to manifest...");
    let url_manifest = client.convert_url_to_manifest(&config.sample_url);
    if !url_manifest.is_empty() {
        let keys: Vec<String> = url_manifest.keys().iter().map(|k| k.to_string()).collect();
        console.success("URL converted to manifest");
        console.progress(&format!("Structure: {:?}", keys));
        summary.url_manifest_keys = Some(keys);
    }

    // Example 3: render a manifest built in code
    console.heading(&icons.build, "Creating dynamic manifest...");
    let html = client.convert_to_format(&sample_manifest(), OutputFormat::Html);
    if !html.is_empty() {
        let path = config.output_dir.join(&config.generated_file);
        let written = fs::create_dir_all(&config.output_dir).and_then(|_| fs::write(&path, html));
        match written {
            Ok(()) => {
                console.success("Dynamic manifest converted and saved");
                summary.generated_file = Some(path);
            }
            Err(e) => console.failure(&format!("Could not write {}: {}", path.display(), e)),
        }
    }

    summary
}

fn print_batch_summary(client: &ManifestClient, report: &BatchReport) {
    if !client.console().is_enabled() {
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Format").add_attribute(Attribute::Bold),
        Cell::new("Result").add_attribute(Attribute::Bold),
    ]);

    for format in OutputFormat::ALL {
        let result = match (report.written_path(format), report.failure(format)) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(message)) => format!("failed: {}", message),
            (None, None) => String::new(),
        };
        table.add_row(vec![format.to_string(), result]);
    }

    println!("{table}");
}
