mod common;

use common::{unreachable_client, MockBehavior, MockServer};
use manifest_client::config::DemoConfig;
use manifest_client::demo;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn demo_config(temp_dir: &TempDir) -> DemoConfig {
    let manifest_file = temp_dir.path().join("complete-page.yaml");
    fs::write(
        &manifest_file,
        "metadata:\n  title: Complete Page\nstyles:\n  body: \"margin: 0\"\nstructure:\n  h1:\n    text: Welcome\n",
    )
    .unwrap();

    DemoConfig {
        manifest_file,
        output_dir: temp_dir.path().join("output"),
        sample_url: "https://example.com".to_string(),
        generated_file: "generated.html".to_string(),
    }
}

#[test]
fn test_demo_runs_all_examples() {
    let server = MockServer::start();
    let temp_dir = TempDir::new().unwrap();
    let config = demo_config(&temp_dir);

    let summary = demo::run(&server.client(), &config);

    assert!(summary.server_healthy);
    assert!(summary.batch.as_ref().unwrap().is_complete());
    assert_eq!(
        summary.url_manifest_keys,
        Some(vec![
            "metadata".to_string(),
            "styles".to_string(),
            "structure".to_string()
        ])
    );

    let generated = config.output_dir.join("generated.html");
    assert_eq!(summary.generated_file.as_deref(), Some(generated.as_path()));
    assert_eq!(
        fs::read_to_string(&generated).unwrap(),
        "<!-- html -->\nRust Generated Page"
    );
    assert!(config.output_dir.join("output.jsx").exists());
}

#[test]
fn test_demo_stops_when_server_down() {
    let temp_dir = TempDir::new().unwrap();
    let config = demo_config(&temp_dir);

    let summary = demo::run(&unreachable_client(), &config);

    assert!(!summary.server_healthy);
    assert!(summary.batch.is_none());
    assert!(!config.output_dir.exists());
}

#[test]
fn test_demo_skips_batch_for_invalid_manifest() {
    let server = MockServer::with_behavior(MockBehavior {
        validation: json!({ "valid": false, "errors": ["structure.h1 needs a style"] }),
        ..MockBehavior::default()
    });
    let temp_dir = TempDir::new().unwrap();
    let config = demo_config(&temp_dir);

    let summary = demo::run(&server.client(), &config);

    assert!(summary.batch.is_none());
    assert_eq!(summary.validation_errors, vec!["structure.h1 needs a style"]);
    assert!(!config.output_dir.join("output.html").exists());
    // The remaining examples still run
    assert!(summary.url_manifest_keys.is_some());
    assert!(summary.generated_file.is_some());
}

#[test]
fn test_demo_without_manifest_file_skips_first_example() {
    let server = MockServer::start();
    let temp_dir = TempDir::new().unwrap();
    let mut config = demo_config(&temp_dir);
    config.manifest_file = temp_dir.path().join("missing.yaml");

    let summary = demo::run(&server.client(), &config);

    assert!(summary.batch.is_none());
    assert!(server.requests_to("/api/validate").is_empty());
    assert!(summary.generated_file.is_some());
}
