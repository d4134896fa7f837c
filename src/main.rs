use crossterm::style::Stylize;
use manifest_client::config::Config;
use manifest_client::{demo, logging, ManifestClient};

fn print_help() {
    println!("{}", "Manifest Client - Modular YAML Manifest System examples".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  manifest-client [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {} - Write a commented default config file",
        "--generate-config".green()
    );
    println!("  {}            - Show this help", "--help".green());
    println!();
    println!("Settings are read from {}", config_location());
    println!("Set RUST_LOG (e.g. RUST_LOG=debug) to also mirror the log on stderr.");
}

fn config_location() -> String {
    Config::get_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "the platform config directory".to_string())
}

fn generate_config() -> anyhow::Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    println!("Edit this file to point the client at your manifest server.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        return generate_config();
    }

    if let Some(unknown) = args.first() {
        eprintln!("{}", format!("Unknown argument: {}", unknown).red());
        print_help();
        std::process::exit(2);
    }

    if let Some(log_path) = logging::init_tracing() {
        eprintln!("📝 Logs will be written to: {}", log_path.display());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Could not read config, using defaults: {}", e);
            Config::default()
        }
    };

    let client = ManifestClient::from_config(&config)?;
    tracing::info!("Using manifest server at {}", client.base_url());

    let summary = demo::run(&client, &config.demo);
    if !summary.server_healthy {
        std::process::exit(1);
    }

    Ok(())
}
