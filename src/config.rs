use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub display: DisplayConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the manifest server
    pub base_url: String,

    /// Per-request timeout in seconds; unset means block until the server answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for status lines
    pub use_glyphs: bool,

    /// Colour status lines
    pub use_color: bool,

    pub icons: IconConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub success: String,
    pub failure: String,
    pub info: String,
    pub file: String,
    pub url: String,
    pub build: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Local manifest used by the load/validate/batch example
    pub manifest_file: PathBuf,

    /// Directory receiving converted outputs
    pub output_dir: PathBuf,

    /// Page scraped by the URL example
    pub sample_url: String,

    /// File name for the dynamically built manifest's HTML
    pub generated_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3009".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            use_color: true,
            icons: IconConfig::default(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            success: "✅".to_string(),
            failure: "❌".to_string(),
            info: "ℹ️".to_string(),
            file: "📄".to_string(),
            url: "🌐".to_string(),
            build: "🔧".to_string(),
        }
    }
}

impl IconConfig {
    /// ASCII alternatives for terminals without glyph support
    pub fn simple() -> Self {
        Self {
            success: "[OK]".to_string(),
            failure: "[X]".to_string(),
            info: "[i]".to_string(),
            file: "[F]".to_string(),
            url: "[URL]".to_string(),
            build: "[+]".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            manifest_file: PathBuf::from("../../manifests/examples/complete-page.yaml"),
            output_dir: PathBuf::from("./output"),
            sample_url: "https://example.com".to_string(),
            generated_file: "python-generated.html".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;

        // Apply simple mode if glyphs are disabled
        if !config.display.use_glyphs {
            config.display.icons = IconConfig::simple();
        }

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("manifest-client").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Manifest Client Configuration File
# Location: ~/.config/manifest-client/config.toml (Linux)
#           ~/Library/Application Support/manifest-client/config.toml (macOS)
#           %APPDATA%\manifest-client\config.toml (Windows)

[server]
# Base URL of the manifest server (start it with: npm start)
base_url = "http://localhost:3009"

# Request timeout in seconds (leave commented to wait indefinitely)
# timeout_secs = 30

[display]
# Use Unicode glyphs for status lines
# Set to false for ASCII-only mode (better compatibility)
use_glyphs = true

# Colour success/failure lines
use_color = true

# These are automatically set to ASCII when use_glyphs = false
[display.icons]
success = "✅"
failure = "❌"
info = "ℹ️"
file = "📄"
url = "🌐"
build = "🔧"

[demo]
# Local manifest loaded, validated and batch converted
manifest_file = "../../manifests/examples/complete-page.yaml"

# Where converted outputs are written
output_dir = "./output"

# Page converted to a manifest by the URL example
sample_url = "https://example.com"

# File name for the HTML of the dynamically built manifest
generated_file = "python-generated.html"
"#
        .to_string()
    }
}
