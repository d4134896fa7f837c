use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target representation the server can render a manifest into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    React,
    Vue,
    Php,
}

impl OutputFormat {
    /// Every supported format, in batch conversion order
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Html,
        OutputFormat::React,
        OutputFormat::Vue,
        OutputFormat::Php,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::React => "react",
            OutputFormat::Vue => "vue",
            OutputFormat::Php => "php",
        }
    }

    /// File extension used when saving converted output
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::React => "jsx",
            other => other.as_str(),
        }
    }

    /// Server path of the converter for this format
    pub fn endpoint(&self) -> String {
        format!("/api/convert/manifest-to-{}", self.as_str())
    }

    /// File name written by batch conversion, e.g. `output.jsx`
    pub fn output_file_name(&self) -> String {
        format!("output.{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "react" => Ok(OutputFormat::React),
            "vue" => Ok(OutputFormat::Vue),
            "php" => Ok(OutputFormat::Php),
            _ => Err(ClientError::UnsupportedFormat(s.to_string())),
        }
    }
}
