//! Status lines printed for the user
//!
//! Every best-effort client operation reports what happened here in addition
//! to the `tracing` log, so a demo run reads like a progress transcript.

use crate::config::{DisplayConfig, IconConfig};
use crossterm::style::Stylize;

#[derive(Debug, Clone)]
pub struct Console {
    icons: IconConfig,
    color: bool,
    enabled: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(IconConfig::default(), true)
    }
}

impl Console {
    pub fn new(icons: IconConfig, color: bool) -> Self {
        Self {
            icons,
            color,
            enabled: true,
        }
    }

    pub fn from_display(display: &DisplayConfig) -> Self {
        Self::new(display.icons.clone(), display.use_color)
    }

    /// Console that prints nothing
    pub fn silent() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }

    pub fn success(&self, message: &str) {
        let line = format!("{} {}", self.icons.success, message);
        self.emit(if self.color { line.green().to_string() } else { line });
    }

    pub fn failure(&self, message: &str) {
        let line = format!("{} {}", self.icons.failure, message);
        self.emit(if self.color { line.red().to_string() } else { line });
    }

    pub fn info(&self, message: &str) {
        self.emit(format!("{} {}", self.icons.info, message));
    }

    /// Unadorned progress line, e.g. "Converting to html..."
    pub fn progress(&self, message: &str) {
        self.emit(message.to_string());
    }

    /// Section heading prefixed by one of the configured icons
    pub fn heading(&self, icon: &str, message: &str) {
        let line = format!("\n{} {}", icon, message);
        self.emit(if self.color { line.cyan().to_string() } else { line });
    }

    /// Indented list item
    pub fn detail(&self, message: &str) {
        self.emit(format!("  - {}", message));
    }

    fn emit(&self, line: String) {
        if self.enabled {
            println!("{}", line);
        }
    }
}
