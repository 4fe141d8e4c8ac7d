//! Shell configuration.
//!
//! Loaded from a TOML file. Every field has a default, so an empty file (or
//! no file at all) yields a full-featured shell.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PicoshError, Result};

/// Tunables for one shell session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShellConfig {
    /// Text printed before the editable line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Line capacity including the terminator slot (at most `line_max - 1`
    /// characters are editable).
    #[serde(default = "default_line_max")]
    pub line_max: usize,
    /// Number of past lines kept for recall. 0 disables history.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Maximum number of arguments handed to a command, name included.
    #[serde(default = "default_max_args")]
    pub max_args: usize,
    /// Whether Tab completes command names.
    #[serde(default = "default_autocomplete")]
    pub autocomplete: bool,
}

fn default_prompt() -> String {
    "picosh> ".to_string()
}
fn default_line_max() -> usize {
    128
}
fn default_history_size() -> usize {
    8
}
fn default_max_args() -> usize {
    8
}
fn default_autocomplete() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            line_max: default_line_max(),
            history_size: default_history_size(),
            max_args: default_max_args(),
            autocomplete: default_autocomplete(),
        }
    }
}

impl ShellConfig {
    /// Configuration without history or completion.
    pub fn minimal() -> Self {
        Self {
            history_size: 0,
            autocomplete: false,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&src)?;
        log::info!("Loaded shell config from {}", path.display());
        Ok(config)
    }

    /// Reject values the line editor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.line_max < 2 {
            return Err(PicoshError::Config(format!(
                "line_max must be at least 2, got {}",
                self.line_max
            )));
        }
        if self.max_args == 0 {
            return Err(PicoshError::Config("max_args must be at least 1".into()));
        }
        Ok(())
    }

    /// Whether history recall is enabled.
    pub fn history_enabled(&self) -> bool {
        self.history_size > 0
    }
}
