//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.donorflat.toml` files.

use crate::transform::MissingPhotoPolicy;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".donorflat.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Record transformation settings.
    #[serde(default)]
    pub transform: TransformConfig,

    /// Output encoding settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Donor profile file to read.
    #[serde(default = "default_input")]
    pub input: String,

    /// File the flattened records are written to.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> String {
    "donorprofiles.json".to_string()
}

fn default_output() -> String {
    "a2_profiles.json".to_string()
}

/// Record transformation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Behaviour for donors without photos: "empty" or "fail".
    #[serde(default)]
    pub missing_photo: MissingPhotoPolicy,
}

/// Output encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print with two-space indentation.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.general.input = input.to_string_lossy().into_owned();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.to_string_lossy().into_owned();
        }

        if let Some(policy) = args.missing_photo {
            self.transform.missing_photo = policy;
        }

        if args.compact {
            self.output.pretty = false;
        }
    }

    /// Checks the resolved settings before a run.
    ///
    /// The input and output must name different files, wherever each one
    /// was set.
    pub fn validate(&self) -> Result<()> {
        if Path::new(&self.general.input) == Path::new(&self.general.output) {
            bail!(
                "Input and output must be different files: {}",
                self.general.input
            );
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
