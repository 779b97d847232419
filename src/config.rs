//! Configuration loading.
//!
//! Settings come from an optional `grafo.toml` in the working directory, or
//! from a file passed explicitly. Command-line flags are applied on top by
//! the binary.
//!
//! ```toml
//! input = "input.txt"
//! directed = false
//! uppercase = false
//! default_weight = 1.0
//! log_level = "warn"
//!
//! [html]
//! title = "Graph Visualization"
//! height = 600
//! width = 800
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, level_filters::LevelFilter};

use crate::export::HtmlOptions;
use crate::graph::{GraphKind, DEFAULT_WEIGHT};
use crate::parser::LoadOptions;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "grafo.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Graph file opened by the interactive menu
    pub input: PathBuf,
    pub directed: bool,
    /// Uppercase vertex names while loading
    pub uppercase: bool,
    /// Weight for edges declared without one
    pub default_weight: f64,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    pub html: HtmlOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.txt"),
            directed: false,
            uppercase: false,
            default_weight: DEFAULT_WEIGHT,
            log_level: "warn".to_string(),
            html: HtmlOptions::default(),
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and validates a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Checks values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_weight.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "default_weight must be a finite number, got {}",
                self.default_weight
            )));
        }
        if self.html.height == 0 || self.html.width == 0 {
            return Err(ConfigError::Invalid(
                "html height and width must be positive".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    /// The configured log level.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Invalid(format!("unknown log_level '{}'", self.log_level)))
    }

    pub fn kind(&self) -> GraphKind {
        GraphKind::from_directed(self.directed)
    }

    /// Parser options derived from these settings.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            kind: self.kind(),
            uppercase: self.uppercase,
            default_weight: self.default_weight,
        }
    }
}
