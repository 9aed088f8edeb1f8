//! Configuration
//!
//! Precedence, lowest first: `defaults/musicgrid.default.toml` (compiled in),
//! `./musicgrid.toml`, the file given with `--config`, then individual command
//! line flags. Every key has a default, so user files may be partial.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/musicgrid.default.toml");

/// Config file picked up from the working directory when present
pub const LOCAL_CONFIG_FILE: &str = "musicgrid.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    pub output: OutputConfig,
    pub watch: WatchConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Path to a stylesheet; empty selects the bundled one
    pub stylesheet: String,
}

impl OutputConfig {
    pub fn stylesheet_path(&self) -> Option<&Path> {
        let trimmed = self.stylesheet.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    pub poll_interval_ms: u64,
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_port_attempts: u16,
}

/// Builds a [`GridConfig`] from the embedded defaults plus whatever layers the
/// caller stacks on top. Later layers win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Stack a TOML file that must exist (the `--config` flag)
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml_layer(path.as_ref(), true)
    }

    /// Stack a TOML file if present, such as `./musicgrid.toml`
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml_layer(path.as_ref(), false)
    }

    fn with_toml_layer(mut self, path: &Path, required: bool) -> Self {
        let layer = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(layer);
        self
    }

    /// Force one dotted key, e.g. `server.port`, above every file layer
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<GridConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The configuration with no user layers
pub fn load_defaults() -> Result<GridConfig, ConfigError> {
    Loader::new().build()
}
