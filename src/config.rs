//! Generator configuration.
//!
//! An optional `gallery-meta.toml` in the gallery root overrides the stock
//! defaults. The file is sparse: specify only what you want to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! format = "yaml"                  # "yaml" or "json"
//! metadata_file = "metadata.yaml"  # Curation store, hand-edited between runs
//! gallery_file = "gallery.yaml"    # Generated gallery data, never hand-edited
//! image_path_prefix = ""           # Prepended to every image path in gallery data
//!
//! [discovery]
//! extensions = ["jpg", "jpeg", "png"]  # Matched case-insensitively
//!
//! [processing]
//! max_processes = 4                # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the gallery root.
pub const CONFIG_FILENAME: &str = "gallery-meta.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Output file names, format and path prefix.
    pub output: OutputConfig,
    /// Which files count as images.
    pub discovery: DiscoveryConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.metadata_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.metadata_file must not be empty".into(),
            ));
        }
        if self.output.gallery_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.gallery_file must not be empty".into(),
            ));
        }
        if self.output.metadata_file == self.output.gallery_file {
            return Err(ConfigError::Validation(
                "output.metadata_file and output.gallery_file must differ".into(),
            ));
        }
        if self.discovery.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.extensions must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Serialization format for both produced files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub metadata_file: String,
    pub gallery_file: String,
    /// Prefix joined onto each image's relative path in the gallery data,
    /// e.g. `"src/assets/gallery"` when the renderer resolves from the project root.
    pub image_path_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Yaml,
            metadata_file: "metadata.yaml".to_string(),
            gallery_file: "gallery.yaml".to_string(),
            image_path_prefix: String::new(),
        }
    }
}

/// Image discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// File extensions (without the dot) treated as images.
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel per-image workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `gallery-meta.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a gallery root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gallery-meta.toml`.
///
/// Used by the `--gen-config` CLI flag.
pub fn stock_config_toml() -> &'static str {
    r##"# gallery-meta configuration
# ==========================
#
# Place this file as gallery-meta.toml in the gallery root. Every key is
# optional; omitted keys keep the defaults shown here.

[output]
# Serialization format for both produced files: "yaml" or "json".
format = "yaml"
# Curation store. Edit titles, descriptions and collections here between runs.
metadata_file = "metadata.yaml"
# Generated gallery data read by the site renderer. Rewritten every run.
gallery_file = "gallery.yaml"
# Prepended to every image path written to the gallery data.
image_path_prefix = ""

[discovery]
# File extensions treated as images (case-insensitive, no leading dot).
extensions = ["jpg", "jpeg", "png"]

[processing]
# Maximum parallel per-image workers.
# Omit to use all CPU cores. Values above the core count are clamped.
# max_processes = 4
"##
}
