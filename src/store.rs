//! Reading and writing the two data files.
//!
//! Both live in the gallery root under the names set in
//! [`OutputConfig`](crate::config::OutputConfig):
//!
//! | File | Default name | Role |
//! |---|---|---|
//! | Curation store | `metadata.yaml` | [`GalleryMetaData`], hand-edited between runs |
//! | Gallery data | `gallery.yaml` | [`GalleryData`], read by the site renderer |
//!
//! The store is loaded at the start of a run (stage 1) and both files are
//! rewritten at the end (stage 6). Writes are plain overwrites, metadata
//! first. If the gallery write fails after the metadata write succeeded the
//! two files describe different runs until the next successful one.

use crate::config::{OutputConfig, OutputFormat};
use crate::types::{GalleryData, GalleryMetaData};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Failed to serialize {path}: {message}")]
    Serialize { path: PathBuf, message: String },
}

/// Load the curation store from the gallery root.
///
/// Returns `Ok(None)` when no store file exists yet. A file that exists but
/// holds only whitespace is an empty store, not a missing one.
pub fn load_metadata(
    root: &Path,
    output: &OutputConfig,
) -> Result<Option<GalleryMetaData>, StoreError> {
    let path = root.join(&output.metadata_file);
    if !path.exists() {
        log::debug!("No metadata store at {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Some(GalleryMetaData::default()));
    }

    let store: GalleryMetaData = decode(output.format, &content)
        .map_err(|message| StoreError::Parse { path: path.clone(), message })?;
    log::debug!("Loaded {} records from {}", store.meta.len(), path.display());
    Ok(Some(store))
}

/// Overwrite the curation store. Returns the path written.
pub fn write_metadata(
    root: &Path,
    output: &OutputConfig,
    store: &GalleryMetaData,
) -> Result<PathBuf, StoreError> {
    write_file(&root.join(&output.metadata_file), output.format, store)
}

/// Overwrite the gallery data file. Returns the path written.
pub fn write_gallery(
    root: &Path,
    output: &OutputConfig,
    gallery: &GalleryData,
) -> Result<PathBuf, StoreError> {
    write_file(&root.join(&output.gallery_file), output.format, gallery)
}

fn write_file<T: Serialize>(
    path: &Path,
    format: OutputFormat,
    value: &T,
) -> Result<PathBuf, StoreError> {
    let content = encode(format, value).map_err(|message| StoreError::Serialize {
        path: path.to_path_buf(),
        message,
    })?;
    fs::write(path, content).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

fn decode<T: DeserializeOwned>(format: OutputFormat, content: &str) -> Result<T, String> {
    match format {
        OutputFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

fn encode<T: Serialize>(format: OutputFormat, value: &T) -> Result<String, String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
    }
}
