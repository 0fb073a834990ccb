//! Shared types used across all pipeline stages.
//!
//! Two families live here:
//!
//! - The **curation store** ([`GalleryMetaData`], [`SavedMeta`], [`Meta`]):
//!   hand-edited between runs, read at the start of a run and rewritten at
//!   the end.
//! - The **gallery data** ([`GalleryData`], [`GalleryImage`],
//!   [`GalleryCollection`], [`ImageExif`]): fully regenerated every run and
//!   consumed by the site renderer.
//!
//! Field names are serialized in camelCase where the renderer expects it
//! (`captureDate`, `fNumber`, ...). The store keeps `title` and `description`
//! as explicit `null`s so a curator can see which fields are still open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Curated, human-editable facts about one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub collections: Vec<String>,
}

/// A [`Meta`] bound to the image it describes, as persisted between runs.
///
/// `path` is relative to the gallery root with `/` separators. It is the
/// identity used to match records against freshly discovered files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMeta {
    pub path: String,
    #[serde(default)]
    pub meta: Meta,
}

impl SavedMeta {
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            meta: Meta::default(),
        }
    }
}

/// The curation store file.
///
/// "No prior file" is modelled as `Option<GalleryMetaData>::None` by the
/// loader; a file that exists but lists nothing is `Some` with an empty `meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryMetaData {
    #[serde(default)]
    pub meta: Vec<SavedMeta>,
}

/// Camera attributes read from an image's EXIF block.
///
/// Every field is optional. An image without EXIF serializes as `exif: {}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageExif {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_model: Option<String>,
}

impl ImageExif {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolved metadata as published to the renderer. `title` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub collections: Vec<String>,
}

/// One image entry in the gallery data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// URL-style path (`/` separators), optionally prefixed per config.
    pub path: String,
    pub meta: ImageMeta,
    #[serde(default)]
    pub exif: ImageExif,
}

/// A logical grouping of images derived from a shared parent directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCollection {
    pub id: String,
    pub name: String,
}

/// The gallery data file. Never hand-edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryData {
    pub collections: Vec<GalleryCollection>,
    pub images: Vec<GalleryImage>,
}

/// A non-fatal event noticed while building the gallery.
///
/// Stages return these alongside their results; the caller decides how to
/// report them. None of them affect the exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No curated title; one was derived from the filename.
    MissingTitle(String),
    /// No curated description. Descriptions are never inferred.
    MissingDescription(String),
    /// No curated collections; the parent directory was used.
    MissingCollections(String),
    /// A stored record whose image no longer exists. It is dropped.
    OrphanedMetadata(String),
    /// A second stored record for a path already claimed. It is dropped.
    DuplicateMetadata(String),
}

impl Diagnostic {
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::MissingTitle(p)
            | Diagnostic::MissingDescription(p)
            | Diagnostic::MissingCollections(p)
            | Diagnostic::OrphanedMetadata(p)
            | Diagnostic::DuplicateMetadata(p) => p,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingTitle(p) => write!(f, "Didn't find a title for image: \"{p}\""),
            Diagnostic::MissingDescription(p) => {
                write!(f, "Didn't find a description for image: \"{p}\"")
            }
            Diagnostic::MissingCollections(p) => {
                write!(f, "Didn't find any collections for image: \"{p}\"")
            }
            Diagnostic::OrphanedMetadata(p) => write!(f, "Unused metadata for image \"{p}\""),
            Diagnostic::DuplicateMetadata(p) => {
                write!(f, "Duplicate metadata for image \"{p}\", keeping the first")
            }
        }
    }
}
