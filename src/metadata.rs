//! Per-image field inference.
//!
//! Each image's curated [`Meta`] comes from the store (or is empty for a new
//! file). Missing fields are filled in as follows:
//!
//! - **Title**: curated title → caption of the filename stem
//!   (`my_photo-01.jpg` → "My Photo 01") → raw stem. The derived title is
//!   written back into the store, so the next run treats it as curated and
//!   the curator can simply edit it.
//!
//! - **Collections**: curated list → the image's parent directory relative to
//!   the gallery root (`foo/bar/x.jpg` → `["foo/bar"]`). Images at the root
//!   get `[]`. Also written back.
//!
//! - **Description**: curated only. A missing description is reported but
//!   never invented.
//!
//! Every fallback emits a [`Diagnostic`]. They are informational and never
//! stop the run.

use crate::naming::display_name;
use crate::scan::DiscoveredImage;
use crate::types::{Diagnostic, ImageMeta, Meta, SavedMeta};

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// The outcome of filling in one image's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    /// Store record with derived title/collections written back.
    pub saved: SavedMeta,
    /// Resolved metadata for the gallery data file.
    pub meta: ImageMeta,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fill in missing title and collections for one image.
pub fn infer_fields(image: &DiscoveredImage, mut saved: SavedMeta) -> Inferred {
    let mut diagnostics = Vec::new();
    let Meta {
        title,
        description,
        collections,
    } = &mut saved.meta;

    let resolved_title = match non_blank(title.as_deref()) {
        Some(curated) => curated,
        None => {
            diagnostics.push(Diagnostic::MissingTitle(image.rel_path.clone()));
            let derived = display_name(image.stem());
            *title = Some(derived.clone());
            derived
        }
    };

    let resolved_description = non_blank(description.as_deref());
    if resolved_description.is_none() {
        diagnostics.push(Diagnostic::MissingDescription(image.rel_path.clone()));
    }

    if collections.is_empty() {
        diagnostics.push(Diagnostic::MissingCollections(image.rel_path.clone()));
        *collections = default_collections(image);
    }

    let meta = ImageMeta {
        title: resolved_title,
        description: resolved_description,
        collections: collections.clone(),
    };

    Inferred {
        saved,
        meta,
        diagnostics,
    }
}

/// Collections an image belongs to when none are curated.
pub fn default_collections(image: &DiscoveredImage) -> Vec<String> {
    image.parent_dir().map(String::from).into_iter().collect()
}

/// Path written to the gallery data: the relative path under an optional prefix.
pub fn published_path(prefix: &str, rel_path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        rel_path.to_string()
    } else {
        format!("{prefix}/{rel_path}")
    }
}
