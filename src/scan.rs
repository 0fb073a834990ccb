//! Image discovery.
//!
//! Stage 2 of the pipeline. Walks the gallery root recursively and returns
//! every image file, sorted by relative path so that repeated runs over an
//! unchanged tree produce byte-identical output.
//!
//! ```text
//! gallery/
//! ├── metadata.yaml        # not an image, ignored
//! ├── a.jpg                → "a.jpg"
//! ├── .drafts/             # hidden, not descended into
//! │   └── x.jpg
//! └── foo/
//!     ├── .thumb.png       # hidden, skipped
//!     └── bar/
//!         └── b.PNG        → "foo/bar/b.PNG"
//! ```
//!
//! Symlinks are followed: a linked image is discovered under the link's own
//! path, and a linked directory is walked like a real one. Links that loop
//! back to an ancestor are skipped with a warning.

use crate::config::DiscoveryConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk gallery directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Discovered path is outside the gallery root: {0}")]
    OutsideRoot(PathBuf),
}

/// An image file found under the gallery root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredImage {
    /// Path on disk, usable for opening the file.
    pub source: PathBuf,
    /// Path relative to the gallery root, `/`-separated. This is the
    /// identity stored in the metadata file.
    pub rel_path: String,
}

impl DiscoveredImage {
    /// Parent directory relative to the gallery root, `None` at the root.
    pub fn parent_dir(&self) -> Option<&str> {
        self.rel_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .filter(|dir| !dir.is_empty())
    }

    /// Filename without its extension.
    pub fn stem(&self) -> &str {
        let filename = self
            .rel_path
            .rsplit_once('/')
            .map_or(self.rel_path.as_str(), |(_, f)| f);
        match filename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => filename,
        }
    }
}

/// Recursively find image files under `root`, sorted by relative path.
pub fn discover_images(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<DiscoveredImage>, ScanError> {
    log::debug!("Discovering images in {}", root.display());

    let mut images = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                log::warn!("Skipping symlink loop: {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_image_extension(path, &config.extensions) {
            log::trace!("Skipping non-image file: {}", path.display());
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .map_err(|_| ScanError::OutsideRoot(path.to_path_buf()))?;
        images.push(DiscoveredImage {
            source: path.to_path_buf(),
            rel_path: to_url_path(rel),
        });
    }

    images.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    log::debug!("Discovered {} images", images.len());
    Ok(images)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)))
}

/// Join path components with `/` regardless of platform.
fn to_url_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
