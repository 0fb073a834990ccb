//! The generation pipeline.
//!
//! ```text
//! 1. Load       metadata.yaml     → Option<GalleryMetaData>
//! 2. Discover   gallery/**        → sorted image paths
//! 3. Reconcile  paths × store     → one SavedMeta per image, orphans dropped
//! 4. Infer      per image         → title/collections filled, EXIF read
//! 5. Collect    parent dirs       → GalleryCollection list
//! 6. Write      metadata.yaml, then gallery.yaml
//! ```
//!
//! [`generate`] runs stages 1–5 and touches nothing on disk, which is what
//! `--check` uses. [`run`] adds stage 6.
//!
//! ## Parallel Processing
//!
//! Stage 4 reads every image file, so it runs on a dedicated rayon pool
//! sized by [`effective_threads`]. The pool bounds how many files are open
//! at once. Results keep discovery order, and the first failing image
//! aborts the run before anything is written.

use crate::camera::read_exif;
use crate::collections::build_collections;
use crate::config::{ConfigError, GalleryConfig, effective_threads};
use crate::metadata::{Inferred, infer_fields, published_path};
use crate::reconcile::{Reconciled, reconcile};
use crate::scan::{DiscoveredImage, ScanError, discover_images};
use crate::store::{self, StoreError};
use crate::types::{Diagnostic, GalleryData, GalleryImage, GalleryMetaData, SavedMeta};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid gallery directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Metadata store error: {0}")]
    Store(#[from] StoreError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Everything one run produces, before it is written.
#[derive(Debug)]
pub struct Generated {
    /// The new curation store: one record per discovered image.
    pub metadata: GalleryMetaData,
    pub gallery: GalleryData,
    /// Per-image diagnostics in discovery order, then orphan/duplicate reports.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether a metadata store existed before this run.
    pub had_store: bool,
}

/// Paths of the files written by [`run`].
#[derive(Debug)]
pub struct RunReport {
    pub generated: Generated,
    pub metadata_path: PathBuf,
    pub gallery_path: PathBuf,
}

/// One image after inference and EXIF extraction.
#[derive(Debug)]
pub struct ImageRecord {
    pub image: GalleryImage,
    pub saved: SavedMeta,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fail unless `root` is an existing directory.
pub fn ensure_gallery_dir(root: &Path) -> Result<(), GenerateError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(GenerateError::NotADirectory(root.to_path_buf()))
    }
}

/// Build the gallery entry for one image. No state is shared between images.
pub fn build_image(
    image: &DiscoveredImage,
    saved: SavedMeta,
    path_prefix: &str,
) -> Result<ImageRecord, GenerateError> {
    let Inferred {
        saved,
        meta,
        diagnostics,
    } = infer_fields(image, saved);
    let exif = read_exif(&image.source).map_err(|source| GenerateError::ImageRead {
        path: image.source.clone(),
        source,
    })?;
    log::trace!("Built {}: {:?}", image.rel_path, exif);

    Ok(ImageRecord {
        image: GalleryImage {
            path: published_path(path_prefix, &image.rel_path),
            meta,
            exif,
        },
        saved,
        diagnostics,
    })
}

/// Run stages 1–5 without writing anything.
pub fn generate(root: &Path, config: &GalleryConfig) -> Result<Generated, GenerateError> {
    ensure_gallery_dir(root)?;

    let store = store::load_metadata(root, &config.output)?;
    let had_store = store.is_some();
    let images = discover_images(root, &config.discovery)?;
    let Reconciled {
        records,
        diagnostics: reconcile_diagnostics,
    } = reconcile(&images, store);
    let collections = build_collections(&images);

    let threads = effective_threads(&config.processing);
    log::info!("Processing {} images on {} workers", images.len(), threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    let prefix = config.output.image_path_prefix.as_str();
    let built: Vec<ImageRecord> = pool.install(|| {
        images
            .par_iter()
            .zip(records.into_par_iter())
            .map(|(image, saved)| build_image(image, saved, prefix))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut diagnostics = Vec::new();
    let mut saved = Vec::with_capacity(built.len());
    let mut gallery_images = Vec::with_capacity(built.len());
    for record in built {
        diagnostics.extend(record.diagnostics);
        saved.push(record.saved);
        gallery_images.push(record.image);
    }
    diagnostics.extend(reconcile_diagnostics);

    Ok(Generated {
        metadata: GalleryMetaData { meta: saved },
        gallery: GalleryData {
            collections,
            images: gallery_images,
        },
        diagnostics,
        had_store,
    })
}

/// Run the full pipeline: generate, then write the store and the gallery data.
pub fn run(root: &Path, config: &GalleryConfig) -> Result<RunReport, GenerateError> {
    let generated = generate(root, config)?;
    let metadata_path = store::write_metadata(root, &config.output, &generated.metadata)?;
    let gallery_path = store::write_gallery(root, &config.output, &generated.gallery)?;
    Ok(RunReport {
        generated,
        metadata_path,
        gallery_path,
    })
}
