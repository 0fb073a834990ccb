//! # gallery-meta
//!
//! Generates the data files behind a static photo gallery. The filesystem
//! is the source of images; a small hand-edited metadata file is the source
//! of everything a photographer wants to say about them.
//!
//! # Architecture: Six-Stage Pipeline
//!
//! ```text
//! 1. Load       metadata.yaml  →  prior curation store (or none)
//! 2. Discover   gallery/**     →  sorted image paths
//! 3. Reconcile  paths × store  →  one record per image, orphans dropped
//! 4. Infer      per image      →  titles, collections, EXIF
//! 5. Collect    directories    →  collection list
//! 6. Write      metadata.yaml + gallery.yaml
//! ```
//!
//! Stages 2–5 are pure functions over in-memory data (apart from reading
//! image bytes for EXIF), and report problems as [`types::Diagnostic`]
//! values rather than printing. The binary decides how to show them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Stages 1 and 6: load the curation store, write both files |
//! | [`scan`] | Stage 2: recursive, sorted image discovery |
//! | [`reconcile`] | Stage 3: consume-once matching of images to stored records |
//! | [`metadata`] | Stage 4: title/collection inference, description checks |
//! | [`camera`] | Stage 4: EXIF extraction |
//! | [`collections`] | Stage 5: collections from parent directories |
//! | [`generate`] | Pipeline orchestration on a bounded worker pool |
//! | [`config`] | Optional `gallery-meta.toml` loading and validation |
//! | [`naming`] | Filename/directory → display caption |
//! | [`types`] | The data model shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Curated Values Win, Inferred Values Stick
//!
//! A derived title or default collection is written back into the
//! curation store. The next run sees it as curated, so re-running is
//! idempotent and the curator edits a file that already lists every image
//! with a sensible starting value.
//!
//! ## Descriptions Are Never Invented
//!
//! Titles can be guessed from filenames; descriptions can't. A missing
//! description is reported on every run and left empty.
//!
//! ## Deterministic Output
//!
//! Discovery is sorted by relative path and collections by id, so an
//! unchanged gallery produces byte-identical files. Diffs of the two files
//! in version control show only real changes.

pub mod camera;
pub mod collections;
pub mod config;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod reconcile;
pub mod scan;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
