//! Matching discovered images against the curation store.
//!
//! Stage 3 of the pipeline. Each stored record is consumed at most once:
//!
//! - A discovered path with a stored record reuses that record's [`Meta`].
//! - A discovered path without one gets a fresh, empty [`Meta`].
//! - Stored records left over afterwards are orphans. They are reported and
//!   dropped, so the rewritten store never lists files that no longer exist.
//!
//! Lookups go through a `path → record` map. When the store lists the same
//! path twice, the first record wins and later ones are reported as
//! duplicates and dropped.

use crate::scan::DiscoveredImage;
use crate::types::{Diagnostic, GalleryMetaData, Meta, SavedMeta};
use std::collections::HashMap;

/// Result of reconciling one run's discovery set against the prior store.
#[derive(Debug, Default)]
pub struct Reconciled {
    /// One record per discovered image, in discovery order.
    pub records: Vec<SavedMeta>,
    /// Orphan and duplicate reports, in store order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Pair every discovered image with its stored [`Meta`], consuming matches.
///
/// `store` is `None` when no metadata file existed yet.
pub fn reconcile(images: &[DiscoveredImage], store: Option<GalleryMetaData>) -> Reconciled {
    let stored = store.map(|s| s.meta).unwrap_or_default();
    let mut diagnostics = Vec::new();

    // path → (position in store, meta)
    let mut pool: HashMap<String, (usize, Meta)> = HashMap::with_capacity(stored.len());
    for (index, saved) in stored.into_iter().enumerate() {
        if pool.contains_key(&saved.path) {
            diagnostics.push(Diagnostic::DuplicateMetadata(saved.path));
        } else {
            pool.insert(saved.path, (index, saved.meta));
        }
    }

    let records = images
        .iter()
        .map(|image| match pool.remove(&image.rel_path) {
            Some((_, meta)) => SavedMeta {
                path: image.rel_path.clone(),
                meta,
            },
            None => SavedMeta::empty(image.rel_path.clone()),
        })
        .collect();

    let mut orphans: Vec<(usize, String)> = pool
        .into_iter()
        .map(|(path, (index, _))| (index, path))
        .collect();
    orphans.sort_unstable_by_key(|(index, _)| *index);
    diagnostics.extend(
        orphans
            .into_iter()
            .map(|(_, path)| Diagnostic::OrphanedMetadata(path)),
    );

    Reconciled {
        records,
        diagnostics,
    }
}
