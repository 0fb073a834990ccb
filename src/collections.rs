//! Collections derived from the directory layout.
//!
//! Every distinct parent directory of a discovered image becomes one
//! collection. Images directly in the gallery root don't form one.
//!
//! ```text
//! a.jpg             → (no collection)
//! foo/b.png         → { id: "foo",     name: "Foo" }
//! foo/bar/c.jpg     → { id: "foo/bar", name: "Foo Bar" }
//! ```
//!
//! A directory whose name has no ASCII letters or digits keeps its raw
//! path as the name (`日本/` → "日本").
//!
//! Intermediate directories without images of their own (`travel/` above
//! `travel/japan/`) are not collections.

use crate::naming::display_name;
use crate::scan::DiscoveredImage;
use crate::types::GalleryCollection;
use std::collections::BTreeSet;

/// Build the collection list, sorted by id.
pub fn build_collections(images: &[DiscoveredImage]) -> Vec<GalleryCollection> {
    let dirs: BTreeSet<&str> = images.iter().filter_map(|i| i.parent_dir()).collect();
    dirs.into_iter()
        .map(|dir| GalleryCollection {
            id: dir.to_string(),
            name: display_name(dir),
        })
        .collect()
}
