//! Shared test utilities for the gallery-meta test suite.
//!
//! Provides fixture builders (fake images, store files, EXIF-carrying JPEGs and PNGs)
//! and lookup helpers that panic with a useful message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_fake_image(tmp.path(), "foo/b.png");
//! let generated = generate(tmp.path(), &GalleryConfig::default()).unwrap();
//! assert_eq!(find_image(&generated.gallery, "foo/b.png").meta.title, "B");
//! ```

use std::path::{Path, PathBuf};

use crate::scan::DiscoveredImage;
use crate::types::{GalleryData, GalleryImage, GalleryMetaData, SavedMeta};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a placeholder file at `rel` under `root`, creating parent dirs.
///
/// The content is not a real image, so EXIF extraction yields nothing.
pub fn write_fake_image(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, b"fake image").unwrap();
    path
}

/// Write `metadata.yaml` into `root`.
pub fn write_store(root: &Path, yaml: &str) {
    std::fs::write(root.join("metadata.yaml"), yaml).unwrap();
}

/// Discovered images under a fictional root, in the given order.
pub fn discovered(rel_paths: &[&str]) -> Vec<DiscoveredImage> {
    rel_paths.iter().map(|p| discovered_one(p)).collect()
}

pub fn discovered_one(rel_path: &str) -> DiscoveredImage {
    DiscoveredImage {
        source: Path::new("gallery").join(rel_path),
        rel_path: rel_path.to_string(),
    }
}

pub fn saved_with_title(path: &str, title: &str) -> SavedMeta {
    let mut saved = SavedMeta::empty(path);
    saved.meta.title = Some(title.to_string());
    saved
}

// =========================================================================
// Lookups — panics with a clear message on miss
// =========================================================================

/// Find a gallery image by path. Panics if not found.
pub fn find_image<'a>(gallery: &'a GalleryData, path: &str) -> &'a GalleryImage {
    gallery
        .images
        .iter()
        .find(|i| i.path == path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = gallery.images.iter().map(|i| i.path.as_str()).collect();
            panic!("image '{path}' not found. Available: {paths:?}")
        })
}

/// Find a store record by path. Panics if not found.
pub fn find_saved<'a>(store: &'a GalleryMetaData, path: &str) -> &'a SavedMeta {
    store.meta.iter().find(|s| s.path == path).unwrap_or_else(|| {
        let paths: Vec<&str> = store.meta.iter().map(|s| s.path.as_str()).collect();
        panic!("record '{path}' not found. Available: {paths:?}")
    })
}

// =========================================================================
// EXIF fixtures
// =========================================================================

/// EXIF values to embed. Rationals are `(numerator, denominator)`.
#[derive(Debug, Clone, Default)]
pub struct ExifFixture {
    pub model: Option<&'static str>,
    pub exposure: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    pub focal_length: Option<(u32, u32)>,
    pub iso: Option<u16>,
    pub date_time_original: Option<&'static str>,
    pub lens_model: Option<&'static str>,
}

const ASCII: u16 = 2;
const SHORT: u16 = 3;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

struct IfdEntry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

fn ascii_entry(tag: u16, text: &str) -> IfdEntry {
    let mut data = text.as_bytes().to_vec();
    data.push(0);
    IfdEntry {
        tag,
        kind: ASCII,
        count: data.len() as u32,
        data,
    }
}

fn rational_entry(tag: u16, (num, denom): (u32, u32)) -> IfdEntry {
    let mut data = num.to_le_bytes().to_vec();
    data.extend_from_slice(&denom.to_le_bytes());
    IfdEntry {
        tag,
        kind: RATIONAL,
        count: 1,
        data,
    }
}

/// Bytes of out-of-line data an IFD needs (values over 4 bytes, word aligned).
fn ifd_data_len(entries: &[IfdEntry]) -> usize {
    entries
        .iter()
        .filter(|e| e.data.len() > 4)
        .map(|e| e.data.len() + e.data.len() % 2)
        .sum()
}

fn ifd_table_len(entries: &[IfdEntry]) -> usize {
    2 + 12 * entries.len() + 4
}

/// Append an IFD (table followed by its data) at the current end of `buf`.
/// Entries must be sorted by tag.
fn append_ifd(buf: &mut Vec<u8>, entries: &[IfdEntry]) {
    let mut data_offset = buf.len() + ifd_table_len(entries);
    let mut data = Vec::new();

    buf.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        buf.extend_from_slice(&entry.tag.to_le_bytes());
        buf.extend_from_slice(&entry.kind.to_le_bytes());
        buf.extend_from_slice(&entry.count.to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = entry.data.clone();
            inline.resize(4, 0);
            buf.extend_from_slice(&inline);
        } else {
            buf.extend_from_slice(&(data_offset as u32).to_le_bytes());
            data.extend_from_slice(&entry.data);
            if entry.data.len() % 2 == 1 {
                data.push(0);
            }
            data_offset += entry.data.len() + entry.data.len() % 2;
        }
    }
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&data);
}

/// A little-endian TIFF block carrying the fixture's tags, as found inside
/// a JPEG APP1 segment after the `Exif\0\0` marker.
pub fn tiff_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    let mut exif_entries = Vec::new();
    if let Some(exposure) = fixture.exposure {
        exif_entries.push(rational_entry(0x829a, exposure));
    }
    if let Some(f_number) = fixture.f_number {
        exif_entries.push(rational_entry(0x829d, f_number));
    }
    if let Some(iso) = fixture.iso {
        exif_entries.push(IfdEntry {
            tag: 0x8827,
            kind: SHORT,
            count: 1,
            data: iso.to_le_bytes().to_vec(),
        });
    }
    if let Some(date) = fixture.date_time_original {
        exif_entries.push(ascii_entry(0x9003, date));
    }
    if let Some(focal) = fixture.focal_length {
        exif_entries.push(rational_entry(0x920a, focal));
    }
    if let Some(lens) = fixture.lens_model {
        exif_entries.push(ascii_entry(0xa434, lens));
    }

    let mut ifd0 = Vec::new();
    if let Some(model) = fixture.model {
        ifd0.push(ascii_entry(0x0110, model));
    }
    // The Exif IFD pointer is inline, so it doesn't change IFD0's data length.
    let pointer_slot = usize::from(!exif_entries.is_empty());
    let ifd0_len = ifd_table_len(&ifd0) + 12 * pointer_slot + ifd_data_len(&ifd0);
    if !exif_entries.is_empty() {
        let exif_offset = (8 + ifd0_len) as u32;
        ifd0.push(IfdEntry {
            tag: 0x8769,
            kind: LONG,
            count: 1,
            data: exif_offset.to_le_bytes().to_vec(),
        });
    }

    let mut buf = b"II".to_vec();
    buf.extend_from_slice(&42u16.to_le_bytes());
    buf.extend_from_slice(&8u32.to_le_bytes());
    append_ifd(&mut buf, &ifd0);
    if !exif_entries.is_empty() {
        append_ifd(&mut buf, &exif_entries);
    }
    buf
}

/// A minimal JPEG: SOI, an APP1 Exif segment, EOI.
pub fn jpeg_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    let tiff = tiff_with_exif(fixture);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Wrap the fixture's TIFF block in a PNG `eXIf` chunk, between a 1×1
/// IHDR and IEND. Chunk CRCs are zero; the EXIF reader doesn't check them.
pub fn png_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    fn chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
        png.extend_from_slice(&(data.len() as u32).to_be_bytes());
        png.extend_from_slice(kind);
        png.extend_from_slice(data);
        png.extend_from_slice(&[0; 4]);
    }

    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0];
    chunk(&mut png, b"IHDR", &ihdr);
    chunk(&mut png, b"eXIf", &tiff_with_exif(fixture));
    chunk(&mut png, b"IEND", &[]);
    png
}
