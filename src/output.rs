//! CLI output formatting.
//!
//! Output is information-first: each entity leads with a positional index and
//! its display title, with the file it came from as an indented `Source:`
//! line.
//!
//! ```text
//! Collections
//! 001 Foo (1 photos)
//!     Source: foo/
//!
//! Images
//! 001 A
//!     Source: a.jpg
//! 002 B pic
//!     Source: foo/b.png
//!     Camera: TestCam · f/2.8 · 1/250s · ISO 400
//!
//! Metadata: 2 records, 1 inferred title, 1 warning
//! ```
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Diagnostics are
//! not printed here; [`format_diagnostic`] renders them for the logger.

use crate::generate::{Generated, RunReport};
use crate::types::{Diagnostic, GalleryImage, ImageExif};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional photo count.
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} photos)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// One-line camera summary, `None` when the image has no EXIF.
fn camera_line(exif: &ImageExif) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(model) = &exif.model {
        parts.push(model.clone());
    }
    if let Some(lens) = &exif.lens_model {
        parts.push(lens.clone());
    }
    if let Some(f) = exif.f_number {
        parts.push(format!("f/{f}"));
    }
    if let Some(focal) = exif.focal_length {
        parts.push(format!("{focal}mm"));
    }
    if let Some(speed) = exif.shutter_speed {
        parts.push(format_shutter(speed));
    }
    if let Some(iso) = exif.iso {
        parts.push(format!("ISO {iso}"));
    }
    if let Some(date) = exif.capture_date {
        parts.push(date.format("%Y-%m-%d %H:%M").to_string());
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

/// `250.0` → `1/250s`, `0.5` → `2s`.
fn format_shutter(speed: f64) -> String {
    if speed >= 1.0 {
        format!("1/{}s", speed.round())
    } else {
        format!("{}s", (1.0 / speed * 10.0).round() / 10.0)
    }
}

fn pluralize(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Render a diagnostic as a single warning line.
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    diagnostic.to_string()
}

fn image_lines(index: usize, image: &GalleryImage, source: &str) -> Vec<String> {
    let mut lines = vec![entity_header(index, &image.meta.title, None)];
    lines.push(format!("{}Source: {}", indent(1), source));
    if let Some(camera) = camera_line(&image.exif) {
        lines.push(format!("{}Camera: {}", indent(1), camera));
    }
    lines
}

/// Format the gallery contents produced by a run (written or not).
pub fn format_generated(generated: &Generated) -> Vec<String> {
    let mut lines = Vec::new();
    let gallery = &generated.gallery;

    if !gallery.collections.is_empty() {
        lines.push("Collections".to_string());
        for (i, collection) in gallery.collections.iter().enumerate() {
            let count = gallery
                .images
                .iter()
                .filter(|img| img.meta.collections.contains(&collection.id))
                .count();
            lines.push(entity_header(i + 1, &collection.name, Some(count)));
            lines.push(format!("{}Source: {}/", indent(1), collection.id));
        }
        lines.push(String::new());
    }

    lines.push("Images".to_string());
    for (i, (image, saved)) in gallery
        .images
        .iter()
        .zip(&generated.metadata.meta)
        .enumerate()
    {
        lines.extend(image_lines(i + 1, image, &saved.path));
    }
    lines.push(String::new());

    let inferred = generated
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::MissingTitle(_)))
        .count();
    lines.push(format!(
        "Metadata: {}, {}, {}",
        pluralize(generated.metadata.meta.len(), "record"),
        pluralize(inferred, "inferred title"),
        pluralize(generated.diagnostics.len(), "warning"),
    ));
    if !generated.had_store {
        lines.push("No existing metadata file, starting fresh".to_string());
    }
    lines
}

/// Format the summary of a completed run, including the files written.
pub fn format_run_output(report: &RunReport) -> Vec<String> {
    let mut lines = format_generated(&report.generated);
    lines.push(format!("Metadata file written: {}", report.metadata_path.display()));
    lines.push(format!("Gallery file written: {}", report.gallery_path.display()));
    lines
}

pub fn print_generated(generated: &Generated) {
    for line in format_generated(generated) {
        println!("{}", line);
    }
}

pub fn print_run_output(report: &RunReport) {
    for line in format_run_output(report) {
        println!("{}", line);
    }
}
