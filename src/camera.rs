//! Camera metadata from embedded EXIF blocks.
//!
//! Parsing is delegated to `kamadak-exif`, which understands JPEG, PNG
//! (`eXIf` chunk), TIFF and HEIF containers. Only the fields the renderer
//! shows are mapped:
//!
//! | EXIF tag | [`ImageExif`] field | Notes |
//! |---|---|---|
//! | DateTimeOriginal | `capture_date` | wall-clock time read as UTC |
//! | FNumber | `f_number` | |
//! | FocalLength | `focal_length` | millimetres |
//! | PhotographicSensitivity | `iso` | |
//! | Model | `model` | |
//! | ExposureTime | `shutter_speed` | reciprocal, omitted for zero exposure |
//! | LensModel | `lens_model` | |
//!
//! A file without EXIF, or with a block the parser rejects (truncated files
//! included), yields an empty [`ImageExif`]. Only failing to open the file
//! is an error.

use crate::types::ImageExif;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use exif::{Exif, In, Rational, Tag, Value};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Read the EXIF attributes of an image file.
pub fn read_exif(path: &Path) -> io::Result<ImageExif> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(exif_attributes(&exif)),
        Err(e) => {
            log::debug!("No usable EXIF in {}: {}", path.display(), e);
            Ok(ImageExif::default())
        }
    }
}

/// Map a parsed EXIF block onto [`ImageExif`].
pub fn exif_attributes(exif: &Exif) -> ImageExif {
    let field = |tag: Tag| exif.get_field(tag, In::PRIMARY).map(|f| &f.value);

    ImageExif {
        capture_date: field(Tag::DateTimeOriginal)
            .and_then(ascii_value)
            .and_then(|s| parse_capture_date(&s)),
        f_number: field(Tag::FNumber)
            .and_then(rational_value)
            .map(|r| r.to_f64()),
        focal_length: field(Tag::FocalLength)
            .and_then(rational_value)
            .map(|r| r.to_f64()),
        iso: field(Tag::PhotographicSensitivity).and_then(|v| v.get_uint(0)),
        model: field(Tag::Model).and_then(ascii_value),
        shutter_speed: field(Tag::ExposureTime)
            .and_then(rational_value)
            .and_then(shutter_speed),
        lens_model: field(Tag::LensModel).and_then(ascii_value),
    }
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` timestamp as UTC.
pub fn parse_capture_date(raw: &str) -> Option<DateTime<Utc>> {
    let dt = exif::DateTime::from_ascii(raw.as_bytes()).ok()?;
    let naive = NaiveDate::from_ymd_opt(dt.year.into(), dt.month.into(), dt.day.into())?
        .and_hms_opt(dt.hour.into(), dt.minute.into(), dt.second.into())?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Shutter speed as the reciprocal of the exposure time, e.g. 1/250 s → 250.
///
/// `None` when the exposure time is zero or has a zero denominator.
pub fn shutter_speed(exposure: Rational) -> Option<f64> {
    (exposure.num != 0 && exposure.denom != 0)
        .then(|| f64::from(exposure.denom) / f64::from(exposure.num))
}

fn rational_value(value: &Value) -> Option<Rational> {
    match value {
        Value::Rational(v) => v.first().cloned(),
        _ => None,
    }
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(v) => v
            .first()
            .map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .trim()
                    .to_string()
            })
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}
