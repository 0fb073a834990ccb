//! Human-readable captions from filenames and directory paths.
//!
//! The same transform names both images and collections:
//!
//! - `my_photo-01.jpg` stem → "My Photo 01" (image title)
//! - `travel/japan` → "Travel Japan" (collection name)
//! - `IMG_2041` → "Img 2041"
//!
//! Runs of anything that isn't an ASCII letter or digit become a single
//! space; each resulting word is capitalized and the rest lowercased.

/// Turn a filename stem or relative directory path into a display caption.
///
/// Returns an empty string when the input has no ASCII alphanumerics.
pub fn to_readable_caption(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caption for `raw`, or `raw` itself when the caption would be empty.
///
/// Titles and collection names go through this so they are never blank:
/// `日本` stays `日本` rather than becoming "".
pub fn display_name(raw: &str) -> String {
    let caption = to_readable_caption(raw);
    if caption.is_empty() {
        raw.to_string()
    } else {
        caption
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}
