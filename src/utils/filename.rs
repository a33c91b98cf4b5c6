//! Cross-platform safe file and directory names.
//!
//! Titles and attachment names come straight from conference submitters, so
//! they can contain path separators, reserved characters, line breaks and
//! arbitrary lengths.

use super::text::{truncate_bytes, truncate_chars};

/// Longest name (in characters) produced by [`sanitize_filename`]
pub const MAX_NAME_LEN: usize = 180;

/// Longest name (in UTF-8 bytes) produced by [`sanitize_filename`].
///
/// Common filesystems limit a path component to 255 bytes. Contribution
/// folders are `<id> - <title>`, so the title keeps room for a short id.
pub const MAX_NAME_BYTES: usize = 200;

const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\r', '\n'];
const TRIMMED: &[char] = &[' ', '.', '_'];

/// Turn arbitrary text into a safe file name.
///
/// 1. Replace `< > : " / \ | ? *`, CR and LF with `_`
/// 2. Collapse whitespace runs into a single space
/// 3. Trim spaces, dots and underscores from both ends
/// 4. Above [`MAX_NAME_LEN`] characters or [`MAX_NAME_BYTES`] bytes, cut at the
///    last space before the limit
/// 5. Fall back to `unknown` when nothing is left
///
/// # Examples
/// ```
/// use indico_harvest::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("RF: status/plans?"), "RF_ status_plans");
/// assert_eq!(sanitize_filename("  slides   v2.pdf "), "slides v2.pdf");
/// assert_eq!(sanitize_filename("..."), "unknown");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut cleaned = collapsed.trim_matches(TRIMMED);

    if cleaned.chars().count() > MAX_NAME_LEN || cleaned.len() > MAX_NAME_BYTES {
        let head = truncate_bytes(truncate_chars(cleaned, MAX_NAME_LEN), MAX_NAME_BYTES);
        let head = match head.rfind(' ') {
            Some(idx) => &head[..idx],
            None => head,
        };
        // the cut can expose a trailing dot or underscore
        cleaned = head.trim_matches(TRIMMED);
    }

    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Directory name for a date bucket (`2025/10/27` → `2025-10-27`).
///
/// # Examples
/// ```
/// use indico_harvest::utils::date_dir_name;
///
/// assert_eq!(date_dir_name("2025/10/27"), "2025-10-27");
/// assert_eq!(date_dir_name("Unknown"), "Unknown");
/// assert_eq!(date_dir_name(".."), "Unknown");
/// ```
pub fn date_dir_name(date: &str) -> String {
    match sanitize_filename(&date.replace('/', "-")).as_str() {
        // `.`, `..` and blank dates would otherwise escape the bucket directory
        "unknown" => "Unknown".to_string(),
        name => name.to_string(),
    }
}
