//! Text shortening helpers. Lengths count characters, not bytes.

/// First `max` characters of `s`.
///
/// # Examples
/// ```
/// use indico_harvest::utils::truncate_chars;
///
/// assert_eq!(truncate_chars("Zürich beam", 6), "Zürich");
/// assert_eq!(truncate_chars("short", 10), "short");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a character.
///
/// # Examples
/// ```
/// use indico_harvest::utils::truncate_bytes;
///
/// assert_eq!(truncate_bytes("Zürich", 2), "Z");
/// assert_eq!(truncate_bytes("Zürich", 3), "Zü");
/// ```
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// First `max` characters of `s` followed by `...` when anything was cut.
///
/// # Examples
/// ```
/// use indico_harvest::utils::ellipsize;
///
/// assert_eq!(ellipsize("abcdef", 3), "abc...");
/// assert_eq!(ellipsize("abc", 3), "abc");
/// ```
pub fn ellipsize(s: &str, max: usize) -> String {
    let head = truncate_chars(s, max);
    if head.len() < s.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}
