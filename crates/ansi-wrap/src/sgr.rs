//! Locating and measuring SGR escape sequences.
//!
//! Sequences are opaque tokens of the form `ESC [ <digits/semicolons> m`.
//! They are never interpreted, only found, counted and removed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static SGR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

/// Remove every SGR sequence from `s`.
pub fn strip_sgr(s: &str) -> Cow<'_, str> {
    SGR.replace_all(s, "")
}

/// Number of visible characters in `s`, escape sequences excluded.
pub fn visible_len(s: &str) -> usize {
    s.chars().count() - sgr_char_count(s)
}

/// Iterate over the SGR sequences of `s` in order.
pub fn sgr_sequences(s: &str) -> impl Iterator<Item = &str> {
    SGR.find_iter(s).map(|m| m.as_str())
}

/// Number of characters taken up by SGR sequences in `s`.
pub fn sgr_char_count(s: &str) -> usize {
    // Sequences are pure ASCII, so byte length equals char count.
    SGR.find_iter(s).map(|m| m.len()).sum()
}

/// Byte offset and value of every char of `s` outside SGR sequences.
pub(crate) fn visible_chars(s: &str) -> Vec<(usize, char)> {
    let mut visible = Vec::with_capacity(s.len());
    let mut pos = 0;
    for m in SGR.find_iter(s) {
        visible.extend(s[pos..m.start()].char_indices().map(|(b, c)| (pos + b, c)));
        pos = m.end();
    }
    visible.extend(s[pos..].char_indices().map(|(b, c)| (pos + b, c)));
    visible
}

/// Remove the whitespace that leads the visible text of `s`.
///
/// Escape sequences in front of it are kept.
pub(crate) fn trim_start_visible(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    for m in SGR.find_iter(s) {
        let gap = s[pos..m.start()].trim_start();
        if !gap.is_empty() {
            out.push_str(gap);
            out.push_str(&s[m.start()..]);
            return out;
        }
        out.push_str(m.as_str());
        pos = m.end();
    }
    out.push_str(s[pos..].trim_start());
    out
}

/// Byte offset of char index `idx` in `s`, clamped to `s.len()`.
pub(crate) fn byte_offset(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map_or(s.len(), |(b, _)| b)
}
