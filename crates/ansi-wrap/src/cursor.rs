//! Alignment of visible segments with the escaped source text.

use crate::anomaly::{Anomaly, AnomalySink};
use crate::sgr::{sgr_char_count, visible_chars};

/// Left-to-right cursor over the escaped text still to be emitted.
#[derive(Debug)]
pub(crate) struct EscapedCursor<'a> {
    rest: &'a str,
    /// Escape-sequence characters left in `rest`.
    escape_chars: usize,
}

impl<'a> EscapedCursor<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            escape_chars: sgr_char_count(line),
        }
    }

    pub(crate) fn escape_chars(&self) -> usize {
        self.escape_chars
    }

    /// Take everything that is left.
    pub(crate) fn take_rest(&mut self) -> &'a str {
        let rest = self.rest;
        self.rest = "";
        self.escape_chars = 0;
        rest
    }

    /// Cut off the escaped counterpart of the visible `segment`.
    ///
    /// The anchor is the last `match_window` characters of `segment`. It is
    /// searched in the visible characters of the remaining text, from
    /// `column_width - 3 * match_window` up to the column width or the segment
    /// length, whichever is larger. Of all matches, the one ending closest to
    /// the segment length wins. The cut goes right after the last visible
    /// character of the match; escape sequences that follow it stay with the
    /// next line.
    ///
    /// An empty anchor, or one that is not found, cuts after `column_width`
    /// visible characters and is reported to `sink`.
    pub(crate) fn cut(
        &mut self,
        segment: &str,
        column_width: usize,
        match_window: usize,
        sink: &mut dyn AnomalySink,
    ) -> &'a str {
        let chars: Vec<char> = segment.chars().collect();
        let segment_len = chars.len();
        let anchor = &chars[segment_len.saturating_sub(match_window)..];

        let visible = visible_chars(self.rest);
        let start = column_width
            .saturating_sub(3 * match_window)
            .min(segment_len - anchor.len())
            .min(visible.len());
        let end = column_width.max(segment_len).min(visible.len()).max(start);
        let window = &visible[start..end];

        let found = if anchor.is_empty() {
            None
        } else {
            window
                .windows(anchor.len())
                .enumerate()
                .filter(|(_, w)| w.iter().map(|&(_, c)| c).eq(anchor.iter().copied()))
                .map(|(i, _)| start + i + anchor.len())
                .min_by_key(|&matched_end| matched_end.abs_diff(segment_len))
        };

        let kept = match found {
            Some(matched_end) => matched_end,
            None => {
                let kept = column_width.min(visible.len());
                sink.record(Anomaly {
                    segment: segment.to_string(),
                    window: window.iter().map(|&(_, c)| c).collect(),
                    cut: kept,
                });
                kept
            }
        };

        let at = match kept.checked_sub(1) {
            Some(last) => {
                let (offset, c) = visible[last];
                offset + c.len_utf8()
            }
            None => 0,
        };
        let (left, right) = self.rest.split_at(at);
        self.rest = right;
        self.escape_chars -= sgr_char_count(left);
        left
    }
}
