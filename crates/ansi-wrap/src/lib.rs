//! Word-wrap text containing ANSI SGR escape sequences.
//!
//! Terminal banners often mix visible text with invisible color and style
//! codes. Wrapping such a line by character count would both miscount its
//! width and risk splitting an escape sequence across lines. This crate wraps
//! by *visible* width instead:
//!
//! 1. The escape-free projection of the line is word-wrapped with `textwrap`,
//!    keeping every whitespace character.
//! 2. Each wrapped segment is located again in the escaped text by searching
//!    its visible characters for the last few characters of the segment (the
//!    anchor) near the expected column, and the escaped text is cut right
//!    after the match that ends closest to the segment length.
//!
//! Escape sequences are treated as opaque tokens and are never split,
//! duplicated or reordered.
//!
//! # Example
//!
//! ```
//! let line = "\x1b[1mhello\x1b[22m world, this line is long enough to require wrapping at a width of twenty";
//! let lines = ansi_wrap::wrap(line, 20, ansi_wrap::DEFAULT_MATCH_WINDOW);
//! assert_eq!(lines[0], "\x1b[1mhello\x1b[22m world, this ");
//! assert!(lines.iter().all(|l| ansi_wrap::visible_len(l) <= 20));
//! ```

mod anomaly;
mod cursor;
mod segment;
mod sgr;

pub use anomaly::{Anomaly, AnomalySink, LogSink};
pub use sgr::{sgr_char_count, sgr_sequences, strip_sgr, visible_len};

use cursor::EscapedCursor;
use sgr::trim_start_visible;

/// Default number of trailing characters used as a wrap anchor.
pub const DEFAULT_MATCH_WINDOW: usize = 5;

/// Wrap `line` to `column_width` visible characters.
///
/// A `column_width` of 0 disables wrapping. Anomalies are logged through
/// [`LogSink`].
pub fn wrap(line: &str, column_width: usize, match_window: usize) -> Vec<String> {
    AnsiWrapper::new(column_width)
        .with_match_window(match_window)
        .wrap(line)
}

/// Configured ANSI-aware line wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiWrapper {
    column_width: usize,
    match_window: usize,
    break_on_hyphens: bool,
}

impl AnsiWrapper {
    /// Create a wrapper for `column_width` visible characters (0 disables wrapping).
    pub fn new(column_width: usize) -> Self {
        Self {
            column_width,
            match_window: DEFAULT_MATCH_WINDOW,
            break_on_hyphens: true,
        }
    }

    /// Set the anchor length. Values below 1 are raised to 1.
    pub fn with_match_window(mut self, match_window: usize) -> Self {
        self.match_window = match_window.max(1);
        self
    }

    /// Allow breaking compound words after their hyphens.
    pub fn with_break_on_hyphens(mut self, break_on_hyphens: bool) -> Self {
        self.break_on_hyphens = break_on_hyphens;
        self
    }

    /// Maximum number of visible characters per line; 0 means no wrapping.
    pub fn column_width(&self) -> usize {
        self.column_width
    }

    /// Number of trailing segment characters used to locate each cut.
    pub fn match_window(&self) -> usize {
        self.match_window
    }

    /// Wrap `line`, logging anomalies through [`LogSink`].
    pub fn wrap(&self, line: &str) -> Vec<String> {
        self.wrap_with(line, &mut LogSink)
    }

    /// Wrap `line`, reporting anchors that could not be matched to `sink`.
    ///
    /// Always returns at least one line. Lines whose visible text fits the
    /// column width are returned unchanged. Leading whitespace of continuation
    /// lines is dropped, and a line left with only whitespace hands its escape
    /// codes to the line before it.
    pub fn wrap_with(&self, line: &str, sink: &mut dyn AnomalySink) -> Vec<String> {
        if self.column_width == 0 {
            return vec![line.to_string()];
        }

        let clear = strip_sgr(line);
        let clear_len = clear.chars().count();
        if clear_len <= self.column_width {
            return vec![line.to_string()];
        }

        let segments = segment::wrap_visible(&clear, self.column_width, self.break_on_hyphens);

        let mut cursor = EscapedCursor::new(line);
        log::debug!(
            "Wrapping {} characters long line with {} ANSI escape characters",
            clear_len,
            cursor.escape_chars()
        );

        let mut wrapped: Vec<String> = Vec::with_capacity(segments.len());
        // Escape codes met before any visible text.
        let mut pending = String::new();
        let last = segments.len().saturating_sub(1);
        for (i, segment) in segments.iter().enumerate() {
            let raw = if i == last {
                cursor.take_rest()
            } else {
                cursor.cut(segment, self.column_width, self.match_window, sink)
            };
            let text = if i == 0 {
                raw.trim_start().to_string()
            } else {
                trim_start_visible(raw)
            };

            if strip_sgr(&text).trim().is_empty() {
                let codes = sgr_sequences(&text);
                match wrapped.last_mut() {
                    Some(previous) => previous.extend(codes),
                    None => pending.extend(codes),
                }
                continue;
            }
            let mut line = std::mem::take(&mut pending);
            line.push_str(&text);
            wrapped.push(line);
        }
        if wrapped.is_empty() {
            wrapped.push(pending);
        }

        log::debug!(
            "Wrapped long line into {} lines (target is {} lines)",
            wrapped.len(),
            segments.len()
        );

        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_words(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|l| {
                strip_sgr(l)
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn words(s: &str) -> Vec<String> {
        strip_sgr(s).split_whitespace().map(str::to_string).collect()
    }

    fn escapes(s: &str) -> Vec<&str> {
        sgr_sequences(s).collect()
    }

    #[test]
    fn zero_width_passes_through() {
        let line = "some text that is certainly longer than nothing";
        assert_eq!(wrap(line, 0, 5), vec![line]);
    }

    #[test]
    fn short_line_unchanged() {
        let line = "A plain line of exactly forty-five characters";
        assert_eq!(line.len(), 45);
        assert_eq!(wrap(line, 80, 5), vec![line]);
    }

    #[test]
    fn width_counts_visible_chars_only() {
        // 10 visible chars plus 9 escape chars fits a width of 10.
        let line = "\x1b[1mhello\x1b[22mworld";
        assert_eq!(wrap(line, 10, 5), vec![line]);
    }

    #[test]
    fn escape_only_line_unchanged() {
        let line = "\x1b[0m";
        assert_eq!(wrap(line, 1, 5), vec![line]);
        assert_eq!(wrap("", 10, 5), vec![""]);
    }

    #[test]
    fn wrapping_is_idempotent_on_its_output() {
        let line = "\x1b[1mhello\x1b[22m world, this line is long enough to require wrapping at a width of twenty";
        for wrapped in wrap(line, 20, 5) {
            assert_eq!(wrap(&wrapped, 20, 5), vec![wrapped.clone()]);
        }
    }

    #[test]
    fn bold_word_stays_on_first_line() {
        let line = "\x1b[1mhello\x1b[22m world, this line is long enough to require wrapping at a width of twenty";
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(20).wrap_with(line, &mut anomalies);

        assert_eq!(
            lines,
            vec![
                "\x1b[1mhello\x1b[22m world, this ",
                "line is long enough ",
                "to require wrapping ",
                "at a width of twenty",
            ]
        );
        assert!(anomalies.is_empty());
        assert!(lines.iter().all(|l| visible_len(l) <= 20));
    }

    #[test]
    fn badge_and_underline_codes_are_preserved() {
        let line = "\x1b[1;31;7m Warning \x1b[0;27m The cluster will be down for maintenance on \x1b[4mMonday\x1b[24m morning, please plan accordingly";
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(30).wrap_with(line, &mut anomalies);

        assert_eq!(
            lines,
            vec![
                "\x1b[1;31;7m Warning \x1b[0;27m The cluster will be ",
                "down for maintenance on \x1b[4mMonday",
                "\x1b[24mmorning, please plan ",
                "accordingly",
            ]
        );
        assert!(anomalies.is_empty());

        // Escape sequences survive in order, visible words are intact.
        assert_eq!(escapes(&lines.concat()), escapes(line));
        assert_eq!(visible_words(&lines), words(line));
        assert!(lines.iter().all(|l| visible_len(l) <= 30));
    }

    #[test]
    fn colored_words_at_line_ends() {
        let line = "\x1b[31mone\x1b[0m \x1b[32mtwo\x1b[0m \x1b[33mthree\x1b[0m \x1b[34mfour\x1b[0m \x1b[35mfive\x1b[0m six seven eight nine ten";
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(15).wrap_with(line, &mut anomalies);

        assert_eq!(
            lines,
            vec![
                "\x1b[31mone\x1b[0m \x1b[32mtwo\x1b[0m \x1b[33mthree\x1b[0m ",
                "\x1b[34mfour\x1b[0m \x1b[35mfive\x1b[0m six ",
                "seven eight ",
                "nine ten",
            ]
        );
        assert!(anomalies.is_empty());
    }

    #[test]
    fn code_inside_last_word_does_not_split_it() {
        let line = "aaaa bbbb cccc dd\x1b[1me\x1b[0m ffff gggg";
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(18).wrap_with(line, &mut anomalies);

        assert_eq!(lines, vec!["aaaa bbbb cccc dd\x1b[1me", "\x1b[0mffff gggg"]);
        assert!(anomalies.is_empty());
    }

    #[test]
    fn repeated_phrase_cuts_at_the_right_place() {
        let line = vec!["the cat"; 7].join(" ");
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(20).wrap_with(&line, &mut anomalies);

        assert_eq!(
            lines,
            vec!["the cat the cat the ", "cat the cat the cat ", "the cat the cat"]
        );
        assert!(anomalies.is_empty());
    }

    #[test]
    fn no_break_space_keeps_value_and_unit_together() {
        let line = "Quota raised to 500\u{a0}GB for every project member";
        let lines = wrap(line, 19, 5);
        assert_eq!(
            lines,
            vec!["Quota raised to ", "500\u{a0}GB for every ", "project member"]
        );
    }

    #[test]
    fn narrow_width_has_no_blank_lines() {
        assert_eq!(wrap("a b c d e f", 1, 5), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn whitespace_only_lines_keep_their_codes() {
        let line = "\x1b[1m          \x1b[0mabcdef";
        let lines = wrap(line, 5, 5);
        assert_eq!(lines, vec!["\x1b[1m\x1b[0mabcdef"]);

        let line = "\x1b[4mab\x1b[24m          ";
        assert_eq!(wrap(line, 5, 5), vec!["\x1b[4mab\x1b[24m   "]);
    }

    #[test]
    fn overlong_word_kept_intact() {
        let line = "short \x1b[1msupercalifragilisticexpialidocious\x1b[22m end";
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(12).wrap_with(line, &mut anomalies);

        assert_eq!(
            lines,
            vec![
                "short ",
                "\x1b[1msupercalifragilisticexpialidocious",
                "\x1b[22mend",
            ]
        );
        assert!(anomalies.is_empty());
    }

    #[test]
    fn trailing_reset_is_not_lost() {
        let line = "\x1b[32mgreen text that wraps around here\x1b[0m";
        let lines = wrap(line, 12, 5);
        assert!(lines.len() > 1);
        assert!(lines.last().unwrap().ends_with("\x1b[0m"));
        assert_eq!(escapes(&lines.concat()), escapes(line));
    }

    #[test]
    fn hyphenated_words_break_after_hyphens() {
        let line = "a state-of-the-art wrapper";
        assert_eq!(
            AnsiWrapper::new(12).wrap(line),
            vec!["a state-of-", "the-art ", "wrapper"]
        );
    }

    #[test]
    fn without_hyphen_breaks() {
        let line = "a state-of-the-art wrapper";
        let lines = AnsiWrapper::new(12)
            .with_break_on_hyphens(false)
            .wrap(line);
        assert_eq!(lines, vec!["a ", "state-of-the-art", "wrapper"]);
    }

    #[test]
    fn match_window_is_at_least_one() {
        assert_eq!(AnsiWrapper::new(10).with_match_window(0).match_window(), 1);
        assert_eq!(AnsiWrapper::new(10).column_width(), 10);
    }

    #[test]
    fn single_char_match_window() {
        let line = "\x1b[1mhello\x1b[22m world, this line is long enough to require wrapping at a width of twenty";
        let mut anomalies: Vec<Anomaly> = Vec::new();
        let lines = AnsiWrapper::new(20)
            .with_match_window(1)
            .wrap_with(line, &mut anomalies);
        assert_eq!(lines, wrap(line, 20, 5));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let line = "\x1b[1mcafé\x1b[22m naïve résumé façade déjà vu über straße";
        let lines = wrap(line, 10, 5);
        assert_eq!(visible_words(&lines), words(line));
        assert!(lines.iter().all(|l| visible_len(l) <= 10));
    }

    #[test]
    fn wrapped_lines_snapshot() {
        let line = "Login nodes are shared \x1b[1mresources\x1b[22m: do not run heavy computations on them, submit a job instead";
        let rendered = wrap(line, 32, 5)
            .iter()
            .map(|l| strip_sgr(l).into_owned())
            .collect::<Vec<_>>()
            .join("|\n");
        insta::assert_snapshot!(rendered, @r"
        Login nodes are shared |
        resources: do not run heavy |
        computations on them, submit a |
        job instead
        ");
    }
}
