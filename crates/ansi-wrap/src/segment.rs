//! Word wrapping of escape-free text into visible segments.
//!
//! Words are found and packed by `textwrap`. Whitespace is never collapsed or
//! dropped: the returned segments concatenate back to the input exactly.
//! Words are never split; a word wider than the column gets a line of its own.

use crate::sgr::byte_offset;
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use textwrap::{WordSeparator, WordSplitter};

/// A word and the spaces that follow it, measured in chars.
#[derive(Debug)]
struct Chunk<'a> {
    word: &'a str,
    whitespace: &'a str,
}

impl Fragment for Chunk<'_> {
    fn width(&self) -> f64 {
        self.word.chars().count() as f64
    }

    fn whitespace_width(&self) -> f64 {
        self.whitespace.chars().count() as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Split `text` at ASCII spaces, and after inner hyphens with `splitter`.
///
/// Only `' '` separates words, so a no-break space keeps its neighbours together.
fn chunks<'a>(text: &'a str, splitter: &WordSplitter) -> Vec<Chunk<'a>> {
    let mut chunks = Vec::new();
    for word in WordSeparator::AsciiSpace.find_words(text) {
        let mut start = 0;
        for split in splitter.split_points(word.word) {
            chunks.push(Chunk {
                word: &word.word[start..split],
                whitespace: "",
            });
            start = split;
        }
        chunks.push(Chunk {
            word: &word.word[start..],
            whitespace: word.whitespace,
        });
    }
    chunks
}

/// Wrap `text` to `width` visible characters.
///
/// Chunks are packed first-fit. Spaces that would run past the column are
/// moved to the front of the next segment, so only a lone overlong word can
/// make a segment wider than `width`.
pub(crate) fn wrap_visible(text: &str, width: usize, break_on_hyphens: bool) -> Vec<String> {
    let splitter = if break_on_hyphens {
        WordSplitter::HyphenSplitter
    } else {
        WordSplitter::NoHyphenation
    };
    let chunks = chunks(text, &splitter);

    let mut segments = Vec::new();
    let mut carry = String::new();
    for line in wrap_first_fit(&chunks, &[width as f64]) {
        let text: String = line.iter().flat_map(|c| [c.word, c.whitespace]).collect();
        let content_len = text.trim_end_matches(' ').chars().count();
        let (keep, overflow) = text.split_at(byte_offset(&text, width.max(content_len)));

        let mut segment = std::mem::take(&mut carry);
        segment.push_str(keep);
        carry.push_str(overflow);
        segments.push(segment);
    }
    if !carry.is_empty() {
        segments.push(carry);
    }

    segments
}
