//! Header data of RST news posts.
//!
//! Only the first section title and the `:date:` field are read; the body of
//! the post is left alone.

use crate::error::{NewsError, NewsResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

static DATE_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*:date:\s*(.*?)\s*$").unwrap());

/// Characters RST accepts as section adornment.
const ADORNMENT_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Title and date of a news post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostInfo {
    /// Path of the RST source.
    pub source: PathBuf,
    pub title: String,
    pub date: String,
}

/// Read the title and date of the RST post `rst`, found at `source`.
pub fn post_info(rst: &str, source: &Path) -> NewsResult<PostInfo> {
    let lines: Vec<&str> = rst.lines().collect();

    let title = find_title(&lines).ok_or_else(|| NewsError::MissingTitle {
        source_path: source.to_path_buf(),
    })?;

    let date = lines
        .iter()
        .find_map(|line| DATE_FIELD.captures(line).map(|caps| caps[1].to_string()))
        .filter(|date| !date.is_empty())
        .ok_or_else(|| NewsError::MissingDate {
            source_path: source.to_path_buf(),
        })?;

    Ok(PostInfo {
        source: source.to_path_buf(),
        title,
        date,
    })
}

/// Read the RST post at `path` and return its title and date.
///
/// The returned `source` is the canonical path of the file.
pub fn read_post_info(path: &Path) -> NewsResult<PostInfo> {
    let io_err = |source| NewsError::Io {
        path: path.to_path_buf(),
        source,
    };
    let rst = fs::read_to_string(path).map_err(io_err)?;
    let source = fs::canonicalize(path).map_err(io_err)?;

    let info = post_info(&rst, &source)?;
    log::info!("Found RST news post from {}: '{}'", info.date, info.title);
    Ok(info)
}

/// A line made of one adornment character repeated, e.g. `=====`.
fn adornment(line: &str) -> Option<(char, usize)> {
    let line = line.trim_end();
    let first = line.chars().next()?;
    if !ADORNMENT_CHARS.contains(first) || !line.chars().all(|c| c == first) {
        return None;
    }
    Some((first, line.chars().count()))
}

/// First section title, either underlined or over- and underlined.
fn find_title(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // Overline, title, underline.
        if let Some((ch, len)) = adornment(line) {
            if let (Some(text), Some(under)) = (lines.get(i + 1), lines.get(i + 2)) {
                let title = text.trim();
                if !title.is_empty()
                    && adornment(under) == Some((ch, len))
                    && len >= title.chars().count()
                {
                    return Some(title.to_string());
                }
            }
            continue;
        }

        // Title followed by underline.
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        if let Some((_, len)) = lines.get(i + 1).and_then(|under| adornment(under)) {
            let title = line.trim();
            if len >= title.chars().count() {
                return Some(title.to_string());
            }
        }
    }
    None
}
