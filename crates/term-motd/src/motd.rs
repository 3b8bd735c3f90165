//! Assembly of message-of-the-day files.
//!
//! A MOTD is made of an optional header, the body, an optional link to the
//! full announcement and an optional footer. The assembled text is wrapped
//! to the terminal width, indented, and written back over the body file.

use ansi_wrap::AnsiWrapper;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static HTTP_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Files and link making up a MOTD.
#[derive(Debug, Clone)]
pub struct MotdParts {
    /// Body of the MOTD; rewritten with the result.
    pub body: PathBuf,
    pub head: Option<PathBuf>,
    pub foot: Option<PathBuf>,
    /// URL added after the body.
    pub link: Option<String>,
}

/// Layout of the MOTD.
#[derive(Debug, Clone)]
pub struct MotdSettings {
    pub wrapper: AnsiWrapper,
    pub indent: String,
    pub link_header: String,
}

/// Wrap, indent and add header/footer to the MOTD body file, in place.
///
/// Returns the path of the updated file.
pub fn accommodate_motd(parts: &MotdParts, settings: &MotdSettings) -> Result<PathBuf> {
    let files: Vec<&Path> = [parts.head.as_deref(), Some(parts.body.as_path()), parts.foot.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    log::debug!(
        "Parts included in the MOTD: {}",
        files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let head = parts.head.as_deref().map(read_part).transpose()?;
    let body = read_part(&parts.body)?;
    let foot = parts.foot.as_deref().map(read_part).transpose()?;

    let text = compose_motd(
        head.as_deref(),
        &body,
        foot.as_deref(),
        parts.link.as_deref(),
        &settings.link_header,
    );

    let width = settings.wrapper.column_width();
    for url in long_urls(&text, width) {
        log::warn!(
            "Found a URL longer than ANSI text width: {} ({} char)",
            url,
            url.chars().count()
        );
    }

    let motd = format_motd(&text, &settings.wrapper, &settings.indent);
    fs::write(&parts.body, motd).with_context(|| {
        format!(
            "Failed to open ANSI text file to update its contents: '{}'",
            parts.body.display()
        )
    })?;
    log::info!(
        "Reformatted contents of ANSI text file '{}' to {} characters",
        parts.body.display(),
        width
    );

    Ok(parts.body.clone())
}

fn read_part(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read text file: '{}'", path.display()))?;
    log::info!("Added contents of '{}' to ANSI text file", path.display());
    Ok(text)
}

/// Concatenate the parts of the MOTD.
///
/// The link block goes between body and footer, or at the end without footer.
pub fn compose_motd(
    head: Option<&str>,
    body: &str,
    foot: Option<&str>,
    link: Option<&str>,
    link_header: &str,
) -> String {
    let mut text = String::new();
    text.push_str(head.unwrap_or_default());
    text.push_str(body);
    if let Some(link) = link {
        text.push_str(&format!("\n{link_header}\n{link}\n"));
    }
    text.push_str(foot.unwrap_or_default());
    text
}

/// URLs in `text` longer than `width` characters, which will overflow once wrapped.
pub fn long_urls(text: &str, width: usize) -> Vec<&str> {
    if width == 0 {
        return Vec::new();
    }
    HTTP_URL
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| url.chars().count() > width)
        .collect()
}

/// Wrap every line of `text` and prefix non-blank lines with `indent`.
pub fn format_motd(text: &str, wrapper: &AnsiWrapper, indent: &str) -> String {
    let mut lines = Vec::new();
    for line in text.lines() {
        for wrapped in wrapper.wrap(line) {
            if wrapped.trim().is_empty() {
                lines.push(wrapped);
            } else {
                lines.push(format!("{indent}{wrapped}"));
            }
        }
    }
    lines.join("\n") + "\n"
}
