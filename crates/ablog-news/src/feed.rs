//! Scraping of ABlog HTML newsfeeds.
//!
//! ABlog renders every post of a feed page as an `<h2>` heading wrapping a
//! link to the post, followed by a list of post metadata whose first item is
//! the date behind a calendar icon:
//!
//! ```html
//! <h2><a href="../../news/2021/test/">Test news item</a></h2>
//! <ul class="ablog-archive">
//!   <li><i class="fa fa-calendar"></i> 01/01/2021</li>
//! </ul>
//! ```

use crate::error::{NewsError, NewsResult};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fs;
use std::path::Path;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<h2\b[^>]*>(.*?)</h2\s*>").unwrap());

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#).unwrap()
});

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li\s*>").unwrap());

static ICON_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</i\s*>([^<]*)").unwrap());

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?:([0-9]+)|[xX]([0-9a-fA-F]+));").unwrap());

/// Top entry of a newsfeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsEntry {
    /// Title of the news post.
    pub title: String,
    /// Link to the post as written in the feed (usually relative).
    pub html_link: String,
    /// Publication date as displayed in the feed.
    pub date: String,
}

/// Extract the first news entry of an ABlog HTML feed.
pub fn top_news(html: &str) -> NewsResult<NewsEntry> {
    let heading = HEADING
        .captures(html)
        .ok_or_else(|| malformed("missing news header (H2)"))?;
    let (heading_inner, heading_end) = match (heading.get(1), heading.get(0)) {
        (Some(inner), Some(whole)) => (inner.as_str(), whole.end()),
        _ => return Err(malformed("missing news header (H2)")),
    };

    let link = LINK
        .captures(heading_inner)
        .ok_or_else(|| malformed("missing link in news header"))?;
    let html_link = decode_entities(&link[1]);
    let title = text_content(&link[2]);

    // Metadata belongs to the same post: stop at the next heading.
    let post = &html[heading_end..];
    let post = post
        .find("<h2")
        .map_or(post, |next| &post[..next]);

    let date = LIST_ITEM
        .captures(post)
        .and_then(|item| {
            ICON_TAIL
                .captures(&item[1])
                .map(|tail| decode_entities(&tail[1]).trim().to_string())
        })
        .filter(|date| !date.is_empty())
        .ok_or_else(|| malformed("missing date of news entry"))?;

    Ok(NewsEntry {
        title,
        html_link,
        date,
    })
}

/// Read an ABlog HTML feed from `path` and extract its first news entry.
pub fn read_top_news(path: &Path) -> NewsResult<NewsEntry> {
    let html = fs::read_to_string(path).map_err(|source| NewsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read contents of file '{}'", path.display());

    let entry = top_news(&html)?;
    log::info!("Found MOTD news entry from {}: '{}'", entry.date, entry.title);
    Ok(entry)
}

fn malformed(reason: &str) -> NewsError {
    NewsError::MalformedFeed {
        reason: reason.to_string(),
    }
}

/// Plain text of an HTML fragment: tags removed, entities decoded, trimmed.
fn text_content(fragment: &str) -> String {
    decode_entities(&TAG.replace_all(fragment, ""))
        .trim()
        .to_string()
}

/// Decode the HTML entities that appear in feed titles and links.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let numeric = NUMERIC_ENTITY.replace_all(s, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(dec), _) => dec.as_str().parse().ok(),
            (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });

    // `&amp;` goes last so that `&amp;lt;` stays `&lt;`.
    numeric
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
