//! Validation of site URLs.

use crate::error::{NewsError, NewsResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Generic URI split from RFC 3986, appendix B.
static URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .unwrap()
});

/// URL split into `<scheme>://<netloc><path>?<query>#<fragment>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl {
    pub scheme: String,
    pub netloc: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// Parse and validate `url`.
///
/// Scheme and domain are required; an empty path is filled in with `/`.
pub fn parse_url(url: &str) -> NewsResult<SplitUrl> {
    let malformed = |reason: &str| NewsError::MalformedUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    if url.chars().any(char::is_whitespace) {
        return Err(malformed("whitespace is not allowed"));
    }

    let caps = URI.captures(url).ok_or_else(|| malformed("not a URL"))?;
    let part = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();

    let mut split = SplitUrl {
        scheme: part(1).to_ascii_lowercase(),
        netloc: part(2),
        path: part(3),
        query: part(4),
        fragment: part(5),
    };

    if split.scheme.is_empty() || split.netloc.is_empty() {
        return Err(malformed("protocol and/or domain missing"));
    }
    if split.path.is_empty() {
        split.path = "/".to_string();
    }

    Ok(split)
}

impl SplitUrl {
    /// Resolve `link`, as found on the page at this URL, to an absolute URL.
    pub fn join(&self, link: &str) -> SplitUrl {
        if let Ok(absolute) = parse_url(link) {
            return absolute;
        }

        let (rest, fragment) = link.split_once('#').unwrap_or((link, ""));
        let (link_path, query) = rest.split_once('?').unwrap_or((rest, ""));

        let path = if link_path.is_empty() {
            self.path.clone()
        } else if link_path.starts_with('/') {
            remove_dot_segments(link_path)
        } else {
            let dir = self.path.rfind('/').map_or("/", |i| &self.path[..=i]);
            remove_dot_segments(&format!("{dir}{link_path}"))
        };

        let query = if link_path.is_empty() && query.is_empty() {
            self.query.clone()
        } else {
            query.to_string()
        };

        SplitUrl {
            scheme: self.scheme.clone(),
            netloc: self.netloc.clone(),
            path,
            query,
            fragment: fragment.to_string(),
        }
    }
}

impl fmt::Display for SplitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.netloc, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

/// Normalize `.` and `..` segments of an absolute path.
///
/// `..` above the root is dropped.
fn remove_dot_segments(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut out: Vec<&str> = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." | "" if i != last => {}
            ".." => {
                out.pop();
                if i == last {
                    out.push("");
                }
            }
            "." => out.push(""),
            s => out.push(s),
        }
    }

    format!("/{}", out.join("/"))
}
