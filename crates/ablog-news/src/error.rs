//! Error types for ablog-news.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading news entries.
#[derive(Error, Debug)]
pub enum NewsError {
    /// The HTML feed does not have the expected ABlog structure.
    #[error("Malformed HTML newsfeed from ABlog, {reason}")]
    MalformedFeed { reason: String },

    /// The RST post has no section title.
    #[error("Malformed RST news post, missing title: '{}'", .source_path.display())]
    MissingTitle { source_path: PathBuf },

    /// The RST post has no `:date:` field.
    #[error("Malformed RST news post, missing date: '{}'", .source_path.display())]
    MissingDate { source_path: PathBuf },

    /// URL without protocol or domain.
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// The HTML file does not live under a `_website` directory.
    #[error("Missing '_website' directory in '{}', cannot find RST file from HTML link", .html_file.display())]
    MissingWebsiteDir { html_file: PathBuf },

    /// None of the candidate RST paths is a file.
    #[error("Could not find RST file '{name}' in '{}'", .root.display())]
    RstNotFound { name: String, root: PathBuf },

    /// I/O error while reading a feed or post.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for news operations.
pub type NewsResult<T> = Result<T, NewsError>;
