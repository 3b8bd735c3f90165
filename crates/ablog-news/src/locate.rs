//! Mapping of rendered HTML links back to RST sources.
//!
//! Sphinx renders the site into a `_website` directory at the root of the
//! project, so the post linked from a feed page lives at the same relative
//! location under the project root, with an `.rst` extension.

use crate::error::{NewsError, NewsResult};
use std::path::{Component, Path, PathBuf};

/// Name of the directory holding the rendered HTML pages.
const WEBSITE_DIR: &str = "_website";

/// Find the RST file of the post that `html_link` (as found in `html_file`) points to.
pub fn rst_path_from_html_link(html_link: &str, html_file: &Path) -> NewsResult<PathBuf> {
    let html_file = std::path::absolute(html_file).map_err(|source| NewsError::Io {
        path: html_file.to_path_buf(),
        source,
    })?;

    let root: PathBuf = {
        let components: Vec<Component<'_>> = html_file.components().collect();
        let level = components
            .iter()
            .position(|c| c.as_os_str() == WEBSITE_DIR)
            .ok_or_else(|| NewsError::MissingWebsiteDir {
                html_file: html_file.clone(),
            })?;
        components[..level].iter().collect()
    };

    rst_path_in_dir(html_link, &root)
}

/// Find the RST file of the post that `html_link` points to, under the project directory `root`.
pub fn rst_path_in_dir(html_link: &str, root: &Path) -> NewsResult<PathBuf> {
    // Keep only the named parts of the link.
    let link: PathBuf = Path::new(html_link)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    let rst_path = root.join(&link);
    let candidates = [rst_path.with_extension("rst"), rst_path];
    log::debug!(
        "Tentative paths to RST files: {}",
        candidates
            .iter()
            .map(|p| format!("'{}'", p.display()))
            .collect::<Vec<_>>()
            .join(",")
    );

    for candidate in &candidates {
        if candidate.is_file() {
            if let Ok(found) = candidate.canonicalize() {
                log::debug!("Found RST file: '{}'", found.display());
                return Ok(found);
            }
        }
        log::debug!("Tentative RST file not found: '{}'", candidate.display());
    }

    Err(NewsError::RstNotFound {
        name: link
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        root: root.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn locate_rst_from_link() {
        let tmp = tempfile::tempdir().unwrap();
        let posts = tmp.path().join("examples");
        fs::create_dir_all(&posts).unwrap();
        let rst = posts.join("ablog_newspost_simple.rst");
        fs::write(&rst, "Title\n=====\n").unwrap();

        let html_file = tmp
            .path()
            .join("_website")
            .join("examples")
            .join("ablog_newsfeed.html");
        let found =
            rst_path_from_html_link("../../examples/ablog_newspost_simple", &html_file).unwrap();

        assert_eq!(found, rst.canonicalize().unwrap());
    }

    #[test]
    fn link_with_trailing_slash() {
        let tmp = tempfile::tempdir().unwrap();
        let news = tmp.path().join("news").join("2021");
        fs::create_dir_all(news.join("test")).unwrap();
        let rst = news.join("test.rst");
        fs::write(&rst, "Title\n=====\n").unwrap();

        let html_file = tmp.path().join("_website").join("news").join("index.html");
        let found = rst_path_from_html_link("../../../news/2021/test/", &html_file).unwrap();

        // The `test` directory exists too, but only the RST file qualifies.
        assert_eq!(found, rst.canonicalize().unwrap());
    }

    #[test]
    fn missing_website_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let html_file = tmp.path().join("site").join("index.html");
        let err = rst_path_from_html_link("post", &html_file).unwrap_err();
        assert!(matches!(err, NewsError::MissingWebsiteDir { .. }));
    }

    #[test]
    fn missing_rst_file() {
        let tmp = tempfile::tempdir().unwrap();
        let html_file = tmp.path().join("_website").join("index.html");
        let err = rst_path_from_html_link("news/missing", &html_file).unwrap_err();
        match err {
            NewsError::RstNotFound { name, root } => {
                assert_eq!(name, "missing");
                assert_eq!(root, tmp.path());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn locate_in_project_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let news = tmp.path().join("news");
        fs::create_dir_all(&news).unwrap();
        let rst = news.join("outage.rst");
        fs::write(&rst, "Outage\n======\n").unwrap();

        // The extension of the rendered page is swapped for `.rst`.
        let found = rst_path_in_dir("../news/outage.html", tmp.path()).unwrap();
        assert_eq!(found, rst.canonicalize().unwrap());

        let found = rst_path_in_dir("../news/outage", tmp.path()).unwrap();
        assert_eq!(found, rst.canonicalize().unwrap());
    }
}
