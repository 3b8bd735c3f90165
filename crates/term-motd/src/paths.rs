//! Helpers for file paths given on the command line.

use std::path::{Path, PathBuf};

/// Clap value parser accepting existing directories only.
pub fn valid_dirpath(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("Directory '{s}' does not exist"))
    }
}

/// Extension of `path` including the leading dot, or an empty string.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// File name of `path` with its extension replaced by `extension` (e.g. `".html"`).
pub fn change_file_extension(path: &Path, extension: &str) -> String {
    let new_path = path.with_extension(extension.trim_start_matches('.'));
    let name = new_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    log::debug!(
        "File name '{}' with extension '{}' generated from path '{}'",
        name,
        extension,
        path.display()
    );
    name
}

/// Absolute version of `path`, with symlinks resolved if it exists.
pub fn resolve_path(path: &Path) -> PathBuf {
    let resolved = path
        .canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());

    log::debug!(
        "File path '{}' resolved to '{}'",
        path.display(),
        resolved.display()
    );
    resolved
}

/// Name of the last directory in `path`.
///
/// Purely lexical: a trailing slash marks the last component as a directory,
/// otherwise it is taken as a file name.
pub fn bottom_dir(path: &str) -> String {
    let dirpath = path.rfind('/').map_or("", |i| &path[..i]);
    let lastdir = dirpath.rsplit('/').next().unwrap_or_default();

    log::debug!("Last directory in '{}' determined as '{}'", path, lastdir);
    lastdir.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dirpath_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_string_lossy().into_owned();
        assert_eq!(valid_dirpath(&dir), Ok(tmp.path().to_path_buf()));

        let file = tmp.path().join("file.txt");
        fs::write(&file, "").unwrap();
        let file = file.to_string_lossy().into_owned();
        assert_eq!(
            valid_dirpath(&file),
            Err(format!("Directory '{file}' does not exist"))
        );
    }

    #[test]
    fn extensions() {
        assert_eq!(file_extension(Path::new("news/post.rst")), ".rst");
        assert_eq!(file_extension(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(file_extension(Path::new("README")), "");

        assert_eq!(
            change_file_extension(Path::new("/site/news/ablog_newspost_simple.rst"), ".html"),
            "ablog_newspost_simple.html"
        );
        assert_eq!(change_file_extension(Path::new("motd"), ".ansi"), "motd.ansi");
    }

    #[test]
    fn resolve_existing_and_missing_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("motd.ansi");
        fs::write(&file, "").unwrap();
        assert_eq!(resolve_path(&file), file.canonicalize().unwrap());

        let missing = Path::new("does-not-exist.txt");
        let resolved = resolve_path(missing);
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("does-not-exist.txt"));
    }

    #[test]
    fn bottom_dir_is_lexical() {
        assert_eq!(bottom_dir("/root/ablog/index.html"), "ablog");
        assert_eq!(bottom_dir("/root/ablog/"), "ablog");
        assert_eq!(bottom_dir("/root/ablog"), "root");
        assert_eq!(bottom_dir("/"), "");
        assert_eq!(bottom_dir("index.html"), "");
    }
}
