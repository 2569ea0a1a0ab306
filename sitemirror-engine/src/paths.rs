//! URL to local filesystem path mapping.
//!
//! Every URL maps to exactly one file under the mirror root, computed from the
//! URL path alone. The mapping never depends on fetch order, so a document can
//! compute where any of its links will be stored before that link is fetched.

use std::path::{Component, Path, PathBuf};
use url::Url;

/// File name used for directory-like URLs.
pub const INDEX_FILE: &str = "index.html";

/// Map `url` to its file under `root`.
///
/// Paths that are empty, end in `/` or whose last segment has no extension
/// are treated as directories and get [`INDEX_FILE`] appended. The query and
/// fragment are ignored.
pub fn local_path(root: &Path, url: &Url) -> PathBuf {
    let raw = url.path();
    let segments: Vec<String> = raw.split('/').filter_map(clean_segment).collect();

    let mut path = root.to_path_buf();
    for segment in &segments {
        path.push(segment);
    }

    let directory_like = raw.is_empty()
        || raw.ends_with('/')
        || segments.last().is_none_or(|last| !last.contains('.'));
    if directory_like {
        path.push(INDEX_FILE);
    }
    path
}

/// Decode one path segment and drop anything that could escape the root.
fn clean_segment(segment: &str) -> Option<String> {
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    match decoded.as_str() {
        "" | "." | ".." => None,
        _ => Some(decoded.replace(['/', '\\'], "_")),
    }
}

/// Relative link from the directory containing `from_file` to `to_file`,
/// always using `/` separators.
pub fn relative_link(from_file: &Path, to_file: &Path) -> Option<String> {
    let from_dir = from_file.parent()?;
    let relative = pathdiff::diff_paths(to_file, from_dir)?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(url: &str) -> PathBuf {
        local_path(Path::new("example.com"), &Url::parse(url).unwrap())
    }

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(map("https://example.com"), PathBuf::from("example.com/index.html"));
        assert_eq!(map("https://example.com/"), PathBuf::from("example.com/index.html"));
    }

    #[test]
    fn test_trailing_slash_maps_to_index() {
        assert_eq!(
            map("https://example.com/docs/"),
            PathBuf::from("example.com/docs/index.html")
        );
    }

    #[test]
    fn test_extensionless_path_maps_to_index() {
        assert_eq!(
            map("https://example.com/about"),
            PathBuf::from("example.com/about/index.html")
        );
        assert_eq!(
            map("https://example.com/blog/post-1"),
            PathBuf::from("example.com/blog/post-1/index.html")
        );
    }

    #[test]
    fn test_file_with_extension_maps_to_file() {
        assert_eq!(map("https://example.com/logo.png"), PathBuf::from("example.com/logo.png"));
        assert_eq!(
            map("https://example.com/static/css/site.css"),
            PathBuf::from("example.com/static/css/site.css")
        );
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        assert_eq!(map("https://example.com/a.js?v=3#x"), PathBuf::from("example.com/a.js"));
        assert_eq!(
            map("https://example.com/page?id=1"),
            map("https://example.com/page?id=2")
        );
    }

    #[test]
    fn test_percent_encoded_segments_are_decoded() {
        assert_eq!(
            map("https://example.com/my%20docs/read%20me.txt"),
            PathBuf::from("example.com/my docs/read me.txt")
        );
    }

    #[test]
    fn test_encoded_traversal_stays_under_root() {
        let path = map("https://example.com/a/%2e%2e/%2e%2e/etc%2fpasswd");
        assert!(path.starts_with("example.com"));
        assert!(!path.components().any(|c| c == Component::ParentDir));
        assert_eq!(path, PathBuf::from("example.com/etc_passwd/index.html"));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let url = Url::parse("https://example.com/x/y.html").unwrap();
        let root = Path::new("out/example.com");
        assert_eq!(local_path(root, &url), local_path(root, &url.clone()));
    }

    #[test]
    fn test_relative_link_same_directory() {
        let from = Path::new("example.com/index.html");
        let to = Path::new("example.com/logo.png");
        assert_eq!(relative_link(from, to), Some("logo.png".to_string()));
    }

    #[test]
    fn test_relative_link_into_subdirectory() {
        let from = Path::new("example.com/index.html");
        let to = Path::new("example.com/about/index.html");
        assert_eq!(relative_link(from, to), Some("about/index.html".to_string()));
    }

    #[test]
    fn test_relative_link_to_parent() {
        let from = Path::new("example.com/blog/post/index.html");
        let to = Path::new("example.com/css/site.css");
        assert_eq!(relative_link(from, to), Some("../../css/site.css".to_string()));
    }

    #[test]
    fn test_relative_link_to_self() {
        let from = Path::new("example.com/about/index.html");
        assert_eq!(relative_link(from, from), Some("index.html".to_string()));
    }
}
