//! Path utilities for validation and normalization
//!
//! All functions are pure: same input, same output, no side effects.

use std::borrow::Cow;

pub mod hierarchy;
pub use hierarchy::PathHierarchy;

/// Checks whether a path is already in canonical form
///
/// # Rules
///
/// - Starts with `/`
/// - Contains no `//` and no `\`
/// - Does not end with `/`, except the root `/`
///
/// # Examples
///
/// ```
/// use trellis_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/blogs/42"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("blogs"));
/// assert!(!is_valid_path("/blogs/"));
/// assert!(!is_valid_path("/blogs//42"));
/// assert!(!is_valid_path("/blogs\\42"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalizes a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical, so the
/// common case does not allocate.
///
/// - Trailing slashes: `/files/` → `/files`
/// - Double slashes: `/files//a` → `/files/a`
/// - Backslashes: `\files\a` → `/files/a`
/// - Missing leading slash: `files` → `/files`
///
/// # Examples
///
/// ```
/// use trellis_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/blogs"), Cow::Borrowed("/blogs")));
/// assert_eq!(normalize_path("/blogs/42/"), "/blogs/42");
/// assert_eq!(normalize_path("\\files\\a"), "/files/a");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/files/a/b/c"));
        assert!(is_valid_path("/blogs/[blogID]/comments"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("files"));
        assert!(!is_valid_path("/files/"));
        assert!(!is_valid_path("/files//a"));
    }

    #[test]
    fn test_normalize_path_borrowed_when_valid() {
        assert!(matches!(normalize_path("/services"), Cow::Borrowed("/services")));
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_path_fixes_mistakes() {
        assert_eq!(normalize_path("/services/"), "/services");
        assert_eq!(normalize_path("/files///a//b"), "/files/a/b");
        assert_eq!(normalize_path("\\blogs\\42"), "/blogs/42");
        assert_eq!(normalize_path("blogs/42"), "/blogs/42");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_path_hierarchy() {
        let paths: Vec<&str> = PathHierarchy::new("/blogs/[blogID]/comments").collect();
        assert_eq!(
            paths,
            vec!["/blogs/[blogID]/comments", "/blogs/[blogID]", "/blogs", "/"]
        );

        let paths: Vec<&str> = PathHierarchy::new("/").collect();
        assert_eq!(paths, vec!["/"]);
    }

    #[test]
    fn test_path_hierarchy_short_circuit() {
        let mut iter = PathHierarchy::new("/a/b/c/d");
        assert_eq!(iter.find(|&p| p == "/a/b"), Some("/a/b"));
        assert_eq!(iter.next(), Some("/a"));
    }
}
