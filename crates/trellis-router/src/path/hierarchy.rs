/// Lazy iterator over a path and its ancestors
///
/// For `/blogs/[blogID]/comments` yields `/blogs/[blogID]/comments`,
/// `/blogs/[blogID]`, `/blogs`, then `/`. Only borrows from the input, so
/// it works on request paths and template patterns alike.
///
/// # Examples
///
/// ```
/// use trellis_router::path::PathHierarchy;
///
/// let paths: Vec<&str> = PathHierarchy::new("/a/b").collect();
/// assert_eq!(paths, vec!["/a/b", "/a", "/"]);
/// ```
#[derive(Debug, Clone)]
pub struct PathHierarchy<'a> {
    current: Option<&'a str>,
}

impl<'a> PathHierarchy<'a> {
    /// Starts at `path` itself; the path is expected to be normalized
    pub fn new(path: &'a str) -> Self {
        Self {
            current: Some(path),
        }
    }
}

impl<'a> Iterator for PathHierarchy<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = match current.rfind('/') {
            _ if current == "/" => None,
            Some(0) => Some("/"),
            Some(slash) => Some(&current[..slash]),
            None => None,
        };

        Some(current)
    }
}
