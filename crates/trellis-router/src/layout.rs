//! Layouts: scoped wrappers around every route below a pattern prefix

use crate::error::Result;
use crate::metadata::TitleTemplate;
use crate::route::RouteTemplate;

/// A layout wrapping every route whose pattern lies under its scope
///
/// The scope is a template prefix: `/` wraps everything, `/blogs/[blogID]`
/// wraps the blog page and its comment pages.
///
/// # Examples
///
/// ```
/// use trellis_router::{Layout, TitleTemplate};
///
/// let root = Layout::root("root")
///     .with_title(TitleTemplate::new("My Website").with_template("%s | My Website"));
/// assert_eq!(root.scope_pattern(), "/");
///
/// let blog = Layout::new("blog", "/blogs/[blogID]").unwrap();
/// assert_eq!(blog.scope_pattern(), "/blogs/[blogID]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: String,
    pub scope: RouteTemplate,
    pub title: Option<TitleTemplate>,
}

impl Layout {
    /// Creates a layout for the given scope pattern
    pub fn new(name: impl Into<String>, scope: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            scope: RouteTemplate::parse(scope)?,
            title: None,
        })
    }

    /// Creates the layout wrapping every route
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: RouteTemplate::root(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: TitleTemplate) -> Self {
        self.title = Some(title);
        self
    }

    pub fn scope_pattern(&self) -> String {
        self.scope.pattern()
    }
}
