//! Page title metadata
//!
//! Routes declare a title pattern with `{param}` placeholders, layouts
//! declare a template such as `%s | My Website` that wraps the titles of
//! every page below them, plus a default for pages without a title.

use crate::params::ParameterMap;

/// Placeholder a layout title template substitutes the page title into
pub const TITLE_PLACEHOLDER: &str = "%s";

/// Route title with `{param}` placeholders, e.g. `Blog {blogID}`
///
/// # Examples
///
/// ```
/// use trellis_router::{ParameterMap, TitlePattern};
///
/// let title = TitlePattern::new("Blog {blogID}");
/// let params = ParameterMap::new().with("blogID", "42");
/// assert_eq!(title.render(&params), "Blog 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePattern(String);

impl TitlePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes every known parameter; unknown placeholders stay as written
    ///
    /// The pattern is scanned once, so substituted values are never
    /// scanned again for placeholders.
    pub fn render(&self, params: &ParameterMap) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = &after[..close];
            match params.get(name) {
                Some(value) => out.push_str(&value.to_string()),
                None => out.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

impl From<&str> for TitlePattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for TitlePattern {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

/// Title settings a layout hands down to nested pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTemplate {
    /// Used when the page declares no title
    pub default: String,
    /// Wraps page titles, `%s` marks where the page title goes
    pub template: Option<String>,
}

impl TitleTemplate {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Produces the document title for a page
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::TitleTemplate;
    ///
    /// let root = TitleTemplate::new("My Website").with_template("%s | My Website");
    /// assert_eq!(root.apply(Some("Home")), "Home | My Website");
    /// assert_eq!(root.apply(None), "My Website");
    /// ```
    pub fn apply(&self, page_title: Option<&str>) -> String {
        match (page_title, &self.template) {
            (Some(title), Some(template)) => template.replace(TITLE_PLACEHOLDER, title),
            (Some(title), None) => title.to_string(),
            (None, _) => self.default.clone(),
        }
    }
}
