//! # Trellis Router
//!
//! Route matching and path building for file-routed web applications:
//! - Static routes (`/services`)
//! - Dynamic segments (`/blogs/[blogID]`)
//! - Catch-all segments (`/docs/[...slug]`)
//! - Optional catch-all segments (`/files/[[...filePath]]`)
//! - Nested layouts and inherited page titles
//! - Navigation by building paths from templates and parameter values
//!
//! Routes are registered once from an ordered list of patterns. The router
//! rejects templates it could not choose between, so every path matches at
//! most one most-specific route.
//!
//! ## Matching Order
//!
//! When several templates accept a path, the one with more literal segments
//! wins. Two templates that accept a common path and have the same number of
//! literals are ambiguous, and registering the second one fails.
//!
//! ## Example
//!
//! ```
//! use trellis_router::{ParameterMap, Router};
//!
//! let router = Router::from_patterns([
//!     "/blogs/[blogID]",
//!     "/blogs/[blogID]/comments/[commentID]",
//!     "/files/[[...filePath]]",
//! ])
//! .unwrap();
//!
//! let m = router.match_route("/blogs/42/comments/7").unwrap();
//! assert_eq!(m.route.pattern(), "/blogs/[blogID]/comments/[commentID]");
//! assert_eq!(m.params.get_str("commentID"), Some("7"));
//!
//! let m = router.match_route("/files").unwrap();
//! assert_eq!(m.params.get_all("filePath"), Some(&[][..]));
//!
//! let path = router
//!     .url_for("/blogs/[blogID]", &ParameterMap::new().with("blogID", "42"))
//!     .unwrap();
//! assert_eq!(path.path(), "/blogs/42");
//! ```

use std::collections::HashMap;

use tracing::{debug, info};

mod error;
mod layout;
mod metadata;
mod navigate;
mod params;
pub mod path;
pub mod route;

pub use error::{Result, RouteError};
pub use layout::Layout;
pub use metadata::{TitlePattern, TitleTemplate, TITLE_PLACEHOLDER};
pub use navigate::{Dispatcher, MemoryHistory, NavigationRequest, Navigator, SearchForm};
pub use params::{ParamValue, ParameterMap};
pub use path::{is_valid_path, normalize_path, PathHierarchy};
pub use route::{classify_segment, RouteTemplate, Segment};

// ============================================================================
// Core Types
// ============================================================================

/// A registered route: a template plus the name handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Identifier of the route, defaults to the canonical pattern
    pub name: String,
    /// Structural pattern the route matches
    pub template: RouteTemplate,
    /// Page title with `{param}` placeholders
    pub title: Option<TitlePattern>,
}

/// Result of matching a path: the route and its freshly extracted parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    pub params: ParameterMap,
}

impl Route {
    /// Creates a route named after its canonical pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::Route;
    ///
    /// let route = Route::new("/blogs/[blogID]/").unwrap();
    /// assert_eq!(route.name, "/blogs/[blogID]");
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let template = RouteTemplate::parse(pattern)?;
        Ok(Self {
            name: template.pattern(),
            template,
            title: None,
        })
    }

    /// Creates a route with an explicit name
    pub fn named(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self::new(pattern)?.with_name(name))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the page title, e.g. `Blog {blogID}`
    pub fn with_title(mut self, title: impl Into<TitlePattern>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn pattern(&self) -> String {
        self.template.pattern()
    }

    /// Matches this route against a path (case-sensitive)
    pub fn matches(&self, path: &str) -> Option<ParameterMap> {
        self.template.matches(path)
    }
}

// ============================================================================
// Router Implementation
// ============================================================================

/// Registered routes and layouts, read-only once startup is done
///
/// - Routes are kept most specific first, so the first match is the best one
/// - Layouts are keyed by their scope with parameter names erased
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
    layouts: HashMap<String, Layout>,
    case_insensitive: bool,
}

impl Router {
    /// Creates an empty router with case-sensitive literals
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty router, optionally comparing literals ignoring ASCII case
    pub fn with_case_insensitive(case_insensitive: bool) -> Self {
        Self {
            case_insensitive,
            ..Self::default()
        }
    }

    /// Builds a router from an ordered list of pattern strings
    ///
    /// Each route is named after its canonical pattern.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .try_fold(Self::new(), |router, pattern| {
                router.with_route(Route::new(pattern.as_ref())?)
            })
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Adds a route, consuming and returning the router
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::{Route, RouteError, Router};
    ///
    /// let result = Router::new()
    ///     .with_route(Route::new("/blogs/[blogID]").unwrap())
    ///     .and_then(|r| r.with_route(Route::new("/blogs/[id]").unwrap()));
    ///
    /// assert!(matches!(result, Err(RouteError::AmbiguousRoute { .. })));
    /// ```
    pub fn with_route(mut self, route: Route) -> Result<Self> {
        self.add_route(route)?;
        Ok(self)
    }

    /// Adds several routes in order, stopping at the first rejected one
    pub fn with_routes<I>(self, routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Route>,
    {
        routes
            .into_iter()
            .try_fold(self, |router, route| router.with_route(route))
    }

    /// Registers a route
    ///
    /// Fails with `AmbiguousRoute` when an already registered route with the
    /// same number of literals accepts some path this one accepts too, and
    /// with `DuplicateName` when the name is taken.
    pub fn add_route(&mut self, route: Route) -> Result<()> {
        let literals = route.template.literal_count();

        if let Some(existing) = self.routes.iter().find(|r| {
            r.template.literal_count() == literals
                && r.template.overlaps(&route.template, self.case_insensitive)
        }) {
            return Err(RouteError::AmbiguousRoute {
                existing: existing.pattern(),
                conflicting: route.pattern(),
            });
        }

        if self.routes.iter().any(|r| r.name == route.name) {
            return Err(RouteError::DuplicateName { name: route.name });
        }

        info!(name = %route.name, pattern = %route.template, "registered route");

        // Keep most literals first; overlapping routes never share a count
        let pos = self
            .routes
            .partition_point(|r| r.template.literal_count() >= literals);
        self.routes.insert(pos, route);
        Ok(())
    }

    /// Adds a layout, consuming and returning the router
    pub fn with_layout(mut self, layout: Layout) -> Result<Self> {
        self.add_layout(layout)?;
        Ok(self)
    }

    /// Registers a layout; two layouts for the same scope are ambiguous
    pub fn add_layout(&mut self, layout: Layout) -> Result<()> {
        let key = layout.scope.shape_key(self.case_insensitive);
        if let Some(existing) = self.layouts.get(&key) {
            return Err(RouteError::AmbiguousRoute {
                existing: format!("layout `{}` at {}", existing.name, existing.scope),
                conflicting: format!("layout `{}` at {}", layout.name, layout.scope),
            });
        }

        info!(name = %layout.name, scope = %layout.scope, "registered layout");
        self.layouts.insert(key, layout);
        Ok(())
    }

    /// Routes in matching order, most specific first
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn layouts(&self) -> impl Iterator<Item = &Layout> {
        self.layouts.values()
    }

    /// Finds a route by name
    pub fn route_by_name(&self, name: &str) -> Result<&Route> {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RouteError::UnknownRoute {
                name: name.to_string(),
            })
    }

    /// Matches a path against all routes and returns the most specific match
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::{RouteError, Router};
    ///
    /// let router = Router::from_patterns(["/blogs/[blogID]"]).unwrap();
    ///
    /// let m = router.match_route("/blogs/42").unwrap();
    /// assert_eq!(m.params.get_str("blogID"), Some("42"));
    ///
    /// assert!(matches!(
    ///     router.match_route("/nope"),
    ///     Err(RouteError::NoMatch { .. })
    /// ));
    /// ```
    pub fn match_route(&self, path: &str) -> Result<RouteMatch<'_>> {
        let found = self.routes.iter().find_map(|route| {
            route
                .template
                .matches_with_options(path, self.case_insensitive)
                .map(|params| RouteMatch { route, params })
        });

        match found {
            Some(m) => {
                debug!(path, route = %m.route.name, "matched route");
                Ok(m)
            }
            None => {
                debug!(path, "no route matched");
                Err(RouteError::NoMatch {
                    path: path.to_string(),
                })
            }
        }
    }

    /// Builds a path for the named route
    pub fn url_for(&self, name: &str, params: &ParameterMap) -> Result<NavigationRequest> {
        self.route_by_name(name)?.template.build(params)
    }

    /// Finds the nearest layout enclosing a pattern
    ///
    /// For `/blogs/[blogID]/comments` checks in order:
    /// `/blogs/[blogID]/comments`, `/blogs/[blogID]`, `/blogs`, `/`.
    pub fn get_layout(&self, pattern: &str) -> Option<&Layout> {
        let key = RouteTemplate::parse(pattern)
            .ok()?
            .shape_key(self.case_insensitive);
        PathHierarchy::new(&key).find_map(|scope| self.layouts.get(scope))
    }

    /// All layouts wrapping a route, outermost (root) first
    pub fn layouts_for(&self, route: &Route) -> Vec<&Layout> {
        let key = route.template.shape_key(self.case_insensitive);
        let mut chain: Vec<&Layout> = PathHierarchy::new(&key)
            .filter_map(|scope| self.layouts.get(scope))
            .collect();
        chain.reverse();
        chain
    }

    /// Resolves the document title for a match
    ///
    /// The page title is rendered from the route's title pattern. The nearest
    /// layout that declares title settings then applies:
    /// - its template wraps the page title only for routes nested below the
    ///   layout's scope, a page at the layout's own level keeps its title;
    /// - without a page title, the layout's default is used.
    pub fn resolve_title(&self, route_match: &RouteMatch<'_>) -> Option<String> {
        let route = route_match.route;
        let page_title = route
            .title
            .as_ref()
            .map(|title| title.render(&route_match.params));

        let inherited = self
            .layouts_for(route)
            .into_iter()
            .rev()
            .find_map(|layout| layout.title.as_ref().map(|title| (layout, title)));

        match (inherited, page_title) {
            (Some((layout, template)), Some(title))
                if route.template.segments().len() > layout.scope.segments().len() =>
            {
                Some(template.apply(Some(title.as_str())))
            }
            (Some((_, template)), None) => Some(template.apply(None)),
            (_, page_title) => page_title,
        }
    }
}
