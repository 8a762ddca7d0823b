//! Navigation: building target paths and handing them to a navigator
//!
//! The dispatcher itself holds no state between calls. Each dispatch is a
//! pure path construction followed by exactly one call to the navigator,
//! and no call at all when construction fails.

use std::fmt;

use tracing::{debug, warn};

use crate::error::Result;
use crate::params::{ParamValue, ParameterMap};
use crate::route::RouteTemplate;
use crate::Router;

/// Concrete path to transition to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationRequest {
    path: String,
}

impl NavigationRequest {
    pub(crate) fn new(path: String) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn into_path(self) -> String {
        self.path
    }
}

impl fmt::Display for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for NavigationRequest {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

/// Side-effecting capability that performs the actual transition
///
/// A browser history push, an HTTP redirect, or a test recorder.
pub trait Navigator {
    fn navigate(&mut self, request: &NavigationRequest);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, request: &NavigationRequest) {
        (**self).navigate(request)
    }
}

/// In-memory history stack, newest entry last
///
/// # Examples
///
/// ```
/// use trellis_router::{Dispatcher, MemoryHistory, ParameterMap, RouteTemplate};
///
/// let template = RouteTemplate::parse("/blogs/[blogID]").unwrap();
/// let mut dispatcher = Dispatcher::new(MemoryHistory::new());
///
/// dispatcher
///     .dispatch(&template, &ParameterMap::new().with("blogID", "42"))
///     .unwrap();
///
/// assert_eq!(dispatcher.navigator().current(), Some("/blogs/42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn navigate(&mut self, request: &NavigationRequest) {
        self.entries.push(request.path().to_string());
    }
}

/// Builds target paths and invokes the navigator once per successful call
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<N> {
    navigator: N,
}

impl<N: Navigator> Dispatcher<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn into_inner(self) -> N {
        self.navigator
    }

    /// Builds the path for `template` and navigates to it
    ///
    /// On error nothing is navigated and the error is returned unchanged.
    pub fn dispatch(
        &mut self,
        template: &RouteTemplate,
        params: &ParameterMap,
    ) -> Result<NavigationRequest> {
        let request = template.build(params).map_err(|err| {
            warn!(template = %template, error = %err, "navigation rejected");
            err
        })?;

        debug!(template = %template, path = request.path(), "navigating");
        self.navigator.navigate(&request);
        Ok(request)
    }

    /// Same as [`Dispatcher::dispatch`], looking the template up by route name
    pub fn dispatch_named(
        &mut self,
        router: &Router,
        name: &str,
        params: &ParameterMap,
    ) -> Result<NavigationRequest> {
        let route = router.route_by_name(name)?;
        self.dispatch(&route.template, params)
    }
}

/// A search box that turns a query into a navigation
///
/// The query fills one target parameter of a named route; fixed parameters
/// (such as the blog being viewed) fill the rest. Blank queries are ignored.
///
/// # Examples
///
/// ```
/// use trellis_router::{Dispatcher, MemoryHistory, Route, Router, SearchForm};
///
/// let router = Router::new()
///     .with_route(Route::named("comment", "/blogs/[blogID]/comments/[commentID]").unwrap())
///     .unwrap();
///
/// let form = SearchForm::new("comment", "commentID").with_param("blogID", "42");
/// let mut dispatcher = Dispatcher::new(MemoryHistory::new());
///
/// let sent = form.submit(&router, &mut dispatcher, " 7 ").unwrap();
/// assert_eq!(sent.unwrap().path(), "/blogs/42/comments/7");
///
/// assert!(form.submit(&router, &mut dispatcher, "   ").unwrap().is_none());
/// assert_eq!(dispatcher.navigator().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SearchForm {
    route: String,
    target: String,
    fixed: ParameterMap,
}

impl SearchForm {
    /// A form targeting parameter `target` of the route named `route`
    pub fn new(route: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            target: target.into(),
            fixed: ParameterMap::new(),
        }
    }

    /// Adds a parameter that is sent with every submission
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.fixed.insert(name, value);
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Submits a query
    ///
    /// Returns `Ok(None)` without navigating when the trimmed query is empty.
    /// A catch-all target receives the query split on `/`.
    pub fn submit<N: Navigator>(
        &self,
        router: &Router,
        dispatcher: &mut Dispatcher<N>,
        query: &str,
    ) -> Result<Option<NavigationRequest>> {
        let query = query.trim();
        if query.is_empty() {
            debug!(route = %self.route, "blank search query, staying put");
            return Ok(None);
        }

        let route = router.route_by_name(&self.route)?;
        let target_is_catch_all = route
            .template
            .segments()
            .iter()
            .any(|s| s.is_catch_all() && s.param_name() == Some(self.target.as_str()));

        let value = if target_is_catch_all {
            ParamValue::Many(
                query
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else {
            ParamValue::One(query.to_string())
        };

        let params = self.fixed.clone().with(self.target.clone(), value);
        dispatcher.dispatch(&route.template, &params).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;

    /// Counts calls so tests can assert "exactly once" and "never"
    #[derive(Default)]
    struct CountingNavigator {
        calls: usize,
    }

    impl Navigator for CountingNavigator {
        fn navigate(&mut self, _request: &NavigationRequest) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_dispatch_navigates_once() {
        let template = RouteTemplate::parse("/blogs/[blogID]").unwrap();
        let mut dispatcher = Dispatcher::new(CountingNavigator::default());

        let request = dispatcher
            .dispatch(&template, &ParameterMap::new().with("blogID", "9"))
            .unwrap();

        assert_eq!(request.path(), "/blogs/9");
        assert_eq!(dispatcher.navigator().calls, 1);
    }

    #[test]
    fn test_dispatch_missing_parameter_never_navigates() {
        let template = RouteTemplate::parse("/blogs/[blogID]/comments/[commentID]").unwrap();
        let mut dispatcher = Dispatcher::new(CountingNavigator::default());

        let err = dispatcher
            .dispatch(&template, &ParameterMap::new().with("blogID", "9"))
            .unwrap_err();

        assert!(matches!(err, RouteError::MissingParameter { ref param, .. } if param == "commentID"));
        assert_eq!(dispatcher.navigator().calls, 0);
    }

    #[test]
    fn test_navigator_by_mutable_reference() {
        let template = RouteTemplate::parse("/services").unwrap();
        let mut history = MemoryHistory::new();

        Dispatcher::new(&mut history)
            .dispatch(&template, &ParameterMap::new())
            .unwrap();

        assert_eq!(history.entries(), &["/services".to_string()]);
    }
}
