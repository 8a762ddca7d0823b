use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;
use trellis_router::{ParameterMap, Route, Router, SearchForm};

use crate::config::Config;
use crate::pages::PageKind;

/// Application state shared across handlers
///
/// The router is immutable after startup, so it is shared without a lock.
#[derive(Debug, Clone)]
pub struct AppState {
    router: Arc<Router>,
    pages: Arc<HashMap<String, PageKind>>,
}

impl AppState {
    /// `pages` maps route names to the view that renders them
    pub fn new(router: Router, pages: HashMap<String, PageKind>) -> Self {
        Self {
            router: Arc::new(router),
            pages: Arc::new(pages),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.build_router()?, config.pages()))
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn page_for(&self, route: &Route) -> Option<PageKind> {
        self.pages.get(&route.name).copied()
    }

    /// First route, in matching order, rendered by `page`
    pub fn route_for(&self, page: PageKind) -> Option<&Route> {
        self.router
            .routes()
            .iter()
            .find(|route| self.page_for(route) == Some(page))
    }

    /// Builds a link to `page`; `None` when no route renders it or the
    /// parameters do not fill its template
    pub fn link(&self, page: PageKind, params: &ParameterMap) -> Option<String> {
        let route = self.route_for(page)?;
        match self.router.url_for(&route.name, params) {
            Ok(request) => Some(request.into_path()),
            Err(err) => {
                debug!(route = %route.name, error = %err, "link not built");
                None
            }
        }
    }

    /// Search form of a page
    ///
    /// The query fills the last parameter of the target route; the current
    /// parameters are sent along as fixed values.
    pub fn search_form(&self, page: PageKind, params: &ParameterMap) -> Option<SearchForm> {
        let target = self.route_for(page.search_target()?)?;
        let param = target.template.param_names().last()?;

        let form = params
            .iter()
            .filter(|(name, _)| name.as_str() != param)
            .fold(SearchForm::new(target.name.as_str(), param), |form, (name, value)| {
                form.with_param(name.as_str(), value.clone())
            });
        Some(form)
    }
}
