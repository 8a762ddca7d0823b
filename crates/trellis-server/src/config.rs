// File: src/config.rs
// Purpose: Configuration parsing from trellis.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use trellis_router::{Layout, Route, Router, TitleTemplate};

use crate::pages::PageKind;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "TRELLIS_CONFIG";
/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "TRELLIS_PORT";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    /// Layouts, registered before routes
    #[serde(default = "default_layouts")]
    pub layouts: Vec<LayoutConfig>,

    /// Ordered route table
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Routing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Whether literal segments ignore ASCII case (default: false)
    #[serde(default)]
    pub case_insensitive: bool,
}

/// One route of the route table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub name: String,
    pub pattern: String,
    pub page: PageKind,

    /// Title pattern with `{param}` placeholders
    #[serde(default)]
    pub title: Option<String>,
}

/// One layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,

    #[serde(default = "default_scope")]
    pub scope: String,

    #[serde(default)]
    pub title_default: Option<String>,

    /// Wraps nested page titles, `%s` marks the page title
    #[serde(default)]
    pub title_template: Option<String>,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_scope() -> String {
    "/".to_string()
}

fn default_layouts() -> Vec<LayoutConfig> {
    vec![LayoutConfig {
        name: "root".to_string(),
        scope: default_scope(),
        title_default: Some("My Website".to_string()),
        title_template: Some("%s | My Website".to_string()),
    }]
}

fn default_routes() -> Vec<RouteConfig> {
    let route = |name: &str, pattern: &str, page: PageKind, title: Option<&str>| RouteConfig {
        name: name.to_string(),
        pattern: pattern.to_string(),
        page,
        title: title.map(str::to_string),
    };

    vec![
        route("home", "/", PageKind::Home, Some("Home")),
        route("services", "/services", PageKind::Services, None),
        route("blogs", "/blogs", PageKind::Blogs, None),
        route("blog", "/blogs/[blogID]", PageKind::Blog, Some("Blog {blogID}")),
        route("comments", "/blogs/[blogID]/comments", PageKind::Comments, None),
        route(
            "comment",
            "/blogs/[blogID]/comments/[commentID]",
            PageKind::Comment,
            None,
        ),
        route("files", "/files/[[...filePath]]", PageKind::Files, Some("Files")),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            routing: RoutingConfig::default(),
            layouts: default_layouts(),
            routes: default_routes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LayoutConfig {
    fn to_layout(&self) -> Result<Layout> {
        let layout = Layout::new(self.name.as_str(), &self.scope)
            .with_context(|| format!("Invalid scope for layout '{}'", self.name))?;

        let title = match (&self.title_default, &self.title_template) {
            (None, None) => None,
            (default, template) => {
                let title = TitleTemplate::new(default.clone().unwrap_or_default());
                Some(match template {
                    Some(template) => title.with_template(template.as_str()),
                    None => title,
                })
            }
        };

        Ok(match title {
            Some(title) => layout.with_title(title),
            None => layout,
        })
    }
}

impl RouteConfig {
    fn to_route(&self) -> Result<Route> {
        let route = Route::named(self.name.as_str(), &self.pattern)
            .with_context(|| format!("Invalid pattern for route '{}'", self.name))?;

        Ok(match &self.title {
            Some(title) => route.with_title(title.as_str()),
            None => route,
        })
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // A missing file means "use the defaults"
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from `$TRELLIS_CONFIG` or `./trellis.toml`,
    /// then apply `$TRELLIS_PORT`
    pub fn load_default() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "trellis.toml".to_string());
        let mut config = Self::load(&path)?;

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port
                .parse()
                .with_context(|| format!("{} is not a valid port: {:?}", PORT_ENV, port))?;
        }

        Ok(config)
    }

    /// Builds the router; any registration error must stop startup
    pub fn build_router(&self) -> Result<Router> {
        let mut router = Router::with_case_insensitive(self.routing.case_insensitive);

        for layout in &self.layouts {
            router
                .add_layout(layout.to_layout()?)
                .with_context(|| format!("Failed to register layout '{}'", layout.name))?;
        }

        for route in &self.routes {
            router
                .add_route(route.to_route()?)
                .with_context(|| format!("Failed to register route '{}'", route.name))?;
        }

        Ok(router)
    }

    /// Route name → page that renders it
    pub fn pages(&self) -> HashMap<String, PageKind> {
        self.routes
            .iter()
            .map(|route| (route.name.clone(), route.page))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_router::RouteError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert!(!config.routing.case_insensitive);
        assert_eq!(config.routes.len(), 7);
        assert_eq!(config.layouts[0].scope, "/");
    }

    #[test]
    fn test_empty_config_uses_demo_routes() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config.routes.len(), 7);
        assert!(config.build_router().is_ok());
    }

    #[test]
    fn test_custom_routes_replace_defaults() {
        let toml = r#"
            [server]
            port = 8080

            [routing]
            case_insensitive = true

            [[routes]]
            name = "post"
            pattern = "/posts/[postID]"
            page = "blog"
            title = "Post {postID}"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.routing.case_insensitive);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].page, PageKind::Blog);

        let router = config.build_router().unwrap();
        assert!(router.match_route("/POSTS/9").is_ok());
    }

    #[test]
    fn test_ambiguous_routes_fail_startup() {
        let toml = r#"
            [[routes]]
            name = "a"
            pattern = "/blogs/[blogID]"
            page = "blog"

            [[routes]]
            name = "b"
            pattern = "/blogs/[id]"
            page = "blog"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.build_router().unwrap_err();

        let cause = err.downcast_ref::<RouteError>().unwrap();
        assert!(matches!(cause, RouteError::AmbiguousRoute { .. }));
    }

    #[test]
    fn test_unknown_page_rejected() {
        let toml = r#"
            [[routes]]
            name = "about"
            pattern = "/about"
            page = "about"
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let config = Config::load("does-not-exist.toml").unwrap();
        assert_eq!(config.routes.len(), 7);
    }
}
