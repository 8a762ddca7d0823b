// File: src/pages.rs
// Purpose: Maud views for the demo page set

use maud::{html, Markup, DOCTYPE};
use serde::{Deserialize, Serialize};
use trellis_router::Layout;

/// The views a route can be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Services,
    Blogs,
    Blog,
    Comments,
    Comment,
    Files,
}

impl PageKind {
    /// Page a search form on this page navigates to
    pub fn search_target(self) -> Option<PageKind> {
        match self {
            PageKind::Blogs => Some(PageKind::Blog),
            PageKind::Comments => Some(PageKind::Comment),
            _ => None,
        }
    }

    /// Page this page links forward to, built from the current parameters
    pub fn next_page(self) -> Option<PageKind> {
        match self {
            PageKind::Blog => Some(PageKind::Comments),
            _ => None,
        }
    }

    fn search_placeholder(self) -> &'static str {
        match self {
            PageKind::Comments => "Search comments...",
            _ => "Search blog...",
        }
    }
}

/// Data a page view is rendered from
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Request path, also the search form's action
    pub path: String,
    /// Parameter values in template order, catch-alls joined by `/`
    pub args: Vec<String>,
    /// Link built for [`PageKind::next_page`]
    pub next_link: Option<String>,
    /// Whether the page carries a search form
    pub searchable: bool,
    pub notice: Option<String>,
}

impl PageContext {
    fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Renders the body of a page
pub fn render(kind: PageKind, ctx: &PageContext) -> Markup {
    let content = match kind {
        PageKind::Home => html! {
            h1 { "Hello!!! Welcome to Trellis" }
            a href="/about" { "About" } br;
            a href="/services" { "Services" } br;
            a href="/blogs" { "Blogs" } br;
        },
        PageKind::Services => html! {
            div { "All Services" }
            div {
                a href="/services/web-development" { "Web Development" } br;
                a href="/services/seo" { "SEO" }
            }
        },
        PageKind::Blogs => html! {
            h1 { "Blogs" }
            (search_form(kind, ctx))
        },
        PageKind::Blog => html! {
            h1 { "Page: " (ctx.arg(0)) }
            @if let Some(href) = &ctx.next_link {
                a href=(href) { "Go to Comments" }
            }
        },
        PageKind::Comments => html! {
            h1 { "All comments of blog " b { (ctx.arg(0)) } }
            (search_form(kind, ctx))
        },
        PageKind::Comment => html! {
            div { "Comment no. " b { i { (ctx.arg(1)) } } " of blog " b { (ctx.arg(0)) "." } }
        },
        PageKind::Files => html! {
            h1 { "file path " i { "/" (ctx.arg(0)) } }
        },
    };

    html! {
        @if let Some(notice) = &ctx.notice {
            p.notice { (notice) }
        }
        (content)
    }
}

fn search_form(kind: PageKind, ctx: &PageContext) -> Markup {
    html! {
        @if ctx.searchable {
            form method="post" action=(ctx.path) {
                input type="text" name="query" placeholder=(kind.search_placeholder());
                button type="submit" { "Search" }
            }
        }
    }
}

/// Wraps a page body in the document shell and its nested layouts
///
/// `layouts` is root first; the root layout is the shell itself, every
/// nested layout adds a wrapping `div`.
pub fn document(title: Option<&str>, layouts: &[&Layout], body: Markup) -> Markup {
    let nested = layouts
        .iter()
        .rev()
        .filter(|layout| !layout.scope.segments().is_empty())
        .fold(body, |inner, layout| {
            html! {
                div.layout data-layout=(layout.name) { (inner) }
            }
        });

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                @if let Some(title) = title {
                    title { (title) }
                }
            }
            body {
                header style="background: LawnGreen" { "Header" }
                a href="/" { "Home" }
                (nested)
                footer style="background: LightGreen" { "Footer" }
            }
        }
    }
}

/// Full page for an error status
pub fn error_page(status: u16, title: &str, message: &str) -> Markup {
    let heading = format!("{} {}", status, title);
    document(
        Some(heading.as_str()),
        &[],
        html! {
            h1 { (heading) }
            p { (message) }
            a href="/" { "Go Home" }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(args: &[&str]) -> PageContext {
        PageContext {
            path: "/test".to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            ..PageContext::default()
        }
    }

    #[test]
    fn test_page_kind_names() {
        let kind: PageKind = serde_json::from_str(r#""comments""#).unwrap();
        assert_eq!(kind, PageKind::Comments);
        assert_eq!(serde_json::to_string(&PageKind::Files).unwrap(), r#""files""#);
    }

    #[test]
    fn test_comment_view() {
        let html = render(PageKind::Comment, &ctx(&["42", "7"])).into_string();
        assert!(html.contains("<i>7</i>"));
        assert!(html.contains("<b>42.</b>"));
    }

    #[test]
    fn test_files_view_root() {
        let html = render(PageKind::Files, &ctx(&[""])).into_string();
        assert!(html.contains("<i>/</i>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render(PageKind::Blog, &ctx(&["<script>"])).into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_search_form_only_when_searchable() {
        let mut context = ctx(&[]);
        assert!(!render(PageKind::Blogs, &context).into_string().contains("<form"));

        context.searchable = true;
        let html = render(PageKind::Blogs, &context).into_string();
        assert!(html.contains(r#"action="/test""#));
        assert!(html.contains("Search blog..."));
    }

    #[test]
    fn test_document_nests_non_root_layouts() {
        let root = Layout::root("root");
        let blog = Layout::new("blog-shell", "/blogs/[blogID]").unwrap();

        let html = document(Some("T"), &[&root, &blog], html! { p { "body" } }).into_string();
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains(r#"data-layout="blog-shell""#));
        assert!(!html.contains(r#"data-layout="root""#));
    }
}
