use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};
use trellis_router::{Dispatcher, RouteError};

use crate::pages::{self, PageContext};
use crate::response::{ErrorResponse, RedirectNavigator};
use crate::state::AppState;

/// Body of a search form submission
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// GET: render the matched page inside its layouts
pub async fn render_page(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    respond(&state, uri.path(), &headers, None)
}

/// POST: submit the page's search form
pub async fn submit_search(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Form(search): Form<SearchQuery>,
) -> Response {
    let path = uri.path();
    let router = state.router();

    let route_match = match router.match_route(path) {
        Ok(m) => m,
        Err(err) => return not_found(&err, &headers),
    };

    let form = state
        .page_for(route_match.route)
        .and_then(|page| state.search_form(page, &route_match.params));
    let Some(form) = form else {
        return ErrorResponse::new(StatusCode::METHOD_NOT_ALLOWED)
            .message(format!("Route '{}' has no search form", path))
            .into_response();
    };

    let mut dispatcher = Dispatcher::new(RedirectNavigator::new());
    match form.submit(router, &mut dispatcher, &search.query) {
        Ok(Some(request)) => {
            debug!(from = path, to = request.path(), "search submitted");
            dispatcher.into_inner().into_response()
        }
        Ok(None) => respond(&state, path, &headers, Some("Type something to search.")),
        Err(err) => {
            warn!(path, error = %err, "search rejected");
            ErrorResponse::new(StatusCode::BAD_REQUEST)
                .message(err.to_string())
                .into_response()
        }
    }
}

fn respond(state: &AppState, path: &str, headers: &HeaderMap, notice: Option<&str>) -> Response {
    let router = state.router();

    let route_match = match router.match_route(path) {
        Ok(m) => m,
        Err(err) => return not_found(&err, headers),
    };
    let title = router.resolve_title(&route_match);

    // Content negotiation: JSON response
    if accepts_json(headers) {
        let data = serde_json::json!({
            "route": route_match.route.name,
            "params": route_match.params,
            "title": title,
        });
        return Json(data).into_response();
    }

    let Some(page) = state.page_for(route_match.route) else {
        warn!(route = %route_match.route.name, "no page registered for route");
        return ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            .message(format!("No page for route '{}'", route_match.route.name))
            .into_response();
    };

    let ctx = PageContext {
        path: path.to_string(),
        args: route_match
            .route
            .template
            .param_names()
            .map(|name| {
                route_match
                    .params
                    .get(name)
                    .map(ToString::to_string)
                    .unwrap_or_default()
            })
            .collect(),
        next_link: page
            .next_page()
            .and_then(|next| state.link(next, &route_match.params)),
        searchable: state.search_form(page, &route_match.params).is_some(),
        notice: notice.map(str::to_string),
    };

    let layouts = router.layouts_for(route_match.route);
    let body = pages::render(page, &ctx);
    Html(pages::document(title.as_deref(), &layouts, body).into_string()).into_response()
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

fn not_found(err: &RouteError, headers: &HeaderMap) -> Response {
    warn!(error = %err, "rendering not found");
    let message = match err {
        RouteError::NoMatch { path } => format!("Route '{}' not found", path),
        other => other.to_string(),
    };

    if accepts_json(headers) {
        let data = serde_json::json!({ "error": message, "status": 404 });
        return (StatusCode::NOT_FOUND, Json(data)).into_response();
    }

    ErrorResponse::new(StatusCode::NOT_FOUND)
        .message(message)
        .into_response()
}
