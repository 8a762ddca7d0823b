//! # Trellis Server
//!
//! Demo site serving a trellis route table over HTTP. Pages are rendered
//! with maud inside their layouts; search forms submit by POST and answer
//! with a redirect built by the router.

pub mod config;
pub mod handlers;
pub mod pages;
pub mod response;
pub mod state;

pub use config::Config;
pub use pages::PageKind;
pub use state::AppState;

use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Builds the axum application for a state
pub fn app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(handlers::render_page).post(handlers::submit_search))
        .route("/*path", get(handlers::render_page).post(handlers::submit_search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
