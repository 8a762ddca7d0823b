use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tracing::warn;
use trellis_router::{NavigationRequest, Navigator};

use crate::pages;

// ============================================================================
// RedirectNavigator
// ============================================================================

/// Navigator that turns a navigation into an HTTP redirect
///
/// Sets both `Location` and `HX-Redirect`, so plain forms and HTMX requests
/// follow it alike. Without a navigation the response is `204 No Content`.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    location: Option<String>,
}

impl RedirectNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl Navigator for RedirectNavigator {
    fn navigate(&mut self, request: &NavigationRequest) {
        self.location = Some(request.path().to_string());
    }
}

impl IntoResponse for RedirectNavigator {
    fn into_response(self) -> Response {
        let Some(location) = self.location else {
            return StatusCode::NO_CONTENT.into_response();
        };

        match HeaderValue::from_str(&location) {
            Ok(value) => {
                let mut headers = HeaderMap::new();
                headers.insert(header::LOCATION, value.clone());
                headers.insert("HX-Redirect", value);
                (StatusCode::SEE_OTHER, headers).into_response()
            }
            Err(_) => {
                warn!(location = %location, "redirect target is not a valid header value");
                ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .message("Invalid redirect target")
                    .into_response()
            }
        }
    }
}

// ============================================================================
// ErrorResponse
// ============================================================================

/// Error page response
///
/// ```ignore
/// ErrorResponse::new(StatusCode::NOT_FOUND).message("Route '/x' not found")
/// ```
#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    message: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let title = self.status.canonical_reason().unwrap_or("Error");
        let message = self.message.as_deref().unwrap_or("An error occurred");
        let page = pages::error_page(self.status.as_u16(), title, message);
        (self.status, Html(page.into_string())).into_response()
    }
}
