//! HTTP tests for the demo site, driven through `tower::ServiceExt::oneshot`

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tower::ServiceExt;
use trellis_server::{app, AppState, Config};

fn demo_app() -> axum::Router {
    app(AppState::from_config(&Config::default()).unwrap())
}

async fn get(uri: &str) -> Response {
    demo_app()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_query(uri: &str, query: &str) -> Response {
    let body = format!("query={}", query);
    demo_app()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// Rendering
// ============================================================================

#[rstest]
#[case("/", "<title>Home</title>")]
#[case("/services", "All Services")]
#[case("/blogs", "Search blog...")]
#[case("/blogs/42", "Page: 42")]
#[case("/blogs/42", r#"href="/blogs/42/comments""#)]
#[case("/blogs/42/comments", "Search comments...")]
#[case("/blogs/42/comments/7", "<i>7</i>")]
#[case("/files/a/b", "<i>/a/b</i>")]
#[case("/files", "<i>/</i>")]
#[tokio::test]
async fn test_pages_render(#[case] uri: &str, #[case] expected: &str) {
    let response = get(uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(expected), "{} should contain {}", uri, expected);
    assert!(html.contains("Header"));
    assert!(html.contains("Footer"));
}

#[tokio::test]
async fn test_resolved_titles() {
    let html = body_text(get("/blogs/42").await).await;
    assert!(html.contains("<title>Blog 42 | My Website</title>"));

    let html = body_text(get("/blogs").await).await;
    assert!(html.contains("<title>My Website</title>"));
}

#[tokio::test]
async fn test_percent_encoded_param_is_decoded() {
    let html = body_text(get("/blogs/hello%20world").await).await;
    assert!(html.contains("Page: hello world"));
    assert!(html.contains(r#"href="/blogs/hello%20world/comments""#));
}

#[rstest]
#[case("/about")]
#[case("/services/seo")]
#[case("/blogs/42/likes")]
#[tokio::test]
async fn test_unknown_paths_are_not_found(#[case] uri: &str) {
    let response = get(uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("404 Not Found"));
}

#[tokio::test]
async fn test_not_found_as_json() {
    let response = demo_app()
        .oneshot(
            Request::get("/about")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "error": "Route '/about' not found", "status": 404 })
    );
}

#[tokio::test]
async fn test_json_negotiation() {
    let response = demo_app()
        .oneshot(
            Request::get("/blogs/42/comments/7")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "route": "comment",
            "params": { "blogID": "42", "commentID": "7" },
            "title": "My Website",
        })
    );
}

#[tokio::test]
async fn test_json_catch_all_params() {
    let response = demo_app()
        .oneshot(
            Request::get("/files/a/b")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["params"]["filePath"], serde_json::json!(["a", "b"]));
    assert_eq!(json["title"], "Files | My Website");
}

// ============================================================================
// Search forms
// ============================================================================

#[tokio::test]
async fn test_blog_search_redirects() {
    let response = post_query("/blogs", "rust").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/blogs/rust");
    assert_eq!(response.headers()["hx-redirect"], "/blogs/rust");
}

#[tokio::test]
async fn test_comment_search_keeps_blog() {
    let response = post_query("/blogs/42/comments", "7").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/blogs/42/comments/7");
}

#[tokio::test]
async fn test_search_query_is_trimmed_and_encoded() {
    let response = post_query("/blogs", "++hello+world++").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/blogs/hello%20world");
}

#[rstest]
#[case("")]
#[case("+++")]
#[tokio::test]
async fn test_blank_search_stays_on_page(#[case] query: &str) {
    let response = post_query("/blogs", query).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::LOCATION));

    let html = body_text(response).await;
    assert!(html.contains("Type something to search."));
    assert!(html.contains("Search blog..."));
}

#[tokio::test]
async fn test_page_without_search_form() {
    let response = post_query("/services", "seo").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_search_on_unknown_path() {
    let response = post_query("/about", "x").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn test_ambiguous_config_fails_startup() {
    let config: Config = toml::from_str(
        r#"
        [[routes]]
        name = "a"
        pattern = "/blogs/[blogID]"
        page = "blog"

        [[routes]]
        name = "b"
        pattern = "/blogs/[slug]/"
        page = "blog"
        "#,
    )
    .unwrap();

    assert!(AppState::from_config(&config).is_err());
}

#[tokio::test]
async fn test_custom_route_table() {
    let config: Config = toml::from_str(
        r#"
        [routing]
        case_insensitive = true

        [[routes]]
        name = "post"
        pattern = "/posts/[postID]"
        page = "blog"
        title = "Post {postID}"
        "#,
    )
    .unwrap();
    let app = app(AppState::from_config(&config).unwrap());

    let response = app
        .oneshot(Request::get("/Posts/9").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<title>Post 9 | My Website</title>"));
    assert!(html.contains("Page: 9"));
    // No route renders the comments page, so there is no link to it
    assert!(!html.contains("Go to Comments"));
}

#[tokio::test]
async fn test_non_ascii_literal_redirects() {
    let config: Config = toml::from_str(
        r#"
        [[routes]]
        name = "menu"
        pattern = "/café/[item]"
        page = "blog"

        [[routes]]
        name = "menus"
        pattern = "/café"
        page = "blogs"
        "#,
    )
    .unwrap();
    let app = app(AppState::from_config(&config).unwrap());

    let response = app
        .clone()
        .oneshot(
            Request::post("/caf%C3%A9")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("query=tea"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/caf%C3%A9/tea");

    let response = app
        .oneshot(Request::get("/caf%C3%A9/tea").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
