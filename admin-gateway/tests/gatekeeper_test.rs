use admin_gateway::build_router;
use admin_gateway::config::ApiSettings;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::util::ServiceExt;

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn get_with_session(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::COOKIE, "refreshToken=abc123")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn public_pages_render_without_a_session() {
    for path in ["/", "/login", "/register", "/forgot-password", "/health"] {
        let response = build_router(ApiSettings::default(), "static").oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} should be public", path);
    }
}

#[tokio::test]
async fn public_pages_render_with_a_session() {
    for path in ["/", "/login"] {
        let response = build_router(ApiSettings::default(), "static")
            .oneshot(get_with_session(path))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn protected_page_without_session_redirects_to_login() {
    let response = build_router(ApiSettings::default(), "static")
        .oneshot(get("/dashboard"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?callbackUrl=%2Fdashboard"
    );
}

#[tokio::test]
async fn redirect_preserves_the_full_original_path() {
    let response = build_router(ApiSettings::default(), "static")
        .oneshot(get("/users/42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?callbackUrl=%2Fusers%2F42"
    );
}

#[tokio::test]
async fn protected_page_with_session_cookie_renders() {
    for path in ["/dashboard", "/users", "/users/42"] {
        let response = build_router(ApiSettings::default(), "static")
            .oneshot(get_with_session(path))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} should render", path);
    }
}

#[tokio::test]
async fn unknown_protected_path_still_redirects() {
    let response = build_router(ApiSettings::default(), "static")
        .oneshot(get("/reports/monthly"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?callbackUrl=%2Freports%2Fmonthly"
    );
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = build_router(ApiSettings::default(), "static").oneshot(get("/login")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
