//! Authenticated request layer: headers, failure handling and the optional 401 renewal

mod common;

use common::{MockJamf, Route, Workspace, token_ok};
use jamf_cli::session::AuthOutcome;
use serde_json::json;

#[tokio::test]
async fn test_classic_request_returns_raw_xml() {
    let server = MockJamf::start(vec![token_ok("tok", 3600)]).await;
    let xml = "<mobile_devices><size>12</size></mobile_devices>";
    server.route("/JSSResource/mobiledevices", Route::xml(xml));
    let workspace = Workspace::new();
    let mut session = workspace.session();
    session.authenticate(&server.base_url).await;

    let body = session
        .client()
        .make_classic_api_request(&server.base_url, "JSSResource/mobiledevices", "tok")
        .await;

    assert_eq!(body.as_deref(), Some(xml));
}

#[tokio::test]
async fn test_classic_request_without_token_is_not_sent() {
    let server = MockJamf::start(vec![token_ok("tok", 3600)]).await;
    let workspace = Workspace::new();
    let session = workspace.session();

    let body = session
        .client()
        .make_classic_api_request(&server.base_url, "computers", "")
        .await;

    assert!(body.is_none());
    assert!(server.seen().is_empty());
}

#[tokio::test]
async fn test_modern_request_parses_json_and_sends_headers() {
    let server = MockJamf::start(vec![token_ok("tok-json", 3600)]).await;
    server.route("/api/v1/jamf-pro-version", Route::json(json!({"version": "11.5.0-t1"})));
    let workspace = Workspace::new();
    let mut session = workspace.session();
    session.authenticate(&server.base_url).await;

    let value = session
        .client()
        .make_api_request(&server.base_url, "api/v1/jamf-pro-version")
        .await
        .unwrap();

    assert_eq!(value["version"], "11.5.0-t1");
    let seen = server.seen_for("/api/v1/jamf-pro-version");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok-json"));
    assert_eq!(seen[0].accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_modern_request_without_stored_token_returns_none() {
    let server = MockJamf::start(vec![token_ok("tok", 3600)]).await;
    server.route("/api/v1/jamf-pro-version", Route::json(json!({"version": "11"})));
    let workspace = Workspace::new();
    let session = workspace.session();

    assert!(session.client().make_api_request(&server.base_url, "jamf-pro-version").await.is_none());
    assert!(server.seen().is_empty());
    assert_eq!(server.token_calls(), 0);
}

#[tokio::test]
async fn test_http_errors_and_bad_bodies_return_none() {
    let server = MockJamf::start(vec![token_ok("tok", 3600)]).await;
    server
        .route("/JSSResource/policies", Route::status(500))
        .route("/api/v1/broken", Route::xml("<not-json/>"));
    let workspace = Workspace::new();
    let mut session = workspace.session();
    session.authenticate(&server.base_url).await;

    assert!(session.classic("policies").await.is_none());
    assert!(session.classic("does-not-exist").await.is_none());
    assert!(session.modern("broken").await.is_none());
}

#[tokio::test]
async fn test_unreachable_server_returns_none() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let workspace = Workspace::new();
    let mut session = workspace.session();

    assert_eq!(session.authenticate(&dead_url).await, AuthOutcome::Failed);
    assert!(
        session
            .client()
            .make_classic_api_request(&dead_url, "computers", "tok")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_unauthorized_is_not_renewed_by_default() {
    let server = MockJamf::start(vec![token_ok("stale", 3600), token_ok("fresh", 3600)]).await;
    server.route(
        "/api/v1/jamf-pro-version",
        Route::json(json!({"version": "11"})).requiring("fresh"),
    );
    let workspace = Workspace::new();
    let mut session = workspace.session();
    session.authenticate(&server.base_url).await;

    assert!(session.modern("jamf-pro-version").await.is_none());
    assert_eq!(server.token_calls(), 1);
}

#[tokio::test]
async fn test_unauthorized_triggers_single_renewal_when_enabled() {
    let server = MockJamf::start(vec![token_ok("stale", 3600), token_ok("fresh", 3600)]).await;
    server.route(
        "/api/v1/jamf-pro-version",
        Route::json(json!({"version": "11"})).requiring("fresh"),
    );
    let workspace = Workspace::new().renew_on_unauthorized();
    let mut session = workspace.session();
    session.authenticate(&server.base_url).await;

    let value = session.modern("jamf-pro-version").await.unwrap();
    assert_eq!(value["version"], "11");
    assert_eq!(server.token_calls(), 2);
    assert_eq!(workspace.token_file().unwrap()["token"], "fresh");

    let auth: Vec<_> = server
        .seen_for("/api/v1/jamf-pro-version")
        .into_iter()
        .map(|r| r.authorization.unwrap_or_default())
        .collect();
    assert_eq!(auth, vec!["Bearer stale", "Bearer fresh"]);
}

#[tokio::test]
async fn test_unauthorized_retry_happens_only_once() {
    let server = MockJamf::start(vec![token_ok("one", 3600), token_ok("two", 3600)]).await;
    server.route(
        "/api/v1/jamf-pro-version",
        Route::json(json!({"version": "11"})).requiring("never-issued"),
    );
    let workspace = Workspace::new().renew_on_unauthorized();
    let mut session = workspace.session();
    session.authenticate(&server.base_url).await;

    assert!(session.modern("jamf-pro-version").await.is_none());
    assert_eq!(server.token_calls(), 2);
    assert_eq!(server.seen_for("/api/v1/jamf-pro-version").len(), 2);
}
