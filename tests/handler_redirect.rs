mod common;

use chrono::Duration;
use link_shortener::domain::repositories::{AnalyticsRepository, LinkRepository};

#[tokio::test]
async fn test_redirect_success() {
    let app = common::test_app_with(
        vec![common::link(
            "redirect1",
            Some(common::start_time() + Duration::days(1)),
            0,
        )],
        Vec::new(),
        false,
    );

    let response = app.server.get("/redirect1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_records_click_and_event() {
    let app = common::test_app_with(
        vec![common::link("counted", None, 2)],
        Vec::new(),
        false,
    );

    app.server.get("/counted").await;

    let link = app
        .links
        .find_by_short_url(&common::short_url("counted"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link.click_count, 3);

    let events = app
        .analytics
        .query_by_short_url(&common::short_url("counted"))
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ip, "127.0.0.1");
    assert_eq!(events[0].opened_date, common::start_time());
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::test_app();

    let response = app.server.get("/nonexistent").await;

    assert_eq!(response.status_code(), 404);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["message"], "Short URL not found");
}

#[tokio::test]
async fn test_redirect_expired_is_gone() {
    let app = common::test_app_with(
        vec![common::link(
            "old",
            Some(common::start_time() - Duration::hours(1)),
            5,
        )],
        Vec::new(),
        false,
    );

    let response = app.server.get("/old").await;

    assert_eq!(response.status_code(), 410);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");
    assert_eq!(json["message"], "Link expired");

    let link = app
        .links
        .find_by_short_url(&common::short_url("old"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link.click_count, 5);
    assert!(app.analytics.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_redirect_expires_after_default_ttl() {
    let app = common::test_app();

    app.server
        .post("/shorten")
        .json(&serde_json::json!({ "originalUrl": "https://example.com", "alias": "ttl" }))
        .await;

    app.clock.advance(Duration::hours(23));
    assert_eq!(app.server.get("/ttl").await.status_code(), 302);

    app.clock.advance(Duration::hours(2));
    assert_eq!(app.server.get("/ttl").await.status_code(), 410);
}

#[tokio::test]
async fn test_redirect_uses_forwarded_for_behind_proxy() {
    let app = common::test_app_with(vec![common::link("proxied", None, 0)], Vec::new(), true);

    app.server
        .get("/proxied")
        .add_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .await;

    let events = app.analytics.list().await.unwrap();
    assert_eq!(events[0].ip, "203.0.113.9");
}

#[tokio::test]
async fn test_redirect_ignores_forwarded_for_without_proxy() {
    let app = common::test_app_with(vec![common::link("direct", None, 0)], Vec::new(), false);

    app.server
        .get("/direct")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .await;

    let events = app.analytics.list().await.unwrap();
    assert_eq!(events[0].ip, "127.0.0.1");
}
