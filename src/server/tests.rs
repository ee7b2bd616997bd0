use super::*;
use crate::notify::{NotifyResult, RelayPayload};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Mutex;
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingRelay {
    sent: Mutex<Vec<RelayPayload>>,
}

impl Relay for RecordingRelay {
    fn send(&self, payload: &RelayPayload) -> NotifyResult<()> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

struct TestApp {
    router: Router,
    relay: Arc<RecordingRelay>,
    _dir: TempDir,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = BlogStore::open(&dir.path().join("blog.redb")).unwrap();
    let relay = Arc::new(RecordingRelay::default());
    let notify = NotifyConfig {
        admin_email: Some("admin@example.com".into()),
        ..Default::default()
    };
    let state = AppState::new(store, RuleEngine::default(), relay.clone(), notify);
    TestApp {
        router: build_router(state, &["http://localhost:5173".to_string()]),
        relay,
        _dir: dir,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn new_post(slug: &str) -> serde_json::Value {
    serde_json::json!({
        "title": "Opening a coffee shop",
        "slug": slug,
        "excerpt": "Everything you need before opening a coffee shop.",
        "content": "<h2>Plan</h2><p>A coffee shop needs a plan.</p>",
        "author": "Admin",
        "category": "Guides",
        "image": "/uploads/shop.jpg",
        "tags": ["coffee shop"]
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn seo_score_endpoint() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/seo/score",
        Some(serde_json::json!({
            "title": "Mở quán cafe",
            "slug": "mo-quan-cafe",
            "targetKeyword": "mở quán cafe",
            "hasImage": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 45);
    let total = body["passed"].as_array().unwrap().len()
        + body["improvements"].as_array().unwrap().len()
        + body["problems"].as_array().unwrap().len();
    assert_eq!(total, crate::rules::RULE_COUNT);
}

#[tokio::test]
async fn seo_score_without_keyword_is_empty() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/seo/score",
        Some(serde_json::json!({ "title": "Something" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 0);
    assert!(body["passed"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blog_create_get_and_list() {
    let app = test_app();

    let (status, created) = send(&app, "POST", "/api/blog", Some(new_post("coffee-shop"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["readTime"], "1 min read");
    assert_eq!(created["isPublished"], true);

    let (status, fetched) = send(&app, "GET", "/api/blog/coffee-shop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Opening a coffee shop");

    let (status, list) = send(&app, "GET", "/api/blog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blog_create_errors() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/blog",
        Some(serde_json::json!({ "title": "Only a title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("slug"));

    send(&app, "POST", "/api/blog", Some(new_post("dup"))).await;
    let (status, body) = send(&app, "POST", "/api/blog", Some(new_post("dup"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("dup"));
}

#[tokio::test]
async fn blog_get_missing_is_404() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/blog/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog post not found");
}

#[tokio::test]
async fn blog_update_and_delete() {
    let app = test_app();
    send(&app, "POST", "/api/blog", Some(new_post("draft"))).await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/blog/1",
        Some(serde_json::json!({ "title": "Renamed", "isPublished": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Renamed");

    let (_, list) = send(&app, "GET", "/api/blog", None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "PUT", "/api/blog/abc", Some(serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "PUT", "/api/blog/99", Some(serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/api/blog/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog post deleted successfully");
    let (status, _) = send(&app, "DELETE", "/api/blog/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/blog/x1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blog_search() {
    let app = test_app();
    send(&app, "POST", "/api/blog", Some(new_post("coffee-shop"))).await;

    let (status, hits) = send(&app, "GET", "/api/blog/search/COFFEE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/blog/search/ab", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("3 characters"));
}

#[tokio::test]
async fn blog_score_stored_post() {
    let app = test_app();
    send(&app, "POST", "/api/blog", Some(new_post("coffee-shop"))).await;

    let (status, body) = send(&app, "GET", "/api/blog/coffee-shop/score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keyword"], "coffee shop");
    assert_eq!(body["slug"], "coffee-shop");

    let (status, body) = send(&app, "GET", "/api/blog/coffee-shop/score?keyword=latte", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keyword"], "latte");

    let (status, _) = send(&app, "GET", "/api/blog/missing/score", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_score_resolves_by_slug_only() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/api/blog", Some(new_post("first-post"))).await;
    assert_eq!(status, StatusCode::CREATED);

    // post 1 exists, but no post has the slug "1"
    let (status, _) = send(&app, "GET", "/api/blog/1/score", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, "GET", "/api/blog/first-post/score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn blog_rejects_slugs_that_shadow_routes() {
    let app = test_app();
    for slug in ["1", "2024", "search"] {
        let (status, body) = send(&app, "POST", "/api/blog", Some(new_post(slug))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{slug}");
        assert!(body["error"].as_str().unwrap().contains(slug));
    }
    let (status, body) = send(&app, "GET", "/api/blog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn contact_form_flow() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/contact",
        Some(serde_json::json!({ "name": "Lan" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/contact",
        Some(serde_json::json!({
            "name": "Lan",
            "phone": "0900000000",
            "email": "lan@example.com",
            "businessType": "has-location"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["emailSent"], true);

    let sent = app.relay.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "admin@example.com");
    assert_eq!(sent[0].data["businessType"], "Has premises");
}

#[tokio::test]
async fn demo_and_subscribe_flows() {
    let app = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/demo-request",
        Some(serde_json::json!({ "name": "Minh", "email": "minh@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/demo-request",
        Some(serde_json::json!({ "name": "Minh", "email": "minh@example.com", "company": "Tea" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("demoCredentials").is_none());

    let (status, _) = send(
        &app,
        "POST",
        "/api/subscribe",
        Some(serde_json::json!({ "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/subscribe",
        Some(serde_json::json!({ "email": "reader@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}
