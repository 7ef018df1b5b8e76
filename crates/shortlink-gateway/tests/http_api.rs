use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jiff::{SignedDuration, Timestamp};
use serde_json::{json, Value};
use shortlink_core::{ManualClock, ShortCode};
use shortlink_gateway::{App, AppState};
use shortlink_generator::{Generator, RandomGenerator};
use shortlink_store::{ShortLinkStore, StoreSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

const BASE_URL: &str = "https://sho.rt";

struct TestApp {
    router: Router,
    store: Arc<ShortLinkStore>,
    clock: ManualClock,
}

fn start() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

fn settings() -> StoreSettings {
    StoreSettings::builder().base_url(BASE_URL).build()
}

fn test_app_with<G: Generator>(generator: G) -> TestApp {
    let clock = ManualClock::new(start());
    let store = Arc::new(ShortLinkStore::with_parts(
        settings(),
        generator,
        clock.clone(),
    ));
    let router = App::router(AppState::new(Arc::clone(&store)));
    TestApp {
        router,
        store,
        clock,
    }
}

fn test_app() -> TestApp {
    test_app_with(RandomGenerator::new())
}

struct Response {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        Response {
            status,
            location,
            body,
        }
    }

    async fn create(&self, body: Value) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/shorturls")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }
}

fn code_of(short_link: &Value) -> String {
    short_link
        .as_str()
        .unwrap()
        .strip_prefix("https://sho.rt/")
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn create_stats_redirect_scenario() {
    let app = test_app();

    let created = app
        .create(json!({ "url": "https://example.com/page", "validity": 30 }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["expiry"], "2023-11-14T22:43:20Z");
    let code = code_of(&created.body["shortLink"]);
    assert_eq!(code.len(), 8);

    let stats = app.get(&format!("/shorturls/{}", code)).await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["shortLink"], created.body["shortLink"]);
    assert_eq!(stats.body["originalURL"], "https://example.com/page");
    assert_eq!(stats.body["createdAt"], "2023-11-14T22:13:20Z");
    assert_eq!(stats.body["expiresAt"], "2023-11-14T22:43:20Z");
    assert_eq!(stats.body["totalClicks"], 0);
    assert_eq!(stats.body["clicks"], json!([]));

    app.clock.advance(SignedDuration::from_secs(10));
    let redirect = app
        .send(
            Request::builder()
                .uri(format!("/{}", code))
                .header(header::REFERER, "https://google.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(redirect.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(redirect.location.as_deref(), Some("https://example.com/page"));

    let stats = app.get(&format!("/shorturls/{}", code)).await;
    assert_eq!(stats.body["totalClicks"], 1);
    assert_eq!(
        stats.body["clicks"],
        json!([{
            "timestamp": "2023-11-14T22:13:30Z",
            "source": "https://google.com",
            "location": "Unknown",
        }])
    );
}

#[tokio::test]
async fn default_validity_applies() {
    let app = test_app();

    let created = app.create(json!({ "url": "https://example.com" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["expiry"], "2023-11-14T22:43:20Z");
}

#[tokio::test]
async fn custom_shortcode_and_collision() {
    let app = test_app();
    let body = json!({ "url": "https://example.com", "shortcode": "abc123" });

    let first = app.create(body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["shortLink"], "https://sho.rt/abc123");

    let second = app.create(body).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "shortcode_collision");
}

#[tokio::test]
async fn validation_errors_are_bad_requests() {
    let app = test_app();

    let cases = [
        (json!({ "url": "not-a-url" }), "invalid_url"),
        (json!({}), "invalid_url"),
        (json!({ "url": "ftp://x.com" }), "invalid_url"),
        (json!({ "url": "https://x.com", "validity": -5 }), "invalid_validity"),
        (json!({ "url": "https://x.com", "validity": 0 }), "invalid_validity"),
        (json!({ "url": "https://x.com", "validity": "soon" }), "invalid_validity"),
        (json!({ "url": "https://x.com", "shortcode": "ab" }), "invalid_shortcode"),
        (json!({ "url": "https://x.com", "shortcode": "abc-123" }), "invalid_shortcode"),
    ];

    for (body, kind) in cases {
        let response = app.create(body.clone()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.body["error"], kind, "{body}");
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = test_app();

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/shorturls")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "bad_request");
}

#[tokio::test]
async fn generation_exhausted_is_service_unavailable() {
    struct Stuck;

    impl Generator for Stuck {
        fn generate(&self) -> ShortCode {
            ShortCode::new_unchecked("stuck1")
        }
    }

    let app = test_app_with(Stuck);

    let first = app.create(json!({ "url": "https://a.com" })).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.create(json!({ "url": "https://b.com" })).await;
    assert_eq!(second.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(second.body["error"], "generation_exhausted");
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    let app = test_app();

    let redirect = app.get("/nope123").await;
    assert_eq!(redirect.status, StatusCode::NOT_FOUND);
    assert_eq!(redirect.body["error"], "not_found");

    let stats = app.get("/shorturls/nope123").await;
    assert_eq!(stats.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expired_links_are_hidden_but_listed() {
    let app = test_app();

    app.create(json!({ "url": "https://old.com", "validity": 1, "shortcode": "old001" }))
        .await;
    app.create(json!({ "url": "https://new.com", "validity": 60, "shortcode": "new001" }))
        .await;

    app.clock.advance(SignedDuration::from_secs(61));

    assert_eq!(app.get("/old001").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/shorturls/old001").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/new001").await.status, StatusCode::MOVED_PERMANENTLY);

    let listed = app.get("/api/urls").await;
    assert_eq!(listed.status, StatusCode::OK);
    let links: Vec<_> = listed
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["shortLink"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(links, ["https://sho.rt/new001", "https://sho.rt/old001"]);
}

#[tokio::test]
async fn redirect_at_expiry_boundary_records_click() {
    let app = test_app();
    let created = app
        .create(json!({ "url": "https://example.com", "validity": 1, "shortcode": "edge01" }))
        .await;
    let expiry: Timestamp = created.body["expiry"].as_str().unwrap().parse().unwrap();

    app.clock.set(expiry);
    let redirect = app.get("/edge01").await;
    assert_eq!(redirect.status, StatusCode::MOVED_PERMANENTLY);

    app.clock.advance(SignedDuration::from_nanos(1));
    assert_eq!(app.get("/edge01").await.status, StatusCode::NOT_FOUND);

    let listed = app.get("/api/urls").await;
    assert_eq!(listed.body[0]["totalClicks"], 1);
}

#[tokio::test]
async fn redirect_on_busy_link_keeps_counting() {
    let app = test_app();
    app.create(json!({ "url": "https://example.com", "shortcode": "busy01" }))
        .await;
    for _ in 0..5_000 {
        app.store.record_click("busy01", None, None);
    }

    for _ in 0..10 {
        let redirect = app.get("/busy01").await;
        assert_eq!(redirect.status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(redirect.location.as_deref(), Some("https://example.com"));
    }

    let stats = app.get("/shorturls/busy01").await;
    assert_eq!(stats.body["totalClicks"], 5_010);
}

#[tokio::test]
async fn redirect_records_client_details() {
    let app = test_app();
    app.create(json!({ "url": "https://example.com", "shortcode": "abc123" }))
        .await;

    let peer = SocketAddr::from(([192, 168, 1, 5], 40000));
    app.send(
        Request::builder()
            .uri("/abc123")
            .extension(ConnectInfo(peer))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    app.send(
        Request::builder()
            .uri("/abc123")
            .header("X-Forwarded-For", "203.0.113.9")
            .header(header::REFERER, "https://news.example")
            .extension(ConnectInfo(peer))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    app.get("/abc123").await;

    let entry = app.store.get_entry_by_shortcode("abc123").unwrap();
    assert_eq!(entry.total_clicks, 3);

    assert_eq!(entry.clicks[0].referrer, "direct");
    assert_eq!(entry.clicks[0].source_ip, "192.168.1.5");
    assert_eq!(entry.clicks[1].referrer, "https://news.example");
    assert_eq!(entry.clicks[1].source_ip, "203.0.113.9");
    assert_eq!(entry.clicks[2].source_ip, "unknown");
}

#[tokio::test]
async fn list_is_empty_initially() {
    let app = test_app();

    let listed = app.get("/api/urls").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn health_reports_link_count() {
    let app = test_app();
    app.create(json!({ "url": "https://example.com" })).await;

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, json!({ "status": "ok", "links": 1 }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_over_http_are_unique() {
    let app = Arc::new(test_app());

    let mut handles = vec![];
    for i in 0..5 {
        let app = Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            app.create(json!({ "url": format!("https://example{}.com", i) }))
                .await
        }));
    }

    let mut links = std::collections::HashSet::new();
    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert!(links.insert(response.body["shortLink"].as_str().unwrap().to_string()));
    }
    assert_eq!(app.store.len(), 5);
}
