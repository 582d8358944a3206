//! API integration tests
//!
//! Drive the full router against the in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookapi_server::{
    api,
    config::AppConfig,
    models::book::NewBook,
    repository::{memory::InMemoryBookStore, BookStore, Repository},
    AppState,
};

const MISSING_ID: &str = "65a1b2c3d4e5f60718293a4b";

struct TestApp {
    router: Router,
    store: Arc<InMemoryBookStore>,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Two books, as the original fixture: a classic and a dystopian novel
    async fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(InMemoryBookStore::new());
        for (title, author, genre) in [
            ("The Great Gatsby", "F. Scott Fitzgerald", "Classic"),
            ("1984", "George Orwell", "Dystopian"),
        ] {
            store
                .insert(&NewBook {
                    title: title.to_string(),
                    author: author.to_string(),
                    genre: Some(genre.to_string()),
                    read: false,
                })
                .await
                .expect("Failed to seed store");
        }

        let state = AppState::new(config, Repository::new(store.clone()));
        Self {
            router: api::router(state),
            store,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "localhost:4000");

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn count(&self) -> u64 {
        self.store.count().await.expect("Failed to count books")
    }

    async fn create(&self, body: Value) -> String {
        let (status, body) = self.send(Method::POST, "/api/books", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().expect("No book ID").to_string()
    }
}

fn titles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .map(|b| b["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/api/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_books() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(titles(&body), vec!["The Great Gatsby", "1984"]);
    assert_eq!(body["data"][0]["read"], false);
}

#[tokio::test]
async fn test_list_links() {
    let app = TestApp::new().await;

    let (_, body) = app.get("/api/books").await;

    let id = body["data"][0]["id"].as_str().unwrap();
    let href = format!("http://localhost:4000/api/books/{}", id);
    assert_eq!(
        body["data"][0]["links"],
        json!([
            {"rel": "self", "href": href, "method": "GET"},
            {"rel": "update", "href": href, "method": "PUT"},
            {"rel": "delete", "href": href, "method": "DELETE"},
        ])
    );
    assert_eq!(
        body["links"],
        json!([{"rel": "create", "href": "http://localhost:4000/api/books", "method": "POST"}])
    );
}

#[tokio::test]
async fn test_list_links_use_public_url() {
    let mut config = AppConfig::default();
    config.server.public_url = Some("https://books.example.org/".to_string());
    let app = TestApp::with_config(config).await;

    let (_, body) = app.get("/api/books").await;
    assert_eq!(body["links"][0]["href"], "https://books.example.org/api/books");
}

#[tokio::test]
async fn test_list_links_follow_forwarded_scheme() {
    let app = TestApp::new().await;
    let list = |proto: &str| {
        Request::builder()
            .uri("/api/books")
            .header(header::HOST, "localhost:4000")
            .header("x-forwarded-proto", proto)
            .body(Body::empty())
            .expect("Failed to build request")
    };

    let (_, body) = app.send_request(list("https")).await;
    assert_eq!(body["links"][0]["href"], "https://localhost:4000/api/books");

    let (status, body) = app.send_request(list("javascript")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["links"][0]["href"], "http://localhost:4000/api/books");
    let href = body["data"][0]["links"][0]["href"].as_str().unwrap();
    assert!(href.starts_with("http://localhost:4000/api/books/"));
}

#[tokio::test]
async fn test_filter_by_genre_and_author_is_exact() {
    let app = TestApp::new().await;

    let (_, body) = app.get("/api/books?genre=Classic").await;
    assert_eq!(titles(&body), vec!["The Great Gatsby"]);

    let (_, body) = app.get("/api/books?genre=classic").await;
    assert_eq!(body["count"], 0);

    let (_, body) = app.get("/api/books?author=George%20Orwell").await;
    assert_eq!(titles(&body), vec!["1984"]);

    let (_, body) = app.get("/api/books?author=Orwell").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_filter_by_title_substring_ignores_case() {
    let app = TestApp::new().await;

    let (_, body) = app.get("/api/books?title=gats").await;
    assert_eq!(titles(&body), vec!["The Great Gatsby"]);

    let (_, body) = app.get("/api/books?title=GREAT%20G").await;
    assert_eq!(titles(&body), vec!["The Great Gatsby"]);

    let (_, body) = app.get("/api/books?title=.*").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_default_pagination() {
    let app = TestApp::new().await;
    for n in 0..10 {
        app.create(json!({"title": format!("Volume {}", n), "author": "Anonymous"}))
            .await;
    }

    let (_, body) = app.get("/api/books").await;
    assert_eq!(body["count"], 10);
    assert_eq!(body["data"][0]["title"], "The Great Gatsby");

    let (_, body) = app.get("/api/books?page=2").await;
    assert_eq!(titles(&body), vec!["Volume 8", "Volume 9"]);

    let (_, body) = app.get("/api/books?limit=3&page=2").await;
    assert_eq!(titles(&body), vec!["Volume 1", "Volume 2", "Volume 3"]);

    let (_, body) = app.get("/api/books?limit=abc&page=-1").await;
    assert_eq!(body["count"], 10);
    assert_eq!(body["data"][0]["title"], "The Great Gatsby");
}

#[tokio::test]
async fn test_huge_page_returns_empty_page() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/books?page=9223372036854775807&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_invalid_filters_report_every_error() {
    let app = TestApp::new().await;
    let long_author = "a".repeat(51);

    let (status, body) = app
        .get(&format!("/api/books?genre=x&author={}", long_author))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed!");
    assert_eq!(
        body["errors"],
        json!([
            "Author must not exceed 50 characters.",
            "Genre must have at least 2 characters."
        ])
    );
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/books",
            Some(json!({"title": "Moby Dick", "author": "Herman Melville", "genre": "Adventure"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "book Added!");
    assert_eq!(body["data"]["title"], "Moby Dick");
    assert_eq!(body["data"]["read"], false);

    let id = body["data"]["id"].as_str().unwrap();
    let (status, fetched) = app.get(&format!("/api/books/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["success"], true);
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn test_create_without_author_is_not_persisted() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/api/books", Some(json!({"title": "Moby Dick"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide title and author!");
    assert_eq!(app.count().await, 2);

    let (_, body) = app.get("/api/books").await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_create_with_wrong_type_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/books",
            Some(json!({"title": "Moby Dick", "author": "Herman Melville", "read": "maybe"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.count().await, 2);
}

#[tokio::test]
async fn test_get_missing_book() {
    let app = TestApp::new().await;

    let (status, body) = app.get(&format!("/api/books/{}", MISSING_ID)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], format!("Book with id of {} not found", MISSING_ID));
}

#[tokio::test]
async fn test_malformed_id_is_a_generic_server_error() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/books/not-an-id").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().contains("not-an-id"));
}

#[tokio::test]
async fn test_replace_round_trip() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Moby Dick", "author": "Herman Melville", "genre": "Adventure"}))
        .await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/books/{}", id),
            Some(json!({"title": "Moby-Dick; or, The Whale", "author": "Herman Melville"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated successfully!");
    assert_eq!(body["data"]["title"], "Moby-Dick; or, The Whale");

    let (_, fetched) = app.get(&format!("/api/books/{}", id)).await;
    assert_eq!(fetched["data"]["id"], id.as_str());
    assert_eq!(fetched["data"]["title"], "Moby-Dick; or, The Whale");
    assert!(fetched["data"].get("genre").is_none());
}

#[tokio::test]
async fn test_replace_requires_title_and_author() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Moby Dick", "author": "Herman Melville"}))
        .await;

    let (status, body) = app
        .send(Method::PUT, &format!("/api/books/{}", id), Some(json!({"title": "Whale"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide title, author.");

    let (_, fetched) = app.get(&format!("/api/books/{}", id)).await;
    assert_eq!(fetched["data"]["title"], "Moby Dick");
}

#[tokio::test]
async fn test_replace_missing_book() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/books/{}", MISSING_ID),
            Some(json!({"title": "Whale", "author": "Herman Melville"})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found. Please check the ID.");
}

#[tokio::test]
async fn test_patch_updates_only_supplied_fields() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Moby Dick", "author": "Herman Melville", "genre": "Adventure"}))
        .await;

    let (status, body) = app
        .send(Method::PATCH, &format!("/api/books/{}", id), Some(json!({"read": true})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);
    assert_eq!(body["data"]["title"], "Moby Dick");
    assert_eq!(body["data"]["genre"], "Adventure");
}

#[tokio::test]
async fn test_patch_with_empty_body_leaves_record_unchanged() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Moby Dick", "author": "Herman Melville"}))
        .await;
    let (_, before) = app.get(&format!("/api/books/{}", id)).await;

    let (status, body) = app
        .send(Method::PATCH, &format!("/api/books/{}", id), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide at least one field to update.");
    let (_, after) = app.get(&format!("/api/books/{}", id)).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_patch_rejects_unknown_fields() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Moby Dick", "author": "Herman Melville"}))
        .await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/books/{}", id),
            Some(json!({"publisher": "Harper & Brothers"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_missing_book() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/books/{}", MISSING_ID),
            Some(json!({"read": true})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book() {
    let app = TestApp::new().await;
    let id = app
        .create(json!({"title": "Moby Dick", "author": "Herman Melville"}))
        .await;

    let (status, body) = app.send(Method::DELETE, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], format!("Book with ID {} deleted successfully.", id));
    assert_eq!(app.count().await, 2);

    let (status, _) = app.get(&format!("/api/books/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_book() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/books/{}", MISSING_ID), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found. Please check the ID.");
    assert_eq!(app.count().await, 2);
}
