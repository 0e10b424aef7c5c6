use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;

// Each test gets a throwaway file-backed database; the TempDir must outlive
// the app.
async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let database_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("todos.db").display()
    );
    let repo = SqliteTodoRepository::connect(&database_url).await.unwrap();
    repo.init().await.unwrap();
    let app = routing::app(todos::router(todos::AppState { repo: Arc::new(repo) }));
    (app, dir)
}

async fn request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> hyper::Response<axum::body::Body> {
    let req = Request::builder().method(method).uri(path);
    let req = match body {
        Some(json) => req
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> serde_json::Value {
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let (app, _dir) = test_app().await;

    let res = request(
        &app,
        Method::POST,
        "/todos",
        Some(json!({ "title": "my todo 1", "due_date": "2021-02-08T22:04:05Z" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["title"], "my todo 1");

    let res = request(&app, Method::GET, &format!("/todos/{id}"), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = body_json(res).await;
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["title"], "my todo 1");
}

#[tokio::test]
async fn identical_creates_assign_distinct_ids() {
    let (app, _dir) = test_app().await;
    let payload = json!({ "title": "my todo 1", "due_date": "2021-02-08T22:04:05Z" });

    let first = request(&app, Method::POST, "/todos", Some(payload.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = request(&app, Method::POST, "/todos", Some(payload)).await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let first_id = body_json(first).await["id"].as_str().unwrap().to_string();
    let second_id = body_json(second).await["id"].as_str().unwrap().to_string();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn client_supplied_id_is_ignored_on_create() {
    let (app, _dir) = test_app().await;
    let res = request(
        &app,
        Method::POST,
        "/todos",
        Some(json!({ "id": "999", "title": "sneaky", "due_date": "2021-02-08T22:04:05Z" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res).await;
    assert_ne!(created["id"], "999");
}

#[tokio::test]
async fn create_validation_failures_are_400() {
    let (app, _dir) = test_app().await;
    let cases = [
        json!({ "title": "", "due_date": "2021-02-08T22:04:05Z" }),
        json!({ "title": "my todo 1", "due_date": "" }),
        json!({ "title": "my todo 1", "due_date": "not-a-date" }),
    ];
    for payload in cases {
        let res = request(&app, Method::POST, "/todos", Some(payload.clone())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body = body_json(res).await;
        assert!(body["error"].is_string(), "{body}");
    }
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let (app, _dir) = test_app().await;
    let res = request(&app, Method::GET, "/todos/4583489573489", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_json(res).await;
    assert_eq!(body["error"], "todo not found");
}

#[tokio::test]
async fn get_invalid_ids_are_400() {
    let (app, _dir) = test_app().await;
    for path in ["/todos/abc", "/todos/0", "/todos/-1"] {
        let res = request(&app, Method::GET, path, None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{path}");
    }
}

#[tokio::test]
async fn health_responds_ok() {
    let (app, _dir) = test_app().await;
    let res = request(&app, Method::GET, "/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}
