use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use todos_api::{
    clock::SystemClock,
    config::AppConfig,
    db::{connection, dao::DaoContext},
    routes::app,
    services::ServiceContext,
    state::AppState,
};

async fn database_app() -> Router {
    let cfg = AppConfig::from_env().expect("load app config");
    let db_cfg = cfg
        .database
        .clone()
        .expect("APP_DATABASE__URL must be set for store tests");
    let db = connection::connect(&db_cfg).await.expect("connect to database");
    let services = ServiceContext::with_repository(
        Arc::new(DaoContext::new(&db).todo()),
        Arc::new(SystemClock),
    );
    app(AppState::new(cfg, services))
}

async fn json_response(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: Value = serde_json::from_slice(&body).expect("json body");
    (status, json)
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn todo_lifecycle_against_database() {
    let app = database_app().await;

    let (status, created) = json_response(
        &app,
        json_request(
            "POST",
            "/todos",
            json!({ "title": "store test", "description": "desc", "expiry": "2099-01-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["data"]["id"].as_i64().expect("id");

    let (status, _) = json_response(
        &app,
        json_request("PATCH", "/todos/completion", json!({ "id": id, "completion": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = json_response(
        &app,
        json_request("PATCH", "/todos/completion", json!({ "id": id, "completion": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = json_response(
        &app,
        json_request("PATCH", "/todos/done", json!({ "id": id, "is_done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, all) = json_response(&app, empty_request("GET", "/todos?period=")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        all["data"]
            .as_array()
            .expect("list")
            .iter()
            .any(|todo| todo["id"].as_i64() == Some(id) && todo["is_done"] == true)
    );

    let uri = format!("/todos/{id}");
    let (status, _) = json_response(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = json_response(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
