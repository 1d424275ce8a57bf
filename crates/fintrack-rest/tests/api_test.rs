//! Router tests: routing, extractors and the error-to-status mapping.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{delete, get, json, FixedProbe, TestApp};
use fintrack_core::UserId;
use serde_json::json;

fn category_body(name: &str, limit: i64) -> serde_json::Value {
    json!({"name": name, "limit": limit, "type": "daily", "description": "d"})
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_probe_failure() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "ok");

    let app = TestApp::with_probe(FixedProbe(Err("pool closed".to_string())));
    let (status, body) = app.send(get("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["checks"]["database"], "pool closed");
}

#[tokio::test]
async fn test_create_category() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/categories")
        .header("content-type", "application/json")
        .header("x-user-id", "2")
        .header("x-request-id", "req-123")
        .body(Body::from(category_body("food", 10_000).to_string()))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"success": true, "data": {"id": 1}}));

    let seen = &app.categories.seen;
    assert_eq!(seen.request_id.lock().unwrap().as_deref(), Some("req-123"));
    assert_eq!(*seen.owner.lock().unwrap(), Some(UserId::new(2)));
}

#[tokio::test]
async fn test_generated_request_id_is_echoed() {
    let app = TestApp::new();
    let response = tower::ServiceExt::oneshot(app.router.clone(), get("/health"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_create_category_requires_owner() {
    let app = TestApp::new();
    let (status, body) = app
        .send(json("POST", "/api/v1/categories", None, &category_body("food", 1)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "x-user-id");
}

#[tokio::test]
async fn test_create_category_validation_details() {
    let app = TestApp::new();
    let (status, body) = app
        .send(json("POST", "/api/v1/categories", Some("2"), &category_body("ab", 0)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["limit", "name"]);
}

#[tokio::test]
async fn test_malformed_json() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/categories")
        .header("content-type", "application/json")
        .header("x-user-id", "2")
        .body(Body::from("{\"name\":"))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["code"], "invalid_json");
}

#[tokio::test]
async fn test_duplicate_category_is_conflict() {
    let app = TestApp::new();
    let (status, body) = app
        .send(json("POST", "/api/v1/categories", Some("2"), &category_body("taken", 5)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATED");
}

#[tokio::test]
async fn test_get_category() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/v1/categories/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["type"], "daily");
    assert_eq!(body["data"]["limit"], 1000);

    let (status, body) = app.send(get("/api/v1/categories/9")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = app.send(get("/api/v1/categories/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_category() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json("PUT", "/api/v1/categories/1", None, &category_body("rent", 900)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "rent");

    let (status, body) = app.send(delete("/api/v1/categories/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = app.send(delete("/api/v1/categories/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_categories_by_type() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/v1/categories?type=daily")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app.send(get("/api/v1/categories?type=yearly")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = app.send(get("/api/v1/categories")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FILTER");
}

#[tokio::test]
async fn test_transaction_over_limit() {
    let app = TestApp::new();
    let (status, body) = app
        .send(json(
            "POST",
            "/api/v1/categories/1/transactions",
            Some("2"),
            &json!({"name": "new car", "count": 999_999}),
        ))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_transaction_lifecycle() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json(
            "POST",
            "/api/v1/categories/1/transactions",
            Some("2"),
            &json!({"name": "lunch", "count": 350}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 5);

    let (status, body) = app.send(get("/api/v1/categories/1/transactions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["category_id"], 1);

    let (status, body) = app.send(get("/api/v1/transactions/5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 350);

    let (status, body) = app
        .send(json(
            "PUT",
            "/api/v1/transactions/5",
            None,
            &json!({"name": "dinner", "count": 20}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "dinner");

    let (status, _) = app.send(delete("/api/v1/transactions/5")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_transactions_invalid_category() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/api/v1/categories/0/transactions")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FILTER");
}

#[tokio::test]
async fn test_database_error_hides_detail() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/api/v1/transactions/500")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "error database");
}
