use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todo_server::{app, AppState, ErrorResponse, TodoRepresentation};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send one request through a router that shares `state`.
async fn send(state: &AppState, request: Request<String>) -> axum::response::Response {
    app(state.clone()).oneshot(request).await.unwrap()
}

async fn list(state: &AppState) -> Vec<TodoRepresentation> {
    let resp = send(state, empty_request("GET", "/api/v1/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let state = AppState::in_memory();
    assert!(list(&state).await.is_empty());
}

#[tokio::test]
async fn list_todos_returns_every_created_todo() {
    let state = AppState::in_memory();
    for title in ["Walk dog", "Feed cat"] {
        let body = json!({ "title": title }).to_string();
        let resp = send(&state, json_request("POST", "/api/v1/todos", &body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let titles: Vec<_> = list(&state)
        .await
        .into_iter()
        .map(|t| t.title.unwrap())
        .collect();
    assert_eq!(titles, vec!["Walk dog", "Feed cat"]);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_id() {
    let state = AppState::in_memory();
    let resp = send(
        &state,
        json_request(
            "POST",
            "/api/v1/todos",
            r#"{"title":"Buy milk","description":"2%","completed":false}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"id": 1, "title": "Buy milk", "description": "2%", "completed": false})
    );
}

#[tokio::test]
async fn create_todo_defaults_optional_fields() {
    let state = AppState::in_memory();
    let resp = send(&state, json_request("POST", "/api/v1/todos", r#"{"title":"Walk dog"}"#)).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["completed"], false);
}

#[tokio::test]
async fn create_todo_ignores_client_id() {
    let state = AppState::in_memory();
    let resp = send(
        &state,
        json_request("POST", "/api/v1/todos", r#"{"id":77,"title":"Walk dog"}"#),
    )
    .await;

    let created: TodoRepresentation = body_json(resp).await;
    assert_eq!(created.id, Some(1));
}

#[tokio::test]
async fn create_todo_short_title_returns_400_and_stores_nothing() {
    let state = AppState::in_memory();
    let resp = send(&state, json_request("POST", "/api/v1/todos", r#"{"title":"ab"}"#)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field, "title");
    assert!(list(&state).await.is_empty());
}

#[tokio::test]
async fn create_todo_missing_or_blank_title_returns_400() {
    let state = AppState::in_memory();
    for body in [r#"{"completed":true}"#, r#"{"title":"   "}"#, r#"{"title":null}"#] {
        let resp = send(&state, json_request("POST", "/api/v1/todos", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
    assert!(list(&state).await.is_empty());
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    let state = AppState::in_memory();
    for body in ["not json", r#"{"title":5}"#, r#"{"title":"Walk dog","completed":"yes"}"#] {
        let resp = send(&state, json_request("POST", "/api/v1/todos", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let err: ErrorResponse = body_json(resp).await;
        assert_eq!(err.code, "BAD_REQUEST");
    }
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let state = AppState::in_memory();
    let resp = send(&state, empty_request("GET", "/api/v1/todos/42")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.code, "NOT_FOUND");
    assert_eq!(err.message, "todo with id 42 not found");
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let state = AppState::in_memory();
    let resp = send(&state, empty_request("GET", "/api/v1/todos/not-a-number")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let state = AppState::in_memory();
    let resp = send(
        &state,
        json_request("PUT", "/api/v1/todos/42", r#"{"title":"Nope nope"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_invalid_title_returns_400_and_keeps_record() {
    let state = AppState::in_memory();
    send(&state, json_request("POST", "/api/v1/todos", r#"{"title":"Walk dog"}"#)).await;

    let resp = send(&state, json_request("PUT", "/api/v1/todos/1", r#"{"title":"x"}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let todos = list(&state).await;
    assert_eq!(todos[0].title.as_deref(), Some("Walk dog"));
}

#[tokio::test]
async fn update_missing_todo_with_invalid_title_returns_400() {
    let state = AppState::in_memory();
    let resp = send(&state, json_request("PUT", "/api/v1/todos/42", r#"{"title":"x"}"#)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.code, "VALIDATION_ERROR");
    assert_eq!(body.violations[0].field, "title");
    assert!(list(&state).await.is_empty());
}

#[tokio::test]
async fn update_deleted_todo_returns_404_and_stays_deleted() {
    let state = AppState::in_memory();
    send(&state, json_request("POST", "/api/v1/todos", r#"{"title":"Walk dog"}"#)).await;
    let resp = send(&state, empty_request("DELETE", "/api/v1/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&state, json_request("PUT", "/api/v1/todos/1", r#"{"title":"Walk cat"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.code, "NOT_FOUND");
    assert!(list(&state).await.is_empty());
}

#[tokio::test]
async fn update_todo_is_full_replacement() {
    let state = AppState::in_memory();
    send(
        &state,
        json_request(
            "POST",
            "/api/v1/todos",
            r#"{"title":"Walk dog","description":"around the block","completed":true}"#,
        ),
    )
    .await;

    let resp = send(&state, json_request("PUT", "/api/v1/todos/1", r#"{"title":"Walk cat"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"id": 1, "title": "Walk cat", "description": null, "completed": false})
    );
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let state = AppState::in_memory();
    let resp = send(&state, empty_request("DELETE", "/api/v1/todos/42")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- docs, health, request ids ---

#[tokio::test]
async fn openapi_document_is_served() {
    let state = AppState::in_memory();
    let resp = send(&state, empty_request("GET", "/api-docs/openapi.json")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = body_json(resp).await;
    assert_eq!(doc["info"]["title"], "Task Box API");
    assert!(doc["paths"]["/api/v1/todos/{id}"]["put"].is_object());
}

#[tokio::test]
async fn health_returns_ok() {
    let state = AppState::in_memory();
    let resp = send(&state, empty_request("GET", "/health")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"ok");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let state = AppState::in_memory();
    let resp = send(&state, empty_request("GET", "/api/v1/todos")).await;
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = send(
        &state,
        Request::builder()
            .uri("/api/v1/todos")
            .header("x-request-id", "client-chosen")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.headers()["x-request-id"], "client-chosen");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let state = AppState::in_memory();

    // create
    let resp = send(
        &state,
        json_request(
            "POST",
            "/api/v1/todos",
            r#"{"title":"Buy milk","description":"2%","completed":false}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    let expected = json!({"id": 1, "title": "Buy milk", "description": "2%", "completed": false});
    assert_eq!(created, expected);

    // get
    let resp = send(&state, empty_request("GET", "/api/v1/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = body_json(resp).await;
    assert_eq!(fetched, expected);

    // update
    let resp = send(
        &state,
        json_request(
            "PUT",
            "/api/v1/todos/1",
            r#"{"title":"Buy oat milk","description":"2%","completed":true}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = body_json(resp).await;
    assert_eq!(
        updated,
        json!({"id": 1, "title": "Buy oat milk", "description": "2%", "completed": true})
    );

    // delete
    let resp = send(&state, empty_request("DELETE", "/api/v1/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = send(&state, empty_request("GET", "/api/v1/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again: 404
    let resp = send(&state, empty_request("DELETE", "/api/v1/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    assert!(list(&state).await.is_empty());
}
