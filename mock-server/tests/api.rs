use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Envelope, Task};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

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
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn bare_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .body(String::new())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app(TOKEN)
        .oneshot(Request::builder().uri("/tasks").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let resp = app(TOKEN)
        .oneshot(
            Request::builder()
                .uri("/tasks")
                .header(http::header::AUTHORIZATION, "other")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- list ---

#[tokio::test]
async fn list_tasks_empty() {
    let resp = app(TOKEN).oneshot(bare_request("GET", "/tasks")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<Vec<Task>> = body_json(resp).await;
    assert!(envelope.data.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_task_returns_200_with_defaults() {
    let resp = app(TOKEN)
        .oneshot(json_request("POST", "/tasks", r#"{"message":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<Task> = body_json(resp).await;
    assert_eq!(envelope.data.message, "Buy milk");
    assert!(!envelope.data.completed);
    assert!(!envelope.data.favorite);
    assert!(!envelope.data.id.is_empty());
}

#[tokio::test]
async fn create_task_empty_message_returns_400() {
    let resp = app(TOKEN)
        .oneshot(json_request("POST", "/tasks", r#"{"message":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_task_malformed_json_returns_422() {
    let resp = app(TOKEN)
        .oneshot(json_request("POST", "/tasks", r#"{"not_message":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_unknown_task_returns_404() {
    let resp = app(TOKEN)
        .oneshot(json_request("PUT", "/tasks", r#"[{"id":"missing","completed":true}]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_unknown_task_returns_404() {
    let resp = app(TOKEN)
        .oneshot(bare_request("DELETE", "/tasks/missing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    // create two; the newest is listed first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/tasks", r#"{"message":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Envelope<Task> = body_json(resp).await;
    let id = first.data.id;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/tasks", r#"{"message":"Feed cat"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare_request("GET", "/tasks"))
        .await
        .unwrap();
    let listed: Envelope<Vec<Task>> = body_json(resp).await;
    assert_eq!(listed.data.len(), 2);
    assert_eq!(listed.data[0].message, "Feed cat");
    assert_eq!(listed.data[1].id, id);

    // update: only completed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/tasks",
            &format!(r#"[{{"id":"{id}","completed":true}}]"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Envelope<Vec<Task>> = body_json(resp).await;
    assert_eq!(updated.data.len(), 1);
    assert_eq!(updated.data[0].message, "Walk dog"); // unchanged
    assert!(updated.data[0].completed);

    // update: message and favorite
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/tasks",
            &format!(r#"[{{"id":"{id}","message":"Walk cat","favorite":true}}]"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Envelope<Vec<Task>> = body_json(resp).await;
    assert_eq!(updated.data[0].message, "Walk cat");
    assert!(updated.data[0].favorite);
    assert!(updated.data[0].completed); // unchanged from previous update

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare_request("DELETE", &format!("/tasks/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare_request("DELETE", &format!("/tasks/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare_request("GET", "/tasks"))
        .await
        .unwrap();
    let listed: Envelope<Vec<Task>> = body_json(resp).await;
    assert_eq!(listed.data.len(), 1);
    assert_eq!(listed.data[0].message, "Feed cat");
}
