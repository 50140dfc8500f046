use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use songbrawl::{app, db, AppState};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db_pool = db::connect("sqlite::memory:", 1).await.unwrap();
    app(AppState::new(db_pool))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn unknown_brawl_is_empty() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/brawls/missing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "missing", "songs": [] }));
}

#[tokio::test]
async fn create_with_and_without_id() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/brawls", Some(json!({ "id": "b1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "b1", "songs": [] }));

    let (status, body) = send(&app, Method::POST, "/api/brawls", None).await;
    assert_eq!(status, StatusCode::OK);
    let generated = body["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn full_round() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/brawls", Some(json!({ "id": "b1" }))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/brawls/b1/songs",
        Some(json!({ "id": "s1", "name": "Africa", "youtubeLink": "https://youtu.be/FTQbiNvZqaY" })),
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["songs"][0]["votes"], 1);
    assert_eq!(body["songs"][0]["youtubeLink"], "https://youtu.be/FTQbiNvZqaY");

    send(&app, Method::POST, "/api/brawls/b1/songs", Some(json!({ "id": "s2", "name": "Rosanna" }))).await;

    let (_, body) = send(&app, Method::PUT, "/api/brawls/b1/songs/s2/votes", Some(json!({ "votes": 5 }))).await;
    assert_eq!(body["songs"][0]["votes"], 1);
    assert_eq!(body["songs"][1]["votes"], 5);

    let (_, body) = send(&app, Method::POST, "/api/brawls/b1/songs/s1/vote", None).await;
    assert_eq!(body["songs"][0]["votes"], 2);

    let (status, body) = send(&app, Method::POST, "/api/brawls/b1/winner", None).await;
    assert_eq!(status, StatusCode::OK);
    let winner = body["winner"].clone();
    assert!(body["songs"].as_array().unwrap().contains(&winner));

    let (_, body) = send(&app, Method::GET, "/api/brawls/b1", None).await;
    assert_eq!(body["winner"], winner);

    let (_, body) = send(&app, Method::DELETE, "/api/brawls/b1/winner", None).await;
    assert!(body.get("winner").is_none());
    assert_eq!(body["songs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn explicit_winner() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/brawls", Some(json!({ "id": "b1" }))).await;
    send(&app, Method::POST, "/api/brawls/b1/songs", Some(json!({ "id": "s1", "name": "Africa" }))).await;

    let (status, body) = send(&app, Method::PUT, "/api/brawls/b1/winner", Some(json!({ "winnerId": "s1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["winner"], json!({ "id": "s1", "name": "Africa", "votes": 1 }));
}

#[tokio::test]
async fn empty_brawl_has_no_winner() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/brawls", Some(json!({ "id": "b1" }))).await;

    let (status, body) = send(&app, Method::POST, "/api/brawls/b1/winner", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "b1", "songs": [] }));
}

#[tokio::test]
async fn store_errors_become_client_errors() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::POST, "/api/brawls/ghost/songs", Some(json!({ "name": "Africa" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/api/brawls", Some(json!({ "id": "b1" }))).await;
    let (status, _) = send(&app, Method::POST, "/api/brawls/b1/songs", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, Method::POST, "/api/brawls/b1/songs", Some(json!({ "id": "s1", "name": "Africa" }))).await;
    let (status, _) = send(&app, Method::POST, "/api/brawls/b1/songs", Some(json!({ "id": "s1", "name": "Again" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::PUT, "/api/brawls/b1/songs/s1/votes", Some(json!({ "votes": -3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_songs() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/brawls", Some(json!({ "id": "b1" }))).await;
    send(&app, Method::POST, "/api/brawls/b1/songs", Some(json!({ "name": "Africa" }))).await;

    let (status, _) = send(&app, Method::DELETE, "/api/brawls/b1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/brawls/b1", None).await;
    assert_eq!(body, json!({ "id": "b1", "songs": [] }));
}
