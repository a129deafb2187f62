//! Handler-level tests: the router runs against a mock record store (and
//! mock catalog endpoints), driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use ekubo_auth::TokenService;
use ekubo_search::{CatalogClient, LyricsClient};
use ekubo_server::{AppState, build_app};
use ekubo_store::RecordStore;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer) -> Router {
    let state = AppState {
        store: RecordStore::new(server.uri(), "test-key"),
        tokens: TokenService::new("test-secret", 24),
        lyrics: LyricsClient::new(server.uri()),
        catalog: CatalogClient::with_endpoints(
            "client-id",
            "client-secret",
            format!("{}/api/token", server.uri()),
            format!("{}/v1", server.uri()),
        ),
    };
    build_app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn song_row(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "artist": "The Beatles",
        "created_at": "2024-04-01T12:00:00Z"
    })
}

fn user_row(id: i64, email: &str, password_hash: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "username": "ana",
        "password": password_hash,
        "created_at": "2024-04-01T12:00:00Z"
    })
}

#[tokio::test]
async fn healthz_reports_ok() {
    let server = MockServer::start().await;
    let response = app_for(&server).oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn get_missing_song_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/songs"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let response = app_for(&server).oneshot(get("/songs/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Song not found"}));
}

#[tokio::test]
async fn title_filter_returns_matches_in_id_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/songs"))
        .and(query_param("title", "eq.Yesterday"))
        .and(query_param("order", "id"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([song_row(3, "Yesterday"), song_row(7, "Yesterday")])),
        )
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(get("/songs?title=Yesterday"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|song| song["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 7]);
}

#[tokio::test]
async fn out_of_range_limit_is_rejected_before_any_store_call() {
    let server = MockServer::start().await;
    // No mocks mounted: a store call would fail the request differently.
    let response = app_for(&server)
        .oneshot(get("/songs?limit=1001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app_for(&server)
        .oneshot(get("/songs?skip=-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_a_missing_song_is_404_and_never_patches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/songs"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/songs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(json_request("PUT", "/songs/42", json!({"title": "New"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Song not found"}));
}

#[tokio::test]
async fn duplicate_signup_email_is_400_and_never_creates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.ana@example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_row(1, "ana@example.com", "$argon2id$irrelevant")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            json!({
                "email": "ana@example.com",
                "username": "ana",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Email already exists"})
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_email_yield_the_same_message() {
    let server = MockServer::start().await;
    let hash = ekubo_auth::password::hash("the-right-password").unwrap();
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.ana@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_row(1, "ana@example.com", &hash)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.ghost@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"email": "ana@example.com", "password": "the-wrong-password"}),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"email": "ghost@example.com", "password": "whatever-password"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    let first = body_json(wrong_password).await;
    let second = body_json(unknown_email).await;
    assert_eq!(first, second);
    assert_eq!(first, json!({"error": "Invalid email or password"}));
}

#[tokio::test]
async fn login_with_correct_credentials_returns_a_verifiable_token() {
    let server = MockServer::start().await;
    let hash = ekubo_auth::password::hash("the-right-password").unwrap();
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.ana@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_row(7, "ana@example.com", &hash)])),
        )
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"email": "ana@example.com", "password": "the-right-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();
    let claims = TokenService::new("test-secret", 24).verify(token).unwrap();
    assert_eq!(claims.id, 7);
    assert_eq!(claims.email, "ana@example.com");
}

#[tokio::test]
async fn duplicate_library_entry_is_400() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_library"))
        .and(query_param("user_id", "eq.1"))
        .and(query_param("matched_song_id", "eq.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "user_id": 1, "matched_song_id": 9, "created_at": "2024-04-01T12:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/user_library"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(json_request(
            "POST",
            "/library",
            json!({"user_id": 1, "matched_song_id": 9}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Song already in library"})
    );
}

#[tokio::test]
async fn empty_catalog_result_is_404_song_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "short-lived"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {"items": []}
        })))
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(get(
            "/songs/spotify-tracks?track_name=Nothing&artist_name=Nobody",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Song not found"}));
}

#[tokio::test]
async fn lyrics_search_requires_a_query() {
    let server = MockServer::start().await;
    let response = app_for(&server)
        .oneshot(get("/songs/lyrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_lyrics_joins_its_lines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/lyrics"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "synced_lyrics": "[00:01.00] Hello", "created_at": "2024-04-01T12:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/lyric_lines"))
        .and(query_param("lyrics_id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 11,
                "lyrics_id": 5,
                "start_time_ms": 1000,
                "end_time_ms": 2500,
                "text_content": "Hello",
                "created_at": "2024-04-01T12:00:00Z"
            }
        ])))
        .mount(&server)
        .await;

    let response = app_for(&server).oneshot(get("/lyrics/5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["lyric_lines"][0]["text_content"], "Hello");
}

#[tokio::test]
async fn store_failures_surface_as_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/songs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let response = app_for(&server).oneshot(get("/songs/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
