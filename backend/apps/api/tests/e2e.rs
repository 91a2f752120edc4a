//! End-to-end tests against the composed router

use api::{AppState, build_router, startup};
use auth::{AuthConfig, BootstrapConfig};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use platform::database::{Database, DatabaseConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@problemtracker.local";
const ADMIN_PASSWORD: &str = "SecureAdmin@2025";

fn auth_config() -> AuthConfig {
    AuthConfig::new(b"e2e-secret".to_vec()).with_bootstrap(BootstrapConfig {
        email: ADMIN_EMAIL.to_string(),
        name: Some("Administrator".to_string()),
        password: Some(ADMIN_PASSWORD.to_string()),
    })
}

/// Ready store with the bootstrap admin in place
async fn ready_app() -> Router {
    let db = Database::pending();
    let state = AppState::new(db.clone(), auth_config());

    startup::connect_store(&db, &DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    startup::bootstrap_admin(&state.auth).await;

    build_router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router) -> String {
    let (status, json) = send(
        app,
        post_json(
            "/api/admin/login",
            json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_submit_login_list_delete_scenario() {
    let app = ready_app().await;

    let (status, json) = send(
        &app,
        post_json(
            "/api/problems",
            json!({"name": "A", "contactNo": "123", "problem": "leak"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = json["data"]["id"].as_i64().unwrap();

    let token = login(&app).await;

    let (status, json) = send(&app, authed("GET", "/api/problems", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["id"], id);

    let (status, _) = send(&app, authed("DELETE", &format!("/api/problems/{id}"), &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, authed("GET", &format!("/api/problems/{id}"), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Problem not found"}));
}

#[tokio::test]
async fn test_verify_accepts_login_token() {
    let app = ready_app().await;
    let token = login(&app).await;

    let (status, json) = send(&app, authed("GET", "/api/admin/verify", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);
    assert_eq!(json["email"], ADMIN_EMAIL);
    assert_eq!(json["name"], "Administrator");
}

#[tokio::test]
async fn test_login_does_not_enumerate_users() {
    let app = ready_app().await;

    let wrong_password = send(
        &app,
        post_json("/api/admin/login", json!({"email": ADMIN_EMAIL, "password": "wrong"})),
    )
    .await;
    let unknown_email = send(
        &app,
        post_json(
            "/api/admin/login",
            json!({"email": "nobody@problemtracker.local", "password": "wrong"}),
        ),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_admin_routes_reject_missing_and_bad_tokens() {
    let app = ready_app().await;

    let req = Request::get("/api/problems").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, json!({"error": "Access denied. No token provided."}));

    let (status, json) = send(&app, authed("GET", "/api/problems/count", "nope")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json, json!({"error": "Invalid or expired token."}));

    let req = Request::post("/api/admin/create").body(Body::empty()).unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_count_and_recent() {
    let app = ready_app().await;
    for name in ["one", "two"] {
        send(
            &app,
            post_json(
                "/api/problems",
                json!({"name": name, "contactNo": "1", "problem": "p", "field": "Roof"}),
            ),
        )
        .await;
    }
    let token = login(&app).await;

    let (status, json) = send(&app, authed("GET", "/api/problems/count", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert!(json["message"].is_string());

    let (status, json) = send(&app, authed("GET", "/api/problems/recent", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["name"], "two");
    assert!(json["data"][0].get("contactNo").is_none());
}

#[tokio::test]
async fn test_health_while_store_pending() {
    let db = Database::pending();
    let app = build_router(AppState::new(db, auth_config()));

    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store"], "pending");

    let req = Request::get("/ready").body(Body::empty()).unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // Data-dependent operations fail cleanly instead of hanging
    let (status, json) = send(
        &app,
        post_json("/api/admin/login", json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Database is not ready"}));

    let (status, _) = send(
        &app,
        post_json(
            "/api/problems",
            json!({"name": "A", "contactNo": "123", "problem": "leak"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_and_banner_when_ready() {
    let app = ready_app().await;

    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (_, json) = send(&app, req).await;
    assert_eq!(json["store"], "ready");

    let req = Request::get("/ready").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"ready": true}));

    let req = Request::get("/").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Problem Tracker API");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = ready_app().await;
    let req = Request::get("/nope").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = ready_app().await;

    let req = Request::put("/api/problems").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({"error": "Method not allowed"}));

    let req = Request::get("/api/admin/login").body(Body::empty()).unwrap();
    let (status, json) = send(&app, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({"error": "Method not allowed"}));
}
