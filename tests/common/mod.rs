/**
 * Shared Test Fixtures
 *
 * Spins up the full router over a fresh in-memory database, with a
 * static identity verifier so any credential string logs in as its own
 * account.
 */

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;
use sqlx::SqlitePool;

use taskboard::backend::auth::identity::StaticVerifier;
use taskboard::backend::routes::create_router;
use taskboard::backend::server::config::connect_pool;
use taskboard::backend::server::state::AppState;

pub struct TestApp {
    pub server: TestServer,
    pub db: SqlitePool,
}

/// Build the app over a fresh in-memory database
pub async fn spawn_app() -> TestApp {
    let db = connect_pool("sqlite::memory:")
        .await
        .expect("in-memory database");

    let state = AppState {
        db: db.clone(),
        verifier: Arc::new(StaticVerifier),
    };

    let server = TestServer::new(create_router(state)).expect("test server");

    TestApp { server, db }
}

/// Log in with a credential and return the bearer token
///
/// Distinct credentials act as distinct accounts.
pub async fn login(server: &TestServer, credential: &str) -> String {
    let response = server
        .post("/api/auth/google")
        .json(&json!({ "credential": credential }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("token in login response").to_string()
}

/// List the caller's canvases and return the first canvas id
///
/// Every fresh account has exactly one default canvas.
pub async fn default_canvas_id(server: &TestServer, token: &str) -> String {
    let response = server
        .get("/api/canvases")
        .authorization_bearer(token)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body[0]["id"].as_str().expect("canvas id").to_string()
}
