use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use database::{DatabaseConnectionInfo, SqliteDatabase};
use tempfile::TempDir;
use tower::ServiceExt;
use web::{app, WebState};

pub struct TestApp {
    pub router: Router,
    // keeps the database file alive
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_table(true).await
    }

    /// An app whose database lacks the rides table, so every store call fails.
    pub async fn without_table() -> Self {
        Self::with_table(false).await
    }

    async fn with_table(init: bool) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let info = DatabaseConnectionInfo::new(dir.path().join("rides.db"));
        let database = SqliteDatabase::connect(info).await.expect("connect");
        if init {
            database.init_table().await.expect("init table");
        }
        let router = app(WebState {
            rides: Arc::new(database),
        });
        Self { router, _dir: dir }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        (status, read_text(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::get(uri).body(Body::empty()).expect("request"))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, String) {
        self.send(json_request("POST", uri, body)).await
    }
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

pub async fn read_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("json")
}
