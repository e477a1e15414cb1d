//! Shared helpers for filamento-web integration tests
//!
//! Each test gets its own temp-file database, so tests run in parallel safely.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use filamento_common::db::{self, NewFilament};
use filamento_web::{build_router, wizard, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Router plus the database behind it
pub struct TestApp {
    pub app: Router,
    pub db: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let db = db::init_database(&dir.path().join("filamento.db"))
            .await
            .expect("Should initialize test database");
        let app = build_router(AppState::new(db.clone()));
        Self { app, db, _dir: dir }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Manufacturer id for a new manufacturer
    pub async fn manufacturer(&self, name: &str) -> i64 {
        db::add_manufacturer(&self.db, name)
            .await
            .unwrap()
            .id()
            .expect("Manufacturer should be new")
    }

    /// Filament id for a new filament variant
    pub async fn filament(&self, manufacturer_id: i64, kind: &str, color: &str, hex: &str) -> i64 {
        db::add_filament(
            &self.db,
            &NewFilament {
                manufacturer_id,
                filament_type: kind.to_string(),
                color_name: color.to_string(),
                color_hex_code: hex.to_string(),
            },
        )
        .await
        .unwrap()
        .id()
        .expect("Filament should be new")
    }
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", wizard::encode(k), wizard::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Assert a 303 redirect and return its target
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("Redirect should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}
