#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceExt;
use uuid::Uuid;

use arteca_backend::{
    models::user::{User, UserRole},
    AppConfig, AppState,
};

pub const JWT_SECRET: &str = "segredo-de-teste";

pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        max_connections: 5,
        acquire_timeout: Duration::from_millis(200),
        token_ttl_hours: 1,
        fonts_dir: PathBuf::from("./fonts"),
        bootstrap_admin: None,
    }
}

/// Estado apontando para um banco que não existe: nada conecta.
pub fn unreachable_state() -> AppState {
    let url = "postgres://postgres@127.0.0.1:1/none";
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy(url)
        .unwrap();
    AppState::from_pool(pool, test_config(url))
}

pub fn state_with_pool(pool: PgPool) -> AppState {
    AppState::from_pool(pool, test_config("postgres://from-pool"))
}

pub fn fake_user(role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: format!("{}@arteca.pe", Uuid::new_v4().simple()),
        password_hash: String::new(),
        full_name: "Teste".to_string(),
        phone: None,
        role,
        photo_url: None,
        is_active: true,
        created_at: chrono::Utc::now(),
    }
}

pub fn token_for(state: &AppState, user: &User) -> String {
    state.auth_service.create_token(user).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (Response<Body>, Value) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (Response::from_parts(parts, Body::empty()), json)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn with_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
