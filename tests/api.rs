// Router completo sobre um banco inalcançável: só o que não toca o banco responde normalmente.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use arteca_backend::models::user::UserRole;
use common::{fake_user, get, send, token_for, unreachable_state, with_json};

#[tokio::test]
async fn health_check_is_public() {
    let app = arteca_backend::app(unreachable_state());

    let response = app.oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn login_validates_before_touching_the_database() {
    let app = arteca_backend::app(unreachable_state());

    let (response, body) = send(
        app,
        with_json("POST", "/api/auth/login", None, json!({ "email": "nao-e-email", "password": "" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(body["details"]["email"], json!(["invalid_email"]));
    assert_eq!(body["details"]["password"], json!(["required"]));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request_with_error_body() {
    let app = arteca_backend::app(unreachable_state());

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (response, body) = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = arteca_backend::app(unreachable_state());

    let (response, body) = send(app.clone(), get("/api/properties", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (response, _) = send(app, get("/api/properties", Some("nao.e.jwt"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn report_without_dates_is_rejected_without_a_query() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let (response, body) = send(app.clone(), get("/api/reports/sales", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Falta startDate");

    let (response, body) = send(
        app,
        get("/api/reports/sales?startDate=2026-02-01&endDate=2026-01-01", Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("startDate"));
}

#[tokio::test]
async fn messages_follow_accept_language() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let request = Request::builder()
        .uri("/api/reports/sales?startDate=2026-01-01")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();
    let (response, body) = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing endDate");
}

#[tokio::test]
async fn documents_listing_requires_property_id() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let (response, body) = send(app, get("/api/documents", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Falta propertyId");
}

#[tokio::test]
async fn invalid_filters_and_ids_are_bad_requests() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let (response, _) = send(app.clone(), get("/api/properties?status=VENDIDA", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (response, _) = send(app.clone(), get("/api/sales?status=RECHAZADO", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (response, body) = send(app, get("/api/sales/nao-e-uuid", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn approval_is_admin_only() {
    let state = unreachable_state();
    let agent = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let uri = format!("/api/sales/{}/approve", uuid::Uuid::new_v4());
    let (response, body) = send(app, with_json("PUT", &uri, Some(&agent), json!({}))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "No tiene permisos para realizar esta acción.");
}

#[tokio::test]
async fn user_management_is_admin_only() {
    let state = unreachable_state();
    let agent = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let (response, _) = send(
        app,
        with_json(
            "POST",
            "/api/users",
            Some(&agent),
            json!({ "email": "novo@arteca.pe", "password": "123456", "fullName": "Novo" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn publish_rejects_empty_network_list() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let body = json!({ "propertyId": uuid::Uuid::new_v4(), "networks": [] });
    let (response, body) = send(app, with_json("POST", "/api/social/publish", Some(&token), body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Falta networks");
}

#[tokio::test]
async fn dashboard_degrades_to_zeros() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let (response, body) = send(app, get("/api/dashboard/summary", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let properties = body["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 4);
    assert!(properties.iter().all(|entry| entry["count"] == 0));
    assert_eq!(body["activeAgents"], 0);
    assert_eq!(body["pendingSales"], 0);
    assert_eq!(body["monthlySales"]["salesCount"], 0);
    assert_eq!(body["monthlySales"]["totalIncome"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn unreachable_database_is_a_server_error() {
    let state = unreachable_state();
    let token = token_for(&state, &fake_user(UserRole::Agente));
    let app = arteca_backend::app(state);

    let (response, body) = send(app, get("/api/clients", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "No se pudo conectar a la base de datos" }));
}
