// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

/// Monta o router completo sobre o estado já inicializado.
pub fn app(app_state: AppState) -> Router {
    // Tudo abaixo exige Bearer token
    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::deactivate_user),
        )
        .route(
            "/properties",
            get(handlers::properties::list_properties)
                .post(handlers::properties::create_property),
        )
        .route(
            "/properties/{id}",
            get(handlers::properties::get_property)
                .put(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        )
        .route(
            "/properties/{id}/contract-data",
            get(handlers::properties::get_contract_data),
        )
        .route(
            "/properties/{id}/contract.pdf",
            get(handlers::properties::get_contract_pdf),
        )
        .route(
            "/documents",
            get(handlers::documents::list_documents).post(handlers::documents::add_document),
        )
        .route(
            "/documents/{id}",
            axum::routing::delete(handlers::documents::delete_document),
        )
        .route(
            "/sales",
            get(handlers::sales::list_sales).post(handlers::sales::register_sale),
        )
        .route("/sales/{id}", get(handlers::sales::get_sale))
        .route("/sales/{id}/approve", put(handlers::sales::approve_sale))
        .route("/reports/sales", get(handlers::sales::sales_report))
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route("/social/publish", post(handlers::social::publish))
        .route("/social/logs", get(handlers::social::list_logs))
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::posts::get_post).delete(handlers::posts::delete_post),
        )
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas públicas
    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
