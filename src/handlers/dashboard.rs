// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{config::AppState, models::dashboard::DashboardSummary};

// GET /api/dashboard/summary
pub async fn get_summary(State(app_state): State<AppState>) -> Json<DashboardSummary> {
    Json(app_state.dashboard_service.get_summary().await)
}
