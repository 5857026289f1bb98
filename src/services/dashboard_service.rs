// src/services/dashboard_service.rs

use std::future::Future;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{fill_status_counts, DashboardSummary},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    /// Nunca falha: cada card que não carregar vira zero.
    pub async fn get_summary(&self) -> DashboardSummary {
        let (properties, active_agents, monthly_sales, pending_sales) = tokio::join!(
            or_default("properties", self.repo.count_properties_by_status()),
            or_default("activeAgents", self.repo.count_active_agents()),
            or_default("monthlySales", self.repo.monthly_approved_sales()),
            or_default("pendingSales", self.repo.count_pending_sales()),
        );

        DashboardSummary {
            properties: fill_status_counts(&properties),
            active_agents,
            monthly_sales,
            pending_sales,
        }
    }
}

async fn or_default<T, F>(card: &'static str, query: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, AppError>>,
{
    query.await.unwrap_or_else(|e| {
        tracing::warn!(card, error = %e, "falha ao calcular agregado do dashboard");
        T::default()
    })
}
