// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::property::PropertyStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: PropertyStatus,
    pub count: i64,
}

// Comissões das vendas aprovadas no mês corrente
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub total_income: Decimal,
    pub sales_count: i64,
}

// Os cards da home
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub properties: Vec<StatusCount>,
    pub active_agents: i64,
    pub monthly_sales: MonthlySales,
    pub pending_sales: i64,
}

/// Uma entrada por status, com zero para os que não aparecem no GROUP BY.
pub fn fill_status_counts(rows: &[StatusCount]) -> Vec<StatusCount> {
    PropertyStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: rows
                .iter()
                .find(|row| row.status == status)
                .map_or(0, |row| row.count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_statuses_count_as_zero() {
        let rows = [StatusCount { status: PropertyStatus::Vendido, count: 3 }];
        let filled = fill_status_counts(&rows);

        assert_eq!(filled.len(), PropertyStatus::ALL.len());
        assert_eq!(filled[0], StatusCount { status: PropertyStatus::Disponible, count: 0 });
        assert_eq!(filled[2], StatusCount { status: PropertyStatus::Vendido, count: 3 });
    }

    #[test]
    fn empty_database_gives_all_zeros() {
        assert!(fill_status_counts(&[]).iter().all(|entry| entry.count == 0));
    }
}
