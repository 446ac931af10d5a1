//! Financial reporting endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use domain::{FinancialTransaction, OrderKind};
use reports::FinancialReport;
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Deserialize)]
pub struct TransactionsQuery {
    pub kind: Option<OrderKind>,
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub kind: OrderKind,
    pub date: String,
    pub total: String,
}

impl From<&FinancialTransaction> for TransactionResponse {
    fn from(transaction: &FinancialTransaction) -> Self {
        Self {
            kind: transaction.kind(),
            date: transaction.date().to_rfc3339(),
            total: transaction.total().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct FinancialReportResponse {
    pub total_revenue: String,
    pub total_purchases: String,
    pub net_income: String,
    pub is_profit: bool,
}

impl From<FinancialReport> for FinancialReportResponse {
    fn from(report: FinancialReport) -> Self {
        Self {
            total_revenue: report.total_revenue.to_string(),
            total_purchases: report.total_purchases.to_string(),
            net_income: report.net_income.to_string(),
            is_profit: report.is_profit,
        }
    }
}

/// GET /reports/financial: all-time revenue, purchases and net income.
pub async fn financial(State(state): State<Arc<AppState>>) -> Json<FinancialReportResponse> {
    let orders = state.orders.all_orders();
    Json(FinancialReport::from_orders(&orders).into())
}

/// GET /reports/transactions: financial transactions, optionally by kind.
pub async fn transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionsQuery>,
) -> Json<Vec<TransactionResponse>> {
    let orders = state.orders.all_orders();
    let transactions = match query.kind {
        None => reports::all_transactions(&orders),
        Some(OrderKind::Sale) => reports::sale_transactions(&orders),
        Some(OrderKind::Purchase) => reports::purchase_transactions(&orders),
    };
    Json(transactions.iter().map(TransactionResponse::from).collect())
}
