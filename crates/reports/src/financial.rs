//! Financial transactions and the all-time profit report.

use domain::{FinancialTransaction, Money, Order, OrderKind};
use serde::Serialize;

/// Transactions of every order, in order creation order.
pub fn all_transactions(orders: &[Order]) -> Vec<FinancialTransaction> {
    orders.iter().map(|order| order.transaction().clone()).collect()
}

/// Transactions of sale orders only.
pub fn sale_transactions(orders: &[Order]) -> Vec<FinancialTransaction> {
    transactions_of(orders, OrderKind::Sale)
}

/// Transactions of purchase orders only.
pub fn purchase_transactions(orders: &[Order]) -> Vec<FinancialTransaction> {
    transactions_of(orders, OrderKind::Purchase)
}

fn transactions_of(orders: &[Order], kind: OrderKind) -> Vec<FinancialTransaction> {
    orders
        .iter()
        .map(Order::transaction)
        .filter(|transaction| transaction.kind() == kind)
        .cloned()
        .collect()
}

/// All-time revenue against purchase spend.
///
/// Purchases count from the moment they are created, delivered or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancialReport {
    pub total_revenue: Money,
    pub total_purchases: Money,
    pub net_income: Money,
    /// True when net income is zero or positive.
    pub is_profit: bool,
}

impl FinancialReport {
    /// Folds every order into revenue and purchase totals. Sums saturate at
    /// the bounds of [`Money`].
    pub fn from_orders(orders: &[Order]) -> Self {
        let (total_revenue, total_purchases) = orders.iter().map(Order::transaction).fold(
            (Money::zero(), Money::zero()),
            |(revenue, purchases), transaction| match transaction.kind() {
                OrderKind::Sale => (revenue + transaction.total(), purchases),
                OrderKind::Purchase => (revenue, purchases + transaction.total()),
            },
        );
        let net_income = total_revenue - total_purchases;

        tracing::debug!(
            orders = orders.len(),
            %total_revenue,
            %total_purchases,
            "financial report generated"
        );

        Self {
            total_revenue,
            total_purchases,
            net_income,
            is_profit: !net_income.is_negative(),
        }
    }
}
