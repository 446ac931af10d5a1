//! Order record and its financial transaction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::OrderId;

use super::{LineItems, Money, OrderError, OrderKind, OrderStatus};

/// The financial side of an order: type, date and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialTransaction {
    kind: OrderKind,
    date: DateTime<Utc>,
    total: Money,
}

impl FinancialTransaction {
    /// Creates a new transaction.
    pub fn new(kind: OrderKind, date: DateTime<Utc>, total: Money) -> Self {
        Self { kind, date, total }
    }

    /// Returns the transaction type.
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Returns the transaction date.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns the transaction total.
    pub fn total(&self) -> Money {
        self.total
    }
}

/// An order as stored by the order service.
///
/// Everything except the status is fixed at creation. Line items are shared
/// behind an `Arc`, so cloning an order to hand out a snapshot is cheap.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    kind: OrderKind,
    created_at: DateTime<Utc>,
    line_items: Arc<LineItems>,
    status: OrderStatus,
    transaction: FinancialTransaction,
}

impl Order {
    /// Creates an order in the initial status for its kind.
    pub fn new(
        id: OrderId,
        kind: OrderKind,
        line_items: LineItems,
        total: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            created_at,
            line_items: Arc::new(line_items),
            status: OrderStatus::initial_for(kind),
            transaction: FinancialTransaction::new(kind, created_at, total),
        }
    }

    /// Moves the order forward to `next`.
    pub fn advance_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the order kind.
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the line items.
    pub fn line_items(&self) -> &LineItems {
        &self.line_items
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the financial transaction.
    pub fn transaction(&self) -> &FinancialTransaction {
        &self.transaction
    }

    /// Returns the order total.
    pub fn total(&self) -> Money {
        self.transaction.total
    }

    /// Returns true once the order has been delivered.
    pub fn is_delivered(&self) -> bool {
        self.status.is_terminal()
    }
}
