//! Order status state machine.

use serde::{Deserialize, Serialize};

use super::OrderKind;

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Processed ──► InTransit ──► Delivered
///     │                           ▲
///     └───────────────────────────┘
/// ```
///
/// Sale orders are created directly in `Delivered`. Purchase orders start in
/// `Processed` and only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order accepted, awaiting dispatch by the supplier.
    Processed,

    /// Goods are on their way to the warehouse.
    InTransit,

    /// Goods have arrived (terminal state).
    Delivered,
}

impl OrderStatus {
    /// Returns the status a freshly created order of the given kind starts in.
    pub fn initial_for(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Sale => OrderStatus::Delivered,
            OrderKind::Purchase => OrderStatus::Processed,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            OrderStatus::Processed => 0,
            OrderStatus::InTransit => 1,
            OrderStatus::Delivered => 2,
        }
    }

    /// Returns true if moving to `next` is a forward transition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        next.rank() > self.rank()
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processed => "Processed",
            OrderStatus::InTransit => "InTransit",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_per_kind() {
        assert_eq!(OrderStatus::initial_for(OrderKind::Sale), OrderStatus::Delivered);
        assert_eq!(
            OrderStatus::initial_for(OrderKind::Purchase),
            OrderStatus::Processed
        );
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(OrderStatus::Processed.can_transition_to(OrderStatus::InTransit));
        assert!(OrderStatus::InTransit.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::Processed.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_backward_and_self_transitions_rejected() {
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::InTransit));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Processed));
        assert!(!OrderStatus::InTransit.can_transition_to(OrderStatus::Processed));
        assert!(!OrderStatus::InTransit.can_transition_to(OrderStatus::InTransit));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Processed.is_terminal());
        assert!(!OrderStatus::InTransit.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Processed.to_string(), "Processed");
        assert_eq!(OrderStatus::InTransit.to_string(), "InTransit");
        assert_eq!(OrderStatus::Delivered.to_string(), "Delivered");
    }

    #[test]
    fn test_serialization() {
        let status = OrderStatus::InTransit;
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
