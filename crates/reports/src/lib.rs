//! Reports over order snapshots.
//!
//! Everything here is a fold over a slice of [`domain::Order`], usually the
//! snapshot returned by the order service, so reports never hold a lock on
//! live state.

pub mod financial;

pub use financial::{
    FinancialReport, all_transactions, purchase_transactions, sale_transactions,
};
