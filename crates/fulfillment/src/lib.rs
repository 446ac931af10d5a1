//! Order creation, validation and fulfillment pipeline.
//!
//! An order travels through these steps:
//! 1. Parse and validate the line items against inventory or suppliers
//! 2. Price the order from current unit or supplier prices
//! 3. Store it and mutate stock (sales) or record supplier history (purchases)
//! 4. For purchases, schedule the `Processed → InTransit → Delivered`
//!    progression; stock arrives when the order is delivered
//!
//! Steps 1–3 run as one pass under the inventory and supplier locks.

pub mod delivery;
pub mod error;
mod ledger;
pub mod pricer;
pub mod scheduler;
pub mod service;
pub mod stock;
pub mod validator;

pub use delivery::DeliveryConfig;
pub use error::{FulfillmentError, Rejection, Result};
pub use scheduler::{DeliveryScheduler, ManualScheduler, ScheduledTask, TokioScheduler};
pub use service::OrderService;
pub use validator::ResolvedLine;
