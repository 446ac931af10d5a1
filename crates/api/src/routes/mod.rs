//! Route handlers, one module per resource.

pub mod inventory;
pub mod orders;
pub mod reports;
pub mod suppliers;
pub mod system;
