//! Floor models shared across the workspace

pub mod customer;
pub mod table;

pub use customer::Customer;
pub use table::Table;
