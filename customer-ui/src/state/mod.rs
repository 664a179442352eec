//! State Management
//!
//! Page state for the customer list and the create dialog.

pub mod customers;

pub use customers::{provide_customer_state, CustomerState};
