//! Pages
//!
//! Top-level page components for each route.

pub mod customers;

pub use customers::Customers;
