//! API Access
//!
//! HTTP calls to the customers endpoints.

pub mod client;

pub use client::{create_customer, fetch_customers};
