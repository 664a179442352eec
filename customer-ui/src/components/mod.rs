//! UI Components
//!
//! Reusable Leptos components for the customers page.

pub mod banner;
pub mod customer_dialog;
pub mod customer_list;
pub mod loading;

pub use banner::ErrorBanner;
pub use customer_dialog::CustomerDialog;
pub use customer_list::CustomerList;
pub use loading::ListSkeleton;
