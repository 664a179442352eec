//! # Customer Desk
//!
//! Customer management screen: list customers from a backend API and add new
//! ones through a validated form dialog.
//!
//! ## Modules
//!
//! - [`model`]: Customer, draft and API error types
//! - [`validation`]: Client-side field validation
//! - [`form`]: Create-customer form controller (sans-IO state machine)
//! - [`loader`]: Customer list cache state (sans-IO)
//! - [`client`]: reqwest client for `GET`/`POST /api/customers` (feature `client`)
//! - [`session`]: tokio drivers wiring the state machines to the API (feature `client`)
//! - [`config`]: TOML configuration with environment overrides (feature `client`)
//!
//! The sans-IO modules build without the `client` feature so the WASM
//! frontend can share them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use customer_desk::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api: Arc<dyn CustomerApi> =
//!         Arc::new(HttpCustomerClient::new(ClientConfig::new("http://localhost:3000"))?);
//!
//!     // Load the list
//!     let loader = DataLoader::new(Arc::clone(&api));
//!     loader.refresh().await;
//!
//!     // Add a customer; the list revalidates in the background on success
//!     let dialog = CustomerDialog::new(api, loader.clone());
//!     dialog.open();
//!     dialog.set_field(Field::FirstName, "Jane");
//!     dialog.set_field(Field::LastName, "Doe");
//!     dialog.set_field(Field::Email, "jane@doe.com");
//!
//!     match dialog.submit().await {
//!         SubmitOutcome::Created => println!("created"),
//!         SubmitOutcome::Invalid => println!("{:?}", dialog.snapshot().errors()),
//!         other => println!("{:?}", other),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod form;
pub mod loader;
pub mod model;
pub mod validation;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod session;

#[cfg(all(test, feature = "client"))]
mod test_support;

// Re-export top-level types for convenience
pub use form::{BeginSubmit, FormController, FormPhase, SubmitCompletion, SubmitError};
pub use loader::{LoaderState, CUSTOMERS_KEY};
pub use model::{ApiError, Customer, Draft, Field};
pub use validation::{validate_draft, ValidationErrors};

#[cfg(feature = "client")]
pub use client::{ClientConfig, ClientError, CustomerApi, HttpCustomerClient};

#[cfg(feature = "client")]
pub use config::{Config, ConfigError};

#[cfg(feature = "client")]
pub use session::{CustomerDialog, DataLoader, SubmitOutcome};
