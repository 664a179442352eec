//! Customer List Loader State
//!
//! Cache for the customer list resource. Drivers call
//! [`LoaderState::begin_fetch`] when they issue the list request and
//! [`LoaderState::resolve`] when it completes. Responses are applied in the
//! order they resolve, so a slow stale response can overwrite a newer one.

use tracing::{debug, warn};

use crate::model::Customer;

/// Resource key (and path) of the customer list
pub const CUSTOMERS_KEY: &str = "/api/customers";

/// Shown when a failed list response carries no usable message
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load customers";

/// Latest list data, latest error and outstanding request count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderState {
    data: Option<Vec<Customer>>,
    error: Option<String>,
    pending: usize,
}

impl LoaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Customers from the most recent successful fetch, in server order
    pub fn data(&self) -> Option<&[Customer]> {
        self.data.as_deref()
    }

    /// Message from the most recent failed fetch, cleared on success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while nothing has been loaded yet and a request is outstanding
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.pending > 0
    }

    /// True while any list request is outstanding
    pub fn is_validating(&self) -> bool {
        self.pending > 0
    }

    /// Record that a list request was issued
    pub fn begin_fetch(&mut self) {
        self.pending += 1;
        debug!(key = CUSTOMERS_KEY, pending = self.pending, "fetching customers");
    }

    /// Apply a resolved list request. A failure keeps previously loaded data.
    pub fn resolve(&mut self, result: Result<Vec<Customer>, String>) {
        self.pending = self.pending.saturating_sub(1);

        match result {
            Ok(customers) => {
                debug!(count = customers.len(), "customers loaded");
                self.data = Some(customers);
                self.error = None;
            }
            Err(message) => {
                warn!(error = %message, "failed to load customers");
                self.error = Some(message);
            }
        }
    }
}
