//! Create-Customer Form Controller
//!
//! Sans-IO state machine behind the "add customer" dialog:
//!
//! ```text
//! Closed --open--> Editing --begin_submit--> Submitting
//!    ^                ^                          |
//!    |                +---- failure -------------+
//!    +-------------------- success --------------+
//! ```
//!
//! The controller never performs the request itself. A driver calls
//! [`FormController::begin_submit`], sends the returned draft, and feeds the
//! result back through [`FormController::complete_submit`]. Field edits clear
//! that field's error eagerly; full validation only runs on submit.

use tracing::{debug, warn};

use crate::model::{Draft, Field};
use crate::validation::{validate_draft, ValidationErrors};

/// Shown when a rejected create carries no `message` in its body
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create customer";

/// Shown when the request failed without any message of its own
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Dialog lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Closed,
    Editing,
    Submitting,
}

/// Why a create request did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The API answered with a non-2xx status
    Rejected { status: u16, message: Option<String> },
    /// The request never produced a usable response
    Failed { message: Option<String> },
}

impl SubmitError {
    /// Message for the dialog's submit banner
    pub fn user_message(&self) -> String {
        let (message, fallback) = match self {
            SubmitError::Rejected { message, .. } => (message, CREATE_FAILED_MESSAGE),
            SubmitError::Failed { message } => (message, UNEXPECTED_ERROR_MESSAGE),
        };
        message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Result of asking the controller to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginSubmit {
    /// Validation passed; send this draft to the create endpoint
    Send(Draft),
    /// Validation failed; field errors are populated and nothing is sent
    Invalid,
    /// A submission is already in flight
    Busy,
    /// The dialog is not open
    NotOpen,
}

/// What the driver must do after a create request resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SubmitCompletion {
    /// The customer was created and the dialog closed. Revalidate the list.
    Created,
    /// The dialog is back in editing with a submit-level error
    Rejected,
    /// The dialog was closed while the request was in flight; the failure
    /// has nowhere to be shown
    Dropped,
}

/// Draft, field errors and submit error for the create dialog
#[derive(Debug, Clone, Default)]
pub struct FormController {
    phase: FormPhase,
    draft: Draft,
    errors: ValidationErrors,
    submit_error: Option<String>,
    in_flight: bool,
}

impl FormController {
    pub fn new() -> Self {
        Self {
            draft: Draft::blank(),
            ..Default::default()
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// True while a create request is outstanding, even if the dialog was
    /// closed in the meantime
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Open the dialog with an empty draft
    pub fn open(&mut self) {
        if self.phase == FormPhase::Closed {
            self.draft = Draft::blank();
            self.phase = FormPhase::Editing;
            debug!("customer dialog opened");
        }
    }

    /// Update one field. A pending error on that field is cleared without
    /// re-validating anything.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        if self.errors.clear_field(field) {
            debug!(%field, "cleared field error on edit");
        }
    }

    /// Run full validation, replacing the error map with this run's failures
    pub fn validate(&mut self) -> bool {
        self.errors = validate_draft(&self.draft);
        if !self.errors.is_empty() {
            debug!(failed = self.errors.len(), "draft failed validation");
        }
        self.errors.is_empty()
    }

    /// Validate and, if the draft is good, move to `Submitting` and hand back
    /// the draft to send. Re-entrant calls while a request is in flight are
    /// no-ops.
    pub fn begin_submit(&mut self) -> BeginSubmit {
        if self.in_flight {
            return BeginSubmit::Busy;
        }
        if self.phase == FormPhase::Closed {
            return BeginSubmit::NotOpen;
        }
        if !self.validate() {
            return BeginSubmit::Invalid;
        }

        self.phase = FormPhase::Submitting;
        self.in_flight = true;
        self.submit_error = None;
        debug!("submitting customer draft");
        BeginSubmit::Send(self.draft.clone())
    }

    /// Apply the outcome of the create request started by `begin_submit`
    pub fn complete_submit(&mut self, result: Result<(), SubmitError>) -> SubmitCompletion {
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.close();
                SubmitCompletion::Created
            }
            Err(err) => {
                let message = err.user_message();
                if self.phase == FormPhase::Submitting {
                    warn!(error = %message, "customer create failed");
                    self.submit_error = Some(message);
                    self.phase = FormPhase::Editing;
                    SubmitCompletion::Rejected
                } else {
                    warn!(error = %message, "customer create failed after dialog closed");
                    SubmitCompletion::Dropped
                }
            }
        }
    }

    /// Close the dialog from any state and reset everything it shows.
    /// An in-flight request is not cancelled.
    pub fn close(&mut self) {
        self.phase = FormPhase::Closed;
        self.draft = Draft::blank();
        self.errors.clear();
        self.submit_error = None;
    }
}
