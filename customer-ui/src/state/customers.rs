//! Customer Page State
//!
//! Reactive wrappers around the shared list cache and form controller.
//! The two are owned independently; the dialog only reaches the list
//! through [`CustomerState::revalidate`].

use customer_desk::{
    BeginSubmit, Field, FormController, LoaderState, SubmitCompletion, SubmitError,
};
use leptos::*;

use crate::api;

/// State provided to the customers page and its components
#[derive(Clone, Copy)]
pub struct CustomerState {
    /// Cached customer list, error and loading flag
    pub list: RwSignal<LoaderState>,
    /// Create dialog: draft, field errors, submit error, phase
    pub form: RwSignal<FormController>,
}

/// Provide customer state to the component tree
pub fn provide_customer_state() -> CustomerState {
    let state = CustomerState {
        list: create_rw_signal(LoaderState::new()),
        form: create_rw_signal(FormController::new()),
    };

    provide_context(state);
    state
}

/// Fetch the customer state from context
pub fn use_customer_state() -> CustomerState {
    use_context::<CustomerState>().expect("CustomerState not provided")
}

impl CustomerState {
    /// Re-issue the list fetch. Whichever response resolves last wins.
    pub fn revalidate(&self) {
        let list = self.list;
        list.update(LoaderState::begin_fetch);

        spawn_local(async move {
            let result = api::fetch_customers().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch customers: {}", e).into());
            }
            list.update(|state| state.resolve(result));
        });
    }

    pub fn open_dialog(&self) {
        self.form.update(FormController::open);
    }

    pub fn close_dialog(&self) {
        self.form.update(FormController::close);
    }

    pub fn set_field(&self, field: Field, value: String) {
        self.form.update(|form| form.set_field(field, value));
    }

    /// Whether the Save control should accept a click. A create still in
    /// flight from before a close keeps it disabled after reopening.
    pub fn can_submit(&self) -> bool {
        self.form.with(|form| form.is_open() && !form.in_flight())
    }

    /// Validate and send the draft. No-op while a request is in flight.
    pub fn submit(&self) {
        let begin = self.form.try_update(FormController::begin_submit);
        let Some(BeginSubmit::Send(draft)) = begin else {
            return;
        };

        let state = *self;
        spawn_local(async move {
            let result = api::create_customer(&draft).await;
            state.settle_submit(result, move || state.revalidate());
        });
    }

    /// Apply a create response to the form. `revalidate` runs once, and only
    /// when the customer was created.
    fn settle_submit(
        &self,
        result: Result<(), SubmitError>,
        revalidate: impl FnOnce(),
    ) -> Option<SubmitCompletion> {
        let completion = self.form.try_update(|form| form.complete_submit(result));

        match completion {
            Some(SubmitCompletion::Created) => revalidate(),
            Some(SubmitCompletion::Dropped) => {
                web_sys::console::log_1(&"Create failed after the dialog was closed".into());
            }
            Some(SubmitCompletion::Rejected) | None => {}
        }
        completion
    }
}
