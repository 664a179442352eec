//! Async Drivers
//!
//! Wire the sans-IO [`LoaderState`] and [`FormController`] to a
//! [`CustomerApi`] on the tokio runtime.
//!
//! - [`DataLoader`] owns the cached customer list and publishes every change
//!   on a watch channel.
//! - [`CustomerDialog`] owns the create form and, after a successful create,
//!   asks the loader to revalidate without waiting for it.
//!
//! Both are cheap to clone; clones share state. Locks are never held across
//! an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::CustomerApi;
use crate::form::{BeginSubmit, FormController, SubmitCompletion, SubmitError};
use crate::loader::LoaderState;
use crate::model::Field;

/// Shared, watchable customer list cache
#[derive(Clone)]
pub struct DataLoader {
    api: Arc<dyn CustomerApi>,
    state: Arc<watch::Sender<LoaderState>>,
}

impl DataLoader {
    pub fn new(api: Arc<dyn CustomerApi>) -> Self {
        let (state, _) = watch::channel(LoaderState::new());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> LoaderState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<LoaderState> {
        self.state.subscribe()
    }

    /// Fetch the list and wait for the state to be updated
    pub async fn refresh(&self) {
        self.state.send_modify(LoaderState::begin_fetch);

        let result = self
            .api
            .list_customers()
            .await
            .map_err(|e| e.list_message());

        self.state.send_modify(|state| state.resolve(result));
    }

    /// Re-issue the fetch in the background. Dropping the handle does not
    /// cancel it.
    pub fn revalidate(&self) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move { loader.refresh().await })
    }
}

/// Result of [`CustomerDialog::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Customer created, dialog closed, list revalidation started
    Created,
    /// Validation failed; see the dialog's field errors
    Invalid,
    /// The API refused or the request failed; the message is on the dialog
    Rejected(String),
    /// Another submission is still in flight
    Busy,
    /// The dialog is closed
    NotOpen,
    /// The request failed after the dialog was closed
    Dropped,
}

/// Create-customer dialog bound to an API and the list it refreshes
#[derive(Clone)]
pub struct CustomerDialog {
    api: Arc<dyn CustomerApi>,
    loader: DataLoader,
    form: Arc<Mutex<FormController>>,
}

impl CustomerDialog {
    pub fn new(api: Arc<dyn CustomerApi>, loader: DataLoader) -> Self {
        Self {
            api,
            loader,
            form: Arc::new(Mutex::new(FormController::new())),
        }
    }

    fn form(&self) -> MutexGuard<'_, FormController> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current form state for rendering
    pub fn snapshot(&self) -> FormController {
        self.form().clone()
    }

    pub fn open(&self) {
        self.form().open();
    }

    pub fn close(&self) {
        self.form().close();
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.form().set_field(field, value);
    }

    pub fn validate(&self) -> bool {
        self.form().validate()
    }

    /// Validate, send the draft and apply the response.
    ///
    /// On success the list is revalidated in the background and this returns
    /// without waiting for it.
    pub async fn submit(&self) -> SubmitOutcome {
        let begin = self.form().begin_submit();
        let draft = match begin {
            BeginSubmit::Send(draft) => draft,
            BeginSubmit::Invalid => return SubmitOutcome::Invalid,
            BeginSubmit::Busy => return SubmitOutcome::Busy,
            BeginSubmit::NotOpen => return SubmitOutcome::NotOpen,
        };

        let result = self
            .api
            .create_customer(&draft)
            .await
            .map_err(SubmitError::from);

        let (completion, message) = {
            let mut form = self.form();
            let completion = form.complete_submit(result);
            (completion, form.submit_error().map(str::to_string))
        };

        match completion {
            SubmitCompletion::Created => {
                drop(self.loader.revalidate());
                SubmitOutcome::Created
            }
            SubmitCompletion::Rejected => SubmitOutcome::Rejected(message.unwrap_or_default()),
            SubmitCompletion::Dropped => SubmitOutcome::Dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientConfig, HttpCustomerClient};
    use crate::form::FormPhase;
    use crate::model::Draft;
    use crate::test_support::FakeBackend;
    use axum::http::StatusCode;
    use std::time::Duration;
    use tokio::time::timeout;

    fn wire(base_url: String) -> (DataLoader, CustomerDialog) {
        let api: Arc<dyn CustomerApi> =
            Arc::new(HttpCustomerClient::new(ClientConfig::new(base_url)).unwrap());
        let loader = DataLoader::new(Arc::clone(&api));
        let dialog = CustomerDialog::new(api, loader.clone());
        (loader, dialog)
    }

    fn fill_jane(dialog: &CustomerDialog) {
        dialog.open();
        dialog.set_field(Field::FirstName, "Jane");
        dialog.set_field(Field::LastName, "Doe");
        dialog.set_field(Field::Email, "jane@doe.com");
    }

    async fn wait_for_customers(loader: &DataLoader, count: usize) {
        let mut rx = loader.subscribe();
        let waited = timeout(
            Duration::from_secs(5),
            rx.wait_for(|state| state.data().map(|c| c.len()) == Some(count)),
        )
        .await;
        assert!(matches!(waited, Ok(Ok(_))), "list never reached {count} customers");
    }

    async fn wait_until_in_flight(dialog: &CustomerDialog) {
        for _ in 0..1000 {
            if dialog.snapshot().in_flight() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("submission never started");
    }

    #[tokio::test]
    async fn test_initial_load() {
        let backend = FakeBackend::start().await;
        backend.seed(vec![serde_json::json!({
            "firstName": "Jane", "lastName": "Doe", "email": "jane@doe.com", "businessName": "Acme"
        })]);
        let (loader, _) = wire(backend.base_url());

        assert!(!loader.snapshot().is_loading());
        loader.refresh().await;

        let state = loader.snapshot();
        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.data().unwrap()[0].display_name(), "Acme");
    }

    #[tokio::test]
    async fn test_list_error_banner_and_recovery() {
        let backend = FakeBackend::start().await;
        backend.fail_list(
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({"code": "UNAVAILABLE", "message": "Database unavailable"}),
        );
        let (loader, _) = wire(backend.base_url());

        loader.refresh().await;
        let state = loader.snapshot();
        assert_eq!(state.error(), Some("Database unavailable"));
        assert!(state.data().is_none());
        assert!(!state.is_loading());

        backend.heal_list();
        loader.refresh().await;
        let state = loader.snapshot();
        assert_eq!(state.error(), None);
        assert_eq!(state.data().map(|c| c.len()), Some(0));
    }

    #[tokio::test]
    async fn test_create_revalidates_and_resets() {
        let backend = FakeBackend::start().await;
        let (loader, dialog) = wire(backend.base_url());
        loader.refresh().await;
        assert_eq!(backend.list_calls(), 1);

        fill_jane(&dialog);
        let sent = dialog.snapshot().draft().clone();

        assert_eq!(dialog.submit().await, SubmitOutcome::Created);

        let form = dialog.snapshot();
        assert_eq!(form.phase(), FormPhase::Closed);
        assert_eq!(form.draft(), &Draft::blank());
        assert!(form.errors().is_empty());
        assert_eq!(form.submit_error(), None);

        assert_eq!(backend.created(), vec![serde_json::to_value(&sent).unwrap()]);

        wait_for_customers(&loader, 1).await;
        assert_eq!(backend.list_calls(), 2);
        assert_eq!(loader.snapshot().data().unwrap()[0].display_name(), "Jane Doe");
    }

    #[tokio::test]
    async fn test_rejected_create_keeps_dialog_open() {
        let backend = FakeBackend::start().await;
        backend.fail_create(
            StatusCode::BAD_REQUEST,
            serde_json::json!({"message": "Email already exists"}),
        );
        let (loader, dialog) = wire(backend.base_url());
        loader.refresh().await;

        fill_jane(&dialog);
        let before = dialog.snapshot().draft().clone();

        assert_eq!(
            dialog.submit().await,
            SubmitOutcome::Rejected("Email already exists".to_string())
        );

        let form = dialog.snapshot();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.submit_error(), Some("Email already exists"));
        assert_eq!(form.draft(), &before);
        assert!(form.errors().is_empty());
        assert_eq!(backend.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_rejection_with_numeric_code_keeps_message() {
        let backend = FakeBackend::start().await;
        backend.fail_create(
            StatusCode::CONFLICT,
            serde_json::json!({"code": 409, "message": "Email already exists"}),
        );
        let (_, dialog) = wire(backend.base_url());

        fill_jane(&dialog);
        assert_eq!(
            dialog.submit().await,
            SubmitOutcome::Rejected("Email already exists".to_string())
        );
        assert_eq!(dialog.snapshot().submit_error(), Some("Email already exists"));
    }

    #[tokio::test]
    async fn test_list_error_with_null_code_keeps_message() {
        let backend = FakeBackend::start().await;
        backend.fail_list(
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({"code": null, "message": "Database unavailable"}),
        );
        let (loader, _) = wire(backend.base_url());

        loader.refresh().await;
        assert_eq!(loader.snapshot().error(), Some("Database unavailable"));
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let backend = FakeBackend::start().await;
        backend.fail_create(StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({}));
        let (_, dialog) = wire(backend.base_url());

        fill_jane(&dialog);
        assert_eq!(
            dialog.submit().await,
            SubmitOutcome::Rejected(crate::form::CREATE_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let backend = FakeBackend::start().await;
        let (_, dialog) = wire(backend.base_url());

        dialog.open();
        dialog.set_field(Field::FirstName, "Jane 2");
        assert_eq!(dialog.submit().await, SubmitOutcome::Invalid);

        let form = dialog.snapshot();
        assert!(form.is_open());
        assert_eq!(form.errors().len(), 3);
        assert!(backend.created().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_surfaces_message() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let (_, dialog) = wire(format!("http://{addr}"));

        fill_jane(&dialog);
        assert_eq!(
            dialog.submit().await,
            SubmitOutcome::Rejected("Customers API unavailable".to_string())
        );
        assert_eq!(dialog.snapshot().phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_noop() {
        let backend = FakeBackend::start().await;
        backend.delay_create(Duration::from_millis(200));
        let (_, dialog) = wire(backend.base_url());

        fill_jane(&dialog);
        let first = tokio::spawn({
            let dialog = dialog.clone();
            async move { dialog.submit().await }
        });
        wait_until_in_flight(&dialog).await;

        assert_eq!(dialog.submit().await, SubmitOutcome::Busy);
        assert_eq!(first.await.unwrap(), SubmitOutcome::Created);
        assert_eq!(backend.created().len(), 1);
    }

    #[tokio::test]
    async fn test_close_mid_submit_still_revalidates() {
        let backend = FakeBackend::start().await;
        backend.delay_create(Duration::from_millis(100));
        let (loader, dialog) = wire(backend.base_url());
        loader.refresh().await;

        fill_jane(&dialog);
        let pending = tokio::spawn({
            let dialog = dialog.clone();
            async move { dialog.submit().await }
        });
        wait_until_in_flight(&dialog).await;

        dialog.close();
        assert_eq!(dialog.snapshot().phase(), FormPhase::Closed);

        assert_eq!(pending.await.unwrap(), SubmitOutcome::Created);
        wait_for_customers(&loader, 1).await;
    }

    #[tokio::test]
    async fn test_close_twice_is_same_as_once() {
        let backend = FakeBackend::start().await;
        let (_, dialog) = wire(backend.base_url());

        fill_jane(&dialog);
        dialog.validate();
        dialog.close();
        let once = dialog.snapshot();
        dialog.close();
        let twice = dialog.snapshot();

        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.draft(), twice.draft());
        assert_eq!(once.errors(), twice.errors());
        assert_eq!(twice.draft(), &Draft::blank());
    }
}
