//! HTTP API Client
//!
//! Functions for communicating with the customers REST API.

use customer_desk::loader::LOAD_FAILED_MESSAGE;
use customer_desk::{ApiError, Customer, Draft, SubmitError, CUSTOMERS_KEY};
use gloo_net::http::{Request, Response};

/// Default API base URL (same origin)
pub const DEFAULT_API_BASE: &str = "";

const API_BASE_STORAGE_KEY: &str = "customer_desk_api_url";

/// Get the API base URL from local storage or use default
fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_STORAGE_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn customers_url() -> String {
    format!("{}{}", get_api_base(), CUSTOMERS_KEY)
}

/// Decode the error body of a non-2xx response
async fn error_body(response: Response) -> Option<ApiError> {
    let text = response.text().await.ok()?;
    ApiError::from_body(&text)
}

// ============ API Functions ============

/// Fetch all customers. The error is the message for the page banner.
pub async fn fetch_customers() -> Result<Vec<Customer>, String> {
    let response = Request::get(&customers_url())
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let body = error_body(response).await;
        return Err(body
            .as_ref()
            .and_then(ApiError::message)
            .unwrap_or(LOAD_FAILED_MESSAGE)
            .to_string());
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Create a customer from the dialog's draft
pub async fn create_customer(draft: &Draft) -> Result<(), SubmitError> {
    let response = Request::post(&customers_url())
        .json(draft)
        .map_err(|e| SubmitError::Failed {
            message: Some(format!("Request build error: {}", e)),
        })?
        .send()
        .await
        .map_err(|e| SubmitError::Failed {
            message: Some(e.to_string()),
        })?;

    if !response.ok() {
        let status = response.status();
        let body = error_body(response).await;
        return Err(SubmitError::Rejected {
            status,
            message: body.and_then(|b| b.message().map(str::to_string)),
        });
    }

    Ok(())
}
