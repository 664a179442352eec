//! Customers REST API Client
//!
//! HTTP client for the two customer endpoints:
//!
//! - `GET /api/customers` - list customers
//! - `POST /api/customers` - create a customer from a draft

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

use crate::form::SubmitError;
use crate::loader::{CUSTOMERS_KEY, LOAD_FAILED_MESSAGE};
use crate::model::{ApiError, Customer, Draft};

/// Access to the customers backend
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// Fetch the full customer list in server order
    async fn list_customers(&self) -> Result<Vec<Customer>, ClientError>;

    /// Create a customer. Any 2xx response counts as success.
    async fn create_customer(&self, draft: &Draft) -> Result<(), ClientError>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Absolute URL of the customers resource
    pub fn customers_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CUSTOMERS_KEY)
    }
}

/// reqwest-backed [`CustomerApi`]
pub struct HttpCustomerClient {
    client: Client,
    config: ClientConfig,
}

impl HttpCustomerClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Turn a non-2xx response into an error, decoding the body if possible
    async fn rejection(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        ClientError::Api {
            status,
            body: ApiError::from_body(&text),
        }
    }
}

#[async_trait]
impl CustomerApi for HttpCustomerClient {
    async fn list_customers(&self) -> Result<Vec<Customer>, ClientError> {
        let url = self.config.customers_url();

        let response = self.client.get(&url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response
            .json::<Vec<Customer>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn create_customer(&self, draft: &Draft) -> Result<(), ClientError> {
        let url = self.config.customers_url();

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        tracing::info!(status = response.status().as_u16(), "customer created");
        Ok(())
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

/// Errors from talking to the customers API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Customers API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("API error {status}: {}", .body.as_ref().and_then(ApiError::message).unwrap_or("no message"))]
    Api { status: u16, body: Option<ApiError> },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message for the list-load banner
    pub fn list_message(&self) -> String {
        match self {
            ClientError::Api { body, .. } => body
                .as_ref()
                .and_then(ApiError::message)
                .unwrap_or(LOAD_FAILED_MESSAGE)
                .to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status, body } => SubmitError::Rejected {
                status,
                message: body.and_then(|b| b.message().map(str::to_string)),
            },
            other => SubmitError::Failed {
                message: Some(other.to_string()),
            },
        }
    }
}
