//! In-process fake customers backend for tests.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeState {
    customers: Vec<Value>,
    create_requests: Vec<Value>,
    list_calls: usize,
    list_failure: Option<(StatusCode, Value)>,
    create_failure: Option<(StatusCode, Value)>,
    create_delay: Option<Duration>,
}

type Shared = Arc<Mutex<FakeState>>;

/// Serves `GET`/`POST /api/customers` on an ephemeral local port
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let router = Router::new()
            .route("/api/customers", get(list).post(create))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn seed(&self, customers: Vec<Value>) {
        self.state.lock().unwrap().customers = customers;
    }

    pub fn fail_list(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().list_failure = Some((status, body));
    }

    pub fn heal_list(&self) {
        self.state.lock().unwrap().list_failure = None;
    }

    pub fn fail_create(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().create_failure = Some((status, body));
    }

    pub fn delay_create(&self, delay: Duration) {
        self.state.lock().unwrap().create_delay = Some(delay);
    }

    /// Bodies of every create request received, in arrival order
    pub fn created(&self) -> Vec<Value> {
        self.state.lock().unwrap().create_requests.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }
}

async fn list(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.list_calls += 1;

    match state.list_failure.clone() {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => Json(state.customers.clone()).into_response(),
    }
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let delay = state.lock().unwrap().create_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut state = state.lock().unwrap();
    state.create_requests.push(body.clone());

    match state.create_failure.clone() {
        Some((status, error)) => (status, Json(error)).into_response(),
        None => {
            state.customers.push(body.clone());
            (StatusCode::CREATED, Json(body)).into_response()
        }
    }
}
