//! Customer Desk
//!
//! Customer management page built with Leptos (WASM).
//!
//! # Features
//!
//! - Customer list loaded from `GET /api/customers`
//! - "Add customer" dialog with inline validation
//! - List refresh after a successful create
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Validation and the list/form state machines come from the
//! `customer-desk` crate; this crate only renders them and performs the HTTP
//! calls.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
