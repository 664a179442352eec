//! Customers Page
//!
//! Lists customers and hosts the create dialog.

use leptos::*;

use crate::components::{CustomerDialog, CustomerList};
use crate::state::customers::provide_customer_state;

/// Customer management page
#[component]
pub fn Customers() -> impl IntoView {
    let state = provide_customer_state();

    // Load the list on mount
    state.revalidate();

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Customers"</h1>
                    <p class="text-gray-400 mt-1">"Everyone you do business with"</p>
                </div>

                <button
                    on:click=move |_| state.open_dialog()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+ Add Customer"
                </button>
            </div>

            <CustomerList />

            <CustomerDialog />
        </div>
    }
}
