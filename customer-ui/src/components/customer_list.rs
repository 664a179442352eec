//! Customer List Component
//!
//! Renders the cached customer list. A load error replaces the list.

use customer_desk::{Customer, LoaderState};
use leptos::*;

use crate::components::{ErrorBanner, ListSkeleton};
use crate::state::customers::use_customer_state;

#[derive(Debug, Clone, PartialEq)]
enum ListView {
    Loading,
    Failed(String),
    Empty,
    Customers(Vec<Customer>),
}

/// Pick what the list area shows. The error text is shown as-is.
fn list_view(list: &LoaderState) -> ListView {
    if let Some(error) = list.error() {
        ListView::Failed(error.to_string())
    } else if list.is_loading() {
        ListView::Loading
    } else {
        match list.data() {
            Some([]) | None => ListView::Empty,
            Some(customers) => ListView::Customers(customers.to_vec()),
        }
    }
}

/// Customer list bound to the page's list cache
#[component]
pub fn CustomerList() -> impl IntoView {
    let state = use_customer_state();

    let list_view = create_memo(move |_| state.list.with(list_view));

    move || match list_view.get() {
        ListView::Loading => view! { <ListSkeleton count=5 /> }.into_view(),
        ListView::Failed(message) => view! { <ErrorBanner message=message /> }.into_view(),
        ListView::Empty => view! {
            <div class="text-center py-12">
                <p class="text-gray-400">"No customers yet. Add your first one!"</p>
            </div>
        }
        .into_view(),
        ListView::Customers(customers) => view! {
            <ul class="divide-y divide-gray-700 bg-gray-800 rounded-xl border border-gray-700">
                <For
                    each=move || customers.clone()
                    key=|customer| customer.email.clone()
                    children=move |customer| view! { <CustomerRow customer=customer /> }
                />
            </ul>
        }
        .into_view(),
    }
}

/// Single customer row
#[component]
fn CustomerRow(customer: Customer) -> impl IntoView {
    let initial = customer
        .display_name()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    view! {
        <li class="flex items-center space-x-4 px-4 py-3">
            <div class="w-10 h-10 rounded-full bg-primary-600 flex items-center justify-center font-semibold">
                {initial}
            </div>
            <div>
                <p class="font-medium">{customer.display_name()}</p>
                <p class="text-gray-400 text-sm">{customer.email.clone()}</p>
            </div>
        </li>
    }
}
