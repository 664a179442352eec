//! Error Banner Component
//!
//! Used for the page-level list error and the dialog's submit error.

use leptos::*;

#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div
            role="alert"
            class="flex items-center space-x-3 bg-red-900/50 border border-red-600 text-red-200 px-4 py-3 rounded-lg"
        >
            <span class="text-lg">"✕"</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
