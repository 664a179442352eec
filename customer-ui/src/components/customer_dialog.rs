//! Create Customer Dialog
//!
//! Modal form bound to the page's form controller. Inputs clear their own
//! error as the user types; full validation runs on submit.

use customer_desk::Field;
use leptos::*;

use crate::components::ErrorBanner;
use crate::state::customers::use_customer_state;

/// Create customer modal, rendered only while the form is open
#[component]
pub fn CustomerDialog() -> impl IntoView {
    let state = use_customer_state();

    let is_open = create_memo(move |_| state.form.with(|form| form.is_open()));
    let submitting = create_memo(move |_| state.form.with(|form| form.in_flight()));
    let can_submit = create_memo(move |_| state.can_submit());
    let submit_error =
        create_memo(move |_| state.form.with(|form| form.submit_error().map(str::to_string)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.submit();
    };

    move || {
        if !is_open.get() {
            return view! {}.into_view();
        }

        view! {
            <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
                <div
                    role="dialog"
                    aria-labelledby="customer-dialog-title"
                    class="bg-gray-800 rounded-xl p-6 w-full max-w-md mx-4"
                >
                    <div class="flex items-center justify-between mb-6">
                        <h2 id="customer-dialog-title" class="text-xl font-semibold">"Add Customer"</h2>
                        <button
                            on:click=move |_| state.close_dialog()
                            class="text-gray-400 hover:text-white"
                        >
                            "✕"
                        </button>
                    </div>

                    <form on:submit=on_submit class="space-y-4" novalidate=true>
                        {move || submit_error.get().map(|message| view! {
                            <ErrorBanner message=message />
                        })}

                        <FieldInput field=Field::FirstName placeholder="e.g., Jane" />
                        <FieldInput field=Field::LastName placeholder="e.g., Doe" />
                        <FieldInput field=Field::Email placeholder="jane@example.com" input_type="email" />
                        <FieldInput field=Field::BusinessName placeholder="Optional" />

                        // Buttons
                        <div class="flex space-x-3 pt-4">
                            <button
                                type="button"
                                on:click=move |_| state.close_dialog()
                                class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                            >
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                disabled=move || !can_submit.get()
                                class="flex-1 px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                       rounded-lg font-medium transition-colors"
                            >
                                {move || if submitting.get() { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        }
        .into_view()
    }
}

/// Labelled input for one draft field with its inline error
#[component]
fn FieldInput(
    field: Field,
    placeholder: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
) -> impl IntoView {
    let state = use_customer_state();

    let value = create_memo(move |_| state.form.with(|form| form.draft().get(field).to_string()));
    let error = create_memo(move |_| {
        state
            .form
            .with(|form| form.field_error(field).map(str::to_string))
    });
    let input_id = format!("customer-{}", field.key());

    view! {
        <div>
            <label for=input_id.clone() class="block text-sm text-gray-400 mb-2">{field.label()}</label>
            <input
                id=input_id
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| state.set_field(field, event_target_value(&ev))
                class=move || input_class(error.with(Option::is_some))
            />
            {move || error.get().map(|message| view! {
                <p class="text-red-400 text-sm mt-1">{message}</p>
            })}
        </div>
    }
}

fn input_class(has_error: bool) -> &'static str {
    if has_error {
        "w-full bg-gray-700 rounded-lg px-4 py-3 border border-red-500 focus:outline-none"
    } else {
        "w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-primary-500 focus:outline-none"
    }
}
