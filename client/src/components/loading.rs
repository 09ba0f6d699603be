//! Interim placeholder shown while data or the session check is pending.

use leptos::prelude::*;

#[component]
pub fn Loading(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="loading" role="status" aria-live="polite">
            <span class="loading__spinner"></span>
            <p class="loading__label">{label}</p>
        </div>
    }
}
