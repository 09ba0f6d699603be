//! Fallback for unknown routes, public and protected.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::nav::LANDING_ROUTE;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"The page you are looking for does not exist."</p>
            <A href=LANDING_ROUTE>"Go back home"</A>
        </div>
    }
}
