//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::nav::{LOGIN_ROUTE, REGISTER_ROUTE};

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing">
            <section class="landing__hero">
                <h1 class="landing__title">"Your way to TaskNest"</h1>
                <ul class="landing__points">
                    <li>"Organize your tasks efficiently"</li>
                    <li>"Track your progress seamlessly"</li>
                    <li>"Achieve your goals effortlessly"</li>
                </ul>
                <div class="landing__actions">
                    <A href=REGISTER_ROUTE attr:class="landing__cta">"Get Started"</A>
                    <A href=LOGIN_ROUTE attr:class="landing__cta landing__cta--alt">"Login Now"</A>
                </div>
            </section>
        </div>
    }
}
