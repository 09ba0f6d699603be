//! Top navigation bar for the protected `/todo` area.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppApi;
use crate::state::auth::{AuthState, logout};
use crate::state::nav::{ABOUT_ROUTE, HOME_ROUTE, LANDING_ROUTE, NavigationState, PROFILE_ROUTE};
use crate::state::toasts::ToastQueue;

#[component]
pub fn NavBar() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let nav = expect_context::<RwSignal<NavigationState>>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let navigate = use_navigate();

    // Navigation hand-off wins over the stored record, as on every page.
    let username = move || {
        nav.get()
            .user
            .or_else(|| auth.get().user)
            .map(|u| u.username)
            .unwrap_or_default()
    };

    let on_logout = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        let api = api.clone();
        leptos::task::spawn_local(async move {
            logout(&api).await;
        });
        nav.set(NavigationState::default());
        toasts.update(|q| {
            q.success("Logged out successfully");
        });
        navigate(LANDING_ROUTE, NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <p class="navbar__welcome">
                "Welcome " <span class="navbar__user">{username}</span>
            </p>
            <ul class="navbar__links">
                <li><A href=HOME_ROUTE>"Home"</A></li>
                <li><A href=ABOUT_ROUTE>"About"</A></li>
                <li><A href=PROFILE_ROUTE>"Profile"</A></li>
                <li>
                    <a href=LANDING_ROUTE class="navbar__logout" on:click=on_logout>
                        "Logout"
                    </a>
                </li>
            </ul>
        </nav>
    }
}
