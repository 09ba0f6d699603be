//! Email + password login.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppApi;
use crate::state::auth::validate_login;
use crate::state::nav::{HOME_ROUTE, NavigationState, REGISTER_ROUTE, SEND_CODE_ROUTE};
use crate::state::toasts::ToastQueue;
use crate::util::liveness::Liveness;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let nav = expect_context::<RwSignal<NavigationState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(msg) => {
                toasts.update(|q| {
                    q.error(msg);
                });
                return;
            }
        };
        busy.set(true);

        let api = api.clone();
        let navigate = navigate.clone();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let result = crate::state::auth::login(&api, &request).await;
            liveness.deliver(|| {
                busy.set(false);
                match result {
                    Ok(resp) => {
                        toasts.update(|q| {
                            q.success_or(&resp.message, "Logged in");
                        });
                        nav.set(NavigationState::with_user(resp.user));
                        navigate(HOME_ROUTE, NavigateOptions::default());
                    }
                    Err(e) => {
                        toasts.update(|q| {
                            q.api_error(&e, "Login failed");
                        });
                    }
                }
            });
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2 class="auth-card__title">"Login"</h2>
                <label class="auth-label" for="email">"Email"</label>
                <input
                    id="email"
                    class="auth-input"
                    type="email"
                    placeholder="Enter your email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label class="auth-label" for="password">"Password"</label>
                <div class="auth-password">
                    <input
                        id="password"
                        class="auth-input"
                        type=move || if show_password.get() { "text" } else { "password" }
                        placeholder="Enter your password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        type="button"
                        class="auth-password__toggle"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <div class="auth-card__aside">
                    <A href=SEND_CODE_ROUTE>"Forgot Password?"</A>
                </div>
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Sign in"
                </button>
                <p class="auth-card__footer">
                    "Don't have an account? " <A href=REGISTER_ROUTE>"Register"</A>
                </p>
            </form>
        </div>
    }
}
