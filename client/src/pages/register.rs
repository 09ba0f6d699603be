//! Account registration.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::AppApi;
use crate::state::auth::{register, validate_register};
use crate::state::nav::LOGIN_ROUTE;
use crate::state::toasts::ToastQueue;
use crate::util::liveness::Liveness;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
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
        let request = match validate_register(&username.get(), &email.get(), &password.get()) {
            Ok(request) => request,
            Err(msg) => {
                toasts.update(|q| {
                    q.error(msg);
                });
                return;
            }
        };
        busy.set(true);

        let (api, navigate, liveness) = (api.clone(), navigate.clone(), liveness.clone());
        leptos::task::spawn_local(async move {
            let result = register(&api, &request).await;
            liveness.deliver(|| {
                busy.set(false);
                match result {
                    Ok(resp) => {
                        toasts.update(|q| {
                            q.success_or(&resp.message, "Registered");
                        });
                        navigate(LOGIN_ROUTE, NavigateOptions::default());
                    }
                    Err(e) => {
                        toasts.update(|q| {
                            q.api_error(&e, "Registration failed");
                        });
                    }
                }
            });
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, signal: RwSignal<String>| {
        view! {
            <label class="auth-label" for=id>{label}</label>
            <input
                id=id
                class="auth-input"
                type=kind
                required
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2 class="auth-card__title">"Create Account"</h2>
                {field("username", "Username", "text", username)}
                {field("email", "Email", "email", email)}
                {field("password", "Password", "password", password)}
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
                <p class="auth-card__footer">
                    "Already have an account? " <A href=LOGIN_ROUTE>"Login"</A>
                </p>
            </form>
        </div>
    }
}
