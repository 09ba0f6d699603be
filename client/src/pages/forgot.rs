//! Forgot-password flow: request an emailed code, then verify it.
//!
//! Mounted at both `/send-code` and `/verify-code`; the two forms share one
//! email field.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppApi;
use crate::components::loading::Loading;
use crate::state::auth::{send_code, validate_send_code, validate_verify_code, verify_code};
use crate::state::nav::{NavigationState, RESET_PASSWORD_ROUTE};
use crate::state::toasts::ToastQueue;
use crate::util::liveness::Liveness;

#[component]
pub fn ForgotPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let nav = expect_context::<RwSignal<NavigationState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let sending = RwSignal::new(false);
    let verifying = RwSignal::new(false);

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let send_api = api.clone();
    let send_liveness = liveness.clone();
    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get() {
            return;
        }
        let request = match validate_send_code(&email.get()) {
            Ok(request) => request,
            Err(msg) => {
                toasts.update(|q| {
                    q.error(msg);
                });
                return;
            }
        };
        sending.set(true);

        let (api, liveness) = (send_api.clone(), send_liveness.clone());
        leptos::task::spawn_local(async move {
            let result = send_code(&api, &request).await;
            liveness.deliver(|| {
                sending.set(false);
                toasts.update(|q| match result {
                    Ok(resp) => {
                        q.success_or(&resp.message, "Security code sent");
                    }
                    Err(e) => {
                        q.api_error(&e, "Forgot password failed");
                    }
                });
            });
        });
    };

    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if verifying.get() {
            return;
        }
        let request = match validate_verify_code(&email.get(), &code.get()) {
            Ok(request) => request,
            Err(msg) => {
                toasts.update(|q| {
                    q.error(msg);
                });
                return;
            }
        };
        verifying.set(true);

        let (api, navigate, liveness) = (api.clone(), navigate.clone(), liveness.clone());
        leptos::task::spawn_local(async move {
            let result = verify_code(&api, &request).await;
            liveness.deliver(|| {
                verifying.set(false);
                match result {
                    Ok(resp) => {
                        toasts.update(|q| {
                            q.success_or(&resp.message, "Code verified");
                        });
                        nav.set(NavigationState::with_reset_id(resp.user.id));
                        navigate(RESET_PASSWORD_ROUTE, NavigateOptions::default());
                    }
                    Err(e) => {
                        toasts.update(|q| {
                            q.api_error(&e, "Verification failed");
                        });
                    }
                }
            });
        });
    };

    view! {
        <Show when=move || !sending.get() fallback=|| view! { <Loading label="Sending Code..."/> }>
            <div class="auth-page">
                <div class="auth-stack">
                    <form class="auth-card auth-card--top" on:submit=on_send.clone()>
                        <h2 class="auth-card__title">"Forgot Password"</h2>
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
                        <button class="auth-button" type="submit">"Send Code"</button>
                    </form>
                    <form class="auth-card auth-card--bottom" on:submit=on_verify.clone()>
                        <label class="auth-label" for="securityCode">"Security Code"</label>
                        <input
                            id="securityCode"
                            class="auth-input"
                            type="text"
                            placeholder="Enter your security code"
                            required
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || verifying.get()>
                            "Submit"
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
