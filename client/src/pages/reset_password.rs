//! Set a new password after the security code has been verified.
//!
//! The user identifier comes from navigation state, falling back to the
//! stored `_id`. Without either the page redirects to `/send-code` before
//! anything is sent.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

use crate::app::AppApi;
use crate::components::loading::Loading;
use crate::state::auth::{ResetOutcome, ResetTarget, reset_password, resolve_reset_id};
use crate::state::nav::{LOGIN_ROUTE, NavigationState, SEND_CODE_ROUTE};
use crate::state::toasts::ToastQueue;
use crate::util::liveness::Liveness;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let nav = expect_context::<RwSignal<NavigationState>>();
    let navigate = use_navigate();

    let nav_id = nav.get_untracked().reset_id;

    // Storage is only readable in the browser, so resolve after mount.
    let target = RwSignal::new(None::<ResetTarget>);
    let session = api.session().clone();
    let lookup_id = nav_id.clone();
    Effect::new(move || target.set(Some(resolve_reset_id(lookup_id.as_deref(), &session))));

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
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
        if password.get().is_empty() || confirm.get().is_empty() {
            toasts.update(|q| {
                q.error("Enter and confirm your new password.");
            });
            return;
        }
        busy.set(true);

        let (api, navigate, liveness, nav_id) = (api.clone(), navigate.clone(), liveness.clone(), nav_id.clone());
        let (new_password, confirm_password) = (password.get(), confirm.get());
        leptos::task::spawn_local(async move {
            let result = reset_password(&api, nav_id.as_deref(), &new_password, &confirm_password).await;
            liveness.deliver(|| {
                busy.set(false);
                match result {
                    Ok(ResetOutcome::Done(resp)) => {
                        toasts.update(|q| {
                            q.success_or(&resp.message, "Password updated");
                        });
                        nav.set(NavigationState::default());
                        navigate(LOGIN_ROUTE, NavigateOptions::default());
                    }
                    Ok(ResetOutcome::Redirect(path)) => navigate(path, NavigateOptions::default()),
                    Err(e) => {
                        toasts.update(|q| {
                            q.api_error(&e, "Password reset failed");
                        });
                    }
                }
            });
        });
    };

    let input_type = move || if show_password.get() { "text" } else { "password" };

    let form = move || {
        view! {
            <div class="auth-page">
                <form class="auth-card" on:submit=on_submit.clone()>
                    <h2 class="auth-card__title">"Reset Password"</h2>
                    <label class="auth-label" for="password">"New Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type=input_type
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="auth-label" for="confirmPassword">"Confirm Password"</label>
                    <input
                        id="confirmPassword"
                        class="auth-input"
                        type=input_type
                        required
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <label class="auth-check">
                        <input
                            type="checkbox"
                            prop:checked=move || show_password.get()
                            on:change=move |_| show_password.update(|v| *v = !*v)
                        />
                        " Show passwords"
                    </label>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Reset Password"
                    </button>
                </form>
            </div>
        }
    };

    move || match target.get() {
        None => view! { <Loading/> }.into_any(),
        Some(ResetTarget::RedirectToSendCode) => view! { <Redirect path=SEND_CODE_ROUTE/> }.into_any(),
        Some(ResetTarget::Proceed(_)) => form().into_any(),
    }
}
