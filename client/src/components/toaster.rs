//! Toast stack with auto-dismiss.
//!
//! Each toast owns a one-shot timer started on mount. A toast dismissed by
//! click before its timer fires ends its `Liveness`, so the late timer is a
//! no-op.

use leptos::prelude::*;

use crate::state::toasts::{Toast, ToastQueue};
#[cfg(feature = "hydrate")]
use crate::util::liveness::Liveness;

#[cfg(feature = "hydrate")]
const TOAST_LIFETIME: std::time::Duration = std::time::Duration::from_millis(3500);

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastQueue>>();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || toasts.get().items().to_vec()
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast/> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    {
        let liveness = Liveness::new();
        let timer = liveness.clone();
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(TOAST_LIFETIME).await;
            if timer.is_alive() {
                toasts.update(|q| q.dismiss(id));
            }
        });
        on_cleanup(move || liveness.end());
    }

    view! {
        <div class=toast.kind.class() role="alert" on:click=move |_| toasts.update(|q| q.dismiss(id))>
            {toast.message}
        </div>
    }
}
