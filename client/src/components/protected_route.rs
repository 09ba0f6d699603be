//! Route gate for the authenticated `/todo` area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted as the layout of the protected parent route. Each mount builds a
//! fresh `SessionGuard` and performs exactly one verification request; a
//! remount re-checks from scratch.
//!
//! DESIGN
//! ======
//! While the guard is `Checking` only the `Loading` placeholder renders, so
//! protected content never flashes. The verification future is not aborted
//! on unmount. The mount's `Liveness` stops it from writing the outcome into
//! a disposed signal, but fail-closed clearing of the session store still
//! happens since that state is global.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::components::loading::Loading;
use crate::state::guard::{GuardState, GuardView};
#[cfg(feature = "hydrate")]
use crate::{app::AppApi, state::guard::SessionGuard, util::liveness::Liveness};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let state = RwSignal::new(GuardState::Checking);

    #[cfg(feature = "hydrate")]
    {
        let api = expect_context::<AppApi>();
        let liveness = Liveness::new();
        let task_liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let mut guard = SessionGuard::new(api.session());
            if !guard.had_token() {
                leptos::logging::log!("no stored token; verifying anyway");
            }
            let settled = guard.activate(&api).await;
            task_liveness.deliver(|| state.set(settled));
        });
        on_cleanup(move || liveness.end());
    }

    move || match state.get().view() {
        GuardView::Interim => view! { <Loading label="Checking session..."/> }.into_any(),
        GuardView::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        GuardView::Protected => children().into_any(),
    }
}
