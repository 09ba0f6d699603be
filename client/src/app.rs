//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Outlet, ParentRoute, Route, Router, Routes},
};

use crate::components::{navbar::NavBar, protected_route::ProtectedRoute, toaster::Toaster};
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::transport::BrowserTransport;
use crate::pages::{
    about::AboutPage, forgot::ForgotPage, home::HomePage, landing::LandingPage, login::LoginPage,
    not_found::NotFoundPage, profile::ProfilePage, register::RegisterPage, reset_password::ResetPasswordPage,
};
use crate::state::auth::AuthState;
use crate::state::nav::NavigationState;
use crate::state::session::SessionStore;
use crate::state::toasts::ToastQueue;

/// API client type shared through context.
pub type AppApi = ApiClient<BrowserTransport>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session store, API client, and shared signals, and keeps
/// `AuthState` in step with the store through a subscription.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionStore::browser();
    let api = AppApi::new(ClientConfig::from_build_env(), BrowserTransport, session.clone());

    let auth = RwSignal::new(AuthState::from_session(&session));
    let toasts = RwSignal::new(ToastQueue::default());
    let nav = RwSignal::new(NavigationState::default());

    let subscription = session.subscribe(move |event| auth.update(|a| a.apply(event)));
    on_cleanup({
        let session = session.clone();
        move || session.unsubscribe(subscription)
    });

    provide_context(session);
    provide_context(api);
    provide_context(auth);
    provide_context(toasts);
    provide_context(nav);

    view! {
        <Stylesheet id="leptos" href="/pkg/tasknest.css"/>
        <Title text="TaskNest"/>

        <Router>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("send-code") view=ForgotPage/>
                    <Route path=StaticSegment("verify-code") view=ForgotPage/>
                    <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                    <ParentRoute path=StaticSegment("todo") view=TodoLayout>
                        <Route path=StaticSegment("home") view=HomePage/>
                        <Route path=StaticSegment("about") view=AboutPage/>
                        <Route path=StaticSegment("profile") view=ProfilePage/>
                        <Route path=WildcardSegment("any") view=NotFoundPage/>
                    </ParentRoute>
                </Routes>
            </main>
            <Toaster/>
        </Router>
    }
}

/// Layout for `/todo/*`: session gate, navigation bar, then the child route.
#[component]
fn TodoLayout() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <NavBar/>
            <Outlet/>
        </ProtectedRoute>
    }
}
