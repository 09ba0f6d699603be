//! Profile editor: bio and avatar upload.

use leptos::prelude::*;
use leptos_router::components::{A, Redirect};

use crate::app::AppApi;
use crate::state::auth::resolve_user;
use crate::state::nav::{HOME_ROUTE, LANDING_ROUTE, NavigationState};
use crate::state::profile::{
    AVATAR_ACCEPT, AvatarUpload, BIO_LIMIT, avatar_source, clamp_bio, remaining_bio_chars, update_profile,
};
use crate::state::toasts::ToastQueue;
use crate::util::liveness::Liveness;

fn now_millis() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now = js_sys::Date::now() as u64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let nav = expect_context::<RwSignal<NavigationState>>();

    let nav_user = nav.get_untracked().user;
    if let Some(user) = &nav_user {
        api.session().set_user(user);
    }
    let Some(initial) = resolve_user(nav_user, api.session()) else {
        return view! { <Redirect path=LANDING_ROUTE/> }.into_any();
    };

    let bio = RwSignal::new(initial.bio.clone().unwrap_or_default());
    let user = RwSignal::new(initial);
    let avatar = RwSignal::new(None::<AvatarUpload>);
    let busy = RwSignal::new(false);
    // Bumped after each successful save so the avatar URL changes.
    let cache_bust = RwSignal::new(now_millis());

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let config = api.config().clone();
    let avatar_src = move || avatar_source(&config, &user.get(), cache_bust.get());

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            leptos::task::spawn_local(async move {
                let picked = crate::state::profile::read_avatar_input(&input).await;
                if picked.is_none() {
                    leptos::logging::warn!("could not read selected avatar file");
                }
                avatar.set(picked);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        let (user_id, draft_bio) = (user.get_untracked().id, bio.get());
        let picked = avatar.get();
        let (api, liveness) = (api.clone(), liveness.clone());
        leptos::task::spawn_local(async move {
            let result = update_profile(&api, &user_id, &draft_bio, picked).await;
            liveness.deliver(|| {
                busy.set(false);
                match result {
                    Ok(resp) => {
                        toasts.update(|q| {
                            q.success_or(&resp.message, "Profile updated");
                        });
                        if let Some(updated) = resp.user {
                            bio.set(updated.bio.clone().unwrap_or_default());
                            nav.update(|n| {
                                if n.user.is_some() {
                                    n.user = Some(updated.clone());
                                }
                            });
                            user.set(updated);
                            avatar.set(None);
                            cache_bust.set(now_millis());
                        }
                    }
                    Err(e) => toasts.update(|q| {
                        q.api_error(&e, "Update failed");
                    }),
                }
            });
        });
    };

    view! {
        <div class="profile">
            <form class="profile__card" enctype="multipart/form-data" on:submit=on_submit>
                <header class="profile__header">
                    <div class="profile__avatar">
                        <img src=avatar_src alt="avatar"/>
                        <label class="profile__avatar-pick" for="fileInput">"Change"</label>
                        <input id="fileInput" type="file" accept=AVATAR_ACCEPT class="hidden" on:change=on_pick/>
                        {move || avatar.get().map(|a| view! { <p class="profile__picked">{a.file_name}</p> })}
                    </div>
                    <div class="profile__identity">
                        <h1>{move || user.get().username}</h1>
                        <p class="profile__email">{move || user.get().email}</p>
                        <A href=HOME_ROUTE attr:class="profile__back">"Back"</A>
                    </div>
                </header>
                <label class="profile__label" for="bio">"Bio"</label>
                <textarea
                    id="bio"
                    class="profile__bio"
                    placeholder="Tell us about yourself..."
                    maxlength=BIO_LIMIT.to_string()
                    prop:value=move || bio.get()
                    on:input=move |ev| bio.set(clamp_bio(&event_target_value(&ev)))
                ></textarea>
                <p class=move || {
                    if remaining_bio_chars(&bio.get()) == 0 { "profile__counter profile__counter--full" } else { "profile__counter" }
                }>
                    {move || format!("{} characters left", remaining_bio_chars(&bio.get()))}
                </p>
                <button class="profile__submit" type="submit" disabled=move || busy.get()>
                    "Update Profile"
                </button>
            </form>
        </div>
    }
    .into_any()
}
