//! Todo list page: fetch, create, edit, toggle, and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside the protected layout, so it only ever mounts in the
//! browser after the session guard has settled. The whole list is fetched
//! once per mount and each successful mutation updates it from the server's
//! response. Responses arriving after unmount are dropped.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::app::AppApi;
use crate::components::loading::Loading;
use crate::net::error::ApiError;
use crate::net::types::Todo;
use crate::state::auth::resolve_user;
use crate::state::nav::{LANDING_ROUTE, NavigationState};
use crate::state::todos::{
    TodoAction, TodoDraft, TodoEdit, TodoList, TodoOutcome, create_todo, deadline_label, delete_todo, load_todos,
    save_todo, settle, toggle_todo,
};
use crate::state::toasts::ToastQueue;
use crate::util::liveness::Liveness;

const DELETE_PROMPT: &str = "Are you sure you want to delete this todo?";

fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let nav = expect_context::<RwSignal<NavigationState>>();

    let Some(user) = resolve_user(nav.get_untracked().user, api.session()) else {
        return view! { <Redirect path=LANDING_ROUTE/> }.into_any();
    };
    let owner_id = user.id;

    let todos = RwSignal::new(TodoList::default());
    let loading = RwSignal::new(true);
    let draft = RwSignal::new(TodoDraft::default());
    let editing = RwSignal::new(None::<TodoEdit>);

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    // Applies a finished flow to the latest list; runs `after` when it changed.
    let finish = move |action: TodoAction, result: Result<TodoOutcome, ApiError>, after: &dyn Fn()| {
        let mut applied = false;
        todos.update(|list| toasts.update(|q| applied = settle(action, result, list, q)));
        if applied {
            after();
        }
    };

    {
        let (api, liveness, owner_id) = (api.clone(), liveness.clone(), owner_id.clone());
        leptos::task::spawn_local(async move {
            let result = load_todos(&api, &owner_id).await;
            liveness.deliver(|| {
                finish(TodoAction::Load, result, &|| {});
                loading.set(false);
            });
        });
    }

    let on_create = {
        let (api, liveness) = (api.clone(), liveness.clone());
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let request = match draft.get().validate(&owner_id) {
                Ok(request) => request,
                Err(message) => {
                    toasts.update(|q| {
                        q.error(message);
                    });
                    return;
                }
            };
            let (api, liveness) = (api.clone(), liveness.clone());
            leptos::task::spawn_local(async move {
                let result = create_todo(&api, &request).await;
                liveness.deliver(|| finish(TodoAction::Create, result, &|| draft.set(TodoDraft::default())));
            });
        }
    };

    let on_toggle = Callback::new({
        let (api, liveness) = (api.clone(), liveness.clone());
        move |todo: Todo| {
            let (api, liveness) = (api.clone(), liveness.clone());
            leptos::task::spawn_local(async move {
                let result = toggle_todo(&api, &todo).await;
                liveness.deliver(|| finish(TodoAction::Toggle, result, &|| {}));
            });
        }
    });

    let on_save = Callback::new({
        let (api, liveness) = (api.clone(), liveness.clone());
        move |edit: TodoEdit| {
            let (api, liveness) = (api.clone(), liveness.clone());
            leptos::task::spawn_local(async move {
                let result = save_todo(&api, &edit).await;
                liveness.deliver(|| finish(TodoAction::Save, result, &|| editing.set(None)));
            });
        }
    });

    let on_delete = Callback::new({
        let (api, liveness) = (api.clone(), liveness.clone());
        move |todo_id: String| {
            if !confirm(DELETE_PROMPT) {
                return;
            }
            let (api, liveness) = (api.clone(), liveness.clone());
            leptos::task::spawn_local(async move {
                let result = delete_todo(&api, &todo_id).await;
                liveness.deliver(|| finish(TodoAction::Delete, result, &|| {}));
            });
        }
    });

    let list = move || {
        let current = todos.get();
        if current.is_empty() {
            return view! { <p class="todos__empty">"No todos yet. Create one!"</p> }.into_any();
        }
        let rows = current
            .items()
            .iter()
            .cloned()
            .map(|todo| {
                view! { <TodoRow todo=todo editing=editing on_toggle=on_toggle on_delete=on_delete on_save=on_save/> }
            })
            .collect_view();
        view! { <ul class="todos__list">{rows}</ul> }.into_any()
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Loading label="Loading your data..."/> }>
            <div class="todos">
                <form class="todos__create" on:submit=on_create.clone()>
                    <h2>"Add New Todo"</h2>
                    <input
                        type="text"
                        placeholder="Task Title"
                        prop:value=move || draft.get().task
                        on:input=move |ev| draft.update(|d| d.task = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description"
                        prop:value=move || draft.get().description
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                    <input
                        type="datetime-local"
                        prop:value=move || draft.get().deadline
                        on:input=move |ev| draft.update(|d| d.deadline = event_target_value(&ev))
                    />
                    <button type="submit">"Add Todo"</button>
                </form>
                {list}
            </div>
        </Show>
    }
    .into_any()
}

#[component]
fn TodoRow(
    todo: Todo,
    editing: RwSignal<Option<TodoEdit>>,
    on_toggle: Callback<Todo>,
    on_delete: Callback<String>,
    on_save: Callback<TodoEdit>,
) -> impl IntoView {
    let id = todo.id.clone();
    let is_editing = {
        let id = id.clone();
        move || editing.get().is_some_and(|e| e.id == id)
    };
    let status_class = if todo.status { "todo__status todo__status--done" } else { "todo__status" };
    let status_label = if todo.status { "Completed" } else { "Pending" };
    let deadline = deadline_label(todo.deadline.as_deref());
    let edit_seed = TodoEdit::from(&todo);
    let toggle_target = todo.clone();

    let on_submit_edit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(edit) = editing.get() {
            on_save.run(edit);
        }
    };
    let set_field = move |apply: fn(&mut TodoEdit, String), value: String| {
        editing.update(|e| {
            if let Some(e) = e {
                apply(e, value);
            }
        });
    };

    view! {
        <li class="todo">
            <div class="todo__body">
                <h3 class="todo__task">{todo.task}</h3>
                <p class="todo__description">{todo.description}</p>
                {deadline.map(|d| view! { <p class="todo__deadline">"Due " {d}</p> })}
            </div>
            <div class="todo__actions">
                <button class="todo__edit" on:click=move |_| editing.set(Some(edit_seed.clone()))>"Edit"</button>
                <button class=status_class on:click=move |_| on_toggle.run(toggle_target.clone())>{status_label}</button>
                <button class="todo__delete" on:click=move |_| on_delete.run(id.clone())>"Delete"</button>
            </div>
            <Show when=is_editing>
                <form class="todo__edit-form" on:submit=on_submit_edit>
                    <h3>"Edit Todo"</h3>
                    <input
                        type="text"
                        prop:value=move || editing.get().map(|e| e.task).unwrap_or_default()
                        on:input=move |ev| set_field(|e, v| e.task = v, event_target_value(&ev))
                    />
                    <textarea
                        prop:value=move || editing.get().map(|e| e.description).unwrap_or_default()
                        on:input=move |ev| set_field(|e, v| e.description = v, event_target_value(&ev))
                    ></textarea>
                    <input
                        type="datetime-local"
                        prop:value=move || editing.get().map(|e| e.deadline).unwrap_or_default()
                        on:input=move |ev| set_field(|e, v| e.deadline = v, event_target_value(&ev))
                    />
                    <button type="submit">"Save Changes"</button>
                    <button type="button" on:click=move |_| editing.set(None)>"Cancel"</button>
                </form>
            </Show>
        </li>
    }
}
