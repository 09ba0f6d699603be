//! In-memory todo list model for the home page.
//!
//! DESIGN
//! ======
//! The full list is fetched once per page mount and held in memory; there is
//! no pagination or partial loading. Each successful mutation rewrites the
//! list from the server's response. Failed mutations leave it as it was.
//!
//! Each flow below is one request that yields a [`TodoOutcome`]. The page
//! hands that result to [`settle`] once the response lands, which applies the
//! change to the current list and queues the notification.

#[cfg(test)]
#[path = "todos_test.rs"]
mod todos_test;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::net::types::{NewTodo, Todo, TodoUpdate};
use crate::state::toasts::ToastQueue;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new(items: Vec<Todo>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn replace_all(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    /// Append a newly created todo.
    pub fn push(&mut self, todo: Todo) {
        self.items.push(todo);
    }

    /// Swap in the server's copy of an edited todo. Returns `false` when the
    /// id is not in the list.
    pub fn replace(&mut self, todo: Todo) -> bool {
        match self.items.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    pub fn set_status(&mut self, id: &str, status: bool) -> bool {
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.status = status;
                true
            }
            None => false,
        }
    }

    /// Drop the todo with `id`; returns how many entries were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        before - self.items.len()
    }

    pub fn apply(&mut self, change: TodoChange) {
        match change {
            TodoChange::Loaded(items) => self.replace_all(items),
            TodoChange::Added(todo) => self.push(todo),
            TodoChange::Replaced(todo) => {
                self.replace(todo);
            }
            TodoChange::StatusSet { id, status } => {
                self.set_status(&id, status);
            }
            TodoChange::Removed(id) => {
                self.remove(&id);
            }
        }
    }
}

/// List change implied by a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum TodoChange {
    Loaded(Vec<Todo>),
    Added(Todo),
    Replaced(Todo),
    StatusSet { id: String, status: bool },
    Removed(String),
}

/// A successful response: the server's message and the change to apply.
#[derive(Clone, Debug, PartialEq)]
pub struct TodoOutcome {
    pub message: String,
    pub change: TodoChange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TodoAction {
    Load,
    Create,
    Toggle,
    Save,
    Delete,
}

impl TodoAction {
    /// Toast shown when the server sends no message. Loading is silent.
    pub fn success_fallback(self) -> Option<&'static str> {
        match self {
            Self::Load => None,
            Self::Create => Some("Todo created"),
            Self::Toggle | Self::Save => Some("Todo updated"),
            Self::Delete => Some("Todo deleted"),
        }
    }

    pub fn failure_fallback(self) -> &'static str {
        match self {
            Self::Load => "Could not load todos",
            Self::Create => "Could not create todo",
            Self::Toggle | Self::Save => "Could not update todo",
            Self::Delete => "Could not delete todo",
        }
    }
}

// =============================================================================
// FLOWS
// =============================================================================

pub async fn load_todos<T: Transport>(api: &ApiClient<T>, owner_id: &str) -> Result<TodoOutcome, ApiError> {
    let resp = api.list_todos(owner_id).await?;
    Ok(TodoOutcome { message: String::new(), change: TodoChange::Loaded(resp.todos) })
}

pub async fn create_todo<T: Transport>(api: &ApiClient<T>, request: &NewTodo) -> Result<TodoOutcome, ApiError> {
    let resp = api.create_todo(request).await?;
    Ok(TodoOutcome { message: resp.message, change: TodoChange::Added(resp.result) })
}

/// Flip `todo`'s status. The list takes the flipped value from the request,
/// not from the reply.
pub async fn toggle_todo<T: Transport>(api: &ApiClient<T>, todo: &Todo) -> Result<TodoOutcome, ApiError> {
    let resp = api.update_todo(&todo.id, &todo.toggled()).await?;
    Ok(TodoOutcome {
        message: resp.message,
        change: TodoChange::StatusSet { id: todo.id.clone(), status: !todo.status },
    })
}

pub async fn save_todo<T: Transport>(api: &ApiClient<T>, edit: &TodoEdit) -> Result<TodoOutcome, ApiError> {
    let resp = api.update_todo(&edit.id, &edit.to_update()).await?;
    Ok(TodoOutcome { message: resp.message, change: TodoChange::Replaced(resp.todo) })
}

pub async fn delete_todo<T: Transport>(api: &ApiClient<T>, todo_id: &str) -> Result<TodoOutcome, ApiError> {
    let resp = api.delete_todo(todo_id).await?;
    Ok(TodoOutcome { message: resp.message, change: TodoChange::Removed(todo_id.to_owned()) })
}

/// Apply a finished flow: on success change `list` and queue the success
/// toast; on failure leave `list` alone and queue the error toasts. Returns
/// whether the list changed.
pub fn settle(
    action: TodoAction,
    result: Result<TodoOutcome, ApiError>,
    list: &mut TodoList,
    toasts: &mut ToastQueue,
) -> bool {
    match result {
        Ok(outcome) => {
            if let Some(fallback) = action.success_fallback() {
                toasts.success_or(&outcome.message, fallback);
            }
            list.apply(outcome.change);
            true
        }
        Err(e) => {
            toasts.api_error(&e, action.failure_fallback());
            false
        }
    }
}

/// Create-form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub task: String,
    pub description: String,
    pub deadline: String,
}

impl TodoDraft {
    /// A todo needs a title; everything else may be blank.
    pub fn validate(self, owner_id: &str) -> Result<NewTodo, &'static str> {
        if self.task.trim().is_empty() {
            return Err("Give the todo a title first.");
        }
        Ok(self.into_request(owner_id))
    }

    pub fn into_request(self, owner_id: &str) -> NewTodo {
        NewTodo {
            task: self.task,
            description: self.description,
            deadline: self.deadline,
            created_by: owner_id.to_owned(),
        }
    }
}

/// Edit-form contents for one todo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoEdit {
    pub id: String,
    pub task: String,
    pub description: String,
    pub status: bool,
    pub deadline: String,
}

impl From<&Todo> for TodoEdit {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            task: todo.task.clone(),
            description: todo.description.clone(),
            status: todo.status,
            deadline: todo.deadline.as_deref().map(datetime_local_value).unwrap_or_default(),
        }
    }
}

impl TodoEdit {
    pub fn to_update(&self) -> TodoUpdate {
        TodoUpdate {
            task: self.task.clone(),
            description: self.description.clone(),
            status: self.status,
            deadline: Some(self.deadline.clone()),
        }
    }
}

/// Cut an ISO timestamp down to the `YYYY-MM-DDTHH:MM` form a
/// `datetime-local` input accepts.
pub fn datetime_local_value(raw: &str) -> String {
    raw.chars().take(16).collect()
}

/// Short human label for a deadline, e.g. `2025-01-01 10:00`.
pub fn deadline_label(raw: Option<&str>) -> Option<String> {
    let value = datetime_local_value(raw?);
    if value.is_empty() {
        return None;
    }
    Some(value.replacen('T', " ", 1))
}
