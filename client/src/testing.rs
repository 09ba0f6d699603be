//! Test doubles shared by unit tests: scripted and fake-backend transports.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::transport::{FormPart, HttpRequest, HttpResponse, Method, RequestBody, Transport};
use crate::net::types::{Todo, User};
use crate::state::session::SessionStore;

pub const TEST_BACKEND: &str = "http://backend.test";

pub fn sample_user(id: &str) -> User {
    User {
        id: id.to_owned(),
        username: format!("user-{id}"),
        email: format!("{id}@example.com"),
        bio: None,
        avatar: None,
    }
}

pub fn sample_todo(id: &str, task: &str) -> Todo {
    Todo {
        id: id.to_owned(),
        task: task.to_owned(),
        description: String::new(),
        status: false,
        deadline: None,
        created_by: Some("u1".to_owned()),
    }
}

pub fn json_response(status: u16, body: &Value) -> Result<HttpResponse, String> {
    Ok(HttpResponse { status, body: body.to_string() })
}

// =============================================================================
// SCRIPTED TRANSPORT
// =============================================================================

/// Replays queued outcomes in order and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    outcomes: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<HttpResponse, String>>) -> Self {
        Self { outcomes: Arc::new(Mutex::new(outcomes.into())), requests: Arc::default() }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_owned()))
    }
}

pub fn scripted_client(outcomes: Vec<Result<HttpResponse, String>>) -> ApiClient<ScriptedTransport> {
    ApiClient::new(ClientConfig::new(TEST_BACKEND), ScriptedTransport::new(outcomes), SessionStore::in_memory())
}

// =============================================================================
// FAKE BACKEND
// =============================================================================

#[derive(Default)]
struct FakeState {
    todos: Vec<Todo>,
    next_id: u64,
    requests: Vec<HttpRequest>,
}

/// Minimal in-memory stand-in for the task backend's todo endpoints.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    fn route(state: &mut FakeState, request: &HttpRequest) -> (u16, Value) {
        let path = request.url.strip_prefix(TEST_BACKEND).unwrap_or(&request.url);
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let body = match &request.body {
            RequestBody::Json(value) => value.clone(),
            RequestBody::Empty | RequestBody::Multipart(_) => Value::Null,
        };
        match (request.method, segments.as_slice()) {
            (Method::Post, ["todo", "create"]) => {
                state.next_id += 1;
                let todo = Todo {
                    id: format!("t{}", state.next_id),
                    task: body["task"].as_str().unwrap_or_default().to_owned(),
                    description: body["description"].as_str().unwrap_or_default().to_owned(),
                    status: false,
                    deadline: body["deadline"].as_str().map(str::to_owned),
                    created_by: body["createdBy"].as_str().map(str::to_owned),
                };
                state.todos.push(todo.clone());
                (201, json!({ "message": "Todo created", "result": todo }))
            }
            (Method::Get, ["todo", user_id]) => {
                let todos: Vec<&Todo> = state
                    .todos
                    .iter()
                    .filter(|t| t.created_by.as_deref() == Some(*user_id))
                    .collect();
                (200, json!({ "todos": todos }))
            }
            (Method::Put, ["todo", todo_id]) => match state.todos.iter_mut().find(|t| t.id == *todo_id) {
                Some(todo) => {
                    todo.task = body["task"].as_str().unwrap_or_default().to_owned();
                    todo.description = body["description"].as_str().unwrap_or_default().to_owned();
                    todo.status = body["status"].as_bool().unwrap_or_default();
                    todo.deadline = body["deadline"].as_str().map(str::to_owned);
                    (200, json!({ "message": "Todo updated", "todo": todo }))
                }
                None => (404, json!({ "message": "Todo not found" })),
            },
            (Method::Delete, ["todo", todo_id]) => {
                let before = state.todos.len();
                state.todos.retain(|t| t.id != *todo_id);
                if state.todos.len() == before {
                    (404, json!({ "message": "Todo not found" }))
                } else {
                    (200, json!({ "message": "Todo deleted" }))
                }
            }
            (Method::Post, ["user"]) => {
                let RequestBody::Multipart(parts) = &request.body else {
                    return (400, json!({ "message": "multipart expected" }));
                };
                let text = |field: &str| {
                    parts.iter().find_map(|p| match p {
                        FormPart::Text { name, value } if name == field => Some(value.clone()),
                        _ => None,
                    })
                };
                let has_file = parts.iter().any(|p| matches!(p, FormPart::File { .. }));
                let mut user = sample_user(&text("_id").unwrap_or_default());
                user.bio = text("bio");
                let mut value = serde_json::to_value(&user).unwrap_or(Value::Null);
                if has_file {
                    value["avatar"] = json!({ "data": { "type": "Buffer", "data": [1] }, "contentType": "image/png" });
                }
                (200, json!({ "message": "Profile updated", "user": value }))
            }
            _ => (404, json!({ "message": format!("no route for {path}") })),
        }
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut state = self.state.lock().unwrap();
        let (status, body) = Self::route(&mut state, &request);
        state.requests.push(request);
        json_response(status, &body)
    }
}

pub fn fake_backend_client() -> ApiClient<FakeBackend> {
    ApiClient::new(ClientConfig::new(TEST_BACKEND), FakeBackend::default(), SessionStore::in_memory())
}
