//! REST API client for the task backend.
//!
//! One method per backend endpoint; each is a single request/response round
//! trip with no retry. Every request passes through [`authorize`], the only
//! place the bearer credential is attached.
//!
//! ERROR HANDLING
//! ==============
//! Methods return `Result<_, ApiError>` and never panic. Failures are logged
//! to the console and left for the caller to turn into notifications.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{FormPart, HttpRequest, HttpResponse, Method, RequestBody, Transport};
use super::types::{
    LoginRequest, LoginResponse, MessageResponse, NewTodo, ProfileResponse, RegisterRequest, ResetPasswordRequest,
    SendCodeRequest, TodoCreatedResponse, TodoListResponse, TodoUpdate, TodoUpdatedResponse, VerifyCodeRequest,
    VerifyCodeResponse, VerifyUserResponse,
};
use crate::config::ClientConfig;
use crate::state::session::SessionStore;

pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";
pub const SEND_CODE_PATH: &str = "/send-code";
pub const VERIFY_CODE_PATH: &str = "/verify-code";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";
pub const VERIFY_USER_PATH: &str = "/verify-user";
pub const LOGOUT_PATH: &str = "/logout";
pub const CREATE_TODO_PATH: &str = "/todo/create";
pub const PROFILE_PATH: &str = "/user";

fn todo_list_endpoint(user_id: &str) -> String {
    format!("/todo/{}", urlencoding::encode(user_id))
}

fn todo_endpoint(todo_id: &str) -> String {
    format!("/todo/{}", urlencoding::encode(todo_id))
}

/// Attach `Authorization: Bearer <token>` when a token is present.
pub fn authorize(mut request: HttpRequest, token: Option<&str>) -> HttpRequest {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        request.headers.retain(|(key, _)| !key.eq_ignore_ascii_case("authorization"));
        request
            .headers
            .push(("Authorization".to_owned(), format!("Bearer {token}")));
    }
    request
}

fn json_body<B: Serialize>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Backend client bound to a transport and the session store.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
    session: SessionStore,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T, session: SessionStore) -> Self {
        Self { config, transport, session }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve a request against the base URL and attach the credential that
    /// is current right now.
    pub fn prepare(&self, method: Method, path: &str, body: RequestBody) -> HttpRequest {
        let request = HttpRequest::new(method, self.config.endpoint(path), body);
        authorize(request, self.session.token().as_deref())
    }

    /// Send a prepared request; non-2xx statuses become [`ApiError::Status`].
    pub async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let result = match self.transport.send(request).await {
            Ok(resp) if resp.is_success() => Ok(resp),
            Ok(resp) => Err(ApiError::from_status(resp.status, &resp.body)),
            Err(e) => Err(ApiError::Transport(e)),
        };
        if let Err(e) = &result {
            match e.status() {
                Some(status) => leptos::logging::warn!("{} {url} returned {status}", method.as_str()),
                None => leptos::logging::warn!("{} {url} failed: {e}", method.as_str()),
            }
        }
        result
    }

    async fn call<R: DeserializeOwned>(&self, method: Method, path: &str, body: RequestBody) -> Result<R, ApiError> {
        let response = self.dispatch(self.prepare(method, path, body)).await?;
        decode(&response).inspect_err(|e| {
            leptos::logging::warn!("{} {path}: {e}", method.as_str());
        })
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    pub async fn register(&self, body: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.call(Method::Post, REGISTER_PATH, json_body(body)?).await
    }

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call(Method::Post, LOGIN_PATH, json_body(body)?).await
    }

    pub async fn send_code(&self, body: &SendCodeRequest) -> Result<MessageResponse, ApiError> {
        self.call(Method::Post, SEND_CODE_PATH, json_body(body)?).await
    }

    pub async fn verify_code(&self, body: &VerifyCodeRequest) -> Result<VerifyCodeResponse, ApiError> {
        self.call(Method::Post, VERIFY_CODE_PATH, json_body(body)?).await
    }

    pub async fn reset_password(&self, body: &ResetPasswordRequest) -> Result<MessageResponse, ApiError> {
        self.call(Method::Post, RESET_PASSWORD_PATH, json_body(body)?).await
    }

    /// `GET /verify-user`: ask the backend whether the stored token is valid.
    pub async fn verify_user(&self) -> Result<VerifyUserResponse, ApiError> {
        self.call(Method::Get, VERIFY_USER_PATH, RequestBody::Empty).await
    }

    /// Build the logout request with the current credential without sending it.
    pub fn logout_request(&self) -> HttpRequest {
        self.prepare(Method::Post, LOGOUT_PATH, RequestBody::Empty)
    }

    // =========================================================================
    // TODOS
    // =========================================================================

    pub async fn list_todos(&self, user_id: &str) -> Result<TodoListResponse, ApiError> {
        self.call(Method::Get, &todo_list_endpoint(user_id), RequestBody::Empty)
            .await
    }

    pub async fn create_todo(&self, body: &NewTodo) -> Result<TodoCreatedResponse, ApiError> {
        self.call(Method::Post, CREATE_TODO_PATH, json_body(body)?).await
    }

    pub async fn update_todo(&self, todo_id: &str, body: &TodoUpdate) -> Result<TodoUpdatedResponse, ApiError> {
        self.call(Method::Put, &todo_endpoint(todo_id), json_body(body)?).await
    }

    pub async fn delete_todo(&self, todo_id: &str) -> Result<MessageResponse, ApiError> {
        self.call(Method::Delete, &todo_endpoint(todo_id), RequestBody::Empty)
            .await
    }

    // =========================================================================
    // PROFILE
    // =========================================================================

    /// Multipart `POST /user` carrying `_id`, `bio`, and an optional avatar.
    pub async fn update_profile(&self, form: Vec<FormPart>) -> Result<ProfileResponse, ApiError> {
        self.call(Method::Post, PROFILE_PATH, RequestBody::Multipart(form))
            .await
    }
}
