//! Transient notification queue rendered by the `Toaster` component.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use crate::net::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Ordered list of visible toasts. Ids are unique for the queue's lifetime so
/// a dismiss timer never removes a later toast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message.into())
    }

    /// Success toast with the server's message, or `fallback` when it sent none.
    pub fn success_or(&mut self, message: &str, fallback: &str) -> u64 {
        let text = if message.trim().is_empty() { fallback } else { message };
        self.success(text)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message.into())
    }

    /// One error toast per message; returns the new ids in order.
    pub fn errors(&mut self, messages: Vec<String>) -> Vec<u64> {
        messages.into_iter().map(|m| self.error(m)).collect()
    }

    /// Surface a failed request: server messages verbatim, else `fallback`.
    pub fn api_error(&mut self, err: &ApiError, fallback: &str) -> Vec<u64> {
        self.errors(err.notifications(fallback))
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}
