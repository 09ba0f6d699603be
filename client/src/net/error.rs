//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure resolves at the call site into a list of user-facing
//! notifications. Only a non-2xx response that carries a recognizable
//! `message` surfaces server text; everything else collapses into the
//! caller's fallback string.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Failure of a single request/response round trip.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The request body could not be serialized, so nothing was sent.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The backend answered with a non-2xx status.
    #[error("server returned status {status}")]
    Status { status: u16, message: ServerMessage },

    /// A 2xx response whose body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// The `message` field of an error body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMessage {
    /// `{"message": "..."}`
    Text(String),
    /// `{"message": [{"msg": "..."}, ...]}`
    Fields(Vec<String>),
    /// Anything else, including non-JSON bodies.
    Missing,
}

impl ServerMessage {
    /// Parse the `message` field out of a raw error body.
    pub fn parse(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Self::Missing;
        };
        match value.get("message") {
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Array(items)) => Self::Fields(
                items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(str::to_owned)
                    .collect(),
            ),
            _ => Self::Missing,
        }
    }
}

impl ApiError {
    /// Build a status error from the response code and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: ServerMessage::parse(body) }
    }

    /// HTTP status code when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Encode(_) | Self::Decode(_) => None,
        }
    }

    /// Notifications to show for this failure, one per server message.
    ///
    /// An empty field list still yields the fallback so the failure stays
    /// visible.
    pub fn notifications(&self, fallback: &str) -> Vec<String> {
        match self {
            Self::Status { message: ServerMessage::Text(text), .. } => vec![text.clone()],
            Self::Status { message: ServerMessage::Fields(items), .. } if !items.is_empty() => items.clone(),
            _ => vec![fallback.to_owned()],
        }
    }
}
