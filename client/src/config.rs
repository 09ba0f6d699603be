//! Build-time client configuration.
//!
//! The backend base URL is baked into the WASM bundle from the
//! `TASKNEST_BACKEND_URL` environment variable at compile time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Client configuration shared by the API client and avatar URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
}

impl ClientConfig {
    /// Build a config for an explicit backend URL, trimming any trailing `/`.
    pub fn new(backend_url: &str) -> Self {
        let trimmed = backend_url.trim().trim_end_matches('/');
        let backend_url = if trimmed.is_empty() { DEFAULT_BACKEND_URL } else { trimmed };
        Self { backend_url: backend_url.to_owned() }
    }

    /// Read `TASKNEST_BACKEND_URL` as captured by the compiler.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("TASKNEST_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL))
    }

    /// Join an absolute endpoint path onto the backend base URL.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.backend_url)
        } else {
            format!("{}/{path}", self.backend_url)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
