//! The token request abstraction consumed by grant handlers.
//!
//! Hosts bind their transport's request object to [`TokenRequest`];
//! [`FormRequest`] is a ready-made map-backed implementation for hosts
//! that have already parsed the form body, and for tests.

use std::collections::HashMap;

/// A parsed token request.
///
/// Parameter names recognized by the built-in handlers: `grant_type`,
/// `code`, `redirect_uri`, `username`, `password`, `refresh_token`,
/// `scope`, `client_id`, `client_secret`. The only header consulted is
/// `Authorization`. Lookups are exact; the host normalizes header-name
/// casing if its transport requires it.
pub trait TokenRequest: Send + Sync {
    /// Returns the request parameter `name`, if present.
    fn parameter(&self, name: &str) -> Option<&str>;

    /// Returns the request header `name`, if present.
    fn header(&self, name: &str) -> Option<&str>;
}

/// A [`TokenRequest`] backed by parameter and header maps.
#[derive(Debug, Clone, Default)]
pub struct FormRequest {
    parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
}

impl FormRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request parameter, replacing any previous value.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Adds a request header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl TokenRequest for FormRequest {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for FormRequest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(parameters: I) -> Self {
        Self {
            parameters: parameters.into_iter().collect(),
            headers: HashMap::new(),
        }
    }
}
