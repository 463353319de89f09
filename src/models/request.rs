//! HTTP request data models.
//!
//! This module defines the request structure handed to the preparation
//! pipeline. The driver owns dispatch; preparation only rewrites the fields
//! below before handing the request back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// Returns `Some(HttpMethod)` if the string is a valid method name
    /// (case-insensitive), `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body with an explicit content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// MIME type sent in the Content-Type header (e.g. "application/json").
    pub content_type: String,

    /// Raw body content.
    pub content: String,
}

impl RequestBody {
    /// Creates a new body with the given content type and content.
    pub fn new(content_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// An HTTP request awaiting preparation and dispatch.
///
/// The URL, header values, and query-parameter values may contain `@token@`
/// placeholders that are resolved against the context before the driver
/// sends the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Unique identifier for correlating the prepared request with the
    /// driver's per-iteration reporting.
    pub id: String,

    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Target URL for the request.
    ///
    /// May be an `@contextKey@/path` pattern that resolves to the context
    /// value concatenated with the trailing path.
    pub url: String,

    /// Request headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Query-string parameters as key-value pairs.
    pub query_params: HashMap<String, String>,

    /// Optional request body.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a new request with a fresh correlation id and no headers,
    /// query parameters, or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Adds a query-string parameter to the request.
    pub fn add_query_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query_params.insert(name.into(), value.into());
    }

    /// Sets the request body.
    pub fn set_body(&mut self, body: RequestBody) {
        self.body = Some(body);
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.content.is_empty())
    }

    /// Gets the body content type if a body is attached.
    pub fn content_type(&self) -> Option<&str> {
        self.body.as_ref().map(|b| b.content_type.as_str())
    }
}
