//! Core data models.

pub mod request;

pub use request::{HttpMethod, HttpRequest, RequestBody};
