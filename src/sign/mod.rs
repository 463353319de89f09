//! Request signing.
//!
//! Signing is an externally defined authentication step: the preparation
//! pipeline invokes a [`RequestSigner`] after the body is attached, and the
//! driver decides which implementation to plug in. [`NoopSigner`] is the
//! default and leaves the request untouched. Basic and Bearer signers are
//! provided for drivers whose targets accept standard Authorization headers;
//! both read their credentials from the context so that token substitution
//! feeds signing.

pub mod basic;
pub mod bearer;

pub use basic::BasicSigner;
pub use bearer::BearerSigner;

use crate::context::Context;
use crate::models::request::HttpRequest;
use std::fmt;

/// Errors that can occur while signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    /// A credential key the signer needs is missing from the context
    MissingCredentials(String),
    /// Credential material is present but malformed
    InvalidFormat(String),
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignError::MissingCredentials(msg) => write!(f, "Missing credentials: {}", msg),
            SignError::InvalidFormat(msg) => write!(f, "Invalid credential format: {}", msg),
        }
    }
}

impl std::error::Error for SignError {}

/// Pluggable request-authentication step.
///
/// Implementations mutate the request in place (typically by setting the
/// Authorization header) using values drawn from the per-iteration context.
pub trait RequestSigner {
    /// Signs the request.
    ///
    /// # Errors
    ///
    /// Returns `SignError` if required credential material is missing from
    /// the context or malformed.
    fn sign(&self, request: &mut HttpRequest, context: &Context) -> Result<(), SignError>;
}

/// Signer that leaves the request untouched.
///
/// The default: the host's own authentication mechanism (if any) is applied
/// outside this library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSigner;

impl RequestSigner for NoopSigner {
    fn sign(&self, _request: &mut HttpRequest, _context: &Context) -> Result<(), SignError> {
        Ok(())
    }
}

/// Replaces the Authorization header, removing any existing one.
///
/// Header names are case-insensitive, so the old entry is removed whatever
/// its spelling.
pub(crate) fn update_auth_header(request: &mut HttpRequest, auth_value: String) {
    request
        .headers
        .retain(|k, _| !k.eq_ignore_ascii_case("authorization"));

    request
        .headers
        .insert("Authorization".to_string(), auth_value);
}
