//! Request preparation error types.
//!
//! Any failure here aborts preparation for the current test iteration; the
//! driver decides whether that fails the whole run or just the one request.
//! There is no retry logic in this library.

use crate::sign::SignError;
use crate::variables::VarError;
use std::fmt;

/// Errors that can occur while preparing a request.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepareError {
    /// A token referenced a context key that does not exist.
    ///
    /// Fatal by design: incomplete context data must surface immediately
    /// rather than silently producing a broken request.
    Variable(VarError),

    /// A body template was not a flat JSON object of string values.
    BodyTemplate(String),

    /// The resolved request URL did not parse as an absolute URL.
    InvalidUrl(String),

    /// The configured signer rejected the request.
    Signing(SignError),
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::Variable(err) => write!(f, "Variable error: {}", err),
            PrepareError::BodyTemplate(msg) => write!(f, "Invalid body template: {}", msg),
            PrepareError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            PrepareError::Signing(err) => write!(f, "Signing failed: {}", err),
        }
    }
}

impl std::error::Error for PrepareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrepareError::Variable(err) => Some(err),
            PrepareError::Signing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VarError> for PrepareError {
    fn from(err: VarError) -> Self {
        PrepareError::Variable(err)
    }
}

impl From<SignError> for PrepareError {
    fn from(err: SignError) -> Self {
        PrepareError::Signing(err)
    }
}

impl From<url::ParseError> for PrepareError {
    fn from(err: url::ParseError) -> Self {
        PrepareError::InvalidUrl(err.to_string())
    }
}
