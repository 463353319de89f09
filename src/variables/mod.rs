//! Variable handling for request preparation.
//!
//! This module provides the token substitution engine and the synthetic value
//! generators used while assembling an outgoing request.

pub mod email;
pub mod substitution;

pub use email::{format_email_at, generate_email, EMAIL_SENTINEL};
pub use substitution::{substitute_at_token, substitute_brace_token};

use std::fmt;

/// Errors that can occur during variable resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarError {
    /// Token references a key that is not present in the context
    UndefinedVariable(String),
    /// Token syntax is invalid (e.g. empty key between delimiters)
    InvalidSyntax(String),
}

impl fmt::Display for VarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarError::UndefinedVariable(name) => write!(f, "Undefined variable: {}", name),
            VarError::InvalidSyntax(msg) => write!(f, "Invalid syntax: {}", msg),
        }
    }
}

impl std::error::Error for VarError {}
