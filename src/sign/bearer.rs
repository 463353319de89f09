//! Bearer token signer.
//!
//! Attaches an RFC 6750 Bearer token from a configurable context key as the
//! Authorization header.

use super::{update_auth_header, RequestSigner, SignError};
use crate::context::Context;
use crate::models::request::HttpRequest;

/// Signer applying Bearer token authentication (RFC 6750).
#[derive(Debug, Clone)]
pub struct BearerSigner {
    /// Context key holding the token.
    pub token_key: String,
}

impl BearerSigner {
    /// Creates a signer reading the token from the given context key.
    pub fn new(token_key: impl Into<String>) -> Self {
        Self {
            token_key: token_key.into(),
        }
    }
}

impl RequestSigner for BearerSigner {
    fn sign(&self, request: &mut HttpRequest, context: &Context) -> Result<(), SignError> {
        let token = context
            .get(&self.token_key)
            .ok_or_else(|| SignError::MissingCredentials(self.token_key.clone()))?;

        if token.trim().is_empty() {
            return Err(SignError::InvalidFormat(format!(
                "Bearer token in '{}' is empty",
                self.token_key
            )));
        }

        update_auth_header(request, bearer_token(token));
        Ok(())
    }
}

/// Formats a token into a Bearer authentication header value.
pub fn bearer_token(token: &str) -> String {
    format!("Bearer {}", token.trim())
}
