//! Basic HTTP authentication signer.
//!
//! Encodes credentials according to RFC 7617 and attaches them as the
//! Authorization header. Username and password are read from configurable
//! context keys so they can themselves be seeded or substituted upstream.

use super::{update_auth_header, RequestSigner, SignError};
use crate::context::Context;
use crate::models::request::HttpRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Signer applying HTTP Basic authentication (RFC 7617).
#[derive(Debug, Clone)]
pub struct BasicSigner {
    /// Context key holding the username.
    pub username_key: String,
    /// Context key holding the password.
    pub password_key: String,
}

impl BasicSigner {
    /// Creates a signer reading credentials from the given context keys.
    pub fn new(username_key: impl Into<String>, password_key: impl Into<String>) -> Self {
        Self {
            username_key: username_key.into(),
            password_key: password_key.into(),
        }
    }
}

impl RequestSigner for BasicSigner {
    fn sign(&self, request: &mut HttpRequest, context: &Context) -> Result<(), SignError> {
        let username = context
            .get(&self.username_key)
            .ok_or_else(|| SignError::MissingCredentials(self.username_key.clone()))?;
        let password = context
            .get(&self.password_key)
            .ok_or_else(|| SignError::MissingCredentials(self.password_key.clone()))?;

        update_auth_header(request, basic_auth(username, password));
        Ok(())
    }
}

/// Encodes username and password into a Basic authentication header value.
///
/// # Examples
///
/// ```
/// use preflight::sign::basic::basic_auth;
///
/// let auth_header = basic_auth("user", "pass123");
/// assert_eq!(auth_header, "Basic dXNlcjpwYXNzMTIz");
/// ```
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = STANDARD.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::HttpMethod;

    #[test]
    fn test_basic_auth_simple() {
        let result = basic_auth("user", "pass");
        assert_eq!(result, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_auth_with_special_chars() {
        let result = basic_auth("admin@example.com", "p@ss:w0rd!");
        assert!(result.starts_with("Basic "));
        let encoded = result.strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "admin@example.com:p@ss:w0rd!");
    }

    #[test]
    fn test_basic_auth_empty_password() {
        let result = basic_auth("user", "");
        assert_eq!(result, "Basic dXNlcjo=");
    }

    #[test]
    fn test_basic_signer_sets_header() {
        let ctx: Context = [("apiUser", "user"), ("apiPassword", "pass")]
            .into_iter()
            .collect();
        let mut request = HttpRequest::new(HttpMethod::POST, "https://api.example.com");

        let signer = BasicSigner::new("apiUser", "apiPassword");
        signer.sign(&mut request, &ctx).unwrap();

        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Basic dXNlcjpwYXNz".to_string())
        );
    }

    #[test]
    fn test_basic_signer_missing_username() {
        let ctx: Context = [("apiPassword", "pass")].into_iter().collect();
        let mut request = HttpRequest::new(HttpMethod::POST, "https://api.example.com");

        let signer = BasicSigner::new("apiUser", "apiPassword");
        let result = signer.sign(&mut request, &ctx);

        assert_eq!(
            result,
            Err(SignError::MissingCredentials("apiUser".to_string()))
        );
    }

    #[test]
    fn test_basic_signer_replaces_existing_header() {
        let ctx: Context = [("apiUser", "user"), ("apiPassword", "pass")]
            .into_iter()
            .collect();
        let mut request = HttpRequest::new(HttpMethod::POST, "https://api.example.com");
        request.add_header("authorization", "Bearer stale");

        BasicSigner::new("apiUser", "apiPassword")
            .sign(&mut request, &ctx)
            .unwrap();

        assert_eq!(request.headers.len(), 1);
        assert!(request.headers.contains_key("Authorization"));
    }
}
