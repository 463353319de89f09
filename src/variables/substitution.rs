//! Token substitution engine.
//!
//! A token is a whole string wrapped in a delimiter pair: `@token@` for URL,
//! header, and query-string values, or `{{token}}` for body template values.
//! Substitution strips the delimiters, looks the key up in the context, and
//! replaces the whole string with the looked-up value. Strings that do not
//! match the pattern pass through unchanged; a missing key is a fatal error
//! for the request being prepared, never a silent empty-string substitute.

use crate::context::Context;
use crate::variables::VarError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cached pattern for a value that is exactly one `@token@`.
/// Compiled once and reused to avoid repeated regex compilation overhead.
static AT_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([^@]+)@$").expect("Failed to compile at-token regex"));

/// Cached pattern for a value that is exactly one `{{token}}`.
static BRACE_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{([^}]+)\}\}$").expect("Failed to compile brace-token regex"));

/// Substitutes a whole-string `@token@` value from the context.
///
/// Used for header values, query-string parameter values, and URL prefixes.
/// Values not wrapped in a matching `@...@` pair are returned unchanged, so
/// the function is idempotent on non-matching input.
///
/// # Errors
///
/// Returns `VarError::UndefinedVariable` if the value is a token whose key is
/// not present in the context.
///
/// # Examples
///
/// ```
/// use preflight::context::Context;
/// use preflight::variables::substitute_at_token;
///
/// let ctx: Context = [("authToken", "bearer-xyz")].into_iter().collect();
///
/// assert_eq!(substitute_at_token("@authToken@", &ctx).unwrap(), "bearer-xyz");
/// assert_eq!(substitute_at_token("plain", &ctx).unwrap(), "plain");
/// ```
pub fn substitute_at_token(value: &str, context: &Context) -> Result<String, VarError> {
    // Fast path: values that cannot be a token skip the regex entirely
    if !value.starts_with('@') {
        return Ok(value.to_string());
    }

    match AT_TOKEN_REGEX.captures(value) {
        Some(cap) => {
            let key = cap
                .get(1)
                .ok_or_else(|| VarError::InvalidSyntax("empty token key".to_string()))?
                .as_str();
            Ok(context.lookup(key)?.to_string())
        }
        None => Ok(value.to_string()),
    }
}

/// Substitutes a whole-string `{{token}}` value from the context.
///
/// Used for values inside JSON body templates. Non-matching values are
/// returned unchanged.
///
/// # Errors
///
/// Returns `VarError::UndefinedVariable` if the value is a token whose key is
/// not present in the context.
pub fn substitute_brace_token(value: &str, context: &Context) -> Result<String, VarError> {
    if !value.starts_with("{{") {
        return Ok(value.to_string());
    }

    match BRACE_TOKEN_REGEX.captures(value) {
        Some(cap) => {
            let key = cap
                .get(1)
                .ok_or_else(|| VarError::InvalidSyntax("empty token key".to_string()))?
                .as_str()
                .trim();
            Ok(context.lookup(key)?.to_string())
        }
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_context() -> Context {
        [
            ("baseUrl", "https://api.example.com"),
            ("apiKey", "secret-key-123"),
            ("token", "bearer-token-xyz"),
            ("userId", "12345"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_at_token_substitution() {
        let ctx = create_test_context();

        let result = substitute_at_token("@apiKey@", &ctx).unwrap();
        assert_eq!(result, "secret-key-123");
    }

    #[test]
    fn test_at_token_non_matching_unchanged() {
        let ctx = create_test_context();

        assert_eq!(substitute_at_token("plain value", &ctx).unwrap(), "plain value");
        assert_eq!(substitute_at_token("", &ctx).unwrap(), "");
        // Delimiter on one side only is not a token
        assert_eq!(substitute_at_token("@half", &ctx).unwrap(), "@half");
        assert_eq!(substitute_at_token("half@", &ctx).unwrap(), "half@");
        // Embedded tokens are not substituted; only whole-string matches are
        assert_eq!(
            substitute_at_token("prefix @apiKey@ suffix", &ctx).unwrap(),
            "prefix @apiKey@ suffix"
        );
    }

    #[test]
    fn test_at_token_email_address_is_not_a_token() {
        let ctx = create_test_context();

        // An email address contains '@' but is not delimiter-wrapped
        let result = substitute_at_token("user@example.com", &ctx).unwrap();
        assert_eq!(result, "user@example.com");
    }

    #[test]
    fn test_at_token_missing_key_is_fatal() {
        let ctx = create_test_context();

        let result = substitute_at_token("@missing@", &ctx);
        match result {
            Err(VarError::UndefinedVariable(name)) => assert_eq!(name, "missing"),
            other => panic!("Expected UndefinedVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_at_token_never_substitutes_empty_string_for_missing() {
        let ctx = Context::new();

        // The fail-fast contract: missing keys surface as errors, the result
        // is never an empty string.
        assert!(substitute_at_token("@anything@", &ctx).is_err());
    }

    #[test]
    fn test_at_token_idempotent_on_substituted_value() {
        let ctx = create_test_context();

        let once = substitute_at_token("@userId@", &ctx).unwrap();
        let twice = substitute_at_token(&once, &ctx).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_brace_token_substitution() {
        let ctx = create_test_context();

        let result = substitute_brace_token("{{token}}", &ctx).unwrap();
        assert_eq!(result, "bearer-token-xyz");
    }

    #[test]
    fn test_brace_token_whitespace_in_key() {
        let ctx = create_test_context();

        let result = substitute_brace_token("{{  userId  }}", &ctx).unwrap();
        assert_eq!(result, "12345");
    }

    #[test]
    fn test_brace_token_non_matching_unchanged() {
        let ctx = create_test_context();

        assert_eq!(substitute_brace_token("literal", &ctx).unwrap(), "literal");
        assert_eq!(substitute_brace_token("{{half", &ctx).unwrap(), "{{half");
        assert_eq!(
            substitute_brace_token("a {{token}} b", &ctx).unwrap(),
            "a {{token}} b"
        );
    }

    #[test]
    fn test_brace_token_missing_key_is_fatal() {
        let ctx = create_test_context();

        let result = substitute_brace_token("{{nope}}", &ctx);
        assert!(matches!(result, Err(VarError::UndefinedVariable(_))));
    }

    proptest! {
        /// Any string without a leading '@' passes through untouched.
        #[test]
        fn prop_at_token_passthrough(value in "[^@][a-zA-Z0-9 ./:-]*") {
            let ctx = create_test_context();
            let result = substitute_at_token(&value, &ctx).unwrap();
            prop_assert_eq!(result, value);
        }

        /// Any string without a leading "{{" passes through untouched.
        #[test]
        fn prop_brace_token_passthrough(value in "[a-zA-Z0-9 ./:@-]*") {
            let ctx = create_test_context();
            let result = substitute_brace_token(&value, &ctx).unwrap();
            prop_assert_eq!(result, value);
        }
    }
}
