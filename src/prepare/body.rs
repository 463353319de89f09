//! JSON body template handling.
//!
//! Two flat string-to-string templates exist per request: the valid/complete
//! template held in the context under [`VALID_BODY_CONTEXT_KEY`], and the
//! partial/override template supplied as a plugin parameter. `{{token}}`
//! values in the partial are substituted from the context, then the partial
//! is merged over the valid template key-by-key. Partial keys the valid
//! template does not define are ignored.

use crate::config::PluginParams;
use crate::context::Context;
use crate::models::request::RequestBody;
use crate::prepare::error::PrepareError;
use crate::variables::substitute_brace_token;
use indexmap::IndexMap;

/// Context key holding the valid/complete body template for the current
/// iteration.
pub const VALID_BODY_CONTEXT_KEY: &str = "SuccessRequestBody";

/// Flat string-to-string body template decoded from JSON.
pub type BodyTemplate = IndexMap<String, String>;

/// Decodes a flat JSON object of string values.
///
/// # Errors
///
/// Returns `PrepareError::BodyTemplate` when the input is not valid JSON or
/// is not a flat object of strings. Malformed templates are fatal for the
/// request being prepared.
pub fn parse_template(json: &str, which: &str) -> Result<BodyTemplate, PrepareError> {
    serde_json::from_str(json)
        .map_err(|e| PrepareError::BodyTemplate(format!("{} template: {}", which, e)))
}

/// Merges the partial template over the valid template.
///
/// `{{token}}` values in the partial are substituted from the context first;
/// then, for every key the valid template defines, a partial entry replaces
/// the valid one. Partial keys unknown to the valid template are dropped.
///
/// # Errors
///
/// Returns `PrepareError::Variable` if a `{{token}}` in the partial names a
/// missing context key.
pub fn merge_templates(
    valid: &BodyTemplate,
    partial: &BodyTemplate,
    context: &Context,
) -> Result<BodyTemplate, PrepareError> {
    let mut merged = valid.clone();

    for (key, value) in partial {
        let resolved = substitute_brace_token(value, context)?;
        if merged.contains_key(key) {
            merged.insert(key.clone(), resolved);
        }
    }

    Ok(merged)
}

/// Builds the request body for a signing-enabled request.
///
/// When the context holds a valid template, the merged template is serialized
/// as the body content; otherwise the body is attached empty. The content
/// type comes from the plugin parameters (default `application/json`).
///
/// # Errors
///
/// Propagates template parse failures and missing-variable errors.
pub fn build_request_body(
    context: &Context,
    params: &PluginParams,
) -> Result<RequestBody, PrepareError> {
    let content = match context.get(VALID_BODY_CONTEXT_KEY) {
        Some(valid_json) => {
            let valid = parse_template(valid_json, "valid")?;

            let merged = match params.variable_request_body.as_deref() {
                Some(partial_json) if !partial_json.trim().is_empty() => {
                    let partial = parse_template(partial_json, "partial")?;
                    merge_templates(&valid, &partial, context)?
                }
                _ => valid,
            };

            serde_json::to_string(&merged)
                .map_err(|e| PrepareError::BodyTemplate(format!("merged template: {}", e)))?
        }
        None => String::new(),
    };

    Ok(RequestBody::new(params.effective_content_type(), content))
}
