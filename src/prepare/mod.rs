//! Request assembly pipeline.
//!
//! [`prepare_request`] is the entry point a load-test driver calls once per
//! outgoing request, immediately before dispatch. The pipeline runs a fixed
//! sequence of steps:
//!
//! 1. Seed configuration-sourced values into empty context entries.
//! 2. Substitute `@token@` values in every query-string parameter.
//! 3. Resolve an `@contextKey@/path` URL against the context.
//! 4. Fill context entries flagged for a generated email address.
//! 5. Substitute `@token@` values in every header.
//! 6. When signing is requested, build the merged JSON body and invoke the
//!    signer.
//!
//! The prepared request is returned to the driver; any failure aborts
//! preparation for that single iteration. Each invocation runs to completion
//! synchronously and touches only the context instance it was given, so
//! drivers that parallelize iterations must hand each one its own context.

pub mod body;
pub mod error;

pub use body::{build_request_body, merge_templates, parse_template, VALID_BODY_CONTEXT_KEY};
pub use error::PrepareError;

use crate::config::{AppSettings, PluginParams};
use crate::context::Context;
use crate::models::request::HttpRequest;
use crate::sign::{NoopSigner, RequestSigner};
use crate::variables::email::generate_email;
use crate::variables::{substitute_at_token, EMAIL_SENTINEL};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use url::Url;

/// Cached pattern for a URL of the form `@contextKey@<suffix>`.
static URL_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([^@]+)@(.*)$").expect("Failed to compile URL token regex"));

/// Prepares a request with the default no-op signer.
///
/// See [`prepare_request_with_signer`] for the pipeline contract.
///
/// # Errors
///
/// Returns `PrepareError` if any token references a missing context key, a
/// body template is malformed, or the resolved URL does not parse.
///
/// # Examples
///
/// ```
/// use preflight::config::{AppSettings, PluginParams};
/// use preflight::context::Context;
/// use preflight::models::request::{HttpMethod, HttpRequest};
/// use preflight::prepare::prepare_request;
///
/// let mut context: Context = [("serviceUrl", "https://api.example.com")]
///     .into_iter()
///     .collect();
/// let request = HttpRequest::new(HttpMethod::GET, "@serviceUrl@/users");
///
/// let prepared = prepare_request(
///     request,
///     &mut context,
///     &PluginParams::new(),
///     &AppSettings::new(),
/// )
/// .unwrap();
/// assert_eq!(prepared.url, "https://api.example.com/users");
/// ```
pub fn prepare_request(
    request: HttpRequest,
    context: &mut Context,
    params: &PluginParams,
    settings: &AppSettings,
) -> Result<HttpRequest, PrepareError> {
    prepare_request_with_signer(request, context, params, settings, &NoopSigner)
}

/// Prepares a request, invoking `signer` when `params.sign_request` is set.
///
/// The request is consumed and the prepared request returned; returning it is
/// the signal for the driver to rebind remaining data-bound fields and
/// dispatch.
///
/// # Errors
///
/// Returns `PrepareError` for a missing context key, malformed body template,
/// unparsable resolved URL, or signer rejection. All are fatal for the
/// current iteration; the driver owns retry and reporting policy.
pub fn prepare_request_with_signer(
    mut request: HttpRequest,
    context: &mut Context,
    params: &PluginParams,
    settings: &AppSettings,
    signer: &dyn RequestSigner,
) -> Result<HttpRequest, PrepareError> {
    seed_context(context, params, settings);

    request.query_params = substitute_map(&request.query_params, context)?;
    request.url = resolve_url(&request.url, context)?;
    fill_generated_emails(context, settings);
    request.headers = substitute_map(&request.headers, context)?;

    if params.sign_request {
        let body = build_request_body(context, params)?;
        request.set_body(body);
        signer.sign(&mut request, context)?;
    }

    Ok(request)
}

/// Seeds settings values into the context.
///
/// Only context keys that already exist with an empty value are filled;
/// seeding never overwrites a non-empty value and never invents keys the
/// context did not declare. Additionally, a driver-supplied body template is
/// stored under [`VALID_BODY_CONTEXT_KEY`] when the context has none.
fn seed_context(context: &mut Context, params: &PluginParams, settings: &AppSettings) {
    let updates: Vec<(String, String)> = context
        .iter()
        .filter(|(_, value)| value.is_empty())
        .filter_map(|(key, _)| settings.get(key).map(|v| (key.to_string(), v.to_string())))
        .collect();

    for (key, value) in updates {
        context.set(key, value);
    }

    if !context.contains(VALID_BODY_CONTEXT_KEY) {
        if let Some(template) = params.variable_request_body.as_deref() {
            if !template.trim().is_empty() {
                context.set(VALID_BODY_CONTEXT_KEY, template);
            }
        }
    }
}

/// Applies the `@token@` substitutor to every value of a map, building a new
/// map rather than mutating during iteration.
fn substitute_map(
    map: &HashMap<String, String>,
    context: &Context,
) -> Result<HashMap<String, String>, PrepareError> {
    let mut result = HashMap::with_capacity(map.len());

    for (name, value) in map {
        result.insert(name.clone(), substitute_at_token(value, context)?);
    }

    Ok(result)
}

/// Resolves a URL of the form `@contextKey@<suffix>`.
///
/// The key between the delimiters is looked up in the context and the
/// trailing suffix is concatenated onto the looked-up value. The resolved
/// URL must parse as an absolute URL. URLs without a leading token pass
/// through untouched and unvalidated (an email address in a query string,
/// say, is not a token).
fn resolve_url(url: &str, context: &Context) -> Result<String, PrepareError> {
    let cap = match URL_TOKEN_REGEX.captures(url) {
        Some(cap) => cap,
        None => return Ok(url.to_string()),
    };

    let key = cap
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default();
    let suffix = cap.get(2).map(|m| m.as_str()).unwrap_or_default();

    let base = context.lookup(key)?;
    let resolved = format!("{}{}", base, suffix);

    Url::parse(&resolved)?;
    Ok(resolved)
}

/// Fills context entries flagged for a generated email address.
///
/// An entry is flagged when its key or its current value equals the
/// [`EMAIL_SENTINEL`]. The address suffix comes from the `ApplicationName`
/// setting (empty when unset). Updates are collected first, then applied.
fn fill_generated_emails(context: &mut Context, settings: &AppSettings) {
    let application_name = settings.application_name().unwrap_or_default().to_string();

    let flagged: Vec<String> = context
        .iter()
        .filter(|(key, value)| *key == EMAIL_SENTINEL || *value == EMAIL_SENTINEL)
        .map(|(key, _)| key.to_string())
        .collect();

    for key in flagged {
        context.set(key, generate_email(&application_name));
    }
}
