//! Configuration for request preparation.
//!
//! Two configuration sources feed the pipeline: [`PluginParams`], the literal
//! per-request options the driver supplies, and [`settings::AppSettings`], an
//! external key/value settings file loaded from the workspace.

pub mod settings;

pub use settings::{load_settings, AppSettings, SettingsError, APPLICATION_NAME_KEY};

use serde::{Deserialize, Serialize};

/// Content type attached to generated bodies when none is configured.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Driver-supplied options recognized by the preparation pipeline.
///
/// Mirrors the plugin-parameter surface of the original request-templating
/// hook: a partial JSON body template, an optional content type, and a flag
/// requesting body generation plus signing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginParams {
    /// Partial or complete request body template, a flat JSON object of
    /// string values. Values wrapped in `{{token}}` are substituted from the
    /// context before merging.
    pub variable_request_body: Option<String>,

    /// Content type for the generated body. Defaults to `application/json`
    /// when unset.
    pub content_type: Option<String>,

    /// When true, the pipeline builds the merged JSON body and invokes the
    /// configured signer before handing the request back.
    pub sign_request: bool,
}

impl PluginParams {
    /// Creates params with no body template, default content type, and
    /// signing disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The effective content type: the configured value or the default.
    pub fn effective_content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Whether a non-blank partial body template was supplied.
    pub fn has_body_template(&self) -> bool {
        self.variable_request_body
            .as_deref()
            .map_or(false, |s| !s.trim().is_empty())
    }
}
