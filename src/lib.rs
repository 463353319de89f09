//! Preflight: request templating for load-test drivers.
//!
//! This library prepares an HTTP request immediately before a load-test
//! driver dispatches it. It substitutes placeholder tokens in the URL,
//! headers, query parameters, and JSON request body with values drawn from a
//! per-iteration variable store, optionally generates synthetic values
//! (unique email addresses), and optionally hands the request to a pluggable
//! signing step. The driver owns the network; preflight only rewrites the
//! request.
//!
//! # Architecture
//!
//! - **context**: the per-iteration key-value variable store
//! - **models**: request data structures (method, URL, headers, query, body)
//! - **variables**: token substitution and synthetic email generation
//! - **config**: driver-supplied plugin parameters and the workspace
//!   settings file
//! - **prepare**: the ordered preparation pipeline and its error type
//! - **sign**: the pluggable request-signing seam
//!
//! # Usage
//!
//! ```
//! use preflight::config::{AppSettings, PluginParams};
//! use preflight::context::Context;
//! use preflight::models::request::{HttpMethod, HttpRequest};
//! use preflight::prepare::prepare_request;
//!
//! // One context per test iteration, seeded by the driver.
//! let mut context: Context = [
//!     ("serviceUrl", "https://api.example.com"),
//!     ("apiKey", "secret-123"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut request = HttpRequest::new(HttpMethod::GET, "@serviceUrl@/users");
//! request.add_header("X-Api-Key", "@apiKey@");
//!
//! let prepared = prepare_request(
//!     request,
//!     &mut context,
//!     &PluginParams::new(),
//!     &AppSettings::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(prepared.url, "https://api.example.com/users");
//! assert_eq!(prepared.headers["X-Api-Key"], "secret-123");
//! ```
//!
//! Token lookups are fail-fast: a token naming a key the context does not
//! hold aborts preparation for that iteration with an error. There is no
//! retry logic anywhere in this crate; the driver's own policy decides what
//! a failed preparation means for the run.

pub mod config;
pub mod context;
pub mod models;
pub mod prepare;
pub mod sign;
pub mod variables;

pub use config::{load_settings, AppSettings, PluginParams};
pub use context::Context;
pub use models::request::{HttpMethod, HttpRequest, RequestBody};
pub use prepare::{prepare_request, prepare_request_with_signer, PrepareError};
pub use sign::{NoopSigner, RequestSigner};
