//! Synthetic email address generation.
//!
//! Context entries flagged with the [`EMAIL_SENTINEL`] receive a generated,
//! time-based address during request preparation. Uniqueness rests solely on
//! wall-clock millisecond resolution plus the configured application-name
//! suffix; two calls within the same millisecond produce identical output.
//! That weakness is part of the contract and is deliberately not hardened.

use chrono::Utc;

/// Sentinel marking a context entry (by key or by current value) that should
/// be filled with a generated email address.
pub const EMAIL_SENTINEL: &str = "@GenerateEmailAddress@";

/// Fixed domain for all generated addresses.
pub const EMAIL_DOMAIN: &str = "MySecretBogusEmailServiceProvider.com";

/// Generates an email address from the current wall clock.
///
/// # Examples
///
/// ```
/// use preflight::variables::generate_email;
///
/// let email = generate_email("Checkout");
/// assert!(email.starts_with("WebTest"));
/// assert!(email.ends_with("@MySecretBogusEmailServiceProvider.com"));
/// ```
pub fn generate_email(application_name: &str) -> String {
    format_email_at(Utc::now().timestamp_millis(), application_name)
}

/// Formats an address for a given millisecond timestamp.
///
/// Split out from [`generate_email`] so the timestamp can be pinned in tests.
pub fn format_email_at(millis_since_epoch: i64, application_name: &str) -> String {
    format!(
        "WebTest{}{}@{}",
        millis_since_epoch, application_name, EMAIL_DOMAIN
    )
}
