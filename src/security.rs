use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

/// Header carrying the shared secret for content revalidation
pub const REVALIDATE_SECRET_HEADER: &str = "x-revalidate-secret";

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing shared secrets supplied by callers
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Outcome of checking a revalidation request against the configured secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretCheck {
    /// No secret configured; the endpoint is disabled
    Disabled,
    Rejected,
    Accepted,
}

pub fn check_revalidate_secret(configured: Option<&str>, headers: &HeaderMap) -> SecretCheck {
    let Some(expected) = configured else {
        return SecretCheck::Disabled;
    };

    let provided = headers
        .get(REVALIDATE_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if constant_time_compare(provided, expected) {
        SecretCheck::Accepted
    } else {
        SecretCheck::Rejected
    }
}
