//! Secret redaction for log output.

/// Placeholder returned for an empty or absent secret.
pub(crate) const EMPTY_PLACEHOLDER: &str = "(empty string)";

/// Minimum length (in characters) at which a secret can be masked.
const MIN_MASKABLE_LEN: usize = 8;

/// Produces a display-safe rendering of a secret.
///
/// The first and last 4 characters are kept, everything in between is
/// replaced with `*`. An empty input yields `"(empty string)"`. Inputs
/// shorter than 8 characters are returned unchanged: they cannot be masked
/// without losing all diagnostic value, so callers should avoid verbose
/// logging with short keys in production.
///
/// This is the only function through which a secret may reach a log sink.
///
/// # Example
///
/// ```ignore
/// assert_eq!(redact("abc123def456"), "abc1****f456");
/// ```
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let len = secret.chars().count();
    if len < MIN_MASKABLE_LEN {
        return secret.to_string();
    }

    let mut out = String::with_capacity(secret.len());
    out.extend(secret.chars().take(4));
    for _ in 4..len - 4 {
        out.push('*');
    }
    out.extend(secret.chars().skip(len - 4));
    out
}
