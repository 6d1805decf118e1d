//! Environment variable helpers for configuration.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering (config path).
//! - Read per-field override variables verbatim.
//!
//! Invariants:
//! - `env_var_or_none`: empty or whitespace-only variables are unset and
//!   values are trimmed.
//! - `env_override`: a variable that is set is used as-is, even when empty.

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read a per-field override variable. Set means present in the process
/// environment; the value is returned untrimmed, and may be empty.
pub(crate) fn env_override(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
