//! Bearer token verification.
//!
//! Every protected route is guarded by a single API token taken from
//! configuration. The token is compared in constant time.

use crate::config::AuthConfig;

/// Outcome of checking a presented token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    /// Token matches the configured secret.
    Valid,
    /// Token does not match.
    Invalid,
    /// No secret is configured, so nothing can be verified.
    NotConfigured,
}

/// Verifies bearer tokens against the configured secret.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    expected: Option<String>,
}

impl TokenVerifier {
    /// Create a verifier from authentication configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            expected: config.token().map(ToString::to_string),
        }
    }

    /// Whether a secret is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Check a presented token.
    #[must_use]
    pub fn verify(&self, presented: &str) -> TokenCheck {
        match &self.expected {
            None => TokenCheck::NotConfigured,
            Some(expected) if constant_time_eq(expected.as_bytes(), presented.as_bytes()) => {
                TokenCheck::Valid
            }
            Some(_) => TokenCheck::Invalid,
        }
    }
}

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
