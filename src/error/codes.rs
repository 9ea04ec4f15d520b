//! Error code constants.
//!
//! Error codes are grouped by range:
//! - 1xxx: Configuration errors
//! - 2xxx: Authentication errors
//! - 3xxx: Validation errors
//! - 5xxx: Upstream errors

/// Numeric error code carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Configuration Errors (1xxx) =====

    /// A required server-side setting is missing.
    pub const NOT_CONFIGURED: Self = Self(1001);

    // ===== Authentication Errors (2xxx) =====

    /// Authentication required.
    pub const UNAUTHORIZED: Self = Self(2001);

    /// Invalid token.
    pub const INVALID_TOKEN: Self = Self(2003);

    // ===== Validation Errors (3xxx) =====

    /// Bad request / malformed body.
    pub const BAD_REQUEST: Self = Self(3001);

    /// Missing required option.
    pub const MISSING_OPTION: Self = Self(3002);

    /// Invalid option value.
    pub const INVALID_OPTION: Self = Self(3003);

    /// Template names a part outside the allowed set.
    pub const INVALID_TEMPLATE_PART: Self = Self(3004);

    /// Malformed `alias@domain` address.
    pub const INVALID_EMAIL: Self = Self(3005);

    // ===== Upstream Errors (5xxx) =====

    /// Upstream provider call failed.
    pub const UPSTREAM_ERROR: Self = Self(5001);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}
