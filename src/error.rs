//! Protocol error types.
//!
//! Every failure a grant handler reports to a client is one of the
//! [`OAuthError`] kinds below, carrying a free-text description for
//! diagnostics. Infrastructure failures are not part of this taxonomy;
//! see [`crate::data::DataAccessError`].

use serde::Serialize;
use snafu::Snafu;

/// A protocol-level token request failure (RFC 6749 §5.2).
///
/// Exactly one kind is attached per failure. The host maps kinds to HTTP
/// statuses (conventionally 400 for request/grant/scope errors and 401
/// for client errors); this crate only names the kind.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum OAuthError {
    /// The request is missing a parameter or is otherwise malformed.
    #[snafu(display("{description}"))]
    InvalidRequest {
        /// Names the offending parameter, e.g. `'code' not found`.
        description: String,
    },
    /// Client authentication failed or the client does not match the grant.
    #[snafu(display("{description}"))]
    InvalidClient {
        /// What about the client did not check out.
        description: String,
    },
    /// The presented grant is invalid, expired, or unknown.
    #[snafu(display("{description}"))]
    InvalidGrant {
        /// What about the grant did not check out.
        description: String,
    },
    /// No handler is registered for the requested grant type.
    #[snafu(display("{description}"))]
    UnsupportedGrantType {
        /// Names the unsupported grant type.
        description: String,
    },
    /// The presented `redirect_uri` does not equal the stored one.
    ///
    /// Strict RFC 6749 wording folds this into `invalid_grant`; it is kept
    /// distinct here for finer-grained diagnostics, and hosts may remap
    /// the wire code if they prefer the strict reading.
    #[snafu(display("{description}"))]
    RedirectUriMismatch {
        /// Details of the mismatch.
        description: String,
    },
    /// The authenticated client is not authorized to use this grant type.
    #[snafu(display("{description}"))]
    UnauthorizedClient {
        /// What the client attempted.
        description: String,
    },
    /// The requested scope is invalid, unknown, or exceeds the granted one.
    #[snafu(display("{description}"))]
    InvalidScope {
        /// Details of the scope problem.
        description: String,
    },
}

impl OAuthError {
    /// The wire-level `error` code for this kind (RFC 6749 §5.2).
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidClient { .. } => "invalid_client",
            Self::InvalidGrant { .. } => "invalid_grant",
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::RedirectUriMismatch { .. } => "redirect_uri_mismatch",
            Self::UnauthorizedClient { .. } => "unauthorized_client",
            Self::InvalidScope { .. } => "invalid_scope",
        }
    }

    /// The free-text description attached to this failure.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::InvalidRequest { description }
            | Self::InvalidClient { description }
            | Self::InvalidGrant { description }
            | Self::UnsupportedGrantType { description }
            | Self::RedirectUriMismatch { description }
            | Self::UnauthorizedClient { description }
            | Self::InvalidScope { description } => description,
        }
    }

    /// The RFC 6749 §5.2 response shape for this failure.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code(),
            error_description: self.description().to_owned(),
        }
    }
}

/// Wire shape of a token endpoint failure, serialized by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// The `error` code.
    pub error: &'static str,
    /// The `error_description`, omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_description: String,
}
