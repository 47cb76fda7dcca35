//! Implements the token-issuance core of an `OAuth2` authorization server.
//!
//! Given an incoming token request, the [`endpoint::TokenEndpoint`]
//! identifies the requested grant type, authenticates the requesting
//! client, validates grant-specific state against a host-supplied
//! [`data::DataHandler`], and issues or refreshes an access token. HTTP
//! transport, request parsing, response encoding, and storage all stay on
//! the host's side of the [`request::TokenRequest`] and
//! [`data::DataHandler`] boundaries.

#![forbid(unsafe_code)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]

pub mod client_auth;
pub mod data;
pub mod endpoint;
mod error;
pub mod grant;
pub mod models;
pub mod outcome;
pub mod prelude;
pub mod request;

#[cfg(test)]
mod test_support;

pub use error::{ErrorResponse, OAuthError};

/// Documentation
pub mod _documentation {
    #[doc = include_str!("../README.md")]
    mod readme {}
}

/// Re-export of parts of the `secrecy` crate.
pub mod secrecy {
    pub use ::secrecy::{ExposeSecret, SecretString};
}
