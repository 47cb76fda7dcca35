//! Client credential extraction (RFC 6749 §2.3.1).
//!
//! Credentials are taken from an `Authorization: Basic` header when one is
//! usable, otherwise from the `client_id`/`client_secret` request
//! parameters. A malformed Basic payload is treated as "no credential
//! found" and falls through to the parameter path; this tolerance is
//! deliberate, not an incidental catch-all.

use base64::prelude::*;
use log::debug;
use secrecy::{ExposeSecret as _, SecretString};
use snafu::ensure;

use crate::error::{InvalidRequestSnafu, OAuthError};
use crate::request::TokenRequest;

/// Credentials presented by a client on one token request.
///
/// Transient; constructed per request and never persisted.
#[derive(Debug, Clone)]
pub struct ClientCredential {
    client_id: String,
    client_secret: SecretString,
}

impl ClientCredential {
    fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret: client_secret.into(),
        }
    }

    /// The presented client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The presented client secret.
    #[must_use]
    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }
}

/// Extracts a [`ClientCredential`] from a token request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientCredentialFetcher;

impl ClientCredentialFetcher {
    /// Resolves the client credentials for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidRequest`] when neither source yields a
    /// non-empty client ID or secret.
    pub fn fetch(&self, request: &dyn TokenRequest) -> Result<ClientCredential, OAuthError> {
        let basic = match request.header("Authorization") {
            Some(value) => {
                let parsed = parse_basic(value);
                if parsed.is_none() {
                    debug!("unusable Authorization header, falling back to request parameters");
                }
                parsed
            }
            None => None,
        };

        let credential = basic.unwrap_or_else(|| {
            ClientCredential::new(
                request.parameter("client_id").unwrap_or_default().to_owned(),
                request
                    .parameter("client_secret")
                    .unwrap_or_default()
                    .to_owned(),
            )
        });

        ensure!(
            !credential.client_id.is_empty(),
            InvalidRequestSnafu {
                description: "'client_id' not found",
            }
        );
        ensure!(
            !credential.client_secret.expose_secret().is_empty(),
            InvalidRequestSnafu {
                description: "'client_secret' not found",
            }
        );
        Ok(credential)
    }
}

/// Parses a `Basic` authorization header value.
///
/// Returns `None` for a missing scheme, undecodable base64, non-UTF-8
/// payload, or a payload without a `:` separator.
fn parse_basic(header: &str) -> Option<ClientCredential> {
    let payload = header.strip_prefix("Basic ")?;
    let decoded = BASE64_STANDARD.decode(payload).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (client_id, client_secret) = decoded.split_once(':')?;
    Some(ClientCredential::new(
        client_id.to_owned(),
        client_secret.to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;
    use crate::request::FormRequest;
    use crate::test_support::basic_header;

    #[test]
    fn basic_header_takes_precedence_over_parameters() {
        let request = FormRequest::new()
            .with_header("Authorization", basic_header("clientId1", "clientSecret1"))
            .with_param("client_id", "clientId2")
            .with_param("client_secret", "clientSecret2");
        let credential = ClientCredentialFetcher.fetch(&request).expect("credential");
        assert_eq!(credential.client_id(), "clientId1");
        assert_eq!(credential.client_secret().expose_secret(), "clientSecret1");
    }

    #[test]
    fn missing_header_falls_back_to_parameters() {
        let request = FormRequest::new()
            .with_param("client_id", "clientId1")
            .with_param("client_secret", "clientSecret1");
        let credential = ClientCredentialFetcher.fetch(&request).expect("credential");
        assert_eq!(credential.client_id(), "clientId1");
        assert_eq!(credential.client_secret().expose_secret(), "clientSecret1");
    }

    #[test]
    fn malformed_base64_falls_back_to_parameters() {
        let request = FormRequest::new()
            .with_header("Authorization", "Basic %%%not-base64%%%")
            .with_param("client_id", "clientId1")
            .with_param("client_secret", "clientSecret1");
        let credential = ClientCredentialFetcher.fetch(&request).expect("credential");
        assert_eq!(credential.client_id(), "clientId1");
    }

    #[test]
    fn payload_without_separator_falls_back_to_parameters() {
        let payload = BASE64_STANDARD.encode("clientId1clientSecret1");
        let request = FormRequest::new()
            .with_header("Authorization", format!("Basic {payload}"))
            .with_param("client_id", "clientId2")
            .with_param("client_secret", "clientSecret2");
        let credential = ClientCredentialFetcher.fetch(&request).expect("credential");
        assert_eq!(credential.client_id(), "clientId2");
    }

    #[test]
    fn non_basic_scheme_falls_back_to_parameters() {
        let request = FormRequest::new()
            .with_header("Authorization", "Bearer sometoken")
            .with_param("client_id", "clientId1")
            .with_param("client_secret", "clientSecret1");
        let credential = ClientCredentialFetcher.fetch(&request).expect("credential");
        assert_eq!(credential.client_id(), "clientId1");
    }

    #[test]
    fn missing_client_id_is_invalid_request() {
        let request = FormRequest::new().with_param("client_secret", "clientSecret1");
        let error = ClientCredentialFetcher.fetch(&request).expect_err("error");
        assert_eq!(error.error_code(), "invalid_request");
        assert_eq!(error.description(), "'client_id' not found");
    }

    #[test]
    fn missing_client_secret_is_invalid_request() {
        let request = FormRequest::new().with_param("client_id", "clientId1");
        let error = ClientCredentialFetcher.fetch(&request).expect_err("error");
        assert_eq!(error.error_code(), "invalid_request");
        assert_eq!(error.description(), "'client_secret' not found");
    }
}
