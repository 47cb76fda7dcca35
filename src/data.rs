//! The persistence and identity port consumed by grant handlers.
//!
//! Hosts implement [`DataHandler`] over whatever storage and identity
//! backend they use. "Not found" is a normal `Ok(None)`/`Ok(false)`
//! return; [`DataAccessError`] is reserved for infrastructure failure and
//! is never translated into a protocol [`OAuthError`](crate::OAuthError)
//! by this crate.

use async_trait::async_trait;
use snafu::Snafu;

use crate::models::{AccessToken, AuthInfo};
use crate::request::TokenRequest;

/// An infrastructure failure reported by a [`DataHandler`].
///
/// Carries an opaque host error (storage outage, backend timeout, and the
/// like). Grant handlers propagate it untouched past the protocol
/// boundary.
#[derive(Debug, Snafu)]
#[snafu(display("data handler failure: {source}"))]
pub struct DataAccessError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl DataAccessError {
    /// Wraps a host error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Persistence and identity operations required from the host.
///
/// One instance is created per incoming token request and owns that
/// request. Implementations may complete immediately or suspend; the
/// grant handlers assume neither. Concurrency-safety of persisted state,
/// such as serializing concurrent refresh rotations for one [`AuthInfo`],
/// is the implementation's responsibility: handlers issue at most one
/// create/update call per step and never retry.
#[async_trait]
pub trait DataHandler: Send + Sync {
    /// The token request being served.
    fn request(&self) -> &dyn TokenRequest;

    /// Looks up the authorization holding the authorization code `code`.
    async fn auth_info_by_code(
        &self,
        code: &str,
    ) -> Result<Option<AuthInfo>, DataAccessError>;

    /// Looks up the authorization holding `refresh_token`.
    async fn auth_info_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<AuthInfo>, DataAccessError>;

    /// Resolves a resource owner from `username` and `password`.
    async fn user_id(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, DataAccessError>;

    /// Checks whether the client may use `grant_type` with these
    /// credentials.
    async fn validate_client(
        &self,
        client_id: &str,
        client_secret: &str,
        grant_type: &str,
    ) -> Result<bool, DataAccessError>;

    /// Creates or fetches the authorization for `(client_id, user_id,
    /// scope)`.
    ///
    /// `Ok(None)` means the authorization could not be established; the
    /// caller turns that into a protocol error.
    async fn create_or_update_auth_info(
        &self,
        client_id: &str,
        user_id: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Option<AuthInfo>, DataAccessError>;

    /// Issues the current access token for `auth_info`, replacing any
    /// previous one keyed by [`AuthInfo::id`].
    async fn create_or_update_access_token(
        &self,
        auth_info: &AuthInfo,
    ) -> Result<AccessToken, DataAccessError>;
}
