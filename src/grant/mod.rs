//! Grant type state machines and their registry.
//!
//! Each `OAuth2` grant type is a [`GrantHandler`]: one ordered validation
//! pipeline that authenticates the client, consults the data port, and
//! issues an access token. The [`GrantHandlerRegistry`] resolves handlers
//! by grant-type name so hosts can add custom grant types without
//! touching this crate.

mod authorization_code;
mod client_credentials;
mod password;
mod refresh_token;

pub use authorization_code::AuthorizationCode;
pub use client_credentials::ClientCredentials;
pub use password::Password;
pub use refresh_token::RefreshToken;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bon::Builder;
use log::debug;
use serde::Serialize;
use snafu::Snafu;

use crate::OAuthError;
use crate::data::{DataAccessError, DataHandler};
use crate::error::InvalidRequestSnafu;
use crate::models::AuthInfo;

/// Canonical name of the authorization code grant (RFC 6749 §4.1).
pub const AUTHORIZATION_CODE: &str = "authorization_code";
/// Canonical name of the resource owner password grant (RFC 6749 §4.3).
pub const PASSWORD: &str = "password";
/// Canonical name of the client credentials grant (RFC 6749 §4.4).
pub const CLIENT_CREDENTIALS: &str = "client_credentials";
/// Canonical name of the refresh token grant (RFC 6749 §6).
pub const REFRESH_TOKEN: &str = "refresh_token";

/// The issuance outcome of a successful grant evaluation.
///
/// The wire-agnostic counterpart of an RFC 6749 §5.1 token response;
/// optional fields are omitted when absent, never zeroed.
#[derive(Debug, Clone, Builder, Serialize)]
pub struct GrantHandlerResult {
    /// Always `Bearer`.
    #[builder(skip = String::from("Bearer"))]
    pub token_type: String,
    /// The issued access token.
    #[builder(into)]
    pub access_token: String,
    /// Seconds until expiry, omitted for non-expiring tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// The refresh token, when the authorization carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub refresh_token: Option<String>,
    /// The granted scope, when the authorization carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub scope: Option<String>,
}

/// The protocol outcome of one token request.
pub type GrantOutcome = Result<GrantHandlerResult, OAuthError>;

/// A grant-type state machine.
///
/// One call per incoming token request. The outer `Result` is the
/// infrastructure boundary: protocol failures never appear there, only as
/// the inner `Err` of the [`GrantOutcome`]. Within one call, steps run in
/// their defined order and the outcome is produced exactly once.
#[async_trait]
pub trait GrantHandler: Send + Sync {
    /// Evaluates the token request held by `data_handler`.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError`] when the data port reports an
    /// infrastructure failure; no protocol outcome exists in that case.
    async fn handle_request(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantOutcome, DataAccessError>;
}

/// Short-circuit carrier for the validation pipelines.
///
/// Lets handler internals use `?` for both failure layers; [`settle`]
/// splits it back into the public two-layer shape.
#[derive(Debug, Snafu)]
pub(crate) enum Abort {
    #[snafu(context(false), display("{source}"))]
    Protocol { source: OAuthError },
    #[snafu(context(false), display("{source}"))]
    Data { source: DataAccessError },
}

pub(crate) fn settle(
    step: Result<GrantHandlerResult, Abort>,
) -> Result<GrantOutcome, DataAccessError> {
    match step {
        Ok(result) => Ok(Ok(result)),
        Err(Abort::Protocol { source }) => Ok(Err(source)),
        Err(Abort::Data { source }) => Err(source),
    }
}

pub(crate) fn missing_param(name: &str) -> OAuthError {
    InvalidRequestSnafu {
        description: format!("'{name}' not found"),
    }
    .build()
}

/// Upserts the access token for `auth_info` and assembles the result.
///
/// `refresh_token` and `scope` are carried over only when present and
/// non-empty.
pub(crate) async fn issue_access_token(
    data_handler: &dyn DataHandler,
    auth_info: &AuthInfo,
) -> Result<GrantHandlerResult, Abort> {
    let access_token = data_handler.create_or_update_access_token(auth_info).await?;
    debug!("issued access token for authorization '{}'", auth_info.id);
    Ok(GrantHandlerResult::builder()
        .access_token(access_token.token)
        .maybe_expires_in(access_token.expires_in)
        .maybe_refresh_token(
            auth_info
                .refresh_token
                .clone()
                .filter(|token| !token.is_empty()),
        )
        .maybe_scope(auth_info.scope.clone().filter(|scope| !scope.is_empty()))
        .build())
}

/// Maps grant-type names to their handlers.
///
/// Built once at configuration time and immutable afterwards;
/// reconfiguration replaces the whole registry. Lookup never fails
/// loudly: an absent entry is the caller's cue to report
/// `unsupported_grant_type`.
#[derive(Clone, Default)]
pub struct GrantHandlerRegistry {
    handlers: HashMap<String, Arc<dyn GrantHandler>>,
}

impl GrantHandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the four built-in handlers under their canonical
    /// names.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .register(AUTHORIZATION_CODE, AuthorizationCode::new())
            .register(PASSWORD, Password::new())
            .register(CLIENT_CREDENTIALS, ClientCredentials::new())
            .register(REFRESH_TOKEN, RefreshToken::new())
    }

    /// Adds `handler` under `grant_type`, replacing any previous entry.
    #[must_use]
    pub fn register(
        mut self,
        grant_type: impl Into<String>,
        handler: impl GrantHandler + 'static,
    ) -> Self {
        self.handlers.insert(grant_type.into(), Arc::new(handler));
        self
    }

    /// Looks up the handler responsible for `grant_type`.
    #[must_use]
    pub fn get(&self, grant_type: &str) -> Option<Arc<dyn GrantHandler>> {
        self.handlers.get(grant_type).cloned()
    }

    /// The registered grant-type names, in no particular order.
    pub fn grant_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}
