//! Authorization code grant (RFC 6749 §4.1).
//!
//! Exchanges a previously issued authorization code for an access token.
//! The stored `redirect_uri` must equal the presented one exactly; an
//! empty or absent stored value is "no redirect configured", not a
//! wildcard, and matches nothing.

use async_trait::async_trait;
use snafu::ensure;

use crate::client_auth::ClientCredentialFetcher;
use crate::data::{DataAccessError, DataHandler};
use crate::error::{InvalidClientSnafu, InvalidGrantSnafu, RedirectUriMismatchSnafu};
use crate::grant::{
    Abort, GrantHandler, GrantHandlerResult, GrantOutcome, issue_access_token, missing_param,
    settle,
};

/// Handler for the `authorization_code` grant type.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationCode {
    fetcher: ClientCredentialFetcher,
}

impl AuthorizationCode {
    /// Creates the handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn issue(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantHandlerResult, Abort> {
        let request = data_handler.request();
        let code = request
            .parameter("code")
            .ok_or_else(|| missing_param("code"))?;
        let redirect_uri = request
            .parameter("redirect_uri")
            .ok_or_else(|| missing_param("redirect_uri"))?;
        let credential = self.fetcher.fetch(request)?;

        let auth_info = data_handler.auth_info_by_code(code).await?.ok_or_else(|| {
            InvalidGrantSnafu {
                description: "unknown authorization code",
            }
            .build()
        })?;
        ensure!(
            auth_info.client_id == credential.client_id(),
            InvalidClientSnafu {
                description: "authorization was granted to another client",
            }
        );
        let stored_redirect_uri = auth_info.redirect_uri.as_deref().unwrap_or("");
        ensure!(
            !stored_redirect_uri.is_empty() && stored_redirect_uri == redirect_uri,
            RedirectUriMismatchSnafu {
                description: "'redirect_uri' does not match the authorized one",
            }
        );

        issue_access_token(data_handler, &auth_info).await
    }
}

#[async_trait]
impl GrantHandler for AuthorizationCode {
    async fn handle_request(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantOutcome, DataAccessError> {
        settle(self.issue(data_handler).await)
    }
}
