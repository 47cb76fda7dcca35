//! Refresh token grant (RFC 6749 §6).
//!
//! Issues a new access token for an existing authorization. Whether the
//! refresh token itself rotates is the data port's policy; this handler
//! only re-issues against the same authorization.

use async_trait::async_trait;
use snafu::ensure;

use crate::client_auth::ClientCredentialFetcher;
use crate::data::{DataAccessError, DataHandler};
use crate::error::{InvalidClientSnafu, InvalidGrantSnafu};
use crate::grant::{
    Abort, GrantHandler, GrantHandlerResult, GrantOutcome, issue_access_token, missing_param,
    settle,
};

/// Handler for the `refresh_token` grant type.
#[derive(Debug, Clone, Default)]
pub struct RefreshToken {
    fetcher: ClientCredentialFetcher,
}

impl RefreshToken {
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
        let refresh_token = request
            .parameter("refresh_token")
            .ok_or_else(|| missing_param("refresh_token"))?;
        let credential = self.fetcher.fetch(request)?;

        let auth_info = data_handler
            .auth_info_by_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| {
                InvalidGrantSnafu {
                    description: "unknown refresh token",
                }
                .build()
            })?;
        ensure!(
            auth_info.client_id == credential.client_id(),
            InvalidClientSnafu {
                description: "refresh token belongs to another client",
            }
        );

        issue_access_token(data_handler, &auth_info).await
    }
}

#[async_trait]
impl GrantHandler for RefreshToken {
    async fn handle_request(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantOutcome, DataAccessError> {
        settle(self.issue(data_handler).await)
    }
}
