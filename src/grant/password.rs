//! Resource owner password credentials grant (RFC 6749 §4.3).
//!
//! Authenticates the resource owner through the data port and establishes
//! a first-class authorization for (client, user, scope) before issuing
//! the token. The data port is the authority on client validity here.

use async_trait::async_trait;
use secrecy::ExposeSecret as _;
use snafu::ensure;

use crate::client_auth::ClientCredentialFetcher;
use crate::data::{DataAccessError, DataHandler};
use crate::error::{InvalidClientSnafu, InvalidGrantSnafu};
use crate::grant::{
    Abort, GrantHandler, GrantHandlerResult, GrantOutcome, PASSWORD, issue_access_token,
    missing_param, settle,
};

/// Handler for the `password` grant type.
#[derive(Debug, Clone, Default)]
pub struct Password {
    fetcher: ClientCredentialFetcher,
}

impl Password {
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
        let credential = self.fetcher.fetch(request)?;
        let username = request
            .parameter("username")
            .ok_or_else(|| missing_param("username"))?;
        let password = request
            .parameter("password")
            .ok_or_else(|| missing_param("password"))?;
        let scope = request.parameter("scope");

        let user_id = data_handler
            .user_id(username, password)
            .await?
            .ok_or_else(|| {
                InvalidGrantSnafu {
                    description: "username or password is invalid",
                }
                .build()
            })?;
        let client_valid = data_handler
            .validate_client(
                credential.client_id(),
                credential.client_secret().expose_secret(),
                PASSWORD,
            )
            .await?;
        ensure!(
            client_valid,
            InvalidClientSnafu {
                description: "client authentication failed",
            }
        );
        let auth_info = data_handler
            .create_or_update_auth_info(credential.client_id(), Some(&user_id), scope)
            .await?
            .ok_or_else(|| {
                InvalidGrantSnafu {
                    description: "authorization could not be established",
                }
                .build()
            })?;

        issue_access_token(data_handler, &auth_info).await
    }
}

#[async_trait]
impl GrantHandler for Password {
    async fn handle_request(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantOutcome, DataAccessError> {
        settle(self.issue(data_handler).await)
    }
}
