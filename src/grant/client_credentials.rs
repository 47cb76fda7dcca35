//! Client credentials grant (RFC 6749 §4.4).
//!
//! Machine-to-machine issuance: no resource owner is involved, so the
//! established authorization carries no user identity.

use async_trait::async_trait;
use secrecy::ExposeSecret as _;
use snafu::ensure;

use crate::client_auth::ClientCredentialFetcher;
use crate::data::{DataAccessError, DataHandler};
use crate::error::{InvalidClientSnafu, InvalidGrantSnafu};
use crate::grant::{
    Abort, CLIENT_CREDENTIALS, GrantHandler, GrantHandlerResult, GrantOutcome,
    issue_access_token, settle,
};

/// Handler for the `client_credentials` grant type.
#[derive(Debug, Clone, Default)]
pub struct ClientCredentials {
    fetcher: ClientCredentialFetcher,
}

impl ClientCredentials {
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
        let scope = request.parameter("scope");

        let client_valid = data_handler
            .validate_client(
                credential.client_id(),
                credential.client_secret().expose_secret(),
                CLIENT_CREDENTIALS,
            )
            .await?;
        ensure!(
            client_valid,
            InvalidClientSnafu {
                description: "client authentication failed",
            }
        );
        let auth_info = data_handler
            .create_or_update_auth_info(credential.client_id(), None, scope)
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
impl GrantHandler for ClientCredentials {
    async fn handle_request(
        &self,
        data_handler: &dyn DataHandler,
    ) -> Result<GrantOutcome, DataAccessError> {
        settle(self.issue(data_handler).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthInfo;
    use crate::request::FormRequest;
    use crate::test_support::{MockDataHandler, basic_header};

    fn request() -> FormRequest {
        FormRequest::new()
            .with_header("Authorization", basic_header("clientId1", "clientSecret1"))
            .with_param("scope", "scope1")
    }

    fn authorized() -> AuthInfo {
        AuthInfo::builder()
            .id("authId1")
            .client_id("clientId1")
            .scope("scope1")
            .build()
    }

    async fn outcome(data_handler: &MockDataHandler) -> GrantOutcome {
        ClientCredentials::new()
            .handle_request(data_handler)
            .await
            .expect("no infrastructure failure")
    }

    #[tokio::test]
    async fn missing_credentials_is_invalid_request() {
        let data_handler = MockDataHandler::new(FormRequest::new());
        let error = outcome(&data_handler).await.expect_err("error outcome");
        assert_eq!(error.error_code(), "invalid_request");
        assert_eq!(error.description(), "'client_id' not found");
    }

    #[tokio::test]
    async fn rejected_client_is_invalid_client() {
        let data_handler = MockDataHandler {
            client_valid: false,
            ..MockDataHandler::new(request())
        };
        let error = outcome(&data_handler).await.expect_err("error outcome");
        assert_eq!(error.error_code(), "invalid_client");
        assert_eq!(
            data_handler
                .validated_grant_type
                .lock()
                .expect("not poisoned")
                .as_deref(),
            Some("client_credentials")
        );
    }

    #[tokio::test]
    async fn unestablished_authorization_is_invalid_grant() {
        let data_handler = MockDataHandler::new(request());
        let error = outcome(&data_handler).await.expect_err("error outcome");
        assert_eq!(error.error_code(), "invalid_grant");
    }

    #[tokio::test]
    async fn authorization_is_established_without_a_user() {
        let data_handler = MockDataHandler {
            auth_info: Some(authorized()),
            ..MockDataHandler::new(request())
        };
        let result = outcome(&data_handler).await.expect("success outcome");
        assert_eq!(result.token_type, "Bearer");
        assert_eq!(result.access_token, "accessToken1");
        assert_eq!(result.scope.as_deref(), Some("scope1"));
        let args = data_handler.auth_info_args.lock().expect("not poisoned");
        let (client_id, user_id, scope) = args.as_ref().expect("authorization established");
        assert_eq!(client_id, "clientId1");
        assert_eq!(user_id.as_deref(), None);
        assert_eq!(scope.as_deref(), Some("scope1"));
    }
}
