//! Shared fixtures for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::prelude::*;

use crate::data::{DataAccessError, DataHandler};
use crate::models::{AccessToken, AuthInfo};
use crate::request::{FormRequest, TokenRequest};

/// Builds an `Authorization` header value for the given credentials.
pub(crate) fn basic_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// An in-memory data handler with scriptable responses.
///
/// Lookups return the configured values regardless of their argument;
/// tests script a failure path by leaving the relevant field `None` or
/// `false`. Upserts are recorded so idempotence is observable.
pub(crate) struct MockDataHandler {
    pub(crate) request: FormRequest,
    pub(crate) auth_info: Option<AuthInfo>,
    pub(crate) access_token: Option<AccessToken>,
    pub(crate) user_id: Option<String>,
    pub(crate) client_valid: bool,
    pub(crate) infra_failure: bool,
    pub(crate) upserts: AtomicUsize,
    pub(crate) stored_tokens: Mutex<HashMap<String, AccessToken>>,
    pub(crate) auth_info_args: Mutex<Option<(String, Option<String>, Option<String>)>>,
    pub(crate) validated_grant_type: Mutex<Option<String>>,
}

impl MockDataHandler {
    pub(crate) fn new(request: FormRequest) -> Self {
        Self {
            request,
            auth_info: None,
            access_token: None,
            user_id: None,
            client_valid: true,
            infra_failure: false,
            upserts: AtomicUsize::new(0),
            stored_tokens: Mutex::new(HashMap::new()),
            auth_info_args: Mutex::new(None),
            validated_grant_type: Mutex::new(None),
        }
    }

    fn guard(&self) -> Result<(), DataAccessError> {
        if self.infra_failure {
            return Err(DataAccessError::new("storage offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DataHandler for MockDataHandler {
    fn request(&self) -> &dyn TokenRequest {
        &self.request
    }

    async fn auth_info_by_code(
        &self,
        _code: &str,
    ) -> Result<Option<AuthInfo>, DataAccessError> {
        self.guard()?;
        Ok(self.auth_info.clone())
    }

    async fn auth_info_by_refresh_token(
        &self,
        _refresh_token: &str,
    ) -> Result<Option<AuthInfo>, DataAccessError> {
        self.guard()?;
        Ok(self.auth_info.clone())
    }

    async fn user_id(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<Option<String>, DataAccessError> {
        self.guard()?;
        Ok(self.user_id.clone())
    }

    async fn validate_client(
        &self,
        _client_id: &str,
        _client_secret: &str,
        grant_type: &str,
    ) -> Result<bool, DataAccessError> {
        self.guard()?;
        *self.validated_grant_type.lock().expect("not poisoned") = Some(grant_type.to_owned());
        Ok(self.client_valid)
    }

    async fn create_or_update_auth_info(
        &self,
        client_id: &str,
        user_id: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Option<AuthInfo>, DataAccessError> {
        self.guard()?;
        *self.auth_info_args.lock().expect("not poisoned") = Some((
            client_id.to_owned(),
            user_id.map(ToOwned::to_owned),
            scope.map(ToOwned::to_owned),
        ));
        Ok(self.auth_info.clone())
    }

    async fn create_or_update_access_token(
        &self,
        auth_info: &AuthInfo,
    ) -> Result<AccessToken, DataAccessError> {
        self.guard()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);
        let token = self.access_token.clone().unwrap_or_else(|| {
            AccessToken::builder()
                .auth_id(auth_info.id.clone())
                .token("accessToken1")
                .build()
        });
        self.stored_tokens
            .lock()
            .expect("not poisoned")
            .insert(auth_info.id.clone(), token.clone());
        Ok(token)
    }
}
