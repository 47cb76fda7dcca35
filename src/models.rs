//! Persisted records exchanged with the data port.

use std::time::SystemTime;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A persisted authorization record.
///
/// Created by the authorization/consent flow (for the authorization code
/// grant) or by the password and client-credentials handlers on successful
/// authentication. `client_id` is the authority for every client-match
/// check; `redirect_uri` of `None` or `""` means "no redirect configured"
/// and is not a wildcard.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Identity of this authorization; access-token upserts key on it.
    #[builder(into)]
    pub id: String,
    /// The client this authorization was granted to.
    #[builder(into)]
    pub client_id: String,
    /// The resource owner; absent for client-credentials authorizations.
    #[builder(into)]
    pub user_id: Option<String>,
    /// The authorized scope.
    #[builder(into)]
    pub scope: Option<String>,
    /// The authorization code, while one is outstanding.
    #[builder(into)]
    pub code: Option<String>,
    /// The redirect URI registered for the authorization, if any.
    #[builder(into)]
    pub redirect_uri: Option<String>,
    /// The current refresh token, if one was issued.
    #[builder(into)]
    pub refresh_token: Option<String>,
    /// When the authorization was established.
    #[builder(skip = SystemTime::now())]
    #[serde(skip, default = "SystemTime::now")]
    pub created_on: SystemTime,
}

/// The current access token for one [`AuthInfo`].
///
/// At most one exists per authorization; issuing again for the same
/// `auth_id` replaces it (the data port's upsert contract).
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct AccessToken {
    /// The [`AuthInfo::id`] this token belongs to.
    #[builder(into)]
    pub auth_id: String,
    /// The token value.
    #[builder(into)]
    pub token: String,
    /// Seconds until expiry; absent for non-expiring tokens.
    pub expires_in: Option<u64>,
    /// When the token was issued.
    #[builder(skip = SystemTime::now())]
    #[serde(skip, default = "SystemTime::now")]
    pub created_on: SystemTime,
}
