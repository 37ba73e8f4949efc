//! Login/logout against the auth endpoints.
//!
//! Login is the one request that never triggers a token refresh: a 401 there
//! is a credential failure, and the normalizer surfaces the server's reason
//! verbatim. Logout revokes server-side first but always clears the local
//! session, even when revocation fails.

use serde::Serialize;
use tracing::{info, warn};

use cargodesk_core::{CoreError, User};

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::normalize::normalize;
use crate::services::encode;

const CONTEXT: &str = "auth";

/// Email/password pair submitted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Service for session establishment and teardown.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        AuthService { client }
    }

    /// Authenticates and stores the returned token pair.
    ///
    /// Expects `{ data: { accessToken, refreshToken, user } }`.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let body = encode(credentials)?;
        let payload = self
            .client
            .post_json_no_refresh("login", &body)
            .await
            .map_err(|f| normalize(f, CONTEXT, "login"))?;

        let access = payload["data"]["accessToken"].as_str().map(str::to_string);
        let refresh = payload["data"]["refreshToken"].as_str().map(str::to_string);

        let (Some(access), Some(refresh)) = (access, refresh) else {
            return Err(ApiError::decode(
                CONTEXT,
                "login",
                CoreError::UnexpectedShape("login response missing tokens".to_string()),
            ));
        };

        let user: User = serde_json::from_value(payload["data"]["user"].clone()).map_err(|e| {
            ApiError::decode(
                CONTEXT,
                "login",
                CoreError::Decode {
                    entity: "User",
                    reason: e.to_string(),
                },
            )
        })?;

        self.client.session().set_tokens(access, refresh).await;
        info!(user_id = user.id, "logged in");

        Ok(user)
    }

    /// Revokes the session server-side, then clears local tokens.
    ///
    /// The local clear happens regardless: a client that asked to log out is
    /// logged out even when revocation fails. The failure is still
    /// normalized and returned so callers can surface it.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .client
            .post_json("logout", &serde_json::json!({}))
            .await;

        self.client.session().clear().await;

        match result {
            Ok(_) => {
                info!("logged out");
                Ok(())
            }
            Err(failure) => {
                warn!(?failure, "server-side revocation failed, local session cleared");
                Err(normalize(failure, CONTEXT, "logout"))
            }
        }
    }
}
