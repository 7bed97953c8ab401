//! Login and logout against the token endpoints

use std::sync::Arc;

use serde::Serialize;

use crate::api::decode;
use crate::auth::Gateway;
use crate::error::Result;

use super::types::TokenPair;

/// Token-obtain endpoint, relative to the backend origin.
const TOKEN_PATH: &str = "/api/token/";

/// Body for the token-obtain endpoint.
#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Session lifecycle operations.
///
/// Login exchanges a username and password for a token pair and persists
/// both halves; logout drops them. Everything in between is the
/// gateway's business.
#[derive(Debug, Clone)]
pub struct AuthService {
    gateway: Arc<Gateway>,
}

impl AuthService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Logs in and persists the returned credential pair.
    ///
    /// # Errors
    ///
    /// Rejected credentials surface as an authentication or
    /// session-expired error from the gateway's 401 handling; transport
    /// and storage failures propagate as-is.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .gateway
            .post_json(TOKEN_PATH, &LoginRequest { username, password })
            .await?;
        let pair: TokenPair = decode(response).await?;

        self.gateway
            .credential_store()
            .save_pair(&pair.access, &pair.refresh)?;
        tracing::info!("logged in as {}", username);
        Ok(())
    }

    /// Clears both stored credentials. Safe to call when not logged in.
    pub fn logout(&self) -> Result<()> {
        self.gateway.credential_store().clear()?;
        tracing::info!("logged out");
        Ok(())
    }
}
