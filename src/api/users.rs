//! Backend user account operations

use std::sync::Arc;

use crate::api::decode;
use crate::auth::Gateway;
use crate::error::Result;

use super::types::User;

/// Typed wrapper over `/api/users/`.
#[derive(Debug, Clone)]
pub struct UserService {
    gateway: Arc<Gateway>,
}

impl UserService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Lists all user accounts.
    pub async fn list(&self) -> Result<Vec<User>> {
        decode(self.gateway.get("/api/users/").await?).await
    }
}
