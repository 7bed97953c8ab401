//! Borrow/return usage record operations

use std::sync::Arc;

use crate::api::decode;
use crate::auth::Gateway;
use crate::error::Result;

use super::types::{ItemUsage, UsagePayload};

/// Typed wrapper over `/api/usages/`.
#[derive(Debug, Clone)]
pub struct UsageService {
    gateway: Arc<Gateway>,
}

impl UsageService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Lists all usage records.
    pub async fn list(&self) -> Result<Vec<ItemUsage>> {
        decode(self.gateway.get("/api/usages/").await?).await
    }

    /// Lists records for items that are still out.
    pub async fn current(&self) -> Result<Vec<ItemUsage>> {
        decode(self.gateway.get("/api/usages/current/").await?).await
    }

    /// Lists records whose borrower name contains `user_name`.
    pub async fn by_user(&self, user_name: &str) -> Result<Vec<ItemUsage>> {
        decode(
            self.gateway
                .get(&format!("/api/usages/by_user/?user_name={user_name}"))
                .await?,
        )
        .await
    }

    /// Creates a usage record directly, outside the borrow action.
    pub async fn create(&self, usage: &UsagePayload) -> Result<ItemUsage> {
        decode(self.gateway.post_json("/api/usages/", usage).await?).await
    }

    /// Replaces a usage record.
    pub async fn update(&self, id: i64, usage: &UsagePayload) -> Result<ItemUsage> {
        decode(
            self.gateway
                .put_json(&format!("/api/usages/{id}/"), usage)
                .await?,
        )
        .await
    }
}
