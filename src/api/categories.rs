//! Item category operations

use std::sync::Arc;

use crate::api::{decode, expect_success};
use crate::auth::Gateway;
use crate::error::Result;

use super::types::{Category, CategoryPayload};

/// Typed wrapper over `/api/item_categories/`.
#[derive(Debug, Clone)]
pub struct CategoryService {
    gateway: Arc<Gateway>,
}

impl CategoryService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Lists all categories.
    pub async fn list(&self) -> Result<Vec<Category>> {
        decode(self.gateway.get("/api/item_categories/").await?).await
    }

    /// Creates a category.
    pub async fn create(&self, category: &CategoryPayload) -> Result<Category> {
        decode(
            self.gateway
                .post_json("/api/item_categories/", category)
                .await?,
        )
        .await
    }

    /// Replaces a category.
    pub async fn update(&self, id: i64, category: &CategoryPayload) -> Result<Category> {
        decode(
            self.gateway
                .put_json(&format!("/api/item_categories/{id}/"), category)
                .await?,
        )
        .await
    }

    /// Deletes a category.
    pub async fn delete(&self, id: i64) -> Result<()> {
        expect_success(
            self.gateway
                .delete(&format!("/api/item_categories/{id}/"))
                .await?,
        )
        .await
    }
}
