//! Inventory item operations
//!
//! Maps one-to-one onto the backend's item endpoints: standard CRUD,
//! the `available`/`in_use` status filters, the `borrow`/`return_item`
//! actions, and multipart image upload.

use std::sync::Arc;

use crate::api::{decode, expect_success};
use crate::auth::{FormPart, Gateway};
use crate::error::Result;

use super::types::{BorrowRequest, Item, ItemDetail, ItemPayload, ItemUsage, ReturnRequest};

/// Typed wrapper over `/api/items/` and `/api/item-images/`.
#[derive(Debug, Clone)]
pub struct ItemService {
    gateway: Arc<Gateway>,
}

impl ItemService {
    pub(crate) fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Lists all items.
    pub async fn list(&self) -> Result<Vec<Item>> {
        decode(self.gateway.get("/api/items/").await?).await
    }

    /// Fetches one item with its recent usage history.
    pub async fn detail(&self, id: i64) -> Result<ItemDetail> {
        decode(self.gateway.get(&format!("/api/items/{id}/")).await?).await
    }

    /// Creates an item.
    pub async fn create(&self, item: &ItemPayload) -> Result<Item> {
        decode(self.gateway.post_json("/api/items/", item).await?).await
    }

    /// Replaces an item.
    pub async fn update(&self, id: i64, item: &ItemPayload) -> Result<Item> {
        decode(
            self.gateway
                .put_json(&format!("/api/items/{id}/"), item)
                .await?,
        )
        .await
    }

    /// Deletes an item.
    pub async fn delete(&self, id: i64) -> Result<()> {
        expect_success(self.gateway.delete(&format!("/api/items/{id}/")).await?).await
    }

    /// Lists items currently available for borrowing.
    pub async fn available(&self) -> Result<Vec<Item>> {
        decode(self.gateway.get("/api/items/available/").await?).await
    }

    /// Lists items currently borrowed.
    pub async fn in_use(&self) -> Result<Vec<Item>> {
        decode(self.gateway.get("/api/items/in_use/").await?).await
    }

    /// Borrows an item, returning the usage record opened for it.
    ///
    /// The backend rejects the request with a 400 when the item is not
    /// available.
    pub async fn borrow(&self, id: i64, request: &BorrowRequest) -> Result<ItemUsage> {
        decode(
            self.gateway
                .post_json(&format!("/api/items/{id}/borrow/"), request)
                .await?,
        )
        .await
    }

    /// Returns a borrowed item, closing its open usage record.
    pub async fn return_item(&self, id: i64, request: &ReturnRequest) -> Result<ItemUsage> {
        decode(
            self.gateway
                .post_json(&format!("/api/items/{id}/return_item/"), request)
                .await?,
        )
        .await
    }

    /// Uploads an image for an item as a multipart form.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The item the image belongs to.
    /// * `file_name` - File name reported to the server.
    /// * `mime` - MIME type of the content (e.g. `image/jpeg`).
    /// * `bytes` - Raw image content.
    pub async fn upload_image(
        &self,
        item_id: i64,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let parts = vec![
            FormPart::Text {
                name: "item".to_string(),
                value: item_id.to_string(),
            },
            FormPart::File {
                name: "image".to_string(),
                file_name: file_name.to_string(),
                mime: mime.to_string(),
                bytes,
            },
        ];
        expect_success(self.gateway.post_multipart("/api/item-images/", parts).await?).await
    }
}
