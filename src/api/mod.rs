//! Typed services over the Stockroom backend REST API
//!
//! Each backend resource gets one thin service object whose methods map
//! one-to-one onto endpoints. Every call goes through the authenticated
//! [`Gateway`](crate::auth::Gateway), so bearer decoration and token
//! refresh are invisible here: services only turn wire shapes into typed
//! values and non-success statuses into errors.
//!
//! # Module layout
//!
//! - `types`      -- request and response wire types
//! - `auth`       -- login and logout against the token endpoints
//! - `items`      -- inventory items: CRUD, status filters, borrow/return,
//!   image upload
//! - `usages`     -- borrow/return usage records
//! - `categories` -- item categories
//! - `users`      -- backend user accounts

pub mod auth;
pub mod categories;
pub mod items;
pub mod types;
pub mod usages;
pub mod users;

use std::sync::Arc;

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::auth::Gateway;
use crate::error::{Result, StockroomError};

pub use auth::AuthService;
pub use categories::CategoryService;
pub use items::ItemService;
pub use usages::UsageService;
pub use users::UserService;

/// Entry point bundling the per-resource services around one gateway.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use url::Url;
/// use stockroom::api::ApiClient;
/// use stockroom::auth::{Gateway, KeyringStore};
///
/// # async fn example() -> stockroom::error::Result<()> {
/// let gateway = Gateway::new(
///     Url::parse("http://localhost:8000")?,
///     Arc::new(KeyringStore::new()),
///     Duration::from_secs(30),
/// );
/// let client = ApiClient::new(Arc::new(gateway));
/// let items = client.items().list().await?;
/// println!("{} items", items.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    gateway: Arc<Gateway>,
}

impl ApiClient {
    /// Wraps a gateway in the typed service surface.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Login/logout operations.
    pub fn auth(&self) -> AuthService {
        AuthService::new(Arc::clone(&self.gateway))
    }

    /// Inventory item operations.
    pub fn items(&self) -> ItemService {
        ItemService::new(Arc::clone(&self.gateway))
    }

    /// Usage record operations.
    pub fn usages(&self) -> UsageService {
        UsageService::new(Arc::clone(&self.gateway))
    }

    /// Category operations.
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.gateway))
    }

    /// User account operations.
    pub fn users(&self) -> UserService {
        UserService::new(Arc::clone(&self.gateway))
    }
}

/// Maps a non-success status to [`StockroomError::Backend`], passing
/// successful responses through.
///
/// The gateway has already absorbed recoverable 401s by the time a
/// response reaches this point, so whatever arrives here is final.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StockroomError::Backend {
        status: status.as_u16(),
        message: body,
    }
    .into())
}

/// Decodes a successful response body into `T`.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    Ok(response.json().await.map_err(StockroomError::Http)?)
}

/// Checks the status and discards the body (deletes, uploads).
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    check_status(response).await.map(|_| ())
}
