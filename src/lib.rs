//! Stockroom - client SDK and CLI for an inventory backend
//!
//! This library wraps the Stockroom inventory and office-administration
//! backend's REST API. Its core is the authenticated request gateway:
//! every call carries the stored bearer credential, an expired credential
//! is refreshed transparently with a single-flight exchange shared by all
//! concurrent callers, and an unrecoverable refresh invalidates the
//! session.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `auth`: credential storage and the authenticated request gateway
//! - `api`: typed per-resource services (items, usages, categories, users)
//! - `config`: configuration loading and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use url::Url;
//! use stockroom::{ApiClient, Gateway, KeyringStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = Gateway::new(
//!         Url::parse("http://localhost:8000")?,
//!         Arc::new(KeyringStore::new()),
//!         Duration::from_secs(30),
//!     );
//!     let client = ApiClient::new(Arc::new(gateway));
//!
//!     for item in client.items().available().await? {
//!         println!("{} ({})", item.name, item.serial_number);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::ApiClient;
pub use auth::{CredentialStore, Credentials, Gateway, KeyringStore, MemoryStore};
pub use config::Config;
pub use error::{Result, StockroomError};
