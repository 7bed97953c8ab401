//! Session authentication for the Stockroom backend
//!
//! The backend hands out a short-lived access token and a longer-lived
//! refresh token at login. This module owns both halves of that
//! lifecycle:
//!
//! - `store`   -- durable persistence of the credential pair
//!   ([`CredentialStore`] trait, keyring-backed and in-memory
//!   implementations)
//! - `gateway` -- the authenticated HTTP client: bearer decoration,
//!   single-flight token refresh, one replay per request, session
//!   invalidation on unrecoverable failure

pub mod gateway;
pub mod store;

pub use gateway::{FormPart, Gateway};
pub use store::{CredentialStore, Credentials, KeyringStore, MemoryStore};
