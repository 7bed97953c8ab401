//! Credential persistence for the Stockroom session
//!
//! The backend issues a short-lived access token and a longer-lived
//! refresh token. Both are plain strings and both survive process
//! restarts: they are written on login and on every successful refresh,
//! cleared on logout or when a refresh is rejected, and read on every
//! outbound request.
//!
//! Storage sits behind the [`CredentialStore`] trait so the gateway does
//! not care where the strings live. [`KeyringStore`] keeps them in the OS
//! native credential store (Keychain on macOS, Secret Service on Linux,
//! Windows Credential Manager on Windows) under two fixed entry names.
//! [`MemoryStore`] holds them in process memory for tests and ephemeral
//! sessions.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockroomError};

/// Keyring service name shared by both entries.
const KEYRING_SERVICE: &str = "stockroom";

/// Entry name for the short-lived access token.
const ACCESS_ENTRY: &str = "access-token";

/// Entry name for the longer-lived refresh token.
const REFRESH_ENTRY: &str = "refresh-token";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The persisted credential pair.
///
/// Either half may be absent: a fresh install has neither, and a session
/// whose refresh was rejected has been cleared back to neither.
///
/// # Examples
///
/// ```
/// use stockroom::auth::store::Credentials;
///
/// let creds = Credentials {
///     access: Some("a".to_string()),
///     refresh: Some("b".to_string()),
/// };
/// assert_eq!(creds.access.as_deref(), Some("a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Short-lived bearer token authorizing API calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,

    /// Longer-lived token exchanged for a new access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// Durable storage for the credential pair.
///
/// All operations are synchronous: the backing stores (OS keyring, process
/// memory) do not block on the network, and the gateway calls these from
/// async context without handing off.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored access token, or `None` when not logged in.
    fn load_access(&self) -> Result<Option<String>>;

    /// Returns the stored refresh token, or `None` when not logged in.
    fn load_refresh(&self) -> Result<Option<String>>;

    /// Persists a new access token, leaving the refresh token untouched.
    ///
    /// This is the write path of a successful refresh exchange, which
    /// returns only a new access token.
    fn save_access(&self, token: &str) -> Result<()>;

    /// Persists both credentials. This is the write path of a login.
    fn save_pair(&self, access: &str, refresh: &str) -> Result<()>;

    /// Removes both credentials. Safe to call when nothing is stored.
    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// KeyringStore
// ---------------------------------------------------------------------------

/// [`CredentialStore`] backed by the OS native keyring.
///
/// Both tokens live under the `stockroom` service, one entry each, so a
/// user can inspect or revoke them with their platform's credential
/// manager.
///
/// # Examples
///
/// ```no_run
/// use stockroom::auth::store::{CredentialStore, KeyringStore};
///
/// # fn example() -> stockroom::error::Result<()> {
/// let store = KeyringStore::new();
/// store.save_pair("access", "refresh")?;
/// assert_eq!(store.load_access()?.as_deref(), Some("access"));
/// store.clear()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct KeyringStore;

impl KeyringStore {
    /// Creates a new keyring-backed store. No keyring access happens
    /// until the first read or write.
    pub fn new() -> Self {
        Self
    }

    fn entry(name: &str) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(KEYRING_SERVICE, name).map_err(StockroomError::Keyring)?)
    }

    fn read(name: &str) -> Result<Option<String>> {
        match Self::entry(name)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StockroomError::Keyring(e).into()),
        }
    }

    fn write(name: &str, value: &str) -> Result<()> {
        Self::entry(name)?
            .set_password(value)
            .map_err(StockroomError::Keyring)?;
        Ok(())
    }

    fn delete(name: &str) -> Result<()> {
        match Self::entry(name)?.delete_password() {
            Ok(()) => Ok(()),
            // Deleting an absent entry is a no-op, matching logout on a
            // machine that never logged in.
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StockroomError::Keyring(e).into()),
        }
    }
}

impl CredentialStore for KeyringStore {
    fn load_access(&self) -> Result<Option<String>> {
        Self::read(ACCESS_ENTRY)
    }

    fn load_refresh(&self) -> Result<Option<String>> {
        Self::read(REFRESH_ENTRY)
    }

    fn save_access(&self, token: &str) -> Result<()> {
        Self::write(ACCESS_ENTRY, token)
    }

    fn save_pair(&self, access: &str, refresh: &str) -> Result<()> {
        Self::write(ACCESS_ENTRY, access)?;
        Self::write(REFRESH_ENTRY, refresh)
    }

    fn clear(&self) -> Result<()> {
        Self::delete(ACCESS_ENTRY)?;
        Self::delete(REFRESH_ENTRY)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory [`CredentialStore`] for tests and ephemeral sessions.
///
/// Interior mutability via `RwLock` lets the store sit behind an `Arc`
/// shared between the gateway and test assertions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Credentials>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given pair.
    pub fn with_pair(access: &str, refresh: &str) -> Self {
        Self {
            inner: RwLock::new(Credentials {
                access: Some(access.to_string()),
                refresh: Some(refresh.to_string()),
            }),
        }
    }

    /// Returns a snapshot of the current pair.
    pub fn snapshot(&self) -> Credentials {
        self.inner.read().expect("credential lock poisoned").clone()
    }
}

impl CredentialStore for MemoryStore {
    fn load_access(&self) -> Result<Option<String>> {
        Ok(self.inner.read().expect("credential lock poisoned").access.clone())
    }

    fn load_refresh(&self) -> Result<Option<String>> {
        Ok(self.inner.read().expect("credential lock poisoned").refresh.clone())
    }

    fn save_access(&self, token: &str) -> Result<()> {
        self.inner.write().expect("credential lock poisoned").access = Some(token.to_string());
        Ok(())
    }

    fn save_pair(&self, access: &str, refresh: &str) -> Result<()> {
        let mut inner = self.inner.write().expect("credential lock poisoned");
        inner.access = Some(access.to_string());
        inner.refresh = Some(refresh.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write().expect("credential lock poisoned") = Credentials::default();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // MemoryStore
    // -----------------------------------------------------------------------

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load_access().unwrap().is_none());
        assert!(store.load_refresh().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_pair_roundtrip() {
        let store = MemoryStore::new();
        store.save_pair("a", "b").unwrap();
        assert_eq!(store.load_access().unwrap().as_deref(), Some("a"));
        assert_eq!(store.load_refresh().unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_memory_store_clear_removes_both() {
        let store = MemoryStore::with_pair("a", "b");
        store.clear().unwrap();
        assert!(store.load_access().unwrap().is_none());
        assert!(store.load_refresh().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_save_access_preserves_refresh() {
        let store = MemoryStore::with_pair("old_access", "the_refresh");
        store.save_access("new_access").unwrap();
        assert_eq!(store.load_access().unwrap().as_deref(), Some("new_access"));
        assert_eq!(
            store.load_refresh().unwrap().as_deref(),
            Some("the_refresh")
        );
    }

    #[test]
    fn test_memory_store_clear_is_idempotent() {
        let store = MemoryStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.snapshot(), Credentials::default());
    }

    // -----------------------------------------------------------------------
    // Credentials serde
    // -----------------------------------------------------------------------

    #[test]
    fn test_credentials_roundtrip_through_json() {
        let original = Credentials {
            access: Some("a".to_string()),
            refresh: Some("b".to_string()),
        };
        let json = serde_json::to_string(&original).expect("serialize");
        let restored: Credentials = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, original);
    }

    #[test]
    fn test_credentials_empty_serializes_without_fields() {
        let json = serde_json::to_string(&Credentials::default()).expect("serialize");
        assert_eq!(json, "{}");
    }

    // -----------------------------------------------------------------------
    // Keyring integration tests  (require system keyring; skipped in CI)
    // -----------------------------------------------------------------------

    #[test]
    #[ignore = "requires system keyring"]
    #[serial_test::serial]
    fn test_keyring_store_pair_roundtrip() {
        let store = KeyringStore::new();
        store.save_pair("integration_access", "integration_refresh").expect("save");

        assert_eq!(
            store.load_access().expect("load").as_deref(),
            Some("integration_access")
        );
        assert_eq!(
            store.load_refresh().expect("load").as_deref(),
            Some("integration_refresh")
        );

        store.clear().expect("clear");
        assert!(store.load_access().expect("load after clear").is_none());
        assert!(store.load_refresh().expect("load after clear").is_none());
    }

    #[test]
    #[ignore = "requires system keyring"]
    #[serial_test::serial]
    fn test_keyring_store_clear_is_idempotent() {
        let store = KeyringStore::new();
        store.clear().expect("first clear");
        store.clear().expect("second clear is no-op");
    }
}
