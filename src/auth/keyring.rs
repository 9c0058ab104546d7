//
//  gitlab-admin
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! Personal access tokens are kept in the platform keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `gitlab-admin`
//! - **Username/Key**: the GitLab domain (e.g. `gitlab.com`)
//! - **Password/Value**: the token
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_admin::auth::KeyringStore;
//!
//! fn remember(token: &str) -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store("gitlab.com", token)?;
//!     assert!(store.get("gitlab.com")?.is_some());
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

/// Keyring service name shared by every stored token.
const SERVICE_NAME: &str = "gitlab-admin";

/// Token storage backed by the system keyring.
///
/// No keyring access happens until a method is called. On Linux a secret
/// service daemon must be running.
pub struct KeyringStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store using the `gitlab-admin` service name.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores (or replaces) the token for a domain.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the keyring is unavailable or access is denied.
    pub fn store(&self, domain: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, domain)?;
        entry.set_password(token)?;
        Ok(())
    }

    /// Retrieves the token for a domain.
    ///
    /// Returns `Ok(None)` when no entry exists; other keyring failures are
    /// errors.
    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, domain)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the token for a domain. Deleting a missing entry succeeds.
    pub fn delete(&self, domain: &str) -> Result<()> {
        let entry = Entry::new(&self.service, domain)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}
