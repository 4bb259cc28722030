//! Admin password setup and verification.
//!
//! Only the SHA-256 digest of the password is persisted. There is no
//! change-password operation; deleting the admin file resets the account.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::model::AdminCredential;
use crate::store::JsonStore;

/// Result of [`CredentialStore::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// A new password digest was recorded.
    Created,
    /// A password already existed; nothing changed.
    AlreadyConfigured,
}

/// Lowercase hex SHA-256 digest of `password`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The admin credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    store: JsonStore<AdminCredential>,
}

impl CredentialStore {
    pub fn new(store: JsonStore<AdminCredential>) -> Self {
        Self { store }
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(JsonStore::new(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    fn load(&self) -> AdminCredential {
        self.store.load_or(AdminCredential::default())
    }

    /// Whether a password digest is on disk.
    pub fn is_configured(&self) -> bool {
        self.load().password_hash.is_some()
    }

    /// Record `password` if no admin exists yet.
    pub fn setup(&self, password: &str) -> SetupOutcome {
        let mut credential = self.load();
        if credential.password_hash.is_some() {
            return SetupOutcome::AlreadyConfigured;
        }

        credential.password_hash = Some(hash_password(password));
        self.store.save(&credential);
        info!(path = %self.store.path().display(), "admin account created");
        SetupOutcome::Created
    }

    /// Check `password` against the stored digest.
    ///
    /// Always false when no admin is configured.
    pub fn verify(&self, password: &str) -> bool {
        match self.load().password_hash {
            Some(stored) => stored == hash_password(password),
            None => false,
        }
    }
}
