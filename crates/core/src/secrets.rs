//! Secret storage seam.
//!
//! Token acquisition and persistence policy live outside this crate; the
//! loader only needs to read a bearer token when one exists. Absence is a
//! recoverable condition (`Ok(None)`), not an error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::Result;

/// Read access to caller-managed secrets.
pub trait SecretStore: Send + Sync {
    /// Returns the secret stored under `key`, or `None` when absent.
    fn get_secret(&self, key: &str) -> Result<Option<String>>;
}

/// Thread-safe in-memory secret store for tests and embeddings.
#[derive(Clone, Default)]
pub struct InMemorySecretStore {
    secrets: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_secret(&self, key: &str, value: &str) {
        self.secrets
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Removes the secret under `key`; removing a missing key is fine.
    pub fn delete_secret(&self, key: &str) {
        self.secrets.lock().unwrap().remove(key);
    }
}

impl SecretStore for InMemorySecretStore {
    fn get_secret(&self, key: &str) -> Result<Option<String>> {
        Ok(self.secrets.lock().unwrap().get(key).cloned())
    }
}
