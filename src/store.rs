// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence primitive.
//!
//! A [`KeyValueBackend`] is the raw string store and is allowed to fail.
//! [`Storage`] wraps one and never fails: every error is logged and turned
//! into `None` or `false`, so callers always keep a valid in-memory state.

use crate::errors::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, error, warn};

pub const INCOME_KEY: &str = "budget_buddy_income";
pub const EXPENSES_KEY: &str = "budget_buddy_expenses";
pub const GOALS_KEY: &str = "budget_buddy_goals";
pub const SETTINGS_KEY: &str = "budget_buddy_settings";

pub const ALL_KEYS: [&str; 4] = [INCOME_KEY, EXPENSES_KEY, GOALS_KEY, SETTINGS_KEY];

const PROBE_KEY: &str = "__storage_test__";

pub trait KeyValueBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.items
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Backend that rejects every call, standing in for disabled or full storage.
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl KeyValueBackend for UnavailableBackend {
    fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

pub struct Storage {
    backend: Box<dyn KeyValueBackend>,
}

impl Storage {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Round-trips a probe key to find out whether writes currently succeed.
    pub fn is_available(&self) -> bool {
        let probe = self
            .backend
            .write(PROBE_KEY, "test")
            .and_then(|_| self.backend.delete(PROBE_KEY));
        match probe {
            Ok(()) => true,
            Err(e) => {
                warn!("storage is not available: {}", e);
                false
            }
        }
    }

    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> bool {
        let result = serde_json::to_string(data)
            .map_err(StoreError::from)
            .and_then(|json| self.backend.write(key, &json));
        match result {
            Ok(()) => {
                debug!("data saved under key {}", key);
                true
            }
            Err(e) => {
                error!("failed to save data with key {}: {}", key, e);
                false
            }
        }
    }

    /// Returns `None` when the key is absent, unreadable, or not valid JSON
    /// for `T`.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no data found for key {}", key);
                return None;
            }
            Err(e) => {
                error!("failed to retrieve data with key {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                error!("failed to parse data with key {}: {}", key, e);
                None
            }
        }
    }

    pub fn remove_item(&self, key: &str) -> bool {
        match self.backend.delete(key) {
            Ok(()) => {
                debug!("data removed for key {}", key);
                true
            }
            Err(e) => {
                error!("failed to remove data with key {}: {}", key, e);
                false
            }
        }
    }

    pub fn clear_all_data(&self) -> bool {
        let mut ok = true;
        for key in ALL_KEYS {
            ok &= self.remove_item(key);
        }
        ok
    }
}
