//! Simple in-memory property store using DashMap
//!
//! Values live for the lifetime of the process only.

use dashmap::DashMap;
use std::collections::HashMap;
use crate::storage::PropertyStore;
use crate::types::{StorageError, UserId};
use crate::log_trace;

/// Property store keyed by identity, then property name
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    /// Map of identity to that identity's properties
    properties: DashMap<UserId, HashMap<String, String>>,
}

impl MemoryPropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            properties: DashMap::new(),
        }
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn get_property(&self, user: &UserId, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .properties
            .get(user)
            .and_then(|props| props.get(key).cloned()))
    }

    fn set_property(&self, user: &UserId, key: &str, value: String) -> Result<(), StorageError> {
        log_trace!("MemoryPropertyStore::set_property - user: {}, key: {}, size: {}", user, key, value.len());
        self.properties
            .entry(user.clone())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}
