//! User space - single identity view over a property store
//!
//! Loads and saves whole collections as JSON arrays under their fixed keys.

use std::sync::Arc;
use crate::storage::PropertyStore;
use crate::types::{Record, RecordKind, Result, UserId};
use crate::{log_debug, log_warn};

/// A property store bound to one identity
pub struct UserSpace<S: PropertyStore> {
    /// The identity this space represents
    user: UserId,
    /// The shared backend
    store: Arc<S>,
}

impl<S: PropertyStore> Clone for UserSpace<S> {
    fn clone(&self) -> Self {
        Self {
            user: self.user.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PropertyStore> UserSpace<S> {
    /// Bind `store` to `user`
    pub fn new(user: UserId, store: Arc<S>) -> Self {
        Self { user, store }
    }

    /// The identity this space represents
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Load a collection. Never fails: an absent, unreadable or malformed
    /// value is treated as an empty collection.
    pub fn load(&self, kind: RecordKind) -> Vec<Record> {
        let key = kind.storage_key();
        let raw = match self.store.get_property(&self.user, key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log_warn!("Reading {} for {} failed, treating as empty: {}", key, self.user, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Record>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                log_warn!("Stored {} for {} is not a record list, treating as empty: {}", key, self.user, e);
                Vec::new()
            }
        }
    }

    /// Replace a collection. Serialization happens before the write, so a
    /// failure leaves the stored value untouched.
    pub fn save(&self, kind: RecordKind, records: &[Record]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.store.set_property(&self.user, kind.storage_key(), raw)?;
        log_debug!("Saved {} {} record(s) for {}", records.len(), kind.label(), self.user);
        Ok(())
    }
}
