//! Record CRUD service
//!
//! Every operation is a read-modify-write of one whole collection. Two
//! concurrent writers on the same identity and collection can lose an update
//! (last write wins); nothing here guards against that.

use serde_json::Value;
use std::sync::Arc;
use crate::constants::OWNER_FIELD;
use crate::storage::{PropertyStore, UserSpace};
use crate::types::{Error, IdGenerator, Record, RecordId, RecordKind, Result};
use crate::{log_debug, log_info};

/// Outcome of a successful add
#[derive(Debug, Clone, PartialEq)]
pub struct Added {
    /// The stored record, with its ID and owner stamped
    pub record: Record,
    /// Caller-facing confirmation
    pub message: String,
}

/// CRUD over the three record collections of one identity
pub struct RecordService<S: PropertyStore> {
    space: UserSpace<S>,
    ids: Arc<IdGenerator>,
}

impl<S: PropertyStore> RecordService<S> {
    /// Create a service over `space`, drawing synthetic IDs from `ids`
    pub fn new(space: UserSpace<S>, ids: Arc<IdGenerator>) -> Self {
        Self { space, ids }
    }

    /// The underlying user space
    pub fn space(&self) -> &UserSpace<S> {
        &self.space
    }

    /// Draw a fresh synthetic ID
    pub fn next_id(&self) -> i64 {
        self.ids.next_id()
    }

    /// The full collection, unfiltered
    pub fn list(&self, kind: RecordKind) -> Vec<Record> {
        self.space.load(kind)
    }

    /// Stamp a new ID and the owner onto `record` and append it.
    /// No duplicate check is made against existing IDs.
    pub fn add(&self, kind: RecordKind, mut record: Record) -> Result<Added> {
        let id = self.next_id();
        record.insert(kind.id_field().to_string(), Value::from(id));
        record.insert(OWNER_FIELD.to_string(), Value::from(self.space.user().as_str()));

        let mut records = self.space.load(kind);
        records.push(record.clone());
        self.space.save(kind, &records)?;

        log_info!("{} {} added for {}", kind.label(), id, self.space.user());
        Ok(Added {
            record,
            message: format!("{} added successfully.", kind.label()),
        })
    }

    /// Shallow-merge `patch` into the first record whose ID matches
    pub fn update(&self, kind: RecordKind, id: &RecordId, patch: Record) -> Result<String> {
        let mut records = self.space.load(kind);
        let item = records
            .iter_mut()
            .find(|record| kind.record_id(record).as_ref() == Some(id))
            .ok_or(Error::NotFound { id_field: kind.id_field() })?;

        for (field, value) in patch {
            item.insert(field, value);
        }
        self.space.save(kind, &records)?;

        log_info!("{} {} updated for {}", kind.label(), id, self.space.user());
        Ok(format!("{} updated successfully.", kind.id_field()))
    }

    /// Remove every record whose ID matches. The collection is written back
    /// even when nothing matched.
    pub fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<String> {
        let mut records = self.space.load(kind);
        let before = records.len();
        records.retain(|record| kind.record_id(record).as_ref() != Some(id));
        self.space.save(kind, &records)?;

        log_info!(
            "{} {} delete for {} removed {} record(s)",
            kind.label(),
            id,
            self.space.user(),
            before - records.len()
        );
        Ok(format!("{} deleted.", kind.id_field()))
    }

    /// Append already-stamped records in one write
    pub fn append(&self, kind: RecordKind, rows: Vec<Record>) -> Result<usize> {
        let count = rows.len();
        let mut records = self.space.load(kind);
        records.extend(rows);
        self.space.save(kind, &records)?;
        log_debug!("Appended {} {} record(s) for {}", count, kind.label(), self.space.user());
        Ok(count)
    }
}
