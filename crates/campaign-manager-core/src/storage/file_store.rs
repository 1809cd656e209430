//! File-backed property store
//!
//! Each identity owns one JSON object file, `<hex(identity)>.json`, mapping
//! property keys to string values. Writes go to a sibling temp file that is
//! renamed over the original, so a failed write leaves the previous value in
//! place.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use crate::storage::PropertyStore;
use crate::types::{StorageError, UserId};
use crate::log_debug;

/// Property store persisting one JSON file per identity
#[derive(Debug)]
pub struct FilePropertyStore {
    /// Directory holding the per-identity files
    data_dir: PathBuf,
    /// Serializes read-modify-write of property files within this process
    write_lock: Mutex<()>,
}

type PropertyMap = BTreeMap<String, String>;

impl FilePropertyStore {
    /// Open (and create if needed) a store rooted at `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        log_debug!("FilePropertyStore opened at {:?}", data_dir);
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory holding the per-identity files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, user: &UserId) -> PathBuf {
        self.data_dir.join(format!("{}.json", hex::encode(user.as_str())))
    }

    fn read_map(path: &Path) -> Result<PropertyMap, StorageError> {
        if !path.exists() {
            return Ok(PropertyMap::new());
        }
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| StorageError::Corruption(format!("{}: {}", path.display(), e)))
    }

    fn write_map(path: &Path, map: &PropertyMap) -> Result<(), StorageError> {
        let contents = serde_json::to_string(map)
            .map_err(|e| StorageError::Corruption(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl PropertyStore for FilePropertyStore {
    fn get_property(&self, user: &UserId, key: &str) -> Result<Option<String>, StorageError> {
        let map = Self::read_map(&self.path_for(user))?;
        Ok(map.get(key).cloned())
    }

    fn set_property(&self, user: &UserId, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let path = self.path_for(user);
        let mut map = Self::read_map(&path)?;
        map.insert(key.to_string(), value);
        Self::write_map(&path, &map)
    }
}
