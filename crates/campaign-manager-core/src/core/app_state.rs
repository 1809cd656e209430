//! Shared application state
//!
//! One `AppState` is built at startup and shared by every request handler
//! and the periodic analysis task.

use std::sync::Arc;
use crate::ai::ScriptGenerator;
use crate::core::config::Config;
use crate::records::RecordService;
use crate::scheduler::TriggerRegistry;
use crate::storage::{StorageImpl, UserSpace};
use crate::types::{IdGenerator, UserId};

/// Central application state holding all services and components
pub struct AppState<S: StorageImpl> {
    /// Property store shared by every identity
    pub store: Arc<S>,

    /// Application configuration
    pub config: Config,

    /// Synthetic ID source shared by every record service
    pub ids: Arc<IdGenerator>,

    /// Chat-completion client
    pub generator: Arc<ScriptGenerator>,

    /// Identities with a periodic analysis trigger
    pub triggers: Arc<TriggerRegistry>,
}

// Manual Clone so that S itself need not be Clone
impl<S: StorageImpl> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            ids: self.ids.clone(),
            generator: self.generator.clone(),
            triggers: self.triggers.clone(),
        }
    }
}

impl<S: StorageImpl> AppState<S> {
    /// Create a new AppState with the given configuration
    /// This is called by the factory after the store is initialized
    pub fn new(store: Arc<S>, config: Config, generator: ScriptGenerator) -> Self {
        Self {
            store,
            config,
            ids: Arc::new(IdGenerator::new()),
            generator: Arc::new(generator),
            triggers: Arc::new(TriggerRegistry::new()),
        }
    }

    /// The store bound to `user`
    pub fn space(&self, user: UserId) -> UserSpace<S> {
        UserSpace::new(user, self.store.clone())
    }

    /// Record CRUD for `user`
    pub fn records(&self, user: UserId) -> RecordService<S> {
        RecordService::new(self.space(user), self.ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPropertyStore;
    use crate::types::{Record, RecordKind};

    fn state() -> AppState<MemoryPropertyStore> {
        let config = Config::default();
        let generator = ScriptGenerator::new(&config.ai).unwrap();
        AppState::new(Arc::new(MemoryPropertyStore::new()), config, generator)
    }

    #[test]
    fn identities_are_isolated() {
        let state = state();
        let alice = UserId::new("alice@example.com").unwrap();
        let bob = UserId::new("bob@example.com").unwrap();

        state.records(alice.clone()).add(RecordKind::Campaign, Record::new()).unwrap();
        assert_eq!(state.records(alice).list(RecordKind::Campaign).len(), 1);
        assert!(state.records(bob).list(RecordKind::Campaign).is_empty());
    }

    #[test]
    fn clones_share_store_and_triggers() {
        let state = state();
        let copy = state.clone();
        let user = UserId::new("alice@example.com").unwrap();
        copy.triggers.register(&user);
        copy.records(user.clone()).add(RecordKind::Ad, Record::new()).unwrap();

        assert!(state.triggers.is_registered(&user));
        assert_eq!(state.space(user).load(RecordKind::Ad).len(), 1);
    }
}
