//! Registry of identities that asked for the periodic analysis
//!
//! The registry only records intent. The server owns the timer that walks
//! it and runs the analyzer for each registered identity.

use dashmap::DashSet;
use crate::types::UserId;
use crate::log_info;

/// Confirmation returned when a trigger is created
pub const TRIGGER_CREATED: &str = "Automated analysis trigger created (runs every hour).";

/// Confirmation returned when a trigger is removed
pub const TRIGGER_REMOVED: &str = "Automated analysis trigger removed.";

/// Set of identities with an active analysis trigger
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    users: DashSet<UserId>,
}

impl TriggerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `user`. Registering twice keeps a single trigger.
    pub fn register(&self, user: &UserId) -> &'static str {
        if self.users.insert(user.clone()) {
            log_info!("Analysis trigger created for {}", user);
        }
        TRIGGER_CREATED
    }

    /// Remove the trigger for `user`, if any
    pub fn unregister(&self, user: &UserId) -> &'static str {
        if self.users.remove(user).is_some() {
            log_info!("Analysis trigger removed for {}", user);
        }
        TRIGGER_REMOVED
    }

    /// Whether `user` has a trigger
    pub fn is_registered(&self, user: &UserId) -> bool {
        self.users.contains(user)
    }

    /// Snapshot of registered identities, sorted
    pub fn registered(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.users.iter().map(|u| u.key().clone()).collect();
        users.sort();
        users
    }
}
