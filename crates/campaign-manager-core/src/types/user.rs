//! Caller identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::types::{Error, Result};

/// Identity of the caller, supplied by the hosting environment (normally an e-mail).
///
/// Every record a caller creates is stamped with this value, and storage is
/// partitioned by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create an identity, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("Caller identity cannot be empty"));
        }
        Ok(UserId(trimmed.to_string()))
    }

    /// The identity as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UserId::new(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
