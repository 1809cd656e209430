//! Records, record kinds and record identifiers
//!
//! Records are schema-less JSON objects. The only fields the system itself
//! writes are the kind-specific ID field and the owner field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use crate::constants::{ADS_KEY, AD_SETS_KEY, CAMPAIGNS_KEY};

/// A flat, schema-less record: field name to string or number
pub type Record = Map<String, Value>;

/// The three independent record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Campaign records
    Campaign,
    /// Ad set records
    AdSet,
    /// Ad records
    Ad,
}

impl RecordKind {
    /// All kinds, in hierarchy order
    pub const ALL: [RecordKind; 3] = [RecordKind::Campaign, RecordKind::AdSet, RecordKind::Ad];

    /// Property key the collection is stored under
    pub fn storage_key(self) -> &'static str {
        match self {
            RecordKind::Campaign => CAMPAIGNS_KEY,
            RecordKind::AdSet => AD_SETS_KEY,
            RecordKind::Ad => ADS_KEY,
        }
    }

    /// Name of the synthetic ID field
    pub fn id_field(self) -> &'static str {
        match self {
            RecordKind::Campaign => "Campaign ID",
            RecordKind::AdSet => "Ad Set ID",
            RecordKind::Ad => "Ad ID",
        }
    }

    /// Tag used by CSV import and the HTTP routes
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Campaign => "campaigns",
            RecordKind::AdSet => "adsets",
            RecordKind::Ad => "ads",
        }
    }

    /// Singular display label
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Campaign => "Campaign",
            RecordKind::AdSet => "Ad Set",
            RecordKind::Ad => "Ad",
        }
    }

    /// Plural display label
    pub fn plural_label(self) -> &'static str {
        match self {
            RecordKind::Campaign => "Campaigns",
            RecordKind::AdSet => "Ad Sets",
            RecordKind::Ad => "Ads",
        }
    }

    /// Resolve an import/route tag; tags are matched exactly
    pub fn from_tag(tag: &str) -> Option<RecordKind> {
        RecordKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// The ID stored on a record of this kind, if any
    pub fn record_id(self, record: &Record) -> Option<RecordId> {
        record.get(self.id_field()).and_then(RecordId::from_value)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record ID normalized at the boundary.
///
/// Stored IDs may be JSON numbers (generated) or strings (imported), and
/// callers pass IDs as text. Anything that reads fully as a finite number is
/// compared numerically, everything else as text, so `"123"` and `123`
/// address the same record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordId {
    /// Numeric ID
    Numeric(f64),
    /// Non-numeric ID, trimmed
    Text(String),
}

impl RecordId {
    /// Normalize caller-supplied text; blank input has no ID
    pub fn parse(raw: &str) -> Option<RecordId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(RecordId::Numeric(n)),
            _ => Some(RecordId::Text(trimmed.to_string())),
        }
    }

    /// Normalize a stored JSON value
    pub fn from_value(value: &Value) -> Option<RecordId> {
        match value {
            Value::Number(n) => n.as_f64().map(RecordId::Numeric),
            Value::String(s) => RecordId::parse(s),
            _ => None,
        }
    }

    /// JSON form written into records
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Numeric(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Value::from(*n as i64)
            }
            RecordId::Numeric(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.clone()),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Numeric(id as f64)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                write!(f, "{}", *n as i64)
            }
            RecordId::Numeric(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}
