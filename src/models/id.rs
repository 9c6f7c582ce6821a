use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier assigned by the data store.
///
/// json-server hands out numeric ids for seeded records and string ids for
/// records it creates, so both shapes are kept exactly as they arrived. That
/// way a `likedBy` list is written back in the same shape it was read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl EntityId {
    /// Parses a raw path or form value, preferring the numeric shape.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u64>() {
            Ok(n) if n.to_string() == raw => EntityId::Number(n),
            _ => EntityId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

// `1` and `"1"` name the same record.
impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntityId::Number(a), EntityId::Number(b)) => a == b,
            (EntityId::Text(a), EntityId::Text(b)) => a == b,
            (EntityId::Number(n), EntityId::Text(s)) | (EntityId::Text(s), EntityId::Number(n)) => {
                n.to_string() == *s
            }
        }
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        EntityId::parse(raw)
    }
}
