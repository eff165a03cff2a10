//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of one session log on the log server.
///
/// The server derives it from the log file name (e.g. `2024-01-15T14-30-45Z`).
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LogId(String);

impl LogId {
    /// Smart constructor: validates a non-blank log ID.
    ///
    /// Surrounding whitespace is trimmed.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidLogId> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidLogId::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LogId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        LogId::new(raw).map_err(serde::de::Error::custom)
    }
}

// ===== Error Types =====

/// Rejected log identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLogId {
    /// The identifier was empty or whitespace only.
    #[error("Log ID cannot be empty")]
    Empty,
}

// ===== Tests =====
