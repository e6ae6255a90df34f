use serde::{Deserialize, Serialize};

use crate::refs::SystemRef;

/// Top-level administrative grouping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct System {
    /// Two-character informational identifier
    pub id: String,
    pub name: String,
    /// Unique system number (join key)
    pub number: i64,
}

impl System {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Two-character informational identifier
    pub id: String,
    pub name: String,
    pub number: i64,
    pub system: SystemRef,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: i64, system: SystemRef) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
            system,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Up to four-character informational identifier
    pub id: String,
    pub name: String,
    pub number: i64,
    pub system: SystemRef,
}

impl Area {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: i64, system: SystemRef) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
            system,
        }
    }
}
