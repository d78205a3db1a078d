//! Core event types
//!
//! Defines the host event vocabulary shared by all events:
//! - CRUD classification
//! - Educational level
//! - The serializable [`EventRecord`] handed to a bus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// CRUD classification of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Crud {
    /// Something was created
    Create,
    /// Something was read
    Read,
    /// Something was updated
    Update,
    /// Something was deleted
    Delete,
}

impl Crud {
    /// Single-letter code used in log storage
    #[inline]
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Crud::Create => 'c',
            Crud::Read => 'r',
            Crud::Update => 'u',
            Crud::Delete => 'd',
        }
    }
}

impl From<Crud> for char {
    fn from(crud: Crud) -> Self {
        crud.as_char()
    }
}

impl TryFrom<char> for Crud {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'c' => Ok(Crud::Create),
            'r' => Ok(Crud::Read),
            'u' => Ok(Crud::Update),
            'd' => Ok(Crud::Delete),
            other => Err(format!("invalid crud code: '{other}'")),
        }
    }
}

/// Educational level of an event
///
/// Numeric values match the host log store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EduLevel {
    /// Not related to teaching or participation
    Other,
    /// Teaching activity
    Teaching,
    /// Participation in learning
    Participating,
}

impl EduLevel {
    /// Get numeric value
    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            EduLevel::Other => 0,
            EduLevel::Teaching => 1,
            EduLevel::Participating => 2,
        }
    }
}

impl From<EduLevel> for u8 {
    fn from(level: EduLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for EduLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EduLevel::Other),
            1 => Ok(EduLevel::Teaching),
            2 => Ok(EduLevel::Participating),
            other => Err(format!("invalid edulevel: {other}")),
        }
    }
}

/// Serializable event as stored by a bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique event id
    pub event_id: Uuid,
    /// Fully qualified event name
    pub event_name: String,
    /// Component that owns the event
    pub component: String,
    /// Action verb
    pub action: String,
    /// Target noun
    pub target: String,
    /// CRUD classification
    pub crud: Crud,
    /// Educational level
    pub edulevel: EduLevel,
    /// Context the event happened in
    pub context_id: u64,
    /// Acting user, if any
    pub user_id: Option<u64>,
    /// Course, if any
    pub course_id: Option<u64>,
    /// Event specific data
    pub other: JsonValue,
    /// Human readable description
    pub description: String,
    /// Creation time
    pub time_created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_codes() {
        assert_eq!(Crud::Create.as_char(), 'c');
        assert_eq!(Crud::try_from('d'), Ok(Crud::Delete));
        assert!(Crud::try_from('x').is_err());
    }

    #[test]
    fn edulevel_serializes_as_number() {
        let json = serde_json::to_string(&EduLevel::Other).unwrap();
        assert_eq!(json, "0");
        let back: EduLevel = serde_json::from_str("2").unwrap();
        assert_eq!(back, EduLevel::Participating);
    }

    #[test]
    fn crud_serializes_as_letter() {
        let json = serde_json::to_string(&Crud::Create).unwrap();
        assert_eq!(json, "\"c\"");
    }
}
