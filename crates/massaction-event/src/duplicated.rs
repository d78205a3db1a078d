//! Mass action duplicated event
//!
//! Fired once a bulk duplication of course modules has finished. The `other`
//! payload carries the source to destination module mapping and any error
//! messages collected during the run.

use crate::bus::EventBus;
use crate::error::{EventError, EventResult};
use crate::types::{Crud, EduLevel, EventRecord};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use std::fmt::Write as _;
use uuid::Uuid;

/// Where and by whom an event was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventContext {
    /// Context id
    pub context_id: u64,
    /// Acting user
    pub user_id: Option<u64>,
    /// Course
    pub course_id: Option<u64>,
}

impl EventContext {
    /// Create context for a context id
    #[inline]
    #[must_use]
    pub fn new(context_id: u64) -> Self {
        Self {
            context_id,
            user_id: None,
            course_id: None,
        }
    }

    /// With acting user
    #[inline]
    #[must_use]
    pub fn with_user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// With course
    #[inline]
    #[must_use]
    pub fn with_course(mut self, course_id: u64) -> Self {
        self.course_id = Some(course_id);
        self
    }
}

/// The mass action duplicated event
#[derive(Debug, Clone)]
pub struct MassActionDuplicated {
    event_id: Uuid,
    context: EventContext,
    other: JsonValue,
    cms: IndexMap<String, String>,
    errors: Vec<String>,
    time_created: DateTime<Utc>,
}

impl MassActionDuplicated {
    /// Fully qualified event name
    pub const EVENT_NAME: &'static str = "\\block_massaction\\event\\massaction_duplicated";
    /// Owning component
    pub const COMPONENT: &'static str = "block_massaction";
    /// Action verb
    pub const ACTION: &'static str = "duplicated";
    /// Target noun
    pub const TARGET: &'static str = "massaction";
    /// CRUD classification
    pub const CRUD: Crud = Crud::Create;
    /// Educational level
    pub const EDULEVEL: EduLevel = EduLevel::Other;

    /// Create the event from a raw `other` payload
    ///
    /// # Errors
    /// Returns [`EventError::InvalidPayload`] if `other.cms` is missing or not
    /// a mapping, or if `other.errors` is not a list of strings
    pub fn create(context: EventContext, other: JsonValue) -> EventResult<Self> {
        let (cms, errors) = parse_other(&other)?;
        Ok(Self {
            event_id: Uuid::new_v4(),
            context,
            other,
            cms,
            errors,
            time_created: Utc::now(),
        })
    }

    /// Create the event from typed duplication results
    #[must_use]
    pub fn from_duplication<I>(context: EventContext, cms: I, errors: Vec<String>) -> Self
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut map = Map::new();
        let mut rendered = IndexMap::new();
        for (src, dst) in cms {
            map.insert(src.to_string(), JsonValue::from(dst));
            rendered.insert(src.to_string(), dst.to_string());
        }

        let mut other = Map::new();
        other.insert("cms".to_string(), JsonValue::Object(map));
        other.insert(
            "errors".to_string(),
            JsonValue::Array(errors.iter().cloned().map(JsonValue::String).collect()),
        );

        Self {
            event_id: Uuid::new_v4(),
            context,
            other: JsonValue::Object(other),
            cms: rendered,
            errors,
            time_created: Utc::now(),
        }
    }

    /// Localised event name
    #[inline]
    #[must_use]
    pub fn name() -> &'static str {
        "Mass action duplicated"
    }

    /// Human readable description
    #[must_use]
    pub fn description(&self) -> String {
        let cms: Vec<String> = self
            .cms
            .iter()
            .map(|(src, dst)| format!("cmid from '{src}' to '{dst}'"))
            .collect();

        let mut description = format!("Mass action duplicate has been completed. {}", cms.join(", "));
        if !self.errors.is_empty() {
            let _ = write!(description, " with error '{}'", self.errors.join("','"));
        }
        description
    }

    /// Unique event id
    #[inline]
    #[must_use]
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Event context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &EventContext {
        &self.context
    }

    /// Raw `other` payload
    #[inline]
    #[must_use]
    pub fn other(&self) -> &JsonValue {
        &self.other
    }

    /// Source to destination module mapping
    #[inline]
    #[must_use]
    pub fn cms(&self) -> &IndexMap<String, String> {
        &self.cms
    }

    /// Errors collected during duplication
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Creation time
    #[inline]
    #[must_use]
    pub fn time_created(&self) -> DateTime<Utc> {
        self.time_created
    }

    /// Build the record handed to a bus
    #[must_use]
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            event_id: self.event_id,
            event_name: Self::EVENT_NAME.to_string(),
            component: Self::COMPONENT.to_string(),
            action: Self::ACTION.to_string(),
            target: Self::TARGET.to_string(),
            crud: Self::CRUD,
            edulevel: Self::EDULEVEL,
            context_id: self.context.context_id,
            user_id: self.context.user_id,
            course_id: self.context.course_id,
            other: self.other.clone(),
            description: self.description(),
            time_created: self.time_created,
        }
    }

    /// Dispatch the event
    ///
    /// The payload was validated when the event was built, so only the bus
    /// can fail here.
    ///
    /// # Errors
    /// Returns whatever the bus reports
    pub fn trigger<B: EventBus + ?Sized>(&self, bus: &B) -> EventResult<()> {
        let record = self.to_record();
        tracing::debug!(event_id = %record.event_id, cms = self.cms.len(), "Triggering {}", Self::EVENT_NAME);
        bus.emit(record)
    }
}

/// Extract the module mapping and error list from `other`
fn parse_other(other: &JsonValue) -> EventResult<(IndexMap<String, String>, Vec<String>)> {
    let cms = match other.get("cms") {
        Some(JsonValue::Object(map)) => map,
        _ => {
            return Err(EventError::invalid_payload(
                "The 'cms' value must be a mapping and set in other.",
            ))
        }
    };

    let mut rendered = IndexMap::with_capacity(cms.len());
    for (src, dst) in cms {
        let dst = match dst {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) if n.is_u64() || n.is_i64() => n.to_string(),
            _ => {
                return Err(EventError::invalid_payload(format!(
                    "The 'cms' entry for '{src}' must be a module id."
                )))
            }
        };
        rendered.insert(src.clone(), dst);
    }

    let errors = match other.get("errors") {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    EventError::invalid_payload("The 'errors' value must only contain strings.")
                })
            })
            .collect::<EventResult<Vec<_>>>()?,
        Some(_) => {
            return Err(EventError::invalid_payload(
                "The 'errors' value must be a list in other.",
            ))
        }
    };

    Ok((rendered, errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn description_without_errors() {
        let event = MassActionDuplicated::create(
            EventContext::new(1),
            json!({ "cms": { "12": "45", "13": "46" }, "errors": [] }),
        )
        .unwrap();

        assert_eq!(
            event.description(),
            "Mass action duplicate has been completed. cmid from '12' to '45', cmid from '13' to '46'"
        );
    }

    #[test]
    fn description_with_errors() {
        let event = MassActionDuplicated::create(
            EventContext::new(1),
            json!({ "cms": { "12": 45 }, "errors": ["quiz failed", "forum failed"] }),
        )
        .unwrap();

        assert_eq!(
            event.description(),
            "Mass action duplicate has been completed. cmid from '12' to '45' with error 'quiz failed','forum failed'"
        );
    }

    #[test]
    fn missing_cms_rejected() {
        let err = MassActionDuplicated::create(EventContext::new(1), json!({ "errors": [] }))
            .unwrap_err();
        assert!(err.is_coding_error());
    }

    #[test]
    fn non_mapping_cms_rejected() {
        for other in [json!({ "cms": [12, 45] }), json!({ "cms": "12" }), json!(null)] {
            let err = MassActionDuplicated::create(EventContext::new(1), other).unwrap_err();
            assert!(matches!(err, EventError::InvalidPayload(_)));
        }
    }

    #[test]
    fn missing_errors_treated_as_empty() {
        let event =
            MassActionDuplicated::create(EventContext::new(1), json!({ "cms": {} })).unwrap();
        assert!(event.errors().is_empty());
        assert_eq!(event.description(), "Mass action duplicate has been completed. ");
    }

    #[test]
    fn non_string_error_rejected() {
        let err = MassActionDuplicated::create(
            EventContext::new(1),
            json!({ "cms": {}, "errors": [1] }),
        )
        .unwrap_err();
        assert!(err.is_coding_error());
    }

    #[test]
    fn from_duplication_keeps_order() {
        let event = MassActionDuplicated::from_duplication(
            EventContext::new(7).with_course(3),
            vec![(20, 90), (5, 91)],
            Vec::new(),
        );

        let keys: Vec<&str> = event.cms().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["20", "5"]);
        assert!(parse_other(event.other()).is_ok());
        assert_eq!(event.other()["cms"]["20"], json!(90));
    }

    #[test]
    fn record_carries_fixed_fields() {
        let event = MassActionDuplicated::from_duplication(
            EventContext::new(7).with_user(2),
            vec![(1, 2)],
            Vec::new(),
        );
        let record = event.to_record();

        assert_eq!(record.event_name, MassActionDuplicated::EVENT_NAME);
        assert_eq!(record.crud, Crud::Create);
        assert_eq!(record.edulevel, EduLevel::Other);
        assert_eq!(record.user_id, Some(2));
        assert_eq!(record.description, event.description());
    }
}
