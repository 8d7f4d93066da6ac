// ── Calendar types ──
//
// Calendar events live nested inside their calendar rather than in a
// category of their own.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::id::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub ics_url: String,
    #[serde(default)]
    pub events: IndexMap<Id, CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub fullday: bool,
    pub dtstart: NaiveDateTime,
    pub dtend: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventRequest {
    pub name: String,
    pub description: String,
    pub location: String,
    pub fullday: bool,
    pub dtstart: NaiveDateTime,
    pub dtend: NaiveDateTime,
}
