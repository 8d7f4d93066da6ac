// ── Club types ──
//
// Only teams with a linked club carry data in the club categories.
// Attendance and presence events share a shape but are separate
// categories on the backend.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::id::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubMember {
    pub id: Id,
    #[serde(default)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubGroup {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub memberids: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubAttendanceEvent {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participating_by_default: bool,
    pub dt_start: NaiveDateTime,
    pub dt_end: NaiveDateTime,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubPresenceEvent {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participating_by_default: bool,
    pub dt_start: NaiveDateTime,
    pub dt_end: NaiveDateTime,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubMemberRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubGroupRequest {
    pub name: String,
    pub description: String,
}

/// Request body shared by attendance and presence events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubEventRequest {
    pub title: String,
    pub description: String,
    pub participating_by_default: bool,
    pub dt_start: NaiveDateTime,
    pub dt_end: NaiveDateTime,
    pub points: u32,
    pub locked: bool,
}
