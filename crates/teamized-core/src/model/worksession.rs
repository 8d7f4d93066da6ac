// ── Working time types ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::id::Id;

/// A tracked or manually entered working session of the requesting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksession {
    pub id: Id,
    pub time_start: NaiveDateTime,
    #[serde(default)]
    pub time_end: Option<NaiveDateTime>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_created_via_tracking: bool,
    #[serde(default)]
    pub is_ended: bool,
    /// Duration in seconds as computed by the backend.
    #[serde(default)]
    pub duration: f64,
    #[serde(rename = "_team_id")]
    pub team_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksessionRequest {
    pub time_start: NaiveDateTime,
    pub time_end: Option<NaiveDateTime>,
    pub note: String,
}
