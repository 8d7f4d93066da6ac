// ── Team domain types ──
//
// A team is the unit every cache category hangs off. The backend may ship
// category arrays inline on the team object; `TeamPayload` captures that
// wire shape while `Team` is what the cache keeps.

use serde::{Deserialize, Serialize};

use super::calendar::Calendar;
use super::club::{ClubAttendanceEvent, ClubGroup, ClubMember, ClubPresenceEvent};
use super::id::Id;
use super::member::{Invite, Member};
use super::todolist::Todolist;
use super::worksession::Worksession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub club: Option<Club>,
    #[serde(default)]
    pub membercount: u32,
    /// The requesting user's own membership in this team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
}

impl Team {
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            club: None,
            membercount: 0,
            member: None,
        }
    }

    /// Whether the requesting user may administrate this team.
    pub fn is_admin(&self) -> bool {
        self.member.as_ref().is_some_and(Member::is_admin)
    }

    pub fn has_club(&self) -> bool {
        self.club.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub membercount: u32,
}

/// A team as shipped by the backend: its attributes plus any category
/// arrays the response chose to nest inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPayload {
    #[serde(flatten)]
    pub team: Team,
    #[serde(flatten)]
    pub embedded: EmbeddedCategories,
}

impl TeamPayload {
    pub fn id(&self) -> &Id {
        &self.team.id
    }
}

impl From<Team> for TeamPayload {
    fn from(team: Team) -> Self {
        Self {
            team,
            embedded: EmbeddedCategories::default(),
        }
    }
}

/// Category arrays that may be nested on a team payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedCategories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invites: Option<Vec<Invite>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendars: Option<Vec<Calendar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todolists: Option<Vec<Todolist>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_members: Option<Vec<ClubMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_groups: Option<Vec<ClubGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_attendance_events: Option<Vec<ClubAttendanceEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_presence_events: Option<Vec<ClubPresenceEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me_worksessions: Option<Vec<Worksession>>,
}

impl EmbeddedCategories {
    pub fn is_empty(&self) -> bool {
        self.members.is_none()
            && self.invites.is_none()
            && self.calendars.is_none()
            && self.todolists.is_none()
            && self.club_members.is_none()
            && self.club_groups.is_none()
            && self.club_attendance_events.is_none()
            && self.club_presence_events.is_none()
            && self.me_worksessions.is_none()
    }
}

/// Response of the team listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamList {
    pub teams: Vec<TeamPayload>,
    #[serde(rename = "defaultTeamId")]
    pub default_team_id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubRequest {
    pub name: String,
    pub description: String,
    pub slug: String,
}
