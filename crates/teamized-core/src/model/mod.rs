// ── Domain model ──
//
// Canonical representation of a team and of every object kind that is
// cached per team. Field names follow the backend's JSON so the types
// deserialize straight from its responses.

pub mod id;

pub mod calendar;
pub mod club;
pub mod member;
pub mod team;
pub mod todolist;
pub mod worksession;

// ── Re-exports ──────────────────────────────────────────────────────

pub use id::Id;

pub use team::{Club, ClubRequest, EmbeddedCategories, Team, TeamList, TeamPayload, TeamRequest};

pub use member::{Invite, InviteRequest, Member, MemberRequest, MemberRole, User};

pub use calendar::{Calendar, CalendarEvent, CalendarEventRequest, CalendarRequest};

pub use todolist::{Todolist, TodolistItem, TodolistItemRequest, TodolistRequest};

pub use worksession::{Worksession, WorksessionRequest};

pub use club::{
    ClubAttendanceEvent, ClubEventRequest, ClubGroup, ClubGroupRequest, ClubMember,
    ClubMemberRequest, ClubPresenceEvent,
};
