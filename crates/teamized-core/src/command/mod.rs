// ── Command API ──
//
// Every create/update/delete flow is a `Command`. The backend performs it
// and reports a `CommandResult`; only a confirmed result is merged into
// the cache (see `apply`).

mod apply;

use crate::model::{
    CalendarEventRequest, CalendarRequest, ClubEventRequest, ClubGroupRequest, ClubMemberRequest,
    ClubRequest, Id, InviteRequest, MemberRequest, TeamRequest, TodolistItemRequest,
    TodolistRequest, WorksessionRequest,
};
use crate::model::{
    Calendar, CalendarEvent, Club, ClubAttendanceEvent, ClubGroup, ClubMember, ClubPresenceEvent,
    Invite, Member, TeamPayload, Todolist, TodolistItem, Worksession,
};

/// All write operations against the team backend.
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    // ── Teams ────────────────────────────────────────────────────────
    CreateTeam {
        data: TeamRequest,
    },
    UpdateTeam {
        team_id: Id,
        data: TeamRequest,
    },
    DeleteTeam {
        team_id: Id,
    },
    LeaveTeam {
        team_id: Id,
    },

    // ── Members and invites ──────────────────────────────────────────
    UpdateMember {
        team_id: Id,
        member_id: Id,
        data: MemberRequest,
    },
    DeleteMember {
        team_id: Id,
        member_id: Id,
    },
    CreateInvite {
        team_id: Id,
        data: InviteRequest,
    },
    UpdateInvite {
        team_id: Id,
        invite_id: Id,
        data: InviteRequest,
    },
    DeleteInvite {
        team_id: Id,
        invite_id: Id,
    },

    // ── Calendars ────────────────────────────────────────────────────
    CreateCalendar {
        team_id: Id,
        data: CalendarRequest,
    },
    UpdateCalendar {
        team_id: Id,
        calendar_id: Id,
        data: CalendarRequest,
    },
    DeleteCalendar {
        team_id: Id,
        calendar_id: Id,
    },
    CreateEvent {
        team_id: Id,
        calendar_id: Id,
        data: CalendarEventRequest,
    },
    UpdateEvent {
        team_id: Id,
        calendar_id: Id,
        event_id: Id,
        data: CalendarEventRequest,
    },
    DeleteEvent {
        team_id: Id,
        calendar_id: Id,
        event_id: Id,
    },
    MoveEvent {
        team_id: Id,
        from_calendar_id: Id,
        to_calendar_id: Id,
        event_id: Id,
    },

    // ── To-do lists ──────────────────────────────────────────────────
    CreateTodolist {
        team_id: Id,
        data: TodolistRequest,
    },
    UpdateTodolist {
        team_id: Id,
        todolist_id: Id,
        data: TodolistRequest,
    },
    DeleteTodolist {
        team_id: Id,
        todolist_id: Id,
    },
    CreateTodolistItem {
        team_id: Id,
        todolist_id: Id,
        data: TodolistItemRequest,
    },
    UpdateTodolistItem {
        team_id: Id,
        todolist_id: Id,
        item_id: Id,
        data: TodolistItemRequest,
    },
    DeleteTodolistItem {
        team_id: Id,
        todolist_id: Id,
        item_id: Id,
    },

    // ── Working time ─────────────────────────────────────────────────
    CreateWorksession {
        team_id: Id,
        data: WorksessionRequest,
    },
    UpdateWorksession {
        team_id: Id,
        worksession_id: Id,
        data: WorksessionRequest,
    },
    DeleteWorksession {
        team_id: Id,
        worksession_id: Id,
    },
    StartTracking {
        team_id: Id,
    },
    StopTracking {
        team_id: Id,
    },

    // ── Club ─────────────────────────────────────────────────────────
    CreateClub {
        team_id: Id,
        data: ClubRequest,
    },
    UpdateClub {
        team_id: Id,
        data: ClubRequest,
    },
    DeleteClub {
        team_id: Id,
    },
    CreateClubMember {
        team_id: Id,
        data: ClubMemberRequest,
    },
    UpdateClubMember {
        team_id: Id,
        member_id: Id,
        data: ClubMemberRequest,
    },
    DeleteClubMember {
        team_id: Id,
        member_id: Id,
    },
    CreateClubGroup {
        team_id: Id,
        data: ClubGroupRequest,
    },
    UpdateClubGroup {
        team_id: Id,
        group_id: Id,
        data: ClubGroupRequest,
    },
    DeleteClubGroup {
        team_id: Id,
        group_id: Id,
    },
    AddClubMemberToGroup {
        team_id: Id,
        member_id: Id,
        group_id: Id,
    },
    RemoveClubMemberFromGroup {
        team_id: Id,
        member_id: Id,
        group_id: Id,
    },
    CreateAttendanceEvent {
        team_id: Id,
        data: ClubEventRequest,
    },
    UpdateAttendanceEvent {
        team_id: Id,
        event_id: Id,
        data: ClubEventRequest,
    },
    DeleteAttendanceEvent {
        team_id: Id,
        event_id: Id,
    },
    CreatePresenceEvent {
        team_id: Id,
        data: ClubEventRequest,
    },
    UpdatePresenceEvent {
        team_id: Id,
        event_id: Id,
        data: ClubEventRequest,
    },
    DeletePresenceEvent {
        team_id: Id,
        event_id: Id,
    },
}

impl Command {
    /// Snake-case operation name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The team the command acts on. `None` only for team creation.
    pub fn team_id(&self) -> Option<&Id> {
        match self {
            Self::CreateTeam { .. } => None,
            Self::UpdateTeam { team_id, .. }
            | Self::DeleteTeam { team_id }
            | Self::LeaveTeam { team_id }
            | Self::UpdateMember { team_id, .. }
            | Self::DeleteMember { team_id, .. }
            | Self::CreateInvite { team_id, .. }
            | Self::UpdateInvite { team_id, .. }
            | Self::DeleteInvite { team_id, .. }
            | Self::CreateCalendar { team_id, .. }
            | Self::UpdateCalendar { team_id, .. }
            | Self::DeleteCalendar { team_id, .. }
            | Self::CreateEvent { team_id, .. }
            | Self::UpdateEvent { team_id, .. }
            | Self::DeleteEvent { team_id, .. }
            | Self::MoveEvent { team_id, .. }
            | Self::CreateTodolist { team_id, .. }
            | Self::UpdateTodolist { team_id, .. }
            | Self::DeleteTodolist { team_id, .. }
            | Self::CreateTodolistItem { team_id, .. }
            | Self::UpdateTodolistItem { team_id, .. }
            | Self::DeleteTodolistItem { team_id, .. }
            | Self::CreateWorksession { team_id, .. }
            | Self::UpdateWorksession { team_id, .. }
            | Self::DeleteWorksession { team_id, .. }
            | Self::StartTracking { team_id }
            | Self::StopTracking { team_id }
            | Self::CreateClub { team_id, .. }
            | Self::UpdateClub { team_id, .. }
            | Self::DeleteClub { team_id }
            | Self::CreateClubMember { team_id, .. }
            | Self::UpdateClubMember { team_id, .. }
            | Self::DeleteClubMember { team_id, .. }
            | Self::CreateClubGroup { team_id, .. }
            | Self::UpdateClubGroup { team_id, .. }
            | Self::DeleteClubGroup { team_id, .. }
            | Self::AddClubMemberToGroup { team_id, .. }
            | Self::RemoveClubMemberFromGroup { team_id, .. }
            | Self::CreateAttendanceEvent { team_id, .. }
            | Self::UpdateAttendanceEvent { team_id, .. }
            | Self::DeleteAttendanceEvent { team_id, .. }
            | Self::CreatePresenceEvent { team_id, .. }
            | Self::UpdatePresenceEvent { team_id, .. }
            | Self::DeletePresenceEvent { team_id, .. } => Some(team_id),
        }
    }
}

/// What the backend confirmed for a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok,
    Team(TeamPayload),
    Member(Member),
    Invite(Invite),
    Calendar(Calendar),
    CalendarEvent(CalendarEvent),
    Todolist(Todolist),
    TodolistItem(TodolistItem),
    Worksession(Worksession),
    Club(Club),
    ClubMember(ClubMember),
    ClubGroup(ClubGroup),
    ClubAttendanceEvent(ClubAttendanceEvent),
    ClubPresenceEvent(ClubPresenceEvent),
}
