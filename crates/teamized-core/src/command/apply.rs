// ── Command execution and cache merge ──
//
// Runs a command against the backend, then folds the confirmed result
// into the store. Nothing is written before the backend has answered.

use tracing::debug;

use super::{Command, CommandResult};
use crate::error::CoreError;
use crate::model::{
    Calendar, CalendarEvent, ClubAttendanceEvent, ClubGroup, ClubMember, ClubPresenceEvent, Id,
    Invite, Member, Todolist, Worksession,
};
use crate::service::CacheService;

/// Take the expected variant out of a command result, or report the
/// response as unexpected for this command.
macro_rules! expect_result {
    ($result:expr, $variant:ident, $command:expr) => {
        match $result {
            CommandResult::$variant(value) => value.clone(),
            _ => {
                return Err(CoreError::UnexpectedResponse {
                    operation: $command.name(),
                });
            }
        }
    };
}

impl CacheService {
    /// Execute a command against the backend and merge what it confirmed
    /// into the cache.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        debug!(command = command.name(), team_id = ?command.team_id(), "executing command");
        let result = self.backend().execute(&command).await?;
        self.merge(&command, &result).await?;
        Ok(result)
    }

    #[allow(clippy::too_many_lines)]
    async fn merge(&self, command: &Command, result: &CommandResult) -> Result<(), CoreError> {
        let store = self.store();

        match command {
            // ── Teams ────────────────────────────────────────────────
            Command::CreateTeam { .. } => {
                let team = expect_result!(result, Team, command);
                let id = team.id().clone();
                store.add_team(team);
                store.switch_team(id);
            }
            Command::UpdateTeam { .. } => {
                let team = expect_result!(result, Team, command);
                store.update_team(team);
            }
            Command::DeleteTeam { team_id } | Command::LeaveTeam { team_id } => {
                self.delete_team(team_id).await?;
                self.ensure_existing_team();
            }

            // ── Members and invites ──────────────────────────────────
            Command::UpdateMember { team_id, .. } => {
                let member = expect_result!(result, Member, command);
                store.upsert_item(team_id.as_str(), member);
            }
            Command::DeleteMember { team_id, member_id } => {
                store.remove_item::<Member>(team_id.as_str(), member_id.as_str());
                store.modify_team(team_id.as_str(), |team| {
                    team.membercount = team.membercount.saturating_sub(1);
                });
            }
            Command::CreateInvite { team_id, .. } | Command::UpdateInvite { team_id, .. } => {
                let invite = expect_result!(result, Invite, command);
                store.upsert_item(team_id.as_str(), invite);
            }
            Command::DeleteInvite { team_id, invite_id } => {
                store.remove_item::<Invite>(team_id.as_str(), invite_id.as_str());
            }

            // ── Calendars ────────────────────────────────────────────
            Command::CreateCalendar { team_id, .. } | Command::UpdateCalendar { team_id, .. } => {
                let calendar = expect_result!(result, Calendar, command);
                store.upsert_item(team_id.as_str(), calendar);
            }
            Command::DeleteCalendar {
                team_id,
                calendar_id,
            } => {
                store.remove_item::<Calendar>(team_id.as_str(), calendar_id.as_str());
            }
            Command::CreateEvent {
                team_id,
                calendar_id,
                ..
            }
            | Command::UpdateEvent {
                team_id,
                calendar_id,
                ..
            } => {
                let event = expect_result!(result, CalendarEvent, command);
                store.modify_item::<Calendar, _>(
                    team_id.as_str(),
                    calendar_id.as_str(),
                    |calendar| calendar.events.insert(event.id.clone(), event),
                );
            }
            Command::DeleteEvent {
                team_id,
                calendar_id,
                event_id,
            } => {
                store.modify_item::<Calendar, _>(
                    team_id.as_str(),
                    calendar_id.as_str(),
                    |calendar| calendar.events.shift_remove(event_id),
                );
            }
            Command::MoveEvent {
                team_id,
                from_calendar_id,
                to_calendar_id,
                event_id,
            } => {
                let event = expect_result!(result, CalendarEvent, command);
                move_event(self, team_id, from_calendar_id, to_calendar_id, event_id, event);
            }

            // ── To-do lists ──────────────────────────────────────────
            Command::CreateTodolist { team_id, .. } | Command::UpdateTodolist { team_id, .. } => {
                let todolist = expect_result!(result, Todolist, command);
                store.upsert_item(team_id.as_str(), todolist);
            }
            Command::DeleteTodolist {
                team_id,
                todolist_id,
            } => {
                store.remove_item::<Todolist>(team_id.as_str(), todolist_id.as_str());
            }
            Command::CreateTodolistItem {
                team_id,
                todolist_id,
                ..
            }
            | Command::UpdateTodolistItem {
                team_id,
                todolist_id,
                ..
            } => {
                let item = expect_result!(result, TodolistItem, command);
                store.modify_item::<Todolist, _>(
                    team_id.as_str(),
                    todolist_id.as_str(),
                    |todolist| todolist.items.insert(item.id.clone(), item),
                );
            }
            Command::DeleteTodolistItem {
                team_id,
                todolist_id,
                item_id,
            } => {
                store.modify_item::<Todolist, _>(
                    team_id.as_str(),
                    todolist_id.as_str(),
                    |todolist| todolist.items.shift_remove(item_id),
                );
            }

            // ── Working time ─────────────────────────────────────────
            Command::CreateWorksession { team_id, .. }
            | Command::UpdateWorksession { team_id, .. }
            | Command::StartTracking { team_id }
            | Command::StopTracking { team_id } => {
                let session = expect_result!(result, Worksession, command);
                store.upsert_item(team_id.as_str(), session);
            }
            Command::DeleteWorksession {
                team_id,
                worksession_id,
            } => {
                store.remove_item::<Worksession>(team_id.as_str(), worksession_id.as_str());
            }

            // ── Club ─────────────────────────────────────────────────
            Command::CreateClub { team_id, .. } | Command::UpdateClub { team_id, .. } => {
                let club = expect_result!(result, Club, command);
                store.modify_team(team_id.as_str(), |team| team.club = Some(club));
            }
            Command::DeleteClub { team_id } => {
                store.modify_team(team_id.as_str(), |team| team.club = None);
                store.clear_items::<ClubMember>(team_id.as_str());
            }
            Command::CreateClubMember { team_id, .. } => {
                let member = expect_result!(result, ClubMember, command);
                store.upsert_item(team_id.as_str(), member);
                adjust_club_membercount(self, team_id, |count| count.saturating_add(1));
            }
            Command::UpdateClubMember { team_id, .. } => {
                let member = expect_result!(result, ClubMember, command);
                store.upsert_item(team_id.as_str(), member);
            }
            Command::DeleteClubMember { team_id, member_id } => {
                store.remove_item::<ClubMember>(team_id.as_str(), member_id.as_str());
                adjust_club_membercount(self, team_id, |count| count.saturating_sub(1));
                store.modify_items::<ClubGroup>(team_id.as_str(), |group| {
                    group.memberids.retain(|id| id != member_id);
                });
            }
            Command::CreateClubGroup { team_id, .. } | Command::UpdateClubGroup { team_id, .. } => {
                let group = expect_result!(result, ClubGroup, command);
                store.upsert_item(team_id.as_str(), group);
            }
            Command::DeleteClubGroup { team_id, group_id } => {
                store.remove_item::<ClubGroup>(team_id.as_str(), group_id.as_str());
            }
            Command::AddClubMemberToGroup {
                team_id,
                member_id,
                group_id,
            } => {
                store.modify_item::<ClubGroup, _>(team_id.as_str(), group_id.as_str(), |group| {
                    if !group.memberids.contains(member_id) {
                        group.memberids.push(member_id.clone());
                    }
                });
            }
            Command::RemoveClubMemberFromGroup {
                team_id,
                member_id,
                group_id,
            } => {
                store.modify_item::<ClubGroup, _>(team_id.as_str(), group_id.as_str(), |group| {
                    group.memberids.retain(|id| id != member_id);
                });
            }
            Command::CreateAttendanceEvent { team_id, .. }
            | Command::UpdateAttendanceEvent { team_id, .. } => {
                let event = expect_result!(result, ClubAttendanceEvent, command);
                store.upsert_item(team_id.as_str(), event);
            }
            Command::DeleteAttendanceEvent { team_id, event_id } => {
                store.remove_item::<ClubAttendanceEvent>(team_id.as_str(), event_id.as_str());
            }
            Command::CreatePresenceEvent { team_id, .. }
            | Command::UpdatePresenceEvent { team_id, .. } => {
                let event = expect_result!(result, ClubPresenceEvent, command);
                store.upsert_item(team_id.as_str(), event);
            }
            Command::DeletePresenceEvent { team_id, event_id } => {
                store.remove_item::<ClubPresenceEvent>(team_id.as_str(), event_id.as_str());
            }
        }

        Ok(())
    }
}

/// Move an event between two calendars of the same team in one write.
fn move_event(
    service: &CacheService,
    team_id: &Id,
    from: &Id,
    to: &Id,
    event_id: &Id,
    event: CalendarEvent,
) {
    service
        .store()
        .modify_category::<Calendar, _>(team_id.as_str(), |calendars| {
            if let Some(source) = calendars.get_mut(from.as_str()) {
                source.events.shift_remove(event_id);
            }
            match calendars.get_mut(to.as_str()) {
                Some(target) => {
                    target.events.insert(event.id.clone(), event);
                }
                None => debug!(calendar_id = %to, "move target calendar not cached"),
            }
        });
}

fn adjust_club_membercount(service: &CacheService, team_id: &Id, f: impl FnOnce(u32) -> u32) {
    service.store().modify_team(team_id.as_str(), |team| {
        if let Some(club) = team.club.as_mut() {
            club.membercount = f(club.membercount);
        }
    });
}
