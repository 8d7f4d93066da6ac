// Integration tests for command execution and cache merges.

#![allow(clippy::unwrap_used)]

mod common;

use pretty_assertions::assert_eq;

use common::{
    calendar, club_group, club_member, club_team, event, id, members, service, team, todo_item,
    todolist, worksession, MockBackend,
};
use teamized_core::model::{
    CalendarEventRequest, ClubMemberRequest, ClubRequest, InviteRequest, MemberRequest,
    TeamRequest, TodolistItemRequest,
};
use teamized_core::{
    BackendError, CacheCategory, CacheService, Calendar, CategoryPayload, ClubGroup, ClubMember,
    Command, CommandResult, CoreError, Invite, Member, MemberRole, Todolist, Worksession,
};

fn event_request() -> CalendarEventRequest {
    serde_json::from_value(serde_json::json!({
        "name": "Standup",
        "description": "",
        "location": "",
        "fullday": false,
        "dtstart": "2024-05-01T09:00:00",
        "dtend": "2024-05-01T09:15:00",
    }))
    .unwrap()
}

fn club_member_request() -> ClubMemberRequest {
    serde_json::from_value(serde_json::json!({
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "birth_date": null,
    }))
    .unwrap()
}

// ── Teams ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_team_adds_and_selects_it() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::Team(team("new")));
    let (cache, _) = service(&backend);
    cache.add_team(team("old"));
    cache.switch_team(id("old"));

    cache
        .execute(Command::CreateTeam {
            data: TeamRequest {
                name: "New".into(),
                description: String::new(),
            },
        })
        .await
        .unwrap();

    assert_eq!(cache.selected_team_id(), Some(id("new")));
    assert!(cache.get_team_data(&id("new")).is_some());
    assert_eq!(backend.executed().len(), 1);
}

#[tokio::test]
async fn update_team_keeps_cached_categories() {
    let backend = MockBackend::new();
    let mut renamed = team("t1");
    renamed.team.name = "Renamed".into();
    backend.respond(CommandResult::Team(renamed));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));
    cache.replace_team_cache_category(&id("t1"), members(&["m1"]));

    cache
        .execute(Command::UpdateTeam {
            team_id: id("t1"),
            data: TeamRequest::default(),
        })
        .await
        .unwrap();

    let entry = cache.get_team_data(&id("t1")).unwrap();
    assert_eq!(entry.team().name, "Renamed");
    assert_eq!(entry.members().len(), 1);
}

#[tokio::test]
async fn leaving_selected_team_falls_back_to_default() {
    let backend = MockBackend::new();
    let (cache, _) = service(&backend);
    cache.update_teams_cache(vec![team("a"), team("b")], id("a"));
    cache.switch_team(id("b"));

    cache
        .execute(Command::LeaveTeam { team_id: id("b") })
        .await
        .unwrap();

    assert!(cache.get_team_data(&id("b")).is_none());
    assert_eq!(cache.selected_team_id(), Some(id("a")));
}

#[tokio::test]
async fn deleting_only_team_reloads_and_reselects() {
    let backend = MockBackend::new();
    backend.set_teams(vec![team("fresh")], "fresh");
    let (cache, _) = service(&backend);
    cache.update_teams_cache(vec![team("only")], id("only"));
    cache.switch_team(id("only"));

    cache
        .execute(Command::DeleteTeam { team_id: id("only") })
        .await
        .unwrap();

    assert_eq!(backend.lists(), 1);
    assert_eq!(cache.selected_team_id(), Some(id("fresh")));
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn rejected_command_leaves_cache_untouched() {
    let backend = MockBackend::new();
    backend.reject(BackendError::Unauthorized);
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));
    cache.replace_team_cache_category(&id("t1"), members(&["m1"]));

    let err = cache
        .execute(Command::DeleteMember {
            team_id: id("t1"),
            member_id: id("m1"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Unauthorized));
    assert_eq!(cache.items::<Member>(&id("t1")).unwrap().len(), 1);
}

#[tokio::test]
async fn wrong_result_shape_is_unexpected_response() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::Member(Member::new("m1")));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));

    let err = cache
        .execute(Command::CreateInvite {
            team_id: id("t1"),
            data: InviteRequest::default(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::UnexpectedResponse {
            operation: "create_invite"
        }
    ));
    assert!(cache.items::<Invite>(&id("t1")).unwrap().is_empty());
}

// ── Members ─────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_member_decrements_membercount() {
    let backend = MockBackend::new();
    let (cache, _) = service(&backend);
    let mut payload = team("t1");
    payload.team.membercount = 2;
    cache.add_team(payload);
    cache.replace_team_cache_category(&id("t1"), members(&["m1", "m2"]));

    cache
        .execute(Command::DeleteMember {
            team_id: id("t1"),
            member_id: id("m1"),
        })
        .await
        .unwrap();

    let entry = cache.get_team_data(&id("t1")).unwrap();
    assert_eq!(entry.team().membercount, 1);
    assert!(!entry.members().contains("m1"));
}

// ── Calendars ───────────────────────────────────────────────────────

#[tokio::test]
async fn events_are_merged_into_their_calendar() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::CalendarEvent(event("e1")));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));
    cache.replace_team_cache_category(&id("t1"), CategoryPayload::Calendars(vec![calendar("c1")]));

    cache
        .execute(Command::CreateEvent {
            team_id: id("t1"),
            calendar_id: id("c1"),
            data: event_request(),
        })
        .await
        .unwrap();
    let c1 = cache.item::<Calendar>(&id("t1"), &id("c1")).unwrap();
    assert!(c1.events.contains_key("e1"));

    cache
        .execute(Command::DeleteEvent {
            team_id: id("t1"),
            calendar_id: id("c1"),
            event_id: id("e1"),
        })
        .await
        .unwrap();
    let c1 = cache.item::<Calendar>(&id("t1"), &id("c1")).unwrap();
    assert!(c1.events.is_empty());
}

#[tokio::test]
async fn move_event_relocates_between_calendars() {
    let backend = MockBackend::new();
    let mut source = calendar("c1");
    source.events.insert(id("e1"), event("e1"));
    backend.respond(CommandResult::CalendarEvent(event("e1")));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));
    cache.replace_team_cache_category(
        &id("t1"),
        CategoryPayload::Calendars(vec![source, calendar("c2")]),
    );

    cache
        .execute(Command::MoveEvent {
            team_id: id("t1"),
            from_calendar_id: id("c1"),
            to_calendar_id: id("c2"),
            event_id: id("e1"),
        })
        .await
        .unwrap();

    let c1 = cache.item::<Calendar>(&id("t1"), &id("c1")).unwrap();
    let c2 = cache.item::<Calendar>(&id("t1"), &id("c2")).unwrap();
    assert!(c1.events.is_empty());
    assert!(c2.events.contains_key("e1"));
}

// ── To-do lists and working time ────────────────────────────────────

#[tokio::test]
async fn todolist_items_are_merged_into_their_list() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::TodolistItem(todo_item("i1")));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));
    cache.replace_team_cache_category(&id("t1"), CategoryPayload::Todolists(vec![todolist("l1")]));

    cache
        .execute(Command::CreateTodolistItem {
            team_id: id("t1"),
            todolist_id: id("l1"),
            data: TodolistItemRequest {
                name: "Write tests".into(),
                description: None,
                done: None,
            },
        })
        .await
        .unwrap();

    let list = cache.item::<Todolist>(&id("t1"), &id("l1")).unwrap();
    assert_eq!(list.items.len(), 1);
}

#[tokio::test]
async fn tracking_upserts_worksession() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::Worksession(worksession("w1", "t1")));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));

    cache
        .execute(Command::StartTracking { team_id: id("t1") })
        .await
        .unwrap();

    let sessions = cache.items::<Worksession>(&id("t1")).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].team_id, id("t1"));
}

// ── Club ────────────────────────────────────────────────────────────

#[tokio::test]
async fn club_lifecycle_updates_team_record() {
    let backend = MockBackend::new();
    let club = club_team("t1", 0).team.club.unwrap();
    backend.respond(CommandResult::Club(club.clone()));
    let (cache, _) = service(&backend);
    cache.add_team(team("t1"));
    cache.replace_team_cache_category(
        &id("t1"),
        CategoryPayload::ClubMembers(vec![club_member("c1")]),
    );

    cache
        .execute(Command::CreateClub {
            team_id: id("t1"),
            data: ClubRequest::default(),
        })
        .await
        .unwrap();
    assert_eq!(cache.get_team_data(&id("t1")).unwrap().team().club, Some(club));

    cache
        .execute(Command::DeleteClub { team_id: id("t1") })
        .await
        .unwrap();
    let entry = cache.get_team_data(&id("t1")).unwrap();
    assert!(!entry.team().has_club());
    assert!(entry.club_members().is_empty());
}

#[tokio::test]
async fn club_member_changes_track_count_and_groups() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::ClubMember(club_member("c2")));
    let (cache, _) = service(&backend);
    cache.add_team(club_team("t1", 1));
    cache.replace_team_cache_category(
        &id("t1"),
        CategoryPayload::ClubMembers(vec![club_member("c1")]),
    );
    cache.replace_team_cache_category(
        &id("t1"),
        CategoryPayload::ClubGroups(vec![club_group("g1", &["c1"]), club_group("g2", &["c1"])]),
    );

    cache
        .execute(Command::CreateClubMember {
            team_id: id("t1"),
            data: club_member_request(),
        })
        .await
        .unwrap();
    let club_count = |cache: &CacheService| {
        cache
            .get_team_data(&id("t1"))
            .unwrap()
            .team()
            .club
            .as_ref()
            .unwrap()
            .membercount
    };
    assert_eq!(club_count(&cache), 2);

    cache
        .execute(Command::DeleteClubMember {
            team_id: id("t1"),
            member_id: id("c1"),
        })
        .await
        .unwrap();

    assert_eq!(club_count(&cache), 1);
    assert!(cache.item::<ClubMember>(&id("t1"), &id("c1")).is_none());
    for group in cache.items::<ClubGroup>(&id("t1")).unwrap() {
        assert!(group.memberids.is_empty(), "{} still lists c1", group.id);
    }
}

#[tokio::test]
async fn group_membership_commands_edit_memberids() {
    let backend = MockBackend::new();
    let (cache, _) = service(&backend);
    cache.add_team(club_team("t1", 0));
    cache.replace_team_cache_category(
        &id("t1"),
        CategoryPayload::ClubGroups(vec![club_group("g1", &[])]),
    );

    let add = Command::AddClubMemberToGroup {
        team_id: id("t1"),
        member_id: id("c1"),
        group_id: id("g1"),
    };
    cache.execute(add.clone()).await.unwrap();
    cache.execute(add).await.unwrap();
    let group = cache.item::<ClubGroup>(&id("t1"), &id("g1")).unwrap();
    assert_eq!(group.memberids, vec![id("c1")]);

    cache
        .execute(Command::RemoveClubMemberFromGroup {
            team_id: id("t1"),
            member_id: id("c1"),
            group_id: id("g1"),
        })
        .await
        .unwrap();
    let group = cache.item::<ClubGroup>(&id("t1"), &id("g1")).unwrap();
    assert!(group.memberids.is_empty());
}

#[tokio::test]
async fn merges_for_uncached_team_are_ignored() {
    let backend = MockBackend::new();
    backend.respond(CommandResult::Member(Member::new("m1")));
    let (cache, _) = service(&backend);

    let result = cache
        .execute(Command::UpdateMember {
            team_id: id("ghost"),
            member_id: id("m1"),
            data: MemberRequest {
                role: MemberRole::Admin,
            },
        })
        .await
        .unwrap();

    assert_eq!(result, CommandResult::Member(Member::new("m1")));
    assert!(cache.get_team_data(&id("ghost")).is_none());
    assert!(cache.category_state(&id("ghost"), CacheCategory::Members).is_none());
}
