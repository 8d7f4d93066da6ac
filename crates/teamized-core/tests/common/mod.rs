// Shared fixtures for the integration tests: an in-memory backend and
// builders for the domain objects it serves.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Semaphore;

use teamized_core::{
    BackendError, CacheCategory, CacheConfig, CacheService, Calendar, CalendarEvent,
    CategoryPayload, ClubGroup, ClubMember, Command, CommandResult, Id, Member, Team, TeamList,
    TeamPayload, TeamsBackend, Todolist, TodolistItem, Worksession,
};

// ── Mock backend ────────────────────────────────────────────────────

/// Latch holding fetches back until opened. Once open it stays open.
#[derive(Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    pub fn open(&self) {
        self.0.add_permits(1);
    }

    async fn pass(&self) {
        let _permit = self.0.acquire().await.unwrap();
    }
}

#[derive(Default)]
pub struct MockBackend {
    teams: Mutex<Option<TeamList>>,
    categories: Mutex<HashMap<(Id, CacheCategory), CategoryPayload>>,
    failing: Mutex<HashSet<CacheCategory>>,
    command_results: Mutex<VecDeque<Result<CommandResult, BackendError>>>,
    executed: Mutex<Vec<Command>>,
    gate: Mutex<Option<Gate>>,
    panic_next_fetch: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_teams(&self, teams: Vec<TeamPayload>, default_team_id: &str) {
        *self.teams.lock().unwrap() = Some(TeamList {
            teams,
            default_team_id: Id::from(default_team_id),
        });
    }

    /// Serve `payload` for the given team, keyed by `category`.
    pub fn serve(&self, team_id: &str, category: CacheCategory, payload: CategoryPayload) {
        self.categories
            .lock()
            .unwrap()
            .insert((Id::from(team_id), category), payload);
    }

    pub fn fail(&self, category: CacheCategory) {
        self.failing.lock().unwrap().insert(category);
    }

    pub fn recover(&self, category: CacheCategory) {
        self.failing.lock().unwrap().remove(&category);
    }

    /// Hold every fetch until the returned gate is opened.
    pub fn gate(&self) -> Gate {
        let gate = Gate(Arc::new(Semaphore::new(0)));
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Make the next fetch panic instead of answering.
    pub fn crash_next_fetch(&self) {
        self.panic_next_fetch.store(true, Ordering::SeqCst);
    }

    pub fn respond(&self, result: CommandResult) {
        self.command_results.lock().unwrap().push_back(Ok(result));
    }

    pub fn reject(&self, err: BackendError) {
        self.command_results.lock().unwrap().push_back(Err(err));
    }

    pub fn executed(&self) -> Vec<Command> {
        self.executed.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TeamsBackend for MockBackend {
    async fn list_teams(&self) -> Result<TeamList, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.teams.lock().unwrap().clone().ok_or(BackendError::Http {
            status: 503,
            message: "no team list configured".into(),
        })
    }

    async fn fetch_category(
        &self,
        team_id: &Id,
        category: CacheCategory,
    ) -> Result<CategoryPayload, BackendError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }

        assert!(
            !self.panic_next_fetch.swap(false, Ordering::SeqCst),
            "backend crashed while fetching {category}"
        );

        if self.failing.lock().unwrap().contains(&category) {
            return Err(BackendError::Http {
                status: 500,
                message: format!("{category} unavailable"),
            });
        }

        Ok(self
            .categories
            .lock()
            .unwrap()
            .get(&(team_id.clone(), category))
            .cloned()
            .unwrap_or_else(|| CategoryPayload::empty(category)))
    }

    async fn execute(&self, command: &Command) -> Result<CommandResult, BackendError> {
        self.executed.lock().unwrap().push(command.clone());
        self.command_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(CommandResult::Ok))
    }
}

// ── Service wiring ──────────────────────────────────────────────────

/// Service over `backend` whose render count is observable.
pub fn service(backend: &Arc<MockBackend>) -> (CacheService, Arc<AtomicUsize>) {
    service_with(backend, CacheConfig::default())
}

pub fn service_with(
    backend: &Arc<MockBackend>,
    config: CacheConfig,
) -> (CacheService, Arc<AtomicUsize>) {
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    let service = CacheService::new(
        config,
        Arc::clone(backend) as Arc<dyn TeamsBackend>,
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    (service, renders)
}

pub fn renders(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn id(raw: &str) -> Id {
    Id::from(raw)
}

pub fn team(raw: &str) -> TeamPayload {
    Team::new(raw, format!("Team {raw}")).into()
}

pub fn club_team(raw: &str, club_membercount: u32) -> TeamPayload {
    serde_json::from_value(json!({
        "id": raw,
        "name": format!("Team {raw}"),
        "club": {
            "id": format!("club-{raw}"),
            "name": "Club",
            "membercount": club_membercount,
        },
    }))
    .unwrap()
}

pub fn member(raw: &str) -> Member {
    Member::new(raw)
}

pub fn members(ids: &[&str]) -> CategoryPayload {
    CategoryPayload::Members(ids.iter().copied().map(member).collect())
}

pub fn calendar(raw: &str) -> Calendar {
    serde_json::from_value(json!({ "id": raw, "name": format!("Calendar {raw}") })).unwrap()
}

pub fn event(raw: &str) -> CalendarEvent {
    serde_json::from_value(json!({
        "id": raw,
        "name": format!("Event {raw}"),
        "dtstart": "2024-05-01T09:00:00",
        "dtend": "2024-05-01T10:00:00",
    }))
    .unwrap()
}

pub fn todolist(raw: &str) -> Todolist {
    serde_json::from_value(json!({ "id": raw, "name": format!("List {raw}") })).unwrap()
}

pub fn todo_item(raw: &str) -> TodolistItem {
    serde_json::from_value(json!({ "id": raw, "name": format!("Item {raw}") })).unwrap()
}

pub fn worksession(raw: &str, team_id: &str) -> Worksession {
    serde_json::from_value(json!({
        "id": raw,
        "time_start": "2024-05-01T08:00:00",
        "_team_id": team_id,
    }))
    .unwrap()
}

pub fn club_member(raw: &str) -> ClubMember {
    serde_json::from_value(json!({
        "id": raw,
        "first_name": "Ada",
        "last_name": "Lovelace",
    }))
    .unwrap()
}

pub fn club_group(raw: &str, member_ids: &[&str]) -> ClubGroup {
    serde_json::from_value(json!({
        "id": raw,
        "name": format!("Group {raw}"),
        "memberids": member_ids,
    }))
    .unwrap()
}
