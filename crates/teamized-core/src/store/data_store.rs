// ── Global team cache ──
//
// Thread-safe storage for every cached team and its categories, plus the
// default and selected team pointers. All mutations take the write lock
// once, so admission, removal and bulk reconciliation are atomic for
// readers. The lock is never held across an `.await`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::category::{CacheCategory, CategoryItem, CategoryPayload, CategoryState};
use super::collection::CategoryMap;
use super::entry::TeamCacheEntry;
use crate::model::{Id, Team, TeamPayload};

#[derive(Debug, Default)]
pub(crate) struct GlobalCache {
    pub(crate) teams: IndexMap<Id, TeamCacheEntry>,
    pub(crate) default_team_id: Option<Id>,
    pub(crate) selected_team_id: Option<Id>,
}

/// Outcome of removing a team from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamRemoval {
    /// Whether the team was cached at all.
    pub existed: bool,
    /// Teams left in the cache afterwards.
    pub remaining: usize,
}

/// Central store for all per-team cached data.
#[derive(Debug, Default)]
pub struct TeamStore {
    pub(crate) inner: RwLock<GlobalCache>,
    pub(crate) next_ticket: AtomicU64,
}

impl TeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, GlobalCache> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, GlobalCache> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn issue_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn teams_list(&self) -> Vec<Team> {
        self.read().teams.values().map(|e| e.team.clone()).collect()
    }

    pub fn team_ids(&self) -> Vec<Id> {
        self.read().teams.keys().cloned().collect()
    }

    pub fn team_count(&self) -> usize {
        self.read().teams.len()
    }

    pub fn contains_team(&self, team_id: &str) -> bool {
        self.read().teams.contains_key(team_id)
    }

    pub fn team(&self, team_id: &str) -> Option<Team> {
        self.read().teams.get(team_id).map(|e| e.team.clone())
    }

    /// Owned snapshot of a team's entry.
    pub fn team_data(&self, team_id: &str) -> Option<TeamCacheEntry> {
        self.read().teams.get(team_id).cloned()
    }

    pub fn current_team_data(&self) -> Option<TeamCacheEntry> {
        let cache = self.read();
        let selected = cache.selected_team_id.as_ref()?;
        cache.teams.get(selected).cloned()
    }

    /// Run `f` against a team's entry under the read lock.
    pub fn with_team<R>(&self, team_id: &str, f: impl FnOnce(&TeamCacheEntry) -> R) -> Option<R> {
        self.read().teams.get(team_id).map(f)
    }

    pub fn items<T: CategoryItem>(&self, team_id: &str) -> Option<Vec<T>> {
        self.with_team(team_id, |entry| T::slot(entry).to_vec())
    }

    pub fn item<T: CategoryItem>(&self, team_id: &str, id: &str) -> Option<T> {
        self.with_team(team_id, |entry| T::slot(entry).get(id).cloned())
            .flatten()
    }

    pub fn category_state(&self, team_id: &str, category: CacheCategory) -> Option<CategoryState> {
        self.with_team(team_id, |entry| entry.state(category).clone())
    }

    pub fn default_team_id(&self) -> Option<Id> {
        self.read().default_team_id.clone()
    }

    pub fn selected_team_id(&self) -> Option<Id> {
        self.read().selected_team_id.clone()
    }

    // ── Team admission and removal ───────────────────────────────────

    /// Insert a fresh entry for the team, resetting every category, then
    /// absorb the payload.
    pub fn add_team(&self, payload: TeamPayload) {
        let mut cache = self.write();
        let id = payload.id().clone();
        if cache.teams.contains_key(&id) {
            debug!(team_id = %id, "re-adding cached team, categories reset");
        }
        let mut entry = TeamCacheEntry::new(payload.team.clone());
        entry.epoch = self.issue_ticket();
        apply_payload(&mut entry, payload);
        cache.teams.insert(id, entry);
    }

    /// Refresh the team record and any inline categories. Returns `false`
    /// when the team is not cached.
    pub fn update_team(&self, payload: TeamPayload) -> bool {
        let mut cache = self.write();
        match cache.teams.get_mut(payload.id()) {
            Some(entry) => {
                apply_payload(entry, payload);
                true
            }
            None => {
                warn!(team_id = %payload.id(), "update for team not in cache, ignoring");
                false
            }
        }
    }

    /// Remove a team. If it was the default team and others remain, the
    /// first remaining team becomes the default. The selection is left
    /// untouched.
    pub fn remove_team(&self, team_id: &str) -> TeamRemoval {
        let mut cache = self.write();
        let existed = cache.teams.shift_remove(team_id).is_some();
        let remaining = cache.teams.len();

        if remaining > 0 && cache.default_team_id.as_ref().map(Id::as_str) == Some(team_id) {
            let fallback = cache.teams.keys().next().cloned();
            debug!(team_id, fallback = ?fallback, "default team removed, reassigning");
            cache.default_team_id = fallback;
        }

        TeamRemoval { existed, remaining }
    }

    /// Reconcile the cache with a full team listing: survivors are updated
    /// in place, newcomers added and teams absent from the listing dropped.
    pub fn update_teams_cache(&self, teams: Vec<TeamPayload>, default_team_id: Id) {
        let mut cache = self.write();
        cache.default_team_id = Some(default_team_id);

        let incoming: HashSet<Id> = teams.iter().map(|t| t.id().clone()).collect();
        let mut added = 0usize;
        for payload in teams {
            if let Some(entry) = cache.teams.get_mut(payload.id()) {
                apply_payload(entry, payload);
            } else {
                let mut entry = TeamCacheEntry::new(payload.team.clone());
                entry.epoch = self.issue_ticket();
                let id = payload.id().clone();
                apply_payload(&mut entry, payload);
                cache.teams.insert(id, entry);
                added += 1;
            }
        }

        let before = cache.teams.len();
        cache.teams.retain(|id, _| incoming.contains(id));
        debug!(
            added,
            removed = before - cache.teams.len(),
            total = cache.teams.len(),
            "team list reconciled"
        );
    }

    pub fn set_default_team_id(&self, team_id: Option<Id>) {
        self.write().default_team_id = team_id;
    }

    /// Select the default team if the current selection is unset or no
    /// longer cached. Returns the new selection when it changed.
    pub fn ensure_existing_team(&self) -> Option<Id> {
        let mut cache = self.write();
        let valid = cache
            .selected_team_id
            .as_ref()
            .is_some_and(|id| cache.teams.contains_key(id));
        if valid {
            return None;
        }

        let fallback = cache.default_team_id.clone();
        debug!(
            previous = ?cache.selected_team_id,
            fallback = ?fallback,
            "selected team missing, falling back to default"
        );
        cache.selected_team_id.clone_from(&fallback);
        fallback
    }

    /// Select a team. Returns `false` when it was already selected.
    pub fn switch_team(&self, team_id: Id) -> bool {
        let mut cache = self.write();
        if cache.selected_team_id.as_ref() == Some(&team_id) {
            return false;
        }
        if !cache.teams.contains_key(&team_id) {
            warn!(team_id = %team_id, "selecting team that is not cached");
        }
        cache.selected_team_id = Some(team_id);
        true
    }

    // ── Category mutation ────────────────────────────────────────────

    /// Replace a category's items wholesale. Unknown team is a logged no-op.
    pub fn replace_category(&self, team_id: &str, payload: CategoryPayload) -> bool {
        let category = payload.category();
        let mut cache = self.write();
        if let Some(entry) = cache.teams.get_mut(team_id) {
            entry.replace(payload);
            true
        } else {
            warn!(team_id, %category, "replace for team not in cache, ignoring");
            false
        }
    }

    pub fn replace_items<T: CategoryItem>(&self, team_id: &str, items: Vec<T>) -> bool {
        self.replace_category(team_id, T::into_payload(items))
    }

    /// Insert or overwrite one item. Returns `false` when the team is not
    /// cached.
    pub fn upsert_item<T: CategoryItem>(&self, team_id: &str, item: T) -> bool {
        self.with_entry_mut(team_id, T::CATEGORY, |entry| {
            T::slot_mut(entry).upsert(item);
        })
        .is_some()
    }

    pub fn remove_item<T: CategoryItem>(&self, team_id: &str, id: &str) -> Option<T> {
        self.with_entry_mut(team_id, T::CATEGORY, |entry| T::slot_mut(entry).remove(id))
            .flatten()
    }

    /// Mutate one cached item in place.
    pub fn modify_item<T: CategoryItem, R>(
        &self,
        team_id: &str,
        id: &str,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        self.with_entry_mut(team_id, T::CATEGORY, |entry| {
            T::slot_mut(entry).get_mut(id).map(f)
        })
        .flatten()
    }

    /// Mutate every cached item of a category.
    pub fn modify_items<T: CategoryItem>(&self, team_id: &str, mut f: impl FnMut(&mut T)) -> bool {
        self.with_entry_mut(team_id, T::CATEGORY, |entry| {
            T::slot_mut(entry).values_mut().for_each(&mut f);
        })
        .is_some()
    }

    /// Mutate a whole category map under one write lock.
    pub(crate) fn modify_category<T: CategoryItem, R>(
        &self,
        team_id: &str,
        f: impl FnOnce(&mut CategoryMap<T>) -> R,
    ) -> Option<R> {
        self.with_entry_mut(team_id, T::CATEGORY, |entry| f(T::slot_mut(entry)))
    }

    pub fn clear_items<T: CategoryItem>(&self, team_id: &str) -> bool {
        self.with_entry_mut(team_id, T::CATEGORY, |entry| T::slot_mut(entry).clear())
            .is_some()
    }

    /// Mutate the cached team record.
    pub fn modify_team<R>(&self, team_id: &str, f: impl FnOnce(&mut Team) -> R) -> Option<R> {
        let mut cache = self.write();
        if let Some(entry) = cache.teams.get_mut(team_id) {
            Some(f(&mut entry.team))
        } else {
            warn!(team_id, "team not in cache, ignoring");
            None
        }
    }

    fn with_entry_mut<R>(
        &self,
        team_id: &str,
        category: CacheCategory,
        f: impl FnOnce(&mut TeamCacheEntry) -> R,
    ) -> Option<R> {
        let mut cache = self.write();
        if let Some(entry) = cache.teams.get_mut(team_id) {
            Some(f(entry))
        } else {
            warn!(team_id, %category, "team not in cache, ignoring");
            None
        }
    }
}

/// Store the team record and absorb any inline categories.
fn apply_payload(entry: &mut TeamCacheEntry, payload: TeamPayload) {
    let TeamPayload { team, embedded } = payload;
    entry.team = team;
    entry.absorb(embedded);
}
