// ── Cache service ──
//
// Injectable, cloneable facade over the team store. Owns the backend and
// the render notifier, runs category refreshes on spawned tasks and
// exposes the lookup and admission operations the UI layer calls.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::TeamsBackend;
use crate::config::CacheConfig;
use crate::error::CoreError;
use crate::model::{ClubMember, Id, Member, Team, TeamPayload};
use crate::notify::RenderNotifier;
use crate::store::refresh::RefreshTicket;
use crate::store::{
    CacheCategory, CategoryItem, CategoryPayload, CategoryState, RefreshOutcome, TeamCacheEntry,
    TeamStore,
};

/// Handle to the team cache. Cheap to clone; clones share one store.
#[derive(Clone)]
pub struct CacheService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: CacheConfig,
    store: Arc<TeamStore>,
    backend: Arc<dyn TeamsBackend>,
    notifier: Arc<dyn RenderNotifier>,
}

impl CacheService {
    pub fn new(
        config: CacheConfig,
        backend: Arc<dyn TeamsBackend>,
        notifier: Arc<dyn RenderNotifier>,
    ) -> Self {
        Self::with_store(config, Arc::new(TeamStore::new()), backend, notifier)
    }

    /// Build a service over an existing store.
    pub fn with_store(
        config: CacheConfig,
        store: Arc<TeamStore>,
        backend: Arc<dyn TeamsBackend>,
        notifier: Arc<dyn RenderNotifier>,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                config,
                store,
                backend,
                notifier,
            }),
        }
    }

    pub fn store(&self) -> &Arc<TeamStore> {
        &self.inner.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    pub(crate) fn backend(&self) -> &dyn TeamsBackend {
        self.inner.backend.as_ref()
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get_teams_list(&self) -> Vec<Team> {
        self.inner.store.teams_list()
    }

    pub fn get_team_data(&self, team_id: &Id) -> Option<TeamCacheEntry> {
        self.inner.store.team_data(team_id.as_str())
    }

    pub fn get_current_team_data(&self) -> Option<TeamCacheEntry> {
        self.inner.store.current_team_data()
    }

    pub fn items<T: CategoryItem>(&self, team_id: &Id) -> Option<Vec<T>> {
        self.inner.store.items::<T>(team_id.as_str())
    }

    pub fn item<T: CategoryItem>(&self, team_id: &Id, id: &Id) -> Option<T> {
        self.inner.store.item::<T>(team_id.as_str(), id.as_str())
    }

    pub fn category_state(&self, team_id: &Id, category: CacheCategory) -> Option<CategoryState> {
        self.inner.store.category_state(team_id.as_str(), category)
    }

    pub fn default_team_id(&self) -> Option<Id> {
        self.inner.store.default_team_id()
    }

    pub fn selected_team_id(&self) -> Option<Id> {
        self.inner.store.selected_team_id()
    }

    // ── Team admission and removal ───────────────────────────────────

    /// Cache a team with fresh, never-fetched categories. Re-adding a
    /// cached team resets its categories.
    pub fn add_team(&self, team: TeamPayload) {
        debug!(team_id = %team.id(), "adding team");
        self.inner.store.add_team(team);
    }

    /// Update a cached team's record and any categories shipped inline.
    pub fn update_team(&self, team: TeamPayload) -> bool {
        self.inner.store.update_team(team)
    }

    /// Drop a team from the cache.
    ///
    /// When it was the last team the full team list is fetched again,
    /// which also re-establishes the default team. Otherwise a deleted
    /// default team is replaced by the first remaining one. The selection
    /// is not touched; call [`ensure_existing_team`](Self::ensure_existing_team)
    /// afterwards.
    pub async fn delete_team(&self, team_id: &Id) -> Result<(), CoreError> {
        let removal = self.inner.store.remove_team(team_id.as_str());
        if !removal.existed {
            debug!(team_id = %team_id, "deleted team was not cached");
        }

        if removal.remaining == 0 && self.inner.config.refetch_when_empty {
            info!("last cached team removed, reloading team list");
            self.load_teams().await?;
        }
        Ok(())
    }

    /// Reconcile the cache with a full team listing.
    pub fn update_teams_cache(&self, teams: Vec<TeamPayload>, default_team_id: Id) {
        self.inner.store.update_teams_cache(teams, default_team_id);
    }

    /// Fetch the team list from the backend and reconcile the cache.
    pub async fn load_teams(&self) -> Result<Vec<Team>, CoreError> {
        let list = self.inner.backend.list_teams().await?;
        info!(teams = list.teams.len(), default = %list.default_team_id, "team list loaded");
        self.inner
            .store
            .update_teams_cache(list.teams, list.default_team_id);
        Ok(self.inner.store.teams_list())
    }

    /// Fall back to the default team when the selection is unset or gone.
    pub fn ensure_existing_team(&self) -> Option<Id> {
        self.inner.store.ensure_existing_team()
    }

    /// Select a team. Returns `false` when it was already selected.
    pub fn switch_team(&self, team_id: Id) -> bool {
        self.inner.store.switch_team(team_id)
    }

    // ── Category refresh ─────────────────────────────────────────────

    /// Replace a category's items without fetching. Unknown team is a
    /// logged no-op.
    pub fn replace_team_cache_category(&self, team_id: &Id, items: CategoryPayload) -> bool {
        self.inner.store.replace_category(team_id.as_str(), items)
    }

    /// Fetch a category from the backend and store it.
    ///
    /// While a fetch for the same (team, category) is in flight, further
    /// calls wait for that fetch and receive its outcome; the backend is
    /// called once. The render notifier fires after a successful fetch
    /// has been stored, never on failure.
    pub async fn refresh_team_cache_category(
        &self,
        team_id: &Id,
        category: CacheCategory,
    ) -> Result<CategoryPayload, CoreError> {
        let outcome = self.start_refresh(team_id, category)?;
        wait_for_outcome(outcome, team_id, category).await
    }

    /// Typed [`refresh_team_cache_category`](Self::refresh_team_cache_category).
    pub async fn refresh<T: CategoryItem>(&self, team_id: &Id) -> Result<Vec<T>, CoreError> {
        let payload = self.refresh_team_cache_category(team_id, T::CATEGORY).await?;
        T::from_payload(payload).map_err(|other| CoreError::PayloadMismatch {
            expected: T::CATEGORY,
            got: other.category(),
        })
    }

    /// Start a refresh in the background unless one is already in flight.
    /// Returns whether a new fetch was started.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request_refresh(&self, team_id: &Id, category: CacheCategory) -> bool {
        match self.inner.store.begin_refresh(team_id.as_str(), category) {
            RefreshTicket::Leader { ticket, outcome } => {
                self.spawn_refresh(team_id.clone(), category, ticket, outcome);
                true
            }
            RefreshTicket::Follower(_) => false,
            RefreshTicket::TeamMissing => {
                warn!(team_id = %team_id, %category, "refresh requested for team not in cache");
                false
            }
        }
    }

    /// Serve the cached items, fetching first when the category was never
    /// fetched or is older than the configured staleness window.
    pub async fn refresh_if_needed<T: CategoryItem>(
        &self,
        team_id: &Id,
    ) -> Result<Vec<T>, CoreError> {
        let state = self
            .inner
            .store
            .category_state(team_id.as_str(), T::CATEGORY)
            .ok_or_else(|| CoreError::TeamNotCached {
                team_id: team_id.to_string(),
            })?;

        if state.is_refreshing() || state.is_stale(self.inner.config.stale_after_chrono()) {
            return self.refresh::<T>(team_id).await;
        }
        Ok(self.items::<T>(team_id).unwrap_or_default())
    }

    /// Refresh the team members and store their count on the team.
    pub async fn refresh_members(&self, team_id: &Id) -> Result<Vec<Member>, CoreError> {
        let members = self.refresh::<Member>(team_id).await?;
        let count = u32::try_from(members.len()).unwrap_or(u32::MAX);
        self.inner
            .store
            .modify_team(team_id.as_str(), |team| team.membercount = count);
        Ok(members)
    }

    /// Refresh the club members and store their count on the club.
    pub async fn refresh_club_members(&self, team_id: &Id) -> Result<Vec<ClubMember>, CoreError> {
        let members = self.refresh::<ClubMember>(team_id).await?;
        let count = u32::try_from(members.len()).unwrap_or(u32::MAX);
        self.inner.store.modify_team(team_id.as_str(), |team| {
            if let Some(club) = team.club.as_mut() {
                club.membercount = count;
            }
        });
        Ok(members)
    }

    // ── Refresh internals ────────────────────────────────────────────

    fn start_refresh(
        &self,
        team_id: &Id,
        category: CacheCategory,
    ) -> Result<watch::Receiver<RefreshOutcome>, CoreError> {
        match self.inner.store.begin_refresh(team_id.as_str(), category) {
            RefreshTicket::Leader { ticket, outcome } => {
                let receiver = outcome.subscribe();
                self.spawn_refresh(team_id.clone(), category, ticket, outcome);
                Ok(receiver)
            }
            RefreshTicket::Follower(receiver) => Ok(receiver),
            RefreshTicket::TeamMissing => Err(CoreError::TeamNotCached {
                team_id: team_id.to_string(),
            }),
        }
    }

    /// Run the fetch on its own task so it settles even if every waiting
    /// caller goes away.
    fn spawn_refresh(
        &self,
        team_id: Id,
        category: CacheCategory,
        ticket: u64,
        outcome: watch::Sender<RefreshOutcome>,
    ) {
        let service = self.clone();
        let mut pending = PendingRefresh {
            store: Arc::clone(&self.inner.store),
            team_id,
            category,
            ticket,
            outcome,
            settled: false,
        };

        tokio::spawn(async move {
            let team_id = pending.team_id.clone();
            debug!(team_id = %team_id, %category, "fetching category");
            let result = service.fetch_category(&team_id, category).await;
            pending.settle(&result);

            match &result {
                Ok(payload) => {
                    debug!(team_id = %team_id, %category, items = payload.len(), "category refreshed");
                    service.inner.notifier.render();
                }
                Err(e) => {
                    warn!(team_id = %team_id, %category, error = %e, "category refresh failed");
                }
            }

            pending.publish(result);
        });
    }

    async fn fetch_category(
        &self,
        team_id: &Id,
        category: CacheCategory,
    ) -> Result<CategoryPayload, CoreError> {
        let payload = self.inner.backend.fetch_category(team_id, category).await?;
        if payload.category() != category {
            return Err(CoreError::PayloadMismatch {
                expected: category,
                got: payload.category(),
            });
        }
        Ok(payload)
    }
}

async fn wait_for_outcome(
    mut outcome: watch::Receiver<RefreshOutcome>,
    team_id: &Id,
    category: CacheCategory,
) -> Result<CategoryPayload, CoreError> {
    let settled = match outcome.wait_for(Option::is_some).await {
        Ok(value) => value.clone(),
        Err(_) => None,
    };
    settled.unwrap_or_else(|| {
        Err(CoreError::RefreshAborted {
            team_id: team_id.to_string(),
            category,
        })
    })
}

/// A leader's claim on an in-flight refresh.
///
/// Dropped without settling (the fetch panicked or its task was
/// cancelled), it clears the in-flight marker and hands waiters
/// `RefreshAborted`.
struct PendingRefresh {
    store: Arc<TeamStore>,
    team_id: Id,
    category: CacheCategory,
    ticket: u64,
    outcome: watch::Sender<RefreshOutcome>,
    settled: bool,
}

impl PendingRefresh {
    fn settle(&mut self, result: &Result<CategoryPayload, CoreError>) {
        self.settled = true;
        self.store
            .complete_refresh(self.team_id.as_str(), self.category, self.ticket, result);
    }

    fn publish(&self, result: Result<CategoryPayload, CoreError>) {
        self.outcome.send_replace(Some(result));
    }
}

impl Drop for PendingRefresh {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(team_id = %self.team_id, category = %self.category, "refresh ended without settling");
        let aborted = Err(CoreError::RefreshAborted {
            team_id: self.team_id.to_string(),
            category: self.category,
        });
        self.settle(&aborted);
        self.publish(aborted);
    }
}
