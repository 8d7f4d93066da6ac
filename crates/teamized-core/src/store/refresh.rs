// ── Refresh bookkeeping ──
//
// Start and settle category refreshes against the store. At most one
// refresh runs per (team, category): a second request receives the
// outcome channel of the one already in flight.

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::category::{CacheCategory, CategoryPayload, RefreshOutcome};
use super::data_store::TeamStore;
use crate::error::CoreError;

/// What a caller must do after asking to refresh a category.
#[derive(Debug)]
pub(crate) enum RefreshTicket {
    /// This caller owns the fetch and must publish its outcome.
    Leader {
        ticket: u64,
        outcome: watch::Sender<RefreshOutcome>,
    },
    /// A fetch is already running; wait on its outcome.
    Follower(watch::Receiver<RefreshOutcome>),
    /// The team is not cached.
    TeamMissing,
}

impl TeamStore {
    /// Mark a category as refreshing, or hand back the refresh already in
    /// flight.
    pub(crate) fn begin_refresh(&self, team_id: &str, category: CacheCategory) -> RefreshTicket {
        let mut cache = self.write();
        let Some(entry) = cache.teams.get_mut(team_id) else {
            return RefreshTicket::TeamMissing;
        };
        // Issued under the write lock so tickets order against entry epochs.
        let ticket = self.issue_ticket();

        let state = entry.state_mut(category);
        if let Some(in_flight) = state.in_flight() {
            debug!(team_id, %category, "refresh already in flight, joining");
            return RefreshTicket::Follower(in_flight.outcome.clone());
        }

        let (tx, rx) = watch::channel(None);
        state.start(ticket, rx);
        RefreshTicket::Leader {
            ticket,
            outcome: tx,
        }
    }

    /// Settle a refresh: clear the in-flight marker and, on success, store
    /// the fetched items and leave the initial state.
    ///
    /// Returns `false` when the team was evicted, or evicted and re-added,
    /// while the fetch ran, in which case nothing is written.
    pub(crate) fn complete_refresh(
        &self,
        team_id: &str,
        category: CacheCategory,
        ticket: u64,
        outcome: &Result<CategoryPayload, CoreError>,
    ) -> bool {
        let mut cache = self.write();
        let Some(entry) = cache.teams.get_mut(team_id) else {
            warn!(team_id, %category, "team evicted during refresh, discarding result");
            return false;
        };
        if ticket < entry.epoch {
            warn!(team_id, %category, "team re-added during refresh, discarding result");
            return false;
        }

        let state = entry.state_mut(category);
        let owned = state.settle(ticket);
        if !owned && state.is_refreshing() {
            debug!(team_id, %category, "superseded refresh, discarding result");
            return false;
        }

        if let Ok(payload) = outcome {
            state.mark_fetched(Utc::now());
            entry.replace(payload.clone());
        }
        true
    }
}
