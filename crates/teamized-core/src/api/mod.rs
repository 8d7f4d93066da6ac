// ── Backend seam ──
//
// The cache never talks HTTP itself. A `TeamsBackend` performs the listing,
// per-category fetches and mutation calls, and reports failures as
// `BackendError`.

mod error;

use async_trait::async_trait;

use crate::command::{Command, CommandResult};
use crate::model::{Id, TeamList};
use crate::store::{CacheCategory, CategoryPayload};

pub use error::BackendError;

/// Async collaborator that talks to the team backend.
///
/// Implementations must return a payload of the requested category from
/// [`fetch_category`](Self::fetch_category); the cache rejects anything
/// else as a mismatch.
#[async_trait]
pub trait TeamsBackend: Send + Sync {
    /// List every team the user belongs to, with the default team id.
    async fn list_teams(&self) -> Result<TeamList, BackendError>;

    /// Fetch the full listing of one category for a team.
    async fn fetch_category(
        &self,
        team_id: &Id,
        category: CacheCategory,
    ) -> Result<CategoryPayload, BackendError>;

    /// Perform a mutation and return what the backend confirmed.
    async fn execute(&self, command: &Command) -> Result<CommandResult, BackendError>;
}
