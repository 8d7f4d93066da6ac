// ── Team cache storage ──

mod category;
mod collection;
mod data_store;
mod entry;
pub(crate) mod refresh;

pub use category::{CacheCategory, CategoryItem, CategoryPayload, CategoryState};
pub use collection::CategoryMap;
pub use data_store::{TeamRemoval, TeamStore};
pub use entry::TeamCacheEntry;

pub(crate) use category::RefreshOutcome;
