//! Client-side cache of per-team data for the Teamized application.
//!
//! This crate owns the cached domain model and the synchronization layer
//! between a team backend and the UI:
//!
//! - **[`CacheService`]**: Cloneable facade holding the store, the backend
//!   and the render notifier. Looks up cached teams, admits and removes
//!   teams, and refreshes categories. Concurrent refreshes of the same
//!   (team, category) share one backend fetch.
//!
//! - **[`TeamStore`]**: Lock-protected `Id -> TeamCacheEntry` map plus the
//!   default and selected team. Every mutation takes the write lock once.
//!
//! - **[`CacheCategory`]** / **[`CategoryItem`]**: The closed set of
//!   per-team categories and the compile-time mapping from element type to
//!   category map and [`CategoryPayload`] variant.
//!
//! - **[`Command`]**: Typed mutations executed by the [`TeamsBackend`] and
//!   merged into the cache only after the backend confirmed them.
//!
//! - **[`RenderNotifier`]**: The "data changed, redraw" hook fired after a
//!   successful refresh. [`RenderSignal`] is a watch-backed implementation.

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::{BackendError, TeamsBackend};
pub use command::{Command, CommandResult};
pub use config::CacheConfig;
pub use error::CoreError;
pub use notify::{NoRender, RenderNotifier};
pub use service::CacheService;
pub use store::{
    CacheCategory, CategoryItem, CategoryMap, CategoryPayload, CategoryState, TeamCacheEntry,
    TeamRemoval, TeamStore,
};
pub use stream::{RenderSignal, RenderStream, RenderWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Teams
    Club, EmbeddedCategories, Id, Team, TeamList, TeamPayload,
    // Members
    Invite, Member, MemberRole, User,
    // Planning
    Calendar, CalendarEvent, Todolist, TodolistItem, Worksession,
    // Club
    ClubAttendanceEvent, ClubGroup, ClubMember, ClubPresenceEvent,
};
