// ── Cache category registry ──
//
// The closed set of sub-resources cached per team, the refresh state kept
// for each of them, and the compile-time mapping from element type to
// category, map slot and payload variant.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use super::collection::CategoryMap;
use super::entry::TeamCacheEntry;
use crate::api::BackendError;
use crate::error::CoreError;
use crate::model::{
    Calendar, ClubAttendanceEvent, ClubGroup, ClubMember, ClubPresenceEvent, Id, Invite, Member,
    Todolist, Worksession,
};

// ── CacheCategory ───────────────────────────────────────────────────

/// A named collection of objects attached to a team.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CacheCategory {
    Members,
    Invites,
    Calendars,
    Todolists,
    ClubMembers,
    ClubGroups,
    ClubAttendanceEvents,
    ClubPresenceEvents,
    MeWorksessions,
}

impl CacheCategory {
    pub const ALL: [Self; 9] = [
        Self::Members,
        Self::Invites,
        Self::Calendars,
        Self::Todolists,
        Self::ClubMembers,
        Self::ClubGroups,
        Self::ClubAttendanceEvents,
        Self::ClubPresenceEvents,
        Self::MeWorksessions,
    ];

    /// Key under which the backend nests the item array when listing this
    /// category: the last `_`-separated segment of the category name.
    pub fn response_key(self) -> &'static str {
        let name: &'static str = self.into();
        name.rsplit('_').next().unwrap_or(name)
    }

    /// Whether the category only carries data for teams with a linked club.
    pub fn requires_club(self) -> bool {
        matches!(
            self,
            Self::ClubMembers
                | Self::ClubGroups
                | Self::ClubAttendanceEvents
                | Self::ClubPresenceEvents
        )
    }
}

// ── CategoryState ───────────────────────────────────────────────────

/// Outcome published to everyone waiting on an in-flight refresh.
/// `None` until the fetch settles.
pub(crate) type RefreshOutcome = Option<Result<CategoryPayload, CoreError>>;

#[derive(Debug, Clone)]
pub(crate) struct InFlight {
    pub(crate) ticket: u64,
    pub(crate) outcome: watch::Receiver<RefreshOutcome>,
}

/// Refresh bookkeeping for one (team, category) pair.
///
/// `refreshing` is derived from the presence of an in-flight marker, so it
/// is cleared by the same write that settles the fetch.
#[derive(Debug, Clone)]
pub struct CategoryState {
    initial: bool,
    last_refreshed: Option<DateTime<Utc>>,
    in_flight: Option<InFlight>,
}

impl CategoryState {
    pub(crate) fn new() -> Self {
        Self {
            initial: true,
            last_refreshed: None,
            in_flight: None,
        }
    }

    /// True until the category has been fetched successfully at least once.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// True while a fetch for this category is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Whether the cached items should be fetched again. Never-fetched
    /// categories are always stale.
    pub fn is_stale(&self, max_age: Option<Duration>) -> bool {
        match (self.last_refreshed, max_age) {
            (None, _) => true,
            (Some(_), None) => self.initial,
            (Some(at), Some(max_age)) => Utc::now() - at > max_age,
        }
    }

    pub(crate) fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub(crate) fn start(&mut self, ticket: u64, outcome: watch::Receiver<RefreshOutcome>) {
        self.in_flight = Some(InFlight { ticket, outcome });
    }

    /// Clear the in-flight marker if it still belongs to `ticket`.
    pub(crate) fn settle(&mut self, ticket: u64) -> bool {
        if self.in_flight.as_ref().is_some_and(|f| f.ticket == ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_fetched(&mut self, at: DateTime<Utc>) {
        self.initial = false;
        self.last_refreshed = Some(at);
    }
}

impl Default for CategoryState {
    fn default() -> Self {
        Self::new()
    }
}

// ── CategoryPayload ─────────────────────────────────────────────────

/// A full listing of one category, tagged with the category it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPayload {
    Members(Vec<Member>),
    Invites(Vec<Invite>),
    Calendars(Vec<Calendar>),
    Todolists(Vec<Todolist>),
    ClubMembers(Vec<ClubMember>),
    ClubGroups(Vec<ClubGroup>),
    ClubAttendanceEvents(Vec<ClubAttendanceEvent>),
    ClubPresenceEvents(Vec<ClubPresenceEvent>),
    MeWorksessions(Vec<Worksession>),
}

impl CategoryPayload {
    pub fn empty(category: CacheCategory) -> Self {
        match category {
            CacheCategory::Members => Self::Members(Vec::new()),
            CacheCategory::Invites => Self::Invites(Vec::new()),
            CacheCategory::Calendars => Self::Calendars(Vec::new()),
            CacheCategory::Todolists => Self::Todolists(Vec::new()),
            CacheCategory::ClubMembers => Self::ClubMembers(Vec::new()),
            CacheCategory::ClubGroups => Self::ClubGroups(Vec::new()),
            CacheCategory::ClubAttendanceEvents => Self::ClubAttendanceEvents(Vec::new()),
            CacheCategory::ClubPresenceEvents => Self::ClubPresenceEvents(Vec::new()),
            CacheCategory::MeWorksessions => Self::MeWorksessions(Vec::new()),
        }
    }

    pub fn category(&self) -> CacheCategory {
        match self {
            Self::Members(_) => CacheCategory::Members,
            Self::Invites(_) => CacheCategory::Invites,
            Self::Calendars(_) => CacheCategory::Calendars,
            Self::Todolists(_) => CacheCategory::Todolists,
            Self::ClubMembers(_) => CacheCategory::ClubMembers,
            Self::ClubGroups(_) => CacheCategory::ClubGroups,
            Self::ClubAttendanceEvents(_) => CacheCategory::ClubAttendanceEvents,
            Self::ClubPresenceEvents(_) => CacheCategory::ClubPresenceEvents,
            Self::MeWorksessions(_) => CacheCategory::MeWorksessions,
        }
    }

    pub fn ids(&self) -> Vec<Id> {
        fn collect<T: CategoryItem>(items: &[T]) -> Vec<Id> {
            items.iter().map(|i| i.id().clone()).collect()
        }
        match self {
            Self::Members(v) => collect(v),
            Self::Invites(v) => collect(v),
            Self::Calendars(v) => collect(v),
            Self::Todolists(v) => collect(v),
            Self::ClubMembers(v) => collect(v),
            Self::ClubGroups(v) => collect(v),
            Self::ClubAttendanceEvents(v) => collect(v),
            Self::ClubPresenceEvents(v) => collect(v),
            Self::MeWorksessions(v) => collect(v),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Members(v) => v.len(),
            Self::Invites(v) => v.len(),
            Self::Calendars(v) => v.len(),
            Self::Todolists(v) => v.len(),
            Self::ClubMembers(v) => v.len(),
            Self::ClubGroups(v) => v.len(),
            Self::ClubAttendanceEvents(v) => v.len(),
            Self::ClubPresenceEvents(v) => v.len(),
            Self::MeWorksessions(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a category listing body of the form `{"<response key>": [...]}`.
    pub fn from_json(category: CacheCategory, body: &Value) -> Result<Self, BackendError> {
        let key = category.response_key();
        let items = body
            .get(key)
            .cloned()
            .ok_or_else(|| BackendError::Deserialization {
                message: format!("listing of {category} has no '{key}' field"),
            })?;

        fn decode<T: serde::de::DeserializeOwned>(items: Value) -> Result<Vec<T>, BackendError> {
            serde_json::from_value(items).map_err(BackendError::from)
        }

        Ok(match category {
            CacheCategory::Members => Self::Members(decode(items)?),
            CacheCategory::Invites => Self::Invites(decode(items)?),
            CacheCategory::Calendars => Self::Calendars(decode(items)?),
            CacheCategory::Todolists => Self::Todolists(decode(items)?),
            CacheCategory::ClubMembers => Self::ClubMembers(decode(items)?),
            CacheCategory::ClubGroups => Self::ClubGroups(decode(items)?),
            CacheCategory::ClubAttendanceEvents => Self::ClubAttendanceEvents(decode(items)?),
            CacheCategory::ClubPresenceEvents => Self::ClubPresenceEvents(decode(items)?),
            CacheCategory::MeWorksessions => Self::MeWorksessions(decode(items)?),
        })
    }
}

// ── CategoryItem ────────────────────────────────────────────────────

/// An element type stored in one cache category.
///
/// Ties each type to its category tag, to its map inside a
/// [`TeamCacheEntry`], and to its [`CategoryPayload`] variant.
pub trait CategoryItem: Clone + Send + Sync + 'static {
    const CATEGORY: CacheCategory;

    fn id(&self) -> &Id;

    fn slot(entry: &TeamCacheEntry) -> &CategoryMap<Self>;

    fn slot_mut(entry: &mut TeamCacheEntry) -> &mut CategoryMap<Self>;

    fn into_payload(items: Vec<Self>) -> CategoryPayload;

    /// Extract the items if the payload belongs to this type's category,
    /// handing the payload back otherwise.
    fn from_payload(payload: CategoryPayload) -> Result<Vec<Self>, CategoryPayload>;
}

macro_rules! category_items {
    ($($ty:ty => $variant:ident, $field:ident;)*) => {
        $(
            impl CategoryItem for $ty {
                const CATEGORY: CacheCategory = CacheCategory::$variant;

                fn id(&self) -> &Id {
                    &self.id
                }

                fn slot(entry: &TeamCacheEntry) -> &CategoryMap<Self> {
                    &entry.$field
                }

                fn slot_mut(entry: &mut TeamCacheEntry) -> &mut CategoryMap<Self> {
                    &mut entry.$field
                }

                fn into_payload(items: Vec<Self>) -> CategoryPayload {
                    CategoryPayload::$variant(items)
                }

                fn from_payload(payload: CategoryPayload) -> Result<Vec<Self>, CategoryPayload> {
                    match payload {
                        CategoryPayload::$variant(items) => Ok(items),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

category_items! {
    Member => Members, members;
    Invite => Invites, invites;
    Calendar => Calendars, calendars;
    Todolist => Todolists, todolists;
    ClubMember => ClubMembers, club_members;
    ClubGroup => ClubGroups, club_groups;
    ClubAttendanceEvent => ClubAttendanceEvents, club_attendance_events;
    ClubPresenceEvent => ClubPresenceEvents, club_presence_events;
    Worksession => MeWorksessions, me_worksessions;
}
