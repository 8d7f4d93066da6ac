// ── Team cache entry ──

use super::category::{CacheCategory, CategoryItem, CategoryPayload, CategoryState};
use super::collection::CategoryMap;
use crate::model::{
    Calendar, ClubAttendanceEvent, ClubGroup, ClubMember, ClubPresenceEvent, EmbeddedCategories,
    Invite, Member, Team, Todolist, Worksession,
};

/// Everything cached for one team: the team record plus one map per
/// cache category.
#[derive(Debug, Clone)]
pub struct TeamCacheEntry {
    pub(crate) team: Team,
    /// Ticket counter value when the entry was created. Refreshes issued
    /// before it belong to an evicted predecessor.
    pub(crate) epoch: u64,
    pub(crate) members: CategoryMap<Member>,
    pub(crate) invites: CategoryMap<Invite>,
    pub(crate) calendars: CategoryMap<Calendar>,
    pub(crate) todolists: CategoryMap<Todolist>,
    pub(crate) club_members: CategoryMap<ClubMember>,
    pub(crate) club_groups: CategoryMap<ClubGroup>,
    pub(crate) club_attendance_events: CategoryMap<ClubAttendanceEvent>,
    pub(crate) club_presence_events: CategoryMap<ClubPresenceEvent>,
    pub(crate) me_worksessions: CategoryMap<Worksession>,
}

impl TeamCacheEntry {
    pub(crate) fn new(team: Team) -> Self {
        Self {
            team,
            epoch: 0,
            members: CategoryMap::new(),
            invites: CategoryMap::new(),
            calendars: CategoryMap::new(),
            todolists: CategoryMap::new(),
            club_members: CategoryMap::new(),
            club_groups: CategoryMap::new(),
            club_attendance_events: CategoryMap::new(),
            club_presence_events: CategoryMap::new(),
            me_worksessions: CategoryMap::new(),
        }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Typed access to one category map.
    pub fn category<T: CategoryItem>(&self) -> &CategoryMap<T> {
        T::slot(self)
    }

    pub fn members(&self) -> &CategoryMap<Member> {
        &self.members
    }

    pub fn invites(&self) -> &CategoryMap<Invite> {
        &self.invites
    }

    pub fn calendars(&self) -> &CategoryMap<Calendar> {
        &self.calendars
    }

    pub fn todolists(&self) -> &CategoryMap<Todolist> {
        &self.todolists
    }

    pub fn club_members(&self) -> &CategoryMap<ClubMember> {
        &self.club_members
    }

    pub fn club_groups(&self) -> &CategoryMap<ClubGroup> {
        &self.club_groups
    }

    pub fn club_attendance_events(&self) -> &CategoryMap<ClubAttendanceEvent> {
        &self.club_attendance_events
    }

    pub fn club_presence_events(&self) -> &CategoryMap<ClubPresenceEvent> {
        &self.club_presence_events
    }

    pub fn me_worksessions(&self) -> &CategoryMap<Worksession> {
        &self.me_worksessions
    }

    pub fn state(&self, category: CacheCategory) -> &CategoryState {
        match category {
            CacheCategory::Members => self.members.state(),
            CacheCategory::Invites => self.invites.state(),
            CacheCategory::Calendars => self.calendars.state(),
            CacheCategory::Todolists => self.todolists.state(),
            CacheCategory::ClubMembers => self.club_members.state(),
            CacheCategory::ClubGroups => self.club_groups.state(),
            CacheCategory::ClubAttendanceEvents => self.club_attendance_events.state(),
            CacheCategory::ClubPresenceEvents => self.club_presence_events.state(),
            CacheCategory::MeWorksessions => self.me_worksessions.state(),
        }
    }

    pub(crate) fn state_mut(&mut self, category: CacheCategory) -> &mut CategoryState {
        match category {
            CacheCategory::Members => self.members.state_mut(),
            CacheCategory::Invites => self.invites.state_mut(),
            CacheCategory::Calendars => self.calendars.state_mut(),
            CacheCategory::Todolists => self.todolists.state_mut(),
            CacheCategory::ClubMembers => self.club_members.state_mut(),
            CacheCategory::ClubGroups => self.club_groups.state_mut(),
            CacheCategory::ClubAttendanceEvents => self.club_attendance_events.state_mut(),
            CacheCategory::ClubPresenceEvents => self.club_presence_events.state_mut(),
            CacheCategory::MeWorksessions => self.me_worksessions.state_mut(),
        }
    }

    pub fn len(&self, category: CacheCategory) -> usize {
        match category {
            CacheCategory::Members => self.members.len(),
            CacheCategory::Invites => self.invites.len(),
            CacheCategory::Calendars => self.calendars.len(),
            CacheCategory::Todolists => self.todolists.len(),
            CacheCategory::ClubMembers => self.club_members.len(),
            CacheCategory::ClubGroups => self.club_groups.len(),
            CacheCategory::ClubAttendanceEvents => self.club_attendance_events.len(),
            CacheCategory::ClubPresenceEvents => self.club_presence_events.len(),
            CacheCategory::MeWorksessions => self.me_worksessions.len(),
        }
    }

    /// Current items of a category as a tagged payload.
    pub fn payload(&self, category: CacheCategory) -> CategoryPayload {
        match category {
            CacheCategory::Members => CategoryPayload::Members(self.members.to_vec()),
            CacheCategory::Invites => CategoryPayload::Invites(self.invites.to_vec()),
            CacheCategory::Calendars => CategoryPayload::Calendars(self.calendars.to_vec()),
            CacheCategory::Todolists => CategoryPayload::Todolists(self.todolists.to_vec()),
            CacheCategory::ClubMembers => {
                CategoryPayload::ClubMembers(self.club_members.to_vec())
            }
            CacheCategory::ClubGroups => CategoryPayload::ClubGroups(self.club_groups.to_vec()),
            CacheCategory::ClubAttendanceEvents => {
                CategoryPayload::ClubAttendanceEvents(self.club_attendance_events.to_vec())
            }
            CacheCategory::ClubPresenceEvents => {
                CategoryPayload::ClubPresenceEvents(self.club_presence_events.to_vec())
            }
            CacheCategory::MeWorksessions => {
                CategoryPayload::MeWorksessions(self.me_worksessions.to_vec())
            }
        }
    }

    /// Replace the items of the payload's category wholesale. Refresh state
    /// is left alone.
    pub(crate) fn replace(&mut self, payload: CategoryPayload) {
        match payload {
            CategoryPayload::Members(items) => self.members.replace(items),
            CategoryPayload::Invites(items) => self.invites.replace(items),
            CategoryPayload::Calendars(items) => self.calendars.replace(items),
            CategoryPayload::Todolists(items) => self.todolists.replace(items),
            CategoryPayload::ClubMembers(items) => self.club_members.replace(items),
            CategoryPayload::ClubGroups(items) => self.club_groups.replace(items),
            CategoryPayload::ClubAttendanceEvents(items) => {
                self.club_attendance_events.replace(items);
            }
            CategoryPayload::ClubPresenceEvents(items) => {
                self.club_presence_events.replace(items);
            }
            CategoryPayload::MeWorksessions(items) => self.me_worksessions.replace(items),
        }
    }

    /// Take over the category arrays a team payload carried inline.
    pub(crate) fn absorb(&mut self, embedded: EmbeddedCategories) {
        let EmbeddedCategories {
            members,
            invites,
            calendars,
            todolists,
            club_members,
            club_groups,
            club_attendance_events,
            club_presence_events,
            me_worksessions,
        } = embedded;

        let inline = [
            members.map(CategoryPayload::Members),
            invites.map(CategoryPayload::Invites),
            calendars.map(CategoryPayload::Calendars),
            todolists.map(CategoryPayload::Todolists),
            club_members.map(CategoryPayload::ClubMembers),
            club_groups.map(CategoryPayload::ClubGroups),
            club_attendance_events.map(CategoryPayload::ClubAttendanceEvents),
            club_presence_events.map(CategoryPayload::ClubPresenceEvents),
            me_worksessions.map(CategoryPayload::MeWorksessions),
        ];
        for payload in inline.into_iter().flatten() {
            self.replace(payload);
        }
    }
}
