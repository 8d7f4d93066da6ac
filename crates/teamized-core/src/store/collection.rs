// ── Per-category item map ──
//
// Insertion-ordered `Id -> item` storage bundled with the refresh state of
// the category, so a map never exists without its state.

use indexmap::IndexMap;

use super::category::{CategoryItem, CategoryState};
use crate::model::Id;

/// Items of one cache category for one team.
#[derive(Debug, Clone)]
pub struct CategoryMap<T> {
    items: IndexMap<Id, T>,
    state: CategoryState,
}

impl<T: CategoryItem> CategoryMap<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: IndexMap::new(),
            state: CategoryState::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.items.keys()
    }

    pub fn as_map(&self) -> &IndexMap<Id, T> {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> &CategoryState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut CategoryState {
        &mut self.state
    }

    /// Drop every item and re-key `items` by id. Later duplicates win.
    pub(crate) fn replace(&mut self, items: Vec<T>) {
        self.items.clear();
        for item in items {
            self.items.insert(item.id().clone(), item);
        }
    }

    /// Insert or overwrite an item. Returns `true` if the id was new.
    pub(crate) fn upsert(&mut self, item: T) -> bool {
        self.items.insert(item.id().clone(), item).is_none()
    }

    /// Remove an item, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: &str) -> Option<T> {
        self.items.shift_remove(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
