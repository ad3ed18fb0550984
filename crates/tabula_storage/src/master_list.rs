//! Master lists with bidirectional indices.
//!
//! A master list is owned by a list object (for example the class skill list
//! of a class) and is populated during deferred processing. Membership has set
//! semantics, so re-running the deferred pass adds nothing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tabula_foundation::EntityId;

/// One member of a master list and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterListEntry {
    /// The member entity.
    pub member: EntityId,
    /// Name of the token whose deferred part added the member.
    pub token: Arc<str>,
    /// Entity whose field contributed the member.
    pub owner: EntityId,
}

/// Stores master list membership.
///
/// Maintains bidirectional indices:
/// - Forward: list -> ordered entries
/// - Reverse: member -> lists containing it
#[derive(Clone, Debug, Default)]
pub struct MasterListStore {
    forward: HashMap<EntityId, Vec<MasterListEntry>>,
    reverse: HashMap<EntityId, HashSet<EntityId>>,
}

impl MasterListStore {
    /// Creates a new empty master list store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `member` to `list`.
    ///
    /// Adding an existing member is a no-op; the first entry keeps its
    /// provenance. Returns true if the member was newly added.
    pub fn add(&mut self, token: &str, owner: EntityId, list: EntityId, member: EntityId) -> bool {
        if self.contains(list, member) {
            return false;
        }
        self.forward.entry(list).or_default().push(MasterListEntry {
            member,
            token: Arc::from(token),
            owner,
        });
        self.reverse.entry(member).or_default().insert(list);
        true
    }

    /// Returns the entries of `list` in insertion order.
    #[must_use]
    pub fn entries(&self, list: EntityId) -> &[MasterListEntry] {
        self.forward.get(&list).map_or(&[], Vec::as_slice)
    }

    /// Returns the members of `list` in insertion order.
    pub fn members(&self, list: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.entries(list).iter().map(|e| e.member)
    }

    /// Returns true if `member` is in `list`.
    #[must_use]
    pub fn contains(&self, list: EntityId, member: EntityId) -> bool {
        self.reverse
            .get(&member)
            .is_some_and(|lists| lists.contains(&list))
    }

    /// Returns every list containing `member`, sorted by id.
    #[must_use]
    pub fn lists_containing(&self, member: EntityId) -> Vec<EntityId> {
        let mut lists: Vec<_> = self
            .reverse
            .get(&member)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        lists.sort_unstable();
        lists
    }

    /// Returns the total number of entries across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.values().map(Vec::len).sum()
    }

    /// Returns true if no list has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
