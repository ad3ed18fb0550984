//! Character state that prerequisites are evaluated against.
//!
//! A `Character` is a persistent value: cloning is O(1), so a caller can
//! take a snapshot for evaluation while it keeps mutating its own copy on
//! level-up or spell acquisition.

use std::sync::Arc;

use tabula_foundation::EntityId;

/// The accumulated state of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Character {
    /// Levels per class entity.
    class_levels: im::OrdMap<EntityId, u32>,
    /// Known spells per class entity.
    known_spells: im::OrdMap<EntityId, im::OrdSet<EntityId>>,
    /// Named counters, keys upper-cased.
    counters: im::HashMap<Arc<str>, i64>,
    /// Equipment item in the primary hand.
    wielded: Option<EntityId>,
}

impl Character {
    /// Creates a character with no levels, spells, or counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one level in `class`, returning the new level.
    pub fn add_class_level(&mut self, class: EntityId) -> u32 {
        let level = self.class_level(class) + 1;
        self.class_levels.insert(class, level);
        level
    }

    /// Returns the levels taken in `class`.
    #[must_use]
    pub fn class_level(&self, class: EntityId) -> u32 {
        self.class_levels.get(&class).copied().unwrap_or(0)
    }

    /// Returns the classes the character has levels in, ordered by id.
    pub fn classes(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.class_levels.keys().copied()
    }

    /// Returns the sum of levels in all classes.
    #[must_use]
    pub fn total_level(&self) -> u32 {
        self.class_levels.values().sum()
    }

    /// Records that `spell` is known through `class`. Returns false if it was
    /// already known through that class.
    pub fn learn_spell(&mut self, class: EntityId, spell: EntityId) -> bool {
        let mut spells = self.known_spells.get(&class).cloned().unwrap_or_default();
        let added = spells.insert(spell).is_none();
        self.known_spells.insert(class, spells);
        added
    }

    /// Returns the spells known through `class`.
    pub fn known_spells(&self, class: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.known_spells
            .get(&class)
            .into_iter()
            .flat_map(|spells| spells.iter().copied())
    }

    /// Returns every known spell across all classes, each once.
    #[must_use]
    pub fn all_known_spells(&self) -> im::OrdSet<EntityId> {
        im::OrdSet::unions(self.known_spells.values().cloned())
    }

    /// Puts `item` in the primary hand, returning what was there before.
    pub fn wield(&mut self, item: EntityId) -> Option<EntityId> {
        self.wielded.replace(item)
    }

    /// The item in the primary hand, if any.
    #[must_use]
    pub fn wielded(&self) -> Option<EntityId> {
        self.wielded
    }

    /// Sets a named counter.
    pub fn set_counter(&mut self, name: &str, value: i64) {
        self.counters
            .insert(Arc::from(name.to_ascii_uppercase()), value);
    }

    /// Returns a named counter; a counter never set reads as 0.
    #[must_use]
    pub fn counter(&self, name: &str) -> i64 {
        self.counters
            .get(name.to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or(0)
    }
}
