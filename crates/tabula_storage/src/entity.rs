//! Entity records.
//!
//! An entity is created either by its first real definition or by the first
//! forward reference to its name. In the second case it starts life as a
//! placeholder; the later definition upgrades it in place, keeping its id.

use std::sync::Arc;

use tabula_foundation::{EntityId, LtVec, ObjectType, Value};

use crate::changes::ChangeSet;
use crate::keys::{ListKey, ObjectKey, ScalarKey};
use crate::reference::Reference;

/// Outcome of defining an entity by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Definition {
    /// No entity of that name existed; a new one was created.
    Created,
    /// A forward placeholder existed and is now defined.
    Placeholder,
    /// The entity was already defined.
    Duplicate,
}

/// A typed game object and its fields.
#[derive(Clone, Debug)]
pub struct Entity {
    id: EntityId,
    object_type: ObjectType,
    name: Arc<str>,
    defined: bool,
    scalars: im::HashMap<ScalarKey, Value>,
    lists: im::HashMap<ListKey, LtVec<Reference>>,
    /// Committed change sets per list field, in commit order.
    history: im::HashMap<ListKey, LtVec<ChangeSet>>,
    objects: im::HashMap<ObjectKey, EntityId>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, object_type: ObjectType, name: &str, defined: bool) -> Self {
        Self {
            id,
            object_type,
            name: Arc::from(name),
            defined,
            scalars: im::HashMap::new(),
            lists: im::HashMap::new(),
            history: im::HashMap::new(),
            objects: im::HashMap::new(),
        }
    }

    /// Returns the entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's type.
    #[must_use]
    pub fn object_type(&self) -> &ObjectType {
        &self.object_type
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns false while the entity is only a forward placeholder.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.defined
    }

    pub(crate) fn define(&mut self, name: &str) {
        self.defined = true;
        if *self.name != *name {
            self.name = Arc::from(name);
        }
    }

    /// Returns a scalar field.
    #[must_use]
    pub fn scalar(&self, key: ScalarKey) -> Option<&Value> {
        self.scalars.get(&key)
    }

    pub(crate) fn set_scalar(&mut self, key: ScalarKey, value: Value) {
        self.scalars.insert(key, value);
    }

    pub(crate) fn remove_scalar(&mut self, key: ScalarKey) -> Option<Value> {
        self.scalars.remove(&key)
    }

    /// Returns the content of a list field (empty if never edited).
    #[must_use]
    pub fn list(&self, key: ListKey) -> LtVec<Reference> {
        self.lists.get(&key).cloned().unwrap_or_default()
    }

    /// Returns the committed change sets of a list field.
    #[must_use]
    pub fn list_log(&self, key: ListKey) -> LtVec<ChangeSet> {
        self.history.get(&key).cloned().unwrap_or_default()
    }

    /// Applies a change set to a list field and appends it to the field's log.
    pub(crate) fn commit_list(&mut self, key: ListKey, changes: ChangeSet) {
        let content = changes.apply_to(&self.list(key));
        self.lists.insert(key, content);
        let log = self.list_log(key).push_back(changes);
        self.history.insert(key, log);
    }

    /// Returns the keys of every list field that has been edited.
    pub fn list_keys(&self) -> impl Iterator<Item = ListKey> + '_ {
        self.history.keys().copied()
    }

    /// Returns a single-reference field.
    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<EntityId> {
        self.objects.get(&key).copied()
    }

    pub(crate) fn set_object(&mut self, key: ObjectKey, target: EntityId) {
        self.objects.insert(key, target);
    }
}
