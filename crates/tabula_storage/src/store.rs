//! The object graph store.
//!
//! `ObjectStore` owns every entity of a load session. Entities live in an
//! arena indexed by [`EntityId`]; a directory maps `(type, folded name)` to
//! ids. All backing collections are persistent, so cloning the store is O(1)
//! and a finished load can be handed to evaluators as a cheap snapshot.

use std::ops::Deref;
use std::sync::Arc;

use tabula_foundation::{EntityId, Error, LtVec, ObjectType, Result, Value};
use tracing::trace;

use crate::changes::{ChangeSet, Changes};
use crate::entity::{Definition, Entity};
use crate::keys::{ListKey, ObjectKey, ScalarKey};
use crate::master_list::MasterListStore;
use crate::reference::Reference;

/// Directory key: names are unique per type, compared without case.
type DirectoryKey = (ObjectType, Arc<str>);

fn directory_key(object_type: &ObjectType, name: &str) -> DirectoryKey {
    (object_type.clone(), Arc::from(name.to_ascii_uppercase()))
}

/// Typed entities and their fields.
#[derive(Clone, Debug, Default)]
pub struct ObjectStore {
    /// Entity arena, indexed by `EntityId::slot`.
    entities: im::Vector<Entity>,
    /// `(type, folded name)` to id.
    directory: im::HashMap<DirectoryKey, EntityId>,
    /// Master lists populated by deferred processing.
    master_lists: Arc<MasterListStore>,
}

impl ObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entities, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the store holds no entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // =========================================================================
    // Definition and lookup
    // =========================================================================

    /// Defines the entity `name` of `object_type`.
    ///
    /// If a forward placeholder of that name exists it is upgraded in place
    /// and keeps its id, so references taken earlier stay valid.
    pub fn construct(&mut self, object_type: &ObjectType, name: &str) -> (EntityId, Definition) {
        match self.lookup(object_type, name) {
            Some(id) => {
                let entity = &mut self.entities[id.slot()];
                if entity.is_defined() {
                    (id, Definition::Duplicate)
                } else {
                    entity.define(name);
                    (id, Definition::Placeholder)
                }
            }
            None => (self.insert(object_type, name, true), Definition::Created),
        }
    }

    /// Returns the entity named `name`, creating an undefined placeholder if
    /// there is none yet.
    pub fn placeholder(&mut self, object_type: &ObjectType, name: &str) -> EntityId {
        self.lookup(object_type, name)
            .unwrap_or_else(|| self.insert(object_type, name, false))
    }

    fn insert(&mut self, object_type: &ObjectType, name: &str, defined: bool) -> EntityId {
        #[allow(clippy::cast_possible_truncation)]
        let id = EntityId::new(self.entities.len() as u32);
        self.entities
            .push_back(Entity::new(id, object_type.clone(), name, defined));
        self.directory.insert(directory_key(object_type, name), id);
        trace!(%id, %object_type, entity = name, defined, "entity created");
        id
    }

    /// Looks up an entity by type and name, ignoring case.
    #[must_use]
    pub fn lookup(&self, object_type: &ObjectType, name: &str) -> Option<EntityId> {
        self.directory
            .get(&directory_key(object_type, name))
            .copied()
    }

    /// Returns an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this store.
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities
            .get(id.slot())
            .ok_or_else(|| Error::entity_not_found(id))
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities
            .get_mut(id.slot())
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Returns every entity, in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Returns every entity of `object_type` (placeholders included), in
    /// creation order.
    pub fn entities_of<'a>(&'a self, object_type: &'a ObjectType) -> impl Iterator<Item = &'a Entity> {
        self.entities
            .iter()
            .filter(move |e| e.object_type() == object_type)
    }

    /// Returns placeholders that were referenced but never defined.
    pub fn undefined(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.is_defined())
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Returns the content of a list field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn list(&self, id: EntityId, key: ListKey) -> Result<LtVec<Reference>> {
        Ok(self.entity(id)?.list(key))
    }

    /// Returns the committed change sets of a list field, in commit order.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn list_log(&self, id: EntityId, key: ListKey) -> Result<LtVec<ChangeSet>> {
        Ok(self.entity(id)?.list_log(key))
    }

    /// Returns the consolidated change history of a list field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn list_changes(&self, id: EntityId, key: ListKey) -> Result<Changes> {
        let log = self.list_log(id, key)?;
        Ok(Changes::from_log(log.iter()))
    }

    /// Applies a change set to a list field and records it in the field's log.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn commit_list(&mut self, id: EntityId, key: ListKey, changes: ChangeSet) -> Result<()> {
        self.entity_mut(id)?.commit_list(key, changes);
        Ok(())
    }

    /// Returns a scalar field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn scalar(&self, id: EntityId, key: ScalarKey) -> Result<Option<&Value>> {
        Ok(self.entity(id)?.scalar(key))
    }

    /// Sets a scalar field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn set_scalar(&mut self, id: EntityId, key: ScalarKey, value: Value) -> Result<()> {
        self.entity_mut(id)?.set_scalar(key, value);
        Ok(())
    }

    /// Removes a scalar field, returning its previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn remove_scalar(&mut self, id: EntityId, key: ScalarKey) -> Result<Option<Value>> {
        Ok(self.entity_mut(id)?.remove_scalar(key))
    }

    /// Returns a single-reference field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn object(&self, id: EntityId, key: ObjectKey) -> Result<Option<EntityId>> {
        Ok(self.entity(id)?.object(key))
    }

    /// Sets a single-reference field.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity does not exist.
    pub fn set_object(&mut self, id: EntityId, key: ObjectKey, target: EntityId) -> Result<()> {
        self.entity(target)?;
        self.entity_mut(id)?.set_object(key, target);
        Ok(())
    }

    // =========================================================================
    // Master lists
    // =========================================================================

    /// Returns the master list store.
    #[must_use]
    pub fn master_lists(&self) -> &MasterListStore {
        &self.master_lists
    }

    /// Returns a mutable reference to the master list store.
    pub fn master_lists_mut(&mut self) -> &mut MasterListStore {
        Arc::make_mut(&mut self.master_lists)
    }

    /// Ends construction. The returned store can only be read.
    #[must_use]
    pub fn freeze(self) -> FrozenStore {
        trace!(entities = self.len(), "store frozen");
        FrozenStore(self)
    }
}

/// A finished object graph.
///
/// Dereferences to [`ObjectStore`] for lookups and evaluation but offers no
/// way back to a mutable store. Clones share structure.
///
/// ```compile_fail
/// use tabula_foundation::ObjectType;
/// use tabula_storage::ObjectStore;
///
/// let mut frozen = ObjectStore::new().freeze();
/// frozen.construct(&ObjectType::SKILL, "Climb");
/// ```
#[derive(Clone, Debug, Default)]
pub struct FrozenStore(ObjectStore);

impl Deref for FrozenStore {
    type Target = ObjectStore;

    fn deref(&self) -> &ObjectStore {
        &self.0
    }
}
