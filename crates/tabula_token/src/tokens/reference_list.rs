//! List-edit tokens whose items are references.
//!
//! `CSKILL` is the canonical example: `Skill1|Skill2`, `ALL`, `Knowledge%`,
//! `.CLEAR` as the first item, and `.CLEAR.<ref>` for targeted removal.

use std::sync::Arc;

use tabula_foundation::{EntityId, Error, ObjectType, Result};
use tabula_storage::{ChangeSet, Entity, ListKey, ObjectKey, ObjectStore, Reference, Resolver};
use tracing::{debug, warn};

use crate::edit::Edit;
use crate::lst::{CLEAR, CLEAR_DOT, PIPE, split_items};
use crate::token::{DeferredToken, PrimaryToken};

/// A `|`-separated list of references stored in one list field.
#[derive(Debug)]
pub struct ReferenceListToken {
    name: &'static str,
    token_type: ObjectType,
    target: ObjectType,
    key: ListKey,
    deferred: Option<Arc<MasterListTask>>,
}

impl ReferenceListToken {
    /// Creates a token `name` on `token_type` objects whose items resolve to
    /// `target` objects and are stored under `key`.
    #[must_use]
    pub fn new(name: &'static str, token_type: ObjectType, target: ObjectType, key: ListKey) -> Self {
        Self {
            name,
            token_type,
            target,
            key,
            deferred: None,
        }
    }

    /// Adds a deferred part that copies the field's members into a master list.
    #[must_use]
    pub fn with_master_list(mut self, task: MasterListTask) -> Self {
        self.deferred = Some(Arc::new(task));
        self
    }

    /// `CSKILL`: class skills of a class. Its deferred part fills the class
    /// skill list at priority 0.
    #[must_use]
    pub fn class_skill() -> Self {
        Self::new(
            "CSKILL",
            ObjectType::CLASS,
            ObjectType::SKILL,
            ListKey::CLASS_SKILL,
        )
        .with_master_list(MasterListTask {
            token: "CSKILL",
            key: ListKey::CLASS_SKILL,
            owner_key: ObjectKey::CLASS_SKILL_LIST,
            list_type: ObjectType::CLASS_SKILL_LIST,
            priority: 0,
        })
    }

    /// `CCSKILL`: cross-class skills of a class.
    #[must_use]
    pub fn cross_class_skill() -> Self {
        Self::new(
            "CCSKILL",
            ObjectType::CLASS,
            ObjectType::SKILL,
            ListKey::CROSS_CLASS_SKILL,
        )
    }

    /// Returns the field this token edits.
    #[must_use]
    pub fn key(&self) -> ListKey {
        self.key
    }

    fn conflict(&self, message: &str, value: &str) -> Error {
        Error::parse_conflict(self.name, message, value)
    }
}

impl PrimaryToken for ReferenceListToken {
    fn name(&self) -> &str {
        self.name
    }

    fn token_type(&self) -> &ObjectType {
        &self.token_type
    }

    fn separator(&self) -> char {
        PIPE
    }

    fn parse(&self, store: &mut ObjectStore, _entity: EntityId, value: &str) -> Result<Edit> {
        let items = split_items(self.name, value, PIPE)?;
        let mut resolver = Resolver::new(store);
        let mut changes = ChangeSet::new();
        let mut found_all = false;
        let mut found_other = false;

        for (index, item) in items.into_iter().enumerate() {
            if item == CLEAR {
                if index != 0 {
                    return Err(self.conflict(".CLEAR was not the first list item", value));
                }
                changes.clear_all();
            } else if let Some(target) = item.strip_prefix(CLEAR_DOT) {
                changes.remove(resolver.resolve(&self.target, target)?);
            } else {
                let reference = resolver.resolve(&self.target, item)?;
                if reference.is_all() {
                    found_all = true;
                } else {
                    found_other = true;
                }
                changes.add(reference);
            }
        }

        if found_all && found_other {
            return Err(self.conflict("ALL may not be used with specific items", value));
        }
        Ok(Edit::List {
            key: self.key,
            changes,
        })
    }

    fn unparse(&self, store: &ObjectStore, entity: EntityId) -> Result<Option<Vec<String>>> {
        let changes = store.list_changes(entity, self.key)?;
        let mut fragments = Vec::new();

        if changes.includes_global_clear() {
            if !changes.removed().is_empty() {
                return Err(Error::serialization_conflict(
                    self.name,
                    "global .CLEAR and targeted .CLEAR. are both in effect",
                ));
            }
            fragments.push(CLEAR.to_string());
        } else if !changes.removed().is_empty() {
            let separator = format!("{PIPE}{CLEAR_DOT}");
            fragments.push(format!(
                "{CLEAR_DOT}{}",
                join_lst(changes.removed(), store, &separator)
            ));
        }
        // ALL cannot share a fragment with other items.
        let (all, specific): (Vec<Reference>, Vec<Reference>) =
            changes.added().iter().cloned().partition(Reference::is_all);
        if let Some(all) = all.first() {
            fragments.push(all.lst_format(store));
        }
        if !specific.is_empty() {
            fragments.push(join_lst(&specific, store, &PIPE.to_string()));
        }

        Ok((!fragments.is_empty()).then_some(fragments))
    }

    fn deferred(&self) -> Option<Arc<dyn DeferredToken>> {
        self.deferred
            .clone()
            .map(|task| task as Arc<dyn DeferredToken>)
    }
}

fn join_lst(references: &[Reference], store: &ObjectStore, separator: &str) -> String {
    references
        .iter()
        .map(|r| r.lst_format(store))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Copies the members of a list field into the master list owned by the
/// entity's list object, creating that object on first use.
#[derive(Debug, Clone)]
pub struct MasterListTask {
    /// Token name recorded as the provenance of each entry.
    pub token: &'static str,
    /// Source field.
    pub key: ListKey,
    /// Single-reference field naming the list object.
    pub owner_key: ObjectKey,
    /// Type of the list object.
    pub list_type: ObjectType,
    /// Scheduling priority.
    pub priority: i32,
}

impl MasterListTask {
    fn list_object(&self, store: &mut ObjectStore, entity: EntityId) -> Result<EntityId> {
        if let Some(list) = store.object(entity, self.owner_key)? {
            return Ok(list);
        }
        let name = store.entity(entity)?.name().to_string();
        let (list, _) = store.construct(&self.list_type, &name);
        store.set_object(entity, self.owner_key, list)?;
        Ok(list)
    }
}

impl DeferredToken for MasterListTask {
    fn name(&self) -> &str {
        self.token
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn process(&self, store: &mut ObjectStore, entity: EntityId) -> Result<()> {
        let list = self.list_object(store, entity)?;
        let (members, undefined): (Vec<EntityId>, Vec<EntityId>) = store
            .list(entity, self.key)?
            .iter()
            .flat_map(|r| r.contained(store))
            .partition(|&id| store.entity(id).is_ok_and(Entity::is_defined));
        for id in undefined {
            warn!(token = self.token, %entity, member = %id, "skipping undefined master list member");
        }

        let master = store.master_lists_mut();
        let added = members
            .into_iter()
            .filter(|&member| master.add(self.token, entity, list, member))
            .count();
        debug!(token = self.token, %entity, %list, added, "master list updated");
        Ok(())
    }
}
