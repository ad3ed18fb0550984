//! Field edits produced by token parsing.
//!
//! Parsing never writes field content directly. A token returns an [`Edit`]
//! and the load context commits it only once the whole value parsed, so a
//! failing token leaves every field as it was.

use tabula_foundation::{EntityId, Result, Value};
use tabula_storage::{ChangeSet, ListKey, ObjectStore, ScalarKey};

/// A pending change to one field of one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Apply a change set to a list field and append it to the field's log.
    List {
        /// The field.
        key: ListKey,
        /// What to clear, remove, and add.
        changes: ChangeSet,
    },
    /// Replace (or with `None`, remove) a scalar field.
    Scalar {
        /// The field.
        key: ScalarKey,
        /// The new value.
        value: Option<Value>,
    },
    /// Several edits to the same entity, committed in order.
    Batch(Vec<Edit>),
}

impl Edit {
    /// Returns the name of the edited field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::List { key, .. } => key.name(),
            Self::Scalar { key, .. } => key.name(),
            Self::Batch(edits) => edits.first().map_or("", Self::field),
        }
    }

    /// Writes this edit to `entity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn commit(self, store: &mut ObjectStore, entity: EntityId) -> Result<()> {
        match self {
            Self::List { key, changes } => store.commit_list(entity, key, changes),
            Self::Scalar {
                key,
                value: Some(value),
            } => store.set_scalar(entity, key, value),
            Self::Scalar { key, value: None } => store.remove_scalar(entity, key).map(drop),
            Self::Batch(edits) => edits
                .into_iter()
                .try_for_each(|edit| edit.commit(store, entity)),
        }
    }
}
