//! The contracts every token implements.

use std::fmt;
use std::sync::Arc;

use tabula_foundation::{EntityId, ObjectType, Result};
use tabula_storage::ObjectStore;

use crate::edit::Edit;

/// A token parsed during the primary pass.
///
/// `parse` may resolve references (and so create placeholders) through the
/// store, but must not write field content; it returns the [`Edit`] to commit.
/// `unparse` is its inverse: the canonical fragments that reproduce the
/// field's edits, or `None` if the field was never edited.
pub trait PrimaryToken: Send + Sync {
    /// Token name as it appears in data, e.g. `CSKILL`.
    fn name(&self) -> &str;

    /// Type of object this token applies to.
    fn token_type(&self) -> &ObjectType;

    /// Item delimiter.
    fn separator(&self) -> char;

    /// Parses `value` for `entity`.
    ///
    /// # Errors
    ///
    /// Returns a parse conflict or resolution failure; nothing is committed.
    fn parse(&self, store: &mut ObjectStore, entity: EntityId, value: &str) -> Result<Edit>;

    /// Writes the field back out.
    ///
    /// # Errors
    ///
    /// Returns a serialization conflict if the history is contradictory.
    fn unparse(&self, store: &ObjectStore, entity: EntityId) -> Result<Option<Vec<String>>>;

    /// The second-pass part of this token, if it has one.
    fn deferred(&self) -> Option<Arc<dyn DeferredToken>> {
        None
    }
}

/// Work run once after every primary token of a load unit was parsed.
pub trait DeferredToken: Send + Sync {
    /// Name used for de-duplication and in diagnostics.
    fn name(&self) -> &str;

    /// Lower priorities run first.
    fn priority(&self) -> i32;

    /// Finalizes `entity` against the fully loaded store.
    ///
    /// Must be idempotent: running it again adds nothing.
    ///
    /// # Errors
    ///
    /// Returns a deferred task failure; other tasks still run.
    fn process(&self, store: &mut ObjectStore, entity: EntityId) -> Result<()>;
}

impl fmt::Debug for dyn PrimaryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimaryToken({}:{})", self.token_type(), self.name())
    }
}

impl fmt::Debug for dyn DeferredToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredToken({}@{})", self.name(), self.priority())
    }
}
