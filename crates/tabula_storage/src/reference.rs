//! References: resolved handles to one or more entities.
//!
//! Only [`Reference::Direct`] names a single entity. The other variants are
//! predicates over the store, evaluated lazily every time membership is asked
//! for, so entities defined later in the load still qualify.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tabula_foundation::{EntityId, ObjectType};

use crate::entity::Entity;
use crate::keys::ScalarKey;
use crate::store::ObjectStore;

/// A resolved handle to one or more entities of a single type.
///
/// Equality is structural: two references are equal when they have the same
/// variant and the same matching criterion. Pattern prefixes and type tags
/// compare without regard to case, the same way entity names do.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Reference {
    /// Exactly one entity.
    Direct {
        /// Type of the entity.
        object_type: ObjectType,
        /// The entity.
        id: EntityId,
    },
    /// Every entity of the type, including ones defined later.
    All {
        /// The type.
        object_type: ObjectType,
    },
    /// Every entity of the type whose name starts with `prefix`.
    Pattern {
        /// The type whose "all" set is filtered.
        object_type: ObjectType,
        /// Name prefix (the text before the `%` marker).
        prefix: Arc<str>,
    },
    /// Every entity of the type carrying all of the given `TYPE` tags.
    Type {
        /// The type whose "all" set is filtered.
        object_type: ObjectType,
        /// Required tags.
        tags: Vec<Arc<str>>,
    },
}

impl Reference {
    /// Creates a reference to every entity of `object_type`.
    #[must_use]
    pub fn all(object_type: ObjectType) -> Self {
        Self::All { object_type }
    }

    /// Returns the type this reference ranges over.
    #[must_use]
    pub fn object_type(&self) -> &ObjectType {
        match self {
            Self::Direct { object_type, .. }
            | Self::All { object_type }
            | Self::Pattern { object_type, .. }
            | Self::Type { object_type, .. } => object_type,
        }
    }

    /// Returns true for the "all of type" variant.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All { .. })
    }

    /// Returns the single entity of a direct reference.
    #[must_use]
    pub fn direct_id(&self) -> Option<EntityId> {
        match self {
            Self::Direct { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Tests whether `entity` is a member of this reference.
    ///
    /// Group references only match defined entities; a placeholder that was
    /// never defined is reachable only through a direct reference.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        if entity.object_type() != self.object_type() {
            return false;
        }
        match self {
            Self::Direct { id, .. } => entity.id() == *id,
            Self::All { .. } => entity.is_defined(),
            Self::Pattern { prefix, .. } => {
                entity.is_defined() && starts_with_ignore_case(entity.name(), prefix)
            }
            Self::Type { tags, .. } => {
                entity.is_defined()
                    && entity
                        .scalar(ScalarKey::TYPE)
                        .is_some_and(|value| tags.iter().all(|tag| value.has_tag(tag)))
            }
        }
    }

    /// Returns the entities currently contained in this reference, in
    /// definition order.
    #[must_use]
    pub fn contained(&self, store: &ObjectStore) -> Vec<EntityId> {
        match self {
            Self::Direct { id, .. } => vec![*id],
            _ => store
                .entities_of(self.object_type())
                .filter(|e| self.matches(e))
                .map(Entity::id)
                .collect(),
        }
    }

    /// Formats this reference the way it is written in token text.
    ///
    /// Direct references print the entity's current display name, so a
    /// placeholder that was later defined prints with the defined spelling.
    #[must_use]
    pub fn lst_format(&self, store: &ObjectStore) -> String {
        match self {
            Self::Direct { id, .. } => store
                .entity(*id)
                .map_or_else(|_| id.to_string(), |e| e.name().to_string()),
            Self::All { .. } => crate::resolver::ALL.to_string(),
            Self::Pattern { prefix, .. } => format!("{prefix}{}", crate::resolver::PATTERN_MARKER),
            Self::Type { tags, .. } => {
                let joined: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
                format!("{}{}", crate::resolver::TYPE_PREFIX, joined.join("."))
            }
        }
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Direct {
                    object_type: a,
                    id: x,
                },
                Self::Direct {
                    object_type: b,
                    id: y,
                },
            ) => a == b && x == y,
            (Self::All { object_type: a }, Self::All { object_type: b }) => a == b,
            (
                Self::Pattern {
                    object_type: a,
                    prefix: p,
                },
                Self::Pattern {
                    object_type: b,
                    prefix: q,
                },
            ) => a == b && p.eq_ignore_ascii_case(q),
            (
                Self::Type {
                    object_type: a,
                    tags: s,
                },
                Self::Type {
                    object_type: b,
                    tags: t,
                },
            ) => a == b && same_tags(s, t),
            _ => false,
        }
    }
}

impl Eq for Reference {}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.is_char_boundary(prefix.len())
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Tag lists are equal as sets, ignoring case.
fn same_tags(a: &[Arc<str>], b: &[Arc<str>]) -> bool {
    let contains = |set: &[Arc<str>], tag: &Arc<str>| set.iter().any(|t| t.eq_ignore_ascii_case(tag));
    a.iter().all(|t| contains(b, t)) && b.iter().all(|t| contains(a, t))
}
