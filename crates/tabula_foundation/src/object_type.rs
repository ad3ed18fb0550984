//! Object type descriptors.
//!
//! Every entity in the object graph belongs to exactly one [`ObjectType`].
//! Names are unique within a type, so `(ObjectType, name)` is the lookup key.

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The type of a rules-data object (class, skill, spell, ...).
///
/// The set of types is open: tokens and data may introduce new ones with
/// [`ObjectType::new`]. The well-known types are provided as constants.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectType(Cow<'static, str>);

impl ObjectType {
    /// Character classes.
    pub const CLASS: Self = Self(Cow::Borrowed("CLASS"));
    /// Skills.
    pub const SKILL: Self = Self(Cow::Borrowed("SKILL"));
    /// Spells.
    pub const SPELL: Self = Self(Cow::Borrowed("SPELL"));
    /// Equipment.
    pub const EQUIPMENT: Self = Self(Cow::Borrowed("EQUIPMENT"));
    /// The master skill list shared by a class and its levels.
    pub const CLASS_SKILL_LIST: Self = Self(Cow::Borrowed("CLASSSKILLLIST"));

    /// Creates an object type from its name.
    ///
    /// Type names are normalized to upper case.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        if name.chars().any(char::is_lowercase) {
            Self(Cow::Owned(name.to_uppercase()))
        } else {
            Self(name)
        }
    }

    /// Returns the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectType({})", self.0)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
