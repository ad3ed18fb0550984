//! Field keys for entity fields.
//!
//! Each field of an entity is addressed by a typed key. The key type fixes the
//! field's shape: a [`ScalarKey`] holds one [`Value`](tabula_foundation::Value),
//! a [`ListKey`] holds an ordered list of references, and an [`ObjectKey`]
//! holds exactly one owned reference to another entity.

use std::fmt;

/// The three shapes a field can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// A single value.
    Scalar,
    /// An ordered sequence of references; duplicates permitted.
    List,
    /// Exactly one reference to another entity.
    SingleReference,
}

macro_rules! field_key {
    ($(#[$meta:meta])* $name:ident, $shape:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(&'static str);

        impl $name {
            /// Creates a key with the given field name.
            #[must_use]
            pub const fn new(name: &'static str) -> Self {
                Self(name)
            }

            /// Returns the field name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                self.0
            }

            /// Returns the shape of fields addressed by this key type.
            #[must_use]
            pub const fn shape(self) -> FieldShape {
                $shape
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0)
            }
        }
    };
}

field_key!(
    /// Key of a list-valued field.
    ListKey,
    FieldShape::List
);

field_key!(
    /// Key of a scalar field.
    ScalarKey,
    FieldShape::Scalar
);

field_key!(
    /// Key of a single-reference field.
    ObjectKey,
    FieldShape::SingleReference
);

impl ListKey {
    /// Skills that are class skills for a class.
    pub const CLASS_SKILL: Self = Self::new("CLASS_SKILL");
    /// Skills that are cross-class skills for a class.
    pub const CROSS_CLASS_SKILL: Self = Self::new("CROSS_CLASS_SKILL");
}

impl ScalarKey {
    /// Type tags of an object (`TYPE` token).
    pub const TYPE: Self = Self::new("TYPE");
    /// Subschool tags of a spell (`SUBSCHOOL` token).
    pub const SUBSCHOOL: Self = Self::new("SUBSCHOOL");
    /// Damage dice of a weapon (`DAMAGE` token), stored in canonical form.
    pub const DAMAGE: Self = Self::new("DAMAGE");
    /// Set once `TYPE:.CLEAR` has been applied.
    pub const TYPE_CLEARED: Self = Self::new("TYPE_CLEARED");
    /// Set once `SUBSCHOOL:.CLEAR` has been applied.
    pub const SUBSCHOOL_CLEARED: Self = Self::new("SUBSCHOOL_CLEARED");
}

impl ObjectKey {
    /// The class skill list object owned by a class.
    pub const CLASS_SKILL_LIST: Self = Self::new("CLASS_SKILL_LIST");
}
