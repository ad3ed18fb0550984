//! Scalar field values.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collections::LtVec;

/// Value held by a scalar field of an entity.
///
/// Values are immutable and cheaply cloneable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Whole number, e.g. a level or a cost.
    Int(i64),
    /// Free text.
    Text(Arc<str>),
    /// Ordered tag list (e.g. `TYPE` or `SUBSCHOOL`).
    ///
    /// Tags compare case-insensitively in [`Value::has_tag`]; their original
    /// spelling is kept for output.
    Tags(LtVec<Arc<str>>),
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(s: &str) -> Self {
        Self::Text(Arc::from(s))
    }

    /// Creates a tag list from string slices.
    #[must_use]
    pub fn tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Tags(tags.into_iter().map(Arc::from).collect())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(flag) = self { Some(*flag) } else { None }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        if let Self::Int(n) = self { Some(*n) } else { None }
    }

    /// Attempts to extract a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a tag list.
    #[must_use]
    pub fn as_tags(&self) -> Option<&LtVec<Arc<str>>> {
        match self {
            Self::Tags(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true if this is a tag list containing `tag` (ignoring case).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.as_tags()
            .is_some_and(|tags| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::Tags(tags) => {
                for (i, tag) in tags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(tag)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}
