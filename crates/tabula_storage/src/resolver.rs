//! Reference resolution.
//!
//! The resolver is the only way identifier text becomes a [`Reference`].
//! Resolution of a plain name never fails for a missing entity: it creates a
//! forward placeholder instead, because load order across files does not
//! follow reference order.

use std::sync::Arc;

use tabula_foundation::{Error, ObjectType, Result};
use tracing::trace;

use crate::reference::Reference;
use crate::store::ObjectStore;

/// Sentinel naming every entity of the target type.
pub const ALL: &str = "ALL";

/// Trailing marker of a prefix pattern.
pub const PATTERN_MARKER: char = '%';

/// Prefix of a type-tag reference.
pub const TYPE_PREFIX: &str = "TYPE=";

/// Alternate spelling of [`TYPE_PREFIX`].
const TYPE_PREFIX_DOT: &str = "TYPE.";

/// Separator between the tags of a type-tag reference.
const TAG_SEPARATOR: char = '.';

/// Separator of the compound `name:qualifier` form.
const QUALIFIER_SEPARATOR: char = ':';

/// Resolves identifier text against one store.
///
/// Resolution only ever touches the store's directory of names; it never
/// changes the fields of an existing entity.
#[derive(Debug)]
pub struct Resolver<'s> {
    store: &'s mut ObjectStore,
}

impl<'s> Resolver<'s> {
    /// Creates a resolver over `store`.
    pub fn new(store: &'s mut ObjectStore) -> Self {
        Self { store }
    }

    /// Resolves `text` to a reference of `object_type`.
    ///
    /// - `ALL` resolves to every entity of the type.
    /// - `Prefix%` resolves to every entity whose name starts with `Prefix`.
    /// - `TYPE=A.B` resolves to every entity tagged with both `A` and `B`.
    /// - Anything else is a name (optionally `name:qualifier`) and resolves to
    ///   a direct reference, creating a placeholder if needed.
    ///
    /// # Errors
    ///
    /// Returns a resolution failure for text that cannot name anything: an
    /// empty string, a misplaced or bare pattern marker, an empty tag list, or
    /// a malformed compound name.
    pub fn resolve(&mut self, object_type: &ObjectType, text: &str) -> Result<Reference> {
        let fail = |reason: &str| Error::resolution(object_type.clone(), text, reason);

        if text.is_empty() {
            return Err(fail("empty identifier"));
        }
        if text == ALL {
            return Ok(Reference::all(object_type.clone()));
        }
        if let Some(tags) = text
            .strip_prefix(TYPE_PREFIX)
            .or_else(|| text.strip_prefix(TYPE_PREFIX_DOT))
        {
            let tags: Vec<Arc<str>> = tags
                .split(TAG_SEPARATOR)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(Arc::from)
                .collect();
            if tags.is_empty() {
                return Err(fail("type reference without tags"));
            }
            return Ok(Reference::Type {
                object_type: object_type.clone(),
                tags,
            });
        }
        if let Some(at) = text.find(PATTERN_MARKER) {
            if at + PATTERN_MARKER.len_utf8() != text.len() {
                return Err(fail("pattern marker must be the last character"));
            }
            if at == 0 {
                return Err(fail("pattern without prefix, use ALL"));
            }
            return Ok(Reference::Pattern {
                object_type: object_type.clone(),
                prefix: Arc::from(&text[..at]),
            });
        }

        validate_name(text).map_err(fail)?;
        let id = self.store.placeholder(object_type, text);
        trace!(%object_type, text, %id, "resolved direct reference");
        Ok(Reference::Direct {
            object_type: object_type.clone(),
            id,
        })
    }
}

fn validate_name(text: &str) -> std::result::Result<(), &'static str> {
    if text.trim() != text {
        return Err("surrounding whitespace");
    }
    let mut parts = text.split(QUALIFIER_SEPARATOR);
    let name = parts.next().unwrap_or_default();
    match (parts.next(), parts.next()) {
        (None, _) => Ok(()),
        (Some(_), Some(_)) => Err("more than one qualifier"),
        (Some(qualifier), None) if name.is_empty() || qualifier.is_empty() => {
            Err("empty name or qualifier")
        }
        (Some(_), None) => Ok(()),
    }
}
