//! Tag-list tokens stored as scalar tag values.
//!
//! `TYPE:Base.Magic` appends tags separated by `.`; `SUBSCHOOL:Fire|Useful`
//! does the same with `|`. A leading `.CLEAR` drops the existing tags first
//! and is remembered, so unparsing writes it back.

use std::sync::Arc;

use tabula_foundation::{EntityId, Error, ObjectType, Result, Value};
use tabula_storage::{ObjectStore, ScalarKey};

use crate::edit::Edit;
use crate::lst::{CLEAR, PIPE, split_items};
use crate::token::PrimaryToken;

/// A list of free-form tags kept in one scalar field.
#[derive(Debug)]
pub struct TagListToken {
    name: &'static str,
    token_type: ObjectType,
    key: ScalarKey,
    cleared: ScalarKey,
    separator: char,
}

impl TagListToken {
    /// Creates a tag token storing its tags under `key` and flagging a
    /// `.CLEAR` under `cleared`.
    #[must_use]
    pub fn new(
        name: &'static str,
        token_type: ObjectType,
        key: ScalarKey,
        cleared: ScalarKey,
        separator: char,
    ) -> Self {
        Self {
            name,
            token_type,
            key,
            cleared,
            separator,
        }
    }

    /// `TYPE` on objects of `token_type`.
    #[must_use]
    pub fn object_type(token_type: ObjectType) -> Self {
        Self::new("TYPE", token_type, ScalarKey::TYPE, ScalarKey::TYPE_CLEARED, '.')
    }

    /// `SUBSCHOOL` on spells.
    #[must_use]
    pub fn subschool() -> Self {
        Self::new(
            "SUBSCHOOL",
            ObjectType::SPELL,
            ScalarKey::SUBSCHOOL,
            ScalarKey::SUBSCHOOL_CLEARED,
            PIPE,
        )
    }

    /// A clear written after the first item. With `.` as separator it shows
    /// up as a bare `CLEAR`.
    fn is_misplaced_clear(&self, item: &str) -> bool {
        item == CLEAR || CLEAR.strip_prefix(self.separator) == Some(item)
    }

    /// Splits off a leading `.CLEAR`, returning whether it was present and
    /// the remaining text.
    fn strip_clear<'v>(&self, value: &'v str) -> Result<(bool, &'v str)> {
        let Some(rest) = value.strip_prefix(CLEAR) else {
            return Ok((false, value));
        };
        if rest.is_empty() {
            return Ok((true, rest));
        }
        match rest.strip_prefix(self.separator) {
            Some(tags) if !tags.is_empty() => Ok((true, tags)),
            _ => Err(Error::parse_conflict(
                self.name,
                format!(".CLEAR must be followed by {} and a tag", self.separator),
                value,
            )),
        }
    }
}

impl PrimaryToken for TagListToken {
    fn name(&self) -> &str {
        self.name
    }

    fn token_type(&self) -> &ObjectType {
        &self.token_type
    }

    fn separator(&self) -> char {
        self.separator
    }

    fn parse(&self, store: &mut ObjectStore, entity: EntityId, value: &str) -> Result<Edit> {
        let (clear, rest) = self.strip_clear(value)?;
        let items = if clear && rest.is_empty() {
            Vec::new()
        } else {
            split_items(self.name, rest, self.separator)?
        };
        if items.iter().any(|item| self.is_misplaced_clear(item)) {
            return Err(Error::parse_conflict(
                self.name,
                ".CLEAR was not the first list item",
                value,
            ));
        }

        let mut tags: Vec<Arc<str>> = if clear {
            Vec::new()
        } else {
            store
                .scalar(entity, self.key)?
                .and_then(Value::as_tags)
                .map(|existing| existing.iter().cloned().collect())
                .unwrap_or_default()
        };
        for item in items {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(item)) {
                tags.push(Arc::from(item));
            }
        }

        let value = (!tags.is_empty()).then(|| Value::Tags(tags.into_iter().collect()));
        let edit = Edit::Scalar {
            key: self.key,
            value,
        };
        if !clear {
            return Ok(edit);
        }
        Ok(Edit::Batch(vec![
            edit,
            Edit::Scalar {
                key: self.cleared,
                value: Some(Value::Bool(true)),
            },
        ]))
    }

    fn unparse(&self, store: &ObjectStore, entity: EntityId) -> Result<Option<Vec<String>>> {
        let cleared = store
            .scalar(entity, self.cleared)?
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let tags: Vec<&str> = store
            .scalar(entity, self.key)?
            .and_then(Value::as_tags)
            .map(|tags| tags.iter().map(AsRef::as_ref).collect())
            .unwrap_or_default();
        let joined = tags.join(self.separator.to_string().as_str());

        let fragment = match (cleared, joined.is_empty()) {
            (false, true) => return Ok(None),
            (false, false) => joined,
            (true, true) => CLEAR.to_string(),
            (true, false) => format!("{CLEAR}{}{joined}", self.separator),
        };
        Ok(Some(vec![fragment]))
    }
}
