use tabula_storage::{ObjectStore, ScalarKey};

use super::PrerequisiteKind;
use crate::character::Character;

/// `SPELLSCHOOLSUB`: known spells tagged with the named subschool.
///
/// A spell known through several classes counts once.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpellSubSchoolKind;

impl PrerequisiteKind for SpellSubSchoolKind {
    fn tag(&self) -> &str {
        "SPELLSCHOOLSUB"
    }

    fn count(&self, key: &str, character: &Character, store: &ObjectStore) -> i64 {
        let count = character
            .all_known_spells()
            .into_iter()
            .filter(|&spell| {
                store
                    .scalar(spell, ScalarKey::SUBSCHOOL)
                    .ok()
                    .flatten()
                    .is_some_and(|tags| tags.has_tag(key))
            })
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }
}
