use tabula_foundation::ObjectType;
use tabula_storage::ObjectStore;

use super::PrerequisiteKind;
use crate::character::Character;

/// Key that sums the levels of every class.
const ANY: &str = "ANY";

/// `CLASS`: levels the character has in the named class.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassLevelKind;

impl PrerequisiteKind for ClassLevelKind {
    fn tag(&self) -> &str {
        "CLASS"
    }

    fn count(&self, key: &str, character: &Character, store: &ObjectStore) -> i64 {
        if key.eq_ignore_ascii_case(ANY) {
            return i64::from(character.total_level());
        }
        store
            .lookup(&ObjectType::CLASS, key)
            .map_or(0, |class| i64::from(character.class_level(class)))
    }
}
