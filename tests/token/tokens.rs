//! Integration tests for the built-in tokens

use tabula_foundation::{ErrorKind, ObjectType, Value};
use tabula_storage::{ListKey, ObjectStore, ScalarKey};
use tabula_token::{PrimaryToken, ReferenceListToken, TagListToken, TokenRegistry};

fn skills(store: &ObjectStore, class: tabula_foundation::EntityId, key: ListKey) -> Vec<String> {
    store
        .list(class, key)
        .unwrap()
        .iter()
        .map(|r| r.lst_format(store))
        .collect()
}

// =============================================================================
// Reference lists
// =============================================================================

#[test]
fn cross_class_skills_use_their_own_field() {
    let token = ReferenceListToken::cross_class_skill();
    let mut store = ObjectStore::new();
    let (class, _) = store.construct(&ObjectType::CLASS, "Fighter");

    token
        .parse(&mut store, class, "Hide|Move Silently")
        .unwrap()
        .commit(&mut store, class)
        .unwrap();

    assert_eq!(
        skills(&store, class, ListKey::CROSS_CLASS_SKILL),
        vec!["Hide", "Move Silently"]
    );
    assert!(skills(&store, class, ListKey::CLASS_SKILL).is_empty());
    assert!(token.deferred().is_none());
    assert!(ReferenceListToken::class_skill().deferred().is_some());
}

#[test]
fn parse_does_not_commit() {
    let token = ReferenceListToken::class_skill();
    let mut store = ObjectStore::new();
    let (class, _) = store.construct(&ObjectType::CLASS, "Wizard");

    let edit = token.parse(&mut store, class, "Spellcraft").unwrap();
    assert_eq!(edit.field(), ListKey::CLASS_SKILL.name());
    assert!(skills(&store, class, ListKey::CLASS_SKILL).is_empty());
}

#[test]
fn malformed_lists_are_parse_conflicts() {
    let token = ReferenceListToken::class_skill();
    let mut store = ObjectStore::new();
    let (class, _) = store.construct(&ObjectType::CLASS, "Wizard");

    for bad in ["", "|Climb", "Climb|", "Climb||Swim", "Climb|.CLEAR", "ALL|Climb", "Climb|ALL"] {
        let err = token.parse(&mut store, class, bad).unwrap_err();
        assert!(err.is_parse_conflict(), "{bad:?} gave {err}");
    }
}

#[test]
fn all_with_removal_is_allowed() {
    let token = ReferenceListToken::class_skill();
    let mut store = ObjectStore::new();
    let (class, _) = store.construct(&ObjectType::CLASS, "Wizard");

    token
        .parse(&mut store, class, ".CLEAR.Climb|ALL")
        .unwrap()
        .commit(&mut store, class)
        .unwrap();
    assert_eq!(skills(&store, class, ListKey::CLASS_SKILL), vec!["ALL"]);
}

// =============================================================================
// Tag lists
// =============================================================================

#[test]
fn subschool_tags_accumulate_and_clear() {
    let token = TagListToken::subschool();
    let mut store = ObjectStore::new();
    let (spell, _) = store.construct(&ObjectType::SPELL, "Fireball");

    for value in ["Fire", "fire|Useful"] {
        token
            .parse(&mut store, spell, value)
            .unwrap()
            .commit(&mut store, spell)
            .unwrap();
    }
    assert_eq!(
        store.scalar(spell, ScalarKey::SUBSCHOOL).unwrap(),
        Some(&Value::tags(["Fire", "Useful"]))
    );
    assert_eq!(
        token.unparse(&store, spell).unwrap(),
        Some(vec!["Fire|Useful".to_string()])
    );

    token
        .parse(&mut store, spell, ".CLEAR|Cold")
        .unwrap()
        .commit(&mut store, spell)
        .unwrap();
    assert_eq!(
        store.scalar(spell, ScalarKey::SUBSCHOOL).unwrap(),
        Some(&Value::tags(["Cold"]))
    );
}

#[test]
fn type_tags_use_dot_separator() {
    let token = TagListToken::object_type(ObjectType::SKILL);
    let mut store = ObjectStore::new();
    let (skill, _) = store.construct(&ObjectType::SKILL, "Climb");

    token
        .parse(&mut store, skill, "Strength.Athletic")
        .unwrap()
        .commit(&mut store, skill)
        .unwrap();
    assert!(store.scalar(skill, ScalarKey::TYPE).unwrap().unwrap().has_tag("athletic"));

    let err = token.parse(&mut store, skill, "Strength..Athletic").unwrap_err();
    assert!(err.is_parse_conflict());
}

#[test]
fn tag_clear_must_come_first() {
    let token = TagListToken::subschool();
    let mut store = ObjectStore::new();
    let (spell, _) = store.construct(&ObjectType::SPELL, "Fireball");

    let err = token.parse(&mut store, spell, "Fire|.CLEAR").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseConflict { .. }));
    assert!(store.scalar(spell, ScalarKey::SUBSCHOOL).unwrap().is_none());
}

#[test]
fn tag_field_without_edits_unparses_to_nothing() {
    let token = TagListToken::subschool();
    let mut store = ObjectStore::new();
    let (spell, _) = store.construct(&ObjectType::SPELL, "Light");
    assert_eq!(token.unparse(&store, spell).unwrap(), None);
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn registry_dispatches_by_type_and_name() {
    let registry = TokenRegistry::with_defaults();
    assert!(registry.get(&ObjectType::CLASS, "cskill").is_some());
    assert!(registry.get(&ObjectType::SKILL, "CSKILL").is_none());
    assert!(registry.get(&ObjectType::SPELL, "SUBSCHOOL").is_some());
    assert!(registry.get(&ObjectType::EQUIPMENT, "TYPE").is_some());

    let names: Vec<&str> = registry
        .tokens_for(&ObjectType::CLASS)
        .into_iter()
        .map(|t| t.name())
        .collect();
    assert_eq!(names, vec!["CCSKILL", "CSKILL", "TYPE"]);
}

#[test]
fn registry_rejects_duplicates() {
    let mut registry = TokenRegistry::with_defaults();
    let err = registry
        .register(std::sync::Arc::new(ReferenceListToken::class_skill()))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(_)));
}
