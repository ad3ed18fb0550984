//! Integration tests for references
//!
//! Group references are live predicates: membership is computed on demand.

use tabula_foundation::{ObjectType, Value};
use tabula_storage::{ObjectStore, Reference, Resolver, ScalarKey};

fn resolve(store: &mut ObjectStore, text: &str) -> Reference {
    Resolver::new(store).resolve(&ObjectType::SKILL, text).unwrap()
}

fn names(store: &ObjectStore, reference: &Reference) -> Vec<String> {
    reference
        .contained(store)
        .into_iter()
        .map(|id| store.entity(id).unwrap().name().to_string())
        .collect()
}

#[test]
fn all_includes_entities_defined_later() {
    let mut store = ObjectStore::new();
    let all = resolve(&mut store, "ALL");
    assert!(all.contained(&store).is_empty());

    store.construct(&ObjectType::SKILL, "Climb");
    store.construct(&ObjectType::CLASS, "Wizard");
    store.construct(&ObjectType::SKILL, "Swim");
    assert_eq!(names(&store, &all), vec!["Climb", "Swim"]);
}

#[test]
fn group_references_skip_placeholders() {
    let mut store = ObjectStore::new();
    store.construct(&ObjectType::SKILL, "Knowledge (Arcana)");
    let direct = resolve(&mut store, "Knowledge (Nature)");
    let pattern = resolve(&mut store, "Knowledge%");

    assert_eq!(names(&store, &pattern), vec!["Knowledge (Arcana)"]);
    assert_eq!(direct.contained(&store).len(), 1);

    store.construct(&ObjectType::SKILL, "Knowledge (Nature)");
    assert_eq!(
        names(&store, &pattern),
        vec!["Knowledge (Arcana)", "Knowledge (Nature)"]
    );
}

#[test]
fn type_reference_requires_every_tag() {
    let mut store = ObjectStore::new();
    let (climb, _) = store.construct(&ObjectType::SKILL, "Climb");
    let (swim, _) = store.construct(&ObjectType::SKILL, "Swim");
    store
        .set_scalar(climb, ScalarKey::TYPE, Value::tags(["Strength", "Athletic"]))
        .unwrap();
    store
        .set_scalar(swim, ScalarKey::TYPE, Value::tags(["Strength"]))
        .unwrap();

    let strength = resolve(&mut store, "TYPE=Strength");
    let athletic = resolve(&mut store, "TYPE.strength.athletic");
    assert_eq!(names(&store, &strength), vec!["Climb", "Swim"]);
    assert_eq!(names(&store, &athletic), vec!["Climb"]);
}

#[test]
fn lst_format_uses_defined_spelling() {
    let mut store = ObjectStore::new();
    let forward = resolve(&mut store, "tumble");
    store.construct(&ObjectType::SKILL, "Tumble");

    assert_eq!(forward.lst_format(&store), "Tumble");
    assert_eq!(resolve(&mut store, "ALL").lst_format(&store), "ALL");
    assert_eq!(resolve(&mut store, "Craft%").lst_format(&store), "Craft%");
    assert_eq!(
        resolve(&mut store, "TYPE.Strength.Athletic").lst_format(&store),
        "TYPE=Strength.Athletic"
    );
}

#[test]
fn equality_is_structural() {
    let mut store = ObjectStore::new();
    assert_eq!(resolve(&mut store, "Climb"), resolve(&mut store, "CLIMB"));
    assert_eq!(resolve(&mut store, "Craft%"), resolve(&mut store, "craft%"));
    assert_eq!(resolve(&mut store, "ALL"), Reference::all(ObjectType::SKILL));
    assert_ne!(resolve(&mut store, "ALL"), Reference::all(ObjectType::SPELL));
    assert_ne!(resolve(&mut store, "Climb"), resolve(&mut store, "Swim"));
}
