//! Integration tests for Value, ObjectType, and EntityId

use tabula_foundation::{EntityId, ObjectType, Value};

#[test]
fn tags_match_ignoring_case() {
    let v = Value::tags(["Fire", "Useful"]);
    assert!(v.has_tag("fire"));
    assert!(v.has_tag("USEFUL"));
    assert!(!v.has_tag("Cold"));
    assert_eq!(v.to_string(), "Fire.Useful");
}

#[test]
fn accessors_reject_other_variants() {
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::Int(3).as_bool(), None);
    assert_eq!(Value::text("Evocation").as_text(), Some("Evocation"));
    assert!(Value::text("Fire").as_tags().is_none());
    assert!(!Value::text("Fire").has_tag("Fire"));
}

#[test]
fn object_type_names_are_upper_case() {
    assert_eq!(ObjectType::new("skill"), ObjectType::SKILL);
    assert_eq!(ObjectType::new("ClassSkillList"), ObjectType::CLASS_SKILL_LIST);
    assert_eq!(ObjectType::new("deity").as_str(), "DEITY");
    assert_eq!(ObjectType::EQUIPMENT.to_string(), "EQUIPMENT");
}

#[test]
fn entity_ids_order_by_index() {
    let a = EntityId::new(1);
    let b = EntityId::new(2);
    assert!(a < b);
    assert_eq!(a.slot(), 1);
    assert_eq!(b.to_string(), "Entity(2)");
}
