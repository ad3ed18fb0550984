//! Integration tests for prerequisite kinds

use std::sync::Arc;

use tabula_foundation::ErrorKind;
use tabula_prereq::{
    Character, KindRegistry, Operand, Operator, Prerequisite, PrerequisiteKind, TermEvaluator,
};
use tabula_storage::ObjectStore;

use crate::Fixture;

/// Counts known spells across every class.
struct KnownSpellsKind;

impl PrerequisiteKind for KnownSpellsKind {
    fn tag(&self) -> &str {
        "SPELLS"
    }

    fn count(&self, _key: &str, character: &Character, _store: &ObjectStore) -> i64 {
        i64::try_from(character.all_known_spells().len()).unwrap_or(i64::MAX)
    }
}

/// Half the character's total level, rounded down.
struct HalfLevelTerm;

impl TermEvaluator for HalfLevelTerm {
    fn name(&self) -> &str {
        "HALFLEVEL"
    }

    fn resolve(&self, character: &Character, _store: &ObjectStore) -> i64 {
        i64::from(character.total_level() / 2)
    }
}

#[test]
fn custom_terms_become_thresholds() {
    let mut registry = KindRegistry::with_defaults();
    registry.register_term(Arc::new(HalfLevelTerm)).unwrap();
    assert!(registry.register_term(Arc::new(HalfLevelTerm)).is_err());

    let prereq = Prerequisite::parse(&registry, "PRESPELLSCHOOLSUB:HalfLevel,Fire").unwrap();
    let mut apprentice = Fixture::new(4);
    apprentice.learn("Fire", 1);
    assert!(!prereq.evaluate(&apprentice.character, &apprentice.store));

    let mut adept = Fixture::new(4);
    adept.learn("Fire", 2);
    assert!(prereq.evaluate(&adept.character, &adept.store));

    let counter = Prerequisite::parse(&KindRegistry::with_defaults(), "PRESPELLSCHOOLSUB:HalfLevel,Fire")
        .unwrap();
    assert_ne!(counter, prereq);
}

#[test]
fn unknown_kind_fails_at_construction() {
    let registry = KindRegistry::with_defaults();
    let err = Prerequisite::compare(&registry, "FEAT", "Dodge", Operator::Gteq, Operand::Number(1))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Configuration(_)));
}

#[test]
fn custom_kinds_register_by_tag() {
    let mut registry = KindRegistry::with_defaults();
    registry.register(Arc::new(KnownSpellsKind)).unwrap();
    assert_eq!(registry.tags(), vec!["CLASS", "SPELLS", "SPELLSCHOOLSUB"]);

    let mut fx = Fixture::new(1);
    fx.learn("Fire", 2);
    fx.learn("Cold", 1);

    let prereq = Prerequisite::parse(&registry, "PRESPELLS:3,ANY").unwrap();
    assert!(prereq.evaluate(&fx.character, &fx.store));
    let prereq = Prerequisite::parse(&registry, "PRESPELLS:4,ANY").unwrap();
    assert!(!prereq.evaluate(&fx.character, &fx.store));
}

#[test]
fn class_kind_sums_levels_for_any() {
    let registry = KindRegistry::with_defaults();
    let mut fx = Fixture::new(2);
    let (cleric, _) = fx
        .store
        .construct(&tabula_foundation::ObjectType::CLASS, "Cleric");
    fx.character.add_class_level(cleric);

    let total = Prerequisite::parse(&registry, "PRECLASS:3,ANY").unwrap();
    let cleric_two = Prerequisite::parse(&registry, "PRECLASS:2,Cleric").unwrap();
    let unknown = Prerequisite::parse(&registry, "PRECLASS:1,Druid").unwrap();
    assert!(total.evaluate(&fx.character, &fx.store));
    assert!(!cleric_two.evaluate(&fx.character, &fx.store));
    assert!(!unknown.evaluate(&fx.character, &fx.store));
}
