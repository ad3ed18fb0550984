//! Integration tests for prerequisite evaluation

use tabula_prereq::{Item, KindRegistry, Operand, Operator, Prerequisite};

use crate::Fixture;

fn weighted(registry: &KindRegistry) -> Prerequisite {
    Prerequisite::threshold(
        registry,
        "SPELLSCHOOLSUB",
        Operator::Gteq,
        Operand::Number(3),
        vec![Item::new("Fire", Some(2)), Item::new("Useful", Some(2))],
    )
    .unwrap()
}

// =============================================================================
// Weighted thresholds
// =============================================================================

#[test]
fn capped_category_cannot_carry_the_threshold() {
    let registry = KindRegistry::with_defaults();
    let mut fx = Fixture::new(1);
    fx.learn("Fire", 5);
    assert!(!weighted(&registry).evaluate(&fx.character, &fx.store));
}

#[test]
fn threshold_met_across_categories() {
    let registry = KindRegistry::with_defaults();
    let mut fx = Fixture::new(1);
    fx.learn("Fire", 2);
    fx.learn("Useful", 1);
    assert!(weighted(&registry).evaluate(&fx.character, &fx.store));
}

#[test]
fn threshold_one_short() {
    let registry = KindRegistry::with_defaults();
    let mut fx = Fixture::new(1);
    fx.learn("Fire", 1);
    fx.learn("Useful", 1);
    assert!(!weighted(&registry).evaluate(&fx.character, &fx.store));
}

#[test]
fn threshold_reflects_later_character_changes() {
    let registry = KindRegistry::with_defaults();
    let prereq = weighted(&registry);
    let mut fx = Fixture::new(1);
    fx.learn("Fire", 2);
    assert!(!prereq.evaluate(&fx.character, &fx.store));
    fx.learn("Useful", 3);
    assert!(prereq.evaluate(&fx.character, &fx.store));
}

#[test]
fn uncapped_items_count_fully() {
    let registry = KindRegistry::with_defaults();
    let prereq = Prerequisite::threshold(
        &registry,
        "SPELLSCHOOLSUB",
        Operator::Gteq,
        Operand::Number(4),
        vec![Item::new("Fire", None)],
    )
    .unwrap();
    let mut fx = Fixture::new(1);
    fx.learn("Fire", 4);
    assert!(prereq.evaluate(&fx.character, &fx.store));
}

// =============================================================================
// Comparisons
// =============================================================================

#[test]
fn every_operator() {
    let registry = KindRegistry::with_defaults();
    let fx = Fixture::new(5);
    let cases = [
        (Operator::Eq, 5, true),
        (Operator::Neq, 5, false),
        (Operator::Lt, 6, true),
        (Operator::Lteq, 5, true),
        (Operator::Gt, 5, false),
        (Operator::Gteq, 5, true),
    ];
    for (operator, level, expected) in cases {
        let prereq =
            Prerequisite::compare(&registry, "CLASS", "Wizard", operator, Operand::Number(level))
                .unwrap();
        assert_eq!(
            prereq.evaluate(&fx.character, &fx.store),
            expected,
            "{operator} {level}"
        );
        let negated = prereq.negate();
        assert_eq!(negated.evaluate(&fx.character, &fx.store), !expected);
    }
}

#[test]
fn symbolic_operand_reads_a_counter() {
    let registry = KindRegistry::with_defaults();
    let mut fx = Fixture::new(3);
    let prereq = Prerequisite::compare(
        &registry,
        "CLASS",
        "Wizard",
        Operator::Gteq,
        Operand::Symbol("MinCasterLevel".to_string()),
    )
    .unwrap();

    // Unset counters read as zero.
    assert!(prereq.evaluate(&fx.character, &fx.store));
    fx.character.set_counter("mincasterlevel", 4);
    assert!(!prereq.evaluate(&fx.character, &fx.store));
}

// =============================================================================
// Composites
// =============================================================================

#[test]
fn at_least_counts_passing_children() {
    let registry = KindRegistry::with_defaults();
    let fx = Fixture::new(2);
    let level = |n| {
        Prerequisite::compare(&registry, "CLASS", "Wizard", Operator::Gteq, Operand::Number(n))
            .unwrap()
    };

    let two_of_three = Prerequisite::at_least(2, vec![level(1), level(2), level(3)]).unwrap();
    assert!(matches!(two_of_three, Prerequisite::AtLeast(2, _)));
    assert!(two_of_three.evaluate(&fx.character, &fx.store));

    let all = Prerequisite::at_least(3, vec![level(1), level(2), level(3)]).unwrap();
    assert!(matches!(all, Prerequisite::All(_)));
    assert!(!all.evaluate(&fx.character, &fx.store));

    let any = Prerequisite::at_least(1, vec![level(3), level(2)]).unwrap();
    assert!(matches!(any, Prerequisite::Any(_)));
    assert!(any.evaluate(&fx.character, &fx.store));

    assert!(Prerequisite::at_least(0, vec![level(1)]).is_err());
    assert!(Prerequisite::at_least(2, vec![level(1)]).is_err());
}

#[test]
fn evaluation_is_shareable_across_threads() {
    let registry = KindRegistry::with_defaults();
    let prereq = weighted(&registry);
    let mut fx = Fixture::new(1);
    fx.learn("Fire", 2);
    fx.learn("Useful", 2);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| prereq.evaluate(&fx.character, &fx.store)))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
