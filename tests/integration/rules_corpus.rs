//! Rules corpus integration tests
//!
//! Loads a small tab-separated data set, then evaluates prerequisites against
//! a character built on top of the loaded graph.

use tabula_foundation::{ErrorKind, ObjectType, Result};
use tabula_prereq::{Character, KindRegistry, Prerequisite};
use tabula_storage::ObjectStore;
use tabula_token::{LoadConfig, LoadContext, LoadReport, TokenRegistry};

const CORPUS: &str = "
CLASS:Wizard\tTYPE:Base.Arcane\tCSKILL:Concentration|Spellcraft|Knowledge%
CLASS:Sorcerer\tTYPE:Base.Arcane\tCSKILL:Concentration|Spellcraft
SKILL:Concentration\tTYPE:Constitution
SKILL:Spellcraft\tTYPE:Intelligence
SKILL:Knowledge (Arcana)\tTYPE:Intelligence
SKILL:Knowledge (Planes)\tTYPE:Intelligence
SPELL:Fireball\tSUBSCHOOL:Fire
SPELL:Burning Hands\tSUBSCHOOL:Fire
SPELL:Scorching Ray\tSUBSCHOOL:Fire
SPELL:Mending\tSUBSCHOOL:Useful
SPELL:Prestidigitation\tSUBSCHOOL:Useful|Illusion
CLASS:Fighter\tTYPE:Base.Martial
EQUIPMENT:Greatsword\tTYPE:Weapon.Melee\tDAMAGE:2d6
EQUIPMENT:Dagger\tTYPE:Weapon.Melee.Thrown\tDAMAGE:d4
";

/// Loads `corpus`: the first field of each line defines the entity, the rest
/// are token lines applied to it.
fn load(corpus: &str, config: LoadConfig) -> Result<(LoadContext, LoadReport)> {
    let mut ctx = LoadContext::with_config(TokenRegistry::with_defaults(), config);
    for line in corpus.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split('\t');
        let Some((object_type, name)) = fields.next().and_then(|f| f.split_once(':')) else {
            continue;
        };
        let entity = ctx.construct(&ObjectType::new(object_type.to_string()), name);
        for field in fields {
            // Bad lines are recorded by the session; loading carries on.
            let _ = ctx.apply_line(entity, field);
        }
    }
    let report = ctx.finish()?;
    Ok((ctx, report))
}

fn learn_all(store: &ObjectStore, character: &mut Character, class: &str, spells: &[&str]) {
    let class = store.lookup(&ObjectType::CLASS, class).unwrap();
    character.add_class_level(class);
    for spell in spells {
        let spell = store.lookup(&ObjectType::SPELL, spell).unwrap();
        character.learn_spell(class, spell);
    }
}

#[test]
fn corpus_loads_cleanly_in_strict_mode() {
    let (mut ctx, report) = load(CORPUS, LoadConfig::strict()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.deferred_succeeded, 2);

    let wizard = ctx.store().lookup(&ObjectType::CLASS, "wizard").unwrap();
    assert_eq!(
        ctx.unparse_entity(wizard).unwrap(),
        vec![
            "CSKILL:Concentration|Spellcraft|Knowledge%".to_string(),
            "TYPE:Base.Arcane".to_string(),
        ]
    );
}

#[test]
fn bad_lines_fail_strict_mode_but_not_lenient_mode() {
    let corpus = format!("{CORPUS}CLASS:Bard\tCSKILL:ALL|Perform\tNOSUCH:1\n");
    let err = load(&corpus, LoadConfig::strict()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LoadFailed(2)));

    let (ctx, report) = load(&corpus, LoadConfig::default()).unwrap();
    assert_eq!(report.problems(), 2);
    assert!(ctx.store().lookup(&ObjectType::SKILL, "Perform").is_none());
}

#[test]
fn prerequisites_over_loaded_spells() {
    let (ctx, _) = load(CORPUS, LoadConfig::default()).unwrap();
    let store = ctx.store();
    let registry = KindRegistry::with_defaults();
    let prereq = Prerequisite::parse(&registry, "PRESPELLSCHOOLSUB:3,Fire=2,Useful=2").unwrap();

    let mut pyromancer = Character::new();
    learn_all(store, &mut pyromancer, "Wizard", &["Fireball", "Burning Hands", "Scorching Ray"]);
    assert!(!prereq.evaluate(&pyromancer, store));

    let mut generalist = pyromancer.clone();
    learn_all(store, &mut generalist, "Sorcerer", &["Mending", "Fireball"]);
    assert!(prereq.evaluate(&generalist, store));

    let mut dabbler = Character::new();
    learn_all(store, &mut dabbler, "Sorcerer", &["Fireball", "Prestidigitation"]);
    assert!(!prereq.evaluate(&dabbler, store));
}

#[test]
fn class_prerequisites_over_loaded_classes() {
    let (ctx, _) = load(CORPUS, LoadConfig::default()).unwrap();
    let store = ctx.store();
    let registry = KindRegistry::with_defaults();
    let multiclass = Prerequisite::parse(
        &registry,
        "PREMULT:2,[PRECLASS:2,Wizard],[PRECLASS:1,Sorcerer],[PRECLASS:5,ANY]",
    )
    .unwrap();

    let mut character = Character::new();
    learn_all(store, &mut character, "Wizard", &[]);
    assert!(!multiclass.evaluate(&character, store));
    learn_all(store, &mut character, "Wizard", &[]);
    learn_all(store, &mut character, "Sorcerer", &[]);
    assert!(multiclass.evaluate(&character, store));
}

#[test]
fn weapon_dice_as_a_threshold() {
    let (mut ctx, _) = load(CORPUS, LoadConfig::strict()).unwrap();
    let dagger = ctx.store().lookup(&ObjectType::EQUIPMENT, "Dagger").unwrap();
    assert_eq!(
        ctx.unparse_entity(dagger).unwrap(),
        vec!["DAMAGE:1d4".to_string(), "TYPE:Weapon.Melee.Thrown".to_string()]
    );

    let store = ctx.into_store();
    let registry = KindRegistry::with_defaults();
    let prereq = Prerequisite::parse(&registry, "PRECLASS:EQDAMAGEDICE,Fighter").unwrap();

    let mut character = Character::new();
    learn_all(&store, &mut character, "Fighter", &[]);
    assert!(prereq.evaluate(&character, &store));

    character.wield(store.lookup(&ObjectType::EQUIPMENT, "Greatsword").unwrap());
    assert!(!prereq.evaluate(&character, &store));
    learn_all(&store, &mut character, "Fighter", &[]);
    assert!(prereq.evaluate(&character, &store));

    let mut novice = Character::new();
    learn_all(&store, &mut novice, "Fighter", &[]);
    novice.wield(dagger);
    assert!(prereq.evaluate(&novice, &store));
}
