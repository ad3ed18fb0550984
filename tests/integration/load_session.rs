//! Load session integration tests
//!
//! Drives list edits, forward references, and the deferred pass end to end.

use tabula_foundation::{EntityId, ObjectType};
use tabula_storage::{ListKey, ObjectKey};
use tabula_token::{LoadContext, TokenRegistry};

fn session() -> (LoadContext, EntityId) {
    let mut ctx = LoadContext::new(TokenRegistry::with_defaults());
    let class = ctx.construct(&ObjectType::CLASS, "Rogue");
    (ctx, class)
}

fn members(ctx: &LoadContext, class: EntityId) -> Vec<String> {
    let store = ctx.store();
    let mut names: Vec<String> = store
        .list(class, ListKey::CLASS_SKILL)
        .unwrap()
        .iter()
        .map(|r| r.lst_format(store))
        .collect();
    names.sort();
    names
}

// =============================================================================
// List edits
// =============================================================================

#[test]
fn add_remove_clear_sequence() {
    let (mut ctx, class) = session();

    ctx.apply(class, "CSKILL", "Skill1|Skill2").unwrap();
    assert_eq!(members(&ctx, class), vec!["Skill1", "Skill2"]);

    ctx.apply(class, "CSKILL", ".CLEAR.Skill1|Skill3").unwrap();
    assert_eq!(members(&ctx, class), vec!["Skill2", "Skill3"]);

    ctx.apply(class, "CSKILL", ".CLEAR").unwrap();
    assert!(members(&ctx, class).is_empty());
}

#[test]
fn all_mixed_with_specific_is_rejected() {
    let (mut ctx, class) = session();
    let err = ctx.apply(class, "CSKILL", "ALL|Skill1").unwrap_err();
    assert!(err.is_parse_conflict());
    assert!(members(&ctx, class).is_empty());
    assert!(ctx.store().list_log(class, ListKey::CLASS_SKILL).unwrap().is_empty());
}

#[test]
fn clear_not_first_leaves_field_unchanged() {
    let (mut ctx, class) = session();
    ctx.apply(class, "CSKILL", "Skill1").unwrap();
    for bad in ["Skill2|.CLEAR", "Skill2|Skill3|.CLEAR", ".CLEAR.Skill1|.CLEAR"] {
        assert!(ctx.apply(class, "CSKILL", bad).unwrap_err().is_parse_conflict());
        assert_eq!(members(&ctx, class), vec!["Skill1"]);
    }
}

// =============================================================================
// Forward references
// =============================================================================

#[test]
fn forward_reference_is_filled_in_place() {
    let (mut ctx, class) = session();
    ctx.apply(class, "CSKILL", "Tumble").unwrap();
    let forward = ctx.store().lookup(&ObjectType::SKILL, "Tumble").unwrap();
    assert!(!ctx.store().entity(forward).unwrap().is_defined());

    let skill = ctx.construct(&ObjectType::SKILL, "Tumble");
    ctx.apply(skill, "TYPE", "Dexterity").unwrap();

    assert_eq!(skill, forward);
    let list = ctx.store().list(class, ListKey::CLASS_SKILL).unwrap();
    assert_eq!(list.first().and_then(|r| r.direct_id()), Some(skill));
    assert!(ctx.store().entity(skill).unwrap().is_defined());
}

#[test]
fn live_groups_see_later_definitions() {
    let (mut ctx, class) = session();
    ctx.apply(class, "CSKILL", "TYPE=Dexterity").unwrap();

    for (name, ty) in [("Tumble", "Dexterity"), ("Climb", "Strength"), ("Hide", "Dexterity")] {
        let skill = ctx.construct(&ObjectType::SKILL, name);
        ctx.apply(skill, "TYPE", ty).unwrap();
    }
    ctx.finish().unwrap();

    let store = ctx.store();
    let list = store.object(class, ObjectKey::CLASS_SKILL_LIST).unwrap().unwrap();
    let names: Vec<&str> = store
        .master_lists()
        .members(list)
        .map(|id| store.entity(id).unwrap().name())
        .collect();
    assert_eq!(names, vec!["Tumble", "Hide"]);
}

// =============================================================================
// Deferred pass
// =============================================================================

#[test]
fn deferred_pass_is_idempotent() {
    let (mut ctx, rogue) = session();
    let bard = ctx.construct(&ObjectType::CLASS, "Bard");
    ctx.apply(rogue, "CSKILL", "Hide|Tumble").unwrap();
    ctx.apply(bard, "CSKILL", "ALL").unwrap();
    for skill in ["Hide", "Tumble", "Perform"] {
        ctx.construct(&ObjectType::SKILL, skill);
    }

    let first = ctx.finish().unwrap();
    let snapshot = ctx.store().master_lists().clone();
    let second = ctx.finish().unwrap();

    assert_eq!(first.deferred_succeeded, 2);
    assert_eq!(second.deferred_succeeded, 2);
    let store = ctx.store();
    let bard_list = store.object(bard, ObjectKey::CLASS_SKILL_LIST).unwrap().unwrap();
    let rogue_list = store.object(rogue, ObjectKey::CLASS_SKILL_LIST).unwrap().unwrap();
    assert_eq!(store.master_lists().members(bard_list).count(), 3);
    assert_eq!(store.master_lists().members(rogue_list).count(), 2);
    assert_eq!(store.master_lists().len(), snapshot.len());

    let perform = store.lookup(&ObjectType::SKILL, "Perform").unwrap();
    assert_eq!(store.master_lists().lists_containing(perform), vec![bard_list]);
}

#[test]
fn deferred_pass_reports_undefined_references() {
    let (mut ctx, class) = session();
    ctx.apply(class, "CSKILL", "Disable Device|Open Lock").unwrap();
    ctx.construct(&ObjectType::SKILL, "Open Lock");

    let report = ctx.finish().unwrap();
    assert_eq!(report.undefined.len(), 1);
    let missing = ctx.store().entity(report.undefined[0]).unwrap();
    assert_eq!(missing.name(), "Disable Device");
    assert_eq!(report.problems(), 1);

    let store = ctx.store();
    let list = store.object(class, ObjectKey::CLASS_SKILL_LIST).unwrap().unwrap();
    let open_lock = store.lookup(&ObjectType::SKILL, "Open Lock").unwrap();
    assert_eq!(store.master_lists().members(list).collect::<Vec<_>>(), vec![open_lock]);
}
