//! Integration tests for the RootsMagic store and the full sweep pipeline.
//!
//! Each test builds a real `SQLite` file with the RootsMagic table layout,
//! reads it through `RootsMagicStore`, and checks what the sweep selects and
//! writes.

mod common;

use common::{TestTree, standard_tree};
use elders::{
    Error, FamilyId, GenealogyStore, PersonId, RootsMagicStore, Thresholds, UnknownMemberPolicy,
    classify,
};

const GENERATIONS_ONLY: Thresholds = Thresholds {
    max_generations: 2,
    max_age: 500,
    current_year: 2024,
};

const DEFAULTS_IN_2024: Thresholds = Thresholds {
    max_generations: 4,
    max_age: 110,
    current_year: 2024,
};

#[test]
fn reads_persons_with_living_flag() {
    let tree = standard_tree();
    let store = RootsMagicStore::open(&tree.path).unwrap();

    let persons = store.read_persons().unwrap();

    assert_eq!(persons.len(), 7);
    assert!(persons[0].living);
    assert_eq!(persons[6].id, PersonId(7));
    assert!(!persons[6].living);
}

#[test]
fn reads_only_primary_names_with_years() {
    let tree = standard_tree();
    tree.alternate_name(1, "Alias");
    let store = RootsMagicStore::open(&tree.path).unwrap();

    let names = store.read_primary_names().unwrap();

    assert_eq!(names.len(), 7);
    let first = &names[0];
    assert_eq!(first.given, "Great-great");
    assert_eq!(first.birth_year, Some(1790));
    assert_eq!(first.death_year, None);
    let widow = names.iter().find(|n| n.id == PersonId(6)).unwrap();
    assert_eq!(widow.birth_year, None);
    assert_eq!(widow.death_year, Some(1990));
}

#[test]
fn reads_families_with_zero_parent_as_none() {
    let tree = standard_tree();
    let store = RootsMagicStore::open(&tree.path).unwrap();

    let families = store.read_families().unwrap();
    let children = store.read_children().unwrap();

    assert_eq!(families.len(), 4);
    assert_eq!(families[0].id, FamilyId(10));
    assert_eq!(families[0].father, Some(PersonId(1)));
    assert_eq!(families[0].mother, None);
    assert_eq!(families[2].mother, Some(PersonId(6)));
    assert_eq!(children.len(), 4);
}

#[test]
fn sweep_by_generations_only() {
    let tree = standard_tree();
    let store = RootsMagicStore::open(&tree.path).unwrap();

    let rows = store.read_all().unwrap();
    let result = classify(&rows, &GENERATIONS_ONLY, UnknownMemberPolicy::Skip).unwrap();

    assert_eq!(
        result.change_set.ids(),
        &[PersonId(1), PersonId(2), PersonId(6)]
    );
    let counts: Vec<u32> = result.people.iter().map(|p| p.generation_count).collect();
    assert_eq!(counts, vec![4, 3, 2, 1, 0, 2, 0]);
}

#[test]
fn sweep_with_default_limits_uses_ages() {
    let tree = standard_tree();
    let store = RootsMagicStore::open(&tree.path).unwrap();

    let rows = store.read_all().unwrap();
    let result = classify(&rows, &DEFAULTS_IN_2024, UnknownMemberPolicy::Skip).unwrap();

    assert_eq!(
        result.change_set.ids(),
        &[PersonId(1), PersonId(2), PersonId(3), PersonId(6)]
    );
}

#[test]
fn apply_not_living_updates_database() {
    let tree = standard_tree();
    let mut store = RootsMagicStore::open(&tree.path).unwrap();
    let rows = store.read_all().unwrap();
    let result = classify(&rows, &GENERATIONS_ONLY, UnknownMemberPolicy::Skip).unwrap();

    let changed = store.apply_not_living(result.change_set.ids()).unwrap();
    drop(store);

    assert_eq!(changed, 3);
    assert!(!tree.is_living(1));
    assert!(!tree.is_living(2));
    assert!(tree.is_living(3));
    assert!(!tree.is_living(6));
}

#[test]
fn second_sweep_after_apply_selects_nothing() {
    let tree = standard_tree();
    let mut store = RootsMagicStore::open(&tree.path).unwrap();
    let first = classify(
        &store.read_all().unwrap(),
        &GENERATIONS_ONLY,
        UnknownMemberPolicy::Skip,
    )
    .unwrap();
    store.apply_not_living(first.change_set.ids()).unwrap();

    let second = classify(
        &store.read_all().unwrap(),
        &GENERATIONS_ONLY,
        UnknownMemberPolicy::Skip,
    )
    .unwrap();

    assert!(second.change_set.is_empty());
}

#[test]
fn apply_not_living_is_all_or_nothing() {
    let tree = standard_tree();
    tree.lock_person(2);
    let mut store = RootsMagicStore::open(&tree.path).unwrap();

    let result = store.apply_not_living(&[PersonId(1), PersonId(2), PersonId(6)]);
    drop(store);

    assert!(matches!(result, Err(Error::Database(_))));
    assert!(tree.is_living(1), "earlier update must roll back");
    assert!(tree.is_living(6), "later update must not run");
}

#[test]
fn unknown_child_under_error_policy_fails() {
    let tree = standard_tree();
    tree.family(50, 5, 0, &[99]);
    let store = RootsMagicStore::open(&tree.path).unwrap();
    let rows = store.read_all().unwrap();

    let err = classify(&rows, &GENERATIONS_ONLY, UnknownMemberPolicy::Error).unwrap_err();

    assert!(matches!(
        err,
        Error::UnknownPerson {
            person: PersonId(99),
            ..
        }
    ));
}

#[test]
fn unknown_child_under_skip_policy_is_ignored() {
    let tree = standard_tree();
    tree.family(50, 5, 0, &[99]);
    let store = RootsMagicStore::open(&tree.path).unwrap();
    let rows = store.read_all().unwrap();

    let result = classify(&rows, &GENERATIONS_ONLY, UnknownMemberPolicy::Skip).unwrap();

    assert_eq!(result.skipped_members, 1);
    let child = result.people.iter().find(|p| p.id == PersonId(5)).unwrap();
    assert_eq!(child.generation_count, 0);
}

#[test]
fn cyclic_tree_is_rejected() {
    let tree = TestTree::new();
    tree.person(1, true, "A", 0, 0)
        .person(2, true, "B", 0, 0)
        .family(10, 1, 0, &[2])
        .family(20, 2, 0, &[1]);
    let store = RootsMagicStore::open(&tree.path).unwrap();

    let err = classify(
        &store.read_all().unwrap(),
        &GENERATIONS_ONLY,
        UnknownMemberPolicy::Skip,
    )
    .unwrap_err();

    assert!(matches!(err, Error::CyclicLineage { .. }));
}

#[test]
fn wrong_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("family.db");
    std::fs::write(&path, b"").unwrap();

    let result = RootsMagicStore::open(&path);

    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("RootsMagic")));
}
