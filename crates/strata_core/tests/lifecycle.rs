//! # Entity Lifecycle Verification Tests
//!
//! End-to-end checks of the public surface:
//!
//! 1. **Lifecycle**: create / destroy / cleanup across every store kind
//! 2. **Versions**: one bump per observable mutation
//! 3. **Exclusivity**: reference stores never give a value two owners
//!
//! Run with: cargo test -p strata_core --test lifecycle

use strata_core::{
    Components, EcsConfig, EcsError, EntityId, EntitySystem, MultiReferenceStore,
    SingleReferenceStore, SparseComponentStore,
};

type Position = SparseComponentStore<i32>;
type Names = SparseComponentStore<&'static str>;

fn world() -> EntitySystem {
    let components = Components::new()
        .with("position", Position::new())
        .and_then(|c| c.with("name", Names::new()))
        .and_then(|c| c.with("target", SingleReferenceStore::new()))
        .and_then(|c| c.with("inventory", MultiReferenceStore::new()))
        .expect("registry builds");
    EntitySystem::new(components).expect("system builds")
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn destroyed_entity_is_purged_on_cleanup() {
    let components = Components::new()
        .with("position", Position::new())
        .unwrap();
    let mut system = EntitySystem::new(components).unwrap();

    let id = system.create();
    assert_eq!(id, EntityId::new(1));
    system.store_mut::<Position>("position").unwrap().add(id, 5);

    system.destroy(id);
    system.cleanup();

    assert!(system.store::<Position>("position").unwrap().get(id).is_none());
    assert!(!system.is_alive(id));
}

#[test]
fn construction_requires_stores() {
    assert!(matches!(
        EntitySystem::new(Components::new()),
        Err(EcsError::Configuration(_))
    ));
}

#[test]
fn ids_strictly_increase_and_are_never_reused() {
    let mut system = world();
    let mut last = system.create();
    for _ in 0..100 {
        system.destroy(last);
        system.cleanup();
        let next = system.create();
        assert!(next > last);
        last = next;
    }
    assert!(!system.is_alive(EntityId::new(0)));
    assert!(!system.is_alive(EntityId::new(10_000)));
}

#[test]
fn dead_but_resident_data_stays_visible_to_raw_access() {
    let mut system = world();
    let a = system.create();
    let b = system.create();
    {
        let names = system.store_mut::<Names>("name").unwrap();
        names.add(a, "a");
        names.add(b, "b");
    }
    system.destroy(a);

    let names = system.store::<Names>("name").unwrap();
    assert_eq!(names.get(a), Some(&"a"));
    assert_eq!(names.size(), 2);

    let mut every = Vec::new();
    names.values(|name| every.push(*name));
    assert_eq!(every, vec!["a", "b"]);

    let mut living = Vec::new();
    names.for_each(|name, _| living.push(*name));
    assert_eq!(living, vec!["b"]);
}

#[test]
fn cleanup_unlinks_both_reference_directions() {
    let mut system = world();
    let hunter = system.create();
    let prey = system.create();
    let bag = system.create();
    let sword = system.create();

    system
        .store_mut::<SingleReferenceStore>("target")
        .unwrap()
        .add(hunter, prey);
    {
        let inventory = system.store_mut::<MultiReferenceStore>("inventory").unwrap();
        inventory.add(bag, sword);
        inventory.add(bag, prey);
    }

    system.destroy(prey);
    system.destroy(bag);
    system.cleanup();

    assert!(!system.store::<SingleReferenceStore>("target").unwrap().has(hunter));
    let inventory = system.store::<MultiReferenceStore>("inventory").unwrap();
    assert!(inventory.get(bag).is_none());
    assert_eq!(inventory.owner_of(sword), None);
    assert!(system.is_alive(hunter));
    assert!(system.is_alive(sword));
}

#[test]
fn repeated_cleanup_is_a_no_op() {
    let mut system = world();
    let id = system.create();
    system.store_mut::<Position>("position").unwrap().add(id, 1);
    system.destroy(id);
    system.cleanup();

    let versions: Vec<u64> = system
        .components()
        .names()
        .map(|name| system.components().get(name).unwrap().version())
        .collect();
    assert_eq!(system.cleanup(), 0);
    let after: Vec<u64> = system
        .components()
        .names()
        .map(|name| system.components().get(name).unwrap().version())
        .collect();
    assert_eq!(versions, after);
}

#[test]
fn config_from_toml_drives_the_system() {
    let config = EcsConfig::from_toml_str("first_id = 500\ncapacity_hint = 16\n").unwrap();
    let components = Components::new().with("position", Position::new()).unwrap();
    let mut system = EntitySystem::with_config(components, config).unwrap();
    assert_eq!(system.create().raw(), 500);
    assert_eq!(system.create().raw(), 501);
}

// ============================================================================
// COMPONENT STORE
// ============================================================================

#[test]
fn overwrite_keeps_size_and_bumps_version() {
    let mut comp = SparseComponentStore::new();
    comp.add(EntityId::new(1), "One");
    assert_eq!(comp.version(), 1);
    comp.add(EntityId::new(1), "Two");
    assert_eq!(comp.get(EntityId::new(1)), Some(&"Two"));
    assert_eq!(comp.version(), 2);
    assert_eq!(comp.size(), 1);
}

#[test]
fn swap_remove_keeps_survivors_addressable() {
    let mut system = world();
    let ids: Vec<EntityId> = (0..3).map(|_| system.create()).collect();
    for (value, id) in [11, 12, 13].into_iter().zip(&ids) {
        system.to_proxy(*id).set::<Position>("position", value).unwrap();
    }

    system.store_mut::<Position>("position").unwrap().remove(ids[1]);

    assert_eq!(
        system.to_proxy(ids[2]).get::<Position>("position"),
        Ok(Some(&13))
    );
    assert_eq!(
        system.to_proxy(ids[0]).get::<Position>("position"),
        Ok(Some(&11))
    );
    assert_eq!(system.to_proxy(ids[1]).has("position"), Ok(false));
}

#[test]
fn version_never_decreases() {
    let mut comp: SparseComponentStore<u32> = SparseComponentStore::new();
    let mut last = comp.version();
    for step in 0..200_u32 {
        let id = EntityId::new(step % 17 + 1);
        match step % 4 {
            0 | 1 => comp.add(id, step),
            2 => {
                comp.remove(id);
            }
            _ => {
                comp.set(id, step);
            }
        }
        assert!(comp.version() >= last);
        last = comp.version();
    }
    comp.clear();
    assert_eq!(comp.version(), last + 1);
}

// ============================================================================
// REFERENCE STORES
// ============================================================================

#[test]
fn multi_reference_scenario() {
    let mut refs = MultiReferenceStore::new();
    let (one, two, three) = (EntityId::new(1), EntityId::new(2), EntityId::new(3));
    refs.add(one, two);
    refs.add(one, three);

    let group = refs.get(one).unwrap();
    assert!(group.contains(&two) && group.contains(&three));

    refs.remove(two, true);
    let group = refs.get(one).unwrap();
    assert!(!group.contains(&two));
    assert!(group.contains(&three));
}

#[test]
fn reference_exclusivity_holds_under_churn() {
    let mut single = SingleReferenceStore::new();
    let mut multi = MultiReferenceStore::new();

    for step in 0..300_u32 {
        let key = EntityId::new(step % 7 + 1);
        let value = EntityId::new((step * 13) % 11 + 20);
        single.add(key, value);
        multi.add(key, value);
    }

    for raw in 20..31 {
        let value = EntityId::new(raw);
        let single_owners = single.iter().filter(|(_, v)| *v == value).count();
        assert!(single_owners <= 1);

        let multi_owners = (1..=7)
            .filter(|k| {
                multi
                    .get(EntityId::new(*k))
                    .is_some_and(|group| group.contains(&value))
            })
            .count();
        assert!(multi_owners <= 1);
        if let Some(owner) = multi.owner_of(value) {
            assert!(multi.get(owner).unwrap().contains(&value));
        }
    }
}

#[test]
fn multi_reference_rejects_aggregates() {
    let refs = MultiReferenceStore::new();
    assert!(matches!(
        refs.size(),
        Err(EcsError::UnsupportedOperation { operation: "size", .. })
    ));
}
