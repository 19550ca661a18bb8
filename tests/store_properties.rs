//! Property tests for the route point store.

use proptest::prelude::*;

use route_planner::models::{Location, PointIndex};
use route_planner::store::{ReconcileOutcome, RoutePointStore};

#[derive(Debug, Clone)]
enum Op {
    SetStart(Option<u8>),
    SetEnd(Option<u8>),
    AddAdditional(u8),
    UpdateAdditional(usize, Option<u8>),
    Select(u8, Option<usize>),
    RemovePoint(usize),
    AddSmart(u8),
    RemoveById(u8),
}

fn loc(n: u8) -> Location {
    Location::new(format!("loc-{n}"), format!("Place {n}"), "", 36.0 + f64::from(n) * 0.001, -115.1)
}

fn op() -> impl Strategy<Value = Op> {
    let id = 0u8..12;
    prop_oneof![
        proptest::option::of(id.clone()).prop_map(Op::SetStart),
        proptest::option::of(id.clone()).prop_map(Op::SetEnd),
        id.clone().prop_map(Op::AddAdditional),
        (0usize..8, proptest::option::of(id.clone())).prop_map(|(i, l)| Op::UpdateAdditional(i, l)),
        (id.clone(), proptest::option::of(0usize..8)).prop_map(|(l, i)| Op::Select(l, i)),
        (0usize..8).prop_map(Op::RemovePoint),
        id.clone().prop_map(Op::AddSmart),
        id.prop_map(Op::RemoveById),
    ]
}

fn apply(store: &mut RoutePointStore, op: &Op) {
    match op {
        Op::SetStart(l) => store.set_start(l.map(loc)),
        Op::SetEnd(l) => store.set_end(l.map(loc)),
        Op::AddAdditional(l) => {
            store.add_additional(loc(*l));
        }
        Op::UpdateAdditional(i, l) => {
            store.update_additional(*i, l.map(loc));
        }
        Op::Select(l, i) => {
            let index = i.map_or(PointIndex::Append, PointIndex::At);
            store.select_for_point(loc(*l), index);
        }
        Op::RemovePoint(i) => {
            store.remove_point(*i);
        }
        Op::AddSmart(l) => {
            store.add_smart(loc(*l));
        }
        Op::RemoveById(l) => {
            store.remove_by_id(&loc(*l).id);
        }
    }
}

fn ids(locations: &[Location]) -> Vec<String> {
    locations.iter().map(|l| l.id.clone()).collect()
}

proptest! {
    #[test]
    fn flatten_respects_capacity(max_points in 2usize..7, ops in proptest::collection::vec(op(), 0..40)) {
        let mut store = RoutePointStore::new(max_points);
        for op in &ops {
            apply(&mut store, op);
            prop_assert!(store.flatten().len() <= max_points);
            prop_assert!(store.state().additional.len() <= max_points - 2);
            prop_assert_eq!(store.flatten().len(), store.state().filled_count());
        }
    }

    #[test]
    fn add_additional_rejection_is_idempotent(extra in 1usize..6) {
        let mut store = RoutePointStore::default();
        for n in 0..3 {
            prop_assert!(store.add_additional(loc(n)));
        }
        let full = store.state().clone();
        for n in 0..extra {
            prop_assert!(!store.add_additional(loc(100 + n as u8)));
            prop_assert_eq!(store.state(), &full);
        }
    }

    #[test]
    fn flatten_reconcile_round_trip(ops in proptest::collection::vec(op(), 0..30)) {
        let mut store = RoutePointStore::default();
        for op in &ops {
            apply(&mut store, op);
        }
        let flattened = store.flatten();

        let mut rebuilt = RoutePointStore::default();
        prop_assert_eq!(rebuilt.reconcile(&flattened), ReconcileOutcome::Applied);
        prop_assert_eq!(ids(&rebuilt.flatten()), ids(&flattened));
    }
}

#[test]
fn reconcile_empty_does_not_erase_user_route() {
    let mut store = RoutePointStore::default();
    store.add_smart(loc(1));
    store.add_smart(loc(2));
    store.add_smart(loc(3));
    let before = store.flatten();

    // First observation, then a transient "no data" from the form
    assert_eq!(store.reconcile(&[]), ReconcileOutcome::Ignored);
    assert_eq!(store.flatten(), before);
}

#[test]
fn reconcile_first_call_loads_saved_route() {
    let mut store = RoutePointStore::default();
    assert!(!store.user_modified());

    let saved = vec![loc(1), loc(2), loc(3)];
    assert_eq!(store.reconcile(&saved), ReconcileOutcome::Applied);
    assert_eq!(ids(&store.flatten()), ids(&saved));
}

#[test]
fn late_external_load_is_displayed() {
    let mut store = RoutePointStore::default();
    assert_eq!(store.reconcile(&[]), ReconcileOutcome::Applied);

    let loaded = vec![loc(4), loc(5)];
    assert_eq!(store.reconcile(&loaded), ReconcileOutcome::Applied);
    assert_eq!(ids(&store.flatten()), ids(&loaded));
}
