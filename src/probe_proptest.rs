#![cfg(test)]

// Property tests for the probing table kept inside the crate so they can
// inspect slot internals.

use crate::hash::{Fnv32, Fnv64};
use crate::key::Key;
use crate::slot::{Slot, SlotState};
use crate::table::ProbeTable;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Delete(usize),
    Lookup(usize),
    Contains(String),
    Iterate,
    Clear,
}

// Raw pool strings reach past MAX_KEY_LENGTH so truncation aliasing shows up.
fn arb_scenario() -> impl Strategy<Value = (Vec<String>, usize, Vec<OpI>)> {
    proptest::collection::vec("[a-c]{1,3}|[a-z]{14,18}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Lookup),
            1 => prop_oneof![contains_pool.prop_map(|s: String| s), "[a-z]{0,17}".prop_map(|s| s)]
                .prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        // At least one slot more than distinct keys, so one slot always stays vacant.
        let capacity = pool.len() + 1..=pool.len() + 8;
        (capacity, proptest::collection::vec(op, 1..80))
            .prop_map(move |(cap, ops)| (pool.clone(), cap, ops))
    })
}

// State-machine equivalence against std::collections::HashMap keyed by the
// truncated key:
// - lookup/contains/delete agree with the model; insert returns the model's old value
// - every model entry is reachable after each op (chain integrity under deletion)
// - len parity; live + tombstones + vacant == capacity
// - no two non-vacant slots share a key
fn run_scenario<S: BuildHasher>(
    pool: &[String],
    capacity: usize,
    ops: Vec<OpI>,
    hasher: S,
) -> Result<(), TestCaseError> {
    let mut storage: Vec<Slot<i32>> = vec![Slot::vacant(); capacity];
    let mut sut = ProbeTable::init_with_hasher(&mut storage, hasher);
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let prev = sut.insert(&pool[i], v);
                let expected = model.insert(Key::from(pool[i].as_str()), v);
                prop_assert_eq!(prev, Ok(expected));
            }
            OpI::Delete(i) => {
                let got = sut.delete(&pool[i]);
                prop_assert_eq!(got, model.remove(&Key::from(pool[i].as_str())));
                prop_assert_eq!(sut.lookup(&pool[i]), None);
            }
            OpI::Lookup(i) => {
                let got = sut.lookup(&pool[i]).copied();
                prop_assert_eq!(got, model.get(&Key::from(pool[i].as_str())).copied());
            }
            OpI::Contains(s) => {
                let has_model = model.contains_key(&Key::from(s.as_str()));
                prop_assert_eq!(sut.contains_key(&s), has_model);
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<Vec<u8>> =
                    sut.iter().map(|(k, _)| k.as_bytes().to_vec()).collect();
                let m_keys: BTreeSet<Vec<u8>> =
                    model.keys().map(|k| k.as_bytes().to_vec()).collect();
                prop_assert_eq!(s_keys, m_keys);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        // Post-conditions after each op
        for (k, v) in &model {
            prop_assert_eq!(sut.lookup(k), Some(v), "live key {:?} unreachable", k);
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.len() + sut.tombstones() + sut.vacant(), capacity);
        prop_assert!(sut.vacant() >= 1);

        let non_vacant: Vec<&Key> = sut
            .slots()
            .iter()
            .filter(|s| s.state() != SlotState::Vacant)
            .map(|s| s.key())
            .collect();
        let distinct: BTreeSet<&[u8]> = non_vacant.iter().map(|k| k.as_bytes()).collect();
        prop_assert_eq!(distinct.len(), non_vacant.len(), "duplicate key slots");
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_fnv64((pool, cap, ops) in arb_scenario()) {
        run_scenario(&pool, cap, ops, Fnv64::new())?;
    }

    #[test]
    fn prop_state_machine_fnv32((pool, cap, ops) in arb_scenario()) {
        run_scenario(&pool, cap, ops, Fnv32::new())?;
    }
}

// Collision variant using a constant hasher: every key shares one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, cap, ops) in arb_scenario()) {
        run_scenario(&pool, cap, ops, ConstBuildHasher)?;
    }
}
