#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can
// inspect bucket placement directly.

use crate::chained_hash_map::ChainedHashMap;
use crate::hasher::bucket_index;
use crate::policy::ResizePolicy;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hasher;
use std::rc::Rc;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Small-table policy so short op sequences cross several grow/shrink thresholds.
const SMALL: ResizePolicy = ResizePolicy {
    initial_capacity: 2,
    grow_load_factor: 2,
    grow_multiplier: 3,
    shrink_load_factor: 4,
    shrink_divisor: 2,
};

fn run_state_machine<S: BuildHasher>(
    hasher: S,
    policy: ResizePolicy,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let destroyed = Rc::new(RefCell::new(Vec::new()));
    let sink = destroyed.clone();
    let mut sut = ChainedHashMap::with_policy(policy, move |v: i32| sink.borrow_mut().push(v), hasher)
        .expect("valid policy");
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut expected_destroyed: Vec<i32> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                prop_assert!(sut.insert(k, v).is_ok());
                if let Some(old) = model.insert(k.clone(), v) {
                    expected_destroyed.push(old);
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence differs from model"),
                }
            }
            OpI::Iterate => {
                let s_keys: Vec<&str> = sut.keys().collect();
                let unique: BTreeSet<&str> = s_keys.iter().copied().collect();
                prop_assert_eq!(unique.len(), s_keys.len(), "iterator repeated a key");
                let m_keys: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                prop_assert_eq!(unique, m_keys);
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Capacity never drops to zero or below the floor
        prop_assert!(sut.capacity() >= policy.initial_capacity);
        // 3) Every entry sits in the bucket its hash selects at the current capacity
        for (idx, bucket) in sut.buckets().iter().enumerate() {
            if let Some(chain) = bucket {
                for entry in chain.iter() {
                    prop_assert_eq!(bucket_index(sut.hasher(), &entry.key, sut.capacity()), idx);
                }
            }
        }
        // 4) Destructor ran only on overwritten values so far
        prop_assert_eq!(&*destroyed.borrow(), &expected_destroyed);
    }

    // Dropping the table destroys exactly the live values.
    drop(sut);
    let mut live: Vec<i32> = model.into_values().collect();
    expected_destroyed.append(&mut live);
    let mut got = destroyed.borrow().clone();
    got.sort_unstable();
    expected_destroyed.sort_unstable();
    prop_assert_eq!(got, expected_destroyed);
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert/get/remove/contains parity with the model, including overwrites.
// - `len` parity and bucket placement after every op, across resizes.
// - The destructor sees exactly the overwritten values, then the live ones on drop.
// - Iteration yields each live key exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(crate::hasher::BuildDjb2, ResizePolicy::DEFAULT, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_small_tables((pool, ops) in arb_scenario()) {
        run_state_machine(crate::hasher::BuildDjb2, SMALL, pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
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

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher): every key shares one chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ConstBuildHasher, SMALL, pool, ops)?;
    }
}
