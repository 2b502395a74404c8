#![cfg(test)]

// Property tests for ChainedHashMap and its bucket lists, kept inside the
// crate so they can reach private layout through `validate()`.

use crate::error::ListError;
use crate::hash_map::ChainedHashMap;
use crate::hasher::{KeyHasher, PolynomialHash};
use crate::linked_list::{LinkedList, Node};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Has(String),
    Mutate(usize, i32),
    Clear,
    Collect,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![has_pool.prop_map(|s: String| s), "[a-z]{0,5}".prop_map(|s| s)]
                .prop_map(OpI::Has),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Collect),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Sends every key to bucket 0.
#[derive(Clone, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn hash_key(&self, _key: &str) -> u64 {
        0
    }
}

// State-machine equivalence against std::collections::HashMap.
// Invariants checked after every op:
// - `validate()` holds: every key sits in `hash % capacity`, keys are
//   unique, len equals the sum of bucket lengths, lists are well linked.
// - len parity with the model; capacity is a power of two >= 16 and only
//   doubles, at most once per op, and only when the threshold was crossed.
// - keys/values/entries have matching lengths and line up index by index.
fn run_state_machine<H: KeyHasher>(
    mut sut: ChainedHashMap<i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        let before_cap = sut.capacity();
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let prev = sut.set(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                prop_assert!(sut.has(k));
                prop_assert_eq!(sut.get(k), Some(&v));
                if prev.is_some() {
                    prop_assert_eq!(sut.capacity(), before_cap, "overwrite must not grow");
                } else if sut.len() as f64 / before_cap as f64 > 0.75 {
                    prop_assert_eq!(sut.capacity(), before_cap * 2);
                } else {
                    prop_assert_eq!(sut.capacity(), before_cap);
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(!sut.has(k));
                prop_assert_eq!(sut.capacity(), before_cap, "remove never shrinks");
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Has(s) => {
                prop_assert_eq!(sut.has(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.saturating_add(d);
                }
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), 16);
                for k in pool {
                    prop_assert!(!sut.has(k));
                }
            }
            OpI::Collect => {
                let (keys, values, entries) = (sut.keys(), sut.values(), sut.entries());
                prop_assert_eq!(keys.len(), sut.len());
                prop_assert_eq!(values.len(), sut.len());
                prop_assert_eq!(entries.len(), sut.len());
                for (i, e) in entries.iter().enumerate() {
                    prop_assert_eq!(*e, (keys[i], values[i]));
                }
                let s_keys: BTreeSet<String> = keys.iter().map(|k| k.to_string()).collect();
                let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        if let Err(e) = sut.validate() {
            prop_assert!(false, "invariant broken: {}", e);
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity().is_power_of_two() && sut.capacity() >= 16);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_hasher(PolynomialHash), &pool, ops)?;
    }

    // Same invariants under worst-case collisions: every key chains in bucket 0.
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_hasher(ConstHasher), &pool, ops)?;
    }
}

#[derive(Clone, Debug)]
enum ListOp {
    Append(i32),
    RemoveAt(usize),
}

// LinkedList against a Vec model: positional removal, out-of-range errors,
// order, and structural validity after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_list_matches_vec(ops in proptest::collection::vec(
        prop_oneof![
            any::<i32>().prop_map(ListOp::Append),
            (0usize..12).prop_map(ListOp::RemoveAt),
        ],
        1..80,
    )) {
        let mut sut: LinkedList<i32> = LinkedList::new();
        let mut model: Vec<i32> = Vec::new();
        for op in ops {
            match op {
                ListOp::Append(v) => {
                    sut.append(Node::new(v.to_string(), v));
                    model.push(v);
                }
                ListOp::RemoveAt(i) => {
                    if i < model.len() {
                        let node = sut.remove_at(i).expect("index in range");
                        prop_assert_eq!(*node.value(), model.remove(i));
                    } else {
                        prop_assert_eq!(
                            sut.remove_at(i).err(),
                            Some(ListError::OutOfRange { index: i, len: model.len() })
                        );
                    }
                }
            }
            prop_assert!(sut.validate().is_ok());
            prop_assert_eq!(sut.len(), model.len());
            let values: Vec<i32> = sut.iter().map(|n| *n.value()).collect();
            prop_assert_eq!(&values, &model);
            prop_assert_eq!(sut.head().map(|n| *n.value()), model.first().copied());
            prop_assert_eq!(sut.tail().map(|n| *n.value()), model.last().copied());
        }
    }
}
