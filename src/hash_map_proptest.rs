#![cfg(test)]

// Property tests for HashMap kept inside the crate so they can check
// internal invariants after every step.

use crate::equivalence::{Structural, StructuralKey};
use crate::hash_map::HashMap;
use proptest::prelude::*;

// Equal by `id`; `stamp` records which instance was stored. Only four hash
// codes exist, so buckets chain heavily.
#[derive(Clone, Debug)]
struct Key {
    id: u8,
    stamp: u32,
}

impl StructuralKey for Key {
    fn structural_hash(&self) -> i32 {
        i32::from(self.id % 4)
    }
    fn structural_eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Clone, Debug)]
enum Op {
    Set(u8, i32),
    Remove(u8),
    Get(u8),
    Clone,
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let id = 0u8..12;
    let op = prop_oneof![
        4 => (id.clone(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        2 => id.clone().prop_map(Op::Remove),
        2 => id.prop_map(Op::Get),
        1 => Just(Op::Clone),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..80)
}

// Model: association list in insertion order, (id, first stamp, value).
type Model = Vec<(u8, u32, i32)>;

fn assert_matches(sut: &HashMap<Key, i32, Structural>, model: &Model) -> Result<(), TestCaseError> {
    sut.check_invariants();
    prop_assert_eq!(sut.len(), model.len());
    let got: Vec<(u8, u32, i32)> = sut.iter().map(|(k, v)| (k.id, k.stamp, *v)).collect();
    prop_assert_eq!(&got, model);
    Ok(())
}

// Property: state-machine equivalence against an ordered association list.
// Invariants exercised across random operation sequences:
// - `set` on an equal key updates the value in place and keeps the first stamp.
// - New keys append; removed keys disappear and re-adding appends again.
// - `get`/`contains_key` parity with the model, including under collisions.
// - Clones are independent of the original from then on.
// - Buckets and the insertion list stay consistent after every step.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: HashMap<Key, i32, Structural> = HashMap::default();
        let mut model: Model = Vec::new();
        let mut snapshots: Vec<(HashMap<Key, i32, Structural>, Model)> = Vec::new();

        for (stamp, op) in (0u32..).zip(ops) {
            match op {
                Op::Set(id, v) => {
                    sut.set(Key { id, stamp }, v);
                    match model.iter_mut().find(|(mid, _, _)| *mid == id) {
                        Some(slot) => slot.2 = v,
                        None => model.push((id, stamp, v)),
                    }
                }
                Op::Remove(id) => {
                    let removed = sut.remove_entry(&Key { id, stamp });
                    match model.iter().position(|(mid, _, _)| *mid == id) {
                        Some(pos) => {
                            let (_, mstamp, mv) = model.remove(pos);
                            let (k, v) = removed.expect("present in model");
                            prop_assert_eq!(k.stamp, mstamp);
                            prop_assert_eq!(v, mv);
                        }
                        None => prop_assert!(removed.is_none()),
                    }
                }
                Op::Get(id) => {
                    let q = Key { id, stamp };
                    let expected = model.iter().find(|(mid, _, _)| *mid == id).map(|e| e.2);
                    prop_assert_eq!(sut.get(&q).copied(), expected);
                    prop_assert_eq!(sut.contains_key(&q), expected.is_some());
                }
                Op::Clone => snapshots.push((sut.clone(), model.clone())),
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }
            assert_matches(&sut, &model)?;
        }

        for (snap, snap_model) in &snapshots {
            assert_matches(snap, snap_model)?;
        }
    }
}

proptest! {
    // Property: iteration is a pure function of the contents; walking from
    // both ends visits the same entries as walking forward.
    #[test]
    fn prop_reverse_iteration(ids in proptest::collection::vec(0u8..40, 0..40)) {
        let sut: HashMap<Key, (), Structural> =
            ids.iter().map(|&id| (Key { id, stamp: 0 }, ())).collect();
        let fwd: Vec<u8> = sut.keys().map(|k| k.id).collect();
        let mut back: Vec<u8> = sut.keys().rev().map(|k| k.id).collect();
        back.reverse();
        prop_assert_eq!(&fwd, &back);

        let mut dedup = Vec::new();
        for id in ids {
            if !dedup.contains(&id) {
                dedup.push(id);
            }
        }
        prop_assert_eq!(fwd, dedup);
    }
}
