use std::collections::BTreeMap;

use proptest::prelude::*;

use astra_shared::{DataTracker, SerializedEntry, TrackedData, TrackedValue};

const SLOT_A: TrackedData<f32> = TrackedData::new(0);
const SLOT_B: TrackedData<bool> = TrackedData::new(1);
const SLOT_C: TrackedData<u64> = TrackedData::new(2);

#[derive(Debug, Clone)]
enum Op {
    SetA(f32),
    SetB(bool),
    SetC(u64),
    Drain,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-100i16..100).prop_map(|v| Op::SetA(f32::from(v) / 4.0)),
        any::<bool>().prop_map(Op::SetB),
        (0u64..8).prop_map(Op::SetC),
        Just(Op::Drain),
    ]
}

proptest! {
    /// For any sequence of writes and drains, a drain returns exactly the
    /// slots whose current value differs from their value at the previous
    /// drain (or creation), and `None` when no slot differs.
    #[test]
    fn drains_return_exactly_the_effective_changes(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut tracker = DataTracker::builder("model", 3)
            .add(SLOT_A, 0.0)
            .add(SLOT_B, false)
            .add(SLOT_C, 0)
            .build();

        // the model: last-synced value per slot
        let mut synced: BTreeMap<u8, TrackedValue> = BTreeMap::new();
        synced.insert(0, TrackedValue::Float(0.0));
        synced.insert(1, TrackedValue::Bool(false));
        synced.insert(2, TrackedValue::VarUint(0));
        let mut current = synced.clone();

        for op in ops {
            match op {
                Op::SetA(v) => {
                    tracker.set(SLOT_A, v);
                    current.insert(0, TrackedValue::Float(v));
                }
                Op::SetB(v) => {
                    tracker.set(SLOT_B, v);
                    current.insert(1, TrackedValue::Bool(v));
                }
                Op::SetC(v) => {
                    tracker.set(SLOT_C, v);
                    current.insert(2, TrackedValue::VarUint(v));
                }
                Op::Drain => {
                    let expected: Vec<SerializedEntry> = current
                        .iter()
                        .filter(|&(slot, value)| synced[slot] != *value)
                        .map(|(slot, value)| SerializedEntry::new(*slot, *value))
                        .collect();

                    let drained = tracker.dirty_entries();
                    if expected.is_empty() {
                        prop_assert_eq!(drained, None);
                    } else {
                        prop_assert_eq!(drained, Some(expected));
                    }
                    synced = current.clone();
                }
            }
        }

        // a final drain settles everything; a second is always empty
        let _ = tracker.dirty_entries();
        prop_assert_eq!(tracker.dirty_entries(), None);
    }
}
