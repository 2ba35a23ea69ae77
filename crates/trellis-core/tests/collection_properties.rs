//! Property tests for the heap and disjoint-set invariants.

use proptest::prelude::*;
use trellis_core::{DisjointSetForest, IndexedPriorityQueue};

#[derive(Debug, Clone)]
enum QueueOp {
    Add(u8, u16),
    RemoveMin,
    Update(u8, u16),
    Remove(u8),
}

fn queue_op() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(v, p)| QueueOp::Add(v, p)),
        Just(QueueOp::RemoveMin),
        (any::<u8>(), any::<u16>()).prop_map(|(v, p)| QueueOp::Update(v, p)),
        any::<u8>().prop_map(QueueOp::Remove),
    ]
}

proptest! {
    #[test]
    fn heap_invariant_holds_after_every_operation(
        ops in prop::collection::vec(queue_op(), 0..200),
    ) {
        let mut queue = IndexedPriorityQueue::new();
        let mut model: std::collections::BTreeMap<u8, u16> = std::collections::BTreeMap::new();

        for op in ops {
            match op {
                QueueOp::Add(value, priority) => {
                    let added = queue.add(priority, value).is_ok();
                    prop_assert_eq!(added, !model.contains_key(&value));
                    model.entry(value).or_insert(priority);
                }
                QueueOp::RemoveMin => match queue.remove_min() {
                    Ok((priority, value)) => {
                        let min = model.values().copied().min();
                        prop_assert_eq!(Some(priority), min);
                        prop_assert_eq!(model.remove(&value), Some(priority));
                    }
                    Err(_) => prop_assert!(model.is_empty()),
                },
                QueueOp::Update(value, priority) => {
                    let updated = queue.update(&value, priority).is_ok();
                    prop_assert_eq!(updated, model.contains_key(&value));
                    if let Some(slot) = model.get_mut(&value) {
                        *slot = priority;
                    }
                }
                QueueOp::Remove(value) => {
                    let removed = queue.remove(&value).map(|(p, _)| p);
                    prop_assert_eq!(removed, model.remove(&value));
                }
            }
            prop_assert!(queue.is_consistent());
            prop_assert_eq!(queue.len(), model.len());
        }
    }

    #[test]
    fn disjoint_set_counts_and_idempotent_find(
        size in 1u32..60,
        unions in prop::collection::vec((0u32..60, 0u32..60), 0..120),
    ) {
        let mut sets = DisjointSetForest::new();
        for x in 0..size {
            sets.make_set(x).unwrap();
        }

        for (a, b) in unions {
            let (a, b) = (a % size, b % size);
            let before = sets.set_count();
            let merged = sets.union(&a, &b).unwrap();
            let expected = if merged { before - 1 } else { before };
            prop_assert_eq!(sets.set_count(), expected);
            prop_assert!(sets.are_in_same_set(&a, &b).unwrap());
        }

        let mut roots = std::collections::BTreeSet::new();
        for x in 0..size {
            let root = sets.find(&x).unwrap();
            prop_assert_eq!(sets.find(&root).unwrap(), root);
            roots.insert(root);
        }
        prop_assert_eq!(roots.len(), sets.set_count());

        for a in 0..size {
            for b in 0..size {
                let same = sets.find(&a).unwrap() == sets.find(&b).unwrap();
                prop_assert_eq!(sets.are_in_same_set(&a, &b).unwrap(), same);
            }
        }
    }
}
