use super::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

/// Walks the whole tree checking the invariants that must hold after every
/// public operation: stored heights match their subtrees, every balance
/// factor is within ±1, and the in-order sequence is strictly ascending.
fn validate_tree<T: Ord>(tree: &Boxwood<T>) {
    fn check<T>(link: &Link<T>) -> (i32, usize) {
        let Some(node) = link.as_deref() else {
            return (-1, 0);
        };

        let (left_height, left_count) = check(&node.left);
        let (right_height, right_count) = check(&node.right);

        assert_eq!(
            node.height,
            1 + left_height.max(right_height),
            "stored height must match children"
        );
        assert!(
            (left_height - right_height).abs() <= 1,
            "balance factor out of range"
        );

        (node.height, left_count + right_count + 1)
    }

    let (_, count) = check(&tree.root);
    assert_eq!(count, tree.len(), "length must match reachable nodes");

    let entries: Vec<&T> = tree.iter().collect();
    assert!(
        entries.windows(2).all(|pair| pair[0] < pair[1]),
        "in-order output must be strictly ascending"
    );
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u16),
    Remove(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..256).prop_map(Op::Insert),
        (0u16..256).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn random_ops_preserve_invariants(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let mut tree = Boxwood::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let inserted = tree.insert(key);
                    prop_assert_eq!(inserted, model.insert(key));
                }
                Op::Remove(key) => {
                    tree.remove(&key);
                    model.remove(&key);
                }
            }

            validate_tree(&tree);
        }

        let entries: Vec<u16> = tree.iter().copied().collect();
        let expected: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn lookups_match_model(keys in proptest::collection::vec(0u16..512, 1..200)) {
        let mut tree = Boxwood::new();
        let mut model = BTreeSet::new();

        for key in &keys {
            tree.insert(*key);
            model.insert(*key);
        }

        for probe in 0u16..512 {
            prop_assert_eq!(tree.contains(&probe), model.contains(&probe));
        }
    }

    #[test]
    fn draining_every_key_empties_the_tree(keys in proptest::collection::vec(0u16..128, 1..128)) {
        let mut tree = Boxwood::new();
        for key in &keys {
            tree.insert(*key);
        }

        let mut remaining: Vec<u16> = tree.iter().copied().collect();

        // drain from the top of the key order, validating after each step
        while let Some(key) = remaining.pop() {
            tree.remove(&key);
            validate_tree(&tree);
            prop_assert!(!tree.contains(&key));
        }

        prop_assert!(tree.is_empty());
    }
}
