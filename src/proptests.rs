use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use proptest::prelude::*;

use crate::*;

#[derive(Clone, Debug)]
enum Op {
    Add(u16),
    Remove(u16),
}

/// Values clustered low enough to collide often, mixed with values from anywhere.
fn arb_value() -> impl Strategy<Value = u16> {
    prop_oneof![0u16..8192, any::<u16>()]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            3 => arb_value().prop_map(Op::Add),
            1 => arb_value().prop_map(Op::Remove),
        ],
        0..6000,
    )
}

/// Strategy: either a sparse set, or one dense enough to be stored as a bitmap.
fn arb_set() -> impl Strategy<Value = BTreeSet<u16>> {
    prop_oneof![
        proptest::collection::btree_set(any::<u16>(), 0..200),
        proptest::collection::btree_set(0u16..12000, 3000..7000),
    ]
}

/// One container of each concrete representation, holding `values`.
fn make_pair(values: &BTreeSet<u16>) -> [Container; 2] {
    let array = ArrayContainer::try_from(values.iter().copied().collect::<Vec<_>>()).unwrap();
    let mut bitmap = BitmapContainer::new();
    for value in values {
        bitmap.add(*value);
    }
    [array.into(), bitmap.into()]
}

fn arb_range() -> impl Strategy<Value = ValueRange> {
    (0u32..=MAX_CAPACITY, 0u32..=MAX_CAPACITY).prop_map(|(start, len)| {
        ValueRange::new(start, std::cmp::min(start + len, MAX_CAPACITY)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mutations_match_model(ops in arb_ops()) {
        let mut container = Container::new();
        let mut array = ArrayContainer::new();
        let mut bitmap = BitmapContainer::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(value) => {
                    let expected = model.insert(value);
                    prop_assert_eq!(container.add(value), expected);
                    prop_assert_eq!(array.add(value), expected);
                    prop_assert_eq!(bitmap.add(value), expected);
                }
                Op::Remove(value) => {
                    let expected = model.remove(&value);
                    prop_assert_eq!(container.remove(value), expected);
                    prop_assert_eq!(array.remove(value), expected);
                    prop_assert_eq!(bitmap.remove(value), expected);
                }
            }
        }

        let expected: Vec<u16> = model.iter().copied().collect();
        prop_assert!(array.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(array.as_slice(), &expected[..]);
        prop_assert_eq!(bitmap.cardinality(), bitmap.compute_cardinality());
        prop_assert_eq!(bitmap.short_iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(container.cardinality(), model.len());
        prop_assert_eq!(container.short_iter().count(), container.cardinality());
        prop_assert_eq!(container.short_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn reverse_mirrors_forward(values in arb_set()) {
        for container in make_pair(&values) {
            let mut forward: Vec<u16> = container.short_iter().collect();
            forward.reverse();
            prop_assert_eq!(container.reverse_iter().collect::<Vec<_>>(), forward);
        }
    }

    #[test]
    fn advance_matches_model(values in arb_set(), targets in proptest::collection::vec(any::<u16>(), 1..64)) {
        for container in make_pair(&values) {
            let mut iter = container.short_iter();
            let mut cursor = values.iter().next().copied();
            for target in targets.iter().copied() {
                if let Some(current) = cursor {
                    if current < target {
                        cursor = values.range(target ..).next().copied();
                    }
                }
                iter.advance_if_needed(target);
                prop_assert_eq!(iter.peek_next(), cursor);
                prop_assert_eq!(iter.has_next(), cursor.is_some());

                if let Some(current) = cursor.filter(|_| target % 3 == 0) {
                    prop_assert_eq!(iter.next(), Some(current));
                    cursor = values.range((Excluded(current), Unbounded)).next().copied();
                }
            }
        }
    }

    #[test]
    fn complement_matches_model(values in arb_set(), range in arb_range()) {
        let mut model = values.clone();
        for value in range.values() {
            if !model.remove(&value) {
                model.insert(value);
            }
        }
        let expected: Vec<u16> = model.iter().copied().collect();

        for container in make_pair(&values) {
            let flipped = container.not(range);
            prop_assert_eq!(flipped.cardinality(), expected.len());
            prop_assert_eq!(flipped.short_iter().collect::<Vec<_>>(), expected.clone());
            prop_assert_eq!(flipped.inot(range), container);
        }
    }

    #[test]
    fn conversions_preserve_members(values in arb_set()) {
        let [array, bitmap] = make_pair(&values);
        let converted = array.to_bitmap_container();
        prop_assert_eq!(converted.cardinality(), values.len());
        prop_assert!(converted.short_iter().eq(values.iter().copied()));
        prop_assert_eq!(Container::from(converted), bitmap.clone());
        prop_assert_eq!(bitmap.to_efficient_container(), array);
    }

    #[test]
    fn rank_select_agree(values in arb_set()) {
        for container in make_pair(&values) {
            for (index, value) in values.iter().copied().enumerate() {
                prop_assert_eq!(container.select(index), Some(value));
                prop_assert_eq!(container.rank(value), index + 1);
            }
            prop_assert_eq!(container.select(values.len()), None);
            prop_assert_eq!(container.minimum(), values.first().copied());
            prop_assert_eq!(container.maximum(), values.last().copied());
        }
    }
}
