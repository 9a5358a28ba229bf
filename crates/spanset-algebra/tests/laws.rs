// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Algebraic laws checked over generated sets.

use proptest::prelude::*;
use spanset_algebra::aliases::U64BoundarySet;
use spanset_algebra::codec::{decode, Encode};
use spanset_algebra::complement::complement;
use spanset_algebra::merge::{difference_of, intersection_of, union_of};
use spanset_algebra::predicates::{is_disjoint, is_equal, is_intersecting, is_subset};
use spanset_algebra::set::{is_canonical, BoundarySet};
use spanset_algebra::volume::Measure;
use spanset_algebra::BoundaryContainer;
use spanset_core::category::Set;
use spanset_core::traits::PrimTraits;
use spanset_store::vec::VecStorage;

type T = PrimTraits<u64>;
type VecU64Set = BoundaryContainer<T, VecStorage<T>>;

fn build(pairs: &[(u64, u64)]) -> U64BoundarySet {
    let mut set = U64BoundarySet::new();
    for &(start, len) in pairs {
        set.inplace_union(start, start + len).unwrap();
    }
    set
}

fn intervals_strategy() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..5000, 1u64..200), 0..24)
}

proptest! {
    #[test]
    fn containers_stay_canonical(pairs in intervals_strategy()) {
        let set = build(&pairs);
        prop_assert!(is_canonical(&set));
    }

    #[test]
    fn views_and_inplace_operations_agree(
        a in intervals_strategy(),
        b in intervals_strategy(),
    ) {
        let a = build(&a);
        let b = build(&b);

        let mut inplace = U64BoundarySet::new();
        inplace.assign(&a).unwrap();
        inplace.union_with(&b).unwrap();
        prop_assert!(is_equal(&inplace, &union_of(&a, &b)));

        inplace.assign(&a).unwrap();
        inplace.subtract_with(&b).unwrap();
        prop_assert!(is_equal(&inplace, &difference_of(&a, &b)));

        inplace.assign(&a).unwrap();
        inplace.intersect_with(&b).unwrap();
        prop_assert!(is_equal(&inplace, &intersection_of(&a, &b)));
    }

    #[test]
    fn union_is_commutative_and_intersection_distributes(
        a in intervals_strategy(),
        b in intervals_strategy(),
    ) {
        let a = build(&a);
        let b = build(&b);
        prop_assert!(is_equal(&union_of(&a, &b), &union_of(&b, &a)));
        prop_assert!(is_equal(&intersection_of(&a, &b), &intersection_of(&b, &a)));

        // a = (a - b) union (a intersect b), and the two parts are disjoint.
        let minus = difference_of(&a, &b);
        let both = intersection_of(&a, &b);
        prop_assert!(is_equal(&a, &union_of(&minus, &both)));
        prop_assert!(is_disjoint(&minus, &b));
    }

    #[test]
    fn complement_partitions_the_domain(pairs in intervals_strategy()) {
        let set = build(&pairs);
        let inverse = complement(&set);
        prop_assert!(is_disjoint(&set, &inverse));
        // Every element below the fence is on exactly one side.
        for probe in [0u64, 1, 4999, 5200, u64::MAX - 1] {
            let in_set = set.contains(probe);
            let in_inverse = spanset_algebra::predicates::contains_element(&inverse, probe);
            prop_assert!(in_set != in_inverse);
        }
    }

    #[test]
    fn subset_and_intersection_predicates_are_consistent(
        a in intervals_strategy(),
        b in intervals_strategy(),
    ) {
        let a = build(&a);
        let b = build(&b);
        let both = intersection_of(&a, &b);
        prop_assert!(is_subset(&both, &a));
        prop_assert!(is_subset(&both, &b));
        prop_assert_eq!(!both.is_empty_set(), is_intersecting(&a, &b));

        let mut merged = U64BoundarySet::new();
        merged.assign(&a).unwrap();
        merged.union_with(&b).unwrap();
        prop_assert!(is_subset(&a, &merged));
        prop_assert!(is_subset(&b, &merged));
    }

    #[test]
    fn inclusion_exclusion_of_volumes(
        a in intervals_strategy(),
        b in intervals_strategy(),
    ) {
        let a = build(&a);
        let b = build(&b);
        let union = union_of(&a, &b).raw_volume();
        let both = intersection_of(&a, &b).raw_volume();
        prop_assert_eq!(a.raw_volume() + b.raw_volume(), union + both);
    }

    #[test]
    fn text_round_trip(pairs in intervals_strategy()) {
        let set = build(&pairs);
        let text = set.encode();
        let back: U64BoundarySet = decode(&text).unwrap();
        prop_assert!(set == back);
    }

    #[test]
    fn backends_agree(pairs in intervals_strategy()) {
        let map_set = build(&pairs);
        let mut vec_set = VecU64Set::new();
        for &(start, len) in &pairs {
            vec_set.inplace_union(start, start + len).unwrap();
        }
        prop_assert!(is_equal(&map_set, &vec_set));
        prop_assert_eq!(map_set.boundary_len(), vec_set.boundary_len());
    }

    #[test]
    fn membership_matches_the_interval_walk(
        pairs in intervals_strategy(),
        probe in 0u64..6000,
    ) {
        let set = build(&pairs);
        let expected = set
            .intervals()
            .any(|iv| iv.start() <= probe && probe < iv.exclusive_end());
        prop_assert_eq!(set.contains(probe), expected);
    }
}
