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

//! End-to-end behavior over the public surface.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spanset_algebra::aliases::{KeyedU64Set, U64BoundarySet};
use spanset_algebra::codec::{decode, Encode};
use spanset_algebra::complement::complement;
use spanset_algebra::set::{is_canonical, BoundarySet};
use spanset_algebra::volume::{volume_difference, Measure};
use spanset_algebra::BoundaryContainer;
use spanset_core::alloc::MemoryResource;
use spanset_core::traits::PrimTraits;
use spanset_store::vec::VecStorage;

type VecU64Set = BoundaryContainer<PrimTraits<u64>, VecStorage<PrimTraits<u64>>>;

fn intervals<S: BoundarySet<Traits = PrimTraits<u64>>>(set: &S) -> Vec<(u64, u64)> {
    set.intervals()
        .map(|iv| (iv.start(), iv.exclusive_end()))
        .collect()
}

#[test]
fn shuffled_single_inserts_collapse_to_one_interval() {
    let mut elements: Vec<u64> = (1..=32768).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    elements.shuffle(&mut rng);

    let mut map_set = U64BoundarySet::new();
    let mut vec_set = VecU64Set::new();
    for &x in &elements {
        map_set.insert(x).unwrap();
        vec_set.insert(x).unwrap();
    }
    assert_eq!(intervals(&map_set), vec![(1, 32769)]);
    assert_eq!(intervals(&vec_set), vec![(1, 32769)]);
    assert!(is_canonical(&map_set));
}

#[test]
fn overlapping_unions_collapse_to_one_interval() {
    let mut set = U64BoundarySet::new();
    // Each interval overlaps its predecessor by one element.
    for k in 0..2000u64 {
        set.inplace_union(2 * k + 1, 2 * k + 4).unwrap();
    }
    assert_eq!(intervals(&set), vec![(1, 4001)]);
    assert!(is_canonical(&set));
}

#[test]
fn nested_text_round_trip() {
    let text = "a:3-4,b:3,5";
    let set: KeyedU64Set = decode(text).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.encode(), text);

    // Re-decoding the encoding is a fixed point.
    let again: KeyedU64Set = decode(&set.encode()).unwrap();
    assert!(set == again);
}

#[test]
fn volume_difference_is_exact_beyond_the_mantissa() {
    // Four keys each spanning nearly the whole u64 domain: the total
    // volume exceeds 2^64 and is far beyond what f64 resolves.
    let mut a = KeyedU64Set::new();
    let mut b = KeyedU64Set::new();
    for key in ['a', 'b', 'c', 'd'] {
        a.update(key, |inner| inner.inplace_union(0, u64::MAX)).unwrap();
        b.update(key, |inner| inner.inplace_union(0, u64::MAX)).unwrap();
    }
    // Remove a single element from one side.
    b.update('c', |inner| inner.remove(12345)).unwrap();

    assert!(a.raw_volume() > u128::from(u64::MAX));
    assert_eq!(volume_difference(&a, &b), 1.0);
    assert_eq!(volume_difference(&b, &a), -1.0);
    assert_eq!(volume_difference(&a, &a), 0.0);
}

#[test]
fn complement_folds_back_to_its_source() {
    let mut set = U64BoundarySet::new();
    set.inplace_union(100, 200).unwrap();
    let view = complement(&set);
    assert!(std::ptr::eq(view.source(), &set));
    assert!(std::ptr::eq(view.complement(), &set));

    // And the view itself behaves as the set-theoretic complement.
    assert!(!view.is_full());
    let first = view.intervals().next().unwrap();
    assert_eq!((first.start(), first.exclusive_end()), (0, 100));
}

#[test]
fn failed_subtraction_cannot_happen_on_disjoint_sets() {
    // Measure how much budget the set needs, then rebuild it against a
    // budget with zero headroom: any insertion would fail, but removing a
    // disjoint set never inserts.
    let needed = {
        let probe = MemoryResource::unlimited();
        let mut set = U64BoundarySet::with_resource(probe.clone());
        set.inplace_union(10, 20).unwrap();
        set.inplace_union(30, 40).unwrap();
        probe.used()
    };
    let resource = MemoryResource::with_limit(needed);
    let mut set = U64BoundarySet::with_resource(resource.clone());
    set.inplace_union(10, 20).unwrap();
    set.inplace_union(30, 40).unwrap();
    assert!(set.inplace_union(50, 60).is_err());

    let mut other = U64BoundarySet::new();
    other.inplace_union(50, 60).unwrap();
    other.inplace_union(70, 80).unwrap();

    set.subtract_with(&other).unwrap();
    assert_eq!(intervals(&set), vec![(10, 20), (30, 40)]);
}

#[test]
fn bulk_operations_agree_across_backends() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut starts: Vec<u64> = (0..500).map(|k| k * 7).collect();
    starts.shuffle(&mut rng);

    let mut map_a = U64BoundarySet::new();
    let mut vec_a = VecU64Set::new();
    for &s in &starts[..250] {
        map_a.inplace_union(s, s + 5).unwrap();
        vec_a.inplace_union(s, s + 5).unwrap();
    }
    let mut map_b = U64BoundarySet::new();
    let mut vec_b = VecU64Set::new();
    for &s in &starts[250..] {
        map_b.inplace_union(s, s + 11).unwrap();
        vec_b.inplace_union(s, s + 11).unwrap();
    }

    map_a.union_with(&map_b).unwrap();
    vec_a.union_with(&vec_b).unwrap();
    assert_eq!(intervals(&map_a), intervals(&vec_a));
    assert!(is_canonical(&map_a));

    map_a.subtract_with(&map_b).unwrap();
    vec_a.subtract_with(&vec_b).unwrap();
    assert_eq!(intervals(&map_a), intervals(&vec_a));

    map_a.intersect_with(&map_b).unwrap();
    vec_a.intersect_with(&vec_b).unwrap();
    assert_eq!(intervals(&map_a), intervals(&vec_a));
    assert!(map_a.is_empty());
}
