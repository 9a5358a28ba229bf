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

//! The owning boundary-set container.
//!
//! [`BoundaryContainer`] keeps a canonical boundary sequence in a storage
//! backend and mutates it through a single splice primitive that handles
//! union and subtraction of one interval symmetrically: the four
//! combinations of the parities at the two search bounds decide whether the
//! touched run of boundaries is erased, trimmed on one side, trimmed on
//! both, or split by a fresh pair. The splice carries a cursor so that a
//! sweep over an ascending interval sequence pays the bound search only
//! over the not-yet-visited tail.
//!
//! Memory is accounted against a [`MemoryResource`]: every stored pair is
//! charged before it is inserted and released when it is erased, so a
//! failed mutation leaves the container and the budget consistent. The
//! container is deliberately not `Clone`; copies are explicit through
//! [`BoundaryContainer::from_set`] and may fail.

use crate::complement::complement;
use crate::merge::{difference_of, intersection_of, union_of};
use crate::predicates::is_equal;
use crate::set::BoundarySet;
use spanset_core::alloc::MemoryResource;
use spanset_core::category::{BoundaryCategory, ElementOf, Set};
use spanset_core::error::AllocError;
use spanset_core::traits::{BoundedTraits, DiscreteTraits, SetTraits};
use spanset_store::map::MapStorage;
use spanset_store::storage::BoundaryStorage;
use std::fmt;
use std::marker::PhantomData;

// Accounting granularity: the elements of a pair plus a flat allowance for
// backend node overhead.
const PAIR_OVERHEAD: usize = 32;

fn pair_cost<T: SetTraits>() -> usize {
    2 * std::mem::size_of::<T::Element>() + PAIR_OVERHEAD
}

/// An owning, canonical set of intervals over an ordered domain.
///
/// `T` fixes the element type and its order; `S` picks the storage backend,
/// defaulting to the B-tree backend.
pub struct BoundaryContainer<T, S = MapStorage<T>>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    storage: S,
    resource: MemoryResource,
    _marker: PhantomData<T>,
}

impl<T, S> BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    /// An empty set accounted against the global resource.
    pub fn new() -> Self {
        Self::with_resource(MemoryResource::global())
    }

    /// An empty set accounted against `resource`.
    pub fn with_resource(resource: MemoryResource) -> Self {
        Self {
            storage: S::default(),
            resource,
            _marker: PhantomData,
        }
    }

    /// Materialize any boundary set into a fresh container.
    pub fn from_set<I>(set: &I, resource: MemoryResource) -> Result<Self, AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        let mut out = Self::with_resource(resource);
        for interval in set.intervals() {
            out.resource.charge(pair_cost::<T>())?;
            out.storage.push_pair(interval.start(), interval.exclusive_end());
        }
        Ok(out)
    }

    /// The resource this container charges.
    #[inline]
    pub fn resource(&self) -> &MemoryResource {
        &self.resource
    }

    /// Number of stored boundary points. Always even.
    #[inline]
    pub fn boundary_len(&self) -> usize {
        self.storage.boundary_len()
    }

    /// Number of stored intervals.
    #[inline]
    pub fn interval_count(&self) -> usize {
        self.storage.boundary_len() / 2
    }

    /// Return true if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// The largest boundary point, which is the exclusive end of the last
    /// interval.
    #[inline]
    pub fn back(&self) -> Option<T::Element> {
        self.storage.back()
    }

    /// Return true if `x` is an element of the set.
    pub fn contains(&self, x: T::Element) -> bool {
        let pos = self.storage.upper_bound(self.storage.begin(), x);
        self.storage.is_endpoint(pos)
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.resource
            .release(self.interval_count() * pair_cost::<T>());
        self.storage.clear();
    }

    /// Replace the contents with a copy of `set`.
    ///
    /// On allocation failure the container holds a prefix of `set`, so it
    /// is always a subset of `set`.
    pub fn assign<I>(&mut self, set: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        self.clear();
        for interval in set.intervals() {
            self.resource.charge(pair_cost::<T>())?;
            self.storage.push_pair(interval.start(), interval.exclusive_end());
        }
        Ok(())
    }

    /// Add the interval `[low, high_exclusive)` to the set.
    pub fn inplace_union(
        &mut self,
        low: T::Element,
        high_exclusive: T::Element,
    ) -> Result<(), AllocError> {
        let mut cursor = self.storage.begin();
        self.splice(&mut cursor, low, high_exclusive, true, true, None)
    }

    /// Add `[low, high_exclusive)`, resuming the bound search at `cursor`.
    ///
    /// On return `cursor` is the position of the first boundary past
    /// `high_exclusive`; feeding it back in for an ascending sequence of
    /// intervals makes the whole sweep cost one pass. A cursor that does
    /// not satisfy the precondition (every boundary before it is below
    /// `low`) is detected and ignored.
    pub fn inplace_union_hinted(
        &mut self,
        cursor: &mut S::Pos,
        low: T::Element,
        high_exclusive: T::Element,
    ) -> Result<(), AllocError> {
        self.splice(cursor, low, high_exclusive, true, false, None)
    }

    /// Remove the interval `[low, high_exclusive)` from the set.
    pub fn inplace_subtract(
        &mut self,
        low: T::Element,
        high_exclusive: T::Element,
    ) -> Result<(), AllocError> {
        let mut cursor = self.storage.begin();
        self.splice(&mut cursor, low, high_exclusive, false, true, None)
    }

    /// Remove `[low, high_exclusive)`, resuming the bound search at
    /// `cursor`. Same cursor contract as
    /// [`inplace_union_hinted`](Self::inplace_union_hinted).
    pub fn inplace_subtract_hinted(
        &mut self,
        cursor: &mut S::Pos,
        low: T::Element,
        high_exclusive: T::Element,
    ) -> Result<(), AllocError> {
        self.splice(cursor, low, high_exclusive, false, false, None)
    }

    /// The one-interval splice. `is_union` selects whether `[start,
    /// exclusive_end)` is added or removed. The parities at the two bound
    /// positions classify the overlap:
    ///
    /// - both on the `is_union` side: the touched run dissolves into the
    ///   surrounding state and is erased whole;
    /// - mixed parities: the run is erased except for one surviving point,
    ///   which moves to `start` or `exclusive_end`;
    /// - both on the other side with a non-empty run: two surviving points
    ///   move;
    /// - both on the other side with an empty run: the interval falls in a
    ///   gap (union) or strictly inside an interval (subtraction) and a
    ///   fresh pair is inserted. Only this case allocates, and it charges
    ///   the resource before touching the storage.
    ///
    /// When `donor` is given, the insertion steals the donor's first pair
    /// instead of charging, and a dissolved interval releases the donor's
    /// charge; the caller guarantees `[start, exclusive_end)` is the
    /// donor's first interval.
    fn splice(
        &mut self,
        cursor: &mut S::Pos,
        start: T::Element,
        exclusive_end: T::Element,
        is_union: bool,
        hint_guaranteed: bool,
        mut donor: Option<&mut S>,
    ) -> Result<(), AllocError> {
        debug_assert!(T::lt(start, exclusive_end));
        if hint_guaranteed {
            debug_assert!(
                *cursor == self.storage.begin()
                    || T::lt(self.storage.value(self.storage.prev(*cursor)), start)
            );
        } else if *cursor != self.storage.begin()
            && T::ge(self.storage.value(self.storage.prev(*cursor)), start)
        {
            *cursor = self.storage.begin();
        }
        let pairs_before = self.interval_count();
        let left = self.storage.lower_bound(*cursor, start);
        let right = self.storage.upper_bound(left, exclusive_end);
        let e_left = self.storage.is_endpoint(left);
        let e_right = self.storage.is_endpoint(right);
        if e_left == is_union {
            if e_right == is_union {
                *cursor = self.storage.erase_range(left, right);
            } else {
                let first = self.storage.next(left);
                let after = self.storage.erase_range(first, right);
                let survivor = self.storage.prev(after);
                *cursor = self.storage.update_point(survivor, exclusive_end);
            }
        } else if e_right == is_union {
            let first = self.storage.next(left);
            let after = self.storage.erase_range(first, right);
            let survivor = self.storage.prev(after);
            *cursor = self.storage.update_point(survivor, start);
        } else if left != right {
            let first = self.storage.next(self.storage.next(left));
            let after = self.storage.erase_range(first, right);
            let survivor = self.storage.prev(self.storage.prev(after));
            let next = self.storage.update_point(survivor, start);
            *cursor = self.storage.update_point(next, exclusive_end);
        } else {
            match donor.take() {
                Some(from) => {
                    *cursor = self
                        .storage
                        .steal_and_insert(left, start, exclusive_end, from);
                }
                None => {
                    self.resource.charge(pair_cost::<T>())?;
                    *cursor = self.storage.insert_pair(left, start, exclusive_end);
                }
            }
        }
        if let Some(from) = donor {
            // The donated pair dissolved into existing intervals; its
            // charge goes back to the budget.
            let _ = from.pop_front_pair();
            self.resource.release(pair_cost::<T>());
        }
        let pairs_after = self.interval_count();
        if pairs_after < pairs_before {
            self.resource
                .release((pairs_before - pairs_after) * pair_cost::<T>());
        }
        Ok(())
    }

    /// Sweep `source` into this container with repeated splices, keeping
    /// the cursor across intervals. Subtractive sweeps stop once the cursor
    /// falls off the end, since later source intervals cannot touch
    /// anything.
    fn splice_all<R>(&mut self, source: &R, is_union: bool) -> Result<(), AllocError>
    where
        R: BoundarySet<Traits = T>,
    {
        let mut cursor = self.storage.begin();
        for interval in source.intervals() {
            self.splice(
                &mut cursor,
                interval.start(),
                interval.exclusive_end(),
                is_union,
                true,
                None,
            )?;
            if !is_union && self.storage.is_end(cursor) {
                break;
            }
        }
        Ok(())
    }

    fn replace_with(&mut self, mut fresh: Self) {
        std::mem::swap(&mut self.storage, &mut fresh.storage);
        // `fresh` now owns the old storage and releases its charges on
        // drop; both share the same resource.
    }

    /// Estimate whether materializing the result out of place beats
    /// in-place splicing. Only meaningful for backends without fast
    /// insertion, where every insertion shifts the tail: compares the
    /// number of insertions against the expected shift work per insertion.
    fn prefer_full_copy<I>(&self, other: &I) -> bool
    where
        I: BoundarySet<Traits = T>,
    {
        let (Some(back), Some(front)) = (self.storage.back(), other.front()) else {
            return false;
        };
        let first_moved = self.storage.upper_bound(self.storage.begin(), front);
        let mut moved = 0usize;
        let mut p = first_moved;
        while !self.storage.is_end(p) {
            moved += 1;
            p = self.storage.next(p);
        }
        let expected_per_insert = moved >> 1;
        if expected_per_insert == 0 {
            return false;
        }
        let total = self.storage.boundary_len();
        let insert_end = other.upper_bound(back);
        let mut inserted = 0usize;
        let mut q = other.first();
        while q != insert_end {
            inserted += 1;
            if inserted * expected_per_insert > total {
                return true;
            }
            q = other.step(q);
        }
        false
    }

    /// Grow this set to the union with `other`.
    ///
    /// On allocation failure the container holds a superset of its old
    /// value and a subset of the union.
    pub fn union_with<I>(&mut self, other: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        if other.is_empty_set() {
            return Ok(());
        }
        if self.is_empty() {
            return self.assign(other);
        }
        if !S::HAS_FAST_INSERTION && self.prefer_full_copy(other) {
            let fresh = {
                let view = union_of(&*self, other);
                Self::from_set(&view, self.resource.clone())?
            };
            self.replace_with(fresh);
            return Ok(());
        }
        self.splice_all(other, true)
    }

    /// Shrink this set to the difference with `other`.
    pub fn subtract_with<I>(&mut self, other: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        if other.is_empty_set() || self.is_empty() {
            return Ok(());
        }
        if !S::HAS_FAST_INSERTION && self.prefer_full_copy(other) {
            let fresh = {
                let view = difference_of(&*self, other);
                Self::from_set(&view, self.resource.clone())?
            };
            self.replace_with(fresh);
            return Ok(());
        }
        self.splice_all(other, false)
    }

    /// Shrink this set to the intersection with `other`.
    ///
    /// Implemented as subtraction of the complement, which reuses the
    /// subtractive sweep unchanged and therefore needs a bounded domain.
    pub fn intersect_with<I>(&mut self, other: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
        T: BoundedTraits,
    {
        if self.is_empty() {
            return Ok(());
        }
        if other.is_empty_set() {
            self.clear();
            return Ok(());
        }
        if !S::HAS_FAST_INSERTION && self.prefer_full_copy(other) {
            let fresh = {
                let view = intersection_of(&*self, other);
                Self::from_set(&view, self.resource.clone())?
            };
            self.replace_with(fresh);
            return Ok(());
        }
        let comp = complement(other);
        self.splice_all(&comp, false)
    }

    /// Clamp the set to `[low, high_exclusive)` by subtracting everything
    /// outside it. Never inserts, so it cannot fail in practice.
    pub fn intersect_range(
        &mut self,
        low: T::Element,
        high_exclusive: T::Element,
    ) -> Result<(), AllocError>
    where
        T: BoundedTraits,
    {
        debug_assert!(T::lt(low, high_exclusive));
        if T::lt(high_exclusive, T::max_exclusive()) {
            self.inplace_subtract(high_exclusive, T::max_exclusive())?;
        }
        if T::gt(low, T::min_value()) {
            self.inplace_subtract(T::min_value(), low)?;
        }
        Ok(())
    }

    /// Merge `other` into this set, consuming it. When both containers
    /// charge the same resource the transfer is budget-neutral: inserted
    /// pairs keep the donor's charge and dissolved pairs release it, so no
    /// new budget is needed.
    pub fn absorb(&mut self, mut other: Self) -> Result<(), AllocError> {
        if !self.resource.same_as(&other.resource) {
            return self.union_with(&other);
        }
        let mut cursor = self.storage.begin();
        loop {
            let (start, exclusive_end) = {
                let s = &other.storage;
                if s.is_empty() {
                    break;
                }
                let b = s.begin();
                (s.value(b), s.value(s.next(b)))
            };
            self.splice(
                &mut cursor,
                start,
                exclusive_end,
                true,
                true,
                Some(&mut other.storage),
            )?;
        }
        Ok(())
    }
}

impl<T, S> BoundaryContainer<T, S>
where
    T: SetTraits + DiscreteTraits,
    S: BoundaryStorage<T>,
{
    /// Add the single element `x`. Requires `x` to have a successor.
    pub fn insert(&mut self, x: T::Element) -> Result<(), AllocError> {
        self.inplace_union(x, T::next(x))
    }

    /// Remove the single element `x`. Requires `x` to have a successor.
    pub fn remove(&mut self, x: T::Element) -> Result<(), AllocError> {
        self.inplace_subtract(x, T::next(x))
    }
}

impl<T, S> Default for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Drop for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn drop(&mut self) {
        self.resource
            .release(self.interval_count() * pair_cost::<T>());
    }
}

impl<T, S> Set for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    type Traits = T;
    type Category = BoundaryCategory;

    #[inline]
    fn is_empty_set(&self) -> bool {
        self.storage.is_empty()
    }
}

impl<T, S> BoundarySet for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    type Pos = S::Pos;

    #[inline]
    fn first(&self) -> S::Pos {
        self.storage.begin()
    }

    #[inline]
    fn past_end(&self) -> S::Pos {
        self.storage.end()
    }

    #[inline]
    fn at_end(&self, pos: S::Pos) -> bool {
        self.storage.is_end(pos)
    }

    #[inline]
    fn value(&self, pos: S::Pos) -> ElementOf<Self> {
        self.storage.value(pos)
    }

    #[inline]
    fn is_endpoint(&self, pos: S::Pos) -> bool {
        self.storage.is_endpoint(pos)
    }

    #[inline]
    fn step(&self, pos: S::Pos) -> S::Pos {
        self.storage.next(pos)
    }

    #[inline]
    fn lower_bound_from(&self, hint: S::Pos, x: T::Element) -> S::Pos {
        self.storage.lower_bound(hint, x)
    }

    #[inline]
    fn upper_bound_from(&self, hint: S::Pos, x: T::Element) -> S::Pos {
        self.storage.upper_bound(hint, x)
    }

    #[inline]
    fn boundary_count(&self) -> Option<usize> {
        Some(self.storage.boundary_len())
    }

    #[inline]
    fn front(&self) -> Option<T::Element> {
        self.storage.front()
    }
}

impl<T, S> PartialEq for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn eq(&self, other: &Self) -> bool {
        is_equal(self, other)
    }
}

impl<T, S> Eq for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
}

impl<T, S> fmt::Debug for BoundaryContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.intervals().map(|iv| (iv.start(), iv.exclusive_end())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::is_canonical;
    use spanset_core::traits::PrimTraits;
    use spanset_store::vec::VecStorage;

    type T = PrimTraits<u64>;
    type MapSet = BoundaryContainer<T>;
    type VecSet = BoundaryContainer<T, VecStorage<T>>;

    fn intervals<S: BoundaryStorage<T>>(set: &BoundaryContainer<T, S>) -> Vec<(u64, u64)> {
        set.intervals()
            .map(|iv| (iv.start(), iv.exclusive_end()))
            .collect()
    }

    #[test]
    fn union_into_gap_inserts() {
        let mut set = MapSet::new();
        set.inplace_union(10, 20).unwrap();
        set.inplace_union(30, 40).unwrap();
        set.inplace_union(22, 25).unwrap();
        assert_eq!(intervals(&set), vec![(10, 20), (22, 25), (30, 40)]);
        assert!(is_canonical(&set));
    }

    #[test]
    fn union_extends_and_merges() {
        let mut set = MapSet::new();
        set.inplace_union(10, 20).unwrap();
        set.inplace_union(30, 40).unwrap();
        // Overlaps the first interval and touches the second.
        set.inplace_union(15, 30).unwrap();
        assert_eq!(intervals(&set), vec![(10, 40)]);
        assert!(is_canonical(&set));
    }

    #[test]
    fn union_of_adjacent_intervals_fuses() {
        let mut set = MapSet::new();
        set.inplace_union(10, 20).unwrap();
        set.inplace_union(20, 30).unwrap();
        assert_eq!(intervals(&set), vec![(10, 30)]);
    }

    #[test]
    fn union_swallows_covered_intervals() {
        let mut set = MapSet::new();
        for start in [10u64, 30, 50, 70] {
            set.inplace_union(start, start + 5).unwrap();
        }
        set.inplace_union(5, 80).unwrap();
        assert_eq!(intervals(&set), vec![(5, 80)]);
        assert_eq!(set.interval_count(), 1);
    }

    #[test]
    fn subtract_splits_an_interval() {
        let mut set = MapSet::new();
        set.inplace_union(10, 40).unwrap();
        set.inplace_subtract(20, 30).unwrap();
        assert_eq!(intervals(&set), vec![(10, 20), (30, 40)]);
        assert!(is_canonical(&set));
    }

    #[test]
    fn subtract_trims_both_sides() {
        let mut set = MapSet::new();
        set.inplace_union(10, 20).unwrap();
        set.inplace_union(30, 40).unwrap();
        set.inplace_subtract(15, 35).unwrap();
        assert_eq!(intervals(&set), vec![(10, 15), (35, 40)]);
    }

    #[test]
    fn subtract_disjoint_is_a_no_op() {
        let mut set = MapSet::new();
        set.inplace_union(10, 20).unwrap();
        set.inplace_subtract(40, 50).unwrap();
        assert_eq!(intervals(&set), vec![(10, 20)]);
    }

    #[test]
    fn hinted_sweep_matches_unhinted() {
        let mut hinted = MapSet::new();
        let mut cursor = hinted.storage.begin();
        let mut plain = MapSet::new();
        for start in (0u64..200).step_by(10) {
            hinted.inplace_union_hinted(&mut cursor, start, start + 7).unwrap();
            plain.inplace_union(start, start + 7).unwrap();
        }
        assert_eq!(hinted, plain);
    }

    #[test]
    fn stale_hint_is_detected() {
        let mut set = MapSet::new();
        let mut cursor = set.storage.begin();
        set.inplace_union_hinted(&mut cursor, 50, 60).unwrap();
        // The cursor now sits past 60; an interval before it must still
        // land correctly.
        set.inplace_union_hinted(&mut cursor, 10, 20).unwrap();
        assert_eq!(intervals(&set), vec![(10, 20), (50, 60)]);
    }

    #[test]
    fn single_elements() {
        let mut set = MapSet::new();
        set.insert(5).unwrap();
        set.insert(6).unwrap();
        set.insert(8).unwrap();
        assert_eq!(intervals(&set), vec![(5, 7), (8, 9)]);
        assert!(set.contains(6));
        assert!(!set.contains(7));
        set.remove(6).unwrap();
        assert_eq!(intervals(&set), vec![(5, 6), (8, 9)]);
    }

    #[test]
    fn bulk_union_on_both_backends() {
        let mut a = VecSet::new();
        let mut b = VecSet::new();
        for start in (0u64..100).step_by(20) {
            a.inplace_union(start, start + 10).unwrap();
        }
        for start in (5u64..100).step_by(20) {
            b.inplace_union(start, start + 10).unwrap();
        }
        a.union_with(&b).unwrap();
        assert_eq!(intervals(&a), vec![(0, 15), (20, 35), (40, 55), (60, 75), (80, 95)]);

        let mut c = MapSet::new();
        let mut d = MapSet::new();
        c.inplace_union(0, 10).unwrap();
        d.inplace_union(5, 15).unwrap();
        c.union_with(&d).unwrap();
        assert_eq!(intervals(&c), vec![(0, 15)]);
    }

    #[test]
    fn bulk_subtract_and_intersect() {
        let mut a = MapSet::new();
        a.inplace_union(0, 100).unwrap();
        let mut b = MapSet::new();
        b.inplace_union(10, 20).unwrap();
        b.inplace_union(30, 40).unwrap();
        a.subtract_with(&b).unwrap();
        assert_eq!(intervals(&a), vec![(0, 10), (20, 30), (40, 100)]);

        let mut c = MapSet::new();
        c.inplace_union(0, 50).unwrap();
        c.intersect_with(&b).unwrap();
        assert_eq!(intervals(&c), vec![(10, 20), (30, 40)]);
    }

    #[test]
    fn intersect_range_clamps() {
        let mut set = MapSet::new();
        set.inplace_union(0, 10).unwrap();
        set.inplace_union(20, 30).unwrap();
        set.inplace_union(40, 50).unwrap();
        set.intersect_range(5, 45).unwrap();
        assert_eq!(intervals(&set), vec![(5, 10), (20, 30), (40, 45)]);
    }

    #[test]
    fn absorb_is_budget_neutral() {
        let resource = MemoryResource::with_limit(16 * 1024);
        let mut a = MapSet::with_resource(resource.clone());
        let mut b = MapSet::with_resource(resource.clone());
        a.inplace_union(0, 10).unwrap();
        b.inplace_union(20, 30).unwrap();
        b.inplace_union(5, 8).unwrap();
        let used_before = resource.used();
        a.absorb(b).unwrap();
        assert_eq!(intervals(&a), vec![(0, 10), (20, 30)]);
        // One donated pair was stolen, one dissolved and was released.
        assert_eq!(resource.used(), used_before - pair_cost::<T>());
    }

    #[test]
    fn accounting_follows_the_pair_count() {
        let resource = MemoryResource::with_limit(16 * 1024);
        {
            let mut set = MapSet::with_resource(resource.clone());
            set.inplace_union(0, 10).unwrap();
            set.inplace_union(20, 30).unwrap();
            assert_eq!(resource.used(), 2 * pair_cost::<T>());
            set.inplace_union(10, 20).unwrap();
            assert_eq!(resource.used(), pair_cost::<T>());
            set.clear();
            assert_eq!(resource.used(), 0);
            set.inplace_union(0, 100).unwrap();
        }
        // Dropping the container returns its budget.
        assert_eq!(resource.used(), 0);
    }

    #[test]
    fn exhausted_budget_fails_cleanly() {
        let resource = MemoryResource::with_limit(2 * pair_cost::<T>());
        let mut set = MapSet::with_resource(resource.clone());
        set.inplace_union(0, 10).unwrap();
        set.inplace_union(20, 30).unwrap();
        let err = set.inplace_union(40, 50);
        assert!(err.is_err());
        // The failed splice left the set untouched.
        assert_eq!(intervals(&set), vec![(0, 10), (20, 30)]);
        // Merging into an existing interval needs no budget.
        set.inplace_union(10, 20).unwrap();
        assert_eq!(intervals(&set), vec![(0, 30)]);
    }

    #[test]
    fn assign_and_from_set() {
        let mut a = MapSet::new();
        a.inplace_union(0, 10).unwrap();
        a.inplace_union(20, 30).unwrap();
        let b = MapSet::from_set(&a, MemoryResource::global()).unwrap();
        assert_eq!(a, b);
        let mut c = VecSet::new();
        c.assign(&a).unwrap();
        assert_eq!(intervals(&c), vec![(0, 10), (20, 30)]);
    }
}
