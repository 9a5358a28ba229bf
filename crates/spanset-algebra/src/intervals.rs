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

//! The interval-level container.
//!
//! A thin facade over [`BoundaryContainer`] whose surface speaks
//! [`Interval`] values instead of raw boundary pairs. Both containers hold
//! the same canonical representation; converting between them is free.

use crate::boundary::BoundaryContainer;
use crate::predicates;
use crate::set::{BoundarySet, Intervals};
use spanset_core::alloc::MemoryResource;
use spanset_core::category::{IntervalCategory, Set};
use spanset_core::error::AllocError;
use spanset_core::interval::Interval;
use spanset_core::traits::{BoundedTraits, DiscreteTraits, SetTraits};
use spanset_store::map::MapStorage;
use spanset_store::storage::BoundaryStorage;
use std::fmt;

/// An owning set of disjoint intervals over an ordered domain.
pub struct IntervalContainer<T, S = MapStorage<T>>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    boundaries: BoundaryContainer<T, S>,
}

impl<T, S> IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    /// An empty set accounted against the global resource.
    pub fn new() -> Self {
        Self {
            boundaries: BoundaryContainer::new(),
        }
    }

    /// An empty set accounted against `resource`.
    pub fn with_resource(resource: MemoryResource) -> Self {
        Self {
            boundaries: BoundaryContainer::with_resource(resource),
        }
    }

    /// View the same set at the boundary level.
    #[inline]
    pub fn as_boundary(&self) -> &BoundaryContainer<T, S> {
        &self.boundaries
    }

    /// Unwrap into the boundary-level container. Free.
    #[inline]
    pub fn into_boundary(self) -> BoundaryContainer<T, S> {
        self.boundaries
    }

    /// The resource this container charges.
    #[inline]
    pub fn resource(&self) -> &MemoryResource {
        self.boundaries.resource()
    }

    /// Number of stored intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.boundaries.interval_count()
    }

    /// Return true if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Iterate the stored intervals in ascending order.
    pub fn iter(&self) -> Intervals<'_, BoundaryContainer<T, S>> {
        self.boundaries.intervals()
    }

    /// Return true if `x` is an element of the set.
    #[inline]
    pub fn contains(&self, x: T::Element) -> bool {
        self.boundaries.contains(x)
    }

    /// Return true if every element of `interval` is in the set.
    pub fn contains_interval(&self, interval: &Interval<T>) -> bool {
        predicates::contains_interval(&self.boundaries, interval)
    }

    /// Return true if the set has an element inside `interval`.
    pub fn intersects_interval(&self, interval: &Interval<T>) -> bool {
        predicates::intersects_interval(&self.boundaries, interval)
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.boundaries.clear();
    }

    /// Add every element of `interval` to the set.
    pub fn insert_interval(&mut self, interval: &Interval<T>) -> Result<(), AllocError> {
        self.boundaries
            .inplace_union(interval.start(), interval.exclusive_end())
    }

    /// Remove every element of `interval` from the set.
    pub fn remove_interval(&mut self, interval: &Interval<T>) -> Result<(), AllocError> {
        self.boundaries
            .inplace_subtract(interval.start(), interval.exclusive_end())
    }

    /// Clamp the set to `interval`.
    pub fn intersect_interval(&mut self, interval: &Interval<T>) -> Result<(), AllocError>
    where
        T: BoundedTraits,
    {
        self.boundaries
            .intersect_range(interval.start(), interval.exclusive_end())
    }

    /// Grow this set to the union with `other`.
    pub fn union_with<I>(&mut self, other: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        self.boundaries.union_with(other)
    }

    /// Shrink this set to the difference with `other`.
    pub fn subtract_with<I>(&mut self, other: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        self.boundaries.subtract_with(other)
    }

    /// Shrink this set to the intersection with `other`.
    pub fn intersect_with<I>(&mut self, other: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
        T: BoundedTraits,
    {
        self.boundaries.intersect_with(other)
    }

    /// Replace the contents with a copy of `set`.
    pub fn assign<I>(&mut self, set: &I) -> Result<(), AllocError>
    where
        I: BoundarySet<Traits = T>,
    {
        self.boundaries.assign(set)
    }

    /// Merge `other` into this set, consuming it.
    pub fn absorb(&mut self, other: Self) -> Result<(), AllocError> {
        self.boundaries.absorb(other.boundaries)
    }
}

impl<T, S> IntervalContainer<T, S>
where
    T: SetTraits + DiscreteTraits,
    S: BoundaryStorage<T>,
{
    /// Add the single element `x`.
    pub fn insert(&mut self, x: T::Element) -> Result<(), AllocError> {
        self.boundaries.insert(x)
    }

    /// Remove the single element `x`.
    pub fn remove(&mut self, x: T::Element) -> Result<(), AllocError> {
        self.boundaries.remove(x)
    }
}

impl<T, S> Default for IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> From<BoundaryContainer<T, S>> for IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn from(boundaries: BoundaryContainer<T, S>) -> Self {
        Self { boundaries }
    }
}

impl<T, S> Set for IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    type Traits = T;
    type Category = IntervalCategory;

    #[inline]
    fn is_empty_set(&self) -> bool {
        self.boundaries.is_empty()
    }
}

impl<T, S> PartialEq for IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.boundaries == other.boundaries
    }
}

impl<T, S> Eq for IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
}

impl<T, S> fmt::Debug for IntervalContainer<T, S>
where
    T: SetTraits,
    S: BoundaryStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanset_core::traits::PrimTraits;

    type T = PrimTraits<u32>;
    type IvSet = IntervalContainer<T>;

    fn iv(a: u32, b: u32) -> Interval<T> {
        Interval::new(a, b)
    }

    #[test]
    fn insert_and_query_intervals() {
        let mut set = IvSet::new();
        set.insert_interval(&iv(10, 20)).unwrap();
        set.insert_interval(&iv(30, 40)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains_interval(&iv(12, 18)));
        assert!(!set.contains_interval(&iv(12, 32)));
        assert!(set.intersects_interval(&iv(18, 32)));
        assert!(!set.intersects_interval(&iv(20, 30)));
    }

    #[test]
    fn remove_and_clamp() {
        let mut set = IvSet::new();
        set.insert_interval(&iv(0, 100)).unwrap();
        set.remove_interval(&iv(40, 60)).unwrap();
        let got: Vec<_> = set.iter().collect();
        assert_eq!(got, vec![iv(0, 40), iv(60, 100)]);
        set.intersect_interval(&iv(20, 80)).unwrap();
        let got: Vec<_> = set.iter().collect();
        assert_eq!(got, vec![iv(20, 40), iv(60, 80)]);
    }

    #[test]
    fn boundary_round_trip_is_free() {
        let mut set = IvSet::new();
        set.insert_interval(&iv(1, 5)).unwrap();
        let boundary = set.into_boundary();
        assert_eq!(boundary.interval_count(), 1);
        let back: IvSet = boundary.into();
        assert!(back.contains(3));
    }
}
