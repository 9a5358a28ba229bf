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

//! The boundary-set contract.
//!
//! Everything in the boundary category (owning containers, merge views,
//! complement views, constant views) presents the same position-based
//! surface: parity-flagged boundary points with hinted bound lookups. The
//! single-pass merge machinery and every predicate are written against this
//! trait alone, so views compose with containers and with each other
//! freely.

use crate::merge::{MergeView, Union};
use spanset_core::category::{BoundaryCategory, ElementOf, Set};
use spanset_core::interval::Interval;
use spanset_core::traits::SetTraits;
use std::fmt;
use std::iter::FusedIterator;

/// A set in the boundary category: a canonical, even-length, strictly
/// increasing sequence of boundary points whose parity encodes start/end.
///
/// Positions are cheap copyable cursors. The end position is a regular
/// value: it compares equal only to itself and reports `is_endpoint ==
/// false`, which the merge machinery relies on when it treats the end as a
/// value beyond every element.
pub trait BoundarySet: Set<Category = BoundaryCategory> {
    /// Cursor into the boundary sequence.
    type Pos: Copy + PartialEq + fmt::Debug;

    /// Position of the first boundary, or the end position when empty.
    fn first(&self) -> Self::Pos;

    /// The past-the-end position.
    fn past_end(&self) -> Self::Pos;

    /// Return true if `pos` is the past-the-end position.
    fn at_end(&self, pos: Self::Pos) -> bool;

    /// The element at `pos`. Requires `pos` not at the end.
    fn value(&self, pos: Self::Pos) -> ElementOf<Self>;

    /// Parity of `pos`: true when the boundary is an exclusive interval
    /// end. The end position reports false.
    fn is_endpoint(&self, pos: Self::Pos) -> bool;

    /// The position after `pos`. Requires `pos` not at the end.
    fn step(&self, pos: Self::Pos) -> Self::Pos;

    /// First boundary at or after `hint` that is `>= x`. Requires `hint` at
    /// or before the answer.
    fn lower_bound_from(&self, hint: Self::Pos, x: ElementOf<Self>) -> Self::Pos;

    /// First boundary at or after `hint` that is `> x`. Requires `hint` at
    /// or before the answer.
    fn upper_bound_from(&self, hint: Self::Pos, x: ElementOf<Self>) -> Self::Pos;

    /// First boundary `>= x`.
    fn lower_bound(&self, x: ElementOf<Self>) -> Self::Pos {
        self.lower_bound_from(self.first(), x)
    }

    /// First boundary `> x`.
    fn upper_bound(&self, x: ElementOf<Self>) -> Self::Pos {
        self.upper_bound_from(self.first(), x)
    }

    /// Number of boundaries when it is known in constant time. Containers
    /// report a count; views return `None` and predicates fall back to
    /// element comparison.
    fn boundary_count(&self) -> Option<usize> {
        None
    }

    /// The smallest element of the set, if any.
    fn front(&self) -> Option<ElementOf<Self>> {
        let first = self.first();
        if self.at_end(first) {
            None
        } else {
            Some(self.value(first))
        }
    }

    /// Iterate the boundary points in ascending order.
    fn boundaries(&self) -> Boundaries<'_, Self>
    where
        Self: Sized,
    {
        Boundaries {
            set: self,
            pos: self.first(),
        }
    }

    /// Iterate the set as disjoint, strictly ascending intervals.
    fn intervals(&self) -> Intervals<'_, Self>
    where
        Self: Sized,
    {
        Intervals {
            set: self,
            pos: self.first(),
        }
    }
}

impl<S: BoundarySet> BoundarySet for &S {
    type Pos = S::Pos;

    #[inline]
    fn first(&self) -> S::Pos {
        (**self).first()
    }

    #[inline]
    fn past_end(&self) -> S::Pos {
        (**self).past_end()
    }

    #[inline]
    fn at_end(&self, pos: S::Pos) -> bool {
        (**self).at_end(pos)
    }

    #[inline]
    fn value(&self, pos: S::Pos) -> ElementOf<S> {
        (**self).value(pos)
    }

    #[inline]
    fn is_endpoint(&self, pos: S::Pos) -> bool {
        (**self).is_endpoint(pos)
    }

    #[inline]
    fn step(&self, pos: S::Pos) -> S::Pos {
        (**self).step(pos)
    }

    #[inline]
    fn lower_bound_from(&self, hint: S::Pos, x: ElementOf<S>) -> S::Pos {
        (**self).lower_bound_from(hint, x)
    }

    #[inline]
    fn upper_bound_from(&self, hint: S::Pos, x: ElementOf<S>) -> S::Pos {
        (**self).upper_bound_from(hint, x)
    }

    #[inline]
    fn lower_bound(&self, x: ElementOf<S>) -> S::Pos {
        (**self).lower_bound(x)
    }

    #[inline]
    fn upper_bound(&self, x: ElementOf<S>) -> S::Pos {
        (**self).upper_bound(x)
    }

    #[inline]
    fn boundary_count(&self) -> Option<usize> {
        (**self).boundary_count()
    }

    #[inline]
    fn front(&self) -> Option<ElementOf<S>> {
        (**self).front()
    }
}

/// Iterator over the boundary points of a set.
pub struct Boundaries<'a, S: BoundarySet> {
    set: &'a S,
    pos: S::Pos,
}

impl<S: BoundarySet> Iterator for Boundaries<'_, S> {
    type Item = ElementOf<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set.at_end(self.pos) {
            return None;
        }
        let value = self.set.value(self.pos);
        self.pos = self.set.step(self.pos);
        Some(value)
    }
}

impl<S: BoundarySet> FusedIterator for Boundaries<'_, S> {}

/// Iterator over the intervals of a set.
pub struct Intervals<'a, S: BoundarySet> {
    set: &'a S,
    pos: S::Pos,
}

impl<S: BoundarySet> Iterator for Intervals<'_, S> {
    type Item = Interval<S::Traits>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set.at_end(self.pos) {
            return None;
        }
        debug_assert!(!self.set.is_endpoint(self.pos));
        let start = self.set.value(self.pos);
        let endpoint_pos = self.set.step(self.pos);
        debug_assert!(!self.set.at_end(endpoint_pos));
        debug_assert!(self.set.is_endpoint(endpoint_pos));
        let exclusive_end = self.set.value(endpoint_pos);
        self.pos = self.set.step(endpoint_pos);
        Some(Interval::new_unchecked(start, exclusive_end))
    }
}

impl<S: BoundarySet> FusedIterator for Intervals<'_, S> {}

/// The lazy union of two boundary sets.
///
/// Present here as the canonical example of view composition; see the
/// [`merge`](crate::merge) module for all three operations.
pub type UnionView<A, B> = MergeView<A, B, Union>;

/// Check the structural invariants of a boundary sequence: even length,
/// strict monotonicity, canonical (no touching intervals), and start
/// parity at the first point.
pub fn is_canonical<S: BoundarySet>(set: &S) -> bool {
    let mut pos = set.first();
    if set.at_end(pos) {
        return true;
    }
    if set.is_endpoint(pos) {
        return false;
    }
    let mut previous = set.value(pos);
    let mut previous_parity = set.is_endpoint(pos);
    pos = set.step(pos);
    while !set.at_end(pos) {
        let value = set.value(pos);
        let parity = set.is_endpoint(pos);
        if !<S::Traits as SetTraits>::lt(previous, value) {
            return false;
        }
        if parity == previous_parity {
            return false;
        }
        previous = value;
        previous_parity = parity;
        pos = set.step(pos);
    }
    // The walk must stop on an endpoint, so the length is even.
    previous_parity
}
