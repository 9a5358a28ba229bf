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

//! Sorted-vector storage backend.
//!
//! Boundary points live contiguously in ascending order; a position is an
//! index and the parity flag is literally the index parity. Lookups are
//! binary searches over the tail slice starting at the hint; insertion and
//! erasure shift the tail, so this backend reports
//! `HAS_FAST_INSERTION = false` and containers route bulk operations through
//! the out-of-place path when that is cheaper.

use crate::storage::BoundaryStorage;
use spanset_core::traits::SetTraits;
use std::fmt;

/// Boundary storage backed by a sorted `Vec`.
pub struct VecStorage<T: SetTraits> {
    points: Vec<T::Element>,
}

impl<T: SetTraits> Default for VecStorage<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: SetTraits> VecStorage<T> {
    /// First index at or after `hint` whose point satisfies `!below(point)`,
    /// where `below` is monotone over the sorted points. Falls back to a
    /// full search when the hint is detected invalid (the point before the
    /// hint already fails `below`).
    fn bound_from(&self, hint: usize, below: impl Fn(T::Element) -> bool) -> usize {
        let hint = if hint > self.points.len() || (hint > 0 && !below(self.points[hint - 1])) {
            0
        } else {
            hint
        };
        hint + self.points[hint..].partition_point(|&p| below(p))
    }
}

impl<T: SetTraits> BoundaryStorage<T> for VecStorage<T> {
    type Pos = usize;

    const HAS_FAST_INSERTION: bool = false;

    #[inline]
    fn boundary_len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn begin(&self) -> usize {
        0
    }

    #[inline]
    fn end(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn is_end(&self, pos: usize) -> bool {
        pos == self.points.len()
    }

    #[inline]
    fn value(&self, pos: usize) -> T::Element {
        self.points[pos]
    }

    #[inline]
    fn is_endpoint(&self, pos: usize) -> bool {
        pos < self.points.len() && pos % 2 == 1
    }

    #[inline]
    fn next(&self, pos: usize) -> usize {
        debug_assert!(pos < self.points.len());
        pos + 1
    }

    #[inline]
    fn prev(&self, pos: usize) -> usize {
        debug_assert!(pos > 0);
        pos - 1
    }

    fn lower_bound(&self, hint: usize, x: T::Element) -> usize {
        self.bound_from(hint, |p| T::lt(p, x))
    }

    fn upper_bound(&self, hint: usize, x: T::Element) -> usize {
        self.bound_from(hint, |p| T::le(p, x))
    }

    fn insert_pair(&mut self, at: usize, v1: T::Element, v2: T::Element) -> usize {
        debug_assert!(T::lt(v1, v2));
        debug_assert!(at == 0 || T::lt(self.points[at - 1], v1));
        debug_assert!(at == self.points.len() || T::gt(self.points[at], v2));
        self.points.splice(at..at, [v1, v2]);
        at + 2
    }

    fn erase_range(&mut self, first: usize, last: usize) -> usize {
        debug_assert!((last - first) % 2 == 0);
        self.points.drain(first..last);
        first
    }

    fn update_point(&mut self, pos: usize, v: T::Element) -> usize {
        debug_assert!(pos == 0 || T::lt(self.points[pos - 1], v));
        debug_assert!(pos + 1 == self.points.len() || T::gt(self.points[pos + 1], v));
        self.points[pos] = v;
        pos + 1
    }

    fn push_pair(&mut self, v1: T::Element, v2: T::Element) {
        debug_assert!(T::lt(v1, v2));
        debug_assert!(self.points.last().map_or(true, |&b| T::lt(b, v1)));
        self.points.push(v1);
        self.points.push(v2);
    }

    fn pop_front_pair(&mut self) -> Option<(T::Element, T::Element)> {
        if self.points.len() < 2 {
            return None;
        }
        let (v1, v2) = (self.points[0], self.points[1]);
        self.points.drain(0..2);
        Some((v1, v2))
    }

    fn steal_and_insert(
        &mut self,
        at: usize,
        v1: T::Element,
        v2: T::Element,
        from: &mut Self,
    ) -> usize {
        // A contiguous backend has no nodes to reuse; stealing degrades to
        // consuming the donor pair and allocating here.
        let _ = from.pop_front_pair();
        self.insert_pair(at, v1, v2)
    }

    fn front(&self) -> Option<T::Element> {
        self.points.first().copied()
    }

    fn back(&self) -> Option<T::Element> {
        self.points.last().copied()
    }

    fn clear(&mut self) {
        self.points.clear();
    }
}

impl<T: SetTraits> fmt::Debug for VecStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.points.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanset_core::traits::PrimTraits;

    type T = PrimTraits<u64>;
    type S = VecStorage<T>;

    fn filled() -> S {
        let mut s = S::default();
        s.push_pair(10, 20);
        s.push_pair(30, 40);
        s
    }

    #[test]
    fn parity_is_index_parity() {
        let s = filled();
        assert!(!s.is_endpoint(0));
        assert!(s.is_endpoint(1));
        assert!(!s.is_endpoint(2));
        assert!(s.is_endpoint(3));
        assert!(!s.is_endpoint(s.end()));
    }

    #[test]
    fn bounds_from_valid_hint() {
        let s = filled();
        assert_eq!(s.lower_bound(0, 20), 1);
        assert_eq!(s.upper_bound(0, 20), 2);
        assert_eq!(s.lower_bound(2, 35), 3);
        assert_eq!(s.upper_bound(0, 40), 4);
        assert_eq!(s.lower_bound(0, 5), 0);
    }

    #[test]
    fn invalid_hint_falls_back_to_full_search() {
        let s = filled();
        // Hint beyond the answer: the point before the hint is >= x.
        assert_eq!(s.lower_bound(3, 15), 1);
        assert_eq!(s.upper_bound(4, 10), 1);
    }

    #[test]
    fn insert_erase_update_keep_order() {
        let mut s = filled();
        assert_eq!(s.insert_pair(2, 22, 25), 4);
        assert_eq!(s.boundary_len(), 6);
        assert_eq!(s.erase_range(2, 4), 2);
        assert_eq!(s.update_point(1, 21), 2);
        assert_eq!(s.front(), Some(10));
        assert_eq!(s.back(), Some(40));
        assert_eq!(s.value(1), 21);
    }

    #[test]
    fn pop_front_pair_shifts() {
        let mut s = filled();
        assert_eq!(s.pop_front_pair(), Some((10, 20)));
        assert_eq!(s.pop_front_pair(), Some((30, 40)));
        assert_eq!(s.pop_front_pair(), None);
    }
}
