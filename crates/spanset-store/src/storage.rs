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

//! The storage contract.

use spanset_core::traits::SetTraits;
use std::fmt;

/// An ordered sequence of boundary points with parity-encoded start/end
/// flags.
///
/// A storage holds an even-length, strictly increasing sequence of elements.
/// A point at an even sequence position is an interval start, a point at an
/// odd position is an exclusive interval end; no flag is stored, the parity
/// is the flag. Positions (`Pos`) are cheap copyable cursors; a position
/// stays usable only as documented per mutation primitive, and mutators
/// return the position that follows the affected points so callers can keep
/// a valid cursor without re-searching.
///
/// # Contracts
///
/// Violations of the following are programming errors, checked with
/// `debug_assert!` only:
///
/// - `insert_pair(at, v1, v2)` requires `v1 < v2`, that the point before
///   `at` (if any) is `< v1`, and that the point at `at` (if any) is `> v2`.
/// - `erase_range(first, last)` requires `first` and `last` to delimit an
///   even number of points.
/// - `update_point(pos, v)` requires `v` to preserve strict monotonicity
///   with both neighbors.
/// - `lower_bound(hint, x)` and `upper_bound(hint, x)` require `hint` to be
///   at or before the answer; a backend may either exploit a valid hint or
///   ignore it, but an invalid hint must not produce a wrong answer.
pub trait BoundaryStorage<T: SetTraits>: Default {
    /// Cursor into the boundary sequence.
    type Pos: Copy + PartialEq + fmt::Debug;

    /// True if inserting at an arbitrary position is amortized logarithmic.
    /// When false, containers prefer materializing bulk results out of
    /// place.
    const HAS_FAST_INSERTION: bool;

    /// Number of boundary points. Always even.
    fn boundary_len(&self) -> usize;

    /// Return true if the sequence is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.boundary_len() == 0
    }

    /// Position of the first point, or [`end`](Self::end) when empty.
    fn begin(&self) -> Self::Pos;

    /// The past-the-end position.
    fn end(&self) -> Self::Pos;

    /// Return true if `pos` is the past-the-end position.
    fn is_end(&self, pos: Self::Pos) -> bool;

    /// The element at `pos`. Requires `pos != end`.
    fn value(&self, pos: Self::Pos) -> T::Element;

    /// Parity of `pos`: true for an exclusive interval end. The end
    /// position reports false.
    fn is_endpoint(&self, pos: Self::Pos) -> bool;

    /// The position after `pos`. Requires `pos != end`.
    fn next(&self, pos: Self::Pos) -> Self::Pos;

    /// The position before `pos`. Requires `pos != begin`.
    fn prev(&self, pos: Self::Pos) -> Self::Pos;

    /// Position of the first point at or after `hint` that is `>= x`.
    fn lower_bound(&self, hint: Self::Pos, x: T::Element) -> Self::Pos;

    /// Position of the first point at or after `hint` that is `> x`.
    fn upper_bound(&self, hint: Self::Pos, x: T::Element) -> Self::Pos;

    /// Insert the two consecutive points `v1`, `v2` before `at`. Returns the
    /// position following the inserted pair.
    fn insert_pair(&mut self, at: Self::Pos, v1: T::Element, v2: T::Element) -> Self::Pos;

    /// Erase the points in `[first, last)`. Returns the position following
    /// the erased range. Erasing an empty range is a no-op.
    fn erase_range(&mut self, first: Self::Pos, last: Self::Pos) -> Self::Pos;

    /// Overwrite the point at `pos` with `v`. Returns the position following
    /// the updated point.
    fn update_point(&mut self, pos: Self::Pos, v: T::Element) -> Self::Pos;

    /// Append the pair `v1`, `v2` after the last point. Requires the last
    /// point (if any) to be `< v1`.
    fn push_pair(&mut self, v1: T::Element, v2: T::Element);

    /// Remove and return the first pair of points.
    fn pop_front_pair(&mut self) -> Option<(T::Element, T::Element)>;

    /// Like [`insert_pair`](Self::insert_pair), but consume the first pair
    /// of `from` in exchange, so the combined point count of the two
    /// storages does not grow.
    fn steal_and_insert(
        &mut self,
        at: Self::Pos,
        v1: T::Element,
        v2: T::Element,
        from: &mut Self,
    ) -> Self::Pos;

    /// The first point, if any.
    fn front(&self) -> Option<T::Element>;

    /// The last point, if any.
    fn back(&self) -> Option<T::Element>;

    /// Remove all points.
    fn clear(&mut self);
}
