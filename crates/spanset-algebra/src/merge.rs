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

//! Lazy binary merge views.
//!
//! A [`MergeView`] exposes the union, intersection, or difference of two
//! boundary sets as another boundary set, without materializing anything. A
//! position into the view is a pair of source positions plus the order of
//! the elements under them; advancing skips runs of non-qualifying
//! boundaries with hinted `lower_bound` jumps on the lagging source, so a
//! full traversal costs `O((n1 + n2) * log)` and bound lookups on the view
//! stay logarithmic.
//!
//! Views borrow or own their sources through the generic parameters, so
//! they nest: the difference of a union and an intersection is just a type.

use crate::set::BoundarySet;
use spanset_core::category::{BoundaryCategory, ElementOf, Set};
use spanset_core::traits::SetTraits;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Union {}
    impl Sealed for super::Intersection {}
    impl Sealed for super::Difference {}
}

/// One of the three binary operations a [`MergeView`] can compute.
///
/// The three hooks answer, for a candidate source boundary, whether it is a
/// boundary of the result and with which parity. `order` is the comparison
/// of the two current source elements with the end position treated as
/// larger than everything: negative when the first source lags, positive
/// when the second does, zero on ties.
pub trait MergeOp: sealed::Sealed + 'static {
    /// Is a shared boundary (equal elements in both sources) a boundary of
    /// the result? `e1` and `e2` are the source parities.
    fn boundary_when_equal(e1: bool, e2: bool) -> bool;

    /// Is the lagging source's boundary a boundary of the result?
    /// `other_endpoint` is the parity of the position in the other source
    /// (false when that position is at the end), `order_positive` is true
    /// when the lagging source is the second one.
    fn boundary_when_distinct(other_endpoint: bool, order_positive: bool) -> bool;

    /// Parity of an emitted boundary. `e1`/`e2` are the source parities;
    /// the one on the leading side is meaningless and must be ignored.
    fn endpoint(order: i8, e1: bool, e2: bool) -> bool;
}

/// Marker for the union operation.
pub struct Union;

/// Marker for the intersection operation.
pub struct Intersection;

/// Marker for the difference operation (first minus second).
pub struct Difference;

impl MergeOp for Union {
    #[inline]
    fn boundary_when_equal(e1: bool, e2: bool) -> bool {
        e1 == e2
    }

    #[inline]
    fn boundary_when_distinct(other_endpoint: bool, _order_positive: bool) -> bool {
        // A boundary qualifies only outside the other set.
        !other_endpoint
    }

    #[inline]
    fn endpoint(order: i8, e1: bool, e2: bool) -> bool {
        if order <= 0 {
            e1
        } else {
            e2
        }
    }
}

impl MergeOp for Intersection {
    #[inline]
    fn boundary_when_equal(e1: bool, e2: bool) -> bool {
        e1 == e2
    }

    #[inline]
    fn boundary_when_distinct(other_endpoint: bool, _order_positive: bool) -> bool {
        // A boundary qualifies only inside the other set.
        other_endpoint
    }

    #[inline]
    fn endpoint(order: i8, e1: bool, e2: bool) -> bool {
        if order <= 0 {
            e1
        } else {
            e2
        }
    }
}

impl MergeOp for Difference {
    #[inline]
    fn boundary_when_equal(e1: bool, e2: bool) -> bool {
        e1 != e2
    }

    #[inline]
    fn boundary_when_distinct(other_endpoint: bool, order_positive: bool) -> bool {
        // A first-source boundary qualifies outside the second source; a
        // second-source boundary qualifies inside the first.
        other_endpoint == order_positive
    }

    #[inline]
    fn endpoint(order: i8, e1: bool, e2: bool) -> bool {
        if order <= 0 {
            e1
        } else {
            // A second-source start closes a result interval and vice
            // versa.
            !e2
        }
    }
}

/// Position into a [`MergeView`]: a cursor per source plus their order.
pub struct MergePos<P1: Copy, P2: Copy> {
    p1: P1,
    p2: P2,
    order: i8,
}

impl<P1: Copy, P2: Copy> Clone for MergePos<P1, P2> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P1: Copy, P2: Copy> Copy for MergePos<P1, P2> {}

impl<P1, P2> PartialEq for MergePos<P1, P2>
where
    P1: Copy + PartialEq,
    P2: Copy + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        // Two view positions over the same sources compare equal exactly
        // when their emitting cursor matches; the lagging cursor is an
        // implementation detail of the advance.
        if self.order <= 0 {
            self.p1 == other.p1
        } else {
            self.p2 == other.p2
        }
    }
}

impl<P1, P2> fmt::Debug for MergePos<P1, P2>
where
    P1: Copy + fmt::Debug,
    P2: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergePos")
            .field("p1", &self.p1)
            .field("p2", &self.p2)
            .field("order", &self.order)
            .finish()
    }
}

/// The lazy result of a binary operation over two boundary sets.
pub struct MergeView<A, B, Op>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
    Op: MergeOp,
{
    first: A,
    second: B,
    _op: PhantomData<Op>,
}

/// The lazy union of `a` and `b`.
pub fn union_of<A, B>(a: A, b: B) -> MergeView<A, B, Union>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    MergeView::new(a, b)
}

/// The lazy intersection of `a` and `b`.
pub fn intersection_of<A, B>(a: A, b: B) -> MergeView<A, B, Intersection>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    MergeView::new(a, b)
}

/// The lazy difference `a` minus `b`.
pub fn difference_of<A, B>(a: A, b: B) -> MergeView<A, B, Difference>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    MergeView::new(a, b)
}

impl<A, B, Op> MergeView<A, B, Op>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
    Op: MergeOp,
{
    /// Wrap the two sources. The sources are taken by value; pass
    /// references to borrow.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _op: PhantomData,
        }
    }

    /// The first source.
    #[inline]
    pub fn first_source(&self) -> &A {
        &self.first
    }

    /// The second source.
    #[inline]
    pub fn second_source(&self) -> &B {
        &self.second
    }

    fn compute_order(&self, p1: A::Pos, p2: B::Pos) -> i8 {
        match (self.first.at_end(p1), self.second.at_end(p2)) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => -1,
            (false, false) => {
                match <A::Traits as SetTraits>::cmp(self.first.value(p1), self.second.value(p2)) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                }
            }
        }
    }

    /// Advance `pos` to the next position whose boundary belongs to the
    /// result, or to the end. On entry the cursors may sit anywhere as long
    /// as the lagging one is not past the first boundary `>=` the leading
    /// element; both `first()` and bound lookups establish that.
    fn advance_to_boundary(&self, pos: &mut MergePos<A::Pos, B::Pos>) {
        pos.order = self.compute_order(pos.p1, pos.p2);
        loop {
            if pos.order == 0 {
                if self.first.at_end(pos.p1) {
                    // Both sources exhausted.
                    return;
                }
                let e1 = self.first.is_endpoint(pos.p1);
                let e2 = self.second.is_endpoint(pos.p2);
                if Op::boundary_when_equal(e1, e2) {
                    return;
                }
                pos.p1 = self.first.step(pos.p1);
                pos.p2 = self.second.step(pos.p2);
                pos.order = self.compute_order(pos.p1, pos.p2);
            } else if pos.order < 0 {
                let other_endpoint = self.second.is_endpoint(pos.p2);
                if Op::boundary_when_distinct(other_endpoint, false) {
                    return;
                }
                if self.second.at_end(pos.p2) {
                    // Nothing ahead can qualify.
                    pos.p1 = self.first.past_end();
                    pos.order = 0;
                    return;
                }
                pos.p1 = self
                    .first
                    .lower_bound_from(pos.p1, self.second.value(pos.p2));
                pos.order = self.compute_order(pos.p1, pos.p2);
            } else {
                let other_endpoint = self.first.is_endpoint(pos.p1);
                if Op::boundary_when_distinct(other_endpoint, true) {
                    return;
                }
                if self.first.at_end(pos.p1) {
                    pos.p2 = self.second.past_end();
                    pos.order = 0;
                    return;
                }
                pos.p2 = self
                    .second
                    .lower_bound_from(pos.p2, self.first.value(pos.p1));
                pos.order = self.compute_order(pos.p1, pos.p2);
            }
        }
    }

    fn position_from(&self, p1: A::Pos, p2: B::Pos) -> MergePos<A::Pos, B::Pos> {
        let mut pos = MergePos { p1, p2, order: 0 };
        self.advance_to_boundary(&mut pos);
        pos
    }
}

impl<A, B, Op> Set for MergeView<A, B, Op>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
    Op: MergeOp,
{
    type Traits = A::Traits;
    type Category = BoundaryCategory;

    fn is_empty_set(&self) -> bool {
        let first = self.first();
        self.at_end(first)
    }
}

impl<A, B, Op> BoundarySet for MergeView<A, B, Op>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
    Op: MergeOp,
{
    type Pos = MergePos<A::Pos, B::Pos>;

    fn first(&self) -> Self::Pos {
        self.position_from(self.first.first(), self.second.first())
    }

    fn past_end(&self) -> Self::Pos {
        MergePos {
            p1: self.first.past_end(),
            p2: self.second.past_end(),
            order: 0,
        }
    }

    #[inline]
    fn at_end(&self, pos: Self::Pos) -> bool {
        self.first.at_end(pos.p1) && self.second.at_end(pos.p2)
    }

    fn value(&self, pos: Self::Pos) -> ElementOf<Self> {
        if pos.order <= 0 {
            self.first.value(pos.p1)
        } else {
            self.second.value(pos.p2)
        }
    }

    fn is_endpoint(&self, pos: Self::Pos) -> bool {
        if self.at_end(pos) {
            return false;
        }
        let e1 = self.first.is_endpoint(pos.p1);
        let e2 = self.second.is_endpoint(pos.p2);
        Op::endpoint(pos.order, e1, e2)
    }

    fn step(&self, pos: Self::Pos) -> Self::Pos {
        debug_assert!(!self.at_end(pos));
        let mut next = pos;
        if next.order <= 0 {
            next.p1 = self.first.step(next.p1);
        }
        if next.order >= 0 {
            next.p2 = self.second.step(next.p2);
        }
        self.advance_to_boundary(&mut next);
        next
    }

    fn lower_bound_from(&self, hint: Self::Pos, x: ElementOf<Self>) -> Self::Pos {
        self.position_from(
            self.first.lower_bound_from(hint.p1, x),
            self.second.lower_bound_from(hint.p2, x),
        )
    }

    fn upper_bound_from(&self, hint: Self::Pos, x: ElementOf<Self>) -> Self::Pos {
        self.position_from(
            self.first.upper_bound_from(hint.p1, x),
            self.second.upper_bound_from(hint.p2, x),
        )
    }

    fn lower_bound(&self, x: ElementOf<Self>) -> Self::Pos {
        self.position_from(self.first.lower_bound(x), self.second.lower_bound(x))
    }

    fn upper_bound(&self, x: ElementOf<Self>) -> Self::Pos {
        self.position_from(self.first.upper_bound(x), self.second.upper_bound(x))
    }
}

impl<A, B, Op> fmt::Debug for MergeView<A, B, Op>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
    Op: MergeOp,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.intervals().map(|iv| (iv.start(), iv.exclusive_end())))
            .finish()
    }
}
