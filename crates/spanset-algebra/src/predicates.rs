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

//! Relational predicates over boundary sets.
//!
//! Subset and intersection tests do not walk boundary by boundary; they
//! leapfrog with alternating hinted `upper_bound` jumps, so comparing a
//! small set against a huge one costs a few logarithmic searches instead of
//! a linear scan. All predicates accept any pair of boundary sets over the
//! same traits, containers and views alike.

use crate::set::BoundarySet;
use spanset_core::interval::Interval;
use spanset_core::traits::SetTraits;

/// Return true if `x` is an element of `set`.
pub fn contains_element<S: BoundarySet>(set: &S, x: <S::Traits as SetTraits>::Element) -> bool {
    let pos = set.upper_bound(x);
    set.is_endpoint(pos)
}

/// Return true if every element of `interval` is in `set`, which holds
/// exactly when one stored interval covers it whole.
pub fn contains_interval<S: BoundarySet>(set: &S, interval: &Interval<S::Traits>) -> bool {
    let pos = set.upper_bound(interval.start());
    set.is_endpoint(pos) && <S::Traits as SetTraits>::le(interval.exclusive_end(), set.value(pos))
}

/// Return true if `set` has at least one element inside `interval`.
pub fn intersects_interval<S: BoundarySet>(set: &S, interval: &Interval<S::Traits>) -> bool {
    let pos = set.upper_bound(interval.start());
    if set.at_end(pos) {
        return false;
    }
    set.is_endpoint(pos) || <S::Traits as SetTraits>::lt(set.value(pos), interval.exclusive_end())
}

/// Return true if every element of `set` is in `interval`.
pub fn within_interval<S: BoundarySet>(set: &S, interval: &Interval<S::Traits>) -> bool {
    let Some(front) = set.front() else {
        return true;
    };
    if !<S::Traits as SetTraits>::le(interval.start(), front) {
        return false;
    }
    // Walk to the last boundary; views have no constant-time back.
    let mut pos = set.first();
    let mut last = front;
    while !set.at_end(pos) {
        last = set.value(pos);
        pos = set.step(pos);
    }
    <S::Traits as SetTraits>::ge(interval.exclusive_end(), last)
}

/// Return true if every element of `a` is an element of `b`.
pub fn is_subset<A, B>(a: &A, b: &B) -> bool
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    let mut pos_a = a.first();
    let mut pos_b = b.first();
    loop {
        if a.at_end(pos_a) {
            return true;
        }
        // The next interval of `a` starts here; that element must sit
        // inside an interval of `b`.
        pos_b = b.upper_bound_from(pos_b, a.value(pos_a));
        if b.at_end(pos_b) || !b.is_endpoint(pos_b) {
            return false;
        }
        // Jump past the covering interval of `b`. A boundary of `a` there
        // may only be a start; an endpoint would mean an interval of `a`
        // straddles the cover's end.
        pos_a = a.upper_bound_from(pos_a, b.value(pos_b));
        if a.at_end(pos_a) {
            return true;
        }
        if a.is_endpoint(pos_a) {
            return false;
        }
    }
}

/// Return true if `a` and `b` share at least one element.
pub fn is_intersecting<A, B>(a: &A, b: &B) -> bool
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    let mut pos_a = a.first();
    let mut pos_b = b.first();
    loop {
        if a.at_end(pos_a) {
            return false;
        }
        pos_b = b.upper_bound_from(pos_b, a.value(pos_a));
        if b.is_endpoint(pos_b) {
            return true;
        }
        if b.at_end(pos_b) {
            return false;
        }
        pos_a = a.upper_bound_from(pos_a, b.value(pos_b));
        if a.is_endpoint(pos_a) {
            return true;
        }
    }
}

/// Return true if `a` and `b` contain exactly the same elements.
pub fn is_equal<A, B>(a: &A, b: &B) -> bool
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    if let (Some(n1), Some(n2)) = (a.boundary_count(), b.boundary_count()) {
        if n1 != n2 {
            return false;
        }
    }
    let mut pos_a = a.first();
    let mut pos_b = b.first();
    loop {
        match (a.at_end(pos_a), b.at_end(pos_b)) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        if !<A::Traits as SetTraits>::eq(a.value(pos_a), b.value(pos_b)) {
            return false;
        }
        pos_a = a.step(pos_a);
        pos_b = b.step(pos_b);
    }
}

/// Return true if every element of `b` is an element of `a`.
#[inline]
pub fn is_superset<A, B>(a: &A, b: &B) -> bool
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    is_subset(b, a)
}

/// Return true if `a` and `b` share no element.
#[inline]
pub fn is_disjoint<A, B>(a: &A, b: &B) -> bool
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
{
    !is_intersecting(a, b)
}
