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

//! Element trait bundles.
//!
//! A trait bundle describes an ordered element domain at the type level:
//! [`SetTraits`] supplies the total order, and the refinements add bounds
//! ([`BoundedTraits`]), successor/predecessor ([`DiscreteTraits`]), and a
//! difference type with group-action arithmetic ([`MetricTraits`]). The
//! capabilities compose; a bundle implements only what its domain supports.
//!
//! Bundles are values-at-types: zero-sized, never instantiated, all
//! operations static. Two set types can be combined only when they share a
//! bundle, which the algebra layer enforces through associated-type equality.

use num_traits::PrimInt;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Total order over an element domain.
///
/// `cmp` must be a total order; the comparison helpers have default
/// implementations in terms of it and exist so call sites read like the
/// predicate they state.
pub trait SetTraits: 'static {
    /// The element type of the domain.
    type Element: Copy + fmt::Debug;

    /// Three-way comparison defining the order of the domain.
    fn cmp(a: Self::Element, b: Self::Element) -> Ordering;

    /// Return true if `a < b` under the domain order.
    #[inline]
    fn lt(a: Self::Element, b: Self::Element) -> bool {
        Self::cmp(a, b) == Ordering::Less
    }

    /// Return true if `a <= b` under the domain order.
    #[inline]
    fn le(a: Self::Element, b: Self::Element) -> bool {
        Self::cmp(a, b) != Ordering::Greater
    }

    /// Return true if `a > b` under the domain order.
    #[inline]
    fn gt(a: Self::Element, b: Self::Element) -> bool {
        Self::cmp(a, b) == Ordering::Greater
    }

    /// Return true if `a >= b` under the domain order.
    #[inline]
    fn ge(a: Self::Element, b: Self::Element) -> bool {
        Self::cmp(a, b) != Ordering::Less
    }

    /// Return true if `a == b` under the domain order.
    #[inline]
    fn eq(a: Self::Element, b: Self::Element) -> bool {
        Self::cmp(a, b) == Ordering::Equal
    }
}

/// An element domain with a smallest value and an exclusive upper fence.
///
/// `in_range(x)` holds exactly when `min_value() <= x < max_exclusive()`.
/// The fence value itself is representable but never a member of any set; it
/// serves as the exclusive end of the rightmost possible interval.
pub trait BoundedTraits: SetTraits {
    /// The smallest element of the domain.
    fn min_value() -> Self::Element;

    /// The exclusive upper fence of the domain.
    fn max_exclusive() -> Self::Element;

    /// Return true if `x` is a member of the domain.
    #[inline]
    fn in_range(x: Self::Element) -> bool {
        Self::ge(x, Self::min_value()) && Self::lt(x, Self::max_exclusive())
    }
}

/// An element domain with a successor and predecessor.
///
/// `next(prev(x)) == x` for every representable `x` with a predecessor.
pub trait DiscreteTraits: SetTraits {
    /// The successor of `x`. Requires that `x` has one.
    fn next(x: Self::Element) -> Self::Element;

    /// The predecessor of `x`. Requires that `x` has one.
    fn prev(x: Self::Element) -> Self::Element;
}

/// An element domain with a difference type.
///
/// `length`, `advance`, and `combine` must form a consistent group action:
/// `advance(a, length(a, b)) == b` and `combine` is associative with
/// [`MetricTraits::zero`] as identity. Volume arithmetic relies on this.
pub trait MetricTraits: SetTraits {
    /// Type of the difference between two elements, and of accumulated
    /// volumes.
    type Difference: Copy + PartialEq + fmt::Debug;

    /// The distance from `start` to `exclusive_end`. Requires
    /// `start <= exclusive_end`.
    fn length(start: Self::Element, exclusive_end: Self::Element) -> Self::Difference;

    /// The element `d` steps after `x`, saturating at the top of the domain.
    fn advance(x: Self::Element, d: Self::Difference) -> Self::Element;

    /// The sum of two differences.
    fn combine(a: Self::Difference, b: Self::Difference) -> Self::Difference;

    /// The zero difference.
    fn zero() -> Self::Difference;

    /// Approximate a difference as `f64`.
    fn to_f64(d: Self::Difference) -> f64;

    /// The signed value `a - b` as `f64`.
    ///
    /// Exact whenever `|a - b|` is small enough for `f64`, even when `a` and
    /// `b` themselves are far beyond the exact `f64` range.
    fn delta_f64(a: Self::Difference, b: Self::Difference) -> f64;
}

/// Trait bundle for primitive integers.
///
/// The domain is `[E::min_value(), E::max_value())`: the largest
/// representable value is the exclusive fence. Differences are accumulated
/// in `u128`, so volumes of any number of 64-bit-wide intervals stay exact.
///
/// # Examples
///
/// ```
/// # use spanset_core::traits::{DiscreteTraits, MetricTraits, PrimTraits, SetTraits};
/// type T = PrimTraits<u64>;
/// assert!(T::lt(3, 5));
/// assert_eq!(T::next(7), 8);
/// assert_eq!(T::length(3, 8), 5);
/// ```
pub struct PrimTraits<E> {
    _marker: PhantomData<E>,
}

impl<E> SetTraits for PrimTraits<E>
where
    E: PrimInt + fmt::Debug + 'static,
{
    type Element = E;

    #[inline]
    fn cmp(a: E, b: E) -> Ordering {
        a.cmp(&b)
    }
}

impl<E> BoundedTraits for PrimTraits<E>
where
    E: PrimInt + fmt::Debug + 'static,
{
    #[inline]
    fn min_value() -> E {
        E::min_value()
    }

    #[inline]
    fn max_exclusive() -> E {
        E::max_value()
    }
}

impl<E> DiscreteTraits for PrimTraits<E>
where
    E: PrimInt + fmt::Debug + 'static,
{
    #[inline]
    fn next(x: E) -> E {
        debug_assert!(x < E::max_value());
        x + E::one()
    }

    #[inline]
    fn prev(x: E) -> E {
        debug_assert!(x > E::min_value());
        x - E::one()
    }
}

impl<E> MetricTraits for PrimTraits<E>
where
    E: PrimInt + Into<i128> + fmt::Debug + 'static,
{
    type Difference = u128;

    #[inline]
    fn length(start: E, exclusive_end: E) -> u128 {
        let (start, exclusive_end): (i128, i128) = (start.into(), exclusive_end.into());
        debug_assert!(start <= exclusive_end);
        (exclusive_end - start) as u128
    }

    #[inline]
    fn advance(x: E, d: u128) -> E {
        let wide: i128 = x.into();
        let target = wide.saturating_add(i128::try_from(d).unwrap_or(i128::MAX));
        num_traits::cast(target).unwrap_or_else(E::max_value)
    }

    #[inline]
    fn combine(a: u128, b: u128) -> u128 {
        a + b
    }

    #[inline]
    fn zero() -> u128 {
        0
    }

    #[inline]
    fn to_f64(d: u128) -> f64 {
        d as f64
    }

    #[inline]
    fn delta_f64(a: u128, b: u128) -> f64 {
        if a >= b {
            (a - b) as f64
        } else {
            -((b - a) as f64)
        }
    }
}

/// Ordering-only trait bundle for `char`, useful as a nested-set key domain.
pub struct CharTraits;

impl SetTraits for CharTraits {
    type Element = char;

    #[inline]
    fn cmp(a: char, b: char) -> Ordering {
        a.cmp(&b)
    }
}

/// Adaptor giving an element the `Ord` of its trait bundle.
///
/// Ordered std collections compare keys through `Ord`; wrapping elements in
/// `ByTraits` makes those collections use the bundle's order instead of the
/// element's intrinsic one, so a single order governs the whole engine.
pub struct ByTraits<T: SetTraits>(pub T::Element);

impl<T: SetTraits> Clone for ByTraits<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SetTraits> Copy for ByTraits<T> {}

impl<T: SetTraits> PartialEq for ByTraits<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        T::eq(self.0, other.0)
    }
}

impl<T: SetTraits> Eq for ByTraits<T> {}

impl<T: SetTraits> PartialOrd for ByTraits<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: SetTraits> Ord for ByTraits<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        T::cmp(self.0, other.0)
    }
}

impl<T: SetTraits> fmt::Debug for ByTraits<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
