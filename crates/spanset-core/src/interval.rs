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

use crate::error::IntervalError;
use crate::traits::{BoundedTraits, MetricTraits, SetTraits};
use std::cmp::Ordering;
use std::fmt;

/// A non-empty half-open interval `[start, exclusive_end)` under the order
/// of a trait bundle `T`.
///
/// The invariant `start < exclusive_end` is established at construction and
/// holds for the lifetime of the value, so an `Interval` is never empty.
///
/// # Examples
///
/// ```
/// # use spanset_core::interval::Interval;
/// # use spanset_core::traits::PrimTraits;
/// let iv = Interval::<PrimTraits<u64>>::new(10, 20);
/// assert!(iv.contains_point(10));
/// assert!(!iv.contains_point(20));
/// assert_eq!(iv.to_string(), "[10, 20)");
/// ```
pub struct Interval<T: SetTraits> {
    start: T::Element,
    exclusive_end: T::Element,
}

impl<T: SetTraits> Interval<T> {
    /// Create a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `start >= exclusive_end` under the trait order.
    #[inline]
    pub fn new(start: T::Element, exclusive_end: T::Element) -> Self {
        assert!(T::lt(start, exclusive_end));
        Self {
            start,
            exclusive_end,
        }
    }

    /// Create a new interval, or report why the pair is not one.
    #[inline]
    pub fn try_new(start: T::Element, exclusive_end: T::Element) -> Result<Self, IntervalError> {
        if T::ge(start, exclusive_end) {
            return Err(IntervalError::Empty);
        }
        Ok(Self {
            start,
            exclusive_end,
        })
    }

    /// Create a new interval without checking the invariant.
    ///
    /// The caller must guarantee `start < exclusive_end`; the invariant is
    /// only `debug_assert!`ed.
    #[inline]
    pub fn new_unchecked(start: T::Element, exclusive_end: T::Element) -> Self {
        debug_assert!(T::lt(start, exclusive_end));
        Self {
            start,
            exclusive_end,
        }
    }

    /// The inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T::Element {
        self.start
    }

    /// The exclusive end of the interval.
    #[inline]
    pub fn exclusive_end(&self) -> T::Element {
        self.exclusive_end
    }

    /// Return true if `x` lies inside the interval.
    #[inline]
    pub fn contains_point(&self, x: T::Element) -> bool {
        T::le(self.start, x) && T::lt(x, self.exclusive_end)
    }

    /// Return true if every element of `other` lies inside this interval.
    #[inline]
    pub fn contains_interval(&self, other: &Self) -> bool {
        T::le(self.start, other.start) && T::ge(self.exclusive_end, other.exclusive_end)
    }

    /// Return true if the two intervals share at least one element.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        T::lt(self.start, other.exclusive_end) && T::lt(other.start, self.exclusive_end)
    }

    /// Return true if the intervals are disjoint but share a boundary, so
    /// their union is a single interval.
    #[inline]
    pub fn adjacent(&self, other: &Self) -> bool {
        T::eq(self.exclusive_end, other.start) || T::eq(other.exclusive_end, self.start)
    }

    /// Return true if the union of the two intervals is a single interval.
    #[inline]
    pub fn intersects_or_adjacent(&self, other: &Self) -> bool {
        T::le(self.start, other.exclusive_end) && T::le(other.start, self.exclusive_end)
    }

    /// Merge with another interval when the result is a single interval.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        if !self.intersects_or_adjacent(other) {
            return None;
        }
        let start = if T::le(self.start, other.start) {
            self.start
        } else {
            other.start
        };
        let exclusive_end = if T::ge(self.exclusive_end, other.exclusive_end) {
            self.exclusive_end
        } else {
            other.exclusive_end
        };
        Some(Self::new_unchecked(start, exclusive_end))
    }
}

impl<T: BoundedTraits> Interval<T> {
    /// Create a new interval, also checking that both boundaries lie within
    /// the bounded domain.
    pub fn try_new_in_range(
        start: T::Element,
        exclusive_end: T::Element,
    ) -> Result<Self, IntervalError> {
        if T::lt(start, T::min_value()) || T::gt(exclusive_end, T::max_exclusive()) {
            return Err(IntervalError::OutOfRange);
        }
        Self::try_new(start, exclusive_end)
    }
}

impl<T: MetricTraits> Interval<T> {
    /// The number of elements in the interval, as the trait difference type.
    #[inline]
    pub fn length(&self) -> T::Difference {
        T::length(self.start, self.exclusive_end)
    }
}

impl<T: SetTraits> Clone for Interval<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SetTraits> Copy for Interval<T> {}

impl<T: SetTraits> PartialEq for Interval<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        T::eq(self.start, other.start) && T::eq(self.exclusive_end, other.exclusive_end)
    }
}

impl<T: SetTraits> Eq for Interval<T> {}

impl<T: SetTraits> PartialOrd for Interval<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: SetTraits> Ord for Interval<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        T::cmp(self.start, other.start)
            .then_with(|| T::cmp(self.exclusive_end, other.exclusive_end))
    }
}

impl<T: SetTraits> fmt::Debug for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?})", self.start, self.exclusive_end)
    }
}

impl<T: SetTraits> fmt::Display for Interval<T>
where
    T::Element: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.exclusive_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PrimTraits;

    type Iv = Interval<PrimTraits<u64>>;

    #[test]
    fn try_new_rejects_empty_and_reversed() {
        assert_eq!(Iv::try_new(5, 5).unwrap_err(), IntervalError::Empty);
        assert_eq!(Iv::try_new(6, 5).unwrap_err(), IntervalError::Empty);
        assert!(Iv::try_new(5, 6).is_ok());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_empty() {
        let _ = Iv::new(5, 5);
    }

    #[test]
    fn try_new_in_range_accepts_the_full_domain() {
        // The fence is a legal exclusive end; [min, fence) is the full set.
        assert!(Iv::try_new_in_range(0, u64::MAX).is_ok());
        assert!(Iv::try_new_in_range(0, u64::MAX - 1).is_ok());
    }

    #[test]
    fn try_new_in_range_rejects_boundaries_outside_a_narrowed_domain() {
        struct Capped;

        impl crate::traits::SetTraits for Capped {
            type Element = u64;

            fn cmp(a: u64, b: u64) -> std::cmp::Ordering {
                a.cmp(&b)
            }
        }

        impl BoundedTraits for Capped {
            fn min_value() -> u64 {
                10
            }

            fn max_exclusive() -> u64 {
                100
            }
        }

        assert!(Interval::<Capped>::try_new_in_range(10, 100).is_ok());
        assert_eq!(
            Interval::<Capped>::try_new_in_range(9, 50).unwrap_err(),
            IntervalError::OutOfRange
        );
        assert_eq!(
            Interval::<Capped>::try_new_in_range(10, 101).unwrap_err(),
            IntervalError::OutOfRange
        );
    }

    #[test]
    fn containment_is_half_open() {
        let iv = Iv::new(10, 20);
        assert!(iv.contains_point(10));
        assert!(iv.contains_point(19));
        assert!(!iv.contains_point(20));
        assert!(!iv.contains_point(9));
        assert!(iv.contains_interval(&Iv::new(10, 20)));
        assert!(iv.contains_interval(&Iv::new(12, 15)));
        assert!(!iv.contains_interval(&Iv::new(12, 21)));
    }

    #[test]
    fn intersection_and_adjacency() {
        let a = Iv::new(10, 20);
        let b = Iv::new(20, 30);
        let c = Iv::new(15, 25);
        let d = Iv::new(40, 50);
        assert!(!a.intersects(&b));
        assert!(a.adjacent(&b));
        assert!(a.intersects_or_adjacent(&b));
        assert!(a.intersects(&c));
        assert!(!a.adjacent(&c));
        assert!(!a.intersects_or_adjacent(&d));
    }

    #[test]
    fn merge_covers_both_or_fails() {
        let a = Iv::new(10, 20);
        assert_eq!(a.merge(&Iv::new(15, 30)), Some(Iv::new(10, 30)));
        assert_eq!(a.merge(&Iv::new(20, 30)), Some(Iv::new(10, 30)));
        assert_eq!(a.merge(&Iv::new(30, 40)), None);
    }

    #[test]
    fn length_counts_elements() {
        assert_eq!(Iv::new(10, 20).length(), 10);
        assert_eq!(Iv::new(0, u64::MAX).length(), u128::from(u64::MAX));
    }

    #[test]
    fn ordering_is_lexicographic_on_boundaries() {
        let mut intervals = vec![Iv::new(5, 9), Iv::new(1, 4), Iv::new(1, 3)];
        intervals.sort();
        assert_eq!(
            intervals,
            vec![Iv::new(1, 3), Iv::new(1, 4), Iv::new(5, 9)]
        );
    }
}
