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

//! Constant boundary sets: the empty set and the full domain.
//!
//! Both are zero-sized and answer every query in constant time. The full
//! set is the identity operand that turns a difference view into a
//! complement.

use crate::set::BoundarySet;
use spanset_core::category::{BoundaryCategory, ElementOf, Set};
use spanset_core::traits::{BoundedTraits, SetTraits};
use std::marker::PhantomData;

/// The set with no elements.
pub struct EmptySet<T: SetTraits> {
    _traits: PhantomData<T>,
}

impl<T: SetTraits> EmptySet<T> {
    pub const fn new() -> Self {
        Self {
            _traits: PhantomData,
        }
    }
}

impl<T: SetTraits> Default for EmptySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SetTraits> Set for EmptySet<T> {
    type Traits = T;
    type Category = BoundaryCategory;

    #[inline]
    fn is_empty_set(&self) -> bool {
        true
    }
}

impl<T: SetTraits> BoundarySet for EmptySet<T> {
    type Pos = u8;

    #[inline]
    fn first(&self) -> u8 {
        0
    }

    #[inline]
    fn past_end(&self) -> u8 {
        0
    }

    #[inline]
    fn at_end(&self, _pos: u8) -> bool {
        true
    }

    fn value(&self, _pos: u8) -> ElementOf<Self> {
        unreachable!("the empty set has no boundaries")
    }

    #[inline]
    fn is_endpoint(&self, _pos: u8) -> bool {
        false
    }

    fn step(&self, _pos: u8) -> u8 {
        unreachable!("the empty set has no boundaries")
    }

    #[inline]
    fn lower_bound_from(&self, _hint: u8, _x: ElementOf<Self>) -> u8 {
        0
    }

    #[inline]
    fn upper_bound_from(&self, _hint: u8, _x: ElementOf<Self>) -> u8 {
        0
    }

    #[inline]
    fn boundary_count(&self) -> Option<usize> {
        Some(0)
    }
}

/// The set containing every element of the domain, `[min, max_exclusive)`.
pub struct FullSet<T: BoundedTraits> {
    _traits: PhantomData<T>,
}

impl<T: BoundedTraits> FullSet<T> {
    pub const fn new() -> Self {
        Self {
            _traits: PhantomData,
        }
    }
}

impl<T: BoundedTraits> Default for FullSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Positions: 0 = the domain start, 1 = the domain fence, 2 = past the end.
impl<T: BoundedTraits> Set for FullSet<T> {
    type Traits = T;
    type Category = BoundaryCategory;

    #[inline]
    fn is_empty_set(&self) -> bool {
        false
    }
}

impl<T: BoundedTraits> BoundarySet for FullSet<T> {
    type Pos = u8;

    #[inline]
    fn first(&self) -> u8 {
        0
    }

    #[inline]
    fn past_end(&self) -> u8 {
        2
    }

    #[inline]
    fn at_end(&self, pos: u8) -> bool {
        pos == 2
    }

    fn value(&self, pos: u8) -> ElementOf<Self> {
        match pos {
            0 => T::min_value(),
            1 => T::max_exclusive(),
            _ => unreachable!("position out of range"),
        }
    }

    #[inline]
    fn is_endpoint(&self, pos: u8) -> bool {
        pos == 1
    }

    fn step(&self, pos: u8) -> u8 {
        debug_assert!(pos < 2);
        pos + 1
    }

    fn lower_bound_from(&self, _hint: u8, x: ElementOf<Self>) -> u8 {
        if T::le(x, T::min_value()) {
            0
        } else if T::le(x, T::max_exclusive()) {
            1
        } else {
            2
        }
    }

    fn upper_bound_from(&self, _hint: u8, x: ElementOf<Self>) -> u8 {
        if T::lt(x, T::min_value()) {
            0
        } else if T::lt(x, T::max_exclusive()) {
            1
        } else {
            2
        }
    }

    #[inline]
    fn boundary_count(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::is_canonical;
    use spanset_core::traits::PrimTraits;

    type T = PrimTraits<u8>;

    #[test]
    fn empty_set_has_no_boundaries() {
        let set = EmptySet::<T>::new();
        assert!(set.is_empty_set());
        assert!(is_canonical(&set));
        assert_eq!(set.boundaries().count(), 0);
    }

    #[test]
    fn full_set_spans_the_domain() {
        let set = FullSet::<T>::new();
        assert!(!set.is_empty_set());
        assert!(is_canonical(&set));
        let intervals: Vec<_> = set.intervals().collect();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start(), 0);
        assert_eq!(intervals[0].exclusive_end(), u8::MAX);
    }

    #[test]
    fn full_set_bounds() {
        let set = FullSet::<T>::new();
        assert_eq!(set.lower_bound(0), 0);
        assert_eq!(set.upper_bound(0), 1);
        assert_eq!(set.lower_bound(u8::MAX), 1);
        assert_eq!(set.upper_bound(u8::MAX), 2);
    }
}
