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

//! Set categories.
//!
//! A category is a compile-time tag naming the algorithm family that applies
//! to a set type: boundary sequences, interval sequences, or key-to-inner-set
//! maps. Two sets can be combined only when they share both category and
//! traits; binary operations state this as associated-type equality, so a
//! mismatch is a type error, never a runtime branch.

use crate::traits::SetTraits;

mod sealed {
    pub trait Sealed {}
}

/// Marker trait of the category tags. Sealed; exactly three categories
/// exist.
pub trait Category: sealed::Sealed + 'static {}

/// Category of sets represented as alternating-parity boundary sequences.
pub struct BoundaryCategory;

/// Category of sets represented as sequences of half-open intervals.
pub struct IntervalCategory;

/// Category of sets represented as ordered maps from key to inner set.
pub struct NestedCategory;

impl sealed::Sealed for BoundaryCategory {}
impl sealed::Sealed for IntervalCategory {}
impl sealed::Sealed for NestedCategory {}
impl Category for BoundaryCategory {}
impl Category for IntervalCategory {}
impl Category for NestedCategory {}

/// A set over an ordered domain.
///
/// Ties a set type to its trait bundle and category and gives predicates the
/// one query every category answers uniformly.
pub trait Set {
    /// The element trait bundle of the set.
    type Traits: SetTraits;

    /// The category tag selecting the algorithm family.
    type Category: Category;

    /// Return true if the set has no elements.
    fn is_empty_set(&self) -> bool;
}

impl<S: Set> Set for &S {
    type Traits = S::Traits;
    type Category = S::Category;

    #[inline]
    fn is_empty_set(&self) -> bool {
        (**self).is_empty_set()
    }
}

/// The element type of a set.
pub type ElementOf<S> = <<S as Set>::Traits as SetTraits>::Element;
