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

//! Lazy complement view.
//!
//! The complement of a set over a bounded domain is the difference between
//! the full domain and the set. The view keeps the borrowed source
//! reachable, so complementing twice folds back to the original set by
//! reference instead of stacking a second view.

use crate::constant::FullSet;
use crate::merge::{difference_of, Difference, MergePos, MergeView};
use crate::set::BoundarySet;
use spanset_core::category::{BoundaryCategory, ElementOf, Set};
use spanset_core::traits::BoundedTraits;
use std::fmt;

/// The lazy complement of a borrowed boundary set.
pub struct ComplementView<'a, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits,
{
    source: &'a S,
    view: MergeView<FullSet<S::Traits>, &'a S, Difference>,
}

/// The lazy complement of `source` over its bounded domain.
pub fn complement<S>(source: &S) -> ComplementView<'_, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits,
{
    ComplementView {
        source,
        view: difference_of(FullSet::new(), source),
    }
}

impl<'a, S> ComplementView<'a, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits,
{
    /// The set this view complements.
    #[inline]
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// The complement of this view. This is the source itself; no second
    /// view is built.
    #[inline]
    pub fn complement(&self) -> &'a S {
        self.source
    }

    /// Return true if the view covers the whole domain, that is, the source
    /// is empty.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.source.is_empty_set()
    }
}

impl<S> Set for ComplementView<'_, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits,
{
    type Traits = S::Traits;
    type Category = BoundaryCategory;

    fn is_empty_set(&self) -> bool {
        self.view.is_empty_set()
    }
}

impl<'a, S> BoundarySet for ComplementView<'a, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits,
{
    type Pos = MergePos<u8, <&'a S as BoundarySet>::Pos>;

    #[inline]
    fn first(&self) -> Self::Pos {
        self.view.first()
    }

    #[inline]
    fn past_end(&self) -> Self::Pos {
        self.view.past_end()
    }

    #[inline]
    fn at_end(&self, pos: Self::Pos) -> bool {
        self.view.at_end(pos)
    }

    #[inline]
    fn value(&self, pos: Self::Pos) -> ElementOf<Self> {
        self.view.value(pos)
    }

    #[inline]
    fn is_endpoint(&self, pos: Self::Pos) -> bool {
        self.view.is_endpoint(pos)
    }

    #[inline]
    fn step(&self, pos: Self::Pos) -> Self::Pos {
        self.view.step(pos)
    }

    #[inline]
    fn lower_bound_from(&self, hint: Self::Pos, x: ElementOf<Self>) -> Self::Pos {
        self.view.lower_bound_from(hint, x)
    }

    #[inline]
    fn upper_bound_from(&self, hint: Self::Pos, x: ElementOf<Self>) -> Self::Pos {
        self.view.upper_bound_from(hint, x)
    }

    #[inline]
    fn lower_bound(&self, x: ElementOf<Self>) -> Self::Pos {
        self.view.lower_bound(x)
    }

    #[inline]
    fn upper_bound(&self, x: ElementOf<Self>) -> Self::Pos {
        self.view.upper_bound(x)
    }
}

impl<S> fmt::Debug for ComplementView<'_, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.intervals().map(|iv| (iv.start(), iv.exclusive_end())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryContainer;
    use crate::set::is_canonical;
    use spanset_core::traits::PrimTraits;

    type T = PrimTraits<u8>;
    type BSet = BoundaryContainer<T>;

    #[test]
    fn complement_inverts_the_intervals() {
        let mut set = BSet::new();
        set.inplace_union(10, 20).unwrap();
        set.inplace_union(30, 40).unwrap();
        let view = complement(&set);
        let got: Vec<_> = view
            .intervals()
            .map(|iv| (iv.start(), iv.exclusive_end()))
            .collect();
        assert_eq!(got, vec![(0, 10), (20, 30), (40, u8::MAX)]);
        assert!(is_canonical(&view));
    }

    #[test]
    fn complement_of_empty_is_full() {
        let set = BSet::new();
        let view = complement(&set);
        assert!(view.is_full());
        assert_eq!(view.intervals().count(), 1);
    }

    #[test]
    fn double_complement_folds_to_the_source() {
        let mut set = BSet::new();
        set.inplace_union(5, 9).unwrap();
        let view = complement(&set);
        assert!(std::ptr::eq(view.complement(), &set));
        assert!(std::ptr::eq(view.source(), &set));
    }
}
