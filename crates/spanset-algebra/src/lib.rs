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

//! # Spanset Algebra
//!
//! Composable set algebra over ordered domains, represented as canonical
//! interval sequences.
//!
//! ## Modules
//!
//! - [`set`]: the [`BoundarySet`](set::BoundarySet) contract shared by
//!   containers and views, plus boundary and interval iteration.
//! - [`boundary`]: the owning boundary container and its one-interval
//!   splice.
//! - [`intervals`]: the interval-level facade over the boundary container.
//! - [`nested`]: keyed families of inner sets, nestable to any depth.
//! - [`merge`]: lazy union, intersection, and difference views.
//! - [`complement`]: the lazy complement over a bounded domain.
//! - [`constant`]: the empty and full constant sets.
//! - [`predicates`]: containment, subset, intersection, and equality tests.
//! - [`volume`]: exact set cardinality and cardinality differences.
//! - [`codec`]: the interval text format.
//! - [`ops`]: the uniform operation surface nesting builds on.
//!
//! ## Example
//!
//! ```
//! use spanset_algebra::aliases::U64BoundarySet;
//! use spanset_algebra::merge::union_of;
//! use spanset_algebra::predicates::is_equal;
//!
//! # use spanset_core::alloc::MemoryResource;
//! # fn main() -> Result<(), spanset_core::error::AllocError> {
//! let mut a = U64BoundarySet::new();
//! let mut b = U64BoundarySet::new();
//! a.inplace_union(1, 10)?;
//! b.inplace_union(5, 20)?;
//!
//! // Materialize the lazy view, then merge in place; both agree.
//! let merged = {
//!     let view = union_of(&a, &b);
//!     U64BoundarySet::from_set(&view, MemoryResource::global())?
//! };
//! a.union_with(&b)?;
//! assert!(is_equal(&a, &merged));
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod codec;
pub mod complement;
pub mod constant;
pub mod intervals;
pub mod merge;
pub mod nested;
pub mod ops;
pub mod predicates;
pub mod set;
pub mod volume;

pub use boundary::BoundaryContainer;
pub use codec::{decode, encode_set, DecodeError, DecodeSet, Encode, KeyCodec};
pub use complement::{complement, ComplementView};
pub use constant::{EmptySet, FullSet};
pub use intervals::IntervalContainer;
pub use merge::{difference_of, intersection_of, union_of, MergeView};
pub use nested::{MergedEntry, NestedContainer};
pub use ops::SetOps;
pub use set::BoundarySet;
pub use volume::{volume, volume_difference, Measure};

/// Ready-made instantiations for the common domains.
pub mod aliases {
    use super::{BoundaryContainer, IntervalContainer, NestedContainer};
    use spanset_core::traits::{CharTraits, PrimTraits};

    /// Traits of the `u64` domain.
    pub type U64Traits = PrimTraits<u64>;

    /// Boundary set over `u64`.
    pub type U64BoundarySet = BoundaryContainer<U64Traits>;

    /// Interval set over `u64`.
    pub type U64IntervalSet = IntervalContainer<U64Traits>;

    /// Nested set with single-character keys over `u64` inner sets.
    pub type KeyedU64Set = NestedContainer<CharTraits, U64BoundarySet>;
}
