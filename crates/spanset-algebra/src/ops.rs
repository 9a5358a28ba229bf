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

//! The uniform operation surface of owning containers.
//!
//! [`SetOps`] is what nesting needs from an inner set: construction against
//! a resource, fallible copying, the three in-place algebra operations, and
//! the relational tests. Boundary, interval, and nested containers all
//! implement it, so nested containers compose to any depth.

use crate::boundary::BoundaryContainer;
use crate::intervals::IntervalContainer;
use crate::predicates;
use spanset_core::alloc::MemoryResource;
use spanset_core::category::Set;
use spanset_core::error::AllocError;
use spanset_core::traits::{BoundedTraits, SetTraits};
use spanset_store::storage::BoundaryStorage;

/// The operations an owning container offers regardless of its category.
pub trait SetOps: Set + Sized {
    /// An empty set accounted against `resource`.
    fn with_resource(resource: &MemoryResource) -> Self;

    /// A copy of this set accounted against `resource`.
    fn try_clone_with(&self, resource: &MemoryResource) -> Result<Self, AllocError>;

    /// Grow this set to the union with `other`.
    fn union_with_set(&mut self, other: &Self) -> Result<(), AllocError>;

    /// Shrink this set to the difference with `other`.
    fn subtract_set(&mut self, other: &Self) -> Result<(), AllocError>;

    /// Shrink this set to the intersection with `other`.
    fn intersect_set(&mut self, other: &Self) -> Result<(), AllocError>;

    /// Return true if the two sets share an element.
    fn intersects(&self, other: &Self) -> bool;

    /// Return true if every element of this set is in `other`.
    fn is_subset_of(&self, other: &Self) -> bool;

    /// Return true if the two sets hold the same elements.
    fn set_eq(&self, other: &Self) -> bool;
}

impl<T, S> SetOps for BoundaryContainer<T, S>
where
    T: SetTraits + BoundedTraits,
    S: BoundaryStorage<T>,
{
    fn with_resource(resource: &MemoryResource) -> Self {
        Self::with_resource(resource.clone())
    }

    fn try_clone_with(&self, resource: &MemoryResource) -> Result<Self, AllocError> {
        Self::from_set(self, resource.clone())
    }

    fn union_with_set(&mut self, other: &Self) -> Result<(), AllocError> {
        self.union_with(other)
    }

    fn subtract_set(&mut self, other: &Self) -> Result<(), AllocError> {
        self.subtract_with(other)
    }

    fn intersect_set(&mut self, other: &Self) -> Result<(), AllocError> {
        self.intersect_with(other)
    }

    fn intersects(&self, other: &Self) -> bool {
        predicates::is_intersecting(self, other)
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        predicates::is_subset(self, other)
    }

    fn set_eq(&self, other: &Self) -> bool {
        predicates::is_equal(self, other)
    }
}

impl<T, S> SetOps for IntervalContainer<T, S>
where
    T: SetTraits + BoundedTraits,
    S: BoundaryStorage<T>,
{
    fn with_resource(resource: &MemoryResource) -> Self {
        Self::with_resource(resource.clone())
    }

    fn try_clone_with(&self, resource: &MemoryResource) -> Result<Self, AllocError> {
        let inner = BoundaryContainer::<T, S>::from_set(self.as_boundary(), resource.clone())?;
        Ok(inner.into())
    }

    fn union_with_set(&mut self, other: &Self) -> Result<(), AllocError> {
        self.union_with(other.as_boundary())
    }

    fn subtract_set(&mut self, other: &Self) -> Result<(), AllocError> {
        self.subtract_with(other.as_boundary())
    }

    fn intersect_set(&mut self, other: &Self) -> Result<(), AllocError> {
        self.intersect_with(other.as_boundary())
    }

    fn intersects(&self, other: &Self) -> bool {
        predicates::is_intersecting(self.as_boundary(), other.as_boundary())
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        predicates::is_subset(self.as_boundary(), other.as_boundary())
    }

    fn set_eq(&self, other: &Self) -> bool {
        predicates::is_equal(self.as_boundary(), other.as_boundary())
    }
}
