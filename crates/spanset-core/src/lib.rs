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

//! # Spanset Core
//!
//! Foundation crate of the spanset workspace: the compile-time vocabulary
//! that every higher layer is written against.
//!
//! ## Modules
//!
//! - [`traits`]: element trait bundles (`SetTraits` and its bounded,
//!   discrete, and metric refinements) plus the provided integer and
//!   character bundles.
//! - [`category`]: category markers and the `Set` trait that ties a set type
//!   to its traits and category.
//! - [`interval`]: the half-open `Interval` value type.
//! - [`alloc`]: the `MemoryResource` accounting handle containers draw
//!   their memory budget from.
//! - [`error`]: error types shared across the workspace.
//!
//! ## Purpose
//!
//! Nothing in this crate owns boundary data or runs set algorithms; it only
//! defines the ordered-domain contract (comparison, bounds,
//! successor/predecessor, difference) and the small value types the storage
//! and algebra crates build on.

pub mod alloc;
pub mod category;
pub mod error;
pub mod interval;
pub mod traits;

pub use alloc::MemoryResource;
pub use category::{BoundaryCategory, Category, ElementOf, IntervalCategory, NestedCategory, Set};
pub use error::{AllocError, IntervalError};
pub use interval::Interval;
pub use traits::{
    BoundedTraits, ByTraits, CharTraits, DiscreteTraits, MetricTraits, PrimTraits, SetTraits,
};
