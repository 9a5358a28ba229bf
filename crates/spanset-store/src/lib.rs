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

//! # Spanset Store
//!
//! Boundary-point storage backends for the spanset engine.
//!
//! ## Modules
//!
//! - [`storage`]: the [`BoundaryStorage`](storage::BoundaryStorage) contract
//!   every backend satisfies.
//! - [`map`]: B-tree backend with logarithmic insertion anywhere.
//! - [`vec`]: sorted-vector backend with contiguous points and linear
//!   insertion.
//!
//! ## Purpose
//!
//! A storage is a canonical alternating-parity boundary sequence with bound
//! lookups and parity-preserving mutation primitives. It knows nothing about
//! set semantics; containers in the algebra crate drive these primitives and
//! keep the set-level invariants.

pub mod map;
pub mod storage;
pub mod vec;

pub use map::MapStorage;
pub use storage::BoundaryStorage;
pub use vec::VecStorage;
