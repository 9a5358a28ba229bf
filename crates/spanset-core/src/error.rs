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

//! Errors shared across the workspace.

use std::error::Error;
use std::fmt;

/// The memory budget of a [`MemoryResource`](crate::alloc::MemoryResource)
/// was exhausted.
///
/// Returned by every container mutator that may need new boundary pairs.
/// The per-operation documentation states whether the container is left
/// unmodified (strong guarantee) or holds a documented partial result
/// (basic guarantee).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    requested: usize,
}

impl AllocError {
    /// Create an error recording the size of the failed request.
    #[inline]
    pub fn new(requested: usize) -> Self {
        Self { requested }
    }

    /// The number of bytes the failed request asked for.
    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "memory budget exhausted while requesting {} bytes",
            self.requested
        )
    }
}

impl Error for AllocError {}

/// An [`Interval`](crate::interval::Interval) construction was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// The start was not strictly below the exclusive end.
    Empty,
    /// A boundary fell outside the domain of a bounded trait bundle.
    OutOfRange,
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "interval start must be strictly below its exclusive end"),
            Self::OutOfRange => write!(f, "interval boundary outside the element domain"),
        }
    }
}

impl Error for IntervalError {}
