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

//! Memory accounting.
//!
//! Containers do not talk to an allocator directly; they charge a
//! [`MemoryResource`] before growing and release on shrink or drop. A
//! resource is a cloneable handle: clones share one budget, and handle
//! identity (not budget equality) is what gates donation between
//! containers.
//!
//! The default resource is process-wide and unlimited, so the failure path
//! only exists for callers that opt into a byte limit. That also makes
//! budget exhaustion deterministic and therefore testable, which a real
//! out-of-memory condition is not.

use crate::error::AllocError;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
struct Budget {
    limit: usize,
    used: AtomicUsize,
}

/// Handle to a shared byte budget.
#[derive(Clone)]
pub struct MemoryResource {
    budget: Arc<Budget>,
}

impl MemoryResource {
    /// Create a fresh resource without a limit.
    pub fn unlimited() -> Self {
        Self::with_budget(usize::MAX)
    }

    /// Create a fresh resource limited to `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self::with_budget(limit)
    }

    fn with_budget(limit: usize) -> Self {
        Self {
            budget: Arc::new(Budget {
                limit,
                used: AtomicUsize::new(0),
            }),
        }
    }

    /// The process-wide default resource. Unlimited; containers created
    /// without an explicit resource charge here.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<MemoryResource> = OnceLock::new();
        GLOBAL.get_or_init(Self::unlimited).clone()
    }

    /// Reserve `bytes` from the budget.
    ///
    /// On exhaustion the reservation is rolled back and the budget is
    /// unchanged.
    pub fn charge(&self, bytes: usize) -> Result<(), AllocError> {
        let previous = self.budget.used.fetch_add(bytes, Ordering::Relaxed);
        if previous.saturating_add(bytes) > self.budget.limit {
            self.budget.used.fetch_sub(bytes, Ordering::Relaxed);
            return Err(AllocError::new(bytes));
        }
        Ok(())
    }

    /// Return `bytes` to the budget. Requires a matching earlier charge.
    pub fn release(&self, bytes: usize) {
        let previous = self.budget.used.fetch_sub(bytes, Ordering::Relaxed);
        debug_assert!(previous >= bytes);
    }

    /// Bytes currently reserved.
    #[inline]
    pub fn used(&self) -> usize {
        self.budget.used.load(Ordering::Relaxed)
    }

    /// The byte limit, `usize::MAX` when unlimited.
    #[inline]
    pub fn limit(&self) -> usize {
        self.budget.limit
    }

    /// Return true if both handles refer to the same budget.
    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.budget, &other.budget)
    }
}

impl Default for MemoryResource {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for MemoryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryResource")
            .field("limit", &self.budget.limit)
            .field("used", &self.used())
            .finish()
    }
}
