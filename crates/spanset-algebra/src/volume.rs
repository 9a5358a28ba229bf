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

//! Set volume.
//!
//! The volume of a set is the summed length of its intervals, kept in the
//! exact integral type of the metric for as long as possible. Conversion to
//! `f64` happens only at the surface, and comparing two volumes goes
//! through the metric's exact subtraction so that sets differing by one
//! element report exactly `1.0` even when both volumes are far beyond the
//! integers `f64` can represent.

use crate::boundary::BoundaryContainer;
use crate::complement::ComplementView;
use crate::constant::{EmptySet, FullSet};
use crate::intervals::IntervalContainer;
use crate::merge::{MergeOp, MergeView};
use crate::nested::NestedContainer;
use crate::ops::SetOps;
use crate::set::BoundarySet;
use spanset_core::traits::{BoundedTraits, MetricTraits, SetTraits};
use spanset_store::storage::BoundaryStorage;

/// A set whose elements carry a length metric.
pub trait Measure {
    /// The metric used to measure interval lengths.
    type Metric: MetricTraits;

    /// The exact summed length of all intervals.
    fn raw_volume(&self) -> <Self::Metric as MetricTraits>::Difference;
}

/// The number of elements of `measurable` as an `f64`. Exact while the
/// volume fits the mantissa, the nearest representable value beyond.
pub fn volume<M: Measure>(measurable: &M) -> f64 {
    M::Metric::to_f64(measurable.raw_volume())
}

/// The signed difference `volume(a) - volume(b)`, computed exactly in the
/// metric before any float conversion.
pub fn volume_difference<A, B>(a: &A, b: &B) -> f64
where
    A: Measure,
    B: Measure<Metric = A::Metric>,
{
    A::Metric::delta_f64(a.raw_volume(), b.raw_volume())
}

fn sum_intervals<S>(set: &S) -> <S::Traits as MetricTraits>::Difference
where
    S: BoundarySet,
    S::Traits: MetricTraits,
{
    let mut total = <S::Traits as MetricTraits>::zero();
    for interval in set.intervals() {
        let length =
            <S::Traits as MetricTraits>::length(interval.start(), interval.exclusive_end());
        total = <S::Traits as MetricTraits>::combine(total, length);
    }
    total
}

impl<T, S> Measure for BoundaryContainer<T, S>
where
    T: SetTraits + MetricTraits,
    S: BoundaryStorage<T>,
{
    type Metric = T;

    fn raw_volume(&self) -> T::Difference {
        sum_intervals(self)
    }
}

impl<T, S> Measure for IntervalContainer<T, S>
where
    T: SetTraits + MetricTraits,
    S: BoundaryStorage<T>,
{
    type Metric = T;

    fn raw_volume(&self) -> T::Difference {
        sum_intervals(self.as_boundary())
    }
}

impl<A, B, Op> Measure for MergeView<A, B, Op>
where
    A: BoundarySet,
    B: BoundarySet<Traits = A::Traits>,
    A::Traits: MetricTraits,
    Op: MergeOp,
{
    type Metric = A::Traits;

    fn raw_volume(&self) -> <A::Traits as MetricTraits>::Difference {
        sum_intervals(self)
    }
}

impl<S> Measure for ComplementView<'_, S>
where
    S: BoundarySet,
    S::Traits: BoundedTraits + MetricTraits,
{
    type Metric = S::Traits;

    fn raw_volume(&self) -> <S::Traits as MetricTraits>::Difference {
        sum_intervals(self)
    }
}

impl<T> Measure for EmptySet<T>
where
    T: SetTraits + MetricTraits,
{
    type Metric = T;

    fn raw_volume(&self) -> T::Difference {
        T::zero()
    }
}

impl<T> Measure for FullSet<T>
where
    T: BoundedTraits + MetricTraits,
{
    type Metric = T;

    fn raw_volume(&self) -> T::Difference {
        T::length(T::min_value(), T::max_exclusive())
    }
}

impl<K, V> Measure for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps + Measure,
{
    type Metric = V::Metric;

    fn raw_volume(&self) -> <V::Metric as MetricTraits>::Difference {
        let mut total = V::Metric::zero();
        for (_, inner) in self.iter() {
            total = V::Metric::combine(total, inner.raw_volume());
        }
        total
    }
}
