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

//! B-tree storage backend.
//!
//! One map entry per interval, keyed by the interval's *exclusive end* with
//! the *start* as the mapped value. The reversed keying is deliberate: a
//! single range probe on the keys finds the first endpoint at or beyond a
//! query element, and comparing that entry's start then tells whether the
//! query landed on the start boundary or the endpoint boundary, so both
//! bound lookups cost one tree descent.
//!
//! A position names its entry by key, plus the parity flag. Positions are
//! therefore stable across mutations of unrelated entries, which the
//! container's cursor-driven bulk operations rely on.

use crate::storage::BoundaryStorage;
use smallvec::SmallVec;
use spanset_core::traits::{ByTraits, SetTraits};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

/// Position inside a [`MapStorage`].
///
/// `key` is the endpoint key of the entry holding the point, `None` for the
/// past-the-end position. `endpoint` selects which of the entry's two points
/// is meant.
pub struct MapPos<T: SetTraits> {
    key: Option<T::Element>,
    endpoint: bool,
}

impl<T: SetTraits> MapPos<T> {
    #[inline]
    fn start_of(key: T::Element) -> Self {
        Self {
            key: Some(key),
            endpoint: false,
        }
    }

    #[inline]
    fn end_of(key: T::Element) -> Self {
        Self {
            key: Some(key),
            endpoint: true,
        }
    }

    #[inline]
    fn past_the_end() -> Self {
        Self {
            key: None,
            endpoint: false,
        }
    }
}

impl<T: SetTraits> Clone for MapPos<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SetTraits> Copy for MapPos<T> {}

impl<T: SetTraits> PartialEq for MapPos<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.key, other.key) {
            (None, None) => true,
            (Some(a), Some(b)) => T::eq(a, b) && self.endpoint == other.endpoint,
            _ => false,
        }
    }
}

impl<T: SetTraits> fmt::Debug for MapPos<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            None => write!(f, "MapPos(end)"),
            Some(k) => write!(
                f,
                "MapPos({:?}, {})",
                k,
                if self.endpoint { "endpoint" } else { "start" }
            ),
        }
    }
}

/// Boundary storage backed by a `BTreeMap`, one entry per interval.
pub struct MapStorage<T: SetTraits> {
    // exclusive end -> start
    entries: BTreeMap<ByTraits<T>, T::Element>,
}

impl<T: SetTraits> Default for MapStorage<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: SetTraits> MapStorage<T> {
    fn first_key_at_or_after(&self, x: T::Element, strict: bool) -> Option<(T::Element, T::Element)> {
        let range_start = if strict {
            (Bound::Excluded(ByTraits::<T>(x)), Bound::Unbounded)
        } else {
            (Bound::Included(ByTraits::<T>(x)), Bound::Unbounded)
        };
        self.entries
            .range(range_start)
            .next()
            .map(|(k, &s)| (k.0, s))
    }

    fn start_value(&self, key: T::Element) -> T::Element {
        self.entries[&ByTraits::<T>(key)]
    }
}

impl<T: SetTraits> BoundaryStorage<T> for MapStorage<T> {
    type Pos = MapPos<T>;

    const HAS_FAST_INSERTION: bool = true;

    #[inline]
    fn boundary_len(&self) -> usize {
        self.entries.len() * 2
    }

    fn begin(&self) -> MapPos<T> {
        match self.entries.keys().next() {
            Some(k) => MapPos::start_of(k.0),
            None => MapPos::past_the_end(),
        }
    }

    #[inline]
    fn end(&self) -> MapPos<T> {
        MapPos::past_the_end()
    }

    #[inline]
    fn is_end(&self, pos: MapPos<T>) -> bool {
        pos.key.is_none()
    }

    fn value(&self, pos: MapPos<T>) -> T::Element {
        debug_assert!(pos.key.is_some());
        match pos.key {
            Some(k) if pos.endpoint => k,
            Some(k) => self.start_value(k),
            None => unreachable!("dereferenced end position"),
        }
    }

    #[inline]
    fn is_endpoint(&self, pos: MapPos<T>) -> bool {
        pos.endpoint
    }

    fn next(&self, pos: MapPos<T>) -> MapPos<T> {
        let Some(key) = pos.key else {
            unreachable!("advanced end position")
        };
        if !pos.endpoint {
            return MapPos::end_of(key);
        }
        match self.first_key_at_or_after(key, true) {
            Some((k, _)) => MapPos::start_of(k),
            None => MapPos::past_the_end(),
        }
    }

    fn prev(&self, pos: MapPos<T>) -> MapPos<T> {
        match pos.key {
            Some(key) if pos.endpoint => MapPos::start_of(key),
            Some(key) => {
                let (k, _) = self
                    .entries
                    .range(..ByTraits::<T>(key))
                    .next_back()
                    .map(|(k, &s)| (k.0, s))
                    .unwrap_or_else(|| unreachable!("stepped before begin"));
                MapPos::end_of(k)
            }
            None => {
                let k = self
                    .entries
                    .keys()
                    .next_back()
                    .unwrap_or_else(|| unreachable!("stepped before begin of empty storage"));
                MapPos::end_of(k.0)
            }
        }
    }

    fn lower_bound(&self, _hint: MapPos<T>, x: T::Element) -> MapPos<T> {
        // A tree descent is logarithmic with or without the hint; the hint
        // is accepted for interface uniformity and ignored.
        match self.first_key_at_or_after(x, false) {
            None => MapPos::past_the_end(),
            Some((k, s)) => {
                if T::ge(s, x) {
                    MapPos::start_of(k)
                } else {
                    MapPos::end_of(k)
                }
            }
        }
    }

    fn upper_bound(&self, _hint: MapPos<T>, x: T::Element) -> MapPos<T> {
        match self.first_key_at_or_after(x, true) {
            None => MapPos::past_the_end(),
            Some((k, s)) => {
                if T::gt(s, x) {
                    MapPos::start_of(k)
                } else {
                    MapPos::end_of(k)
                }
            }
        }
    }

    fn insert_pair(&mut self, at: MapPos<T>, v1: T::Element, v2: T::Element) -> MapPos<T> {
        debug_assert!(T::lt(v1, v2));
        match at.key {
            Some(key) if at.endpoint => {
                // Split the surrounding interval: the entry keeps its
                // endpoint key and donates its start to a new entry ending
                // at v1.
                let old_start = self.start_value(key);
                debug_assert!(T::lt(old_start, v1) && T::lt(v2, key));
                self.entries.insert(ByTraits::<T>(v1), old_start);
                if let Some(start) = self.entries.get_mut(&ByTraits::<T>(key)) {
                    *start = v2;
                }
                MapPos::end_of(key)
            }
            _ => {
                // The pair lands in a gap (or at the very end): one fresh
                // interval entry.
                self.entries.insert(ByTraits::<T>(v2), v1);
                at
            }
        }
    }

    fn erase_range(&mut self, first: MapPos<T>, last: MapPos<T>) -> MapPos<T> {
        if first == last {
            return last;
        }
        let Some(first_key) = first.key else {
            unreachable!("erase starting at end position")
        };
        debug_assert!(
            first.endpoint == last.endpoint || last.key.is_none(),
            "erase range must cover an even number of points"
        );
        let doomed: SmallVec<[T::Element; 8]> = match last.key {
            Some(last_key) => self
                .entries
                .range(ByTraits::<T>(first_key)..ByTraits::<T>(last_key))
                .map(|(k, _)| k.0)
                .collect(),
            None => self
                .entries
                .range(ByTraits::<T>(first_key)..)
                .map(|(k, _)| k.0)
                .collect(),
        };
        if first.endpoint {
            debug_assert!(last.key.is_some() && last.endpoint);
            // The first entry keeps its start alive: it migrates to the
            // entry holding `last`, fusing the two flanking intervals'
            // remainders.
            let kept_start = self.start_value(first_key);
            for key in doomed {
                self.entries.remove(&ByTraits::<T>(key));
            }
            if let Some(last_key) = last.key {
                if let Some(start) = self.entries.get_mut(&ByTraits::<T>(last_key)) {
                    *start = kept_start;
                }
            }
        } else {
            for key in doomed {
                self.entries.remove(&ByTraits::<T>(key));
            }
        }
        last
    }

    fn update_point(&mut self, pos: MapPos<T>, v: T::Element) -> MapPos<T> {
        let Some(key) = pos.key else {
            unreachable!("updated end position")
        };
        if pos.endpoint {
            // Endpoints are keys; re-key the entry.
            if let Some(start) = self.entries.remove(&ByTraits::<T>(key)) {
                debug_assert!(T::lt(start, v));
                self.entries.insert(ByTraits::<T>(v), start);
            }
            self.next(MapPos::end_of(v))
        } else {
            if let Some(start) = self.entries.get_mut(&ByTraits::<T>(key)) {
                *start = v;
            }
            MapPos::end_of(key)
        }
    }

    fn push_pair(&mut self, v1: T::Element, v2: T::Element) {
        debug_assert!(T::lt(v1, v2));
        debug_assert!(self.back().map_or(true, |b| T::lt(b, v1)));
        self.entries.insert(ByTraits::<T>(v2), v1);
    }

    fn pop_front_pair(&mut self) -> Option<(T::Element, T::Element)> {
        self.entries.pop_first().map(|(k, s)| (s, k.0))
    }

    fn steal_and_insert(
        &mut self,
        at: MapPos<T>,
        v1: T::Element,
        v2: T::Element,
        from: &mut Self,
    ) -> MapPos<T> {
        let _ = from.pop_front_pair();
        self.insert_pair(at, v1, v2)
    }

    fn front(&self) -> Option<T::Element> {
        self.entries.first_key_value().map(|(_, &s)| s)
    }

    fn back(&self) -> Option<T::Element> {
        self.entries.keys().next_back().map(|k| k.0)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: SetTraits> fmt::Debug for MapStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(k, &s)| (s, k.0)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanset_core::traits::PrimTraits;

    type T = PrimTraits<u64>;
    type S = MapStorage<T>;

    fn filled() -> S {
        // {[10, 20), [30, 40), [50, 60)}
        let mut s = S::default();
        s.push_pair(10, 20);
        s.push_pair(30, 40);
        s.push_pair(50, 60);
        s
    }

    fn points(s: &S) -> Vec<(u64, bool)> {
        let mut out = Vec::new();
        let mut pos = s.begin();
        while !s.is_end(pos) {
            out.push((s.value(pos), s.is_endpoint(pos)));
            pos = s.next(pos);
        }
        out
    }

    #[test]
    fn iteration_alternates_parity() {
        let s = filled();
        assert_eq!(s.boundary_len(), 6);
        assert_eq!(
            points(&s),
            vec![
                (10, false),
                (20, true),
                (30, false),
                (40, true),
                (50, false),
                (60, true)
            ]
        );
    }

    #[test]
    fn prev_walks_backwards() {
        let s = filled();
        let mut pos = s.end();
        let mut reversed = Vec::new();
        while pos != s.begin() {
            pos = s.prev(pos);
            reversed.push(s.value(pos));
        }
        assert_eq!(reversed, vec![60, 50, 40, 30, 20, 10]);
    }

    #[test]
    fn bounds_resolve_parity() {
        let s = filled();
        let hint = s.begin();
        // Inside an interval: both bounds land on the endpoint.
        assert_eq!(s.lower_bound(hint, 15), MapPos::end_of(20));
        assert_eq!(s.upper_bound(hint, 15), MapPos::end_of(20));
        // On a start: lower bound is the start itself, upper bound its
        // endpoint.
        assert_eq!(s.lower_bound(hint, 30), MapPos::start_of(40));
        assert_eq!(s.upper_bound(hint, 30), MapPos::end_of(40));
        // On an endpoint: lower bound is the endpoint, upper bound the next
        // start.
        assert_eq!(s.lower_bound(hint, 40), MapPos::end_of(40));
        assert_eq!(s.upper_bound(hint, 40), MapPos::start_of(60));
        // In a gap and beyond the back.
        assert_eq!(s.lower_bound(hint, 25), MapPos::start_of(40));
        assert!(s.is_end(s.upper_bound(hint, 60)));
    }

    #[test]
    fn insert_pair_in_gap_creates_entry() {
        let mut s = filled();
        let at = s.lower_bound(s.begin(), 42);
        let after = s.insert_pair(at, 42, 45);
        assert_eq!(after, MapPos::start_of(60));
        assert_eq!(
            points(&s).iter().map(|p| p.0).collect::<Vec<_>>(),
            vec![10, 20, 30, 40, 42, 45, 50, 60]
        );
    }

    #[test]
    fn insert_pair_at_endpoint_splits_entry() {
        let mut s = filled();
        let at = s.lower_bound(s.begin(), 33); // endpoint of [30, 40)
        let after = s.insert_pair(at, 33, 35);
        assert_eq!(after, MapPos::end_of(40));
        assert_eq!(
            points(&s).iter().map(|p| p.0).collect::<Vec<_>>(),
            vec![10, 20, 30, 33, 35, 40, 50, 60]
        );
    }

    #[test]
    fn erase_whole_entries() {
        let mut s = filled();
        let first = MapPos::start_of(40);
        let last = MapPos::start_of(60);
        let after = s.erase_range(first, last);
        assert_eq!(after, last);
        assert_eq!(
            points(&s).iter().map(|p| p.0).collect::<Vec<_>>(),
            vec![10, 20, 50, 60]
        );
    }

    #[test]
    fn erase_between_endpoints_fuses_intervals() {
        let mut s = filled();
        let after = s.erase_range(MapPos::end_of(20), MapPos::end_of(60));
        assert_eq!(after, MapPos::end_of(60));
        assert_eq!(
            points(&s).iter().map(|p| p.0).collect::<Vec<_>>(),
            vec![10, 60]
        );
    }

    #[test]
    fn erase_to_end_drops_tail() {
        let mut s = filled();
        let after = s.erase_range(MapPos::start_of(40), s.end());
        assert!(s.is_end(after));
        assert_eq!(
            points(&s).iter().map(|p| p.0).collect::<Vec<_>>(),
            vec![10, 20]
        );
    }

    #[test]
    fn update_point_rekeys_endpoints() {
        let mut s = filled();
        let after = s.update_point(MapPos::end_of(40), 45);
        assert_eq!(after, MapPos::start_of(60));
        assert!(points(&s).contains(&(45, true)));
        let after = s.update_point(MapPos::start_of(45), 28);
        assert_eq!(after, MapPos::end_of(45));
        assert!(points(&s).contains(&(28, false)));
    }

    #[test]
    fn pop_front_and_steal() {
        let mut s = filled();
        let mut donor = S::default();
        donor.push_pair(100, 110);
        assert_eq!(s.boundary_len() + donor.boundary_len(), 8);
        let at = s.lower_bound(s.begin(), 70);
        s.steal_and_insert(at, 70, 80, &mut donor);
        assert_eq!(s.boundary_len() + donor.boundary_len(), 8);
        assert!(donor.is_empty());
        assert_eq!(s.back(), Some(80));
        assert_eq!(s.pop_front_pair(), Some((10, 20)));
    }
}
