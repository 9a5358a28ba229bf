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

//! The nested container: a keyed family of inner sets.
//!
//! A nested set maps keys of one ordered domain to inner sets of another;
//! an element is a (key, inner element) pair. The container never stores an
//! empty inner set, so emptiness of the whole equals emptiness of the key
//! map, and bulk operations prune keys whose inner set drains. Inner sets
//! only need [`SetOps`], so nested containers nest again to any depth.

use crate::ops::SetOps;
use spanset_core::alloc::MemoryResource;
use spanset_core::category::{NestedCategory, Set};
use spanset_core::error::AllocError;
use spanset_core::traits::{ByTraits, SetTraits};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::{FusedIterator, Peekable};

/// An owning set of (key, inner element) pairs, keyed by `K` with inner
/// sets `V`.
pub struct NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
    entries: BTreeMap<ByTraits<K>, V>,
    resource: MemoryResource,
}

impl<K, V> NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
    /// An empty set accounted against the global resource.
    pub fn new() -> Self {
        Self::with_resource(MemoryResource::global())
    }

    /// An empty set accounted against `resource`. Inner sets created
    /// through [`update`](Self::update) inherit it.
    pub fn with_resource(resource: MemoryResource) -> Self {
        Self {
            entries: BTreeMap::new(),
            resource,
        }
    }

    /// The resource inner sets are created against.
    #[inline]
    pub fn resource(&self) -> &MemoryResource {
        &self.resource
    }

    /// Number of keys with a non-empty inner set.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The inner set under `key`, if non-empty.
    pub fn get(&self, key: K::Element) -> Option<&V> {
        self.entries.get(&ByTraits::<K>(key))
    }

    /// Return true if `key` has a non-empty inner set.
    pub fn contains_key(&self, key: K::Element) -> bool {
        self.entries.contains_key(&ByTraits::<K>(key))
    }

    /// Iterate keys and inner sets in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (K::Element, &V)> {
        self.entries.iter().map(|(k, v)| (k.0, v))
    }

    /// Iterate the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = K::Element> + '_ {
        self.entries.keys().map(|k| k.0)
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Mutate the inner set under `key` through `op`, creating it against
    /// this container's resource when absent and pruning it when the
    /// mutation leaves it empty. The prune runs whether or not `op`
    /// succeeds, so a failed mutation cannot leave an empty entry behind.
    pub fn update<F>(&mut self, key: K::Element, op: F) -> Result<(), AllocError>
    where
        F: FnOnce(&mut V) -> Result<(), AllocError>,
    {
        let resource = &self.resource;
        let slot = self
            .entries
            .entry(ByTraits::<K>(key))
            .or_insert_with(|| V::with_resource(resource));
        let result = op(slot);
        if slot.is_empty_set() {
            self.entries.remove(&ByTraits::<K>(key));
        }
        result
    }

    /// Move `set` in under `key`. An empty `set` is dropped; an existing
    /// entry is grown to the union.
    pub fn insert_set(&mut self, key: K::Element, set: V) -> Result<(), AllocError> {
        if set.is_empty_set() {
            return Ok(());
        }
        match self.entries.entry(ByTraits::<K>(key)) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(set);
                Ok(())
            }
            btree_map::Entry::Occupied(mut slot) => slot.get_mut().union_with_set(&set),
        }
    }

    /// Remove and return the inner set under `key`.
    pub fn remove_key(&mut self, key: K::Element) -> Option<V> {
        self.entries.remove(&ByTraits::<K>(key))
    }

    /// Grow this set to the union with `other`. Missing keys are copied
    /// against this container's resource.
    pub fn union_with(&mut self, other: &Self) -> Result<(), AllocError> {
        for (key, theirs) in &other.entries {
            match self.entries.get_mut(key) {
                Some(mine) => mine.union_with_set(theirs)?,
                None => {
                    let copy = theirs.try_clone_with(&self.resource)?;
                    self.entries.insert(*key, copy);
                }
            }
        }
        Ok(())
    }

    /// Shrink this set to the difference with `other`, pruning drained
    /// keys.
    pub fn subtract_with(&mut self, other: &Self) -> Result<(), AllocError> {
        for (key, theirs) in &other.entries {
            if let Some(mine) = self.entries.get_mut(key) {
                mine.subtract_set(theirs)?;
                if mine.is_empty_set() {
                    self.entries.remove(key);
                }
            }
        }
        Ok(())
    }

    /// Shrink this set to the intersection with `other`, pruning keys
    /// absent from `other` and keys whose inner intersection drains.
    pub fn intersect_with(&mut self, other: &Self) -> Result<(), AllocError> {
        let keys: Vec<ByTraits<K>> = self.entries.keys().copied().collect();
        for key in keys {
            match other.entries.get(&key) {
                None => {
                    self.entries.remove(&key);
                }
                Some(theirs) => {
                    // The key was just enumerated from this map.
                    let mine = self
                        .entries
                        .get_mut(&key)
                        .unwrap_or_else(|| unreachable!());
                    mine.intersect_set(theirs)?;
                    if mine.is_empty_set() {
                        self.entries.remove(&key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Merge `other` into this set, consuming it. Inner sets under new keys
    /// move without copying.
    pub fn absorb(&mut self, other: Self) -> Result<(), AllocError> {
        for (key, theirs) in other.entries {
            match self.entries.get_mut(&key) {
                Some(mine) => mine.union_with_set(&theirs)?,
                None => {
                    self.entries.insert(key, theirs);
                }
            }
        }
        Ok(())
    }

    /// Lazily enumerate the keys of the union of two nested sets. Each key
    /// reports which side holds it.
    pub fn union_entries<'a>(&'a self, other: &'a Self) -> NestedUnion<'a, K, V> {
        NestedUnion {
            first: self.entries.iter().peekable(),
            second: other.entries.iter().peekable(),
        }
    }

    /// Lazily enumerate the keys where the two nested sets actually share
    /// elements, skipping keys whose inner sets are disjoint.
    pub fn intersection_entries<'a>(&'a self, other: &'a Self) -> NestedIntersection<'a, K, V> {
        NestedIntersection {
            first: self.entries.iter().peekable(),
            second: other.entries.iter().peekable(),
        }
    }

    /// Lazily enumerate the keys where this set keeps elements after
    /// subtracting `other`, skipping keys the subtraction would drain.
    pub fn difference_entries<'a>(&'a self, other: &'a Self) -> NestedDifference<'a, K, V> {
        NestedDifference {
            first: self.entries.iter().peekable(),
            second: other.entries.iter().peekable(),
        }
    }
}

impl<K, V> Default for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Set for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
    type Traits = K;
    type Category = NestedCategory;

    #[inline]
    fn is_empty_set(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> SetOps for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
    fn with_resource(resource: &MemoryResource) -> Self {
        Self::with_resource(resource.clone())
    }

    fn try_clone_with(&self, resource: &MemoryResource) -> Result<Self, AllocError> {
        let mut out = Self::with_resource(resource.clone());
        for (key, inner) in &self.entries {
            let copy = inner.try_clone_with(resource)?;
            out.entries.insert(*key, copy);
        }
        Ok(out)
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
        self.intersection_entries(other).next().is_some()
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        self.entries.iter().all(|(key, mine)| {
            other
                .entries
                .get(key)
                .map_or(false, |theirs| mine.is_subset_of(theirs))
        })
    }

    fn set_eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((k1, v1), (k2, v2))| K::eq(k1.0, k2.0) && v1.set_eq(v2))
    }
}

impl<K, V> PartialEq for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<K, V> Eq for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps,
{
}

impl<K, V> fmt::Debug for NestedContainer<K, V>
where
    K: SetTraits,
    V: SetOps + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k.0, v)))
            .finish()
    }
}

/// Which side of a lazy nested operation holds a key.
pub enum MergedEntry<'a, V> {
    /// Only the first set holds the key.
    First(&'a V),
    /// Only the second set holds the key.
    Second(&'a V),
    /// Both sets hold the key.
    Both(&'a V, &'a V),
}

type EntryIter<'a, K, V> = Peekable<btree_map::Iter<'a, ByTraits<K>, V>>;

/// Lazy key enumeration of a nested union.
pub struct NestedUnion<'a, K, V>
where
    K: SetTraits,
    V: SetOps,
{
    first: EntryIter<'a, K, V>,
    second: EntryIter<'a, K, V>,
}

impl<'a, K, V> Iterator for NestedUnion<'a, K, V>
where
    K: SetTraits,
    V: SetOps,
{
    type Item = (K::Element, MergedEntry<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.first.peek(), self.second.peek()) {
            (None, None) => None,
            (Some(_), None) => {
                let (k, v) = self.first.next()?;
                Some((k.0, MergedEntry::First(v)))
            }
            (None, Some(_)) => {
                let (k, v) = self.second.next()?;
                Some((k.0, MergedEntry::Second(v)))
            }
            (Some((k1, _)), Some((k2, _))) => {
                use std::cmp::Ordering::*;
                match K::cmp(k1.0, k2.0) {
                    Less => {
                        let (k, v) = self.first.next()?;
                        Some((k.0, MergedEntry::First(v)))
                    }
                    Greater => {
                        let (k, v) = self.second.next()?;
                        Some((k.0, MergedEntry::Second(v)))
                    }
                    Equal => {
                        let (k, v1) = self.first.next()?;
                        let (_, v2) = self.second.next()?;
                        Some((k.0, MergedEntry::Both(v1, v2)))
                    }
                }
            }
        }
    }
}

impl<K: SetTraits, V: SetOps> FusedIterator for NestedUnion<'_, K, V> {}

/// Lazy key enumeration of a nested intersection.
pub struct NestedIntersection<'a, K, V>
where
    K: SetTraits,
    V: SetOps,
{
    first: EntryIter<'a, K, V>,
    second: EntryIter<'a, K, V>,
}

impl<'a, K, V> Iterator for NestedIntersection<'a, K, V>
where
    K: SetTraits,
    V: SetOps,
{
    type Item = (K::Element, &'a V, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (k1, _) = self.first.peek()?;
            let (k2, _) = self.second.peek()?;
            use std::cmp::Ordering::*;
            match K::cmp(k1.0, k2.0) {
                Less => {
                    self.first.next();
                }
                Greater => {
                    self.second.next();
                }
                Equal => {
                    let (k, v1) = self.first.next()?;
                    let (_, v2) = self.second.next()?;
                    if v1.intersects(v2) {
                        return Some((k.0, v1, v2));
                    }
                }
            }
        }
    }
}

impl<K: SetTraits, V: SetOps> FusedIterator for NestedIntersection<'_, K, V> {}

/// Lazy key enumeration of a nested difference.
pub struct NestedDifference<'a, K, V>
where
    K: SetTraits,
    V: SetOps,
{
    first: EntryIter<'a, K, V>,
    second: EntryIter<'a, K, V>,
}

impl<'a, K, V> Iterator for NestedDifference<'a, K, V>
where
    K: SetTraits,
    V: SetOps,
{
    type Item = (K::Element, &'a V, Option<&'a V>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (k1, _) = self.first.peek()?;
            let subtrahend = loop {
                match self.second.peek() {
                    None => break None,
                    Some((k2, _)) => {
                        use std::cmp::Ordering::*;
                        match K::cmp(k1.0, k2.0) {
                            Greater => {
                                self.second.next();
                            }
                            Equal => break self.second.peek().map(|(_, v)| *v),
                            Less => break None,
                        }
                    }
                }
            };
            let (k, v1) = self.first.next()?;
            match subtrahend {
                None => return Some((k.0, v1, None)),
                Some(v2) => {
                    // A key fully covered by the subtrahend drains away.
                    if !v1.is_subset_of(v2) {
                        return Some((k.0, v1, Some(v2)));
                    }
                }
            }
        }
    }
}

impl<K: SetTraits, V: SetOps> FusedIterator for NestedDifference<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryContainer;
    use spanset_core::traits::{CharTraits, PrimTraits};

    type Inner = BoundaryContainer<PrimTraits<u64>>;
    type Nested = NestedContainer<CharTraits, Inner>;

    fn filled(entries: &[(char, &[(u64, u64)])]) -> Nested {
        let mut set = Nested::new();
        for (key, intervals) in entries {
            for (lo, hi) in *intervals {
                set.update(*key, |inner| inner.inplace_union(*lo, *hi)).unwrap();
            }
        }
        set
    }

    #[test]
    fn update_creates_and_prunes() {
        let mut set = Nested::new();
        set.update('a', |inner| inner.inplace_union(1, 10)).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get('a').is_some());
        set.update('a', |inner| inner.inplace_subtract(1, 10)).unwrap();
        assert!(set.is_empty());
        // A no-op update must not leave an empty entry.
        set.update('b', |_| Ok(())).unwrap();
        assert!(!set.contains_key('b'));
    }

    #[test]
    fn union_copies_and_merges() {
        let mut a = filled(&[('a', &[(1, 5)])]);
        let b = filled(&[('a', &[(5, 9)]), ('b', &[(2, 4)])]);
        a.union_with(&b).unwrap();
        assert_eq!(a.len(), 2);
        assert!(a.get('a').map_or(false, |s| s.contains(7)));
        assert!(a.get('b').map_or(false, |s| s.contains(2)));
    }

    #[test]
    fn subtract_prunes_drained_keys() {
        let mut a = filled(&[('a', &[(1, 5)]), ('b', &[(1, 5)])]);
        let b = filled(&[('a', &[(1, 5)]), ('b', &[(2, 3)])]);
        a.subtract_with(&b).unwrap();
        assert!(!a.contains_key('a'));
        assert!(a.get('b').map_or(false, |s| s.contains(1) && !s.contains(2)));
    }

    #[test]
    fn intersect_keeps_shared_keys_only() {
        let mut a = filled(&[('a', &[(1, 5)]), ('b', &[(1, 5)]), ('c', &[(1, 2)])]);
        let b = filled(&[('b', &[(3, 9)]), ('c', &[(5, 9)])]);
        a.intersect_with(&b).unwrap();
        assert_eq!(a.len(), 1);
        assert!(a.get('b').map_or(false, |s| s.contains(3) && s.contains(4)));
    }

    #[test]
    fn absorb_moves_new_keys() {
        let mut a = filled(&[('a', &[(1, 5)])]);
        let b = filled(&[('b', &[(7, 9)])]);
        a.absorb(b).unwrap();
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn merged_entry_iterators() {
        let a = filled(&[('a', &[(1, 5)]), ('b', &[(1, 5)]), ('c', &[(1, 5)])]);
        let b = filled(&[('b', &[(10, 20)]), ('c', &[(2, 3)]), ('d', &[(1, 2)])]);

        let union_keys: Vec<char> = a.union_entries(&b).map(|(k, _)| k).collect();
        assert_eq!(union_keys, vec!['a', 'b', 'c', 'd']);

        // 'b' is shared but the inner sets are disjoint.
        let inter_keys: Vec<char> = a.intersection_entries(&b).map(|(k, _, _)| k).collect();
        assert_eq!(inter_keys, vec!['c']);

        let diff_keys: Vec<char> = a.difference_entries(&b).map(|(k, _, _)| k).collect();
        assert_eq!(diff_keys, vec!['a', 'b', 'c']);

        // A fully covered key disappears from the difference.
        let covered = filled(&[('a', &[(1, 5)])]);
        let cover = filled(&[('a', &[(0, 9)])]);
        assert_eq!(covered.difference_entries(&cover).count(), 0);
    }

    #[test]
    fn nested_in_nested() {
        type Deep = NestedContainer<PrimTraits<u32>, Nested>;
        let mut deep = Deep::new();
        deep.update(1, |mid| mid.update('x', |inner| inner.inplace_union(5, 10)))
            .unwrap();
        assert_eq!(deep.len(), 1);
        let copy = deep.try_clone_with(deep.resource()).unwrap();
        assert!(deep.set_eq(&copy));
    }
}
