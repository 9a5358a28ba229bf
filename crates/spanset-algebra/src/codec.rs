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

//! The text codec.
//!
//! A boundary or interval set encodes as comma-separated intervals, each
//! either a single element `N` or an inclusive range `N-M`. A nested set
//! prefixes each entry with its key and a colon, and an entry's intervals
//! keep running until the next colon-bearing chunk: `a:3-4,b:3,5` holds two
//! keys, with `3` and `5` both under `b`. The empty string is the empty
//! set.
//!
//! The decoder is strict: every rejected shape (malformed numbers,
//! reversed ranges, out-of-order or overlapping intervals, duplicate or
//! descending keys) is an error, never silently repaired. Adjacent or
//! repeated intervals in ascending order are accepted and merge through
//! the normal union path.

use crate::boundary::BoundaryContainer;
use crate::intervals::IntervalContainer;
use crate::nested::NestedContainer;
use crate::ops::SetOps;
use crate::set::BoundarySet;
use spanset_core::alloc::MemoryResource;
use spanset_core::category::ElementOf;
use spanset_core::error::AllocError;
use spanset_core::traits::{BoundedTraits, CharTraits, DiscreteTraits, PrimTraits, SetTraits};
use spanset_store::storage::BoundaryStorage;
use num_traits::PrimInt;
use std::error::Error;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Why a text failed to decode.
#[derive(Debug)]
pub enum DecodeError {
    /// An empty chunk, such as a leading, trailing, or doubled comma, or a
    /// key with no intervals.
    EmptyChunk,
    /// A boundary that is not a number of the domain.
    InvalidNumber(String),
    /// A key that does not parse.
    InvalidKey(String),
    /// An interval `N-M` with `M < N`.
    ReversedInterval,
    /// An interval starting before the previous interval's end.
    OutOfOrder,
    /// A boundary outside the bounded domain.
    OutOfRange,
    /// An interval chunk before the first key of a nested text.
    MissingKey,
    /// The same key twice.
    DuplicateKey,
    /// A key smaller than its predecessor.
    KeyOutOfOrder,
    /// The decoded set did not fit the memory budget.
    Alloc(AllocError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyChunk => write!(f, "empty chunk in set text"),
            Self::InvalidNumber(text) => write!(f, "invalid boundary number: {text:?}"),
            Self::InvalidKey(text) => write!(f, "invalid key: {text:?}"),
            Self::ReversedInterval => write!(f, "interval end is smaller than its start"),
            Self::OutOfOrder => write!(f, "intervals are not in ascending order"),
            Self::OutOfRange => write!(f, "boundary outside the domain"),
            Self::MissingKey => write!(f, "interval chunk before the first key"),
            Self::DuplicateKey => write!(f, "duplicate key"),
            Self::KeyOutOfOrder => write!(f, "keys are not in ascending order"),
            Self::Alloc(err) => write!(f, "decoded set does not fit the budget: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocError> for DecodeError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

/// Sets that encode to the interval text format.
pub trait Encode {
    /// Append the text form to `out`.
    fn encode_into(&self, out: &mut String);

    /// The text form as a fresh string.
    fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }
}

/// Sets that decode from the interval text format.
pub trait DecodeSet: Sized {
    /// Decode `text`, accounting the result against `resource`.
    fn decode_with(text: &str, resource: &MemoryResource) -> Result<Self, DecodeError>;
}

/// Decode `text` against the global resource.
pub fn decode<D: DecodeSet>(text: &str) -> Result<D, DecodeError> {
    D::decode_with(text, &MemoryResource::global())
}

/// Append the text form of any boundary set, views included.
pub fn encode_set<S>(set: &S, out: &mut String)
where
    S: BoundarySet,
    S::Traits: DiscreteTraits,
    ElementOf<S>: fmt::Display,
{
    for (index, interval) in set.intervals().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let start = interval.start();
        let inclusive_end = <S::Traits as DiscreteTraits>::prev(interval.exclusive_end());
        let _ = write!(out, "{start}");
        if <S::Traits as SetTraits>::lt(start, inclusive_end) {
            let _ = write!(out, "-{inclusive_end}");
        }
    }
}

/// Key encoding for nested set text.
pub trait KeyCodec: SetTraits {
    /// Append the text form of `key` to `out`.
    fn encode_key(key: Self::Element, out: &mut String);

    /// Parse a key from its exact text form.
    fn parse_key(text: &str) -> Result<Self::Element, DecodeError>;
}

impl<E> KeyCodec for PrimTraits<E>
where
    E: PrimInt + fmt::Debug + fmt::Display + FromStr + 'static,
{
    fn encode_key(key: E, out: &mut String) {
        let _ = write!(out, "{key}");
    }

    fn parse_key(text: &str) -> Result<E, DecodeError> {
        text.parse()
            .map_err(|_| DecodeError::InvalidKey(text.to_string()))
    }
}

impl KeyCodec for CharTraits {
    fn encode_key(key: char, out: &mut String) {
        out.push(key);
    }

    fn parse_key(text: &str) -> Result<char, DecodeError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Ok(key),
            _ => Err(DecodeError::InvalidKey(text.to_string())),
        }
    }
}

fn parse_element<T>(text: &str) -> Result<T::Element, DecodeError>
where
    T: SetTraits,
    T::Element: FromStr,
{
    text.parse()
        .map_err(|_| DecodeError::InvalidNumber(text.to_string()))
}

// Split "N" or "N-M" at the range dash, tolerating a leading sign.
fn split_range(chunk: &str) -> (&str, Option<&str>) {
    let mut indices = chunk.char_indices();
    indices.next();
    for (i, c) in indices {
        if c == '-' {
            return (&chunk[..i], Some(&chunk[i + 1..]));
        }
    }
    (chunk, None)
}

impl<T, S> DecodeSet for BoundaryContainer<T, S>
where
    T: SetTraits + BoundedTraits + DiscreteTraits,
    T::Element: FromStr,
    S: BoundaryStorage<T>,
{
    fn decode_with(text: &str, resource: &MemoryResource) -> Result<Self, DecodeError> {
        let mut out = Self::with_resource(resource.clone());
        if text.is_empty() {
            return Ok(out);
        }
        let mut cursor = out.first();
        let mut previous_end: Option<T::Element> = None;
        for chunk in text.split(',') {
            if chunk.is_empty() {
                return Err(DecodeError::EmptyChunk);
            }
            let (start_text, end_text) = split_range(chunk);
            let start = parse_element::<T>(start_text)?;
            let inclusive_end = match end_text {
                Some(end_text) => parse_element::<T>(end_text)?,
                None => start,
            };
            if !T::in_range(start) || !T::in_range(inclusive_end) {
                return Err(DecodeError::OutOfRange);
            }
            if T::gt(start, inclusive_end) {
                return Err(DecodeError::ReversedInterval);
            }
            if previous_end.map_or(false, |end| T::lt(start, end)) {
                return Err(DecodeError::OutOfOrder);
            }
            let exclusive_end = T::next(inclusive_end);
            out.inplace_union_hinted(&mut cursor, start, exclusive_end)?;
            previous_end = Some(exclusive_end);
        }
        Ok(out)
    }
}

impl<T, S> DecodeSet for IntervalContainer<T, S>
where
    T: SetTraits + BoundedTraits + DiscreteTraits,
    T::Element: FromStr,
    S: BoundaryStorage<T>,
{
    fn decode_with(text: &str, resource: &MemoryResource) -> Result<Self, DecodeError> {
        let inner = BoundaryContainer::<T, S>::decode_with(text, resource)?;
        Ok(inner.into())
    }
}

// One nesting level deep: inner texts must not contain colons themselves.
impl<K, V> DecodeSet for NestedContainer<K, V>
where
    K: KeyCodec,
    V: SetOps + DecodeSet,
{
    fn decode_with(text: &str, resource: &MemoryResource) -> Result<Self, DecodeError> {
        let mut out = Self::with_resource(resource.clone());
        if text.is_empty() {
            return Ok(out);
        }
        let mut current: Option<(K::Element, String)> = None;
        let mut previous_key: Option<K::Element> = None;
        for chunk in text.split(',') {
            if chunk.is_empty() {
                return Err(DecodeError::EmptyChunk);
            }
            match chunk.find(':') {
                Some(i) => {
                    if let Some((key, body)) = current.take() {
                        finish_entry(&mut out, key, &body, resource)?;
                    }
                    let key = K::parse_key(&chunk[..i])?;
                    if let Some(previous) = previous_key {
                        match K::cmp(previous, key) {
                            std::cmp::Ordering::Less => {}
                            std::cmp::Ordering::Equal => return Err(DecodeError::DuplicateKey),
                            std::cmp::Ordering::Greater => return Err(DecodeError::KeyOutOfOrder),
                        }
                    }
                    previous_key = Some(key);
                    current = Some((key, chunk[i + 1..].to_string()));
                }
                None => match current.as_mut() {
                    Some((_, body)) => {
                        body.push(',');
                        body.push_str(chunk);
                    }
                    None => return Err(DecodeError::MissingKey),
                },
            }
        }
        if let Some((key, body)) = current {
            finish_entry(&mut out, key, &body, resource)?;
        }
        Ok(out)
    }
}

fn finish_entry<K, V>(
    out: &mut NestedContainer<K, V>,
    key: K::Element,
    body: &str,
    resource: &MemoryResource,
) -> Result<(), DecodeError>
where
    K: KeyCodec,
    V: SetOps + DecodeSet,
{
    if body.is_empty() {
        return Err(DecodeError::EmptyChunk);
    }
    let inner = V::decode_with(body, resource)?;
    out.insert_set(key, inner)?;
    Ok(())
}

impl<T, S> Encode for BoundaryContainer<T, S>
where
    T: SetTraits + DiscreteTraits,
    T::Element: fmt::Display,
    S: BoundaryStorage<T>,
{
    fn encode_into(&self, out: &mut String) {
        encode_set(self, out);
    }
}

impl<T, S> Encode for IntervalContainer<T, S>
where
    T: SetTraits + DiscreteTraits,
    T::Element: fmt::Display,
    S: BoundaryStorage<T>,
{
    fn encode_into(&self, out: &mut String) {
        encode_set(self.as_boundary(), out);
    }
}

impl<K, V> Encode for NestedContainer<K, V>
where
    K: KeyCodec,
    V: SetOps + Encode,
{
    fn encode_into(&self, out: &mut String) {
        for (index, (key, inner)) in self.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            K::encode_key(key, out);
            out.push(':');
            inner.encode_into(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = PrimTraits<u64>;
    type BSet = BoundaryContainer<T>;
    type Nested = NestedContainer<CharTraits, BSet>;

    #[test]
    fn encode_singletons_and_ranges() {
        let mut set = BSet::new();
        set.inplace_union(3, 5).unwrap();
        set.inplace_union(7, 8).unwrap();
        assert_eq!(set.encode(), "3-4,7");
        assert_eq!(BSet::new().encode(), "");
    }

    #[test]
    fn decode_inclusive_ends() {
        let set: BSet = decode("3-4,7").unwrap();
        assert!(set.contains(3));
        assert!(set.contains(4));
        assert!(!set.contains(5));
        assert!(set.contains(7));
    }

    #[test]
    fn decode_merges_adjacent_intervals() {
        let set: BSet = decode("1-4,5-9").unwrap();
        assert_eq!(set.interval_count(), 1);
        assert_eq!(set.encode(), "1-9");
    }

    #[test]
    fn decode_rejects_bad_shapes() {
        assert!(matches!(
            decode::<BSet>("1-x"),
            Err(DecodeError::InvalidNumber(_))
        ));
        assert!(matches!(
            decode::<BSet>("9-3"),
            Err(DecodeError::ReversedInterval)
        ));
        assert!(matches!(
            decode::<BSet>("5-9,1-2"),
            Err(DecodeError::OutOfOrder)
        ));
        assert!(matches!(decode::<BSet>("1,,2"), Err(DecodeError::EmptyChunk)));
        assert!(matches!(decode::<BSet>("1,"), Err(DecodeError::EmptyChunk)));
        assert!(matches!(
            decode::<BSet>("18446744073709551615"),
            Err(DecodeError::OutOfRange)
        ));
    }

    #[test]
    fn nested_round_trip() {
        let text = "a:3-4,b:3,5";
        let set: Nested = decode(text).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get('a').map_or(false, |s| s.contains(3) && s.contains(4)));
        assert!(set.get('b').map_or(false, |s| s.contains(3) && s.contains(5)));
        assert_eq!(set.encode(), text);
    }

    #[test]
    fn nested_rejects_bad_keys() {
        assert!(matches!(
            decode::<Nested>("3-4,b:5"),
            Err(DecodeError::MissingKey)
        ));
        assert!(matches!(
            decode::<Nested>("b:1,a:2"),
            Err(DecodeError::KeyOutOfOrder)
        ));
        assert!(matches!(
            decode::<Nested>("a:1,a:2"),
            Err(DecodeError::DuplicateKey)
        ));
        assert!(matches!(
            decode::<Nested>("ab:1"),
            Err(DecodeError::InvalidKey(_))
        ));
        assert!(matches!(decode::<Nested>("a:"), Err(DecodeError::EmptyChunk)));
    }

    #[test]
    fn empty_text_is_the_empty_set() {
        assert!(decode::<BSet>("").unwrap().is_empty());
        assert!(decode::<Nested>("").unwrap().is_empty());
    }
}
