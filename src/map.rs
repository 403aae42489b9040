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

//! A map from disjoint key ranges to values.
//!
//! [`TreeRangeMap`] stores `(Range, value)` entries in a `BTreeMap` keyed
//! by each range's lower cut. The stored ranges are pairwise disjoint and
//! non-empty at all times: inserting a range first removes whatever it
//! overlaps, splitting boundary entries as needed, so later insertions
//! always win. Removal truncates entries straddling the removed span and
//! re-inserts their surviving fragments.
//!
//! [`SubRangeMap`] is a live view of a `TreeRangeMap` restricted to a
//! bounding range. It owns no storage; every operation validates or
//! intersects against the bound and delegates to the backing map. The
//! borrow checker keeps the view and the backing map consistent: while a
//! view or an iterator exists, the map cannot be mutated behind its back.

use crate::cut::Cut;
use crate::range::Range;
use smallvec::SmallVec;
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::ops::Bound;

/// The error type for sub-range-map insertions escaping the view bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfBoundsError<K> {
    /// The bounding range of the view.
    pub bound: Range<K>,
    /// The range the caller attempted to insert.
    pub range: Range<K>,
}

impl<K: fmt::Display> fmt::Display for OutOfBoundsError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "range {} extends beyond the sub-range map bound {}",
            self.range, self.bound
        )
    }
}

impl<K: fmt::Debug + fmt::Display> std::error::Error for OutOfBoundsError<K> {}

/// One stored entry: a range and the value mapped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangeValue<K, V> {
    range: Range<K>,
    value: V,
}

/// An ordered map from disjoint, non-empty ranges to values.
///
/// Keys are located with a floor lookup on the lower cut of each stored
/// range, so point queries, insertions and removals all run in
/// `O(log n)` plus the size of the touched coverage.
///
/// # Examples
///
/// ```rust
/// # use keyspan::map::TreeRangeMap;
/// # use keyspan::range::Range;
///
/// let mut map = TreeRangeMap::new();
/// map.put(Range::closed(1, 10), "a");
/// map.put(Range::closed(4, 6), "b");
///
/// // The later insertion split the earlier coverage.
/// assert_eq!(map.get(&2), Some(&"a"));
/// assert_eq!(map.get(&5), Some(&"b"));
/// assert_eq!(map.get(&8), Some(&"a"));
/// assert_eq!(map.len(), 3);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct TreeRangeMap<K, V> {
    entries_by_lower_bound: BTreeMap<Cut<K>, RangeValue<K, V>>,
}

impl<K, V> TreeRangeMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries_by_lower_bound: BTreeMap::new(),
        }
    }

    /// Returns the number of stored disjoint ranges.
    pub fn len(&self) -> usize {
        self.entries_by_lower_bound.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries_by_lower_bound.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries_by_lower_bound.clear();
    }

    /// Iterates the stored `(range, value)` entries in ascending order of
    /// their lower bounds.
    ///
    /// The yielded ranges are exactly the disjoint, non-empty ranges the
    /// map currently covers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::closed(5, 9), 'b');
    /// map.put(Range::closed(0, 3), 'a');
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(
    ///     entries,
    ///     vec![(&Range::closed(0, 3), &'a'), (&Range::closed(5, 9), &'b')]
    /// );
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries_by_lower_bound.values(),
        }
    }
}

impl<K, V> TreeRangeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    /// Returns the value mapped to the range containing `key`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::open(10, 20), "window");
    /// assert_eq!(map.get(&15), Some(&"window"));
    /// assert_eq!(map.get(&10), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_entry(key).map(|(_, value)| value)
    }

    /// Returns the stored range containing `key` together with its value,
    /// if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::closed(1, 5), "a");
    /// assert_eq!(map.get_entry(&3), Some((&Range::closed(1, 5), &"a")));
    /// assert_eq!(map.get_entry(&6), None);
    /// ```
    pub fn get_entry(&self, key: &K) -> Option<(&Range<K>, &V)> {
        // Floor lookup: the candidate is the entry with the greatest
        // lower cut at or below `[key`.
        let probe = Cut::Below(key.clone());
        let (_, entry) = self.entries_by_lower_bound.range(..=&probe).next_back()?;
        if entry.range.contains(key) {
            Some((&entry.range, &entry.value))
        } else {
            None
        }
    }

    /// Maps `range` to `value`, overwriting any overlapping coverage.
    ///
    /// Entries partially overlapped by `range` are split at its bounds;
    /// their out-of-range fragments survive. Inserting an empty range is
    /// a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::closed(1, 10), "a");
    /// map.put(Range::closed(4, 6), "b");
    ///
    /// let entries: Vec<_> = map.iter().map(|(r, v)| (r.clone(), *v)).collect();
    /// assert_eq!(
    ///     entries,
    ///     vec![
    ///         (Range::closed_open(1, 4), "a"),
    ///         (Range::closed(4, 6), "b"),
    ///         (Range::open_closed(6, 10), "a"),
    ///     ]
    /// );
    /// ```
    pub fn put(&mut self, range: Range<K>, value: V) {
        if range.is_empty() {
            return;
        }
        self.remove(&range);
        let lower = range.lower().clone();
        self.entries_by_lower_bound
            .insert(lower, RangeValue { range, value });
    }

    /// Copies every entry of `other` into `self` with [`put`] semantics.
    ///
    /// [`put`]: TreeRangeMap::put
    pub fn put_all(&mut self, other: &TreeRangeMap<K, V>) {
        for (range, value) in other.iter() {
            self.put(range.clone(), value.clone());
        }
    }

    /// Removes all coverage of `range`, truncating entries that straddle
    /// its bounds.
    ///
    /// Removing an empty range is a no-op; removal is idempotent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::closed(1, 10), "a");
    /// map.remove(&Range::closed(4, 6));
    ///
    /// let entries: Vec<_> = map.iter().map(|(r, v)| (r.clone(), *v)).collect();
    /// assert_eq!(
    ///     entries,
    ///     vec![
    ///         (Range::closed_open(1, 4), "a"),
    ///         (Range::open_closed(6, 10), "a"),
    ///     ]
    /// );
    /// ```
    pub fn remove(&mut self, range: &Range<K>) {
        if range.is_empty() {
            return;
        }

        let lower = range.lower();
        let upper = range.upper();

        // An entry straddling the lower bound keeps its head and, when it
        // also extends past the upper bound, its tail. The head is keyed
        // at the entry's original lower cut and replaces it.
        let straddles_lower = self
            .entries_by_lower_bound
            .range(..lower)
            .next_back()
            .map(|(_, entry)| (entry.range.clone(), entry.value.clone()));
        if let Some((entry_range, value)) = straddles_lower {
            if entry_range.upper() > lower {
                if entry_range.upper() > upper {
                    self.put_fragment(upper.clone(), entry_range.upper().clone(), value.clone());
                }
                self.put_fragment(entry_range.lower().clone(), lower.clone(), value);
            }
        }

        // An entry straddling the upper bound keeps its tail. This runs
        // against the already-truncated state, so a single entry covering
        // the whole removed span is not split twice.
        let straddles_upper = self
            .entries_by_lower_bound
            .range(..upper)
            .next_back()
            .map(|(_, entry)| (entry.range.clone(), entry.value.clone()));
        if let Some((entry_range, value)) = straddles_upper {
            if entry_range.upper() > upper {
                self.put_fragment(upper.clone(), entry_range.upper().clone(), value);
            }
        }

        // Every entry whose lower cut falls inside the removed span is
        // now fully covered by it; drop them all.
        let doomed: SmallVec<[Cut<K>; 4]> = self
            .entries_by_lower_bound
            .range((Bound::Included(lower), Bound::Excluded(upper)))
            .map(|(cut, _)| cut.clone())
            .collect();
        for cut in &doomed {
            self.entries_by_lower_bound.remove(cut);
        }
    }

    /// Inserts the entry `(lower, upper) -> value` keyed at `lower`,
    /// skipping empty fragments.
    fn put_fragment(&mut self, lower: Cut<K>, upper: Cut<K>, value: V) {
        if lower < upper {
            let range = Range::from_cuts(lower.clone(), upper);
            self.entries_by_lower_bound
                .insert(lower, RangeValue { range, value });
        }
    }

    /// Returns the minimal range enclosing every stored range, or `None`
    /// if the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// assert_eq!(map.span(), None);
    ///
    /// map.put(Range::closed(1, 3), 'x');
    /// map.put(Range::closed(5, 9), 'y');
    /// assert_eq!(map.span(), Some(Range::closed(1, 9)));
    /// ```
    pub fn span(&self) -> Option<Range<K>> {
        let (_, first) = self.entries_by_lower_bound.iter().next()?;
        let (_, last) = self.entries_by_lower_bound.iter().next_back()?;
        Some(Range::from_cuts(
            first.range.lower().clone(),
            last.range.upper().clone(),
        ))
    }

    /// Returns a live view of this map restricted to `bound`.
    ///
    /// The view reads and writes through to this map; for
    /// `Range::all()` as the bound it behaves exactly like the map
    /// itself. The view borrows the map mutably, so the backing map
    /// cannot be touched while the view is alive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::closed(0, 10), "a");
    ///
    /// let mut view = map.sub_range_map(Range::closed(3, 7));
    /// view.put(Range::closed(4, 5), "b");
    /// assert_eq!(view.get(&2), None); // outside the bound
    ///
    /// assert_eq!(map.get(&2), Some(&"a"));
    /// assert_eq!(map.get(&4), Some(&"b"));
    /// ```
    pub fn sub_range_map(&mut self, bound: Range<K>) -> SubRangeMap<'_, K, V> {
        SubRangeMap { map: self, bound }
    }
}

impl<K, V> Default for TreeRangeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeRangeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries_by_lower_bound
                    .values()
                    .map(|entry| (&entry.range, &entry.value)),
            )
            .finish()
    }
}

impl<K, V> Extend<(Range<K>, V)> for TreeRangeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (Range<K>, V)>>(&mut self, iter: I) {
        for (range, value) in iter {
            self.put(range, value);
        }
    }
}

impl<K, V> FromIterator<(Range<K>, V)> for TreeRangeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (Range<K>, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// An iterator over the entries of a [`TreeRangeMap`] in ascending order
/// of their lower bounds.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: btree_map::Values<'a, Cut<K>, RangeValue<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a Range<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.range, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|entry| (&entry.range, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> std::iter::FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a TreeRangeMap<K, V> {
    type Item = (&'a Range<K>, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the entries of a [`TreeRangeMap`].
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: btree_map::IntoValues<Cut<K>, RangeValue<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (Range<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.range, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> std::iter::FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for TreeRangeMap<K, V> {
    type Item = (Range<K>, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries_by_lower_bound.into_values(),
        }
    }
}

/// A live view of a [`TreeRangeMap`] restricted to a bounding range.
///
/// The view owns its bound and a mutable borrow of the backing map.
/// Reads intersect with the bound before delegating; writes must stay
/// within the bound.
///
/// # Examples
///
/// ```rust
/// # use keyspan::map::TreeRangeMap;
/// # use keyspan::range::Range;
///
/// let mut map = TreeRangeMap::new();
/// map.put(Range::closed(1, 5), "foo");
/// map.put(Range::open(6, 8), "bar");
/// map.put(Range::greater_than(10), "baz");
///
/// let view = map.sub_range_map(Range::closed(3, 12));
/// let coverage: Vec<_> = view.iter().collect();
/// assert_eq!(
///     coverage,
///     vec![
///         (Range::closed(3, 5), &"foo"),
///         (Range::open(6, 8), &"bar"),
///         (Range::open_closed(10, 12), &"baz"),
///     ]
/// );
/// ```
pub struct SubRangeMap<'a, K, V> {
    map: &'a mut TreeRangeMap<K, V>,
    bound: Range<K>,
}

impl<K, V> SubRangeMap<'_, K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    /// Returns the bounding range of this view.
    pub fn bound(&self) -> &Range<K> {
        &self.bound
    }

    /// Returns the value mapped to the range containing `key`, or `None`
    /// when `key` lies outside the bound.
    pub fn get(&self, key: &K) -> Option<&V> {
        if self.bound.contains(key) {
            self.map.get(key)
        } else {
            None
        }
    }

    /// Returns the range containing `key`, clipped to the bound, together
    /// with its value.
    pub fn get_entry(&self, key: &K) -> Option<(Range<K>, &V)> {
        if !self.bound.contains(key) {
            return None;
        }
        let (range, value) = self.map.get_entry(key)?;
        // Both ranges contain `key`, so they are connected.
        let clipped = range.intersection(&self.bound)?;
        Some((clipped, value))
    }

    /// Maps `range` to `value` through the backing map.
    ///
    /// # Panics
    ///
    /// Panics if the bound does not enclose `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// let mut view = map.sub_range_map(Range::closed(0, 10));
    /// view.put(Range::closed(2, 4), "in bounds");
    /// assert_eq!(view.get(&3), Some(&"in bounds"));
    /// ```
    pub fn put(&mut self, range: Range<K>, value: V) {
        assert!(
            self.bound.encloses(&range),
            "called `put` on a sub-range map with a range not enclosed by its bound"
        );
        self.map.put(range, value);
    }

    /// Maps `range` to `value`, or reports the escape when the bound does
    /// not enclose `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// let mut view = map.sub_range_map(Range::closed(0, 10));
    /// assert!(view.try_put(Range::closed(2, 4), "ok").is_ok());
    /// assert!(view.try_put(Range::closed(8, 12), "nope").is_err());
    /// ```
    pub fn try_put(&mut self, range: Range<K>, value: V) -> Result<(), OutOfBoundsError<K>> {
        if !self.bound.encloses(&range) {
            return Err(OutOfBoundsError {
                bound: self.bound.clone(),
                range,
            });
        }
        self.map.put(range, value);
        Ok(())
    }

    /// Removes the in-bound part of `range` from the backing map.
    pub fn remove(&mut self, range: &Range<K>) {
        if let Some(clipped) = range.intersection(&self.bound) {
            self.map.remove(&clipped);
        }
    }

    /// Removes the bound's entire coverage from the backing map.
    pub fn clear(&mut self) {
        let bound = self.bound.clone();
        self.map.remove(&bound);
    }

    /// Returns the minimal range enclosing the in-bound coverage, or
    /// `None` when nothing intersects the bound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::map::TreeRangeMap;
    /// # use keyspan::range::Range;
    ///
    /// let mut map = TreeRangeMap::new();
    /// map.put(Range::closed(0, 4), 'a');
    /// map.put(Range::closed(8, 20), 'b');
    ///
    /// let view = map.sub_range_map(Range::closed(3, 10));
    /// assert_eq!(view.span(), Some(Range::closed(3, 10)));
    /// ```
    pub fn span(&self) -> Option<Range<K>> {
        let mut entries = self.iter();
        let (first, _) = entries.next()?;
        match entries.last() {
            Some((last, _)) => Some(first.span(&last)),
            None => Some(first),
        }
    }

    /// Iterates the in-bound coverage in ascending order. Entries
    /// straddling the bound are clipped to it.
    ///
    /// Iteration starts at the bound rather than at the beginning of the
    /// backing map, so a narrow view over a large map stays cheap.
    pub fn iter(&self) -> BoundedIter<'_, K, V> {
        let entries = &self.map.entries_by_lower_bound;
        // Only the entry just below the bound can straddle its lower
        // cut; everything keyed earlier ends before the bound begins.
        let straddling = entries
            .range(..self.bound.lower())
            .next_back()
            .map(|(_, entry)| entry);
        BoundedIter {
            straddling,
            inner: entries.range((
                Bound::Included(self.bound.lower()),
                Bound::Excluded(self.bound.upper()),
            )),
            bound: &self.bound,
        }
    }
}

impl<K, V> fmt::Debug for SubRangeMap<'_, K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An iterator over the clipped in-bound entries of a [`SubRangeMap`].
pub struct BoundedIter<'a, K, V> {
    straddling: Option<&'a RangeValue<K, V>>,
    inner: btree_map::Range<'a, Cut<K>, RangeValue<K, V>>,
    bound: &'a Range<K>,
}

impl<'a, K, V> Iterator for BoundedIter<'a, K, V>
where
    K: Ord + Clone,
{
    type Item = (Range<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.straddling.take() {
                Some(entry) => entry,
                None => self.inner.next().map(|(_, entry)| entry)?,
            };
            if let Some(clipped) = entry.range.intersection(self.bound) {
                if !clipped.is_empty() {
                    return Some((clipped, &entry.value));
                }
            }
        }
    }
}

impl<K: Ord + Clone, V> std::iter::FusedIterator for BoundedIter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn entries(map: &TreeRangeMap<i32, char>) -> Vec<(Range<i32>, char)> {
        map.iter().map(|(r, v)| (r.clone(), *v)).collect()
    }

    #[test]
    fn test_empty_map() {
        let map: TreeRangeMap<i32, char> = TreeRangeMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.get(&0), None);
        assert_eq!(map.span(), None);
    }

    #[test]
    fn test_put_and_get_round_trip() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 5), 'a');

        for key in 1..=5 {
            assert_eq!(map.get(&key), Some(&'a'));
        }
        assert_eq!(map.get(&0), None);
        assert_eq!(map.get(&6), None);
    }

    #[test]
    fn test_put_empty_range_is_a_no_op() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed_open(3, 3), 'a');
        assert!(map.is_empty());
    }

    #[test]
    fn test_get_respects_open_bounds() {
        let mut map = TreeRangeMap::new();
        map.put(Range::open(10, 20), 'a');
        assert_eq!(map.get(&10), None);
        assert_eq!(map.get(&11), Some(&'a'));
        assert_eq!(map.get(&19), Some(&'a'));
        assert_eq!(map.get(&20), None);
    }

    #[test]
    fn test_get_entry() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 5), 'a');
        assert_eq!(map.get_entry(&3), Some((&Range::closed(1, 5), &'a')));
        assert_eq!(map.get_entry(&7), None);
    }

    #[test]
    fn test_later_put_wins_and_splits() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 10), 'a');
        map.put(Range::closed(4, 6), 'b');

        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(1, 4), 'a'),
                (Range::closed(4, 6), 'b'),
                (Range::open_closed(6, 10), 'a'),
            ]
        );
    }

    #[test]
    fn test_put_replacing_identical_range() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 5), 'a');
        map.put(Range::closed(1, 5), 'b');
        assert_eq!(entries(&map), vec![(Range::closed(1, 5), 'b')]);
    }

    #[test]
    fn test_put_covering_several_entries() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 2), 'a');
        map.put(Range::closed(4, 6), 'b');
        map.put(Range::closed(8, 10), 'c');
        map.put(Range::closed(1, 9), 'z');

        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(0, 1), 'a'),
                (Range::closed(1, 9), 'z'),
                (Range::open_closed(9, 10), 'c'),
            ]
        );
    }

    #[test]
    fn test_remove_splits_an_enclosing_entry() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 10), 'a');
        map.remove(&Range::closed(4, 6));

        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(1, 4), 'a'),
                (Range::open_closed(6, 10), 'a'),
            ]
        );
    }

    #[test]
    fn test_remove_left_overlap() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 5), 'a');
        map.remove(&Range::closed(3, 8));
        assert_eq!(entries(&map), vec![(Range::closed_open(0, 3), 'a')]);
    }

    #[test]
    fn test_remove_right_overlap() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(5, 10), 'a');
        map.remove(&Range::closed(3, 7));
        assert_eq!(entries(&map), vec![(Range::open_closed(7, 10), 'a')]);
    }

    #[test]
    fn test_remove_fully_covering() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(5, 10), 'a');
        map.remove(&Range::closed(0, 20));
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 10), 'a');
        map.remove(&Range::closed(4, 6));
        let after_first = entries(&map);
        map.remove(&Range::closed(4, 6));
        assert_eq!(entries(&map), after_first);
    }

    #[test]
    fn test_remove_empty_range_is_a_no_op() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 10), 'a');
        map.remove(&Range::closed_open(5, 5));
        assert_eq!(entries(&map), vec![(Range::closed(1, 10), 'a')]);
    }

    #[test]
    fn test_remove_across_several_entries() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 2), 'a');
        map.put(Range::closed(4, 6), 'b');
        map.put(Range::closed(8, 10), 'c');
        map.remove(&Range::closed(1, 9));

        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(0, 1), 'a'),
                (Range::open_closed(9, 10), 'c'),
            ]
        );
    }

    #[test]
    fn test_stored_ranges_stay_pairwise_disjoint() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 10), 'a');
        map.put(Range::closed(5, 15), 'b');
        map.put(Range::closed(3, 7), 'c');
        map.remove(&Range::closed(6, 6));

        let ranges: Vec<Range<i32>> = map.iter().map(|(r, _)| r.clone()).collect();
        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                let overlap = a
                    .intersection(b)
                    .map(|r| !r.is_empty())
                    .unwrap_or(false);
                assert!(!overlap, "ranges {a} and {b} overlap");
            }
        }
    }

    #[test]
    fn test_span() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 3), 'x');
        map.put(Range::closed(5, 9), 'y');
        assert_eq!(map.span(), Some(Range::closed(1, 9)));

        map.put(Range::greater_than(20), 'z');
        assert_eq!(map.span(), Some(Range::at_least(1)));
    }

    #[test]
    fn test_clear() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 3), 'x');
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.span(), None);
    }

    #[test]
    fn test_put_all() {
        let mut left = TreeRangeMap::new();
        left.put(Range::closed(0, 10), 'a');

        let mut right = TreeRangeMap::new();
        right.put(Range::closed(5, 7), 'b');

        left.put_all(&right);
        assert_eq!(
            entries(&left),
            vec![
                (Range::closed_open(0, 5), 'a'),
                (Range::closed(5, 7), 'b'),
                (Range::open_closed(7, 10), 'a'),
            ]
        );
    }

    #[test]
    fn test_from_iterator_applies_put_semantics() {
        let map: TreeRangeMap<i32, char> = vec![
            (Range::closed(1, 10), 'a'),
            (Range::closed(4, 6), 'b'),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&5), Some(&'b'));
    }

    #[test]
    fn test_iter_is_ordered_and_double_ended() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(5, 9), 'b');
        map.put(Range::closed(0, 3), 'a');
        map.put(Range::closed(11, 12), 'c');

        let mut iter = map.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some((&Range::closed(0, 3), &'a')));
        assert_eq!(iter.next_back(), Some((&Range::closed(11, 12), &'c')));
        assert_eq!(iter.next(), Some((&Range::closed(5, 9), &'b')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_into_iter() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 3), 'a');
        map.put(Range::closed(5, 9), 'b');

        let owned: Vec<_> = map.into_iter().collect();
        assert_eq!(
            owned,
            vec![(Range::closed(0, 3), 'a'), (Range::closed(5, 9), 'b')]
        );
    }

    #[test]
    fn test_unbounded_entries() {
        let mut map = TreeRangeMap::new();
        map.put(Range::less_than(0), 'n');
        map.put(Range::at_least(100), 'p');

        assert_eq!(map.get(&i32::MIN), Some(&'n'));
        assert_eq!(map.get(&-1), Some(&'n'));
        assert_eq!(map.get(&0), None);
        assert_eq!(map.get(&i32::MAX), Some(&'p'));
        assert_eq!(map.span(), Some(Range::all()));
    }

    #[test]
    fn test_debug_output() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 2), 'a');
        let rendered = format!("{map:?}");
        assert!(rendered.contains("Below"), "unexpected debug: {rendered}");
    }

    #[test]
    fn test_sub_range_map_get() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 10), 'a');

        let view = map.sub_range_map(Range::closed(3, 7));
        assert_eq!(view.get(&5), Some(&'a'));
        assert_eq!(view.get(&2), None);
        assert_eq!(view.get(&8), None);
    }

    #[test]
    fn test_sub_range_map_get_entry_clips() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 10), 'a');

        let view = map.sub_range_map(Range::closed(3, 7));
        assert_eq!(view.get_entry(&5), Some((Range::closed(3, 7), &'a')));
    }

    #[test]
    fn test_sub_range_map_put_within_bound() {
        let mut map = TreeRangeMap::new();
        {
            let mut view = map.sub_range_map(Range::closed(0, 10));
            view.put(Range::closed(2, 4), 'a');
        }
        assert_eq!(map.get(&3), Some(&'a'));
    }

    #[test]
    #[should_panic(expected = "not enclosed by its bound")]
    fn test_sub_range_map_put_out_of_bounds_panics() {
        let mut map: TreeRangeMap<i32, char> = TreeRangeMap::new();
        let mut view = map.sub_range_map(Range::closed(0, 10));
        view.put(Range::closed(8, 12), 'a');
    }

    #[test]
    fn test_sub_range_map_try_put() {
        let mut map: TreeRangeMap<i32, char> = TreeRangeMap::new();
        let mut view = map.sub_range_map(Range::closed(0, 10));
        assert_eq!(view.try_put(Range::closed(2, 4), 'a'), Ok(()));

        let err = view.try_put(Range::closed(8, 12), 'b').unwrap_err();
        assert_eq!(err.bound, Range::closed(0, 10));
        assert_eq!(err.range, Range::closed(8, 12));
        assert_eq!(
            format!("{err}"),
            "range [8..12] extends beyond the sub-range map bound [0..10]"
        );
    }

    #[test]
    fn test_sub_range_map_remove_clips_to_bound() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 10), 'a');
        {
            let mut view = map.sub_range_map(Range::closed(3, 7));
            // Only the in-bound part [3..8∩bound] of the request is removed.
            view.remove(&Range::closed(5, 20));
        }
        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(0, 5), 'a'),
                (Range::open_closed(7, 10), 'a'),
            ]
        );
    }

    #[test]
    fn test_sub_range_map_remove_disjoint_from_bound() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 10), 'a');
        {
            let mut view = map.sub_range_map(Range::closed(3, 7));
            view.remove(&Range::closed(20, 30));
        }
        assert_eq!(entries(&map), vec![(Range::closed(0, 10), 'a')]);
    }

    #[test]
    fn test_sub_range_map_clear() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 10), 'a');
        {
            let mut view = map.sub_range_map(Range::closed(3, 7));
            view.clear();
        }
        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(0, 3), 'a'),
                (Range::open_closed(7, 10), 'a'),
            ]
        );
    }

    #[test]
    fn test_sub_range_map_iter_clips_boundary_entries() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(1, 5), 'f');
        map.put(Range::open(6, 8), 'g');
        map.put(Range::greater_than(10), 'h');

        let view = map.sub_range_map(Range::closed(3, 12));
        let coverage: Vec<_> = view.iter().map(|(r, v)| (r, *v)).collect();
        assert_eq!(
            coverage,
            vec![
                (Range::closed(3, 5), 'f'),
                (Range::open(6, 8), 'g'),
                (Range::open_closed(10, 12), 'h'),
            ]
        );
    }

    #[test]
    fn test_sub_range_map_iter_skips_out_of_bound_entries() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 1), 'a');
        map.put(Range::closed(4, 5), 'b');
        map.put(Range::closed(8, 9), 'c');

        let view = map.sub_range_map(Range::closed(3, 6));
        let coverage: Vec<_> = view.iter().map(|(r, v)| (r, *v)).collect();
        assert_eq!(coverage, vec![(Range::closed(4, 5), 'b')]);
    }

    #[test]
    fn test_sub_range_map_iter_over_a_narrow_window_of_many_entries() {
        // A narrow bound deep inside a large map: the straddling entry
        // just below the bound is clipped in, everything before it is
        // never visited, nothing after the bound leaks through.
        let mut map = TreeRangeMap::new();
        for i in 0..20 {
            map.put(Range::closed(i * 10, i * 10 + 5), 'x');
        }

        let view = map.sub_range_map(Range::closed(92, 113));
        let coverage: Vec<_> = view.iter().map(|(r, v)| (r, *v)).collect();
        assert_eq!(
            coverage,
            vec![
                (Range::closed(92, 95), 'x'),
                (Range::closed(100, 105), 'x'),
                (Range::closed(110, 113), 'x'),
            ]
        );
        assert_eq!(view.span(), Some(Range::closed(92, 113)));
    }

    #[test]
    fn test_sub_range_map_span() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 4), 'a');
        map.put(Range::closed(8, 20), 'b');

        let view = map.sub_range_map(Range::closed(3, 10));
        assert_eq!(view.span(), Some(Range::closed(3, 10)));
    }

    #[test]
    fn test_sub_range_map_span_empty_when_nothing_in_bound() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 1), 'a');

        let view = map.sub_range_map(Range::closed(5, 9));
        assert_eq!(view.span(), None);

        let mut empty: TreeRangeMap<i32, char> = TreeRangeMap::new();
        let view = empty.sub_range_map(Range::closed(5, 9));
        assert_eq!(view.span(), None);
    }

    #[test]
    fn test_sub_range_map_with_all_behaves_like_the_map() {
        let mut map = TreeRangeMap::new();
        map.put(Range::closed(0, 4), 'a');
        {
            let mut view = map.sub_range_map(Range::all());
            view.put(Range::closed(2, 9), 'b');
            assert_eq!(view.get(&0), Some(&'a'));
            assert_eq!(view.span(), Some(Range::closed(0, 9)));
        }
        assert_eq!(
            entries(&map),
            vec![
                (Range::closed_open(0, 2), 'a'),
                (Range::closed(2, 9), 'b'),
            ]
        );
    }

    /// Pointwise reference model: applies the same operations to a plain
    /// array of per-key assignments and compares every lookup.
    #[test]
    fn test_randomized_operations_match_reference_model() {
        const KEYS: usize = 64;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut map: TreeRangeMap<i32, u8> = TreeRangeMap::new();
        let mut reference: [Option<u8>; KEYS] = [None; KEYS];

        for round in 0..500 {
            let a = rng.gen_range(0..KEYS as i32);
            let b = rng.gen_range(0..KEYS as i32);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let range = Range::closed(lo, hi);

            if rng.gen_bool(0.7) {
                let value = rng.gen_range(0..=u8::MAX);
                map.put(range, value);
                for key in lo..=hi {
                    reference[key as usize] = Some(value);
                }
            } else {
                map.remove(&range);
                for key in lo..=hi {
                    reference[key as usize] = None;
                }
            }

            for key in 0..KEYS as i32 {
                assert_eq!(
                    map.get(&key).copied(),
                    reference[key as usize],
                    "mismatch at key {key} after round {round}"
                );
            }

            // The disjointness invariant holds after every operation.
            let ranges: Vec<Range<i32>> = map.iter().map(|(r, _)| r.clone()).collect();
            for pair in ranges.windows(2) {
                let overlap = pair[0]
                    .intersection(&pair[1])
                    .map(|r| !r.is_empty())
                    .unwrap_or(false);
                assert!(!overlap, "adjacent entries overlap after round {round}");
            }
        }
    }
}
