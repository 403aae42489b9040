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

//! Immutable ranges over an ordered key type.
//!
//! A [`Range`] is a pair of boundary cuts over any `Ord` type, covering
//! every combination of open, closed and unbounded sides. Ranges are
//! plain value objects: equality and hashing are structural on the two
//! bounds, so `[3..3)` and `(3..3]` are distinct even though both are
//! empty, and `[1..4)` and `(0..4)` over integers are distinct even
//! though they contain the same integer values. No discrete-domain
//! canonicalization is performed.

use crate::cut::Cut;
use num_traits::PrimInt;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Bound;

/// The error type for range constructions with unusable endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRangeError<T> {
    /// The lower endpoint was greater than the upper endpoint.
    InvertedBounds {
        /// The lower endpoint supplied by the caller.
        lower: T,
        /// The upper endpoint supplied by the caller.
        upper: T,
    },
    /// A fully open range with equal endpoints contains nothing and has
    /// no valid representation.
    EmptyOpenRange {
        /// The endpoint supplied for both sides.
        endpoint: T,
    },
}

impl<T: fmt::Display> fmt::Display for InvalidRangeError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedBounds { lower, upper } => {
                write!(
                    f,
                    "invalid range: lower endpoint {lower} exceeds upper endpoint {upper}"
                )
            }
            Self::EmptyOpenRange { endpoint } => {
                write!(
                    f,
                    "invalid range: open range ({endpoint}..{endpoint}) contains no values"
                )
            }
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for InvalidRangeError<T> {}

/// A range over an ordered key type, bounded on either side by a closed
/// endpoint, an open endpoint, or nothing at all.
///
/// # Invariants
///
/// The lower bound never exceeds the upper bound. A range whose bounds
/// coincide (such as `[a..a)`) is *empty* but still valid.
///
/// # Examples
///
/// ```rust
/// # use keyspan::range::Range;
///
/// let week = Range::closed(1, 7);
/// assert!(week.contains(&1));
/// assert!(week.contains(&7));
/// assert!(!week.contains(&8));
///
/// let rest = Range::greater_than(7);
/// assert!(week.is_connected(&rest));
/// assert_eq!(week.span(&rest), Range::at_least(1));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<T> {
    lower: Cut<T>,
    upper: Cut<T>,
}

impl<T: Ord> Range<T> {
    /// Creates a range from two cuts without re-deriving them.
    ///
    /// Callers must uphold `lower <= upper` with `lower != AboveAll` and
    /// `upper != BelowAll`; debug assertions catch violations during
    /// development.
    pub(crate) fn from_cuts(lower: Cut<T>, upper: Cut<T>) -> Self {
        debug_assert!(
            lower <= upper,
            "invalid range: lower cut must not exceed upper cut"
        );
        debug_assert!(
            !matches!(lower, Cut::AboveAll),
            "invalid range: `Cut::AboveAll` cannot bound a range from below"
        );
        debug_assert!(
            !matches!(upper, Cut::BelowAll),
            "invalid range: `Cut::BelowAll` cannot bound a range from above"
        );
        Self { lower, upper }
    }

    /// Creates the closed range `[lower..upper]`.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::closed(3, 7);
    /// assert!(r.contains(&3));
    /// assert!(r.contains(&7));
    /// ```
    pub fn closed(lower: T, upper: T) -> Self {
        assert!(
            lower <= upper,
            "invalid range: lower endpoint must not exceed upper endpoint"
        );
        Self::from_cuts(Cut::Below(lower), Cut::Above(upper))
    }

    /// Creates the closed range `[lower..upper]` if the endpoints are
    /// usable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// assert!(Range::try_closed(3, 7).is_ok());
    /// assert!(Range::try_closed(7, 3).is_err());
    /// ```
    pub fn try_closed(lower: T, upper: T) -> Result<Self, InvalidRangeError<T>> {
        if lower > upper {
            return Err(InvalidRangeError::InvertedBounds { lower, upper });
        }
        Ok(Self::from_cuts(Cut::Below(lower), Cut::Above(upper)))
    }

    /// Creates the open range `(lower..upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `lower >= upper`; an open range with equal endpoints has
    /// no valid representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::open(3, 7);
    /// assert!(!r.contains(&3));
    /// assert!(r.contains(&4));
    /// assert!(!r.contains(&7));
    /// ```
    pub fn open(lower: T, upper: T) -> Self {
        assert!(
            lower < upper,
            "invalid range: an open range requires `lower < upper`"
        );
        Self::from_cuts(Cut::Above(lower), Cut::Below(upper))
    }

    /// Creates the open range `(lower..upper)` if the endpoints are
    /// usable.
    pub fn try_open(lower: T, upper: T) -> Result<Self, InvalidRangeError<T>> {
        if lower > upper {
            return Err(InvalidRangeError::InvertedBounds { lower, upper });
        }
        if lower == upper {
            return Err(InvalidRangeError::EmptyOpenRange { endpoint: lower });
        }
        Ok(Self::from_cuts(Cut::Above(lower), Cut::Below(upper)))
    }

    /// Creates the half-open range `[lower..upper)`.
    ///
    /// Equal endpoints yield an empty range.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::closed_open(3, 7);
    /// assert!(r.contains(&3));
    /// assert!(!r.contains(&7));
    /// assert!(Range::closed_open(3, 3).is_empty());
    /// ```
    pub fn closed_open(lower: T, upper: T) -> Self {
        assert!(
            lower <= upper,
            "invalid range: lower endpoint must not exceed upper endpoint"
        );
        Self::from_cuts(Cut::Below(lower), Cut::Below(upper))
    }

    /// Creates the half-open range `[lower..upper)` if the endpoints are
    /// usable.
    pub fn try_closed_open(lower: T, upper: T) -> Result<Self, InvalidRangeError<T>> {
        if lower > upper {
            return Err(InvalidRangeError::InvertedBounds { lower, upper });
        }
        Ok(Self::from_cuts(Cut::Below(lower), Cut::Below(upper)))
    }

    /// Creates the half-open range `(lower..upper]`.
    ///
    /// Equal endpoints yield an empty range.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    pub fn open_closed(lower: T, upper: T) -> Self {
        assert!(
            lower <= upper,
            "invalid range: lower endpoint must not exceed upper endpoint"
        );
        Self::from_cuts(Cut::Above(lower), Cut::Above(upper))
    }

    /// Creates the half-open range `(lower..upper]` if the endpoints are
    /// usable.
    pub fn try_open_closed(lower: T, upper: T) -> Result<Self, InvalidRangeError<T>> {
        if lower > upper {
            return Err(InvalidRangeError::InvertedBounds { lower, upper });
        }
        Ok(Self::from_cuts(Cut::Above(lower), Cut::Above(upper)))
    }

    /// Creates the range `[value..+∞)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::at_least(10);
    /// assert!(r.contains(&10));
    /// assert!(r.contains(&i32::MAX));
    /// assert!(!r.contains(&9));
    /// ```
    pub fn at_least(value: T) -> Self {
        Self::from_cuts(Cut::Below(value), Cut::AboveAll)
    }

    /// Creates the range `(-∞..value]`.
    pub fn at_most(value: T) -> Self {
        Self::from_cuts(Cut::BelowAll, Cut::Above(value))
    }

    /// Creates the range `(value..+∞)`.
    pub fn greater_than(value: T) -> Self {
        Self::from_cuts(Cut::Above(value), Cut::AboveAll)
    }

    /// Creates the range `(-∞..value)`.
    pub fn less_than(value: T) -> Self {
        Self::from_cuts(Cut::BelowAll, Cut::Below(value))
    }

    /// Creates the range `(-∞..+∞)` containing every value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// assert!(Range::all().contains(&i64::MIN));
    /// assert!(Range::all().contains(&i64::MAX));
    /// ```
    pub fn all() -> Self {
        Self::from_cuts(Cut::BelowAll, Cut::AboveAll)
    }

    /// Creates the range `[value..value]` containing exactly one value.
    pub fn singleton(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_cuts(Cut::Below(value.clone()), Cut::Above(value))
    }

    /// Creates the minimal closed range enclosing every yielded value,
    /// or `None` if the source is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::enclose_all([5, 1, 9, 3]).unwrap();
    /// assert_eq!(r, Range::closed(1, 9));
    /// assert_eq!(Range::enclose_all(Vec::<i32>::new()), None);
    /// ```
    pub fn enclose_all<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let mut min = first.clone();
        let mut max = first;
        for value in iter {
            if value < min {
                min = value;
            } else if value > max {
                max = value;
            }
        }
        Some(Self::closed(min, max))
    }

    /// Returns `true` if `value` lies within the range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::open_closed(3, 7);
    /// assert!(!r.contains(&3));
    /// assert!(r.contains(&7));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.lower.is_less_than(value) && !self.upper.is_less_than(value)
    }

    /// Returns `true` if every yielded value lies within the range.
    ///
    /// Vacuously true for an empty source; short-circuits on the first
    /// value outside the range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::closed(0, 10);
    /// assert!(r.contains_all(&[0, 5, 10]));
    /// assert!(!r.contains_all(&[5, 11]));
    /// assert!(r.contains_all(&[]));
    /// ```
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Returns `true` if the bounds of `other` never extend beyond the
    /// bounds of `self`.
    ///
    /// Enclosure is non-strict on both sides and forms a partial order:
    /// reflexive, antisymmetric and transitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let outer = Range::closed(0, 10);
    /// assert!(outer.encloses(&Range::closed(2, 8)));
    /// assert!(outer.encloses(&outer));
    /// assert!(!outer.encloses(&Range::closed(2, 11)));
    /// // A closed bound encloses the open bound at the same endpoint.
    /// assert!(outer.encloses(&Range::open(0, 10)));
    /// assert!(!Range::open(0, 10).encloses(&outer));
    /// ```
    pub fn encloses(&self, other: &Self) -> bool {
        self.lower <= other.lower && self.upper >= other.upper
    }

    /// Returns `true` if some range, possibly empty, is enclosed by both
    /// `self` and `other` — the two ranges overlap or abut.
    ///
    /// Connectedness is reflexive and symmetric but not transitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::closed(0, 5);
    /// assert!(r.is_connected(&Range::closed(5, 10)));   // Overlap at 5
    /// assert!(r.is_connected(&Range::open(5, 10)));     // Abut
    /// assert!(!r.is_connected(&Range::closed(6, 10)));  // Gap
    /// ```
    pub fn is_connected(&self, other: &Self) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Returns `true` if the range contains no values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// assert!(Range::closed_open(3, 3).is_empty());
    /// assert!(!Range::closed(3, 3).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    /// Returns `true` if the range is bounded from below.
    pub fn has_lower_bound(&self) -> bool {
        !matches!(self.lower, Cut::BelowAll)
    }

    /// Returns `true` if the range is bounded from above.
    pub fn has_upper_bound(&self) -> bool {
        !matches!(self.upper, Cut::AboveAll)
    }

    /// Returns the finite lower endpoint, or `None` if unbounded below.
    pub fn lower_endpoint(&self) -> Option<&T> {
        self.lower.endpoint()
    }

    /// Returns the finite upper endpoint, or `None` if unbounded above.
    pub fn upper_endpoint(&self) -> Option<&T> {
        self.upper.endpoint()
    }

    pub(crate) fn lower(&self) -> &Cut<T> {
        &self.lower
    }

    pub(crate) fn upper(&self) -> &Cut<T> {
        &self.upper
    }
}

impl<T: Ord + Clone> Range<T> {
    /// Calculates the largest range enclosed by both `self` and `other`.
    ///
    /// Returns `None` if the ranges are not connected. Connected ranges
    /// that merely abut produce an empty range, such as `[5..5)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let a = Range::closed(0, 10);
    /// let b = Range::closed(5, 15);
    /// assert_eq!(a.intersection(&b), Some(Range::closed(5, 10)));
    ///
    /// assert_eq!(a.intersection(&Range::closed(12, 15)), None);
    ///
    /// // Abutting ranges intersect in an empty range.
    /// let touch = a.intersection(&Range::open(10, 15)).unwrap();
    /// assert!(touch.is_empty());
    ///
    /// // `all()` is the identity.
    /// assert_eq!(a.intersection(&Range::all()), Some(a));
    /// ```
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.is_connected(other) {
            return None;
        }
        let lower = std::cmp::max(&self.lower, &other.lower).clone();
        let upper = std::cmp::min(&self.upper, &other.upper).clone();
        Some(Self::from_cuts(lower, upper))
    }

    /// Calculates the minimal range enclosing both `self` and `other`.
    ///
    /// Always defined, even for disconnected ranges, in which case the
    /// result also covers the gap between them. Commutative, associative
    /// and idempotent, with `all()` as the absorbing element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let a = Range::closed(1, 3);
    /// let b = Range::closed(5, 9);
    /// assert_eq!(a.span(&b), Range::closed(1, 9));
    /// assert_eq!(a.span(&a), a);
    /// ```
    pub fn span(&self, other: &Self) -> Self {
        let lower = std::cmp::min(&self.lower, &other.lower).clone();
        let upper = std::cmp::max(&self.upper, &other.upper).clone();
        Self::from_cuts(lower, upper)
    }

    /// Calculates the maximal range lying between `self` and `other`.
    ///
    /// Returns `None` if the ranges are connected. The gap between two
    /// ranges separated by a single value is the singleton of that value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let a = Range::closed(0, 3);
    /// let b = Range::closed(7, 9);
    /// assert_eq!(a.gap(&b), Some(Range::open(3, 7)));
    /// assert_eq!(b.gap(&a), Some(Range::open(3, 7)));
    /// assert_eq!(a.gap(&Range::closed(2, 9)), None);
    /// ```
    pub fn gap(&self, other: &Self) -> Option<Self> {
        if self.is_connected(other) {
            None
        } else if self.upper < other.lower {
            Some(Self::from_cuts(self.upper.clone(), other.lower.clone()))
        } else {
            Some(Self::from_cuts(other.upper.clone(), self.lower.clone()))
        }
    }

    /// Lazily yields the values of the range in ascending order, starting
    /// at the lower endpoint and advancing with `succ`.
    ///
    /// The first value is the lower endpoint itself for a closed lower
    /// bound, or its successor for an open one. Iteration stops once a
    /// produced value falls beyond the upper bound; a range without an
    /// upper bound yields values endlessly. `succ` is not consulted after
    /// the value at a closed upper endpoint has been yielded, so a range
    /// may end at the last value of its domain. The iterator borrows the
    /// range, so enumeration can be restarted at will.
    ///
    /// # Panics
    ///
    /// Panics if the range has no lower bound to start from.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let r = Range::open_closed(2, 5);
    /// let vals: Vec<_> = r.values(|v| v + 1).collect();
    /// assert_eq!(vals, vec![3, 4, 5]);
    ///
    /// let endless = Range::at_least(0);
    /// let vals: Vec<_> = endless.values(|v| v + 10).take(3).collect();
    /// assert_eq!(vals, vec![0, 10, 20]);
    /// ```
    pub fn values<F>(&self, mut succ: F) -> RangeValues<'_, T, F>
    where
        F: FnMut(&T) -> T,
    {
        let start = match &self.lower {
            Cut::BelowAll => {
                panic!("called `Range::values` on a range without a lower bound")
            }
            Cut::Below(v) => v.clone(),
            Cut::Above(v) => succ(v),
            Cut::AboveAll => unreachable!("range invariant: lower bound is never `AboveAll`"),
        };
        RangeValues {
            upper: &self.upper,
            next: Some(start),
            succ,
        }
    }
}

impl<T: PrimInt> Range<T> {
    /// Iterates the integer values contained in the range in ascending
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if the range has no lower bound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keyspan::range::Range;
    ///
    /// let vals: Vec<_> = Range::closed_open(1, 5).iter().collect();
    /// assert_eq!(vals, vec![1, 2, 3, 4]);
    /// ```
    pub fn iter(&self) -> RangeValues<'_, T, fn(&T) -> T> {
        let succ: fn(&T) -> T = |v| *v + T::one();
        self.values(succ)
    }
}

/// A lazy iterator over the values of a [`Range`], produced by
/// [`Range::values`].
#[derive(Debug, Clone)]
pub struct RangeValues<'a, T, F> {
    upper: &'a Cut<T>,
    next: Option<T>,
    succ: F,
}

impl<T, F> Iterator for RangeValues<'_, T, F>
where
    T: Ord,
    F: FnMut(&T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.upper.is_less_than(&current) {
            return None;
        }
        // At a closed upper endpoint the yielded value is the last one,
        // so the successor is never asked to advance past the end of the
        // domain.
        let at_end = matches!(self.upper, Cut::Above(v) if *v == current);
        if !at_end {
            self.next = Some((self.succ)(&current));
        }
        Some(current)
    }
}

impl<T, F> FusedIterator for RangeValues<'_, T, F>
where
    T: Ord,
    F: FnMut(&T) -> T,
{
}

impl<T: fmt::Debug> fmt::Debug for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lower.fmt_as_lower_bound(f)?;
        write!(f, "..")?;
        self.upper.fmt_as_upper_bound(f)
    }
}

impl<T> std::ops::RangeBounds<T> for Range<T> {
    fn start_bound(&self) -> Bound<&T> {
        match &self.lower {
            Cut::BelowAll => Bound::Unbounded,
            Cut::Below(v) => Bound::Included(v),
            Cut::Above(v) => Bound::Excluded(v),
            Cut::AboveAll => unreachable!("range invariant: lower bound is never `AboveAll`"),
        }
    }

    fn end_bound(&self) -> Bound<&T> {
        match &self.upper {
            Cut::BelowAll => unreachable!("range invariant: upper bound is never `BelowAll`"),
            Cut::Below(v) => Bound::Excluded(v),
            Cut::Above(v) => Bound::Included(v),
            Cut::AboveAll => Bound::Unbounded,
        }
    }
}

impl<T: Ord> From<std::ops::Range<T>> for Range<T> {
    /// Converts `start..end` into the half-open range `[start..end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    fn from(range: std::ops::Range<T>) -> Self {
        Self::closed_open(range.start, range.end)
    }
}

impl<T: Ord> From<std::ops::RangeInclusive<T>> for Range<T> {
    /// Converts `start..=end` into the closed range `[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Self::closed(start, end)
    }
}

impl<T: Ord> From<std::ops::RangeFrom<T>> for Range<T> {
    fn from(range: std::ops::RangeFrom<T>) -> Self {
        Self::at_least(range.start)
    }
}

impl<T: Ord> From<std::ops::RangeTo<T>> for Range<T> {
    fn from(range: std::ops::RangeTo<T>) -> Self {
        Self::less_than(range.end)
    }
}

impl<T: Ord> From<std::ops::RangeToInclusive<T>> for Range<T> {
    fn from(range: std::ops::RangeToInclusive<T>) -> Self {
        Self::at_most(range.end)
    }
}

impl<T: Ord> From<std::ops::RangeFull> for Range<T> {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::all()
    }
}
