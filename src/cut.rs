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

//! Boundary markers over an ordered domain.
//!
//! A [`Cut`] splits an ordered domain into the values lying below it and
//! the values lying at or above it, either at a finite endpoint or at one
//! of the two infinities. Cuts are totally ordered, which is what lets a
//! range be a plain pair of cuts and a range map key its entries by the
//! lower cut of each stored range.

use std::cmp::Ordering;
use std::fmt;

/// A boundary in an ordered domain.
///
/// The total order places `BelowAll` below everything and `AboveAll`
/// above everything. Finite cuts compare by endpoint; at an equal
/// endpoint the cut just below the value sorts before the cut just above
/// it, so a closed lower bound `[v` sorts before an open one `(v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Cut<T> {
    /// Below every value of the domain.
    BelowAll,
    /// Just below `v`; every value `>= v` lies above this cut.
    Below(T),
    /// Just above `v`; every value `> v` lies above this cut.
    Above(T),
    /// Above every value of the domain.
    AboveAll,
}

impl<T: Ord> Cut<T> {
    /// Returns `true` if this cut lies strictly below `value`.
    pub(crate) fn is_less_than(&self, value: &T) -> bool {
        match self {
            Cut::BelowAll => true,
            Cut::Below(v) => v <= value,
            Cut::Above(v) => v < value,
            Cut::AboveAll => false,
        }
    }
}

impl<T> Cut<T> {
    /// Returns the finite endpoint of the cut, if it has one.
    pub(crate) fn endpoint(&self) -> Option<&T> {
        match self {
            Cut::Below(v) | Cut::Above(v) => Some(v),
            Cut::BelowAll | Cut::AboveAll => None,
        }
    }
}

impl<T: fmt::Display> Cut<T> {
    /// Renders the cut as the lower side of a range: `[v`, `(v` or `(-∞`.
    ///
    /// # Panics
    ///
    /// Panics on `AboveAll`, which can never bound a range from below.
    pub(crate) fn fmt_as_lower_bound(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cut::BelowAll => write!(f, "(-\u{221e}"),
            Cut::Below(v) => write!(f, "[{v}"),
            Cut::Above(v) => write!(f, "({v}"),
            Cut::AboveAll => panic!("called `fmt_as_lower_bound` on `Cut::AboveAll`"),
        }
    }

    /// Renders the cut as the upper side of a range: `v)`, `v]` or `+∞)`.
    ///
    /// # Panics
    ///
    /// Panics on `BelowAll`, which can never bound a range from above.
    pub(crate) fn fmt_as_upper_bound(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cut::BelowAll => panic!("called `fmt_as_upper_bound` on `Cut::BelowAll`"),
            Cut::Below(v) => write!(f, "{v})"),
            Cut::Above(v) => write!(f, "{v}]"),
            Cut::AboveAll => write!(f, "+\u{221e})"),
        }
    }
}

impl<T: Ord> Ord for Cut<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cut::BelowAll, Cut::BelowAll) => Ordering::Equal,
            (Cut::BelowAll, _) => Ordering::Less,
            (_, Cut::BelowAll) => Ordering::Greater,
            (Cut::AboveAll, Cut::AboveAll) => Ordering::Equal,
            (Cut::AboveAll, _) => Ordering::Greater,
            (_, Cut::AboveAll) => Ordering::Less,
            (Cut::Below(a), Cut::Below(b)) => a.cmp(b),
            (Cut::Above(a), Cut::Above(b)) => a.cmp(b),
            // Equal endpoints tie-break so that `[v` sorts before `(v`.
            (Cut::Below(a), Cut::Above(b)) => a.cmp(b).then(Ordering::Less),
            (Cut::Above(a), Cut::Below(b)) => a.cmp(b).then(Ordering::Greater),
        }
    }
}

impl<T: Ord> PartialOrd for Cut<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
