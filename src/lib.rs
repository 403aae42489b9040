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

//! # Keyspan
//!
//! Range primitives over ordered keys and a range-to-value map that keeps
//! its stored ranges disjoint. The crate provides the building blocks for
//! code that reasons about contiguous spans of an ordered domain: version
//! windows, time slices, address regions, or any other `Ord` key.
//!
//! ## Modules
//!
//! - `range`: The immutable [`range::Range`] value type over any ordered
//!   key, with open/closed/unbounded bound combinations, containment and
//!   enclosure queries, intersection, span, gap computation, and lazy
//!   enumeration of the contained values.
//! - `map`: [`map::TreeRangeMap`], an ordered map from disjoint ranges to
//!   values. Inserting an overlapping range splits or overwrites the
//!   existing coverage, removal truncates at the boundaries, and
//!   [`map::SubRangeMap`] offers a live view restricted to a bounding
//!   range.
//!
//! ## Purpose
//!
//! Interval bookkeeping is easy to get subtly wrong at the boundaries.
//! These types centralize the boundary-cut arithmetic once, behind small
//! value-semantics APIs, so higher-level code never compares endpoints by
//! hand.
//!
//! Refer to each module for detailed APIs and examples.

mod cut;
pub mod map;
pub mod range;
