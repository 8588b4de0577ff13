// -----------------------------------------------------------------------------
// Common methods

/// Index manipulation, bounds checking and slicing shared by every span.
///
/// The span type must have `start` and `count` fields and a
/// `from_start_unchecked(start, count)` constructor.
macro_rules! impl_span_common {
    (impl<$($gen:tt),*> $span:ty => $index:ty) => {
        impl<$($gen),*> $span {
            /// Returns the number of elements in the span.
            #[inline(always)]
            pub const fn len(&self) -> usize {
                self.count
            }

            /// Returns `true` if the span has no elements.
            #[inline(always)]
            pub const fn is_empty(&self) -> bool {
                self.count == 0
            }

            /// The position of the first element.
            #[inline(always)]
            pub const fn start_index(&self) -> $index {
                self.start
            }

            /// The position one past the last element.
            #[inline(always)]
            pub fn end_index(&self) -> $index {
                self.start.advanced_by(self.count as isize)
            }

            /// The range of valid positions, `start_index()..end_index()`.
            #[inline(always)]
            pub fn indices(&self) -> core::ops::Range<$index> {
                self.start_index()..self.end_index()
            }

            /// The position following `i`. Not validated.
            #[inline(always)]
            pub fn index_after(&self, i: $index) -> $index {
                i.advanced_by(1)
            }

            /// The position preceding `i`. Not validated.
            #[inline(always)]
            pub fn index_before(&self, i: $index) -> $index {
                i.advanced_by(-1)
            }

            /// The position `distance` steps away from `i`. Not validated.
            #[inline(always)]
            pub fn index_offset_by(&self, i: $index, distance: isize) -> $index {
                i.advanced_by(distance)
            }

            /// The signed number of steps from `start` to `end`.
            ///
            /// # Panics
            ///
            /// If the indices belong to different allocations.
            #[inline]
            #[track_caller]
            pub fn distance(&self, start: $index, end: $index) -> isize {
                start.distance_to(end)
            }

            /// Validates that `position` may be dereferenced and returns its offset.
            #[track_caller]
            pub(crate) fn checked_offset(&self, position: $index) -> usize {
                let offset = self.start.distance_to(position);
                position.assert_aligned();
                if offset < 0 || offset as usize >= self.count {
                    $crate::ContractViolation::IndexOutOfBounds {
                        offset,
                        count: self.count,
                    }
                    .handle_error();
                }
                offset as usize
            }

            /// Validates that `lower..upper` is a sub-range and returns its offsets.
            #[track_caller]
            pub(crate) fn checked_bounds(&self, lower: $index, upper: $index) -> (usize, usize) {
                let start = self.start.distance_to(lower);
                let end = self.start.distance_to(upper);
                lower.assert_aligned();
                upper.assert_aligned();
                if start < 0 || end < start || end as usize > self.count {
                    $crate::ContractViolation::RangeOutOfBounds {
                        start,
                        end,
                        count: self.count,
                    }
                    .handle_error();
                }
                (start as usize, end as usize)
            }

            /// Validates that `start..end` lies within `0..len()`.
            #[track_caller]
            pub(crate) fn checked_offsets(&self, start: usize, end: usize) {
                if start > end || end > self.count {
                    $crate::ContractViolation::RangeOutOfBounds {
                        start: $crate::violation::signed(start),
                        end: $crate::violation::signed(end),
                        count: self.count,
                    }
                    .handle_error();
                }
            }

            fn resolve_bounds(
                &self,
                bounds: impl core::ops::RangeBounds<$index>,
            ) -> ($index, $index) {
                use core::ops::Bound;

                let lower = match bounds.start_bound() {
                    Bound::Included(&i) => i,
                    Bound::Excluded(&i) => i.advanced_by(1),
                    Bound::Unbounded => self.start_index(),
                };
                let upper = match bounds.end_bound() {
                    Bound::Included(&i) => i.advanced_by(1),
                    Bound::Excluded(&i) => i,
                    Bound::Unbounded => self.end_index(),
                };
                (lower, upper)
            }

            fn resolve_offsets(
                &self,
                offsets: impl core::ops::RangeBounds<usize>,
            ) -> (usize, usize) {
                use core::ops::Bound;

                let start = match offsets.start_bound() {
                    Bound::Included(&n) => n,
                    Bound::Excluded(&n) => n.saturating_add(1),
                    Bound::Unbounded => 0,
                };
                let end = match offsets.end_bound() {
                    Bound::Included(&n) => n.saturating_add(1),
                    Bound::Excluded(&n) => n,
                    Bound::Unbounded => self.count,
                };
                (start, end)
            }

            /// Returns the sub-span covering `bounds`.
            ///
            /// O(1); nothing is copied.
            ///
            /// # Panics
            ///
            /// If `bounds` is not a sub-range of [`indices`](Self::indices), if a
            /// bound is misaligned, or if a bound belongs to another allocation.
            #[track_caller]
            pub fn extracting(self, bounds: impl core::ops::RangeBounds<$index>) -> Self {
                let (lower, upper) = self.resolve_bounds(bounds);
                let (start, end) = self.checked_bounds(lower, upper);
                Self::from_start_unchecked(lower, end - start)
            }

            /// Returns the sub-span covering `bounds` without validation.
            ///
            /// # Safety
            ///
            /// `bounds` must be a sub-range of [`indices`](Self::indices)
            /// with properly aligned bounds.
            #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
            pub unsafe fn extracting_unchecked(
                self,
                bounds: impl core::ops::RangeBounds<$index>,
            ) -> Self {
                let (lower, upper) = self.resolve_bounds(bounds);
                $crate::cfg::debug! {
                    let _ = self.checked_bounds(lower, upper);
                }
                Self::from_start_unchecked(lower, lower.distance_unchecked(upper) as usize)
            }

            /// Returns the sub-span covering the element offsets in `offsets`.
            ///
            /// # Panics
            ///
            /// If `offsets` is not within `0..len()`.
            #[track_caller]
            pub fn extracting_offsets(self, offsets: impl core::ops::RangeBounds<usize>) -> Self {
                let (start, end) = self.resolve_offsets(offsets);
                self.checked_offsets(start, end);
                Self::from_start_unchecked(self.start.advanced_by(start as isize), end - start)
            }

            /// Returns the sub-span covering `offsets` without validation.
            ///
            /// # Safety
            ///
            /// `offsets` must be within `0..len()`.
            #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
            pub unsafe fn extracting_offsets_unchecked(
                self,
                offsets: impl core::ops::RangeBounds<usize>,
            ) -> Self {
                let (start, end) = self.resolve_offsets(offsets);
                $crate::cfg::debug! {
                    self.checked_offsets(start, end);
                }
                Self::from_start_unchecked(
                    self.start.advanced_by(start as isize),
                    end.wrapping_sub(start),
                )
            }

            /// Returns the elements before `index`.
            ///
            /// # Panics
            ///
            /// If `index` is neither [`start_index`](Self::start_index) nor
            /// a position following an element of this span.
            #[track_caller]
            pub fn prefix_up_to(self, index: $index) -> Self {
                if index == self.start {
                    Self::from_start_unchecked(self.start, 0)
                } else {
                    self.prefix_through(index.advanced_by(-1))
                }
            }

            /// Returns the elements up to and including `index`.
            ///
            /// # Panics
            ///
            /// If `index` does not refer to an element of this span.
            #[track_caller]
            pub fn prefix_through(self, index: $index) -> Self {
                let offset = self.checked_offset(index);
                Self::from_start_unchecked(self.start, offset + 1)
            }

            /// Returns at most `max_len` leading elements.
            ///
            /// Saturates: a `max_len` beyond `len()` returns the whole span.
            #[inline]
            pub fn prefix(self, max_len: usize) -> Self {
                let count = if max_len < self.count { max_len } else { self.count };
                Self::from_start_unchecked(self.start, count)
            }

            /// Returns the span without its last `k` elements.
            ///
            /// Saturates: dropping more than `len()` elements returns an empty span.
            #[inline]
            pub fn drop_last(self, k: usize) -> Self {
                let count = self.count.saturating_sub(k);
                Self::from_start_unchecked(self.start, count)
            }

            /// Returns the elements from `index` to the end.
            ///
            /// # Panics
            ///
            /// If `index` is neither [`end_index`](Self::end_index) nor the
            /// position of an element of this span.
            #[track_caller]
            pub fn suffix_from(self, index: $index) -> Self {
                if index == self.end_index() {
                    return Self::from_start_unchecked(index, 0);
                }
                let offset = self.checked_offset(index);
                let count = self.count - offset;
                Self::from_start_unchecked(index, count)
            }

            /// Returns at most `max_len` trailing elements.
            ///
            /// Saturates: a `max_len` beyond `len()` returns the whole span.
            #[inline]
            pub fn suffix(self, max_len: usize) -> Self {
                let count = if max_len < self.count { max_len } else { self.count };
                let start = self.start.advanced_by((self.count - count) as isize);
                Self::from_start_unchecked(start, count)
            }

            /// Returns the span without its first `k` elements.
            ///
            /// Saturates: dropping more than `len()` elements returns an empty
            /// span positioned at [`end_index`](Self::end_index).
            #[inline]
            pub fn drop_first(self, k: usize) -> Self {
                let dropped = if k < self.count { k } else { self.count };
                let start = self.start.advanced_by(dropped as isize);
                Self::from_start_unchecked(start, self.count - dropped)
            }
        }
    };
}
