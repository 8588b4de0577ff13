use core::fmt;
use core::marker::PhantomData;
use core::slice;

use bytemuck::AnyBitPattern;

use crate::index::{RawIndex, SpanIndex, stride_of};
use crate::iter::{Iter, Loads};
use crate::raw_span::RawSpan;
use crate::span_mut::SpanMut;
use crate::trivial::BitwiseCopyable;
use crate::violation::{ContractViolation, signed};

/// Validates the parts of a view before it is built over them.
#[track_caller]
pub(crate) fn validate_raw_parts<T>(ptr: *const T, count: usize) {
    if ptr.is_null() {
        ContractViolation::NullBaseAddress.handle_error();
    }
    if (count as isize) < 0 {
        ContractViolation::NegativeCount {
            count: count as isize,
        }
        .handle_error();
    }
    let stride = stride_of::<T>();
    if count > isize::MAX as usize / stride {
        ContractViolation::CountOverflow { count, stride }.handle_error();
    }
    if !ptr.is_aligned() {
        ContractViolation::misaligned::<T>(ptr.addr()).handle_error();
    }
}

// -----------------------------------------------------------------------------
// Span

/// A read-only view over `len()` contiguous, initialized values of `T`.
///
/// The view borrows its elements from an owner for `'a` and never owns or frees
/// them. Copying a `Span` copies the `(start, count)` pair only.
///
/// Positions are [`SpanIndex`] values carrying the identity of the allocation
/// they come from. All checked accessors validate identity, alignment and
/// bounds and report violations through [`ContractViolation`]; slicing with
/// a length (`prefix`, `suffix`, `drop_first`, `drop_last`) saturates instead.
///
/// # Examples
///
/// ```
/// use sv_span::Span;
///
/// let values = [10, 20, 30, 40, 50];
/// let span = Span::new(&values);
///
/// assert_eq!(span[2], 30);
/// assert_eq!(span.prefix(2), [10, 20]);
/// assert_eq!(span.drop_last(2).len(), 3);
/// assert_eq!(span.suffix(1), [50]);
///
/// // Length-based slicing is forgiving.
/// assert_eq!(span.suffix(20).len(), 5);
/// assert!(span.drop_first(9).is_empty());
/// ```
///
/// A span keeps its owner borrowed, so the owner cannot be mutated while the
/// span is in use:
///
/// ```compile_fail
/// use sv_span::Span;
///
/// let mut values = vec![1, 2, 3];
/// let span = Span::new(&values);
/// values.push(4);
/// assert_eq!(span.len(), 3);
/// ```
///
/// Views hold raw pointers, so they are neither `Send` nor `Sync`:
///
/// ```compile_fail
/// fn is_send<T: Send>() {}
/// is_send::<sv_span::Span<'static, u8>>();
/// ```
///
/// ```compile_fail
/// fn is_sync<T: Sync>() {}
/// is_sync::<sv_span::Span<'static, u8>>();
/// ```
pub struct Span<'a, T> {
    start: SpanIndex<T>,
    count: usize,
    _marker: PhantomData<&'a [T]>,
}

impl<T> Clone for Span<'_, T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<'_, T> {}

impl_span_common!(impl<'a, T> Span<'a, T> => SpanIndex<T>);

impl<'a, T> Span<'a, T> {
    #[inline(always)]
    pub(crate) const fn from_start_unchecked(start: SpanIndex<T>, count: usize) -> Self {
        Self {
            start,
            count,
            _marker: PhantomData,
        }
    }

    /// Creates a span over the elements of `slice`.
    #[inline]
    pub const fn new(slice: &'a [T]) -> Self {
        let _ = stride_of::<T>();
        Self::from_start_unchecked(SpanIndex::from_start(slice.as_ptr()), slice.len())
    }

    /// Creates a span over `count` elements starting at `ptr`, borrowed from `owner`.
    ///
    /// The span cannot outlive the borrow of `owner`.
    ///
    /// # Panics
    ///
    /// - If `ptr` is null.
    /// - If `count` is negative once reinterpreted as a signed value, or the
    ///   region would exceed `isize::MAX` bytes.
    /// - If `ptr` is not aligned for `T`.
    ///
    /// # Safety
    ///
    /// - `ptr` must be valid for reads of `count` initialized values of `T`.
    /// - That memory must stay valid and must not be mutated for as long as
    ///   `owner` is borrowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sv_span::Span;
    ///
    /// let values = vec![1, 2, 3];
    /// let span = unsafe { Span::from_raw_parts(values.as_ptr(), values.len(), &values) };
    /// assert_eq!(span, [1, 2, 3]);
    /// ```
    #[track_caller]
    pub unsafe fn from_raw_parts<O: ?Sized>(ptr: *const T, count: usize, owner: &'a O) -> Self {
        validate_raw_parts(ptr, count);
        // SAFETY: validated above, the caller upholds the rest.
        unsafe { Self::from_raw_parts_unchecked(ptr, count, owner) }
    }

    /// Creates a span over `count` elements starting at `ptr` without validation.
    ///
    /// # Safety
    ///
    /// Same as [`from_raw_parts`](Self::from_raw_parts); in addition `ptr`
    /// must be non-null and aligned, and `count * size_of::<T>()` must not
    /// exceed `isize::MAX`.
    #[inline(always)]
    pub const unsafe fn from_raw_parts_unchecked<O: ?Sized>(
        ptr: *const T,
        count: usize,
        _owner: &'a O,
    ) -> Self {
        let _ = stride_of::<T>();
        Self::from_start_unchecked(SpanIndex::from_start(ptr), count)
    }

    /// Creates a span covering `start..end`, borrowed from `owner`.
    ///
    /// The span keeps the allocation identity of `start`.
    ///
    /// # Panics
    ///
    /// - If `start` and `end` belong to different allocations.
    /// - If `end` precedes `start`.
    /// - If `start` is misaligned.
    ///
    /// # Safety
    ///
    /// The memory between the two indices must be valid for reads of
    /// initialized `T` values for as long as `owner` is borrowed.
    #[track_caller]
    pub unsafe fn from_index_bounds<O: ?Sized>(
        start: SpanIndex<T>,
        end: SpanIndex<T>,
        _owner: &'a O,
    ) -> Self {
        let count = start.distance_to(end);
        if count < 0 {
            ContractViolation::NegativeCount { count }.handle_error();
        }
        start.assert_aligned();
        Self::from_start_unchecked(start, count as usize)
    }

    /// Returns the element at `position`.
    ///
    /// # Panics
    ///
    /// If `position` belongs to another allocation, is misaligned, or lies
    /// outside `start_index()..end_index()`.
    #[inline]
    #[track_caller]
    pub fn at(&self, position: SpanIndex<T>) -> &'a T {
        let offset = self.checked_offset(position);
        // SAFETY: `offset < count` and the span holds `count` initialized values.
        unsafe { &*self.start.as_ptr().add(offset) }
    }

    /// Returns the element at `position` without validation.
    ///
    /// # Safety
    ///
    /// `position` must come from this span's allocation and refer to one of
    /// its elements.
    #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
    #[cfg_attr(not(any(feature = "debug", debug_assertions)), inline(always))]
    pub unsafe fn at_unchecked(&self, position: SpanIndex<T>) -> &'a T {
        crate::cfg::debug! {
            let _ = self.checked_offset(position);
        }
        // SAFETY: the caller guarantees `position` refers to an element.
        unsafe { &*position.as_ptr() }
    }

    /// Returns the element `offset` positions past the start.
    ///
    /// # Panics
    ///
    /// If `offset >= len()`.
    #[inline]
    #[track_caller]
    pub fn at_offset(&self, offset: usize) -> &'a T {
        if offset >= self.count {
            ContractViolation::IndexOutOfBounds {
                offset: signed(offset),
                count: self.count,
            }
            .handle_error();
        }
        // SAFETY: checked above.
        unsafe { &*self.start.as_ptr().add(offset) }
    }

    /// Returns the element `offset` positions past the start without validation.
    ///
    /// # Safety
    ///
    /// `offset` must be less than `len()`.
    #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
    #[cfg_attr(not(any(feature = "debug", debug_assertions)), inline(always))]
    pub unsafe fn at_offset_unchecked(&self, offset: usize) -> &'a T {
        crate::cfg::debug! {
            assert!(offset < self.count, "tried to index out-of-bounds of a span");
        }
        // SAFETY: the caller guarantees `offset < count`.
        unsafe { &*self.start.as_ptr().add(offset) }
    }

    /// Returns the first element, or `None` if the span is empty.
    #[inline]
    pub fn first(&self) -> Option<&'a T> {
        // SAFETY: the span is not empty.
        (!self.is_empty()).then(|| unsafe { self.at_offset_unchecked(0) })
    }

    /// Returns the last element, or `None` if the span is empty.
    #[inline]
    pub fn last(&self) -> Option<&'a T> {
        // SAFETY: the span is not empty.
        (!self.is_empty()).then(|| unsafe { self.at_offset_unchecked(self.count - 1) })
    }

    /// Returns the elements as a slice with the span's lifetime.
    #[inline(always)]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: non-null, aligned, `count` initialized values valid for `'a`.
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.count) }
    }

    /// The address of the first element.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.start.as_ptr()
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(*self)
    }

    /// Returns `true` if every element of `self` is also an element of `other`.
    ///
    /// Compares addresses, not values, and never panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use sv_span::Span;
    ///
    /// let values = [1, 2, 3, 4, 5, 6];
    /// let span = Span::new(&values);
    /// let middle = span.extracting_offsets(1..5);
    ///
    /// assert!(middle.extracting_offsets(2..4).is_within(&middle));
    /// assert!(!span.is_within(&middle));
    /// assert_eq!(middle.extracting_offsets(2..4).indices_within(&span), Some(3..5));
    /// ```
    #[inline]
    pub fn is_within(&self, other: &Span<'_, T>) -> bool {
        self.indices_within(other).is_some()
    }

    /// Returns the offsets `self` occupies inside `other`, if it lies within it.
    pub fn indices_within(&self, other: &Span<'_, T>) -> Option<core::ops::Range<usize>> {
        let bytes = other.start.byte_distance_unchecked(self.start);
        let stride = stride_of::<T>();
        if bytes < 0 || bytes as usize % stride != 0 {
            return None;
        }
        let lower = bytes as usize / stride;
        let upper = lower.checked_add(self.count)?;
        (upper <= other.count).then_some(lower..upper)
    }

    /// Returns `true` if `self` yields the same elements as `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sv_span::Span;
    ///
    /// let span = Span::new(&[1, 2, 3]);
    /// assert!(span.elements_equal_seq([1, 2, 3]));
    /// assert!(!span.elements_equal_seq([1, 2]));
    /// assert!(!span.elements_equal_seq([1, 2, 3, 4]));
    /// ```
    pub fn elements_equal_seq<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        T: PartialEq<I::Item>,
    {
        let mut elements = self.iter();
        for item in other {
            match elements.next() {
                Some(element) if *element == item => {}
                _ => return false,
            }
        }
        elements.next().is_none()
    }
}

impl<T: PartialEq> Span<'_, T> {
    /// Returns `true` if both spans hold equal elements in the same order.
    ///
    /// Spans of different length are never equal; spans starting at the same
    /// index are equal without comparing any element.
    pub fn elements_equal(&self, other: &Span<'_, T>) -> bool {
        if self.count != other.count {
            return false;
        }
        if self.count == 0 || self.start == other.start {
            return true;
        }
        for offset in 0..self.count {
            // SAFETY: both spans hold `count` elements.
            let (lhs, rhs) = unsafe {
                (
                    self.at_offset_unchecked(offset),
                    other.at_offset_unchecked(offset),
                )
            };
            if lhs != rhs {
                return false;
            }
        }
        true
    }
}

// -----------------------------------------------------------------------------
// Trivial elements

impl<'a, T: BitwiseCopyable> Span<'a, T> {
    /// Views the same memory as `len() * size_of::<T>()` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sv_span::Span;
    ///
    /// let values = [1u16, 2, 3];
    /// let bytes = Span::new(&values).as_raw_span();
    /// assert_eq!(bytes.len(), 6);
    /// assert_eq!(bytes.load_unaligned::<u16>(2), 2);
    /// ```
    #[inline]
    pub fn as_raw_span(self) -> RawSpan<'a> {
        RawSpan::from_start_unchecked(RawIndex::from(self.start), self.count * stride_of::<T>())
    }

    /// Returns the underlying bytes.
    #[inline]
    pub fn as_bytes(self) -> &'a [u8] {
        self.as_raw_span().as_bytes()
    }

    /// Reinterprets the same memory as a span of `U`.
    ///
    /// # Panics
    ///
    /// If the byte count is not a whole number of `U`, or the start is not
    /// aligned for `U`.
    #[inline]
    #[track_caller]
    pub fn view_as<U: BitwiseCopyable>(self) -> Span<'a, U> {
        self.as_raw_span().view_as::<U>()
    }

    /// Loads a `U` from `byte_offset`; see [`RawSpan::load`].
    #[inline]
    #[track_caller]
    pub fn load<U: AnyBitPattern>(&self, byte_offset: usize) -> U {
        self.as_raw_span().load(byte_offset)
    }

    /// Loads a `U` from `byte_offset` at any alignment; see [`RawSpan::load_unaligned`].
    #[inline]
    #[track_caller]
    pub fn load_unaligned<U: AnyBitPattern>(&self, byte_offset: usize) -> U {
        self.as_raw_span().load_unaligned(byte_offset)
    }

    /// Loads a `U` from the position of an element; see [`RawSpan::load_from`].
    #[inline]
    #[track_caller]
    pub fn load_from<U: AnyBitPattern>(&self, position: SpanIndex<T>) -> U {
        self.as_raw_span().load_from(RawIndex::from(position))
    }

    /// Loads a `U` from the position of an element at any alignment.
    #[inline]
    #[track_caller]
    pub fn load_unaligned_from<U: AnyBitPattern>(&self, position: SpanIndex<T>) -> U {
        self.as_raw_span().load_unaligned_from(RawIndex::from(position))
    }

    /// Returns an iterator yielding copies of the elements.
    #[inline]
    pub fn loads(self) -> Loads<'a, T> {
        Loads::new(self)
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T> core::ops::Index<usize> for Span<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, offset: usize) -> &T {
        self.at_offset(offset)
    }
}

impl<T> core::ops::Index<SpanIndex<T>> for Span<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, position: SpanIndex<T>) -> &T {
        self.at(position)
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    #[inline]
    fn from(slice: &'a [T]) -> Self {
        Self::new(slice)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Span<'a, T> {
    #[inline]
    fn from(array: &'a [T; N]) -> Self {
        Self::new(array)
    }
}

impl<'a, T> From<SpanMut<'a, T>> for Span<'a, T> {
    #[inline]
    fn from(span: SpanMut<'a, T>) -> Self {
        span.into_span()
    }
}

impl<'a, T> IntoIterator for Span<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, T> IntoIterator for &Span<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter::new(*self)
    }
}

impl<'b, T: PartialEq> PartialEq<Span<'b, T>> for Span<'_, T> {
    #[inline]
    fn eq(&self, other: &Span<'b, T>) -> bool {
        self.elements_equal(other)
    }
}

impl<T: Eq> Eq for Span<'_, T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Span<'_, T> {
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for Span<'_, T> {
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Span<'_, T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Span;
    use crate::{RawIndex, SpanIndex};
    use std::format;

    #[test]
    fn auto_traits() {
        use core::panic::{RefUnwindSafe, UnwindSafe};

        fn is_copy<T: Copy>() {}
        fn is_unwindsafe<T: UnwindSafe>() {}
        fn is_refunwindsafe<T: RefUnwindSafe>() {}

        is_copy::<Span<'_, std::string::String>>();
        is_copy::<SpanIndex<std::string::String>>();
        is_unwindsafe::<Span<'_, i32>>();
        is_refunwindsafe::<Span<'_, i32>>();
    }

    #[test]
    fn construction() {
        let values = [7u32; 9];
        for count in 0..=values.len() {
            let span = unsafe { Span::from_raw_parts(values.as_ptr(), count, &values) };
            assert_eq!(span.len(), count);
            assert_eq!(span.is_empty(), count == 0);
            assert_eq!(span.start_index().distance_to(span.end_index()), count as isize);
        }

        let empty: [u64; 0] = [];
        let span = Span::new(&empty);
        assert!(span.is_empty());
        assert_eq!(span.first(), None);
        assert_eq!(span.last(), None);
        assert_eq!(span.indices(), span.start_index()..span.end_index());
    }

    #[test]
    fn elements_are_the_memory() {
        let values = [3i64, 1, 4, 1, 5, 9, 2, 6];
        let span = Span::new(&values);

        for (i, value) in values.iter().enumerate() {
            assert_eq!(span[i], *value);
            assert!(core::ptr::eq(span.at_offset(i), value));
            let position = span.start_index().advanced_by(i as isize);
            assert!(core::ptr::eq(span.at(position), value));
            assert!(core::ptr::eq(unsafe { span.at_unchecked(position) }, value));
        }
        assert_eq!(span.first(), Some(&3));
        assert_eq!(span.last(), Some(&6));
        assert_eq!(span.as_slice(), &values[..]);
    }

    #[test]
    fn scenario() {
        let values = [10, 20, 30, 40, 50];
        let view = Span::new(&values);

        assert_eq!(view[2], 30);
        assert_eq!(view.prefix(2), [10, 20]);
        assert_eq!(view.drop_last(2).len(), 3);
        assert_eq!(view.suffix(1), [50]);
    }

    #[test]
    fn prefix_matches_offsets() {
        let values: [u8; 10] = core::array::from_fn(|i| i as u8);
        let view = Span::new(&values);

        let prefix = view.prefix(3);
        assert_eq!(prefix.len(), 3);
        assert_eq!(prefix, view.extracting_offsets(0..3));
        assert_eq!(prefix, view.extracting_offsets(..3));
        assert_eq!(prefix, view.extracting_offsets(..=2));
    }

    #[test]
    fn length_slicing_saturates() {
        let values = [1, 2, 3, 4, 5];
        let view = Span::new(&values);

        assert_eq!(view.suffix(20), values);
        assert_eq!(view.prefix(20), values);
        assert!(view.drop_first(6).is_empty());
        assert_eq!(view.drop_first(6).start_index(), view.end_index());
        assert!(view.drop_last(6).is_empty());
        assert_eq!(view.drop_last(6).start_index(), view.start_index());
        assert_eq!(view.drop_first(1), [2, 3, 4, 5]);
        assert_eq!(view.drop_last(1), [1, 2, 3, 4]);
        assert_eq!(view.suffix(0).start_index(), view.end_index());
    }

    #[test]
    fn index_slicing() {
        let values = [1, 2, 3, 4, 5];
        let view = Span::new(&values);
        let third = view.start_index().advanced_by(2);

        assert_eq!(view.prefix_up_to(third), [1, 2]);
        assert_eq!(view.prefix_through(third), [1, 2, 3]);
        assert_eq!(view.suffix_from(third), [3, 4, 5]);
        assert!(view.prefix_up_to(view.start_index()).is_empty());
        assert_eq!(view.prefix_up_to(view.end_index()), values);
        assert!(view.suffix_from(view.end_index()).is_empty());

        assert_eq!(view.extracting(third..), [3, 4, 5]);
        assert_eq!(view.extracting(..third), [1, 2]);
        assert_eq!(view.extracting(..=third), [1, 2, 3]);
        assert_eq!(view.extracting(..), values);
        assert_eq!(view.extracting(third..third), [0; 0]);
        assert_eq!(
            unsafe { view.extracting_unchecked(view.index_after(third)..) },
            [4, 5]
        );
        assert_eq!(unsafe { view.extracting_offsets_unchecked(1..2) }, [2]);
    }

    #[test]
    fn slices_share_allocation() {
        let values = [1, 2, 3, 4, 5];
        let view = Span::new(&values);
        let tail = view.drop_first(2);

        // Indices of a sub-span are valid in the parent and vice versa.
        assert_eq!(view.at(tail.start_index()), &3);
        assert_eq!(tail.at(view.start_index().advanced_by(4)), &5);
        assert_eq!(tail.distance(view.start_index(), tail.start_index()), 2);
    }

    #[test]
    #[should_panic(expected = "range of indices out of bounds")]
    fn extracting_past_end() {
        let values = [1, 2, 3];
        let view = Span::new(&values);
        let _ = view.extracting(view.start_index()..view.end_index().advanced_by(1));
    }

    #[test]
    #[should_panic(expected = "range of indices out of bounds")]
    fn extracting_reversed() {
        let values = [1, 2, 3];
        let view = Span::new(&values);
        let _ = view.extracting(view.end_index()..view.start_index());
    }

    #[test]
    #[should_panic(expected = "range of indices out of bounds: 2..4 is not within 0..3")]
    fn extracting_offsets_past_end() {
        let values = [1, 2, 3];
        let _ = Span::new(&values).extracting_offsets(2..4);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the offset is 3 but the count is 3")]
    fn offset_past_end() {
        let values = [1, 2, 3];
        let _ = Span::new(&values)[3];
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the offset is -1 but the count is 2")]
    fn index_before_start() {
        let values = [1, 2, 3];
        let view = Span::new(&values).drop_first(1);
        let _ = view[view.index_before(view.start_index())];
    }

    #[test]
    #[should_panic(expected = "indices from different allocations")]
    fn index_from_other_allocation() {
        let a = [1, 2, 3];
        let b = [1, 2, 3];
        let _ = Span::new(&a).at(Span::new(&b).start_index());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn prefix_through_end() {
        let values = [1, 2, 3];
        let view = Span::new(&values);
        let _ = view.prefix_through(view.end_index());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn suffix_from_past_end() {
        let values = [1, 2, 3];
        let view = Span::new(&values);
        let _ = view.suffix_from(view.end_index().advanced_by(1));
    }

    #[test]
    #[should_panic(expected = "not properly aligned")]
    fn misaligned_base() {
        let words = [0u32; 4];
        let ptr = words.as_ptr().cast::<u8>().wrapping_add(1).cast::<u32>();
        let _ = unsafe { Span::from_raw_parts(ptr, 1, &words) };
    }

    #[test]
    #[should_panic(expected = "not properly aligned")]
    fn misaligned_position() {
        let words = [1u32, 2, 3];
        let view = Span::new(&words);
        let skewed = RawIndex::from(view.start_index()).advanced_by(1).typed::<u32>();
        let _ = view.at(skewed);
    }

    #[test]
    #[should_panic(expected = "not properly aligned")]
    fn misaligned_subscript() {
        let words = [1u32, 2, 3];
        let view = Span::new(&words);
        let skewed = RawIndex::from(view.start_index()).advanced_by(5).typed::<u32>();
        let _ = view[skewed];
    }

    #[test]
    #[should_panic(expected = "not properly aligned")]
    fn misaligned_range() {
        let words = [1u32, 2, 3];
        let view = Span::new(&words);
        let skewed = RawIndex::from(view.start_index()).advanced_by(1).typed::<u32>();
        let _ = view.extracting(skewed..view.end_index());
    }

    #[test]
    #[should_panic(expected = "base address must not be null")]
    fn null_base() {
        let owner = ();
        let _ = unsafe { Span::<u8>::from_raw_parts(core::ptr::null(), 0, &owner) };
    }

    #[test]
    #[should_panic(expected = "count must not be negative (got -1)")]
    fn wrapped_count() {
        let values = [1u8, 2];
        let count = 1usize.wrapping_sub(2);
        let _ = unsafe { Span::from_raw_parts(values.as_ptr(), count, &values) };
    }

    #[test]
    #[should_panic(expected = "exceeds the addressable range")]
    fn oversized_count() {
        let values = [1u64, 2];
        let _ = unsafe { Span::from_raw_parts(values.as_ptr(), isize::MAX as usize / 4, &values) };
    }

    #[test]
    fn index_bounds() {
        let values = [1, 2, 3, 4];
        let view = Span::new(&values);
        let start = view.start_index().advanced_by(1);
        let span = unsafe { Span::from_index_bounds(start, view.end_index(), &values) };
        assert_eq!(span, [2, 3, 4]);
        assert_eq!(span.start_index(), start);
    }

    #[test]
    #[should_panic(expected = "count must not be negative (got -2)")]
    fn index_bounds_reversed() {
        let values = [1, 2, 3, 4];
        let view = Span::new(&values);
        let end = view.start_index().advanced_by(1);
        let _ = unsafe { Span::from_index_bounds(view.end_index().advanced_by(-1), end, &values) };
    }

    #[test]
    fn equality() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [1.0f32, 2.0, 3.0];
        let c = [1.0f32, 2.5, 3.0];
        let (a, b, c) = (Span::new(&a), Span::new(&b), Span::new(&c));

        for (x, y) in [(a, b), (a, c), (b, c), (a, a.prefix(2))] {
            assert_eq!(x.elements_equal(&y), y.elements_equal(&x));
        }
        assert!(a.elements_equal(&b));
        assert!(!a.elements_equal(&c));
        assert!(!a.elements_equal(&a.prefix(2)));
        assert!(a.drop_first(3).elements_equal(&c.drop_last(3)));

        // Same start: equal without looking at the (unequal) NaN values.
        let nan = [f32::NAN; 2];
        let nan = Span::new(&nan);
        assert!(nan.elements_equal(&nan));
        assert!(!nan.elements_equal(&Span::new(&[f32::NAN; 2])));
    }

    #[test]
    fn containment() {
        let values = [0u16; 8];
        let view = Span::new(&values);
        let inner = view.extracting_offsets(2..6);

        assert!(inner.is_within(&view));
        assert_eq!(inner.indices_within(&view), Some(2..6));
        assert!(!view.is_within(&inner));
        assert!(view.drop_first(8).is_within(&view));
        assert_eq!(view.drop_first(8).indices_within(&view), Some(8..8));

        let other = [0u16; 8];
        assert!(!Span::new(&other).is_within(&view));

        // Not on an element boundary.
        let skewed = view.as_raw_span().drop_first(1).prefix(4).view_as::<u8>();
        let bytes = view.as_raw_span().view_as::<u8>();
        assert_eq!(skewed.indices_within(&bytes), Some(1..5));
    }

    #[test]
    fn iteration() {
        let values = [5, 6, 7, 8];
        let view = Span::new(&values);

        assert_eq!(view.iter().count(), 4);
        assert!(view.iter().copied().eq(values));
        assert!(view.iter().eq(view.iter()));
        assert!(view.elements_equal_seq(values));

        let mut sum = 0;
        for value in &view {
            sum += value;
        }
        assert_eq!(sum, 26);
    }

    #[test]
    fn bytes() {
        let values = [0x0102_0304u32, 0x0506_0708];
        let view = Span::new(&values);

        let raw = view.as_raw_span();
        assert_eq!(raw.len(), 8);
        assert_eq!(raw.as_bytes(), bytemuck::cast_slice::<u32, u8>(&values));

        let same = view.view_as::<u32>();
        assert_eq!(same.start_index(), view.start_index());
        assert_eq!(same.len(), view.len());

        let halves = view.view_as::<u16>();
        assert_eq!(halves.len(), 4);
        assert_eq!(view.load::<u32>(4), 0x0506_0708);
        assert_eq!(view.load_from::<u32>(view.start_index().advanced_by(1)), 0x0506_0708);
        assert_eq!(
            view.load_unaligned_from::<u32>(view.start_index()),
            0x0102_0304
        );
        let bytes = view.as_bytes();
        assert_eq!(view.load_unaligned::<u16>(1), u16::from_ne_bytes([bytes[1], bytes[2]]));
        assert!(view.loads().eq(values));
    }

    #[test]
    #[should_panic(expected = "12 bytes do not hold a whole number of `u64` (stride 8)")]
    fn bytes_reinterpretation_remainder() {
        let values = [1u32, 2, 3];
        let _ = Span::new(&values).view_as::<u64>();
    }

    #[test]
    fn debug_output() {
        let values = [1, 2, 3];
        let view = Span::new(&values);
        assert_eq!(format!("{view:?}"), "[1, 2, 3]");
    }
}
