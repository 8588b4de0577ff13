use core::fmt;
use core::marker::PhantomData;
use core::ptr;
use core::slice;

use crate::index::{SpanIndex, stride_of};
use crate::iter::{Iter, IterMut};
use crate::raw_span::RawSpan;
use crate::span::{Span, validate_raw_parts};
use crate::trivial::BitwiseCopyable;
use crate::violation::{ContractViolation, signed};

/// An exclusive, read-write view over `len()` contiguous values of `T`.
///
/// The mutable counterpart of [`Span`]. It is not `Copy`: slicing consumes
/// the view, and [`reborrow`](Self::reborrow) hands out a shorter-lived one
/// when the original is still needed afterwards.
///
/// # Examples
///
/// ```
/// use sv_span::SpanMut;
///
/// let mut values = [1, 2, 3, 4, 5];
/// let mut span = SpanMut::new(&mut values);
///
/// span[0] = 10;
/// span.swap_at(1, 4);
/// span.reborrow().drop_first(2).set(0, 30);
///
/// let (head, mut tail) = span.split_at(3);
/// tail[1] = 0;
/// assert_eq!(head.as_span(), [10, 5, 30]);
/// assert_eq!(values, [10, 5, 30, 4, 0]);
/// ```
///
/// Like [`Span`], it cannot cross threads:
///
/// ```compile_fail
/// fn is_send<T: Send>() {}
/// is_send::<sv_span::SpanMut<'static, u8>>();
/// ```
pub struct SpanMut<'a, T> {
    start: SpanIndex<T>,
    count: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl_span_common!(impl<'a, T> SpanMut<'a, T> => SpanIndex<T>);

impl<'a, T> SpanMut<'a, T> {
    #[inline(always)]
    pub(crate) const fn from_start_unchecked(start: SpanIndex<T>, count: usize) -> Self {
        Self {
            start,
            count,
            _marker: PhantomData,
        }
    }

    /// Creates a mutable span over the elements of `slice`.
    #[inline]
    pub fn new(slice: &'a mut [T]) -> Self {
        let _ = stride_of::<T>();
        let count = slice.len();
        Self::from_start_unchecked(SpanIndex::from_start(slice.as_mut_ptr()), count)
    }

    /// Creates a mutable span over `count` elements at `ptr`, exclusively
    /// borrowed from `owner`.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`Span::from_raw_parts`].
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `count` initialized values
    /// of `T`, and no other access may happen through any other pointer for as
    /// long as `owner` is borrowed.
    #[track_caller]
    pub unsafe fn from_raw_parts<O: ?Sized>(ptr: *mut T, count: usize, owner: &'a mut O) -> Self {
        validate_raw_parts(ptr.cast_const(), count);
        // SAFETY: validated above, the caller upholds the rest.
        unsafe { Self::from_raw_parts_unchecked(ptr, count, owner) }
    }

    /// Creates a mutable span without validation.
    ///
    /// # Safety
    ///
    /// Same as [`from_raw_parts`](Self::from_raw_parts); in addition `ptr`
    /// must be non-null and aligned, and the region must not exceed
    /// `isize::MAX` bytes.
    #[inline(always)]
    pub unsafe fn from_raw_parts_unchecked<O: ?Sized>(
        ptr: *mut T,
        count: usize,
        _owner: &'a mut O,
    ) -> Self {
        let _ = stride_of::<T>();
        Self::from_start_unchecked(SpanIndex::from_start(ptr.cast_const()), count)
    }

    /// A read-only view of the same elements, borrowing `self`.
    #[inline]
    pub fn as_span(&self) -> Span<'_, T> {
        Span::from_start_unchecked(self.start, self.count)
    }

    /// Converts into a read-only view for the rest of `'a`.
    #[inline]
    pub fn into_span(self) -> Span<'a, T> {
        Span::from_start_unchecked(self.start, self.count)
    }

    /// A shorter-lived mutable view of the same elements.
    #[inline]
    pub fn reborrow(&mut self) -> SpanMut<'_, T> {
        SpanMut::from_start_unchecked(self.start, self.count)
    }

    #[inline]
    #[track_caller]
    fn assert_offset(&self, offset: usize) {
        if offset >= self.count {
            ContractViolation::IndexOutOfBounds {
                offset: signed(offset),
                count: self.count,
            }
            .handle_error();
        }
    }

    /// Returns the element at `position`.
    ///
    /// # Panics
    ///
    /// Like [`Span::at`].
    #[inline]
    #[track_caller]
    pub fn at(&self, position: SpanIndex<T>) -> &T {
        let offset = self.checked_offset(position);
        // SAFETY: `offset < count`.
        unsafe { &*self.start.as_ptr().add(offset) }
    }

    /// Returns the element at `position` mutably.
    ///
    /// # Panics
    ///
    /// Like [`Span::at`].
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, position: SpanIndex<T>) -> &mut T {
        let offset = self.checked_offset(position);
        // SAFETY: `offset < count` and `self` is borrowed exclusively.
        unsafe { &mut *self.start.as_mut_ptr().add(offset) }
    }

    /// Returns the element `offset` positions past the start.
    #[inline]
    #[track_caller]
    pub fn at_offset(&self, offset: usize) -> &T {
        self.assert_offset(offset);
        // SAFETY: checked above.
        unsafe { &*self.start.as_ptr().add(offset) }
    }

    /// Returns the element `offset` positions past the start mutably.
    ///
    /// # Panics
    ///
    /// If `offset >= len()`.
    #[inline]
    #[track_caller]
    pub fn at_offset_mut(&mut self, offset: usize) -> &mut T {
        self.assert_offset(offset);
        // SAFETY: checked above.
        unsafe { &mut *self.start.as_mut_ptr().add(offset) }
    }

    /// Returns the element `offset` positions past the start mutably, without validation.
    ///
    /// # Safety
    ///
    /// `offset` must be less than `len()`.
    #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
    #[cfg_attr(not(any(feature = "debug", debug_assertions)), inline(always))]
    pub unsafe fn at_offset_unchecked_mut(&mut self, offset: usize) -> &mut T {
        crate::cfg::debug! {
            self.assert_offset(offset);
        }
        // SAFETY: the caller guarantees `offset < count`.
        unsafe { &mut *self.start.as_mut_ptr().add(offset) }
    }

    /// Replaces the element at `offset`, dropping the old value.
    ///
    /// # Panics
    ///
    /// If `offset >= len()`.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, offset: usize, value: T) {
        *self.at_offset_mut(offset) = value;
    }

    /// Swaps the elements at offsets `a` and `b`.
    ///
    /// # Panics
    ///
    /// If either offset is `>= len()`.
    #[inline]
    #[track_caller]
    pub fn swap_at(&mut self, a: usize, b: usize) {
        self.assert_offset(a);
        self.assert_offset(b);
        let base = self.start.as_mut_ptr();
        // SAFETY: both offsets are in bounds; `ptr::swap` allows `a == b`.
        unsafe { ptr::swap(base.add(a), base.add(b)) }
    }

    /// Splits into the first `mid` elements and the rest.
    ///
    /// Both halves keep the allocation identity of `self`.
    ///
    /// # Panics
    ///
    /// If `mid > len()`.
    #[track_caller]
    pub fn split_at(self, mid: usize) -> (SpanMut<'a, T>, SpanMut<'a, T>) {
        self.checked_offsets(0, mid);
        let tail = self.start.advanced_by(mid as isize);
        (
            Self::from_start_unchecked(self.start, mid),
            Self::from_start_unchecked(tail, self.count - mid),
        )
    }

    /// Returns the elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `count` initialized values.
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.count) }
    }

    /// Returns the elements as a mutable slice.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `count` initialized values, borrowed exclusively.
        unsafe { slice::from_raw_parts_mut(self.start.as_mut_ptr(), self.count) }
    }

    /// Converts into a mutable slice for the rest of `'a`.
    #[inline(always)]
    pub fn into_mut_slice(self) -> &'a mut [T] {
        // SAFETY: `count` initialized values, exclusively borrowed for `'a`.
        unsafe { slice::from_raw_parts_mut(self.start.as_mut_ptr(), self.count) }
    }

    /// The address of the first element.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.start.as_mut_ptr()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_span().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.reborrow())
    }
}

impl<T: BitwiseCopyable> SpanMut<'_, T> {
    /// A read-only byte view of the elements.
    #[inline]
    pub fn as_raw_span(&self) -> RawSpan<'_> {
        self.as_span().as_raw_span()
    }

    /// The elements as mutable bytes.
    ///
    /// Any bytes written form valid elements, since every bit pattern is a
    /// valid `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sv_span::SpanMut;
    ///
    /// let mut values = [0u16; 2];
    /// SpanMut::new(&mut values).as_bytes_mut().fill(0xff);
    /// assert_eq!(values, [u16::MAX; 2]);
    /// ```
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(self.as_mut_slice())
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T> core::ops::Index<usize> for SpanMut<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, offset: usize) -> &T {
        self.at_offset(offset)
    }
}

impl<T> core::ops::IndexMut<usize> for SpanMut<'_, T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        self.at_offset_mut(offset)
    }
}

impl<T> core::ops::Index<SpanIndex<T>> for SpanMut<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, position: SpanIndex<T>) -> &T {
        self.at(position)
    }
}

impl<T> core::ops::IndexMut<SpanIndex<T>> for SpanMut<'_, T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, position: SpanIndex<T>) -> &mut T {
        self.at_mut(position)
    }
}

impl<'a, T> From<&'a mut [T]> for SpanMut<'a, T> {
    #[inline]
    fn from(slice: &'a mut [T]) -> Self {
        Self::new(slice)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for SpanMut<'a, T> {
    #[inline]
    fn from(array: &'a mut [T; N]) -> Self {
        Self::new(array)
    }
}

impl<'a, T> IntoIterator for SpanMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IterMut::new(self)
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut SpanMut<'a, T> {
    type Item = &'b mut T;
    type IntoIter = IterMut<'b, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for SpanMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
