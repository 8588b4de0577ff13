use core::fmt;
use core::marker::PhantomData;
use core::slice;

use bytemuck::AnyBitPattern;

use crate::index::{RawIndex, stride_of};
use crate::span::{Span, validate_raw_parts};
use crate::trivial::BitwiseCopyable;
use crate::violation::{ContractViolation, signed};

/// A read-only, untyped view over `len()` initialized bytes.
///
/// Positions are [`RawIndex`] values striding by one byte. Beyond the slicing
/// shared with [`Span`], a raw span loads fixed-layout values from arbitrary
/// byte offsets and reinterprets itself as a typed span.
///
/// # Examples
///
/// ```
/// use sv_span::RawSpan;
///
/// let words = [1u32, 2, 3, 4];
/// let raw = RawSpan::of(&words);
///
/// assert_eq!(raw.len(), 16);
/// assert_eq!(raw.load::<u32>(8), 3);
/// assert_eq!(raw.drop_first(4).view_as::<u32>(), [2, 3, 4]);
/// ```
pub struct RawSpan<'a> {
    start: RawIndex,
    count: usize,
    _marker: PhantomData<&'a [u8]>,
}

impl Clone for RawSpan<'_> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for RawSpan<'_> {}

impl_span_common!(impl<'a> RawSpan<'a> => RawIndex);

impl<'a> RawSpan<'a> {
    #[inline(always)]
    pub(crate) const fn from_start_unchecked(start: RawIndex, count: usize) -> Self {
        Self {
            start,
            count,
            _marker: PhantomData,
        }
    }

    /// Creates a raw span over `bytes`.
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self::from_start_unchecked(RawIndex::from_start(bytes.as_ptr()), bytes.len())
    }

    /// Creates a raw span over the memory of `value`.
    ///
    /// Arrays of [`BitwiseCopyable`] values are themselves bitwise copyable;
    /// for a slice use [`Span::as_raw_span`].
    #[inline]
    pub fn of<T: BitwiseCopyable>(value: &'a T) -> Self {
        Self::new(bytemuck::bytes_of(value))
    }

    /// Creates a raw span over `count` bytes starting at `ptr`, borrowed from `owner`.
    ///
    /// # Panics
    ///
    /// - If `ptr` is null.
    /// - If `count` is negative once reinterpreted as a signed value.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `count` initialized bytes, which must
    /// stay valid and unmodified for as long as `owner` is borrowed.
    #[track_caller]
    pub unsafe fn from_raw_parts<O: ?Sized>(ptr: *const u8, count: usize, owner: &'a O) -> Self {
        validate_raw_parts(ptr, count);
        // SAFETY: validated above, the caller upholds the rest.
        unsafe { Self::from_raw_parts_unchecked(ptr, count, owner) }
    }

    /// Creates a raw span without validation.
    ///
    /// # Safety
    ///
    /// Same as [`from_raw_parts`](Self::from_raw_parts); in addition `ptr`
    /// must be non-null and `count` must not exceed `isize::MAX`.
    #[inline(always)]
    pub const unsafe fn from_raw_parts_unchecked<O: ?Sized>(
        ptr: *const u8,
        count: usize,
        _owner: &'a O,
    ) -> Self {
        Self::from_start_unchecked(RawIndex::from_start(ptr), count)
    }

    /// Creates a raw span covering `start..end`, borrowed from `owner`.
    ///
    /// # Panics
    ///
    /// - If `start` and `end` belong to different allocations.
    /// - If `end` precedes `start`.
    ///
    /// # Safety
    ///
    /// The bytes between the two indices must be initialized and valid for
    /// reads for as long as `owner` is borrowed.
    #[track_caller]
    pub unsafe fn from_index_bounds<O: ?Sized>(
        start: RawIndex,
        end: RawIndex,
        _owner: &'a O,
    ) -> Self {
        let count = start.distance_to(end);
        if count < 0 {
            ContractViolation::NegativeCount { count }.handle_error();
        }
        Self::from_start_unchecked(start, count as usize)
    }

    /// Returns the byte at `position`.
    ///
    /// # Panics
    ///
    /// If `position` belongs to another allocation or lies outside the span.
    #[inline]
    #[track_caller]
    pub fn at(&self, position: RawIndex) -> &'a u8 {
        let offset = self.checked_offset(position);
        // SAFETY: `offset < count`.
        unsafe { &*self.start.as_ptr().add(offset) }
    }

    /// Returns the byte `offset` positions past the start.
    ///
    /// # Panics
    ///
    /// If `offset >= len()`.
    #[inline]
    #[track_caller]
    pub fn at_offset(&self, offset: usize) -> &'a u8 {
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

    /// Returns the bytes as a slice with the span's lifetime.
    #[inline(always)]
    pub fn as_bytes(&self) -> &'a [u8] {
        // SAFETY: `count` initialized bytes valid for `'a`.
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.count) }
    }

    /// The address of the first byte.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const u8 {
        self.start.as_ptr()
    }

    /// Returns an iterator over the bytes.
    #[inline]
    pub fn bytes(&self) -> core::iter::Copied<slice::Iter<'a, u8>> {
        self.as_bytes().iter().copied()
    }

    /// Returns `true` if every byte of `self` is also a byte of `other`.
    #[inline]
    pub fn is_within(&self, other: &RawSpan<'_>) -> bool {
        self.indices_within(other).is_some()
    }

    /// Returns the byte offsets `self` occupies inside `other`, if it lies within it.
    pub fn indices_within(&self, other: &RawSpan<'_>) -> Option<core::ops::Range<usize>> {
        let lower = other.start.byte_distance_unchecked(self.start);
        if lower < 0 {
            return None;
        }
        let lower = lower as usize;
        let upper = lower.checked_add(self.count)?;
        (upper <= other.count).then_some(lower..upper)
    }

    /// Returns `true` if both raw spans hold the same bytes.
    #[inline]
    pub fn elements_equal(&self, other: &RawSpan<'_>) -> bool {
        self.count == other.count
            && (self.start == other.start || self.as_bytes() == other.as_bytes())
    }

    // ---- loads

    #[track_caller]
    fn checked_load_range<U>(&self, byte_offset: isize) {
        let size = size_of::<U>();
        let end = byte_offset.checked_add(size as isize);
        match end {
            Some(end) if byte_offset >= 0 && end as usize <= self.count => {}
            _ => ContractViolation::RangeOutOfBounds {
                start: byte_offset,
                end: byte_offset.saturating_add(size as isize),
                count: self.count,
            }
            .handle_error(),
        }
    }

    /// Loads a `U` from the `size_of::<U>()` bytes at `byte_offset`.
    ///
    /// # Panics
    ///
    /// - If `byte_offset..byte_offset + size_of::<U>()` is not within `0..len()`.
    /// - If the address at `byte_offset` is not aligned for `U`; use
    ///   [`load_unaligned`](Self::load_unaligned) for packed data.
    ///
    /// # Examples
    ///
    /// ```
    /// use sv_span::RawSpan;
    ///
    /// let values = [0x0102u16, 0x0304];
    /// let raw = RawSpan::of(&values);
    /// assert_eq!(raw.load::<u16>(2), 0x0304);
    /// assert_eq!(raw.load::<[u16; 2]>(0), values);
    /// ```
    #[inline]
    #[track_caller]
    pub fn load<U: AnyBitPattern>(&self, byte_offset: usize) -> U {
        self.checked_load_range::<U>(signed(byte_offset));
        let ptr = self.start.as_ptr().wrapping_add(byte_offset).cast::<U>();
        if !ptr.is_aligned() {
            ContractViolation::misaligned::<U>(ptr.addr()).handle_error();
        }
        // SAFETY: in bounds, aligned, and every bit pattern is a valid `U`.
        unsafe { ptr.read() }
    }

    /// Loads a `U` from `byte_offset` without validation.
    ///
    /// # Safety
    ///
    /// The range must be within `0..len()` and the address aligned for `U`.
    #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
    #[cfg_attr(not(any(feature = "debug", debug_assertions)), inline(always))]
    pub unsafe fn load_unchecked<U: AnyBitPattern>(&self, byte_offset: usize) -> U {
        crate::cfg::debug! {
            self.checked_load_range::<U>(signed(byte_offset));
        }
        // SAFETY: the caller guarantees bounds and alignment.
        unsafe { self.start.as_ptr().add(byte_offset).cast::<U>().read() }
    }

    /// Loads a `U` from `byte_offset` at any alignment.
    ///
    /// # Panics
    ///
    /// If `byte_offset..byte_offset + size_of::<U>()` is not within `0..len()`.
    #[inline]
    #[track_caller]
    pub fn load_unaligned<U: AnyBitPattern>(&self, byte_offset: usize) -> U {
        self.checked_load_range::<U>(signed(byte_offset));
        // SAFETY: in bounds, and every bit pattern is a valid `U`.
        unsafe { self.start.as_ptr().add(byte_offset).cast::<U>().read_unaligned() }
    }

    /// Loads a `U` from `byte_offset` at any alignment, without validation.
    ///
    /// # Safety
    ///
    /// The range must be within `0..len()`.
    #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
    #[cfg_attr(not(any(feature = "debug", debug_assertions)), inline(always))]
    pub unsafe fn load_unaligned_unchecked<U: AnyBitPattern>(&self, byte_offset: usize) -> U {
        crate::cfg::debug! {
            self.checked_load_range::<U>(signed(byte_offset));
        }
        // SAFETY: the caller guarantees bounds.
        unsafe { self.start.as_ptr().add(byte_offset).cast::<U>().read_unaligned() }
    }

    /// Loads a `U` from `position`.
    ///
    /// # Panics
    ///
    /// As [`load`](Self::load), and if `position` belongs to another allocation.
    #[inline]
    #[track_caller]
    pub fn load_from<U: AnyBitPattern>(&self, position: RawIndex) -> U {
        let offset = self.start.distance_to(position);
        self.checked_load_range::<U>(offset);
        self.load(offset as usize)
    }

    /// Loads a `U` from `position` at any alignment.
    #[inline]
    #[track_caller]
    pub fn load_unaligned_from<U: AnyBitPattern>(&self, position: RawIndex) -> U {
        let offset = self.start.distance_to(position);
        self.checked_load_range::<U>(offset);
        self.load_unaligned(offset as usize)
    }

    // ---- reinterpretation

    /// Reinterprets the bytes as a span of `U`.
    ///
    /// The typed span keeps this span's allocation identity, so indices of
    /// both can be converted into each other.
    ///
    /// # Panics
    ///
    /// - If `len()` is not a multiple of `size_of::<U>()`.
    /// - If the start is not aligned for `U`.
    #[track_caller]
    pub fn view_as<U: BitwiseCopyable>(self) -> Span<'a, U> {
        let stride = stride_of::<U>();
        if self.count % stride != 0 {
            ContractViolation::MisalignedReinterpretation {
                bytes: self.count,
                stride,
                type_name: core::any::type_name::<U>(),
            }
            .handle_error();
        }
        let start = self.start.typed::<U>();
        start.assert_aligned();
        Span::from_start_unchecked(start, self.count / stride)
    }

    /// Reinterprets the bytes as a span of `U` without validation.
    ///
    /// # Safety
    ///
    /// `len()` must be a multiple of `size_of::<U>()` and the start must be
    /// aligned for `U`.
    #[cfg_attr(any(feature = "debug", debug_assertions), track_caller)]
    pub unsafe fn view_as_unchecked<U: BitwiseCopyable>(self) -> Span<'a, U> {
        crate::cfg::debug! {
            let _ = self.view_as::<U>();
        }
        Span::from_start_unchecked(self.start.typed::<U>(), self.count / stride_of::<U>())
    }
}

// -----------------------------------------------------------------------------
// Traits

impl core::ops::Index<usize> for RawSpan<'_> {
    type Output = u8;

    #[inline]
    #[track_caller]
    fn index(&self, offset: usize) -> &u8 {
        self.at_offset(offset)
    }
}

impl core::ops::Index<RawIndex> for RawSpan<'_> {
    type Output = u8;

    #[inline]
    #[track_caller]
    fn index(&self, position: RawIndex) -> &u8 {
        self.at(position)
    }
}

impl<'a> From<&'a [u8]> for RawSpan<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a, T: BitwiseCopyable> From<Span<'a, T>> for RawSpan<'a> {
    #[inline]
    fn from(span: Span<'a, T>) -> Self {
        span.as_raw_span()
    }
}

impl PartialEq for RawSpan<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.elements_equal(other)
    }
}

impl Eq for RawSpan<'_> {}

impl PartialEq<[u8]> for RawSpan<'_> {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for RawSpan<'_> {
    #[inline]
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

impl fmt::Debug for RawSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSpan")
            .field("start", &self.start.as_ptr())
            .field("len", &self.count)
            .finish()
    }
}
