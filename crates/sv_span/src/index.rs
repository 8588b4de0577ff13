//! Allocation-tagged positions inside a span.
//!
//! An index is a raw address paired with the identity of the allocation it
//! was derived from. Only indices that share an allocation can be subtracted
//! or range-checked against each other.
//!
//! Advancing an index never fails: it may move past either end of the span,
//! and uses wrapping address arithmetic so that doing so is harmless. The
//! check happens when the index is handed back to a span for access.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::violation::ContractViolation;

/// The distance in bytes between two consecutive elements of `T`.
///
/// Zero-sized element types are rejected at compile time.
#[inline(always)]
pub(crate) const fn stride_of<T>() -> usize {
    const {
        assert!(
            size_of::<T>() != 0,
            "spans over zero-sized element types are not supported"
        );
    }
    size_of::<T>()
}

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_index {
    ($index:ident $(<$param:ident>)?) => {
        impl $(<$param>)? Clone for $index $(<$param>)? {
            #[inline(always)]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl $(<$param>)? Copy for $index $(<$param>)? {}

        impl $(<$param>)? PartialEq for $index $(<$param>)? {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.allocation == other.allocation && self.raw == other.raw
            }
        }

        impl $(<$param>)? Eq for $index $(<$param>)? {}

        impl $(<$param>)? Hash for $index $(<$param>)? {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.allocation.hash(state);
                self.raw.hash(state);
            }
        }

        impl $(<$param>)? PartialOrd for $index $(<$param>)? {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        /// Orders by address. Ties between different allocations are broken by
        /// allocation so that the order agrees with `Eq`; such orderings carry
        /// no meaning.
        impl $(<$param>)? Ord for $index $(<$param>)? {
            #[inline]
            fn cmp(&self, other: &Self) -> Ordering {
                self.raw
                    .addr()
                    .cmp(&other.raw.addr())
                    .then_with(|| self.allocation.addr().cmp(&other.allocation.addr()))
            }
        }

        impl $(<$param>)? fmt::Debug for $index $(<$param>)? {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({:p} in {:p})",
                    stringify!($index),
                    self.raw,
                    self.allocation
                )
            }
        }

        impl $(<$param>)? $index $(<$param>)? {
            /// Returns `true` if both indices were derived from the same allocation.
            #[inline(always)]
            pub fn shares_allocation_with(self, other: Self) -> bool {
                self.allocation == other.allocation
            }

            /// The signed byte distance from `self` to `other`, without any check.
            #[inline(always)]
            pub(crate) fn byte_distance_unchecked(self, other: Self) -> isize {
                other.raw.addr().wrapping_sub(self.raw.addr()) as isize
            }

            /// The signed byte distance from `self` to `other`.
            #[track_caller]
            pub(crate) fn byte_distance(self, other: Self) -> isize {
                if self.allocation != other.allocation {
                    ContractViolation::CrossAllocationComparison {
                        lhs: self.allocation.addr(),
                        rhs: other.allocation.addr(),
                    }
                    .handle_error();
                }
                self.byte_distance_unchecked(other)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// SpanIndex

/// A position inside a [`Span`](crate::Span) of `T`.
///
/// Strides by whole elements: `advanced_by(1)` moves `size_of::<T>()` bytes.
///
/// # Examples
///
/// ```
/// use sv_span::Span;
///
/// let values = [10, 20, 30, 40, 50];
/// let span = Span::new(&values);
///
/// let i = span.start_index().advanced_by(3);
/// assert_eq!(span[i], 40);
/// assert_eq!(i.distance_to(span.end_index()), 2);
/// assert_eq!(i.advanced_by(-2).distance_to(i), 2);
/// ```
pub struct SpanIndex<T> {
    allocation: *const u8,
    raw: *const u8,
    _marker: PhantomData<fn() -> T>,
}

impl_index!(SpanIndex<T>);

impl<T> SpanIndex<T> {
    #[inline(always)]
    pub(crate) const fn new(allocation: *const u8, raw: *const u8) -> Self {
        Self {
            allocation,
            raw,
            _marker: PhantomData,
        }
    }

    /// An index at `start`, which also becomes the allocation identity.
    #[inline(always)]
    pub(crate) const fn from_start(start: *const T) -> Self {
        Self::new(start.cast(), start.cast())
    }

    /// An index at `raw` in the same allocation as `self`.
    #[inline(always)]
    pub(crate) const fn relocated(self, raw: *const T) -> Self {
        Self::new(self.allocation, raw.cast())
    }

    /// Returns an index `n` elements away from this one.
    ///
    /// Never fails; the result is only validated when it is used.
    #[inline(always)]
    #[must_use]
    pub fn advanced_by(self, n: isize) -> Self {
        let bytes = n.wrapping_mul(stride_of::<T>() as isize);
        Self::new(self.allocation, self.raw.wrapping_byte_offset(bytes))
    }

    /// Returns the signed number of elements from `self` to `other`.
    ///
    /// # Panics
    ///
    /// - If the indices belong to different allocations.
    /// - If the byte distance is not a whole number of elements.
    #[track_caller]
    pub fn distance_to(self, other: Self) -> isize {
        let bytes = self.byte_distance(other);
        let stride = stride_of::<T>() as isize;
        if bytes % stride != 0 {
            ContractViolation::misaligned::<T>(other.raw.addr()).handle_error();
        }
        bytes / stride
    }

    /// Returns `true` if the address satisfies the alignment of `T`.
    #[inline(always)]
    pub fn is_aligned(self) -> bool {
        self.raw.cast::<T>().is_aligned()
    }

    #[inline]
    #[track_caller]
    pub(crate) fn assert_aligned(self) {
        if !self.is_aligned() {
            ContractViolation::misaligned::<T>(self.raw.addr()).handle_error();
        }
    }

    /// Element distance without any validation.
    #[inline(always)]
    pub(crate) fn distance_unchecked(self, other: Self) -> isize {
        self.byte_distance_unchecked(other) / stride_of::<T>() as isize
    }

    /// The address this index refers to.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const T {
        self.raw.cast()
    }

    #[inline(always)]
    pub(crate) const fn as_mut_ptr(self) -> *mut T {
        self.raw.cast_mut().cast()
    }
}

// -----------------------------------------------------------------------------
// RawIndex

/// A position inside a [`RawSpan`](crate::RawSpan), striding by bytes.
///
/// Every byte address is suitably aligned, so a raw index is never misaligned.
pub struct RawIndex {
    allocation: *const u8,
    raw: *const u8,
}

impl_index!(RawIndex);

impl RawIndex {
    #[inline(always)]
    pub(crate) const fn new(allocation: *const u8, raw: *const u8) -> Self {
        Self { allocation, raw }
    }

    #[inline(always)]
    pub(crate) const fn from_start(start: *const u8) -> Self {
        Self::new(start, start)
    }

    /// Returns an index `n` bytes away from this one.
    #[inline(always)]
    #[must_use]
    pub fn advanced_by(self, n: isize) -> Self {
        Self::new(self.allocation, self.raw.wrapping_offset(n))
    }

    /// Returns the signed number of bytes from `self` to `other`.
    ///
    /// # Panics
    ///
    /// If the indices belong to different allocations.
    #[inline]
    #[track_caller]
    pub fn distance_to(self, other: Self) -> isize {
        self.byte_distance(other)
    }

    /// Always `true`.
    #[inline(always)]
    pub fn is_aligned(self) -> bool {
        true
    }

    #[inline(always)]
    pub(crate) fn assert_aligned(self) {}

    #[inline(always)]
    pub(crate) fn distance_unchecked(self, other: Self) -> isize {
        self.byte_distance_unchecked(other)
    }

    /// The address this index refers to.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const u8 {
        self.raw
    }
}

impl<T> From<SpanIndex<T>> for RawIndex {
    #[inline(always)]
    fn from(index: SpanIndex<T>) -> Self {
        RawIndex::new(index.allocation, index.raw)
    }
}

impl RawIndex {
    /// Reinterprets this byte position as a position in a span of `T`.
    ///
    /// The result is not validated; using a misaligned one for access panics.
    #[inline(always)]
    pub fn typed<T>(self) -> SpanIndex<T> {
        SpanIndex::new(self.allocation, self.raw)
    }
}
