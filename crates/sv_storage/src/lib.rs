//! Capabilities through which containers hand out views of their memory.
//!
//! A container participates by implementing [`ContiguousStorage`], returning
//! a [`Span`] over its current elements. The span borrows the container, so
//! any structural change (push, reserve, clear, drop) is rejected by the
//! borrow checker while the span is in use:
//!
//! ```compile_fail
//! use sv_storage::ContiguousStorage;
//!
//! let mut values = vec![1, 2, 3];
//! let span = values.storage();
//! values.push(4);
//! assert_eq!(span.len(), 3);
//! ```
//!
//! Containers whose memory may not be contiguous are reached through the
//! scope-bound [`StorageAccess`] instead, and in-place algorithms ask for
//! exclusive access through [`BufferMutable`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::{LinkedList, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

pub use sv_span::{Span, SpanMut};

// -----------------------------------------------------------------------------
// ContiguousStorage

/// A container that keeps its elements in one contiguous buffer.
///
/// The returned span covers exactly the current logical length.
///
/// # Examples
///
/// ```
/// use sv_storage::ContiguousStorage;
///
/// fn mean<S: ContiguousStorage<Element = f64> + ?Sized>(values: &S) -> f64 {
///     let span = values.storage();
///     span.loads().sum::<f64>() / span.len() as f64
/// }
///
/// assert_eq!(mean(&vec![1.0, 2.0, 6.0]), 3.0);
/// assert_eq!(mean(&[4.0, 8.0]), 6.0);
/// assert_eq!(mean(&[1.0, 2.0, 3.0][1..]), 2.5);
/// ```
pub trait ContiguousStorage {
    type Element;

    /// A read-only view over the elements, valid while `self` is borrowed.
    fn storage(&self) -> Span<'_, Self::Element>;
}

/// A [`ContiguousStorage`] that also hands out exclusive, writable views.
pub trait ContiguousStorageMut: ContiguousStorage {
    /// A mutable view over the elements, valid while `self` is borrowed.
    fn storage_mut(&mut self) -> SpanMut<'_, Self::Element>;
}

impl<T> ContiguousStorage for [T] {
    type Element = T;

    #[inline]
    fn storage(&self) -> Span<'_, T> {
        Span::new(self)
    }
}

impl<T> ContiguousStorageMut for [T] {
    #[inline]
    fn storage_mut(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(self)
    }
}

impl<T, const N: usize> ContiguousStorage for [T; N] {
    type Element = T;

    #[inline]
    fn storage(&self) -> Span<'_, T> {
        Span::new(self)
    }
}

impl<T, const N: usize> ContiguousStorageMut for [T; N] {
    #[inline]
    fn storage_mut(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(self)
    }
}

impl<T> ContiguousStorage for Vec<T> {
    type Element = T;

    #[inline]
    fn storage(&self) -> Span<'_, T> {
        Span::new(self)
    }
}

impl<T> ContiguousStorageMut for Vec<T> {
    #[inline]
    fn storage_mut(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(self)
    }
}

impl<T> ContiguousStorage for Box<[T]> {
    type Element = T;

    #[inline]
    fn storage(&self) -> Span<'_, T> {
        Span::new(self)
    }
}

impl<T> ContiguousStorageMut for Box<[T]> {
    #[inline]
    fn storage_mut(&mut self) -> SpanMut<'_, T> {
        SpanMut::new(self)
    }
}

/// UTF-8 code units.
impl ContiguousStorage for str {
    type Element = u8;

    #[inline]
    fn storage(&self) -> Span<'_, u8> {
        Span::new(self.as_bytes())
    }
}

/// UTF-8 code units.
impl ContiguousStorage for String {
    type Element = u8;

    #[inline]
    fn storage(&self) -> Span<'_, u8> {
        Span::new(self.as_bytes())
    }
}

impl<T> ContiguousStorage for Span<'_, T> {
    type Element = T;

    #[inline]
    fn storage(&self) -> Span<'_, T> {
        *self
    }
}

impl<T> ContiguousStorage for SpanMut<'_, T> {
    type Element = T;

    #[inline]
    fn storage(&self) -> Span<'_, T> {
        self.as_span()
    }
}

impl<T> ContiguousStorageMut for SpanMut<'_, T> {
    #[inline]
    fn storage_mut(&mut self) -> SpanMut<'_, T> {
        self.reborrow()
    }
}

impl<S: ContiguousStorage + ?Sized> ContiguousStorage for &S {
    type Element = S::Element;

    #[inline]
    fn storage(&self) -> Span<'_, S::Element> {
        (**self).storage()
    }
}

// -----------------------------------------------------------------------------
// StorageAccess

/// Scope-bound access to a read-only view of a container's elements.
///
/// Every [`ContiguousStorage`] provides it directly. A [`VecDeque`] whose
/// ring buffer currently wraps around is copied into a temporary contiguous
/// buffer first; the view passed to `body` then refers to that copy.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use sv_storage::StorageAccess;
///
/// let mut ring = VecDeque::from([2, 3]);
/// ring.push_front(1);
///
/// let sum = ring.with_storage(|span| span.iter().sum::<i32>());
/// assert_eq!(sum, 6);
/// ```
pub trait StorageAccess {
    type Element;

    /// Calls `body` with a view over the elements.
    fn with_storage<R>(&self, body: impl FnOnce(Span<'_, Self::Element>) -> R) -> R;
}

impl<S: ContiguousStorage + ?Sized> StorageAccess for S {
    type Element = S::Element;

    #[inline]
    fn with_storage<R>(&self, body: impl FnOnce(Span<'_, S::Element>) -> R) -> R {
        body(self.storage())
    }
}

impl<T: Clone> StorageAccess for VecDeque<T> {
    type Element = T;

    fn with_storage<R>(&self, body: impl FnOnce(Span<'_, T>) -> R) -> R {
        let (front, back) = self.as_slices();
        if back.is_empty() {
            return body(Span::new(front));
        }
        log::debug!(
            "materializing a contiguous copy of a split VecDeque ({} + {} elements)",
            front.len(),
            back.len(),
        );
        let copy: Vec<T> = self.iter().cloned().collect();
        body(copy.storage())
    }
}

// -----------------------------------------------------------------------------
// BufferMutable

/// Exclusive access to a container's elements as one mutable buffer.
///
/// The capability in-place algorithms are written against. Containers that
/// cannot provide a contiguous buffer keep the default, which returns `None`
/// without calling `body`.
///
/// # Examples
///
/// ```
/// use sv_storage::BufferMutable;
///
/// fn reverse<B: BufferMutable + ?Sized>(buffer: &mut B) -> bool {
///     buffer
///         .with_mutable_buffer(|mut span| span.as_mut_slice().reverse())
///         .is_some()
/// }
///
/// let mut values = vec![1, 2, 3];
/// assert!(reverse(&mut values));
/// assert_eq!(values, [3, 2, 1]);
/// ```
pub trait BufferMutable {
    type Element;

    /// Calls `body` with a mutable view over all elements, if the container
    /// supports it.
    #[inline]
    fn with_mutable_buffer<R>(
        &mut self,
        _body: impl FnOnce(SpanMut<'_, Self::Element>) -> R,
    ) -> Option<R> {
        None
    }
}

impl<S: ContiguousStorageMut + ?Sized> BufferMutable for S {
    type Element = S::Element;

    #[inline]
    fn with_mutable_buffer<R>(
        &mut self,
        body: impl FnOnce(SpanMut<'_, S::Element>) -> R,
    ) -> Option<R> {
        Some(body(self.storage_mut()))
    }
}

/// Rearranges the ring into one slice before handing it out.
impl<T> BufferMutable for VecDeque<T> {
    type Element = T;

    #[inline]
    fn with_mutable_buffer<R>(&mut self, body: impl FnOnce(SpanMut<'_, T>) -> R) -> Option<R> {
        Some(body(SpanMut::new(self.make_contiguous())))
    }
}

/// Nodes are allocated separately, so there is no buffer to hand out.
impl<T> BufferMutable for LinkedList<T> {
    type Element = T;
}
