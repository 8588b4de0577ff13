use core::fmt;
use core::iter::FusedIterator;
use core::slice;

use crate::index::SpanIndex;
use crate::span::Span;
use crate::span_mut::SpanMut;
use crate::trivial::BitwiseCopyable;

// -----------------------------------------------------------------------------
// Iter

/// Iterator over references to the elements of a [`Span`].
///
/// Iterating does not consume the span: calling [`Span::iter`] again
/// replays the same elements.
pub struct Iter<'a, T> {
    start: SpanIndex<T>,
    inner: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(span: Span<'a, T>) -> Self {
        Self {
            start: span.start_index(),
            inner: span.as_slice().iter(),
        }
    }

    /// The elements not yet yielded, as a span in the same allocation.
    #[inline]
    pub fn as_span(&self) -> Span<'a, T> {
        let rest = self.inner.as_slice();
        Span::from_start_unchecked(self.start.relocated(rest.as_ptr()), rest.len())
    }
}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.inner.nth(n)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.as_span()).finish()
    }
}

// -----------------------------------------------------------------------------
// IterMut

/// Iterator over mutable references to the elements of a [`SpanMut`].
pub struct IterMut<'a, T> {
    start: SpanIndex<T>,
    inner: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(span: SpanMut<'a, T>) -> Self {
        Self {
            start: span.start_index(),
            inner: span.into_mut_slice().iter_mut(),
        }
    }

    /// The elements not yet yielded, as a read-only span in the same
    /// allocation.
    #[inline]
    pub fn into_span(self) -> Span<'a, T> {
        let rest = self.inner.into_slice();
        Span::from_start_unchecked(self.start.relocated(rest.as_ptr()), rest.len())
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.inner.as_slice()).finish()
    }
}

// -----------------------------------------------------------------------------
// Loads

/// Iterator yielding copies of the elements of a [`Span`] of
/// [`BitwiseCopyable`] values.
///
/// # Examples
///
/// ```
/// use sv_span::Span;
///
/// let values = [1.5f64, 2.5, 3.0];
/// let mean = Span::new(&values).loads().sum::<f64>() / values.len() as f64;
/// assert_eq!(mean, 7.0 / 3.0);
/// ```
#[derive(Clone)]
pub struct Loads<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T: BitwiseCopyable> Loads<'a, T> {
    #[inline]
    pub(crate) fn new(span: Span<'a, T>) -> Self {
        Self {
            inner: Iter::new(span),
        }
    }
}

impl<T: BitwiseCopyable> Iterator for Loads<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: BitwiseCopyable> DoubleEndedIterator for Loads<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().copied()
    }
}

impl<T: BitwiseCopyable> ExactSizeIterator for Loads<'_, T> {}
impl<T: BitwiseCopyable> FusedIterator for Loads<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Loads<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Loads").field(&self.inner.as_span()).finish()
    }
}
