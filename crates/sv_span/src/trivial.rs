use bytemuck::{AnyBitPattern, NoUninit};

/// Element types whose memory can be read and reinterpreted byte-for-byte.
///
/// A type qualifies when every bit pattern is a valid value
/// ([`AnyBitPattern`]) and its representation holds no padding or other
/// uninitialized bytes ([`NoUninit`]). Integers, floats and `#[repr(C)]`
/// aggregates of them deriving [`bytemuck::Pod`] all qualify.
///
/// Only spans of such elements expose byte-level operations: conversion to a
/// [`RawSpan`](crate::RawSpan), [`view_as`](crate::Span::view_as) and the
/// copying [`loads`](crate::Span::loads) iterator. Spans of arbitrary elements
/// are restricted to typed, alignment-respecting access.
///
/// This trait is implemented automatically and cannot be implemented by hand.
pub trait BitwiseCopyable: AnyBitPattern + NoUninit + sealed::Sealed {}

impl<T: AnyBitPattern + NoUninit> BitwiseCopyable for T {}

mod sealed {
    pub trait Sealed {}

    impl<T: bytemuck::AnyBitPattern + bytemuck::NoUninit> Sealed for T {}
}
