//! Non-owning, bounds-checked views over contiguous memory.
//!
//! A view borrows a block of initialized values from an owner without taking
//! ownership of the allocation. Slicing and reinterpretation never allocate
//! and never copy, and the lifetime `'a` of every view is tied to the borrow
//! of its owner, so the borrow checker rejects any use of a view after the
//! owner has been mutated, moved or dropped.
//!
//! **Span** and **SpanMut**
//!
//! [`Span<'a, T>`] is a `Copy` window over `len()` elements of `T`, similar to
//! `&'a [T]` but addressed through allocation-tagged [`SpanIndex`] values.
//! [`SpanMut<'a, T>`] is the exclusive, read-write counterpart.
//!
//! **RawSpan**
//!
//! [`RawSpan<'a>`] is the untyped counterpart, indexed in bytes. It loads
//! fixed-layout values from byte offsets and reinterprets whole byte ranges as
//! typed spans. Conversions between `Span` and `RawSpan` are O(1) and limited
//! to [`BitwiseCopyable`] elements.
//!
//! **Contract violations**
//!
//! Checked operations never return errors. Misuse such as an out-of-bounds
//! index is a bug in the caller: it is reported through
//! [`ContractViolation::handle_error`], which logs and panics. Every checked
//! operation has an `unsafe` unchecked sibling for hot paths whose callers
//! have already proven the precondition.
#![expect(unsafe_code, reason = "Spans are built on raw pointers.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    sv_cfg::define_alias! {
        #[cfg(any(feature = "debug", debug_assertions))] => debug,
        #[cfg(feature = "serde")] => serde,
    }
}

// -----------------------------------------------------------------------------
// Modules

#[macro_use]
mod common;

mod index;
mod iter;
mod raw_span;
mod span;
mod span_mut;
mod trivial;

pub mod violation;

cfg::serde! {
    mod serde_impls;
}

// -----------------------------------------------------------------------------
// Top-level exports

pub use index::{RawIndex, SpanIndex};
pub use iter::{Iter, IterMut, Loads};
pub use raw_span::RawSpan;
pub use span::Span;
pub use span_mut::SpanMut;
pub use trivial::BitwiseCopyable;
pub use violation::ContractViolation;
