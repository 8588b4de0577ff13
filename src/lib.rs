//! Borrowed, bounds-checked views over contiguous memory.
//!
//! - [`span`]: the typed [`Span`](span::Span) and
//!   [`SpanMut`](span::SpanMut) views, the untyped
//!   [`RawSpan`](span::RawSpan), and their allocation-tagged indices.
//! - [`storage`]: the capabilities containers implement to hand out views.
//! - [`cfg`]: compilation-control macros shared by the workspace.
//!
//! ```
//! use sv_core::span::Span;
//! use sv_core::storage::ContiguousStorage;
//!
//! let values = vec![10, 20, 30, 40, 50];
//! let view: Span<'_, i32> = values.storage();
//!
//! assert_eq!(view[2], 30);
//! assert_eq!(view.prefix(2), [10, 20]);
//! assert_eq!(view.drop_last(2).len(), 3);
//! assert_eq!(view.suffix(1), [50]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use sv_cfg as cfg;
pub use sv_span as span;
pub use sv_storage as storage;
