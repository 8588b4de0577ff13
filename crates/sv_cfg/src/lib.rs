//! Macros for compilation control.
//!
//! Each crate of the workspace declares its own `cfg` module with
//! [`define_alias!`], turning a `#[cfg(...)]` predicate into a function-like
//! macro that either keeps or discards the tokens handed to it:
//!
//! ```
//! mod cfg {
//!     sv_cfg::define_alias! {
//!         #[cfg(debug_assertions)] => debug,
//!         #[cfg(feature = "never_enabled")] => never,
//!     }
//! }
//!
//! fn checked() -> bool {
//!     cfg::never! {
//!         if { true } else { false }
//!     }
//! }
//!
//! assert!(!checked());
//! assert!(!cfg::never!());
//! ```
//!
//! Unlike a plain `#[cfg]` attribute, the alias can be used in expression
//! position and supports an `if { .. } else { .. }` form.
#![no_std]

/// Keeps the provided tokens.
///
/// Used through an alias created by [`define_alias!`] whose predicate holds.
#[doc(hidden)]
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($p)* };
    ($($p:tt)*) => { $($p)* };
}

/// Discards the provided tokens.
///
/// Used through an alias created by [`define_alias!`] whose predicate fails.
#[doc(hidden)]
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($n)* };
    ($($p:tt)*) => {};
}

/// Defines one alias macro per `#[cfg(...)] => name` entry.
///
/// The generated alias is `pub`, so it must be declared inside a module and
/// invoked through its path (`crate::cfg::debug! { .. }`).
#[macro_export]
macro_rules! define_alias {
    () => {};
    (
        #[cfg($meta:meta)] => $name:ident
        $(, $($rest:tt)*)?
    ) => {
        #[cfg($meta)]
        #[doc = concat!("Passes the provided code through: `#[cfg(", stringify!($meta), ")]` is active.")]
        pub use $crate::enabled as $name;

        #[cfg(not($meta))]
        #[doc = concat!("Discards the provided code: `#[cfg(", stringify!($meta), ")]` is inactive.")]
        pub use $crate::disabled as $name;

        $( $crate::define_alias! { $($rest)* } )?
    };
}
