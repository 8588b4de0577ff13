use thiserror::Error;

// -----------------------------------------------------------------------------
// ContractViolation

/// A caller-side misuse detected by a checked span operation.
///
/// None of these are recoverable: checked operations never hand a
/// `ContractViolation` back to the caller. They report it through
/// [`handle_error`](Self::handle_error), which logs the violation and panics
/// (aborting the process when built with `panic = "abort"`).
///
/// The type is public so that panic messages can be matched precisely and so
/// that code building its own views on top of this crate can report misuse the
/// same way.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContractViolation {
    #[error("count must not be negative (got {count})")]
    NegativeCount { count: isize },

    #[error("count {count} with stride {stride} exceeds the addressable range")]
    CountOverflow { count: usize, stride: usize },

    #[error("base address must not be null")]
    NullBaseAddress,

    #[error("address {address:#x} is not properly aligned for accessing `{type_name}` (alignment {align})")]
    Misaligned {
        address: usize,
        align: usize,
        type_name: &'static str,
    },

    #[error("index out of bounds: the offset is {offset} but the count is {count}")]
    IndexOutOfBounds { offset: isize, count: usize },

    #[error("range of indices out of bounds: {start}..{end} is not within 0..{count}")]
    RangeOutOfBounds {
        start: isize,
        end: isize,
        count: usize,
    },

    #[error("indices from different allocations were compared ({lhs:#x} and {rhs:#x})")]
    CrossAllocationComparison { lhs: usize, rhs: usize },

    #[error("{bytes} bytes do not hold a whole number of `{type_name}` (stride {stride})")]
    MisalignedReinterpretation {
        bytes: usize,
        stride: usize,
        type_name: &'static str,
    },
}

impl ContractViolation {
    /// Terminates the current operation.
    ///
    /// The violation is logged at `error` level before panicking, so it shows
    /// up even when the panic message itself is lost (e.g. under an abort).
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn handle_error(&self) -> ! {
        log::error!("contract violation: {self}");
        panic!("{self}");
    }

    #[inline]
    pub(crate) fn misaligned<T>(address: usize) -> Self {
        ContractViolation::Misaligned {
            address,
            align: align_of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }
}

/// Converts an offset to a signed value for diagnostics, saturating at `isize::MAX`.
#[inline]
pub(crate) fn signed(offset: usize) -> isize {
    isize::try_from(offset).unwrap_or(isize::MAX)
}
