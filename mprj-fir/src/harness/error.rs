use core::convert::Infallible;

use thiserror::Error;

/// Failure while driving or checking the kernel from a harness.
///
/// `E` is the marker pin's error type; checks that never touch a pin use the
/// default [`Infallible`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError<E = Infallible> {
    /// Kernel output differs from the reference model.
    #[error("output mismatch at index {index}: expected {expected}, got {actual}")]
    Mismatch {
        index: usize,
        expected: i128,
        actual: i128,
    },
    /// The exact reference sum leaves `i128` (only reachable with `i64` samples).
    #[error("reference model overflows i128 at index {index}")]
    ReferenceOverflow { index: usize },
    /// The kernel cell is held by another guard.
    #[error("kernel cell is already locked")]
    Busy,
    /// Driving the marker pin failed.
    #[error("marker pin error: {0:?}")]
    Pin(E),
}

impl HarnessError {
    /// Re-type a pin-free error for use alongside pin errors.
    pub fn widen<E>(self) -> HarnessError<E> {
        match self {
            HarnessError::Mismatch {
                index,
                expected,
                actual,
            } => HarnessError::Mismatch {
                index,
                expected,
                actual,
            },
            HarnessError::ReferenceOverflow { index } => {
                HarnessError::ReferenceOverflow { index }
            }
            HarnessError::Busy => HarnessError::Busy,
            HarnessError::Pin(never) => match never {},
        }
    }
}
