//! Helpers for driving the kernel the way the Caravel testbench does.
//!
//! The testbench populates the signal and taps, raises a marker while the
//! firmware filter runs, and compares the read-back output against known
//! values. This module provides those pieces without any board dependency:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`reference_response`] | Exact, widened convolution (golden model) |
//! | [`verify`] / [`check_output`] | Compare kernel output to the model or to fixed values |
//! | [`Runner`] | Brackets each `compute` with a marker [`OutputPin`] |
//! | [`HarnessError`] | Mismatch, reference overflow, busy cell, or pin failure |

mod error;


pub use error::HarnessError;

use embedded_hal::digital::OutputPin;

use crate::cell::{KernelCell, KernelGuard};
use crate::constants::{DEFAULT_TAPS, REFERENCE_SIGNAL, REFERENCE_TAPS};
use crate::kernel::{FirKernel, Sample};

/// Causal convolution of `signal` with `taps`, computed exactly in `i128`.
///
/// `i16` and `i32` inputs always fit. Extreme `i64` inputs can exceed
/// `i128`; that is reported as [`HarnessError::ReferenceOverflow`] for the
/// first output index affected.
pub fn reference_response<T, const N: usize>(
    signal: &[T; N],
    taps: &[T; N],
) -> Result<[i128; N], HarnessError>
where
    T: Sample + Into<i128>,
{
    let mut out = [0i128; N];
    for (index, y) in out.iter_mut().enumerate() {
        for k in 0..=index {
            let x: i128 = signal[index - k].into();
            let h: i128 = taps[k].into();
            let acc = *y;
            *y = x
                .checked_mul(h)
                .and_then(|term| acc.checked_add(term))
                .ok_or(HarnessError::ReferenceOverflow { index })?;
        }
    }
    Ok(out)
}

/// Check the kernel's current output against [`reference_response`].
///
/// Overflow in the kernel shows up as a mismatch, whatever its policy.
pub fn verify<T, const N: usize>(kernel: &FirKernel<T, N>) -> Result<(), HarnessError>
where
    T: Sample + Into<i128>,
{
    let expected = reference_response(kernel.input_signal(), kernel.taps())?;
    let actual = kernel.output_signal();
    for (index, (&want, &got)) in expected.iter().zip(actual.iter()).enumerate() {
        let got: i128 = got.into();
        if want != got {
            log::warn!("fir: output[{}] = {}, expected {}", index, got, want);
            return Err(HarnessError::Mismatch {
                index,
                expected: want,
                actual: got,
            });
        }
    }
    Ok(())
}

/// Compare `actual` to a fixed expected vector, reporting the first difference.
pub fn check_output<T, const N: usize>(
    actual: &[T; N],
    expected: &[T; N],
) -> Result<(), HarnessError>
where
    T: Sample + Into<i128>,
{
    match actual.iter().zip(expected.iter()).position(|(a, e)| a != e) {
        None => Ok(()),
        Some(index) => Err(HarnessError::Mismatch {
            index,
            expected: expected[index].into(),
            actual: actual[index].into(),
        }),
    }
}

/// Load the Caravel lab signal and taps.
pub fn load_lab_vectors(kernel: &mut FirKernel<i32, DEFAULT_TAPS>) {
    kernel.load_signal(&REFERENCE_SIGNAL);
    kernel.load_taps(&REFERENCE_TAPS);
}

/// Runs the kernel with a marker pin held high for the duration of each
/// `compute`, so an external observer (logic analyzer, testbench monitor) can
/// time it.
pub struct Runner<P> {
    marker: P,
    runs: u32,
}

impl<P: OutputPin> Runner<P> {
    pub fn new(marker: P) -> Self {
        Runner { marker, runs: 0 }
    }

    /// Number of completed runs.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Give the marker pin back.
    pub fn release(self) -> P {
        self.marker
    }

    /// Compute once, bracketed by the marker.
    ///
    /// A run counts once `compute` has finished. If lowering the marker then
    /// fails, the run is still counted, the pin error is returned and the
    /// marker may be left high; the output stays readable on the kernel.
    pub fn run<'k, T: Sample, const N: usize>(
        &mut self,
        kernel: &'k mut FirKernel<T, N>,
    ) -> Result<&'k [T; N], HarnessError<P::Error>> {
        self.marker.set_high().map_err(HarnessError::Pin)?;
        let output = kernel.compute();
        self.runs += 1;

        self.marker.set_low().map_err(HarnessError::Pin)?;
        log::debug!("fir: run {} complete", self.runs);
        Ok(output)
    }

    /// Lock `cell`, compute, and hand back the guard for read-back.
    pub fn run_cell<'c, T: Sample, const N: usize>(
        &mut self,
        cell: &'c KernelCell<T, N>,
    ) -> Result<KernelGuard<'c, T, N>, HarnessError<P::Error>> {
        let mut kernel = cell.try_lock().ok_or(HarnessError::Busy)?;
        self.run(&mut *kernel)?;
        Ok(kernel)
    }

    /// Compute and then [`verify`] the output.
    pub fn run_checked<T, const N: usize>(
        &mut self,
        kernel: &mut FirKernel<T, N>,
    ) -> Result<(), HarnessError<P::Error>>
    where
        T: Sample + Into<i128>,
    {
        self.run(kernel)?;
        verify(kernel).map_err(|e| e.widen())
    }
}
