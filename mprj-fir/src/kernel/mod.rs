//! The FIR kernel and the sample types it runs on.
//!
//! [`FirKernel`] owns the input signal, taps, input buffer and output signal.
//! The harness populates the first two, calls [`FirKernel::compute`] and reads
//! the returned output. The kernel cannot fail; overflow behavior is chosen up
//! front through [`Overflow`].

mod fir;
mod sample;

pub use fir::FirKernel;
pub use sample::{Overflow, Sample};
