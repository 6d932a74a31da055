//! # mprj-fir
//!
//! A `no_std`, zero-allocation direct-form FIR filter kernel for the Caravel
//! management SoC, where the harness runs the filter out of user-project RAM
//! (`.mprjram`). The kernel convolves a caller-populated signal with a tap
//! array of the same length and hands back the output buffer.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Kernel | [`kernel`] | [`FirKernel`](kernel::FirKernel): `initialize`, `compute`, `push` |
//! | Arithmetic | [`kernel`] / [`dsp`] | [`Sample`](kernel::Sample) types and [`Overflow`](kernel::Overflow) policy |
//! | Storage | [`cell`] | Static, single-owner kernel instance |
//! | Placement | [`placement`] | [`fir_entry!`] for link-section entry points |
//! | Design | [`design`] | Windowed-sinc integer taps (feature-gated) |
//! | Harness | [`harness`] | Golden model, verification, marker-pin runner (feature-gated) |
//!
//! ## Quick start
//!
//! ```
//! use mprj_fir::kernel::FirKernel;
//!
//! let mut fir = FirKernel::<i32, 4>::new();
//! fir.load_signal(&[1, 2, 3, 4]);
//! fir.load_taps(&[1, 0, -1, 0]);
//!
//! let out = fir.compute();
//! assert_eq!(out, &[1, 2, 2, 2]);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `design` | yes | Tap design (requires `libm`) |
//! | `harness` | yes | Test-harness helpers (requires `embedded-hal`) |
//!
//! ## Kernel parameters
//!
//! - **Tap count:** const generic `N`; the lab uses [`constants::DEFAULT_TAPS`]
//! - **Sample format:** `i16`, `i32` or `i64`, accumulated at the same width
//! - **Overflow:** wrapping by default, saturating on request
//! - **Section:** [`constants::MPRJRAM_SECTION`]

#![no_std]

pub mod constants;
pub mod dsp;
pub mod kernel;
pub mod cell;
pub mod placement;

#[cfg(feature = "design")]
pub mod design;

#[cfg(feature = "harness")]
pub mod harness;
