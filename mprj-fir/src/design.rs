//! Integer tap design for the FIR kernel.
//!
//! Windowed-sinc low-pass design, normalized to unity DC gain and then
//! quantized so the taps sum to approximately `scale`. The kernel runs on
//! integers, so the caller picks `scale` to trade precision against headroom
//! (a Q15 filter uses `scale = 1 << 15`).

use core::f32::consts::PI;

/// Window applied to the ideal sinc response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// No tapering.
    Rectangular,
    /// `0.54 - 0.46 cos(2πn/M)`.
    #[default]
    Hamming,
    /// `0.42 - 0.5 cos(2πn/M) + 0.08 cos(4πn/M)`.
    Blackman,
}

impl Window {
    /// Window value at index `n` of an `len`-point window.
    pub fn get(self, n: usize, len: usize) -> f32 {
        if len < 2 {
            return 1.0;
        }
        let phase = 2.0 * PI * n as f32 / (len - 1) as f32;
        match self {
            Window::Rectangular => 1.0,
            Window::Hamming => 0.54 - 0.46 * libm::cosf(phase),
            Window::Blackman => 0.42 - 0.5 * libm::cosf(phase) + 0.08 * libm::cosf(2.0 * phase),
        }
    }
}

/// Design an `N`-tap low-pass filter.
///
/// `cutoff` is in cycles per sample and must lie in `(0, 0.5)`; returns `None`
/// otherwise. The result is symmetric (linear phase) and its taps sum to
/// `scale` within rounding error.
///
/// # Example
/// ```
/// use mprj_fir::design::{lowpass, Window};
///
/// let taps = lowpass::<11>(0.2, 256, Window::Hamming).unwrap();
/// assert_eq!(taps[0], taps[10]);
/// ```
pub fn lowpass<const N: usize>(cutoff: f32, scale: i32, window: Window) -> Option<[i32; N]> {
    if !(cutoff > 0.0 && cutoff < 0.5) || N == 0 {
        log::debug!("design: rejected lowpass cutoff {} for {} taps", cutoff, N);
        return None;
    }

    let mut ideal = [0.0f32; N];
    let alpha = (N - 1) as f32 / 2.0;

    // Fill the first half and mirror it, so rounding can't break symmetry.
    for n in 0..(N + 1) / 2 {
        let x = n as f32 - alpha;
        let sinc = if x == 0.0 {
            2.0 * cutoff
        } else {
            libm::sinf(2.0 * PI * cutoff * x) / (PI * x)
        };
        let tap = sinc * window.get(n, N);
        ideal[n] = tap;
        ideal[N - 1 - n] = tap;
    }

    let gain: f32 = ideal.iter().sum();
    let mut taps = [0i32; N];
    for (q, &h) in taps.iter_mut().zip(ideal.iter()) {
        *q = libm::roundf(h / gain * scale as f32) as i32;
    }
    Some(taps)
}
