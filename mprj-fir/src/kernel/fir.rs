//! Direct-form causal FIR kernel.

use super::sample::{Overflow, Sample};

/// FIR filter state: the caller-populated signal and taps plus the two
/// working buffers the kernel resets on every run.
///
/// `N` is both the signal length and the tap count.
///
/// # Example
/// ```
/// use mprj_fir::kernel::FirKernel;
///
/// let mut fir = FirKernel::<i32, 4>::new();
/// fir.load_signal(&[1, 2, 3, 4]);
/// fir.load_taps(&[1, 0, -1, 0]);
/// assert_eq!(fir.compute(), &[1, 2, 2, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct FirKernel<T: Sample, const N: usize> {
    input_signal: [T; N],
    taps: [T; N],
    /// Delay line for [`push`](Self::push); `input_buffer[k]` holds x[n-k].
    input_buffer: [T; N],
    output_signal: [T; N],
    overflow: Overflow,
}

impl<T: Sample, const N: usize> FirKernel<T, N> {
    /// Create a kernel with every array zeroed and wrapping arithmetic.
    ///
    /// # Panics
    ///
    /// `N` must be at least 1 (checked at compile time in `const` contexts).
    pub const fn new() -> Self {
        assert!(N > 0, "FIR kernel needs at least one tap");

        FirKernel {
            input_signal: [T::ZERO; N],
            taps: [T::ZERO; N],
            input_buffer: [T::ZERO; N],
            output_signal: [T::ZERO; N],
            overflow: Overflow::Wrapping,
        }
    }

    /// Create a kernel that accumulates under `overflow`.
    pub const fn with_overflow(overflow: Overflow) -> Self {
        let mut kernel = Self::new();
        kernel.overflow = overflow;
        kernel
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }

    /// Copy `signal` into the input signal array.
    pub fn load_signal(&mut self, signal: &[T; N]) {
        self.input_signal = *signal;
    }

    /// Copy `taps` into the coefficient array.
    pub fn load_taps(&mut self, taps: &[T; N]) {
        self.taps = *taps;
    }

    pub fn input_signal(&self) -> &[T; N] {
        &self.input_signal
    }

    pub fn input_signal_mut(&mut self) -> &mut [T; N] {
        &mut self.input_signal
    }

    pub fn taps(&self) -> &[T; N] {
        &self.taps
    }

    pub fn taps_mut(&mut self) -> &mut [T; N] {
        &mut self.taps
    }

    pub fn input_buffer(&self) -> &[T; N] {
        &self.input_buffer
    }

    /// Result of the last [`compute`](Self::compute), or zeros after
    /// [`initialize`](Self::initialize).
    pub fn output_signal(&self) -> &[T; N] {
        &self.output_signal
    }

    /// Zero the input buffer and the output signal over the full range `[0, N)`.
    ///
    /// The lab firmware's `initfir` wrote only the slot one past the end, N
    /// times over, so stale output leaked into the next run. Here every slot
    /// is cleared, which makes repeated [`compute`](Self::compute) calls
    /// return identical results.
    #[inline(always)]
    pub fn initialize(&mut self) {
        self.input_buffer = [T::ZERO; N];
        self.output_signal = [T::ZERO; N];
    }

    /// Filter the loaded signal through the loaded taps.
    ///
    /// `output_signal[i] = sum(input_signal[i - k] * taps[k])` for `k <= i`;
    /// samples before the start of the signal count as zero. Always starts
    /// with [`initialize`](Self::initialize), so the streaming state from
    /// [`push`](Self::push) is discarded.
    ///
    /// Always inlined, together with the per-sample arithmetic, so the loop
    /// lands in whatever section the caller is linked into (see
    /// [`fir_entry!`](crate::fir_entry)).
    #[inline(always)]
    pub fn compute(&mut self) -> &[T; N] {
        self.initialize();

        let overflow = self.overflow;
        for i in 0..N {
            for k in 0..N {
                if i >= k {
                    self.output_signal[i] = self.output_signal[i].mul_add(
                        self.input_signal[i - k],
                        self.taps[k],
                        overflow,
                    );
                }
            }
        }

        &self.output_signal
    }

    /// Feed one sample through the filter and return the new output.
    ///
    /// Uses the input buffer as the delay line. After
    /// [`initialize`](Self::initialize), pushing `input_signal[0..N]` in order
    /// yields the same values [`compute`](Self::compute) writes.
    pub fn push(&mut self, sample: T) -> T {
        self.input_buffer.copy_within(0..N - 1, 1);
        self.input_buffer[0] = sample;

        let mut acc = T::ZERO;
        for (&x, &h) in self.input_buffer.iter().zip(self.taps.iter()) {
            acc = acc.mul_add(x, h, self.overflow);
        }
        acc
    }
}

impl<T: Sample, const N: usize> Default for FirKernel<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{REFERENCE_OUTPUT, REFERENCE_SIGNAL, REFERENCE_TAPS};

    fn kernel<const N: usize>(signal: [i32; N], taps: [i32; N]) -> FirKernel<i32, N> {
        let mut fir = FirKernel::new();
        fir.load_signal(&signal);
        fir.load_taps(&taps);
        fir
    }

    #[test]
    fn four_tap_scenario() {
        let mut fir = kernel([1, 2, 3, 4], [1, 0, -1, 0]);
        assert_eq!(fir.compute(), &[1, 2, 2, 2]);
    }

    #[test]
    fn reference_vector() {
        let mut fir = kernel(REFERENCE_SIGNAL, REFERENCE_TAPS);
        assert_eq!(fir.compute(), &REFERENCE_OUTPUT);
    }

    #[test]
    fn zero_input_gives_zero_output() {
        let mut fir = kernel([0; 6], [7, -3, 12, 99, -1000, 5]);
        assert_eq!(fir.compute(), &[0; 6]);
    }

    #[test]
    fn zero_taps_give_zero_output() {
        let mut fir = kernel([9, -8, 7, 6], [0; 4]);
        assert_eq!(fir.compute(), &[0; 4]);
    }

    #[test]
    fn impulse_returns_taps() {
        let taps = [3, -1, 4, -1, 5, -9, 2, 6];
        let mut signal = [0; 8];
        signal[0] = 1;
        let mut fir = kernel(signal, taps);
        assert_eq!(fir.compute(), &taps);
    }

    #[test]
    fn delayed_impulse_shifts_taps() {
        let mut fir = kernel([0, 0, 1, 0, 0], [1, 2, 3, 4, 5]);
        assert_eq!(fir.compute(), &[0, 0, 1, 2, 3]);
    }

    #[test]
    fn repeated_compute_is_identical() {
        let mut fir = kernel(REFERENCE_SIGNAL, REFERENCE_TAPS);
        let first = *fir.compute();
        let second = *fir.compute();
        assert_eq!(first, second);
        assert_eq!(second, REFERENCE_OUTPUT);
    }

    #[test]
    fn output_is_causal() {
        let signal = [4, -2, 7, 1, 3, -5];
        let taps = [2, 1, -3, 8, 0, 6];
        let baseline = *kernel(signal, taps).compute();

        // Changing anything at index j must leave outputs before j untouched.
        for j in 0..6 {
            let mut late_signal = signal;
            late_signal[j] += 100;
            let mut late_taps = taps;
            late_taps[j] -= 50;

            let perturbed = *kernel(late_signal, late_taps).compute();
            assert_eq!(perturbed[..j], baseline[..j], "perturbed index {}", j);
        }
    }

    #[test]
    fn single_tap_scales_signal() {
        let mut fir = kernel([1, -2, 3], [5, 0, 0]);
        assert_eq!(fir.compute(), &[5, -10, 15]);

        let mut one = FirKernel::<i32, 1>::new();
        one.load_signal(&[6]);
        one.load_taps(&[7]);
        assert_eq!(one.compute(), &[42]);
    }

    #[test]
    fn initialize_clears_every_slot() {
        let mut fir = kernel([1, 1, 1], [1, 1, 1]);
        fir.compute();
        fir.push(5);
        fir.initialize();
        assert_eq!(fir.output_signal(), &[0; 3]);
        assert_eq!(fir.input_buffer(), &[0; 3]);
        // Signal and taps belong to the caller.
        assert_eq!(fir.input_signal(), &[1; 3]);
        assert_eq!(fir.taps(), &[1; 3]);
    }

    #[test]
    fn push_matches_compute() {
        let mut fir = kernel(REFERENCE_SIGNAL, REFERENCE_TAPS);
        let block = *fir.compute();

        fir.initialize();
        for (i, &x) in REFERENCE_SIGNAL.iter().enumerate() {
            assert_eq!(fir.push(x), block[i], "sample {}", i);
        }
    }

    #[test]
    fn push_keeps_running_past_n() {
        let mut fir = kernel([0; 3], [1, 1, 1]);
        let outputs = [1, 2, 3, 4, 5].map(|x| fir.push(x));
        // Three-tap moving sum
        assert_eq!(outputs, [1, 3, 6, 9, 12]);
        assert_eq!(fir.input_buffer(), &[5, 4, 3]);
    }

    #[test]
    fn wrapping_overflow() {
        let mut fir = kernel([i32::MAX, 1], [1, 1]);
        // out[1] = 1 * 1 + MAX * 1
        assert_eq!(fir.compute(), &[i32::MAX, i32::MIN]);
    }

    #[test]
    fn saturating_overflow() {
        let mut fir = kernel([i32::MAX, 1], [1, 1]);
        fir.set_overflow(Overflow::Saturating);
        assert_eq!(fir.compute(), &[i32::MAX, i32::MAX]);
    }

    #[test]
    fn saturating_i16() {
        let mut fir = FirKernel::<i16, 3>::with_overflow(Overflow::Saturating);
        assert_eq!(fir.overflow(), Overflow::Saturating);
        fir.load_signal(&[1000, 1000, -1000]);
        fir.load_taps(&[100, 0, 0]);
        assert_eq!(fir.compute(), &[i16::MAX, i16::MAX, i16::MIN]);
    }

    #[test]
    fn mutable_accessors_populate_arrays() {
        let mut fir = FirKernel::<i64, 2>::default();
        fir.input_signal_mut()[0] = 3;
        fir.taps_mut().copy_from_slice(&[2, 5]);
        assert_eq!(fir.compute(), &[6, 15]);
    }
}
