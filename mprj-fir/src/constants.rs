/// Tap count used by the Caravel lab firmware.
pub const DEFAULT_TAPS: usize = 11;

/// Linker section the harness executes the kernel from (user-project RAM).
///
/// [`fir_entry!`](crate::fir_entry) uses this name when no `section` is given.
pub const MPRJRAM_SECTION: &str = ".mprjram";

/// Coefficients loaded by the Caravel lab testbench.
pub const REFERENCE_TAPS: [i32; DEFAULT_TAPS] = [0, -10, -9, 23, 56, 63, 56, 23, -9, -10, 0];

/// Input samples loaded by the Caravel lab testbench.
pub const REFERENCE_SIGNAL: [i32; DEFAULT_TAPS] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Output the testbench checks for [`REFERENCE_SIGNAL`] filtered by [`REFERENCE_TAPS`].
pub const REFERENCE_OUTPUT: [i32; DEFAULT_TAPS] =
    [0, -10, -29, -25, 35, 158, 337, 539, 732, 915, 1098];
