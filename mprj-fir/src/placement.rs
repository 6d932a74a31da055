//! Entry points placed in a caller-chosen linker section.
//!
//! The Caravel harness jumps into the filter from user-project RAM, so the
//! firmware's `initfir`/`fir` routines have to be linked into that region.
//! [`fir_entry!`](crate::fir_entry) declares a static [`KernelCell`] and two
//! functions that operate on it, each tagged with `#[link_section]`:
//!
//! ```ignore
//! use mprj_fir::fir_entry;
//!
//! fir_entry! {
//!     pub static FIR: KernelCell<i32, 11>;
//!     init = initfir;
//!     compute = fir;
//!     section = ".mprjram";
//! }
//!
//! // Populate, run, read back through the returned guard.
//! FIR.try_lock().unwrap().load_taps(&TAPS);
//! let out = fir().unwrap();
//! let y0 = out.output_signal()[0];
//! ```
//!
//! The tap count must be a single token: a literal, a constant's name, or a
//! braced expression such as `{ 2 * TAPS }`.
//!
//! `section` is optional and defaults to `.mprjram`, the same name as
//! [`MPRJRAM_SECTION`](crate::constants::MPRJRAM_SECTION) (`link_section`
//! only takes a literal, so the macro spells it out). The attribute is
//! skipped on Apple targets, where Mach-O expects `segment,section` names.
//!
//! [`FirKernel::initialize`] and [`FirKernel::compute`] are
//! `#[inline(always)]`, as is the guard's deref, so the zeroing and the
//! multiply-accumulate loop are emitted inside the placed entry points
//! rather than in `.text`. Locking the cell goes through
//! `critical_section`, which stays wherever the platform links it.
//!
//! Both generated functions return the held [`KernelGuard`], or `None` if the
//! cell is already locked.
//!
//! [`KernelCell`]: crate::cell::KernelCell
//! [`KernelGuard`]: crate::cell::KernelGuard
//! [`FirKernel::initialize`]: crate::kernel::FirKernel::initialize
//! [`FirKernel::compute`]: crate::kernel::FirKernel::compute

/// Declare a static FIR kernel with `init`/`compute` entry points in a
/// specific linker section.
///
/// See the [module documentation](crate::placement) for syntax.
#[macro_export]
macro_rules! fir_entry {
    (
        $(#[$meta:meta])*
        $vis:vis static $cell:ident : KernelCell<$t:ty, $n:tt>;
        init = $init:ident;
        compute = $compute:ident;
    ) => {
        $crate::fir_entry! {
            $(#[$meta])*
            $vis static $cell: KernelCell<$t, $n>;
            init = $init;
            compute = $compute;
            section = ".mprjram";
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis static $cell:ident : KernelCell<$t:ty, $n:tt>;
        init = $init:ident;
        compute = $compute:ident;
        section = $section:literal;
    ) => {
        $(#[$meta])*
        $vis static $cell: $crate::cell::KernelCell<$t, { $n }> = $crate::cell::KernelCell::new();

        /// Zero the kernel's input buffer and output signal.
        #[cfg_attr(not(target_vendor = "apple"), link_section = $section)]
        #[inline(never)]
        $vis fn $init() -> ::core::option::Option<$crate::cell::KernelGuard<'static, $t, { $n }>> {
            let mut kernel = $cell.try_lock()?;
            kernel.initialize();
            ::core::option::Option::Some(kernel)
        }

        /// Filter the loaded signal; read the result through the returned guard.
        #[cfg_attr(not(target_vendor = "apple"), link_section = $section)]
        #[inline(never)]
        $vis fn $compute() -> ::core::option::Option<$crate::cell::KernelGuard<'static, $t, { $n }>> {
            let mut kernel = $cell.try_lock()?;
            kernel.compute();
            ::core::option::Option::Some(kernel)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::constants::{REFERENCE_OUTPUT, REFERENCE_SIGNAL, REFERENCE_TAPS};

    crate::fir_entry! {
        static LAB_FIR: KernelCell<i32, 11>;
        init = initfir;
        compute = fir;
    }

    crate::fir_entry! {
        /// Small kernel in an explicitly named text subsection.
        static SMALL_FIR: KernelCell<i16, 4>;
        init = small_init;
        compute = small_fir;
        section = ".text.small_fir";
    }

    // ELF linkers define __start_/__stop_ bounds for sections whose names
    // are valid C identifiers.
    #[cfg(target_os = "linux")]
    crate::fir_entry! {
        static PLACED_FIR: KernelCell<i32, 16>;
        init = placed_init;
        compute = placed_fir;
        section = "mprj_fir_placed";
    }

    #[cfg(target_os = "linux")]
    extern "C" {
        static __start_mprj_fir_placed: u8;
        static __stop_mprj_fir_placed: u8;
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn entry_points_live_in_requested_section() {
        let (start, stop) = unsafe {
            (
                core::ptr::addr_of!(__start_mprj_fir_placed) as usize,
                core::ptr::addr_of!(__stop_mprj_fir_placed) as usize,
            )
        };
        let init = placed_init as usize;
        let compute = placed_fir as usize;
        assert!(start <= init && init < stop, "init at {:#x}", init);
        assert!(start <= compute && compute < stop, "compute at {:#x}", compute);

        // The placed entry still filters correctly with the loop inlined.
        {
            let mut kernel = PLACED_FIR.try_lock().unwrap();
            let mut impulse = [0; 16];
            impulse[0] = 1;
            kernel.load_signal(&impulse);
            kernel.load_taps(&[3; 16]);
        }
        assert_eq!(placed_fir().unwrap().output_signal(), &[3; 16]);
        assert_eq!(placed_init().unwrap().output_signal(), &[0; 16]);
    }

    #[test]
    fn lab_entry_points() {
        {
            let mut kernel = LAB_FIR.try_lock().unwrap();
            kernel.load_signal(&REFERENCE_SIGNAL);
            kernel.load_taps(&REFERENCE_TAPS);
        }

        let out = fir().unwrap();
        assert_eq!(out.output_signal(), &REFERENCE_OUTPUT);
        // Entry points refuse to run while the guard is held.
        assert!(fir().is_none());
        assert!(initfir().is_none());
        drop(out);

        let cleared = initfir().unwrap();
        assert_eq!(cleared.output_signal(), &[0; 11]);
        assert_eq!(cleared.input_signal(), &REFERENCE_SIGNAL);
    }

    #[test]
    fn explicit_section_entry_points() {
        SMALL_FIR.try_lock().unwrap().load_signal(&[1, 2, 3, 4]);
        SMALL_FIR.try_lock().unwrap().load_taps(&[1, 0, -1, 0]);

        let first = *small_fir().unwrap().output_signal();
        let second = *small_fir().unwrap().output_signal();
        assert_eq!(first, [1, 2, 2, 2]);
        assert_eq!(first, second);
        assert!(small_init().is_some());
    }
}
