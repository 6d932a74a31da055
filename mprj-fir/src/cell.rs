//! Fixed-address, non-reentrant storage for one FIR kernel.
//!
//! The lab harness expects the filter buffers to live in static memory and
//! the kernel to be entered from a single context. [`KernelCell`] gives a
//! [`FirKernel`] a `'static` home and hands out at most one [`KernelGuard`]
//! at a time. Claiming and releasing happen inside a critical section, so the
//! cell also works on cores without atomic read-modify-write (RV32I).

use core::cell::{Cell, UnsafeCell};
use core::ops::{Deref, DerefMut};

use critical_section::Mutex;

use crate::kernel::{FirKernel, Sample};

/// Static storage for a [`FirKernel`] with a single-owner lock.
pub struct KernelCell<T: Sample, const N: usize> {
    locked: Mutex<Cell<bool>>,
    kernel: UnsafeCell<FirKernel<T, N>>,
}

// SAFETY: The kernel is only reachable through a KernelGuard, and `locked`
// (checked and set inside a critical section) guarantees at most one guard
// exists at a time.
unsafe impl<T: Sample + Send, const N: usize> Sync for KernelCell<T, N> {}

impl<T: Sample, const N: usize> KernelCell<T, N> {
    /// Create an unlocked cell holding a zeroed kernel.
    pub const fn new() -> Self {
        KernelCell {
            locked: Mutex::new(Cell::new(false)),
            kernel: UnsafeCell::new(FirKernel::new()),
        }
    }

    /// Claim exclusive access. Returns `None` while another guard is alive.
    pub fn try_lock(&self) -> Option<KernelGuard<'_, T, N>> {
        let claimed = critical_section::with(|cs| {
            let locked = self.locked.borrow(cs);
            if locked.get() {
                false
            } else {
                locked.set(true);
                true
            }
        });

        if claimed {
            Some(KernelGuard { cell: self })
        } else {
            log::debug!("fir: kernel cell busy");
            None
        }
    }

    pub fn is_locked(&self) -> bool {
        critical_section::with(|cs| self.locked.borrow(cs).get())
    }

    fn unlock(&self) {
        critical_section::with(|cs| self.locked.borrow(cs).set(false));
    }
}

impl<T: Sample, const N: usize> Default for KernelCell<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to the kernel inside a [`KernelCell`]; releases on drop.
pub struct KernelGuard<'a, T: Sample, const N: usize> {
    cell: &'a KernelCell<T, N>,
}

impl<T: Sample, const N: usize> Deref for KernelGuard<'_, T, N> {
    type Target = FirKernel<T, N>;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        // SAFETY: This guard is the unique holder of the cell's lock.
        unsafe { &*self.cell.kernel.get() }
    }
}

impl<T: Sample, const N: usize> DerefMut for KernelGuard<'_, T, N> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: This guard is the unique holder of the cell's lock.
        unsafe { &mut *self.cell.kernel.get() }
    }
}

impl<T: Sample, const N: usize> Drop for KernelGuard<'_, T, N> {
    fn drop(&mut self) {
        self.cell.unlock();
    }
}
