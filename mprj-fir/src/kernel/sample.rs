//! Sample element types and their multiply-accumulate arithmetic.

use core::fmt::Debug;

use crate::dsp::intrinsics::{multiply_accumulate_16x16, saturate16, saturate32, saturate64};

/// What a multiply-accumulate does when the exact result leaves the element range.
///
/// The policy is applied per accumulation step, so a saturating sum can clip
/// on an intermediate term and stay clipped even if later terms would bring
/// the exact total back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Two's complement wraparound, what the RV32 core does natively.
    #[default]
    Wrapping,
    /// Clamp to the element type's `MIN..=MAX`.
    Saturating,
}

/// Element type the FIR kernel filters.
///
/// Accumulation always happens at the width of the element type itself.
pub trait Sample: Copy + Default + PartialEq + Debug {
    /// Additive identity; buffers are reset to this.
    const ZERO: Self;

    /// `self + a * b`, wrapping on overflow.
    fn mul_add_wrapping(self, a: Self, b: Self) -> Self;

    /// `self + a * b`, clamped to the type's range.
    fn mul_add_saturating(self, a: Self, b: Self) -> Self;

    /// `self + a * b` under the given overflow policy.
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self, overflow: Overflow) -> Self {
        match overflow {
            Overflow::Wrapping => self.mul_add_wrapping(a, b),
            Overflow::Saturating => self.mul_add_saturating(a, b),
        }
    }
}

impl Sample for i16 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn mul_add_wrapping(self, a: Self, b: Self) -> Self {
        self.wrapping_add(a.wrapping_mul(b))
    }

    #[inline(always)]
    fn mul_add_saturating(self, a: Self, b: Self) -> Self {
        // |self| + |a * b| <= 2^15 + 2^30, well inside i32
        saturate16(multiply_accumulate_16x16(self as i32, a, b))
    }
}

impl Sample for i32 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn mul_add_wrapping(self, a: Self, b: Self) -> Self {
        self.wrapping_add(a.wrapping_mul(b))
    }

    #[inline(always)]
    fn mul_add_saturating(self, a: Self, b: Self) -> Self {
        saturate32(self as i64 + a as i64 * b as i64)
    }
}

impl Sample for i64 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn mul_add_wrapping(self, a: Self, b: Self) -> Self {
        self.wrapping_add(a.wrapping_mul(b))
    }

    #[inline(always)]
    fn mul_add_saturating(self, a: Self, b: Self) -> Self {
        saturate64(self as i128 + a as i128 * b as i128)
    }
}
