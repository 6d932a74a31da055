//! DSP instruction wrappers with pure-Rust fallbacks.
//!
//! On `arm` targets with the DSP extension these compile to single ARM
//! instructions. Everywhere else (the RV32 management core, host tests) the
//! equivalent pure-Rust implementations are used.

/// Saturate an `i32` to `i16` range (`-32768..=32767`).
///
/// Maps to ARM `SSAT #16`.
#[inline(always)]
pub fn saturate16(val: i32) -> i16 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #16, {val}",
                out = out(reg) out,
                val = in(reg) val,
            );
        }
        out as i16
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        if val > i16::MAX as i32 {
            i16::MAX
        } else if val < i16::MIN as i32 {
            i16::MIN
        } else {
            val as i16
        }
    }
}

/// Saturate an `i64` to `i32` range.
///
/// No single-instruction form exists for a 64-bit source, so this is pure Rust
/// on every target.
#[inline(always)]
pub fn saturate32(val: i64) -> i32 {
    if val > i32::MAX as i64 {
        i32::MAX
    } else if val < i32::MIN as i64 {
        i32::MIN
    } else {
        val as i32
    }
}

/// Saturate an `i128` to `i64` range.
#[inline(always)]
pub fn saturate64(val: i128) -> i64 {
    if val > i64::MAX as i128 {
        i64::MAX
    } else if val < i64::MIN as i128 {
        i64::MIN
    } else {
        val as i64
    }
}

/// Multiply-accumulate bottom halfwords: `sum + a * b`. Maps to ARM `SMLABB`.
///
/// The product of two `i16` always fits in `i32`; the caller must keep `sum`
/// far enough from the `i32` limits that the addition cannot overflow.
#[inline(always)]
pub fn multiply_accumulate_16x16(sum: i32, a: i16, b: i16) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "smlabb {out}, {a}, {b}, {sum}",
                out = out(reg) out,
                a = in(reg) a as i32,
                b = in(reg) b as i32,
                sum = in(reg) sum,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        sum + (a as i32) * (b as i32)
    }
}
