//! Low-level arithmetic used by the kernel's sample types.

pub mod intrinsics;
