// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Multiply-accumulate, in hardware and in software.

/// A way to compute `a * b + c` (wrapping). The benchmark harness is written
/// against this trait so the hardware instruction and its software
/// equivalent are measured the same way.
pub trait MulAcc {
    /// Name used when reporting results.
    const NAME: &'static str;

    fn mul_acc(&self, a: u32, b: u32, c: u32) -> u32;
}

/// The MAC computed with the base instruction set.
#[derive(Debug, Default, Copy, Clone)]
pub struct SoftwareMac;

impl MulAcc for SoftwareMac {
    const NAME: &'static str = "sw mac";

    // Kept out of line so it is measured as the function call it replaces.
    #[inline(never)]
    fn mul_acc(&self, a: u32, b: u32, c: u32) -> u32 {
        a.wrapping_mul(b).wrapping_add(c)
    }
}

/// The MAC computed by the custom instruction.
#[cfg(target_arch = "riscv32")]
#[derive(Debug, Default, Copy, Clone)]
pub struct HardwareMac;

#[cfg(target_arch = "riscv32")]
impl MulAcc for HardwareMac {
    const NAME: &'static str = "hw mac";

    #[inline(always)]
    fn mul_acc(&self, a: u32, b: u32, c: u32) -> u32 {
        soc_hal::insn::hw_mac(a, b, c)
    }
}

/// The implementation selected by the `hw-mac` feature.
#[cfg(all(feature = "hw-mac", target_arch = "riscv32"))]
pub type SelectedMac = HardwareMac;
/// The implementation selected by the `hw-mac` feature.
#[cfg(not(all(feature = "hw-mac", target_arch = "riscv32")))]
pub type SelectedMac = SoftwareMac;

/// Expected MAC result, computed in 64 bits and truncated so that it shares
/// no code path with either implementation.
pub const fn reference_mac(a: u32, b: u32, c: u32) -> u32 {
    (a as u64 * b as u64 + c as u64) as u32
}
