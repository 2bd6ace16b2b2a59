// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Access to the `mcycle` counter. Only available on the target, host
//! code measures with its own clock.

/// Low 32 bits of the machine cycle counter.
///
/// Only the low word is used, so the value wraps every 2^32 cycles.
#[inline(always)]
pub fn read_mcycle() -> u32 {
    riscv::register::mcycle::read() as u32
}
