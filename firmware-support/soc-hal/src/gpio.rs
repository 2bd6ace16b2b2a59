// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::mmio::Mmio;

const DIRECTION: usize = 0;
const OUTPUT: usize = 1;
const INPUT: usize = 2;
const TOGGLE: usize = 3;

/// 32 general purpose pins. Bit `n` of every register is pin `n`.
#[derive(Clone)]
pub struct Gpio {
    regs: Mmio,
}

impl Gpio {
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid pointer that is backed
    /// by a memory mapped GPIO instance.
    pub const unsafe fn new(base_addr: *const ()) -> Gpio {
        Gpio {
            regs: Mmio::new(base_addr),
        }
    }

    /// Set bits configure the pin as output.
    pub fn set_direction(&self, outputs: u32) {
        self.regs.write32(DIRECTION, outputs);
    }

    pub fn direction(&self) -> u32 {
        self.regs.read32(DIRECTION)
    }

    pub fn write(&self, value: u32) {
        self.regs.write32(OUTPUT, value);
    }

    pub fn output(&self) -> u32 {
        self.regs.read32(OUTPUT)
    }

    pub fn read(&self) -> u32 {
        self.regs.read32(INPUT)
    }

    /// Invert the output of every pin whose bit is set in `mask`.
    pub fn toggle(&self, mask: u32) {
        self.regs.write32(TOGGLE, mask);
    }
}
