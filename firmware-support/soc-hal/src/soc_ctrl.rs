// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::mmio::Mmio;

const CORE_STATUS: usize = 0;
const BOOT_ADDR: usize = 1;

/// Exit code written by the panic handlers.
pub const STATUS_PANIC: u32 = 0xdead;

/// SoC control registers. The testbench stops the simulation once the core
/// status register becomes non-zero.
#[derive(Clone)]
pub struct SocCtrl {
    regs: Mmio,
}

impl SocCtrl {
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid pointer that is backed
    /// by the memory mapped SoC control registers.
    pub const unsafe fn new(base_addr: *const ()) -> SocCtrl {
        SocCtrl {
            regs: Mmio::new(base_addr),
        }
    }

    pub fn set_core_status(&self, status: u32) {
        self.regs.write32(CORE_STATUS, status);
    }

    pub fn core_status(&self) -> u32 {
        self.regs.read32(CORE_STATUS)
    }

    pub fn boot_addr(&self) -> u32 {
        self.regs.read32(BOOT_ADDR)
    }
}

/// Report `status` to the testbench and park the core.
pub fn finish(soc_ctrl: &SocCtrl, status: u32) -> ! {
    soc_ctrl.set_core_status(status);
    loop {
        #[cfg(target_arch = "riscv32")]
        unsafe {
            riscv::asm::wfi();
        }
        #[cfg(not(target_arch = "riscv32"))]
        core::hint::spin_loop();
    }
}
