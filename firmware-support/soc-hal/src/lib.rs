// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod config;
#[cfg(target_arch = "riscv32")]
pub mod cycle;
pub mod gpio;
pub mod insn;
pub mod mmio;
pub mod rom;
pub mod soc_ctrl;
pub mod uart;

use config::{GPIO_BASE_ADDR, SOCCTRL_BASE_ADDR, UART_BASE_ADDR, USER_ROM_BASE_ADDR};

/// Handles to every peripheral on the SoC, at the addresses from [`config`].
pub struct Peripherals {
    pub soc_ctrl: soc_ctrl::SocCtrl,
    pub uart: uart::Uart,
    pub gpio: gpio::Gpio,
    pub rom: rom::UserRom,
}

impl Peripherals {
    /// # Safety
    ///
    /// Must only be called on the SoC described by [`config`], and only once:
    /// every driver assumes exclusive ownership of its peripheral.
    pub const unsafe fn new() -> Peripherals {
        Peripherals {
            soc_ctrl: soc_ctrl::SocCtrl::new(SOCCTRL_BASE_ADDR as *const ()),
            uart: uart::Uart::new(UART_BASE_ADDR as *const ()),
            gpio: gpio::Gpio::new(GPIO_BASE_ADDR as *const ()),
            rom: rom::UserRom::new(USER_ROM_BASE_ADDR as *const ()),
        }
    }
}
