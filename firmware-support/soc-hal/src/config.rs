// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Memory map and clocking of the SoC the firmware runs on.

pub const SOCCTRL_BASE_ADDR: usize = 0x0300_0000;
pub const UART_BASE_ADDR: usize = 0x0300_2000;
pub const GPIO_BASE_ADDR: usize = 0x0300_5000;
pub const USER_ROM_BASE_ADDR: usize = 0x2000_0000;

/// Size of the user ROM in bytes.
pub const USER_ROM_SIZE: usize = 0x1000;

/// Clock the testbench drives the SoC with, in Hz.
pub const TB_FREQUENCY: u32 = 20_000_000;
/// Baud rate the testbench UART model listens on.
pub const TB_BAUDRATE: u32 = 115_200;
