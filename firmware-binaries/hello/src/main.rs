#![no_std]
#![cfg_attr(not(test), no_main)]

// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::uwriteln;

use soc_hal::config::USER_ROM_SIZE;
use soc_hal::soc_ctrl::{finish, STATUS_PANIC};
use soc_hal::Peripherals;
use soc_sys::printf;
use soc_sys::uart::{BufferedUart, UartConfig};

#[cfg(not(test))]
use riscv_rt::entry;

const PERIPHERALS: Peripherals = unsafe { Peripherals::new() };

/// Words printed from the start of the user ROM.
const ROM_WORDS: usize = 8;
/// Bytes printed as characters from the start of the user ROM.
const ROM_CHARS: usize = 64;

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    let Peripherals {
        soc_ctrl, uart, rom, ..
    } = PERIPHERALS;
    let mut uart: BufferedUart<_, 64> = BufferedUart::init(uart, &UartConfig::TESTBENCH).unwrap();

    printf!(&mut uart, "He%xo World!\n", 0x11).unwrap();
    uart.flush().unwrap();

    uwriteln!(uart, "user rom, {} bytes:", USER_ROM_SIZE).unwrap();
    for (i, word) in rom.words(ROM_WORDS).enumerate() {
        printf!(&mut uart, "  [%x] %x\n", i * 4, word).unwrap();
    }
    // Every byte goes out as is, NUL padding included.
    for byte in rom.bytes(ROM_CHARS.min(USER_ROM_SIZE)) {
        printf!(&mut uart, "%c", byte).unwrap();
    }
    uart.write_bytes(b"\n").unwrap();
    uart.flush().unwrap();

    finish(&soc_ctrl, 1)
}

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    finish(&PERIPHERALS.soc_ctrl, STATUS_PANIC)
}
