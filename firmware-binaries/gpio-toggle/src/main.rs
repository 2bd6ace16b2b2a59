#![no_std]
#![cfg_attr(not(test), no_main)]

// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::uwriteln;

use soc_hal::soc_ctrl::{finish, STATUS_PANIC};
use soc_hal::Peripherals;
use soc_sys::printf;
use soc_sys::uart::{BufferedUart, UartConfig};

#[cfg(not(test))]
use riscv_rt::entry;

const PERIPHERALS: Peripherals = unsafe { Peripherals::new() };

/// Low half of the pins drives, high half listens.
const OUTPUTS: u32 = 0x0000_ffff;
const PATTERN: u32 = 0x0000_a5a5;

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    let Peripherals {
        soc_ctrl,
        uart,
        gpio,
        ..
    } = PERIPHERALS;
    let mut uart: BufferedUart<_, 32> = BufferedUart::init(uart, &UartConfig::TESTBENCH).unwrap();

    uwriteln!(uart, "gpio: {} outputs, pattern {}", OUTPUTS.count_ones(), PATTERN).unwrap();
    gpio.set_direction(OUTPUTS);
    gpio.write(PATTERN);
    printf!(&mut uart, "direction %x, output %x\n", gpio.direction(), gpio.output()).unwrap();
    printf!(&mut uart, "input %x\n", gpio.read()).unwrap();

    for _ in 0..4 {
        gpio.toggle(OUTPUTS);
        printf!(&mut uart, "toggled: output %x, input %x\n", gpio.output(), gpio.read()).unwrap();
    }
    uart.flush().unwrap();

    finish(&soc_ctrl, 1)
}

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    finish(&PERIPHERALS.soc_ctrl, STATUS_PANIC)
}
