#![no_std]
#![cfg_attr(not(test), no_main)]

// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use log::LevelFilter;
use ufmt::uwriteln;

use soc_hal::soc_ctrl::{finish, STATUS_PANIC};
use soc_hal::Peripherals;
use soc_sys::bench::{Harness, Operands};
use soc_sys::mac::{SelectedMac, SoftwareMac};
use soc_sys::time::{self_test::self_test, McycleClock};
use soc_sys::uart::{BufferedUart, UartConfig};

#[cfg(not(test))]
use riscv_rt::entry;

const PERIPHERALS: Peripherals = unsafe { Peripherals::new() };

const CALIBRATION_ROUNDS: u32 = 16;

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    let Peripherals { soc_ctrl, uart, .. } = PERIPHERALS;
    // The logger shares the peripheral with `uart`, flush before logging.
    unsafe { soc_sys::uart::log::init(uart.clone(), LevelFilter::Info) };
    let mut uart: BufferedUart<_, 64> = BufferedUart::init(uart, &UartConfig::TESTBENCH).unwrap();

    uwriteln!(uart, "Start time self test").unwrap();
    for (name, result) in self_test(McycleClock) {
        match result {
            None => uwriteln!(uart, "{}: None", name).unwrap(),
            Some(fail) => uwriteln!(uart, "{}: Some({})", name, fail).unwrap(),
        }
    }
    uart.flush().unwrap();

    let mut harness = Harness::new(McycleClock);
    let baseline = harness.calibrate(CALIBRATION_ROUNDS);
    log::info!("baseline: {}", baseline);

    let operands = Operands { a: 7, b: 6, c: 5 };
    let comparison = harness.compare(&SelectedMac::default(), &SoftwareMac, operands);
    comparison.report(&mut uart).unwrap();
    uart.flush().unwrap();

    finish(&soc_ctrl, 1)
}

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    finish(&PERIPHERALS.soc_ctrl, STATUS_PANIC)
}
