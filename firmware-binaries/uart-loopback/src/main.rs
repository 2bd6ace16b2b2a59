#![no_std]
#![cfg_attr(not(test), no_main)]

// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use ufmt::uwriteln;

use soc_hal::soc_ctrl::{finish, STATUS_PANIC};
use soc_hal::Peripherals;
use soc_sys::printf;
use soc_sys::uart::self_test::self_test;
use soc_sys::uart::{BufferedUart, UartConfig};

#[cfg(not(test))]
use riscv_rt::entry;

const PERIPHERALS: Peripherals = unsafe { Peripherals::new() };

/// Sent through the loopback. Contains directives that must come back
/// untouched.
const MESSAGE: &[u8] = b"echo 100%x\n";

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    let Peripherals { soc_ctrl, uart, .. } = PERIPHERALS;
    let mut uart: BufferedUart<_, 32> = BufferedUart::init(uart, &UartConfig::TESTBENCH).unwrap();

    uwriteln!(uart, "Start uart self test").unwrap();
    uart.flush().unwrap();
    let mut failures = 0;
    for (name, result) in self_test(&mut uart) {
        match result {
            None => uwriteln!(uart, "{}: None", name).unwrap(),
            Some(fail) => {
                failures += 1;
                uwriteln!(uart, "{}: Some({})", name, fail).unwrap()
            }
        }
    }

    let mut echo = [0u8; MESSAGE.len()];
    uart.set_loopback(true).unwrap();
    uart.write_bytes(MESSAGE).unwrap();
    uart.flush().unwrap();
    let received = uart.receive_into(&mut echo);
    uart.set_loopback(false).unwrap();

    printf!(&mut uart, "received %x of %x bytes: ", received, MESSAGE.len()).unwrap();
    uart.write_bytes(&echo[..received]).unwrap();
    if received != MESSAGE.len() {
        uart.write_bytes(b"\n").unwrap();
        failures += 1;
    }
    uwriteln!(uart, "Done").unwrap();
    uart.flush().unwrap();

    finish(&soc_ctrl, if failures == 0 { 1 } else { 2 })
}

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    finish(&PERIPHERALS.soc_ctrl, STATUS_PANIC)
}
