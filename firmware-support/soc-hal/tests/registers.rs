// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Register wrappers pointed at plain host memory.

use soc_hal::gpio::Gpio;
use soc_hal::mmio::Mmio;
use soc_hal::rom::UserRom;
use soc_hal::soc_ctrl::SocCtrl;

#[test]
fn byte_and_word_views_agree() {
    let mut mem = [0x6c6c_6548u32, 0x6f57_206f, 0, 0];
    let mmio = unsafe { Mmio::new(mem.as_mut_ptr() as *const ()) };

    assert_eq!(mmio.read(0), b'H');
    assert_eq!(mmio.read(4), b'o');
    assert_eq!(mmio.read32(1), 0x6f57_206f);

    mmio.write(8, 0xab);
    mmio.write32(3, 0x1234_5678);
    assert_eq!(mmio.read32(2), 0xab);
    assert_eq!(mmio.read(12), 0x78);
}

#[test]
fn rom_reads_in_address_order() {
    let mem = *b"Hello ROM!\0\0\0\0\0\0";
    let words: [u32; 4] = core::array::from_fn(|i| {
        u32::from_le_bytes([mem[4 * i], mem[4 * i + 1], mem[4 * i + 2], mem[4 * i + 3]])
    });
    let rom = unsafe { UserRom::new(words.as_ptr() as *const ()) };

    let bytes: Vec<u8> = rom.bytes(10).collect();
    assert_eq!(bytes, b"Hello ROM!");
    assert_eq!(rom.word(0), u32::from_le_bytes(*b"Hell"));
    assert_eq!(rom.words(4).count(), 4);
}

#[test]
fn gpio_registers() {
    let mut regs = [0u32; 4];
    let gpio = unsafe { Gpio::new(regs.as_mut_ptr() as *const ()) };

    gpio.set_direction(0x0000_00ff);
    gpio.write(0x0000_00a5);
    gpio.toggle(0x0f);

    assert_eq!(gpio.direction(), 0xff);
    assert_eq!(gpio.output(), 0xa5);
    assert_eq!(regs[3], 0x0f);
}

#[test]
fn core_status_register() {
    let mut regs = [0u32; 2];
    let soc_ctrl = unsafe { SocCtrl::new(regs.as_mut_ptr() as *const ()) };
    soc_ctrl.set_core_status(1);
    assert_eq!(soc_ctrl.core_status(), 1);
}
