// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Register level access to the 16550 compatible UART.
//!
//! The registers are 32 bits apart. Only the low byte of each is used.

use crate::mmio::Mmio;
use ufmt::derive::uDebug;

const RBR_THR_DLL: usize = 0x00;
const IER_DLM: usize = 0x04;
const FCR: usize = 0x08;
const LCR: usize = 0x0c;
const MCR: usize = 0x10;
const LSR: usize = 0x14;

const LCR_DLAB: u8 = 1 << 7;
const LCR_8N1: u8 = 0b0000_0011;
/// Enable both FIFOs, clear them, receive trigger at 14 bytes.
const FCR_ENABLE_CLEAR: u8 = 0b1100_0111;
const MCR_LOOPBACK: u8 = 1 << 4;

const LSR_DATA_READY: u8 = 1 << 0;
const LSR_THR_EMPTY: u8 = 1 << 5;
const LSR_TX_IDLE: u8 = 1 << 6;

/// Decoded line status register.
#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartStatus {
    /// At least one received byte is waiting in the receive FIFO.
    pub data_ready: bool,
    /// The transmit FIFO is empty and accepts a burst of `FIFO_DEPTH` bytes.
    pub transmit_holding_empty: bool,
    /// The transmit FIFO and the shift register are both empty.
    pub transmitter_idle: bool,
}

impl UartStatus {
    pub const fn from_lsr(lsr: u8) -> UartStatus {
        UartStatus {
            data_ready: lsr & LSR_DATA_READY != 0,
            transmit_holding_empty: lsr & LSR_THR_EMPTY != 0,
            transmitter_idle: lsr & LSR_TX_IDLE != 0,
        }
    }
}

/// The byte oriented device underneath the buffered UART driver.
///
/// Implementations do no buffering of their own beyond the hardware FIFO.
pub trait SerialPort {
    /// Bytes the transmit FIFO is guaranteed to accept after it reported
    /// [`UartStatus::transmit_holding_empty`].
    const FIFO_DEPTH: usize;

    /// Program the baud rate divisor and set the line to 8N1 with FIFOs on.
    fn configure(&mut self, divisor: u16);

    fn read_status(&self) -> UartStatus;

    /// Write a byte into the transmit FIFO. Space must have been checked.
    fn write_data(&mut self, byte: u8);

    /// Pop a byte from the receive FIFO. Availability must have been checked.
    fn read_data(&mut self) -> u8;

    fn set_loopback(&mut self, enable: bool);
}

/// `Uart` is the memory mapped 16550 UART.
#[derive(Clone)]
pub struct Uart {
    regs: Mmio,
}

impl Uart {
    /// Create a new [`Uart`] instance given a base address.
    ///
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid pointer that is backed
    /// by a memory mapped 16550 UART instance.
    pub const unsafe fn new(base_addr: *const ()) -> Uart {
        Uart {
            regs: Mmio::new(base_addr),
        }
    }
}

impl SerialPort for Uart {
    const FIFO_DEPTH: usize = 16;

    fn configure(&mut self, divisor: u16) {
        let [dll, dlm] = divisor.to_le_bytes();
        // Interrupts stay off, everything is polled.
        self.regs.write(IER_DLM, 0);
        self.regs.write(LCR, LCR_DLAB);
        self.regs.write(RBR_THR_DLL, dll);
        self.regs.write(IER_DLM, dlm);
        self.regs.write(LCR, LCR_8N1);
        self.regs.write(FCR, FCR_ENABLE_CLEAR);
        self.regs.write(MCR, 0);
    }

    fn read_status(&self) -> UartStatus {
        UartStatus::from_lsr(self.regs.read(LSR))
    }

    fn write_data(&mut self, byte: u8) {
        self.regs.write(RBR_THR_DLL, byte);
    }

    fn read_data(&mut self) -> u8 {
        self.regs.read(RBR_THR_DLL)
    }

    fn set_loopback(&mut self, enable: bool) {
        let mcr = self.regs.read(MCR);
        let mcr = if enable {
            mcr | MCR_LOOPBACK
        } else {
            mcr & !MCR_LOOPBACK
        };
        self.regs.write(MCR, mcr);
    }
}

/// Baud rate divisor for a 16x oversampling UART.
///
/// Returns `None` when the result is zero or does not fit the 16-bit divisor
/// latch.
pub const fn divisor(frequency: u32, baud_rate: u32) -> Option<u16> {
    let oversampled = match baud_rate.checked_mul(16) {
        Some(0) | None => return None,
        Some(oversampled) => oversampled,
    };
    let divisor = frequency / oversampled;
    if divisor == 0 || divisor > u16::MAX as u32 {
        None
    } else {
        Some(divisor as u16)
    }
}
