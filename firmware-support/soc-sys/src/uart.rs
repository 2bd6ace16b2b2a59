// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

/*! Buffered, flush synchronized UART output.

[`BufferedUart`] stages outgoing bytes in a fixed size software queue and
moves them into the hardware FIFO whenever the peripheral reports that it is
empty. Output is only guaranteed to have left the chip after [`BufferedUart::flush`]
returned, so call it at message boundaries: before timing sensitive code and
before the program finishes.

Every wait on the peripheral is bounded by a poll limit. A peripheral that
does not make progress within that limit is reported as
[`UartError::TransmitTimeout`], which callers are expected to treat as fatal.
*/

pub mod log;

use heapless::Deque;
use soc_hal::config::{TB_BAUDRATE, TB_FREQUENCY};
use soc_hal::uart::{divisor, SerialPort, UartStatus};
use ufmt::derive::uDebug;

use crate::printf::ByteSink;

/// Status register reads before a wait is given up.
pub const DEFAULT_POLL_LIMIT: u32 = 1_000_000;

#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartError {
    /// The configured frequency and baud rate do not give a usable divisor.
    DivisorOutOfRange,
    /// The peripheral did not accept or drain data within the poll limit.
    TransmitTimeout,
}

pub struct ReceiveBufferEmpty;

#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Peripheral clock in Hz.
    pub frequency: u32,
    pub baud_rate: u32,
}

impl UartConfig {
    /// The settings the simulation testbench expects.
    pub const TESTBENCH: UartConfig = UartConfig {
        frequency: TB_FREQUENCY,
        baud_rate: TB_BAUDRATE,
    };
}

/// A UART with a software transmit queue of `N` bytes in front of the
/// hardware FIFO.
pub struct BufferedUart<P: SerialPort, const N: usize> {
    port: P,
    staging: Deque<u8, N>,
    poll_limit: u32,
}

impl<P: SerialPort, const N: usize> BufferedUart<P, N> {
    /// Configure `port` and take ownership of it.
    pub fn init(mut port: P, config: &UartConfig) -> Result<Self, UartError> {
        let divisor =
            divisor(config.frequency, config.baud_rate).ok_or(UartError::DivisorOutOfRange)?;
        port.configure(divisor);
        ::log::debug!(
            "uart: {} baud at {} Hz, divisor {}",
            config.baud_rate,
            config.frequency,
            divisor
        );
        Ok(Self::attach(port))
    }

    /// Wrap a port that has already been configured.
    pub fn attach(port: P) -> Self {
        BufferedUart {
            port,
            staging: Deque::new(),
            poll_limit: DEFAULT_POLL_LIMIT,
        }
    }

    /// Change the number of status polls a single wait may take. At least one
    /// poll is always made.
    pub fn with_poll_limit(mut self, poll_limit: u32) -> Self {
        self.poll_limit = poll_limit.max(1);
        self
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Bytes staged in software that have not reached the hardware yet.
    pub fn pending(&self) -> usize {
        self.staging.len()
    }

    /// Queue one byte for transmission.
    ///
    /// When the staging queue is full this blocks until the hardware took a
    /// burst of bytes.
    pub fn enqueue(&mut self, byte: u8) -> Result<(), UartError> {
        if self.staging.is_full() {
            self.drain_burst()?;
        }
        match self.staging.push_back(byte) {
            Ok(()) => {
                self.drain_ready();
                Ok(())
            }
            // Only happens without staging capacity (`N == 0`).
            Err(byte) => {
                self.wait_for(|status| status.transmit_holding_empty)?;
                self.port.write_data(byte);
                Ok(())
            }
        }
    }

    /// Queue `bytes` verbatim. No formatting directives are interpreted.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), UartError> {
        for &b in bytes {
            self.enqueue(b)?;
        }
        Ok(())
    }

    /// Block until every queued byte has been shifted out on the line.
    pub fn flush(&mut self) -> Result<(), UartError> {
        while !self.staging.is_empty() {
            self.drain_burst()?;
        }
        self.wait_for(|status| status.transmitter_idle)
    }

    /// Route the transmitter into the receiver. Pending output is flushed
    /// first so that no byte is split between the line and the loopback.
    pub fn set_loopback(&mut self, enable: bool) -> Result<(), UartError> {
        self.flush()?;
        self.port.set_loopback(enable);
        ::log::trace!("uart: loopback {}", enable);
        Ok(())
    }

    /// Take a received byte if one is available.
    pub fn try_receive(&mut self) -> Result<u8, ReceiveBufferEmpty> {
        if self.port.read_status().data_ready {
            Ok(self.port.read_data())
        } else {
            Err(ReceiveBufferEmpty)
        }
    }

    /// Wait, without a bound, for the next received byte.
    pub fn receive(&mut self) -> u8 {
        loop {
            self.drain_ready();
            if let Ok(val) = self.try_receive() {
                return val;
            }
        }
    }

    /// Fill `buf` with received bytes. Stops when `buf` is full or when no
    /// byte arrived within the poll limit, and returns the number of bytes
    /// written. Staged output keeps draining while waiting.
    pub fn receive_into(&mut self, buf: &mut [u8]) -> usize {
        let mut received = 0;
        'slots: for slot in buf.iter_mut() {
            for _ in 0..self.poll_limit {
                self.drain_ready();
                if let Ok(byte) = self.try_receive() {
                    *slot = byte;
                    received += 1;
                    continue 'slots;
                }
            }
            break;
        }
        received
    }

    /// Push staged bytes to the hardware if it has room, without waiting.
    fn drain_ready(&mut self) {
        if !self.staging.is_empty() && self.port.read_status().transmit_holding_empty {
            self.push_burst();
        }
    }

    /// Wait for the hardware FIFO to empty, then fill it from the staging queue.
    fn drain_burst(&mut self) -> Result<(), UartError> {
        self.wait_for(|status| status.transmit_holding_empty)?;
        self.push_burst();
        Ok(())
    }

    fn push_burst(&mut self) {
        for _ in 0..P::FIFO_DEPTH {
            match self.staging.pop_front() {
                Some(byte) => self.port.write_data(byte),
                None => break,
            }
        }
    }

    fn wait_for(&self, ready: impl Fn(UartStatus) -> bool) -> Result<(), UartError> {
        for _ in 0..self.poll_limit {
            if ready(self.port.read_status()) {
                return Ok(());
            }
        }
        Err(UartError::TransmitTimeout)
    }
}

impl<P: SerialPort, const N: usize> ByteSink for BufferedUart<P, N> {
    type Error = UartError;

    fn put(&mut self, byte: u8) -> Result<(), UartError> {
        self.enqueue(byte)
    }

    fn put_all(&mut self, bytes: &[u8]) -> Result<(), UartError> {
        self.write_bytes(bytes)
    }
}

impl<P: SerialPort, const N: usize> ufmt::uWrite for BufferedUart<P, N> {
    type Error = UartError;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }
}

impl<P: SerialPort, const N: usize> core::fmt::Write for BufferedUart<P, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}
