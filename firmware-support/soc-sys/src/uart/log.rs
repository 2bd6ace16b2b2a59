// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
use crate::uart::{BufferedUart, UartError};

// The logger utilizes core::fmt to format the log messages because ufmt formatting is not
// compatible with (dependencies of) the log crate.
use core::fmt::Write;
use core::ptr::addr_of_mut;
use log::LevelFilter;
use soc_hal::uart::{SerialPort, Uart};

/// Bytes the logger stages before it has to wait on the hardware.
const LOG_STAGING: usize = 32;

/// A global logger instance to be used with the `log` crate.
///
/// Use [`init`] to hand it a UART and install it.
/// # Safety
/// Using this logger is only safe if there is only one thread of execution.
/// Even though `UartLogger` is `Send` and `Sync`, The underlying `Uart` is not `Send` or `Sync`.
pub static mut LOGGER: UartLogger = UartLogger {
    uart: None,
    display_level: LevelFilter::Trace,
    display_source: LevelFilter::Warn,
};

/// Writes every record as one line and flushes it before returning, so log
/// output never sits in a buffer when the caller continues.
///
/// Records share the line with other users of the same UART. Flush those
/// before logging to keep the output in order.
pub struct UartLogger {
    uart: Option<BufferedUart<Uart, LOG_STAGING>>,
    /// Records at or above this severity are prefixed with their level.
    pub display_level: LevelFilter,
    /// Records at or above this severity are prefixed with `file:line`.
    pub display_source: LevelFilter,
}

impl UartLogger {
    /// Set the logger to use the given UART. The UART must already be configured.
    /// # Safety
    /// Using this function and logger is only safe if there is only one thread of execution.
    /// This function is used to assign the `Uart` instance to a global (`static mut`), but `Uart` is not `Send` or `Sync`.
    pub unsafe fn set_logger(&mut self, uart: Uart) {
        self.uart = Some(BufferedUart::attach(uart));
    }
}

/// Install [`LOGGER`] on `uart` and enable records up to `level`.
///
/// # Safety
/// Same requirements as [`UartLogger::set_logger`]. Must not race with any
/// other call into the `log` crate.
pub unsafe fn init(uart: Uart, level: LevelFilter) {
    let logger = &mut *addr_of_mut!(LOGGER);
    logger.set_logger(uart);
    // `set_logger` needs compare-and-swap, which the core does not implement.
    if log::set_logger_racy(logger).is_ok() {
        log::set_max_level_racy(level);
    }
}

impl log::Log for UartLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Only one thread of execution, see `LOGGER`.
        let uart = unsafe { &mut (*addr_of_mut!(LOGGER)).uart };
        let Some(uart) = uart else {
            panic!("Logger not set");
        };
        if write_record(uart, record, self.display_level, self.display_source).is_err() {
            panic!("uart logger: transmitter stopped");
        }
    }

    fn flush(&self) {}
}

/// Render `record` as one line on `uart` and flush it.
///
/// The line is `LEVEL | file:line - message`. The level prefix is only
/// written for records at or above `display_level`, the source location only
/// for records at or above `display_source`.
pub fn write_record<P: SerialPort, const N: usize>(
    uart: &mut BufferedUart<P, N>,
    record: &log::Record,
    display_level: LevelFilter,
    display_source: LevelFilter,
) -> Result<(), UartError> {
    let mut written = Ok(());
    if record.level() <= display_level {
        written = written.and_then(|_| write!(uart, "{} | ", record.level()));
    }
    if record.level() <= display_source {
        written = written.and_then(|_| {
            write!(
                uart,
                "{}:{} - ",
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0)
            )
        });
    }
    written = written.and_then(|_| writeln!(uart, "{}", record.args()));
    // `core::fmt::Write` on the UART only fails when the transmitter stalls.
    written.map_err(|_| UartError::TransmitTimeout)?;
    uart.flush()
}

unsafe impl core::marker::Send for UartLogger {}
unsafe impl core::marker::Sync for UartLogger {}
