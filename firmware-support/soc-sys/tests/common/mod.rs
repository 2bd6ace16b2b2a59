// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use soc_hal::uart::{SerialPort, UartStatus};
use soc_sys::mac::MulAcc;
use soc_sys::time::{Clock, Instant};

pub const SIM_FIFO_DEPTH: usize = 16;

#[derive(Default)]
struct SimState {
    tx_fifo: VecDeque<u8>,
    shift_register: Option<u8>,
    rx_fifo: VecDeque<u8>,
    line: Vec<u8>,
    loopback: bool,
    divisor: Option<u16>,
    stuck: bool,
    tx_overrun: bool,
    rx_overrun: bool,
    polls: usize,
}

/// A 16550 model. Every status read advances the transmitter by one byte
/// time: the shift register goes out and the next FIFO byte moves in.
#[derive(Default)]
pub struct SimUart {
    state: RefCell<SimState>,
}

impl SimUart {
    pub fn new() -> SimUart {
        SimUart::default()
    }

    /// A UART whose transmitter never makes progress.
    pub fn stuck() -> SimUart {
        let uart = SimUart::default();
        uart.state.borrow_mut().stuck = true;
        uart
    }

    /// Everything that left the transmitter towards the line.
    pub fn line(&self) -> Vec<u8> {
        self.state.borrow().line.clone()
    }

    /// Bytes still inside the hardware, not on the line yet.
    pub fn in_flight(&self) -> usize {
        let state = self.state.borrow();
        state.tx_fifo.len() + state.shift_register.is_some() as usize
    }

    pub fn divisor(&self) -> Option<u16> {
        self.state.borrow().divisor
    }

    pub fn loopback(&self) -> bool {
        self.state.borrow().loopback
    }

    pub fn tx_overrun(&self) -> bool {
        self.state.borrow().tx_overrun
    }

    pub fn rx_overrun(&self) -> bool {
        self.state.borrow().rx_overrun
    }

    pub fn polls(&self) -> usize {
        self.state.borrow().polls
    }

    fn tick(state: &mut SimState) {
        if state.stuck {
            return;
        }
        if let Some(byte) = state.shift_register.take() {
            if state.loopback {
                if state.rx_fifo.len() == SIM_FIFO_DEPTH {
                    state.rx_overrun = true;
                } else {
                    state.rx_fifo.push_back(byte);
                }
            } else {
                state.line.push(byte);
            }
        }
        state.shift_register = state.tx_fifo.pop_front();
    }
}

impl SerialPort for SimUart {
    const FIFO_DEPTH: usize = SIM_FIFO_DEPTH;

    fn configure(&mut self, divisor: u16) {
        let state = self.state.get_mut();
        state.divisor = Some(divisor);
        state.tx_fifo.clear();
        state.rx_fifo.clear();
    }

    fn read_status(&self) -> UartStatus {
        let mut state = self.state.borrow_mut();
        state.polls += 1;
        SimUart::tick(&mut state);
        UartStatus {
            data_ready: !state.rx_fifo.is_empty(),
            transmit_holding_empty: state.tx_fifo.is_empty(),
            transmitter_idle: state.tx_fifo.is_empty() && state.shift_register.is_none(),
        }
    }

    fn write_data(&mut self, byte: u8) {
        let state = self.state.get_mut();
        if state.tx_fifo.len() == SIM_FIFO_DEPTH {
            state.tx_overrun = true;
        } else {
            state.tx_fifo.push_back(byte);
        }
    }

    fn read_data(&mut self) -> u8 {
        self.state.get_mut().rx_fifo.pop_front().unwrap_or(0)
    }

    fn set_loopback(&mut self, enable: bool) {
        self.state.get_mut().loopback = enable;
    }
}

/// A counter that advances by `step` every time it is read.
#[derive(Clone)]
pub struct StepClock {
    now: std::rc::Rc<Cell<u32>>,
    step: u32,
}

impl StepClock {
    pub fn new(start: u32, step: u32) -> StepClock {
        StepClock {
            now: std::rc::Rc::new(Cell::new(start)),
            step,
        }
    }

    /// Let `cycles` pass without a read.
    pub fn advance(&self, cycles: u32) {
        self.now.set(self.now.get().wrapping_add(cycles));
    }
}

impl Clock for StepClock {
    fn now(&self) -> Instant {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        Instant::from_cycles(now)
    }
}

/// A MAC implementation that burns a fixed number of cycles on a clock.
pub struct SlowMac {
    pub clock: StepClock,
    pub cost: u32,
}

impl MulAcc for SlowMac {
    const NAME: &'static str = "slow mac";

    fn mul_acc(&self, a: u32, b: u32, c: u32) -> u32 {
        self.clock.advance(self.cost);
        a.wrapping_mul(b).wrapping_add(c)
    }
}

/// A MAC implementation that forgets to accumulate.
pub struct BrokenMac;

impl MulAcc for BrokenMac {
    const NAME: &'static str = "broken mac";

    fn mul_acc(&self, a: u32, b: u32, _c: u32) -> u32 {
        a.wrapping_mul(b)
    }
}
