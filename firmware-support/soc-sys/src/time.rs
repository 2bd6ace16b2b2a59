// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Cycle counting.

 - [`Instant`] is a raw sample of a free running 32-bit cycle counter.
 - [`Cycles`] is the distance between two samples.
 - [`Clock`] produces samples. On riscv32, `McycleClock` reads them from the
   `mcycle` CSR.

The counter wraps at 2^32. Subtracting two samples is always done modulo 2^32,
so a measurement that straddles the wrap is still correct as long as it is
shorter than one full period.
*/

use core::fmt;
use core::ops;
use ufmt::derive::uDebug;
use ufmt::uDisplay;
use ufmt::uWrite;
use ufmt::uwrite;


/// A sample of the cycle counter.
///
/// Samples have no ordering: after a wrap a later sample can hold a smaller
/// value. Only the difference between two samples is meaningful.
#[derive(uDebug, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Instant {
    cycles: u32,
}

impl Instant {
    pub const fn from_cycles(cycles: u32) -> Instant {
        Instant { cycles }
    }

    /// The raw counter value.
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }
}

impl ops::Sub<Instant> for Instant {
    type Output = Cycles;

    fn sub(self, rhs: Instant) -> Cycles {
        Cycles::new(self.cycles.wrapping_sub(rhs.cycles))
    }
}

impl ops::Add<Cycles> for Instant {
    type Output = Instant;

    fn add(self, rhs: Cycles) -> Instant {
        Instant {
            cycles: self.cycles.wrapping_add(rhs.count()),
        }
    }
}

/// A number of clock cycles.
#[derive(uDebug, Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cycles {
    count: u32,
}

impl Cycles {
    pub const ZERO: Cycles = Cycles { count: 0 };

    pub const fn new(count: u32) -> Cycles {
        Cycles { count }
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    /// `self - rhs`, or zero if `rhs` is larger.
    pub const fn saturating_sub(self, rhs: Cycles) -> Cycles {
        Cycles {
            count: self.count.saturating_sub(rhs.count),
        }
    }

    /// Signed difference `self - rhs`.
    pub const fn delta(self, rhs: Cycles) -> i64 {
        self.count as i64 - rhs.count as i64
    }

    /// The number of whole microseconds these cycles take at `frequency` Hz.
    pub fn to_micros(&self, frequency: u32) -> u64 {
        if frequency == 0 {
            panic!("Tried to convert cycles at a frequency of 0 hertz.")
        }
        self.count as u64 * 1_000_000 / frequency as u64
    }
}

impl ops::Add<Cycles> for Cycles {
    type Output = Cycles;

    fn add(self, rhs: Cycles) -> Cycles {
        Cycles {
            count: self.count.saturating_add(rhs.count),
        }
    }
}

/// A source of cycle counter samples.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Cycles passed since `start` was sampled.
    fn elapsed_since(&self, start: Instant) -> Cycles {
        self.now() - start
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// The hart's own `mcycle` counter.
#[cfg(target_arch = "riscv32")]
#[derive(Debug, Default, Copy, Clone)]
pub struct McycleClock;

#[cfg(target_arch = "riscv32")]
impl Clock for McycleClock {
    #[inline(always)]
    fn now(&self) -> Instant {
        Instant::from_cycles(soc_hal::cycle::read_mcycle())
    }
}

impl uDisplay for Cycles {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(f, "{} cycles", self.count)
    }
}

impl uDisplay for Instant {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(f, "@{}", self.cycles)
    }
}

impl fmt::Display for Cycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycles", self.count)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.cycles)
    }
}
