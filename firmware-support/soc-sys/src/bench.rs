// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

/*! Cycle accurate micro benchmarks.

A measurement brackets the code under test with two cycle counter samples.
Reading the counter and the bracketing itself cost a few cycles, which would
dominate a region that is only a handful of instructions long. The
[`Harness`] therefore measures an empty region first ([`Harness::calibrate`])
and subtracts that baseline from every measurement it reports.
*/

use core::hint::black_box;

use log::{debug, warn};
use ufmt::derive::uDebug;

use crate::mac::{reference_mac, MulAcc};
use crate::printf;
use crate::printf::ByteSink;
use crate::time::{Clock, Cycles};

#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

/// Outcome of one timed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchResult {
    pub name: &'static str,
    pub operands: Operands,
    pub result: u32,
    pub expected: u32,
    /// Cycles spent, with the harness baseline already subtracted.
    pub elapsed: Cycles,
}

impl BenchResult {
    pub fn matches(&self) -> bool {
        self.result == self.expected
    }

    /// One line: operands, result, expected value, cycles and verdict.
    pub fn report<S: ByteSink + ?Sized>(&self, out: &mut S) -> Result<(), S::Error> {
        let Operands { a, b, c } = self.operands;
        out.put_all(self.name.as_bytes())?;
        printf!(
            out,
            ": %x * %x + %x = %x, expected %x, %x cycles ",
            a,
            b,
            c,
            self.result,
            self.expected,
            self.elapsed.count()
        )?;
        if self.matches() {
            out.put_all(b"[match]\n")
        } else {
            out.put_all(b"[MISMATCH]\n")
        }
    }
}

/// Two implementations measured on the same operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub subject: BenchResult,
    pub reference: BenchResult,
}

impl Comparison {
    /// Cycles the subject saves over the reference. Negative if it is slower.
    pub fn saved(&self) -> i64 {
        self.reference.elapsed.delta(self.subject.elapsed)
    }

    pub fn report<S: ByteSink + ?Sized>(&self, out: &mut S) -> Result<(), S::Error> {
        self.subject.report(out)?;
        self.reference.report(out)?;
        let saved = self.saved();
        let verdict: &[u8] = if saved >= 0 { b"saved" } else { b"lost" };
        out.put_all(self.subject.name.as_bytes())?;
        out.put(b' ')?;
        out.put_all(verdict)?;
        printf!(out, " %x cycles\n", saved.unsigned_abs())
    }
}

pub struct Harness<C: Clock> {
    clock: C,
    baseline: Cycles,
}

impl<C: Clock> Harness<C> {
    /// A harness without baseline. Call [`Harness::calibrate`] before
    /// measuring anything short.
    pub fn new(clock: C) -> Self {
        Harness {
            clock,
            baseline: Cycles::ZERO,
        }
    }

    pub fn baseline(&self) -> Cycles {
        self.baseline
    }

    /// Time `f` without any correction.
    #[inline(always)]
    pub fn time<R>(&self, f: impl FnOnce() -> R) -> (R, Cycles) {
        let start = self.clock.now();
        let result = f();
        let end = self.clock.now();
        (result, end - start)
    }

    /// Measure an empty region `rounds` times and keep the fastest run as the
    /// baseline. Returns the new baseline.
    pub fn calibrate(&mut self, rounds: u32) -> Cycles {
        let rounds = rounds.max(1);
        let baseline = (0..rounds)
            .map(|_| self.time(|| black_box(())).1)
            .min()
            .unwrap_or(Cycles::ZERO);
        self.baseline = baseline;
        debug!(
            "bench: baseline {} cycles over {} rounds",
            baseline.count(),
            rounds
        );
        baseline
    }

    /// Time `f` and subtract the baseline. Regions faster than the baseline
    /// measure as zero.
    #[inline(always)]
    pub fn measure<R>(&self, f: impl FnOnce() -> R) -> (R, Cycles) {
        let (result, raw) = self.time(f);
        (result, raw.saturating_sub(self.baseline))
    }

    /// Run `op` once on `operands` and check it against [`reference_mac`].
    pub fn run<M: MulAcc>(&self, op: &M, operands: Operands) -> BenchResult {
        let Operands { a, b, c } = black_box(operands);
        let (result, elapsed) = self.measure(|| op.mul_acc(a, b, c));
        let expected = reference_mac(operands.a, operands.b, operands.c);
        let bench = BenchResult {
            name: M::NAME,
            operands,
            result,
            expected,
            elapsed,
        };
        if bench.matches() {
            debug!("bench: {} took {} cycles", M::NAME, elapsed.count());
        } else {
            warn!(
                "bench: {} returned {:#x}, expected {:#x}",
                M::NAME,
                result,
                expected
            );
        }
        bench
    }

    /// Run `subject` and `reference` on the same operands.
    pub fn compare<S: MulAcc, R: MulAcc>(
        &self,
        subject: &S,
        reference: &R,
        operands: Operands,
    ) -> Comparison {
        Comparison {
            subject: self.run(subject, operands),
            reference: self.run(reference, operands),
        }
    }
}
