// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

mod common;

use heapless::Vec as HVec;
use test_strategy::proptest;

use common::{BrokenMac, SlowMac, StepClock};
use soc_sys::bench::{Harness, Operands};
use soc_sys::mac::{reference_mac, MulAcc, SelectedMac, SoftwareMac};
use soc_sys::time::{Clock, Cycles, Instant};

const SEVEN_SIX_FIVE: Operands = Operands { a: 7, b: 6, c: 5 };

fn report_text(report: impl FnOnce(&mut HVec<u8, 256>)) -> String {
    let mut out = HVec::new();
    report(&mut out);
    String::from_utf8(out.to_vec()).unwrap()
}

#[test]
fn measurement_across_counter_wrap() {
    let clock = StepClock::new(0xffff_fff0, 0x20);
    let start = clock.now();
    let end = clock.now();
    assert_eq!(start, Instant::from_cycles(0xffff_fff0));
    assert_eq!(end, Instant::from_cycles(0x10));
    assert_eq!(end - start, Cycles::new(0x20));

    let harness = Harness::new(StepClock::new(0xffff_fff0, 0x20));
    let ((), raw) = harness.time(|| ());
    assert_eq!(raw, Cycles::new(0x20));
}

#[test]
fn software_mac_seven_six_five() {
    assert_eq!(SoftwareMac.mul_acc(7, 6, 5), 0x2f);
    assert_eq!(SelectedMac::default().mul_acc(7, 6, 5), 0x2f);

    let mut harness = Harness::new(StepClock::new(1, 3));
    harness.calibrate(4);
    let result = harness.run(&SoftwareMac, SEVEN_SIX_FIVE);
    assert_eq!(result.result, 0x2f);
    assert_eq!(result.expected, 0x2f);
    assert!(result.matches());

    let text = report_text(|out| result.report(out).unwrap());
    assert_eq!(text, "sw mac: 7 * 6 + 5 = 2f, expected 2f, 0 cycles [match]\n");
}

#[test]
fn baseline_cancels_empty_region() {
    let mut harness = Harness::new(StepClock::new(1000, 17));
    assert_eq!(harness.baseline(), Cycles::ZERO);
    assert_eq!(harness.calibrate(8), Cycles::new(17));
    assert_eq!(harness.baseline(), Cycles::new(17));
    let ((), elapsed) = harness.measure(|| ());
    assert_eq!(elapsed, Cycles::ZERO);
}

#[test]
fn calibration_keeps_fastest_round() {
    let clock = StepClock::new(1, 5);
    let mut harness = Harness::new(clock.clone());
    let ((), slow) = harness.time(|| clock.advance(40));
    assert_eq!(slow, Cycles::new(45));
    assert_eq!(harness.calibrate(0), Cycles::new(5));
}

#[test]
fn measured_cost_excludes_baseline() {
    let clock = StepClock::new(1, 9);
    let mut harness = Harness::new(clock.clone());
    harness.calibrate(4);
    let mac = SlowMac { clock, cost: 100 };
    let result = harness.run(&mac, SEVEN_SIX_FIVE);
    assert_eq!(result.elapsed, Cycles::new(100));
    assert!(result.matches());
}

#[test]
fn comparison_reports_savings() {
    let clock = StepClock::new(1, 2);
    let mut harness = Harness::new(clock.clone());
    harness.calibrate(4);
    let fast = SlowMac { clock: clock.clone(), cost: 10 };
    let slow = SlowMac { clock, cost: 100 };

    let comparison = harness.compare(&fast, &slow, SEVEN_SIX_FIVE);
    assert_eq!(comparison.saved(), 90);
    let text = report_text(|out| comparison.report(out).unwrap());
    assert!(text.ends_with("slow mac saved 5a cycles\n"), "{text}");

    let comparison = harness.compare(&slow, &fast, SEVEN_SIX_FIVE);
    assert_eq!(comparison.saved(), -90);
    let text = report_text(|out| comparison.report(out).unwrap());
    assert!(text.ends_with("slow mac lost 5a cycles\n"), "{text}");
}

#[test]
fn wrong_result_is_flagged() {
    let mut harness = Harness::new(StepClock::new(1, 1));
    harness.calibrate(2);
    let result = harness.run(&BrokenMac, SEVEN_SIX_FIVE);
    assert_eq!(result.result, 42);
    assert_eq!(result.expected, 0x2f);
    assert!(!result.matches());
    let text = report_text(|out| result.report(out).unwrap());
    assert!(text.ends_with("= 2a, expected 2f, 0 cycles [MISMATCH]\n"), "{text}");
}

#[test]
fn results_print_with_debug() {
    let mut harness = Harness::new(StepClock::new(1, 1));
    harness.calibrate(2);
    let comparison = harness.compare(&SoftwareMac, &BrokenMac, SEVEN_SIX_FIVE);
    let text = format!("{comparison:?}");
    assert!(text.contains("name: \"sw mac\""), "{text}");
    assert!(text.contains("name: \"broken mac\""), "{text}");
    assert!(text.contains("Operands { a: 7, b: 6, c: 5 }"), "{text}");
}

#[proptest]
fn software_mac_matches_reference(a: u32, b: u32, c: u32) {
    assert_eq!(SoftwareMac.mul_acc(a, b, c), reference_mac(a, b, c));
}

#[proptest]
fn elapsed_is_wrapping_distance(start: u32, distance: u32) {
    let start = Instant::from_cycles(start);
    let end = start + Cycles::new(distance);
    assert_eq!(end - start, Cycles::new(distance));
}
