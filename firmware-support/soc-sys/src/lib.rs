// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod bench;
pub mod mac;
pub mod printf;
pub mod time;
pub mod uart;
