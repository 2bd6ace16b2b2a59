// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::mmio::Mmio;

/// Read-only memory in the user domain, addressable per byte and per word.
#[derive(Clone)]
pub struct UserRom {
    mem: Mmio,
}

impl UserRom {
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid, 4-byte aligned pointer to the
    /// start of the ROM.
    pub const unsafe fn new(base_addr: *const ()) -> UserRom {
        UserRom {
            mem: Mmio::new(base_addr),
        }
    }

    pub fn byte(&self, index: usize) -> u8 {
        self.mem.read(index)
    }

    pub fn word(&self, index: usize) -> u32 {
        self.mem.read32(index)
    }

    /// The first `len` bytes, in address order.
    pub fn bytes(&self, len: usize) -> impl Iterator<Item = u8> + '_ {
        (0..len).map(|i| self.byte(i))
    }

    /// The first `len` words, in address order.
    pub fn words(&self, len: usize) -> impl Iterator<Item = u32> + '_ {
        (0..len).map(|i| self.word(i))
    }
}
