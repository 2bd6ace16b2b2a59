// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Volatile register access relative to a peripheral base address.

/// A memory mapped register block.
///
/// Offsets are never checked. Staying inside the peripheral's address range
/// is part of the contract of [`Mmio::new`].
#[derive(Clone, Copy)]
pub struct Mmio {
    base_addr: *mut u8,
}

impl Mmio {
    /// Create a new [`Mmio`] instance given a base address.
    ///
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid pointer that is backed by the
    /// memory mapped peripheral (or plain memory) for every offset the caller
    /// later accesses. Word accesses require `base_addr` to be 4-byte aligned.
    pub const unsafe fn new(base_addr: *const ()) -> Mmio {
        Mmio {
            base_addr: base_addr as *mut u8,
        }
    }

    pub fn base_addr(&self) -> *const () {
        self.base_addr.cast_const().cast()
    }

    /// Read the byte register at `byte_offset`.
    #[inline(always)]
    pub fn read(&self, byte_offset: usize) -> u8 {
        unsafe { self.base_addr.add(byte_offset).read_volatile() }
    }

    /// Read the 32-bit register at `word_offset` (in units of 4 bytes).
    #[inline(always)]
    pub fn read32(&self, word_offset: usize) -> u32 {
        unsafe {
            self.base_addr
                .cast::<u32>()
                .add(word_offset)
                .read_volatile()
        }
    }

    /// Write the byte register at `byte_offset`.
    #[inline(always)]
    pub fn write(&self, byte_offset: usize, value: u8) {
        unsafe { self.base_addr.add(byte_offset).write_volatile(value) }
    }

    /// Write the 32-bit register at `word_offset` (in units of 4 bytes).
    #[inline(always)]
    pub fn write32(&self, word_offset: usize, value: u32) {
        unsafe {
            self.base_addr
                .cast::<u32>()
                .add(word_offset)
                .write_volatile(value)
        }
    }
}
