// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

/*! Custom instruction encoding.

The core decodes one extension instruction in the `custom-0` major opcode:

```text
 31      25 24  20 19  15 14  12 11   7 6      0
+----------+------+------+------+------+--------+
|  funct7  | rs2  | rs1  |funct3|  rd  | opcode |
+----------+------+------+------+------+--------+
```

`mac rd, rs1, rs2` computes `rd <- rs1 * rs2 + rd` (wrapping, 32 bits).
*/

/// Major opcode reserved for custom extensions (`custom-0`).
pub const OPCODE_CUSTOM_0: u8 = 0b000_1011;

pub const MAC_FUNCT3: u8 = 0b000;
pub const MAC_FUNCT7: u8 = 0b000_0001;

/// Assemble an R-type instruction word. Out of range fields are truncated to
/// their width.
pub const fn encode_r_type(opcode: u8, funct3: u8, funct7: u8, rd: u8, rs1: u8, rs2: u8) -> u32 {
    (opcode as u32 & 0x7f)
        | (rd as u32 & 0x1f) << 7
        | (funct3 as u32 & 0x7) << 12
        | (rs1 as u32 & 0x1f) << 15
        | (rs2 as u32 & 0x1f) << 20
        | (funct7 as u32 & 0x7f) << 25
}

/// Instruction word of `mac rd, rs1, rs2` for the given register indices.
pub const fn encode_mac(rd: u8, rs1: u8, rs2: u8) -> u32 {
    encode_r_type(OPCODE_CUSTOM_0, MAC_FUNCT3, MAC_FUNCT7, rd, rs1, rs2)
}

/// Issue the MAC instruction: `a * b + c`.
#[cfg(target_arch = "riscv32")]
#[inline(always)]
pub fn hw_mac(a: u32, b: u32, c: u32) -> u32 {
    let mut acc = c;
    unsafe {
        core::arch::asm!(
            ".insn r {opcode}, {funct3}, {funct7}, {acc}, {a}, {b}",
            opcode = const OPCODE_CUSTOM_0,
            funct3 = const MAC_FUNCT3,
            funct7 = const MAC_FUNCT7,
            acc = inout(reg) acc,
            a = in(reg) a,
            b = in(reg) b,
            options(pure, nomem, nostack),
        );
    }
    acc
}
