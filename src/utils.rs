// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bit-field extraction and sign-extension helpers.
//!
//! Every opcode field of the 68000 is a contiguous range of bits inside a 16-bit word,
//! so decoding only ever needs [bits] and [bit].

use crate::instruction::Size;

/// Checks if the given bit of the given data is set.
#[inline(always)]
pub const fn bit(data: u16, bit: u16) -> bool {
    data & (1 << bit) != 0
}

/// Returns bits `[beg, end]` inclusive, starting at 0.
///
/// `beg` is the least significant bit of the field and `end` the most significant one,
/// so the opcode class nibble is `bits(opcode, 12, 15)`.
#[inline(always)]
pub const fn bits(d: u16, beg: u16, end: u16) -> u16 {
    let mask = ((1u32 << (end + 1 - beg)) - 1) as u16;
    d >> beg & mask
}

/// Builds a big-endian 32-bits integer from its high and low words.
#[inline(always)]
pub const fn u32_from_words(high: u16, low: u16) -> u32 {
    (high as u32) << 16 | low as u32
}

/// Casts `value` as a signed i8, i16 or i32 depending on the size, then casts it to i32 and returns it.
#[inline(always)]
pub const fn sign_extend(value: u32, size: Size) -> i32 {
    match size {
        Size::Byte => value as i8 as i32,
        Size::Word => value as i16 as i32,
        Size::Long => value as i32,
    }
}

/// Keeps only the bits of `value` that belong to an operand of the given size.
#[inline(always)]
pub const fn truncate(value: u32, size: Size) -> u32 {
    match size {
        Size::Byte => value & 0xFF,
        Size::Word => value & 0xFFFF,
        Size::Long => value,
    }
}
