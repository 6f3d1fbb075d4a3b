// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opcode classification.
//!
//! Each supported instruction is described by a pattern string as written in the M68000 Programmer's
//! Reference Manual, where `0` and `1` are fixed bits and any other character is a variable field,
//! and by a legality check on its variable fields (size values, accepted effective addresses).
//!
//! The patterns are tested in priority order, most fixed bits first, so BCLR `0000100010` is tried
//! before ORI and CMPI even though they all share the same top nibble.

use crate::addressing_modes::EaModes;
use crate::utils::{bit, bits};

use std::sync::OnceLock;

/// Instructions recognized by the disassembler.
///
/// Converts a raw opcode to this enum using the [from](Self::from) method.
/// The shift and rotate instructions are split by their destination: `Asm` is the arithmetic shift of a
/// memory operand and `Asr` the arithmetic shift of a data register, in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Isa {
    Unknown,
    Add,
    Adda,
    Asm,
    Asr,
    Bcc,
    Bclr,
    Bra,
    Cmp,
    Cmpi,
    Divs,
    Eor,
    Jmp,
    Jsr,
    Lea,
    Lsm,
    Lsr,
    Move,
    Movea,
    Movem,
    Muls,
    Neg,
    Or,
    Ori,
    Rom,
    Ror,
    Rts,
    Sub,
    Subq,
}

/// Instruction families, as grouped by the decoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// MOVE, MOVEA, MOVEM
    Move,
    /// ADD, ADDA
    Add,
    /// SUB, SUBQ
    Sub,
    /// MULS, DIVS
    MulDiv,
    Lea,
    /// OR, ORI
    Or,
    Neg,
    Eor,
    /// ASL, ASR, LSL, LSR, ROL, ROR
    ShiftRotate,
    Bclr,
    /// CMP, CMPI
    Cmp,
    /// Bcc, BRA
    Branch,
    /// JSR, JMP
    Jsr,
    Rts,
}

impl Isa {
    /// Classifies the opcode by testing the patterns in priority order.
    ///
    /// [Isa::from] gives the same result through a look-up table built from this function.
    pub fn classify(opcode: u16) -> Self {
        PATTERNS.iter()
            .find(|p| opcode & p.mask == p.value && (p.legal)(opcode))
            .map_or(Self::Unknown, |p| p.isa)
    }

    /// Returns the family of the instruction, or None for [Isa::Unknown].
    pub const fn family(self) -> Option<Family> {
        Some(match self {
            Self::Unknown => return None,
            Self::Move | Self::Movea | Self::Movem => Family::Move,
            Self::Add | Self::Adda => Family::Add,
            Self::Sub | Self::Subq => Family::Sub,
            Self::Muls | Self::Divs => Family::MulDiv,
            Self::Lea => Family::Lea,
            Self::Or | Self::Ori => Family::Or,
            Self::Neg => Family::Neg,
            Self::Eor => Family::Eor,
            Self::Asm | Self::Asr | Self::Lsm | Self::Lsr | Self::Rom | Self::Ror => Family::ShiftRotate,
            Self::Bclr => Family::Bclr,
            Self::Cmp | Self::Cmpi => Family::Cmp,
            Self::Bcc | Self::Bra => Family::Branch,
            Self::Jsr | Self::Jmp => Family::Jsr,
            Self::Rts => Family::Rts,
        })
    }
}

impl From<u16> for Isa {
    /// Returns the instruction represented by the given opcode.
    fn from(opcode: u16) -> Self {
        decoder()[opcode as usize]
    }
}

/// Look up the Isa of the given opcode.
///
/// This is a look-up table built on first use. Use the raw opcode as the index in the slice.
pub fn decoder() -> &'static [Isa] {
    static DECODER: OnceLock<Box<[Isa]>> = OnceLock::new();
    DECODER.get_or_init(|| {
        log::trace!("building the opcode look-up table");
        (0..=u16::MAX).map(Isa::classify).collect()
    })
}

/// A pattern of fixed bits and the check of its variable fields.
struct IsaPattern {
    mask: u16,
    value: u16,
    isa: Isa,
    legal: fn(u16) -> bool,
}

impl IsaPattern {
    const fn new(format: &str, isa: Isa, legal: fn(u16) -> bool) -> Self {
        let (mask, value) = pattern(format);
        Self { mask, value, isa, legal }
    }
}

/// Converts a pattern string to its fixed bits mask and value.
const fn pattern(format: &str) -> (u16, u16) {
    let bytes = format.as_bytes();
    assert!(bytes.len() == 16, "opcode patterns must have 16 characters");

    let mut mask = 0u16;
    let mut value = 0u16;
    let mut i = 0;
    while i < bytes.len() {
        mask <<= 1;
        value <<= 1;
        match bytes[i] {
            b'0' => mask |= 1,
            b'1' => {
                mask |= 1;
                value |= 1;
            },
            _ => (),
        }
        i += 1;
    }

    (mask, value)
}

/// Sorted by decreasing number of fixed bits.
const PATTERNS: [IsaPattern; 30] = [
    IsaPattern::new("0100111001110101", Isa::Rts,   always),
    IsaPattern::new("0000100010mmmrrr", Isa::Bclr,  ea_data_alterable),
    IsaPattern::new("0100111010mmmrrr", Isa::Jsr,   ea_control),
    IsaPattern::new("0100111011mmmrrr", Isa::Jmp,   ea_control),
    IsaPattern::new("010010001smmmrrr", Isa::Movem, movem_to_memory),
    IsaPattern::new("010011001smmmrrr", Isa::Movem, movem_to_register),
    IsaPattern::new("1110000d11mmmrrr", Isa::Asm,   ea_memory_alterable),
    IsaPattern::new("1110001d11mmmrrr", Isa::Lsm,   ea_memory_alterable),
    IsaPattern::new("1110011d11mmmrrr", Isa::Rom,   ea_memory_alterable),
    IsaPattern::new("00000000ssmmmrrr", Isa::Ori,   size_data_alterable),
    IsaPattern::new("00001100ssmmmrrr", Isa::Cmpi,  size_data_alterable),
    IsaPattern::new("01000100ssmmmrrr", Isa::Neg,   size_data_alterable),
    IsaPattern::new("01100000dddddddd", Isa::Bra,   always),
    IsaPattern::new("0000nnn110mmmrrr", Isa::Bclr,  ea_data_alterable),
    IsaPattern::new("0100nnn111mmmrrr", Isa::Lea,   ea_control),
    IsaPattern::new("1000nnn111mmmrrr", Isa::Divs,  ea_data),
    IsaPattern::new("1100nnn111mmmrrr", Isa::Muls,  ea_data),
    IsaPattern::new("1101nnns11mmmrrr", Isa::Adda,  ea_all),
    IsaPattern::new("1110cccdssi00rrr", Isa::Asr,   register_shift),
    IsaPattern::new("1110cccdssi01rrr", Isa::Lsr,   register_shift),
    IsaPattern::new("1110cccdssi11rrr", Isa::Ror,   register_shift),
    IsaPattern::new("1011nnn0ssmmmrrr", Isa::Cmp,   size_ea_all),
    IsaPattern::new("1011nnn1ssmmmrrr", Isa::Eor,   size_data_alterable),
    IsaPattern::new("0101nnn1ssmmmrrr", Isa::Subq,  size_alterable),
    IsaPattern::new("00ssnnn001mmmrrr", Isa::Movea, movea),
    IsaPattern::new("0110ccccdddddddd", Isa::Bcc,   bcc),
    IsaPattern::new("1101nnndssmmmrrr", Isa::Add,   add_sub),
    IsaPattern::new("1001nnndssmmmrrr", Isa::Sub,   add_sub),
    IsaPattern::new("1000nnndssmmmrrr", Isa::Or,    or),
    IsaPattern::new("00ssnnnmmmmmmrrr", Isa::Move,  mov),
];

fn always(_: u16) -> bool {
    true
}

/// Size field at bits 6-7 must be byte, word or long.
fn sized(opcode: u16) -> bool {
    bits(opcode, 6, 7) != 3
}

/// Address register direct is not allowed for byte operations.
fn ard_allowed(opcode: u16, modes: EaModes) -> bool {
    let modes = if bits(opcode, 6, 7) == 0 { modes.without_ard() } else { modes };
    modes.contains_opcode(opcode)
}

fn ea_all(opcode: u16) -> bool {
    EaModes::ALL.contains_opcode(opcode)
}

fn ea_data(opcode: u16) -> bool {
    EaModes::DATA.contains_opcode(opcode)
}

fn ea_control(opcode: u16) -> bool {
    EaModes::CONTROL.contains_opcode(opcode)
}

fn ea_data_alterable(opcode: u16) -> bool {
    EaModes::DATA_ALTERABLE.contains_opcode(opcode)
}

fn ea_memory_alterable(opcode: u16) -> bool {
    EaModes::MEMORY_ALTERABLE.contains_opcode(opcode)
}

fn size_data_alterable(opcode: u16) -> bool {
    sized(opcode) && ea_data_alterable(opcode)
}

fn size_ea_all(opcode: u16) -> bool {
    sized(opcode) && ard_allowed(opcode, EaModes::ALL)
}

fn size_alterable(opcode: u16) -> bool {
    sized(opcode) && ard_allowed(opcode, EaModes::ALTERABLE)
}

fn movem_to_memory(opcode: u16) -> bool {
    EaModes::MOVEM_TO_MEMORY.contains_opcode(opcode)
}

fn movem_to_register(opcode: u16) -> bool {
    EaModes::MOVEM_TO_REGISTER.contains_opcode(opcode)
}

fn register_shift(opcode: u16) -> bool {
    sized(opcode)
}

/// Condition 1 (false) is BSR, which is not supported.
fn bcc(opcode: u16) -> bool {
    bits(opcode, 8, 11) != 1
}

/// ADD and SUB. The `Dn, <ea>` direction with a register operand is ADDX/SUBX.
fn add_sub(opcode: u16) -> bool {
    sized(opcode) && if bit(opcode, 8) {
        ea_memory_alterable(opcode)
    } else {
        ard_allowed(opcode, EaModes::ALL)
    }
}

/// OR. The `Dn, <ea>` direction with a data register operand is SBCD.
fn or(opcode: u16) -> bool {
    sized(opcode) && if bit(opcode, 8) {
        ea_memory_alterable(opcode)
    } else {
        ea_data(opcode)
    }
}

/// MOVEA only exists in word and long sizes.
fn movea(opcode: u16) -> bool {
    bits(opcode, 12, 13) >= 2 && ea_all(opcode)
}

fn mov(opcode: u16) -> bool {
    let size = bits(opcode, 12, 13);
    let src = if size == 1 { EaModes::DATA } else { EaModes::ALL };
    size != 0
        && src.contains_opcode(opcode)
        && EaModes::DATA_ALTERABLE.contains(bits(opcode, 6, 8), bits(opcode, 9, 11))
}
