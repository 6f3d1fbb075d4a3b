// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instruction-related structs, enums and functions.
//!
//! An [Instruction] is the immutable record produced for each decode step. Its length is never stored:
//! it is the number of raw words the decoder consumed, opcode word included.

use crate::addressing_modes::EffectiveAddress;
use crate::condition::Condition;
use crate::error::DecodeError;
use crate::utils::bits;

/// Size of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    Byte = 1,
    Word = 2,
    Long = 4,
}

impl Size {
    /// Creates a new size from the primary size bits.
    ///
    /// - 0 => Byte
    /// - 1 => Word
    /// - 2 => Long
    /// - 3 => None
    #[inline(always)]
    pub const fn from_bits(d: u16) -> Option<Self> {
        match d {
            0 => Some(Self::Byte),
            1 => Some(Self::Word),
            2 => Some(Self::Long),
            _ => None,
        }
    }

    /// Creates a new size from a single size bit of the operand (like MOVEM and ADDA).
    ///
    /// - 0 => Word
    /// - 1 => Long
    #[inline(always)]
    pub const fn from_bit(d: u16) -> Self {
        if d & 1 == 0 {
            Self::Word
        } else {
            Self::Long
        }
    }

    /// Creates a new size from the size bits of a MOVE or MOVEA instruction.
    ///
    /// - 1 => Byte
    /// - 3 => Word
    /// - 2 => Long
    /// - 0 => None
    #[inline(always)]
    pub const fn from_move(d: u16) -> Option<Self> {
        match d {
            1 => Some(Self::Byte),
            3 => Some(Self::Word),
            2 => Some(Self::Long),
            _ => None,
        }
    }

    /// Number of extension words used by an immediate operand of this size.
    #[inline(always)]
    pub const fn immediate_words(self) -> usize {
        match self {
            Self::Byte | Self::Word => 1,
            Self::Long => 2,
        }
    }

    /// Returns true if it is Size::Long, false otherwise.
    #[inline(always)]
    pub fn is_long(self) -> bool {
        self == Self::Long
    }
}

impl From<Size> for u16 {
    /// Returns `0`, `1` or `2` for [Byte](Size::Byte), [Word](Size::Word) or [Long](Size::Long) respectively.
    fn from(size: Size) -> Self {
        match size {
            Size::Byte => 0,
            Size::Word => 1,
            Size::Long => 2,
        }
    }
}

impl std::fmt::Display for Size {
    /// Disassembles to `B`, `W` or `L`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::Byte => write!(f, "B"),
            Size::Word => write!(f, "W"),
            Size::Long => write!(f, "L"),
        }
    }
}

/// Mnemonics the disassembler can emit.
///
/// `Bcc` is rendered with its condition (`BNE`, `BGE`...). `Data` is the placeholder for words that are not decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mnemonic {
    Add,
    Adda,
    Asl,
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
    Lsl,
    Lsr,
    Move,
    Movea,
    Movem,
    Muls,
    Neg,
    Or,
    Ori,
    Rol,
    Ror,
    Rts,
    Sub,
    Subq,
    Data,
}

impl Mnemonic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add   => "ADD",
            Self::Adda  => "ADDA",
            Self::Asl   => "ASL",
            Self::Asr   => "ASR",
            Self::Bcc   => "Bcc",
            Self::Bclr  => "BCLR",
            Self::Bra   => "BRA",
            Self::Cmp   => "CMP",
            Self::Cmpi  => "CMPI",
            Self::Divs  => "DIVS",
            Self::Eor   => "EOR",
            Self::Jmp   => "JMP",
            Self::Jsr   => "JSR",
            Self::Lea   => "LEA",
            Self::Lsl   => "LSL",
            Self::Lsr   => "LSR",
            Self::Move  => "MOVE",
            Self::Movea => "MOVEA",
            Self::Movem => "MOVEM",
            Self::Muls  => "MULS",
            Self::Neg   => "NEG",
            Self::Or    => "OR",
            Self::Ori   => "ORI",
            Self::Rol   => "ROL",
            Self::Ror   => "ROR",
            Self::Rts   => "RTS",
            Self::Sub   => "SUB",
            Self::Subq  => "SUBQ",
            Self::Data  => "DATA",
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data or address register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Register {
    Data(u8),
    Address(u8),
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data(reg) => write!(f, "D{}", reg),
            Self::Address(reg) => write!(f, "A{}", reg),
        }
    }
}

/// MOVEM register list.
///
/// The mask is stored in the canonical order: bit 0 is D0, bit 7 is D7, bit 8 is A0 and bit 15 is A7.
/// This is the encoding of every addressing mode except predecrement, which uses the reversed order
/// (bit 0 is A7 and bit 15 is D0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegisterList(u16);

impl RegisterList {
    /// Register list from a mask in the canonical order (control and postincrement modes).
    pub const fn from_mask(mask: u16) -> Self {
        Self(mask)
    }

    /// Register list from the reversed mask of the predecrement mode.
    pub const fn from_predecrement_mask(mask: u16) -> Self {
        Self(mask.reverse_bits())
    }

    /// Register list from the raw extension word, depending on the predecrement-ness of the addressing mode.
    pub const fn from_extension_word(word: u16, predecrement: bool) -> Self {
        if predecrement {
            Self::from_predecrement_mask(word)
        } else {
            Self::from_mask(word)
        }
    }

    /// The canonical mask.
    pub const fn mask(self) -> u16 {
        self.0
    }

    /// The mask as encoded for the predecrement mode.
    pub const fn predecrement_mask(self) -> u16 {
        self.0.reverse_bits()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of registers in the list.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn contains(self, reg: Register) -> bool {
        let index = match reg {
            Register::Data(r) => r & 7,
            Register::Address(r) => 8 + (r & 7),
        };
        self.0 & (1 << index) != 0
    }
}

impl std::fmt::Display for RegisterList {
    /// Disassembles to the usual range syntax, like `D0-D3/A0/A6`.
    ///
    /// Ranges never cross from data to address registers. An empty list is disassembled as `0`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        let mut first = true;
        for (bank, base) in [('D', 0), ('A', 8)] {
            let regs = bits(self.0, base, base + 7);
            let mut reg = 0;
            while reg < 8 {
                if regs & 1 << reg == 0 {
                    reg += 1;
                    continue;
                }

                let beg = reg;
                while reg < 8 && regs & 1 << reg != 0 {
                    reg += 1;
                }
                let end = reg - 1;

                if !first {
                    write!(f, "/")?;
                }
                first = false;

                if beg == end {
                    write!(f, "{}{}", bank, beg)?;
                } else {
                    write!(f, "{}{}-{}{}", bank, beg, bank, end)?;
                }
            }
        }

        Ok(())
    }
}

/// Destination of a branch instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchTarget {
    /// The signed displacement, relative to the address of the instruction + 2.
    pub displacement: i32,
    /// The absolute address of the branch destination.
    pub target: u32,
}

impl BranchTarget {
    /// Computes the target of a branch located at `address`.
    pub const fn new(address: u32, displacement: i32) -> Self {
        Self {
            displacement,
            target: address.wrapping_add(2).wrapping_add(displacement as u32),
        }
    }
}

impl std::fmt::Display for BranchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{:#X}>", self.displacement, self.target)
    }
}

/// Operand of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// An effective address, resolved under its operand size.
    Ea(EffectiveAddress),
    /// MOVEM
    RegisterList(RegisterList),
    /// Bcc, BRA
    Branch(BranchTarget),
}

impl Operand {
    /// Returns the effective address if this operand is one.
    pub const fn effective_address(&self) -> Option<&EffectiveAddress> {
        match self {
            Self::Ea(ea) => Some(ea),
            _ => None,
        }
    }
}

impl From<EffectiveAddress> for Operand {
    fn from(ea: EffectiveAddress) -> Self {
        Self::Ea(ea)
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ea(ea) => write!(f, "{}", ea),
            Self::RegisterList(list) => write!(f, "{}", list),
            Self::Branch(branch) => write!(f, "{}", branch),
        }
    }
}

impl std::fmt::UpperHex for Operand {
    /// Same as Display but with the immediate values written in upper hex format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ea(ea) => write!(f, "{:X}", ea),
            _ => std::fmt::Display::fmt(self, f),
        }
    }
}

/// M68000 instruction, or a `DATA` word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    /// The size suffix, if the instruction has one.
    pub size: Option<Size>,
    /// The condition of the conditional instructions.
    pub condition: Option<Condition>,
    /// The operands, from left to right in assembler syntax (source then destination).
    pub operands: Vec<Operand>,
    /// The address of the instruction.
    pub address: u32,
    /// The opcode word followed by all the extension words.
    pub raw_words: Vec<u16>,
    /// Why this word has been emitted as `DATA`. None for decoded instructions.
    pub fallback: Option<DecodeError>,
}

impl Instruction {
    /// New one-word `DATA` instruction.
    pub fn data(word: u16, address: u32, reason: DecodeError) -> Self {
        Self {
            mnemonic: Mnemonic::Data,
            size: None,
            condition: None,
            operands: Vec::new(),
            address,
            raw_words: vec![word],
            fallback: Some(reason),
        }
    }

    /// The opcode word, or None if the record has no words.
    pub fn opcode(&self) -> Option<u16> {
        self.raw_words.first().copied()
    }

    /// Number of words of the instruction, opcode included.
    pub fn length_in_words(&self) -> usize {
        self.raw_words.len()
    }

    /// Length of the instruction in bytes.
    pub fn len(&self) -> usize {
        self.raw_words.len() * 2
    }

    /// False for every record built by the driver, which always includes the opcode word.
    pub fn is_empty(&self) -> bool {
        self.raw_words.is_empty()
    }

    /// Returns true if the word has not been decoded.
    pub fn is_data(&self) -> bool {
        self.mnemonic == Mnemonic::Data
    }

    /// Returns the mnemonic with its condition and size suffix, like `BNE.B` or `ADD.W`.
    pub fn mnemonic_text(&self) -> String {
        let mut text = match (self.mnemonic, self.condition) {
            (Mnemonic::Bcc, Some(cc)) => format!("B{}", cc),
            (m, _) => m.as_str().to_string(),
        };
        if let Some(size) = self.size {
            text.push('.');
            text.push_str(&size.to_string());
        }
        text
    }

    fn fmt_operands(&self, f: &mut std::fmt::Formatter<'_>, hex: bool) -> std::fmt::Result {
        if self.is_data() {
            return match self.opcode() {
                Some(word) => write!(f, "DATA {:#06X}", word),
                None => write!(f, "DATA"),
            };
        }

        write!(f, "{}", self.mnemonic_text())?;
        for (i, op) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            if hex {
                write!(f, "{}{:X}", sep, op)?;
            } else {
                write!(f, "{}{}", sep, op)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_operands(f, false)
    }
}

impl std::fmt::UpperHex for Instruction {
    /// Same as Display but with the immediate values written in upper hex format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_operands(f, true)
    }
}
