// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addressing mode-related structs, enums and functions.
//!
//! The resolver is the only place that reads extension words for an effective address,
//! and it reports how many it read, so the length of an instruction is always derived
//! from the addressing modes that have actually been resolved.

use crate::error::DecodeError;
use crate::instruction::{Register, Size};
use crate::memory_access::MemoryIter;
use crate::utils::{bit, bits, sign_extend, truncate};

/// Addressing modes supported by the disassembler.
///
/// The program counter relative modes and the 68020 full extension word formats are not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Data Register Direct.
    Drd(u8),
    /// Address Register Direct.
    Ard(u8),
    /// Address Register Indirect.
    Ari(u8),
    /// Address Register Indirect With POstincrement.
    Ariwpo(u8),
    /// Address Register Indirect With PRedecrement.
    Ariwpr(u8),
    /// Address Register Indirect With Displacement (address register, displacement).
    Ariwd(u8, i16),
    /// Address Register Indirect With Index 8 (address register, brief extension word).
    Ariwi8(u8, BriefExtensionWord),
    /// Absolute Short.
    AbsShort(u16),
    /// Absolute Long.
    AbsLong(u32),
    /// Immediate Data, zero-extended to 32 bits.
    Immediate(u32),
}

impl AddressingMode {
    /// Resolves the effective address given by its mode and register fields.
    ///
    /// `memory` must point to the first extension word of this effective address.
    /// Returns the addressing mode and the number of extension words that have been read.
    /// `size` is only used by the immediate mode, to know how many words to read.
    pub fn resolve(mode: u16, reg: u16, size: Size, memory: &mut MemoryIter) -> Result<(Self, usize), DecodeError> {
        let beg = memory.next_offset;
        let r = (reg & 7) as u8;

        let am = match mode & 7 {
            0 => Self::Drd(r),
            1 => Self::Ard(r),
            2 => Self::Ari(r),
            3 => Self::Ariwpo(r),
            4 => Self::Ariwpr(r),
            5 => Self::Ariwd(r, memory.next_word()? as i16),
            6 => {
                let bew = BriefExtensionWord(memory.next_word()?);
                if bew.is_full_format() {
                    return Err(DecodeError::UnsupportedAddressingMode { mode: 6, reg: r });
                }
                Self::Ariwi8(r, bew)
            },
            _ => match r {
                0 => Self::AbsShort(memory.next_word()?),
                1 => Self::AbsLong(memory.next_long()?),
                4 => {
                    let imm = if size.is_long() {
                        memory.next_long()?
                    } else {
                        truncate(memory.next_word()? as u32, size)
                    };
                    Self::Immediate(imm)
                },
                _ => return Err(DecodeError::UnsupportedAddressingMode { mode: 7, reg: r }),
            },
        };

        Ok((am, (memory.next_offset - beg) / 2))
    }

    /// Resolves the effective address at the standard opcodes location (lower 6 bits).
    pub fn from_opcode(opcode: u16, size: Size, memory: &mut MemoryIter) -> Result<(Self, usize), DecodeError> {
        Self::resolve(bits(opcode, 3, 5), bits(opcode, 0, 2), size, memory)
    }

    /// Resolves the destination effective address of a MOVE or MOVEA instruction (bits 6 to 11, register first).
    pub fn from_move_destination(opcode: u16, size: Size, memory: &mut MemoryIter) -> Result<(Self, usize), DecodeError> {
        Self::resolve(bits(opcode, 6, 8), bits(opcode, 9, 11), size, memory)
    }

    #[inline(always)]
    pub const fn is_ariwpr(self) -> bool {
        matches!(self, Self::Ariwpr(_))
    }
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drd(reg) => write!(f, "D{}", reg),
            Self::Ard(reg) => write!(f, "A{}", reg),
            Self::Ari(reg) => write!(f, "(A{})", reg),
            Self::Ariwpo(reg) => write!(f, "(A{})+", reg),
            Self::Ariwpr(reg) => write!(f, "-(A{})", reg),
            Self::Ariwd(reg, disp) => write!(f, "({},A{})", disp, reg),
            Self::Ariwi8(reg, bew) => write!(f, "({},A{},{})", bew.displacement(), reg, bew),
            Self::AbsShort(addr) => write!(f, "({:#X}).W", addr),
            Self::AbsLong(addr) => write!(f, "({:#X}).L", addr),
            Self::Immediate(imm) => write!(f, "#{}", imm),
        }
    }
}

/// Brief extension word of the address register indirect with index mode.
///
/// - bit 15: index register type (0 = data, 1 = address)
/// - bits 12-14: index register number
/// - bit 11: index size (0 = sign-extended word, 1 = long)
/// - bit 8: 0 for the brief format
/// - bits 0-7: signed displacement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BriefExtensionWord(pub u16);

impl BriefExtensionWord {
    /// New brief extension word from its fields.
    pub const fn new(address: bool, reg: u8, long: bool, disp: i8) -> Self {
        Self((address as u16) << 15 | ((reg & 7) as u16) << 12 | (long as u16) << 11 | disp as u8 as u16)
    }

    /// True when bit 8 is set, meaning this is a 68020 full extension word.
    pub const fn is_full_format(self) -> bool {
        bit(self.0, 8)
    }

    /// The index register.
    pub const fn index_register(self) -> Register {
        let reg = bits(self.0, 12, 14) as u8;
        if bit(self.0, 15) {
            Register::Address(reg)
        } else {
            Register::Data(reg)
        }
    }

    /// The size of the index register.
    pub const fn index_size(self) -> Size {
        if bit(self.0, 11) {
            Size::Long
        } else {
            Size::Word
        }
    }

    /// The 8-bits signed displacement.
    pub const fn displacement(self) -> i8 {
        self.0 as i8
    }
}

impl std::fmt::Display for BriefExtensionWord {
    /// Disassembles the index register, like `D1.W` or `A7.L`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.index_register(), self.index_size())
    }
}

/// An operand location: the addressing mode and the size it was resolved under.
///
/// Register direct modes do not depend on the size, but immediate data does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectiveAddress {
    pub mode: AddressingMode,
    pub size: Size,
}

impl EffectiveAddress {
    pub const fn new(mode: AddressingMode, size: Size) -> Self {
        Self { mode, size }
    }

    /// Data register direct operand, for instructions that encode a bare register field.
    pub const fn drd(reg: u16, size: Size) -> Self {
        Self::new(AddressingMode::Drd((reg & 7) as u8), size)
    }

    /// Address register direct operand, for instructions that encode a bare register field.
    pub const fn ard(reg: u16, size: Size) -> Self {
        Self::new(AddressingMode::Ard((reg & 7) as u8), size)
    }

    /// Immediate operand encoded inside the opcode word (quick data, shift count, bit number).
    pub const fn immediate(value: u32, size: Size) -> Self {
        Self::new(AddressingMode::Immediate(value), size)
    }
}

impl std::fmt::Display for EffectiveAddress {
    /// Immediate values are written as signed decimal integers of the operand size.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            AddressingMode::Immediate(imm) => write!(f, "#{}", sign_extend(imm, self.size)),
            mode => write!(f, "{}", mode),
        }
    }
}

impl std::fmt::UpperHex for EffectiveAddress {
    /// Same as Display but with the immediate value written in upper hex format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            AddressingMode::Immediate(imm) => write!(f, "#{:#X}", truncate(imm, self.size)),
            _ => std::fmt::Display::fmt(&self, f),
        }
    }
}

/// Set of effective address modes an instruction accepts.
///
/// Bits 0 to 6 are the modes 0 to 6, bits 7 to 11 are the mode 7 with register 0 to 4
/// (absolute short, absolute long, PC with displacement, PC with index, immediate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EaModes(u16);

impl EaModes {
    const DRD: u16 = 1 << 0;
    const ARD: u16 = 1 << 1;
    const ARI: u16 = 1 << 2;
    const ARIWPO: u16 = 1 << 3;
    const ARIWPR: u16 = 1 << 4;
    const ARIWD: u16 = 1 << 5;
    const ARIWI8: u16 = 1 << 6;
    const ABS_SHORT: u16 = 1 << 7;
    const ABS_LONG: u16 = 1 << 8;
    const PCIWD: u16 = 1 << 9;
    const PCIWI8: u16 = 1 << 10;
    const IMMEDIATE: u16 = 1 << 11;

    const MEMORY_ALTERABLE_BITS: u16 = Self::ARI | Self::ARIWPO | Self::ARIWPR | Self::ARIWD | Self::ARIWI8 | Self::ABS_SHORT | Self::ABS_LONG;

    /// Every mode.
    pub const ALL: Self = Self(0x0FFF);
    /// Every mode except address register direct.
    pub const DATA: Self = Self(Self::ALL.0 & !Self::ARD);
    /// Modes that designate a memory location that can be written.
    pub const MEMORY_ALTERABLE: Self = Self(Self::MEMORY_ALTERABLE_BITS);
    /// Data register direct and the memory alterable modes.
    pub const DATA_ALTERABLE: Self = Self(Self::DRD | Self::MEMORY_ALTERABLE_BITS);
    /// Data alterable and address register direct modes.
    pub const ALTERABLE: Self = Self(Self::DRD | Self::ARD | Self::MEMORY_ALTERABLE_BITS);
    /// Modes that designate a memory location without side effects.
    pub const CONTROL: Self = Self(Self::ARI | Self::ARIWD | Self::ARIWI8 | Self::ABS_SHORT | Self::ABS_LONG | Self::PCIWD | Self::PCIWI8);
    /// MOVEM register to memory.
    pub const MOVEM_TO_MEMORY: Self = Self(Self::ARI | Self::ARIWPR | Self::ARIWD | Self::ARIWI8 | Self::ABS_SHORT | Self::ABS_LONG);
    /// MOVEM memory to register.
    pub const MOVEM_TO_REGISTER: Self = Self(Self::CONTROL.0 | Self::ARIWPO);

    /// Removes the address register direct mode from the set.
    pub const fn without_ard(self) -> Self {
        Self(self.0 & !Self::ARD)
    }

    /// Checks if the given mode and register fields designate a mode of the set.
    pub const fn contains(self, mode: u16, reg: u16) -> bool {
        let index = if mode & 7 < 7 {
            mode & 7
        } else if reg & 7 <= 4 {
            7 + (reg & 7)
        } else {
            return false;
        };
        self.0 & (1 << index) != 0
    }

    /// Checks the effective address in the lower 6 bits of the opcode.
    pub const fn contains_opcode(self, opcode: u16) -> bool {
        self.contains(bits(opcode, 3, 5), bits(opcode, 0, 2))
    }
}
