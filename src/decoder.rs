// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instruction decoders, one per family.
//!
//! The functions return the mnemonic and the operands of the instruction.
//! They take as parameters the opcode of the instruction, its address and an iterator over the extension words.
//! Extension words are read in encoding order: immediate data, bit numbers and register lists come before the
//! extension words of the effective address.

use crate::addressing_modes::{AddressingMode, EffectiveAddress};
use crate::condition::Condition;
use crate::error::DecodeError;
use crate::instruction::{BranchTarget, Mnemonic, Operand, RegisterList, Size};
use crate::isa::{Family, Isa};
use crate::memory_access::MemoryIter;
use crate::utils::{bit, bits};

/// The decoded content of an instruction, without its address and raw words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub mnemonic: Mnemonic,
    pub size: Option<Size>,
    pub condition: Option<Condition>,
    pub operands: Vec<Operand>,
}

impl Decoded {
    fn new(mnemonic: Mnemonic, size: Option<Size>, operands: Vec<Operand>) -> Self {
        Self { mnemonic, size, condition: None, operands }
    }
}

/// Decodes the given opcode located at `address`.
///
/// `memory` must point to the word following the opcode. On success it points after the last extension word.
/// On failure its position is unspecified and the caller is expected to drop it.
pub fn decode(opcode: u16, address: u32, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let isa = Isa::from(opcode);
    let Some(family) = isa.family() else {
        return Err(DecodeError::UnclassifiedOpcode { opcode });
    };

    match family {
        Family::Move => move_family(isa, opcode, memory),
        Family::Add => add(isa, opcode, memory),
        Family::Sub => sub(isa, opcode, memory),
        Family::MulDiv => muls_divs(isa, opcode, memory),
        Family::Lea => lea(opcode, memory),
        Family::Or => or(isa, opcode, memory),
        Family::Neg => neg(opcode, memory),
        Family::Eor => eor(opcode, memory),
        Family::ShiftRotate => shift_rotate(isa, opcode, memory),
        Family::Bclr => bclr(opcode, memory),
        Family::Cmp => cmp(isa, opcode, memory),
        Family::Branch => branch(isa, opcode, address, memory),
        Family::Jsr => jsr_jmp(isa, opcode, memory),
        Family::Rts => Ok(Decoded::new(Mnemonic::Rts, None, Vec::new())),
    }
}

/// Size field at bits 6 and 7.
fn primary_size(opcode: u16) -> Result<Size, DecodeError> {
    Size::from_bits(bits(opcode, 6, 7)).ok_or(DecodeError::UnclassifiedOpcode { opcode })
}

/// Resolves the effective address in the lower 6 bits of the opcode.
fn effective_address(opcode: u16, size: Size, memory: &mut MemoryIter) -> Result<Operand, DecodeError> {
    let (am, _) = AddressingMode::from_opcode(opcode, size, memory)?;
    Ok(EffectiveAddress::new(am, size).into())
}

/// Reads immediate data of the given size.
fn immediate(size: Size, memory: &mut MemoryIter) -> Result<Operand, DecodeError> {
    let (am, _) = AddressingMode::resolve(7, 4, size, memory)?;
    Ok(EffectiveAddress::new(am, size).into())
}

/// Data register in bits 9 to 11.
fn data_register(opcode: u16, size: Size) -> Operand {
    EffectiveAddress::drd(bits(opcode, 9, 11), size).into()
}

/// Address register in bits 9 to 11.
fn address_register(opcode: u16, size: Size) -> Operand {
    EffectiveAddress::ard(bits(opcode, 9, 11), size).into()
}

/// MOVE, MOVEA and MOVEM.
fn move_family(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    if isa == Isa::Movem {
        return movem(opcode, memory);
    }

    let size = Size::from_move(bits(opcode, 12, 13)).ok_or(DecodeError::UnclassifiedOpcode { opcode })?;
    let src = effective_address(opcode, size, memory)?;

    if isa == Isa::Movea {
        Ok(Decoded::new(Mnemonic::Movea, Some(size), vec![src, address_register(opcode, size)]))
    } else {
        let (dst, _) = AddressingMode::from_move_destination(opcode, size, memory)?;
        Ok(Decoded::new(Mnemonic::Move, Some(size), vec![src, EffectiveAddress::new(dst, size).into()]))
    }
}

/// MOVEM. The register list word comes before the effective address extension words.
fn movem(opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let size = Size::from_bit(bits(opcode, 6, 6));
    let mask = memory.next_word()?;
    let (am, _) = AddressingMode::from_opcode(opcode, size, memory)?;

    let list = Operand::RegisterList(RegisterList::from_extension_word(mask, am.is_ariwpr()));
    let ea = EffectiveAddress::new(am, size).into();

    let operands = if bit(opcode, 10) {
        vec![ea, list]
    } else {
        vec![list, ea]
    };

    Ok(Decoded::new(Mnemonic::Movem, Some(size), operands))
}

/// ADD and ADDA.
fn add(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    if isa == Isa::Adda {
        let size = Size::from_bit(bits(opcode, 8, 8));
        let src = effective_address(opcode, size, memory)?;
        return Ok(Decoded::new(Mnemonic::Adda, Some(size), vec![src, address_register(opcode, size)]));
    }

    register_direction(Mnemonic::Add, opcode, memory)
}

/// SUB and SUBQ.
fn sub(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    if isa == Isa::Subq {
        let size = primary_size(opcode)?;
        let data = match bits(opcode, 9, 11) {
            0 => 8,
            d => d as u32,
        };
        let dst = effective_address(opcode, size, memory)?;
        return Ok(Decoded::new(Mnemonic::Subq, Some(size), vec![EffectiveAddress::immediate(data, size).into(), dst]));
    }

    register_direction(Mnemonic::Sub, opcode, memory)
}

/// ADD, SUB and OR: `<ea>, Dn` when bit 8 is clear, `Dn, <ea>` when it is set.
fn register_direction(mnemonic: Mnemonic, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let size = primary_size(opcode)?;
    let ea = effective_address(opcode, size, memory)?;
    let reg = data_register(opcode, size);

    let operands = if bit(opcode, 8) {
        vec![reg, ea]
    } else {
        vec![ea, reg]
    };

    Ok(Decoded::new(mnemonic, Some(size), operands))
}

/// MULS and DIVS, both word-sized.
fn muls_divs(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let mnemonic = if isa == Isa::Muls { Mnemonic::Muls } else { Mnemonic::Divs };
    let src = effective_address(opcode, Size::Word, memory)?;
    Ok(Decoded::new(mnemonic, Some(Size::Word), vec![src, data_register(opcode, Size::Word)]))
}

fn lea(opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let src = effective_address(opcode, Size::Long, memory)?;
    Ok(Decoded::new(Mnemonic::Lea, None, vec![src, address_register(opcode, Size::Long)]))
}

/// OR and ORI.
fn or(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    if isa == Isa::Ori {
        return immediate_operation(Mnemonic::Ori, opcode, memory);
    }

    register_direction(Mnemonic::Or, opcode, memory)
}

/// ORI and CMPI: `#imm, <ea>`.
fn immediate_operation(mnemonic: Mnemonic, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let size = primary_size(opcode)?;
    let imm = immediate(size, memory)?;
    let dst = effective_address(opcode, size, memory)?;
    Ok(Decoded::new(mnemonic, Some(size), vec![imm, dst]))
}

fn neg(opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let size = primary_size(opcode)?;
    let dst = effective_address(opcode, size, memory)?;
    Ok(Decoded::new(Mnemonic::Neg, Some(size), vec![dst]))
}

fn eor(opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let size = primary_size(opcode)?;
    let dst = effective_address(opcode, size, memory)?;
    Ok(Decoded::new(Mnemonic::Eor, Some(size), vec![data_register(opcode, size), dst]))
}

/// ASL, ASR, LSL, LSR, ROL and ROR, in both register and memory forms.
fn shift_rotate(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let left = bit(opcode, 8);
    let mnemonic = match (isa, left) {
        (Isa::Asm | Isa::Asr, true) => Mnemonic::Asl,
        (Isa::Asm | Isa::Asr, false) => Mnemonic::Asr,
        (Isa::Lsm | Isa::Lsr, true) => Mnemonic::Lsl,
        (Isa::Lsm | Isa::Lsr, false) => Mnemonic::Lsr,
        (_, true) => Mnemonic::Rol,
        (_, false) => Mnemonic::Ror,
    };

    if matches!(isa, Isa::Asm | Isa::Lsm | Isa::Rom) {
        let dst = effective_address(opcode, Size::Word, memory)?;
        return Ok(Decoded::new(mnemonic, Some(Size::Word), vec![dst]));
    }

    let size = primary_size(opcode)?;
    let count = bits(opcode, 9, 11);
    let count = if bit(opcode, 5) {
        EffectiveAddress::drd(count, size)
    } else {
        EffectiveAddress::immediate(if count == 0 { 8 } else { count as u32 }, Size::Byte)
    };
    let dst = EffectiveAddress::drd(bits(opcode, 0, 2), size);

    Ok(Decoded::new(mnemonic, Some(size), vec![count.into(), dst.into()]))
}

/// BCLR, static (bit number in the next word) and dynamic (bit number in a data register).
///
/// The operation is long on a data register and byte on memory.
fn bclr(opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let number = if bit(opcode, 8) {
        EffectiveAddress::drd(bits(opcode, 9, 11), Size::Long)
    } else {
        EffectiveAddress::immediate((memory.next_word()? & 0xFF) as u32, Size::Byte)
    };

    let size = if bits(opcode, 3, 5) == 0 { Size::Long } else { Size::Byte };
    let dst = effective_address(opcode, size, memory)?;

    Ok(Decoded::new(Mnemonic::Bclr, None, vec![number.into(), dst]))
}

/// CMP and CMPI.
fn cmp(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    if isa == Isa::Cmpi {
        return immediate_operation(Mnemonic::Cmpi, opcode, memory);
    }

    let size = primary_size(opcode)?;
    let src = effective_address(opcode, size, memory)?;
    Ok(Decoded::new(Mnemonic::Cmp, Some(size), vec![src, data_register(opcode, size)]))
}

/// Bcc and BRA. The size of the displacement is selected by the low byte of the opcode.
fn branch(isa: Isa, opcode: u16, address: u32, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let (size, displacement) = match opcode & 0xFF {
        0x00 => (Size::Word, memory.next_word()? as i16 as i32),
        0xFF => (Size::Long, memory.next_long()? as i32),
        disp => (Size::Byte, disp as u8 as i8 as i32),
    };
    let target = Operand::Branch(BranchTarget::new(address, displacement));

    if isa == Isa::Bra {
        Ok(Decoded::new(Mnemonic::Bra, Some(size), vec![target]))
    } else {
        Ok(Decoded {
            condition: Some(Condition::from_opcode(opcode)),
            ..Decoded::new(Mnemonic::Bcc, Some(size), vec![target])
        })
    }
}

/// JSR and JMP.
fn jsr_jmp(isa: Isa, opcode: u16, memory: &mut MemoryIter) -> Result<Decoded, DecodeError> {
    let mnemonic = if isa == Isa::Jsr { Mnemonic::Jsr } else { Mnemonic::Jmp };
    let dst = effective_address(opcode, Size::Long, memory)?;
    Ok(Decoded::new(mnemonic, None, vec![dst]))
}
