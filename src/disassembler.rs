// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disassembly driver.
//!
//! Walks a byte buffer word by word and yields one [Instruction] per decode step.
//! Decoding errors never stop the walk: the word at the cursor is emitted as a one-word `DATA` instruction
//! and scanning resumes at the next word.

use crate::decoder;
use crate::error::BufferError;
use crate::instruction::Instruction;
use crate::memory_access::MemoryIter;

/// The longest instruction, `MOVE.L #imm,(xxx).L`, is 5 words long.
const MAX_INSTRUCTION_WORDS: usize = 5;

/// Decodes the instruction at `offset` in `bytes`.
///
/// `base` is the address of the first byte of the buffer.
/// Returns None if there is not a complete word at `offset`.
/// Any decoding error is turned into a one-word `DATA` instruction that records the cause.
pub fn decode_at(bytes: &[u8], offset: usize, base: u32) -> Option<Instruction> {
    let mut memory = MemoryIter::new(bytes, offset);
    let opcode = memory.next_word().ok()?;
    let address = base.wrapping_add(offset as u32);

    let instruction = match decoder::decode(opcode, address, &mut memory) {
        Ok(decoded) => {
            let words = (memory.next_offset - offset) / 2;
            let instruction = Instruction {
                mnemonic: decoded.mnemonic,
                size: decoded.size,
                condition: decoded.condition,
                operands: decoded.operands,
                address,
                raw_words: MemoryIter::new(bytes, offset).take(words).collect(),
                fallback: None,
            };
            log::trace!("{:#X} {}", address, instruction);
            instruction
        },
        Err(e) => {
            log::debug!("{:#X} {:#06X} emitted as DATA: {}", address, opcode, e);
            Instruction::data(opcode, address, e)
        },
    };

    Some(instruction)
}

/// Decodes all the instructions of the given buffer.
///
/// Returns an error if the buffer length is odd.
pub fn disassemble(bytes: &[u8], base: u32) -> Result<Vec<Instruction>, BufferError> {
    Ok(Disassembler::new(bytes, base)?.collect())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Scanning,
    EndOfBuffer,
}

/// Lazy iterator over the instructions of a buffer, in ascending address order.
///
/// Cloning it gives an independent iterator that restarts from the current position.
#[derive(Clone, Debug)]
pub struct Disassembler<'a> {
    bytes: &'a [u8],
    base: u32,
    cursor: usize,
    state: State,
}

impl<'a> Disassembler<'a> {
    /// New disassembler starting at the beginning of `bytes`, which is located at address `base`.
    pub fn new(bytes: &'a [u8], base: u32) -> Result<Self, BufferError> {
        if bytes.len() % 2 != 0 {
            return Err(BufferError::OddLength(bytes.len()));
        }

        Ok(Self {
            bytes,
            base,
            cursor: 0,
            state: State::Scanning,
        })
    }

    /// Moves the cursor to the given byte offset.
    ///
    /// The offset must be even and at most the length of the buffer.
    pub fn at(self, offset: usize) -> Result<Self, BufferError> {
        if offset % 2 != 0 || offset > self.bytes.len() {
            return Err(BufferError::InvalidOffset { offset, len: self.bytes.len() });
        }

        Ok(Self {
            cursor: offset,
            state: State::Scanning,
            ..self
        })
    }

    /// Byte offset of the next instruction.
    pub const fn offset(&self) -> usize {
        self.cursor
    }

    /// Address of the next instruction.
    pub const fn address(&self) -> u32 {
        self.base.wrapping_add(self.cursor as u32)
    }

    const fn remaining_words(&self) -> usize {
        (self.bytes.len() - self.cursor) / 2
    }
}

impl Iterator for Disassembler<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::EndOfBuffer {
            return None;
        }

        match decode_at(self.bytes, self.cursor, self.base) {
            Some(instruction) => {
                self.cursor += instruction.len();
                Some(instruction)
            },
            None => {
                self.state = State::EndOfBuffer;
                None
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == State::EndOfBuffer {
            return (0, Some(0));
        }

        let n = self.remaining_words();
        (n.div_ceil(MAX_INSTRUCTION_WORDS), Some(n))
    }
}

impl std::iter::FusedIterator for Disassembler<'_> {}
