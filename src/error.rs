// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding errors.
//!
//! [DecodeError] never escapes the disassembler: the driver turns each of them into a one-word `DATA`
//! instruction and keeps it in [Instruction::fallback](crate::instruction::Instruction::fallback).
//! [BufferError] is the only error returned to the caller.

use thiserror::Error;

/// Reasons why a word could not be decoded as an instruction.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No supported instruction family matches the opcode word.
    #[error("unclassified opcode {opcode:#06X}")]
    UnclassifiedOpcode {
        opcode: u16,
    },
    /// The family matched but its effective address is outside the supported subset.
    #[error("unsupported addressing mode {mode} with register {reg}")]
    UnsupportedAddressingMode {
        mode: u8,
        reg: u8,
    },
    /// The buffer ends before the last extension word of the instruction.
    #[error("buffer truncated at offset {offset:#X} while reading an extension word")]
    TruncatedBuffer {
        /// Byte offset of the missing word.
        offset: usize,
    },
}

/// Errors reported before disassembling a buffer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// The buffer has an odd number of bytes and cannot be split in 16-bits words.
    #[error("buffer length {0} is not a multiple of 2")]
    OddLength(usize),
    /// The requested start offset is odd or past the end of the buffer.
    #[error("start offset {offset:#X} is invalid for a buffer of {len} bytes")]
    InvalidOffset {
        offset: usize,
        len: usize,
    },
}
