// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motorola 68000 disassembler front end.
//!
//! This library decodes a buffer of big-endian 68000 machine code into a sequence of [Instruction] records,
//! one per instruction, with their mnemonic, size, condition and operands fully resolved.
//! Instruction boundaries are discovered sequentially: the length of each instruction is the number of
//! extension words its addressing modes actually consumed.
//!
//! Any word that does not belong to a supported instruction, or whose addressing mode is not supported,
//! is emitted as a one-word `DATA` instruction and decoding resumes at the next word.
//! Disassembling a buffer never fails, except when its length is odd.
//!
//! # Supported instructions
//!
//! MOVE, MOVEA, MOVEM, ADD, ADDA, SUB, SUBQ, MULS, DIVS, LEA, OR, ORI, NEG, EOR, ASL, ASR, LSL, LSR, ROL, ROR,
//! BCLR, CMP, CMPI, Bcc, BRA, JSR, JMP and RTS.
//!
//! The program counter relative addressing modes and the 68020 full extension word formats are not supported.
//!
//! # How to use
//!
//! ```
//! use m68000_disasm::disassemble;
//!
//! let code = [0x08, 0x82, 0x00, 0x03, 0x4E, 0x75];
//! let insts = disassemble(&code, 0x1000).unwrap();
//!
//! assert_eq!(insts[0].to_string(), "BCLR #3, D2");
//! assert_eq!(insts[1].address, 0x1004);
//! assert_eq!(insts[1].to_string(), "RTS");
//! ```
//!
//! [Disassembler] is the lazy version of [disassemble], and [decode_at] decodes a single instruction.
//!
//! # Logging
//!
//! Decoded instructions are logged at the `trace` level and the words emitted as `DATA` at the `debug` level,
//! through the [log](https://docs.rs/log) facade.

pub mod addressing_modes;
pub mod condition;
pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod instruction;
pub mod isa;
pub mod memory_access;
pub mod utils;

pub use disassembler::{decode_at, disassemble, Disassembler};
pub use error::{BufferError, DecodeError};
pub use instruction::Instruction;
