// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only access to the instruction stream.

use crate::error::DecodeError;
use crate::utils::u32_from_words;

/// Cursor over the big-endian 16-bits words of a byte buffer.
///
/// The decoders pull the opcode and extension words from it. Reads never go past the end of the buffer:
/// they return [DecodeError::TruncatedBuffer] instead, without advancing.
#[derive(Clone, Debug)]
pub struct MemoryIter<'a> {
    data: &'a [u8],
    /// Byte offset of the next word to be returned.
    pub next_offset: usize,
}

impl<'a> MemoryIter<'a> {
    /// New iterator returning the word at `offset` first.
    pub const fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, next_offset: offset }
    }

    /// Number of complete words left after the cursor.
    pub const fn remaining_words(&self) -> usize {
        self.data.len().saturating_sub(self.next_offset) / 2
    }

    /// Returns the word at the cursor without advancing.
    pub fn peek_word(&self) -> Result<u16, DecodeError> {
        match self.data.get(self.next_offset..self.next_offset + 2) {
            Some(&[high, low]) => Ok(u16::from_be_bytes([high, low])),
            _ => Err(DecodeError::TruncatedBuffer { offset: self.next_offset }),
        }
    }

    /// Returns the word at the cursor then advances by 2 bytes.
    pub fn next_word(&mut self) -> Result<u16, DecodeError> {
        let word = self.peek_word()?;
        self.next_offset += 2;
        Ok(word)
    }

    /// Returns the long word (high word first) at the cursor then advances by 4 bytes.
    ///
    /// Nothing is consumed if only one word remains.
    pub fn next_long(&mut self) -> Result<u32, DecodeError> {
        if self.remaining_words() < 2 {
            return Err(DecodeError::TruncatedBuffer { offset: self.next_offset + 2 * self.remaining_words() });
        }
        let high = self.next_word()?;
        let low = self.next_word()?;
        Ok(u32_from_words(high, low))
    }
}

impl Iterator for MemoryIter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_word().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining_words();
        (n, Some(n))
    }
}
