// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Condition codes of the conditional instructions.

use crate::utils::bits;

/// Conditions for the conditional instructions, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    /// True.
    T,
    /// False.
    F,
    /// High.
    HI,
    /// Lower or Same.
    LS,
    /// Carry Clear.
    CC,
    /// Carry Set.
    CS,
    /// Not Equal.
    NE,
    /// Equal.
    EQ,
    /// Overflow Clear.
    VC,
    /// Overflow Set.
    VS,
    /// Plus.
    PL,
    /// Minus.
    MI,
    /// Greater or Equal.
    GE,
    /// Less Than.
    LT,
    /// Greater Than.
    GT,
    /// Less or Equal.
    LE,
}

impl Condition {
    /// All the conditions, indexed by their 4-bits encoding.
    pub const ALL: [Self; 16] = [
        Self::T, Self::F, Self::HI, Self::LS, Self::CC, Self::CS, Self::NE, Self::EQ,
        Self::VC, Self::VS, Self::PL, Self::MI, Self::GE, Self::LT, Self::GT, Self::LE,
    ];

    /// Returns the condition stored in bits 8 to 11 of a Bcc, DBcc or Scc opcode.
    #[inline(always)]
    pub const fn from_opcode(opcode: u16) -> Self {
        Self::ALL[bits(opcode, 8, 11) as usize]
    }

    /// The assembler mnemonic suffix of the condition.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::T  => "T",
            Self::F  => "F",
            Self::HI => "HI",
            Self::LS => "LS",
            Self::CC => "CC",
            Self::CS => "CS",
            Self::NE => "NE",
            Self::EQ => "EQ",
            Self::VC => "VC",
            Self::VS => "VS",
            Self::PL => "PL",
            Self::MI => "MI",
            Self::GE => "GE",
            Self::LT => "LT",
            Self::GT => "GT",
            Self::LE => "LE",
        }
    }
}

impl From<u16> for Condition {
    /// Only the low 4 bits are used, so every value maps to a condition.
    fn from(cc: u16) -> Self {
        Self::ALL[(cc & 0xF) as usize]
    }
}

impl From<Condition> for u16 {
    fn from(cc: Condition) -> Self {
        cc as u16
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
