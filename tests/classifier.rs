// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use m68000_disasm::decode_at;
use m68000_disasm::error::DecodeError;
use m68000_disasm::instruction::Mnemonic;
use m68000_disasm::isa::{Family, Isa};

#[test]
fn classification() {
    let cases = [
        (0x4E75, Isa::Rts),
        (0x0882, Isa::Bclr),
        (0x0390, Isa::Bclr),
        (0x0000, Isa::Ori),
        (0x0C40, Isa::Cmpi),
        (0x4EB9, Isa::Jsr),
        (0x4EF9, Isa::Jmp),
        (0x48E7, Isa::Movem),
        (0x4CDF, Isa::Movem),
        (0x4487, Isa::Neg),
        (0x41F8, Isa::Lea),
        (0x83FC, Isa::Divs),
        (0xC1C1, Isa::Muls),
        (0xD0C0, Isa::Adda),
        (0xD468, Isa::Add),
        (0x9001, Isa::Sub),
        (0x5183, Isa::Subq),
        (0x8010, Isa::Or),
        (0xB250, Isa::Cmp),
        (0xB159, Isa::Eor),
        (0xE340, Isa::Asr),
        (0xE2AA, Isa::Lsr),
        (0xE11B, Isa::Ror),
        (0xE0D0, Isa::Asm),
        (0xE3EA, Isa::Lsm),
        (0xE6D8, Isa::Rom),
        (0x6000, Isa::Bra),
        (0x66FE, Isa::Bcc),
        (0x2248, Isa::Movea),
        (0x34C1, Isa::Move),
    ];

    for (opcode, isa) in cases {
        assert_eq!(Isa::from(opcode), isa, "{opcode:#06X}");
        assert_eq!(Isa::classify(opcode), isa, "{opcode:#06X}");
    }
}

#[test]
fn bclr_before_immediate_operations() {
    // Static BCLR shares its top nibble with ORI and CMPI.
    for opcode in 0x0880u16..0x08C0 {
        let isa = Isa::from(opcode);
        let mode = (opcode >> 3) & 7;
        if mode == 1 || opcode & 0x3F > 0x39 {
            assert_eq!(isa, Isa::Unknown, "{opcode:#06X}");
        } else {
            assert_eq!(isa, Isa::Bclr, "{opcode:#06X}");
        }
    }
}

#[test]
fn illegal_effective_addresses() {
    let cases: [u16; 16] = [
        0x4448, // NEG.W A0
        0x41C0, // LEA D0, A0
        0x4E80, // JSR D0
        0x1008, // MOVE.B A0, D0
        0x1248, // MOVEA.B A0, A1
        0xD300, // ADDX.B D0, D1
        0x9308, // SUBX.B -(A0), -(A1)
        0x8300, // SBCD D0, D1
        0x4A40, // TST.W D0
        0x0888, // BCLR #n, A0
        0x003C, // ORI to CCR
        0x0CFC, // CMPI with size 11
        0xB348, // CMPM.W (A0)+, (A1)+
        0xE110, // ROXL.B #8, D0
        0xE4D0, // ROXR (A0)
        0x6100, // BSR
    ];

    for opcode in cases {
        assert_eq!(Isa::from(opcode), Isa::Unknown, "{opcode:#06X}");
    }

    assert_eq!(Isa::from(0x3048_u16), Isa::Movea); // MOVEA.W A0, A0
    assert_eq!(Isa::from(0x11BC_u16), Isa::Move); // MOVE.B #imm, (d8,A0,Xn)
}

#[test]
fn families() {
    assert_eq!(Isa::Unknown.family(), None);
    assert_eq!(Isa::Movem.family(), Some(Family::Move));
    assert_eq!(Isa::Adda.family(), Some(Family::Add));
    assert_eq!(Isa::Subq.family(), Some(Family::Sub));
    assert_eq!(Isa::Divs.family(), Some(Family::MulDiv));
    assert_eq!(Isa::Ori.family(), Some(Family::Or));
    assert_eq!(Isa::Rom.family(), Some(Family::ShiftRotate));
    assert_eq!(Isa::Lsr.family(), Some(Family::ShiftRotate));
    assert_eq!(Isa::Cmpi.family(), Some(Family::Cmp));
    assert_eq!(Isa::Bra.family(), Some(Family::Branch));
    assert_eq!(Isa::Jmp.family(), Some(Family::Jsr));
}

#[test]
fn unclassified_words_are_data() {
    for opcode in 0..=u16::MAX {
        if Isa::from(opcode) != Isa::Unknown {
            continue;
        }

        let bytes = opcode.to_be_bytes();
        let inst = decode_at(&bytes, 0, 0).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Data, "{opcode:#06X}");
        assert_eq!(inst.length_in_words(), 1, "{opcode:#06X}");
        assert_eq!(inst.fallback, Some(DecodeError::UnclassifiedOpcode { opcode }), "{opcode:#06X}");
        assert_eq!(inst.to_string(), format!("DATA {:#06X}", opcode));
    }
}

#[test]
fn program_counter_relative_is_unsupported() {
    // LEA (d16,PC), A0 is classified as LEA, but its addressing mode is not supported.
    assert_eq!(Isa::from(0x41FA_u16), Isa::Lea);

    let bytes = [0x41, 0xFA, 0x00, 0x10];
    let inst = decode_at(&bytes, 0, 0).unwrap();
    assert!(inst.is_data());
    assert_eq!(inst.length_in_words(), 1);
    assert_eq!(inst.fallback, Some(DecodeError::UnsupportedAddressingMode { mode: 7, reg: 2 }));
}
