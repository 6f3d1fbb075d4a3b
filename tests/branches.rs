// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use m68000_disasm::condition::Condition;
use m68000_disasm::error::DecodeError;
use m68000_disasm::instruction::{BranchTarget, Mnemonic, Operand, Size};
use m68000_disasm::{decode_at, disassemble};

fn to_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

fn branch_target(operand: &Operand) -> BranchTarget {
    match operand {
        Operand::Branch(target) => *target,
        _ => panic!("not a branch operand: {operand:?}"),
    }
}

#[test]
fn displacement_sizes() {
    let base = 0x1000;

    // Byte: no extension word.
    let inst = decode_at(&to_bytes(&[0x66FE, 0x4E71]), 0, base).unwrap();
    assert_eq!(inst.length_in_words(), 1);
    assert_eq!(inst.size, Some(Size::Byte));
    assert_eq!(branch_target(&inst.operands[0]), BranchTarget { displacement: -2, target: 0x1000 });
    assert_eq!(inst.to_string(), "BNE.B -2 <0x1000>");

    // Word: one extension word.
    let inst = decode_at(&to_bytes(&[0x6000, 0x0100, 0x4E71]), 0, base).unwrap();
    assert_eq!(inst.length_in_words(), 2);
    assert_eq!(inst.size, Some(Size::Word));
    assert_eq!(inst.condition, None);
    assert_eq!(inst.to_string(), "BRA.W 256 <0x1102>");

    let inst = decode_at(&to_bytes(&[0x6C00, 0x8000]), 0, base).unwrap();
    assert_eq!(branch_target(&inst.operands[0]).displacement, -32768);

    // Long: two extension words.
    let inst = decode_at(&to_bytes(&[0x67FF, 0xFFFF, 0xFFFC, 0x4E71]), 0, base).unwrap();
    assert_eq!(inst.length_in_words(), 3);
    assert_eq!(inst.size, Some(Size::Long));
    assert_eq!(inst.to_string(), "BEQ.L -4 <0xFFE>");
}

#[test]
fn every_byte_displacement() {
    for disp in 0x01..0xFF_u16 {
        let inst = decode_at(&to_bytes(&[0x6000 | disp]), 0, 0x8000).unwrap();
        assert_eq!(inst.mnemonic, Mnemonic::Bra);
        assert_eq!(inst.length_in_words(), 1);

        let target = branch_target(&inst.operands[0]);
        assert_eq!(target.displacement, disp as u8 as i8 as i32);
        assert_eq!(target.target, (0x8002 + disp as u8 as i8 as i32) as u32);
    }
}

#[test]
fn conditions() {
    for cc in 2..16_u16 {
        let inst = decode_at(&to_bytes(&[0x6002 | cc << 8]), 0, 0).unwrap();
        let condition = Condition::from(cc);
        assert_eq!(inst.mnemonic, Mnemonic::Bcc);
        assert_eq!(inst.condition, Some(condition));
        assert_eq!(inst.mnemonic_text(), format!("B{}.B", condition));
    }
}

#[test]
fn bsr_is_data() {
    let insts = disassemble(&to_bytes(&[0x6100, 0x0010]), 0).unwrap();
    assert_eq!(insts.len(), 2);
    assert!(insts[0].is_data());
    assert_eq!(insts[0].fallback, Some(DecodeError::UnclassifiedOpcode { opcode: 0x6100 }));
}

#[test]
fn truncated_displacement() {
    // BRA.L with a single displacement word: both words are emitted as DATA.
    let insts = disassemble(&to_bytes(&[0x60FF, 0x0000]), 0).unwrap();
    assert_eq!(insts.len(), 2);
    assert_eq!(insts[0].fallback, Some(DecodeError::TruncatedBuffer { offset: 4 }));
    assert!(insts[1].is_data());

    let insts = disassemble(&to_bytes(&[0x6600]), 0).unwrap();
    assert_eq!(insts.len(), 1);
    assert_eq!(insts[0].fallback, Some(DecodeError::TruncatedBuffer { offset: 2 }));
}

#[test]
fn target_wraps_around() {
    let inst = decode_at(&to_bytes(&[0x6000, 0x0010]), 0, 0xFFFF_FFF0).unwrap();
    assert_eq!(branch_target(&inst.operands[0]).target, 0x0000_0002);
}
