//! Pack a resolved instruction into its 32-character binary string.

use crate::instruction::Instruction;
use crate::opcode::{InstrType, OpcodeSpec};

/// Two's-complement bit string of `value`, truncated or left-padded to
/// exactly `width` characters. Callers pick the width of the target
/// field; there is no separate sign-extension step.
pub fn to_binary_string(value: i32, width: usize) -> String {
    debug_assert!((1..=32).contains(&width));
    let bits = value as u32;
    (0..width)
        .rev()
        .map(|i| if bits >> i & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Produce the 32-bit encoding for a fully resolved instruction.
///
/// R-type reinterprets the immediate as the 5-bit shift amount. J-type
/// keeps bits 27..2 of the 32-bit target address: the top four bits are
/// the segment and the bottom two are word alignment.
pub fn encode(spec: &OpcodeSpec, instr: &Instruction) -> String {
    let op_field = to_binary_string(i32::from(spec.op_field), 6);
    let rs = i32::from(instr.rs().unwrap_or(0));
    let rt = i32::from(instr.rt().unwrap_or(0));
    let rd = i32::from(instr.rd().unwrap_or(0));

    match spec.kind {
        InstrType::R => format!(
            "{}{}{}{}{}{}",
            op_field,
            to_binary_string(rs, 5),
            to_binary_string(rt, 5),
            to_binary_string(rd, 5),
            to_binary_string(instr.imm(), 5),
            to_binary_string(i32::from(spec.funct), 6),
        ),
        InstrType::I => format!(
            "{}{}{}{}",
            op_field,
            to_binary_string(rs, 5),
            to_binary_string(rt, 5),
            to_binary_string(instr.imm(), 16),
        ),
        InstrType::J => {
            let target = to_binary_string(instr.imm(), 32);
            format!("{}{}", op_field, &target[4..30])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;
    use crate::opcode::{Opcode, OpcodeTable};

    fn build(
        opcode: Opcode,
        rs: Option<u8>,
        rt: Option<u8>,
        rd: Option<u8>,
        imm: i32,
    ) -> Instruction {
        let mut instr = Instruction::default();
        instr.set_values(opcode, rs, rt, rd, imm);
        instr
    }

    #[test]
    fn binary_string_pads_to_width() {
        assert_eq!(to_binary_string(5, 5), "00101");
        assert_eq!(to_binary_string(0, 6), "000000");
        assert_eq!(to_binary_string(0x23, 6), "100011");
    }

    #[test]
    fn binary_string_negative_is_twos_complement() {
        assert_eq!(to_binary_string(-4, 16), "1111111111111100");
        assert_eq!(to_binary_string(-1, 5), "11111");
    }

    #[test]
    fn binary_string_truncates_to_width() {
        assert_eq!(to_binary_string(100, 16), "0000000001100100");
        assert_eq!(to_binary_string(0x400000, 32), "00000000010000000000000000000000");
    }

    #[test]
    fn r_type_layout() {
        let table = OpcodeTable::new();
        let spec = table.lookup("add").unwrap();
        // add $t0, $t1, $t2
        let instr = build(Opcode::Add, Some(9), Some(10), Some(8), 0);
        assert_eq!(encode(spec, &instr), "00000001001010100100000000100000");
    }

    #[test]
    fn r_type_shift_uses_immediate_as_shamt() {
        let table = OpcodeTable::new();
        let spec = table.lookup("sll").unwrap();
        // sll $t0, $t1, 4
        let instr = build(Opcode::Sll, None, Some(9), Some(8), 4);
        assert_eq!(encode(spec, &instr), "00000000000010010100000100000000");
    }

    #[test]
    fn i_type_negative_offset() {
        let table = OpcodeTable::new();
        let spec = table.lookup("lw").unwrap();
        // lw $t0, -4($t1)
        let instr = build(Opcode::Lw, Some(9), Some(8), None, -4);
        assert_eq!(encode(spec, &instr), "10001101001010001111111111111100");
    }

    #[test]
    fn j_type_keeps_bits_27_through_2() {
        let table = OpcodeTable::new();
        let spec = table.lookup("j").unwrap();
        let instr = build(Opcode::J, None, None, None, 0x400000);
        let encoding = encode(spec, &instr);
        assert_eq!(encoding.len(), 32);
        assert_eq!(&encoding[..6], "000010");
        assert_eq!(&encoding[6..], "00000100000000000000000000");
    }

    #[test]
    fn every_format_encodes_to_32_digits() {
        let table = OpcodeTable::new();
        for (line, spec) in [
            ("add", table.lookup("add").unwrap()),
            ("lw", table.lookup("lw").unwrap()),
            ("j", table.lookup("j").unwrap()),
        ] {
            let instr = build(spec.opcode, Some(1), Some(2), Some(3), 7);
            let encoding = encode(spec, &instr);
            assert_eq!(encoding.len(), 32, "{line}");
            assert!(encoding.chars().all(|c| c == '0' || c == '1'), "{line}");
        }
    }
}
