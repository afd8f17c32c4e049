//! Map tokenized operands onto an opcode's declared field shape.

use std::collections::HashMap;

use crate::error::TranslateError;
use crate::instruction::Instruction;
use crate::opcode::OpcodeSpec;
use crate::register::RegisterTable;
use crate::tokenize::Token;

const IMM_MIN: i64 = -(1 << 15);
const IMM_MAX: i64 = (1 << 15) - 1;

/// A signed decimal integer: an optional leading sign followed by at
/// least one digit, nothing else.
fn is_number_string(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('+') | Some('-') => s.len() > 1 && chars.all(|c| c.is_ascii_digit()),
        Some(c) if c.is_ascii_digit() => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Resolve a tokenized line against its opcode's shape.
///
/// Register positions go through the register table. The immediate
/// position takes a signed 16-bit decimal literal, or, where the opcode
/// allows labels, a known label's address or a raw `0x` hex address
/// (the escape hatch for targets outside this file).
pub fn resolve_operands(
    spec: &OpcodeSpec,
    token: &Token,
    registers: &RegisterTable,
    labels: &HashMap<String, u32>,
) -> Result<Instruction, TranslateError> {
    if token.operands.len() != spec.operands {
        return Err(TranslateError::OperandCount {
            mnemonic: spec.mnemonic.to_string(),
            expected: spec.operands,
            found: token.operands.len(),
        });
    }

    let reg_at = |pos: usize| -> Result<u8, TranslateError> {
        let name = &token.operands[pos];
        registers
            .lookup(name)
            .ok_or_else(|| TranslateError::UnknownRegister(name.clone()))
    };

    let rs = match spec.rs {
        Some(pos) => Some(reg_at(pos)?),
        None => None,
    };
    let rt = match spec.rt {
        Some(pos) => Some(reg_at(pos)?),
        None => None,
    };
    let rd = match spec.rd {
        Some(pos) => Some(reg_at(pos)?),
        None => None,
    };

    let mut imm = 0i32;
    if let Some(pos) = spec.imm {
        let text = &token.operands[pos];
        if is_number_string(text) {
            let value = text
                .parse::<i64>()
                .ok()
                .filter(|v| (IMM_MIN..=IMM_MAX).contains(v))
                .ok_or_else(|| TranslateError::ImmediateOutOfRange(text.clone()))?;
            imm = value as i32;
        } else if spec.imm_label {
            if let Some(&addr) = labels.get(text) {
                imm = addr as i32;
            } else if let Some(hex) = text.strip_prefix("0x") {
                imm = u32::from_str_radix(hex, 16)
                    .map_err(|_| TranslateError::UnknownLabel(text.clone()))?
                    as i32;
            } else {
                return Err(TranslateError::UnknownLabel(text.clone()));
            }
        } else {
            return Err(TranslateError::ImmediateExpected(text.clone()));
        }
    }

    let mut instr = Instruction::default();
    instr.set_values(spec.opcode, rs, rt, rd, imm);
    Ok(instr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::OpcodeTable;
    use crate::tokenize::tokenize;

    fn resolve(line: &str, labels: &HashMap<String, u32>) -> Result<Instruction, TranslateError> {
        let opcodes = OpcodeTable::new();
        let token = tokenize(line)?;
        let spec = opcodes
            .lookup(&token.mnemonic)
            .ok_or_else(|| TranslateError::UnknownMnemonic(token.mnemonic.clone()))?;
        resolve_operands(spec, &token, &RegisterTable::new(), labels)
    }

    fn no_labels() -> HashMap<String, u32> {
        HashMap::new()
    }

    #[test]
    fn r_type_fields_land_by_position() {
        let instr = resolve("add $t0, $t1, $t2", &no_labels()).unwrap();
        assert_eq!(instr.rd(), Some(8));
        assert_eq!(instr.rs(), Some(9));
        assert_eq!(instr.rt(), Some(10));
        assert_eq!(instr.imm(), 0);
    }

    #[test]
    fn unused_register_fields_stay_empty() {
        let instr = resolve("sll $t0, $t1, 4", &no_labels()).unwrap();
        assert_eq!(instr.rs(), None);
        assert_eq!(instr.rt(), Some(9));
        assert_eq!(instr.rd(), Some(8));
        assert_eq!(instr.imm(), 4);
    }

    #[test]
    fn split_memory_operand_resolves_signed_offset() {
        let instr = resolve("lw $t0, -4($t0)", &no_labels()).unwrap();
        assert_eq!(instr.rt(), Some(8));
        assert_eq!(instr.rs(), Some(8));
        assert_eq!(instr.imm(), -4);
    }

    #[test]
    fn operand_count_mismatch() {
        let err = resolve("add $t0, $t1", &no_labels()).unwrap_err();
        assert_eq!(
            err,
            TranslateError::OperandCount {
                mnemonic: "add".to_string(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn trailing_text_surfaces_as_operand_count_mismatch() {
        let err = resolve("add $t0, $t1, $t2 extra", &no_labels()).unwrap_err();
        assert!(matches!(err, TranslateError::OperandCount { found: 4, .. }));
    }

    #[test]
    fn unknown_register_is_rejected() {
        let err = resolve("add $t0, $zz, $t2", &no_labels()).unwrap_err();
        assert_eq!(err, TranslateError::UnknownRegister("$zz".to_string()));
    }

    #[test]
    fn immediate_range_boundaries() {
        assert!(resolve("addi $t0, $t1, 100", &no_labels()).is_ok());
        assert!(resolve("addi $t0, $t1, 32767", &no_labels()).is_ok());
        assert!(resolve("addi $t0, $t1, -32768", &no_labels()).is_ok());
        assert!(matches!(
            resolve("addi $t0, $t1, 32768", &no_labels()),
            Err(TranslateError::ImmediateOutOfRange(_))
        ));
        assert!(matches!(
            resolve("addi $t0, $t1, -32769", &no_labels()),
            Err(TranslateError::ImmediateOutOfRange(_))
        ));
        assert!(matches!(
            resolve("addi $t0, $t1, 100000", &no_labels()),
            Err(TranslateError::ImmediateOutOfRange(_))
        ));
    }

    #[test]
    fn branch_target_resolves_through_label_table() {
        let mut labels = HashMap::new();
        labels.insert("loop".to_string(), 0x40000c);
        let instr = resolve("beq $t0, $t1, loop", &labels).unwrap();
        assert_eq!(instr.imm(), 0x40000c);
    }

    #[test]
    fn unknown_label_falls_back_to_hex_literal() {
        let instr = resolve("j 0x400010", &no_labels()).unwrap();
        assert_eq!(instr.imm(), 0x400010);
    }

    #[test]
    fn known_label_wins_over_hex_parse() {
        let mut labels = HashMap::new();
        labels.insert("0x10".to_string(), 0x400004);
        let instr = resolve("j 0x10", &labels).unwrap();
        assert_eq!(instr.imm(), 0x400004);
    }

    #[test]
    fn bad_hex_literal_is_rejected() {
        let err = resolve("j 0xzz", &no_labels()).unwrap_err();
        assert_eq!(err, TranslateError::UnknownLabel("0xzz".to_string()));
    }

    #[test]
    fn undefined_label_is_rejected() {
        let err = resolve("beq $t0, $t1, nowhere", &no_labels()).unwrap_err();
        assert_eq!(err, TranslateError::UnknownLabel("nowhere".to_string()));
    }

    #[test]
    fn label_forbidden_where_opcode_wants_a_number() {
        let err = resolve("addi $t0, $t1, loop", &no_labels()).unwrap_err();
        assert_eq!(err, TranslateError::ImmediateExpected("loop".to_string()));
    }
}
