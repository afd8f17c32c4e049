//! Static description of the supported MIPS subset.
//!
//! Each entry records which source-operand position feeds which encoding
//! field, so operand resolution is table-driven rather than hardcoded
//! per mnemonic.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Sub,
    And,
    Or,
    Slt,
    Sll,
    Srl,
    Jr,
    Addi,
    Slti,
    Ori,
    Lw,
    Sw,
    Beq,
    Bne,
    J,
    Jal,
}

/// The three MIPS encoding formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrType {
    R,
    I,
    J,
}

/// Shape of one mnemonic: operand count, which operand position lands in
/// which field (`None` when the field is unused), and the fixed bits.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeSpec {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    pub kind: InstrType,
    pub operands: usize,
    pub rs: Option<usize>,
    pub rt: Option<usize>,
    pub rd: Option<usize>,
    pub imm: Option<usize>,
    /// Branch and jump targets may be written as labels.
    pub imm_label: bool,
    /// 6-bit opcode field.
    pub op_field: u8,
    /// 6-bit funct field, R-type only.
    pub funct: u8,
}

impl OpcodeSpec {
    const fn r(
        opcode: Opcode,
        mnemonic: &'static str,
        operands: usize,
        rs: Option<usize>,
        rt: Option<usize>,
        rd: Option<usize>,
        imm: Option<usize>,
        funct: u8,
    ) -> Self {
        Self {
            opcode,
            mnemonic,
            kind: InstrType::R,
            operands,
            rs,
            rt,
            rd,
            imm,
            imm_label: false,
            op_field: 0,
            funct,
        }
    }

    const fn i(
        opcode: Opcode,
        mnemonic: &'static str,
        rs: Option<usize>,
        rt: Option<usize>,
        imm: usize,
        imm_label: bool,
        op_field: u8,
    ) -> Self {
        Self {
            opcode,
            mnemonic,
            kind: InstrType::I,
            operands: 3,
            rs,
            rt,
            rd: None,
            imm: Some(imm),
            imm_label,
            op_field,
            funct: 0,
        }
    }

    const fn j(opcode: Opcode, mnemonic: &'static str, op_field: u8) -> Self {
        Self {
            opcode,
            mnemonic,
            kind: InstrType::J,
            operands: 1,
            rs: None,
            rt: None,
            rd: None,
            imm: Some(0),
            imm_label: true,
            op_field,
            funct: 0,
        }
    }
}

/// The supported instruction set.
///
/// Memory operations take three operands because the `offset(reg)`
/// composite is split before resolution; the offset sits at position 1
/// and the base register at position 2.
pub const TABLE: &[OpcodeSpec] = &[
    OpcodeSpec::r(Opcode::Add, "add", 3, Some(1), Some(2), Some(0), None, 0x20),
    OpcodeSpec::r(Opcode::Sub, "sub", 3, Some(1), Some(2), Some(0), None, 0x22),
    OpcodeSpec::r(Opcode::And, "and", 3, Some(1), Some(2), Some(0), None, 0x24),
    OpcodeSpec::r(Opcode::Or, "or", 3, Some(1), Some(2), Some(0), None, 0x25),
    OpcodeSpec::r(Opcode::Slt, "slt", 3, Some(1), Some(2), Some(0), None, 0x2a),
    OpcodeSpec::r(Opcode::Sll, "sll", 3, None, Some(1), Some(0), Some(2), 0x00),
    OpcodeSpec::r(Opcode::Srl, "srl", 3, None, Some(1), Some(0), Some(2), 0x02),
    OpcodeSpec::r(Opcode::Jr, "jr", 1, Some(0), None, None, None, 0x08),
    OpcodeSpec::i(Opcode::Addi, "addi", Some(1), Some(0), 2, false, 0x08),
    OpcodeSpec::i(Opcode::Slti, "slti", Some(1), Some(0), 2, false, 0x0a),
    OpcodeSpec::i(Opcode::Ori, "ori", Some(1), Some(0), 2, false, 0x0d),
    OpcodeSpec::i(Opcode::Lw, "lw", Some(2), Some(0), 1, false, 0x23),
    OpcodeSpec::i(Opcode::Sw, "sw", Some(2), Some(0), 1, false, 0x2b),
    OpcodeSpec::i(Opcode::Beq, "beq", Some(0), Some(1), 2, true, 0x04),
    OpcodeSpec::i(Opcode::Bne, "bne", Some(0), Some(1), 2, true, 0x05),
    OpcodeSpec::j(Opcode::J, "j", 0x02),
    OpcodeSpec::j(Opcode::Jal, "jal", 0x03),
];

/// Mnemonic lookup over a fixed entry slice. Injected into the
/// translator so tests can substitute a reduced table.
pub struct OpcodeTable {
    by_mnemonic: HashMap<&'static str, &'static OpcodeSpec>,
}

impl OpcodeTable {
    pub fn new() -> Self {
        Self::from_entries(TABLE)
    }

    pub fn from_entries(entries: &'static [OpcodeSpec]) -> Self {
        Self {
            by_mnemonic: entries.iter().map(|e| (e.mnemonic, e)).collect(),
        }
    }

    pub fn lookup(&self, mnemonic: &str) -> Option<&'static OpcodeSpec> {
        self.by_mnemonic.get(mnemonic).copied()
    }

    /// Reverse lookup over the fixed bit fields. The funct field only
    /// participates for R-type entries.
    pub fn classify(&self, op_field: u8, funct: u8) -> Option<&'static OpcodeSpec> {
        self.by_mnemonic.values().copied().find(|e| match e.kind {
            InstrType::R => e.op_field == op_field && e.funct == funct,
            InstrType::I | InstrType::J => e.op_field == op_field,
        })
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}
