//! The translated-instruction record.

use crate::opcode::Opcode;

/// One translated instruction: the resolved field values plus, once the
/// line has fully translated, its 32-character binary encoding.
///
/// Register fields the opcode does not use stay `None`. The default
/// value is the "empty" instruction handed back when iterating past the
/// end of a translation result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    opcode: Option<Opcode>,
    rs: Option<u8>,
    rt: Option<u8>,
    rd: Option<u8>,
    imm: i32,
    encoding: String,
}

impl Instruction {
    /// Populate every resolved field in one step.
    pub fn set_values(
        &mut self,
        opcode: Opcode,
        rs: Option<u8>,
        rt: Option<u8>,
        rd: Option<u8>,
        imm: i32,
    ) {
        self.opcode = Some(opcode);
        self.rs = rs;
        self.rt = rt;
        self.rd = rd;
        self.imm = imm;
    }

    pub fn set_encoding(&mut self, encoding: String) {
        self.encoding = encoding;
    }

    pub fn opcode(&self) -> Option<Opcode> {
        self.opcode
    }

    pub fn rs(&self) -> Option<u8> {
        self.rs
    }

    pub fn rt(&self) -> Option<u8> {
        self.rt
    }

    pub fn rd(&self) -> Option<u8> {
        self.rd
    }

    /// Shift amount for R-type, signed offset for I-type, word address
    /// for J-type.
    pub fn imm(&self) -> i32 {
        self.imm
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }
}
