//! Two-pass driver: label resolution, then per-line encoding.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::encode::encode;
use crate::error::TranslateError;
use crate::instruction::Instruction;
use crate::labels::{resolve_labels, MIPS_INSTR_BYTE_WIDTH, TEXT_ADDRESS_BASE};
use crate::lineinfo::LineInfo;
use crate::opcode::OpcodeTable;
use crate::register::RegisterTable;
use crate::resolve::resolve_operands;
use crate::tokenize::tokenize;

/// Lifecycle of one translation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No source has been processed yet.
    Initial,
    /// Source loaded and the label pass is complete.
    Loading,
    /// Working through the stripped lines in order.
    ParsingLine,
    /// Every line translated cleanly.
    Succeeded,
    /// A line failed; instructions from earlier lines are kept.
    Failed,
}

/// Drives both passes and owns the results of a run: the label table,
/// the translated instructions in source order, and the line-info
/// records the emulator uses for source-level stepping.
pub struct AssemblyTranslator {
    opcodes: OpcodeTable,
    registers: RegisterTable,
    labels: HashMap<String, u32>,
    instructions: Vec<Instruction>,
    lineinfo: Vec<LineInfo>,
    state: State,
    error: Option<TranslateError>,
    index: usize,
}

impl AssemblyTranslator {
    pub fn new() -> Self {
        Self::with_tables(OpcodeTable::new(), RegisterTable::new())
    }

    /// Build a translator over caller-supplied tables, so tests can
    /// substitute reduced instruction sets.
    pub fn with_tables(opcodes: OpcodeTable, registers: RegisterTable) -> Self {
        Self {
            opcodes,
            registers,
            labels: HashMap::new(),
            instructions: Vec::new(),
            lineinfo: Vec::new(),
            state: State::Initial,
            error: None,
            index: 0,
        }
    }

    /// Read and translate a whole source file.
    pub fn translate_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TranslateError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(source) => self.translate(&source),
            Err(e) => {
                self.reset();
                Err(self.fail(TranslateError::UnreadableSource(e.to_string())))
            }
        }
    }

    /// Run both passes over `source`. The first format error aborts the
    /// run; instructions translated before the failing line are kept.
    pub fn translate(&mut self, source: &str) -> Result<(), TranslateError> {
        self.reset();

        let pass = resolve_labels(source);
        self.labels = pass.labels;
        self.state = State::Loading;

        for (index, line) in pass.lines.iter().enumerate() {
            self.state = State::ParsingLine;
            let addr = TEXT_ADDRESS_BASE + MIPS_INSTR_BYTE_WIDTH * index as u32;
            if let Err(err) = self.parse_line(line, addr, index as u32 + 1) {
                return Err(self.fail(err));
            }
        }

        self.state = State::Succeeded;
        Ok(())
    }

    fn parse_line(&mut self, line: &str, addr: u32, line_number: u32) -> Result<(), TranslateError> {
        let token = tokenize(line)?;
        if token.is_blank() {
            return Ok(());
        }

        let spec = self
            .opcodes
            .lookup(&token.mnemonic)
            .ok_or_else(|| TranslateError::UnknownMnemonic(token.mnemonic.clone()))?;

        let mut instr = resolve_operands(spec, &token, &self.registers, &self.labels)?;
        let encoding = encode(spec, &instr);
        debug!("{:#010x} {} -> {}", addr, token.mnemonic, encoding);
        instr.set_encoding(encoding);

        self.lineinfo.push(LineInfo {
            instr_addr: addr,
            line_number,
            line_contents: line.trim().to_string(),
        });
        self.instructions.push(instr);
        Ok(())
    }

    fn reset(&mut self) {
        self.labels.clear();
        self.instructions.clear();
        self.lineinfo.clear();
        self.error = None;
        self.index = 0;
        self.state = State::Initial;
    }

    fn fail(&mut self, err: TranslateError) -> TranslateError {
        self.state = State::Failed;
        self.error = Some(err.clone());
        err
    }

    /// True when the most recent run translated every line.
    pub fn format_correct(&self) -> bool {
        self.state == State::Succeeded
    }

    /// The error that ended the most recent run, if it failed.
    pub fn error(&self) -> Option<&TranslateError> {
        self.error.as_ref()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn line_info(&self) -> &[LineInfo] {
        &self.lineinfo
    }

    /// Label table built by the first pass of the most recent run.
    pub fn labels(&self) -> &HashMap<String, u32> {
        &self.labels
    }

    /// Forward cursor over the translated instructions. Calls past the
    /// end hand back a default (empty) instruction.
    pub fn next_instruction(&mut self) -> Instruction {
        match self.instructions.get(self.index) {
            Some(instr) => {
                self.index += 1;
                instr.clone()
            }
            None => Instruction::default(),
        }
    }

    /// Restart the cursor from the first instruction.
    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

impl Default for AssemblyTranslator {
    fn default() -> Self {
        Self::new()
    }
}
