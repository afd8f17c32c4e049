use thiserror::Error;

/// Everything that can sink a translation run.
///
/// All of these are format errors: the run stops at the first one, the
/// offending line produces no instruction, and instructions from earlier
/// lines are kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("failed to read source: {0}")]
    UnreadableSource(String),

    #[error("operands present with no opcode")]
    MissingMnemonic,

    #[error("unrecognized mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error("`{mnemonic}` expects {expected} operands, found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized register `{0}`")]
    UnknownRegister(String),

    #[error("immediate `{0}` does not fit in a signed 16-bit field")]
    ImmediateOutOfRange(String),

    #[error("`{0}` is not a valid immediate for this opcode")]
    ImmediateExpected(String),

    #[error("`{0}` is neither a known label nor a hex address")]
    UnknownLabel(String),
}
