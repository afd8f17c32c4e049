//! Second-pass line scanner: one mnemonic plus its operand list.

use crate::error::TranslateError;

/// The meaningful pieces of one label-stripped line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl Token {
    /// A line that produced no tokens at all (blank, whitespace, or
    /// comment-only). Such lines encode nothing but still hold an
    /// address slot.
    pub fn is_blank(&self) -> bool {
        self.mnemonic.is_empty() && self.operands.is_empty()
    }
}

/// Split one label-stripped line into a mnemonic and its operands.
///
/// Everything from the first `#` on is comment. The mnemonic is the
/// first run of non-whitespace characters. Each operand is a run of
/// non-whitespace characters; a comma ends the run early and is
/// discarded, and empty runs (stray commas) are not counted. Finally,
/// a trailing `offset(reg)` composite is split into two operands.
pub fn tokenize(line: &str) -> Result<Token, TranslateError> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut p = 0;

    while p < len && chars[p].is_whitespace() {
        p += 1;
    }
    let mut mnemonic = String::new();
    while p < len && !chars[p].is_whitespace() {
        mnemonic.push(chars[p]);
        p += 1;
    }

    let mut operands: Vec<String> = Vec::new();
    while p < len {
        while p < len && chars[p].is_whitespace() {
            p += 1;
        }
        let mut current = String::new();
        while p < len && !chars[p].is_whitespace() {
            if chars[p] == ',' {
                p += 1;
                break;
            }
            current.push(chars[p]);
            p += 1;
        }
        if !current.is_empty() {
            operands.push(current);
        }
    }

    // Base-register addressing: the last operand `offset(reg)` becomes
    // the two operands `offset`, `reg`. Requires at least one character
    // between the parentheses.
    let split = operands.last().and_then(|last| {
        let open = last.find('(')?;
        let close = last.find(')')?;
        (close > open + 1).then(|| (last[..open].to_string(), last[open + 1..close].to_string()))
    });
    if let Some((offset, reg)) = split {
        let end = operands.len() - 1;
        operands[end] = offset;
        operands.push(reg);
    }

    if mnemonic.is_empty() && !operands.is_empty() {
        return Err(TranslateError::MissingMnemonic);
    }

    Ok(Token { mnemonic, operands })
}
