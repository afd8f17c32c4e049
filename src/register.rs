//! Register-name lookup.

/// Conventional MIPS register names, indexed by register number.
pub const REGISTER_NAMES: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// Maps a register operand to its index. Accepts the conventional names
/// and the bare numeric forms `$0`..`$31`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisterTable;

impl RegisterTable {
    pub fn new() -> Self {
        Self
    }

    pub fn lookup(&self, name: &str) -> Option<u8> {
        if let Some(idx) = REGISTER_NAMES.iter().position(|&n| n == name) {
            return Some(idx as u8);
        }
        match name.strip_prefix('$')?.parse::<u8>() {
            Ok(n) if n < 32 => Some(n),
            _ => None,
        }
    }
}
