//! First pass: strip label prefixes and assign line addresses.

use std::collections::HashMap;

use tracing::debug;

pub const TEXT_ADDRESS_BASE: u32 = 0x400000;
pub const MIPS_INSTR_BYTE_WIDTH: u32 = 4;

/// Output of the label pass.
pub struct LabelPass {
    /// Source lines with any `label:` prefix removed, in original order.
    pub lines: Vec<String>,
    /// Label name -> address of the line it appeared on.
    pub labels: HashMap<String, u32>,
}

/// Walk the raw source once, recording label definitions and handing
/// back the stripped lines for the encoding pass.
///
/// Every physical line advances the address counter by one instruction
/// width, blank or not, so label addresses stay stable no matter what
/// the encoding pass later makes of the other lines. A duplicated label
/// keeps its last definition.
pub fn resolve_labels(source: &str) -> LabelPass {
    let mut labels = HashMap::new();
    let mut lines = Vec::new();
    let mut addr = TEXT_ADDRESS_BASE;

    for line in source.lines() {
        let stripped = match line.find(':') {
            Some(pos) => {
                let label = &line[..pos];
                debug!("inserting label {} at {:#x}", label, addr);
                labels.insert(label.to_string(), addr);
                line[pos + 1..].to_string()
            }
            None => line.to_string(),
        };
        addr += MIPS_INSTR_BYTE_WIDTH;
        lines.push(stripped);
    }

    LabelPass { lines, labels }
}
