use serde::Serialize;

use std::fs;
use std::path::Path;

/// Source position of one translated instruction. The emulator reads
/// these records back to map addresses to source lines while stepping.
#[derive(Debug, Clone, Serialize)]
pub struct LineInfo {
    pub instr_addr: u32,
    pub line_number: u32,
    pub line_contents: String,
}

#[derive(Serialize)]
struct LineInfoFile {
    pub lineinfo: Vec<LineInfo>,
}

pub fn lineinfo_export<P: AsRef<Path>>(
    filename: P,
    li: &[LineInfo],
) -> Result<(), Box<dyn std::error::Error>> {
    let toml_data = toml::to_string(&LineInfoFile {
        lineinfo: li.to_vec(),
    })?;

    fs::write(filename, toml_data)?;

    Ok(())
}
