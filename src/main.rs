use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use byteorder::{BigEndian, WriteBytesExt};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mint_as::config::{self, Config, OutputFormat};
use mint_as::lineinfo::lineinfo_export;
use mint_as::AssemblyTranslator;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Translate a MIPS assembly subset into 32-bit machine encodings"
)]
struct Opts {
    /// Input assembly file, one instruction per line
    input: PathBuf,
    /// Output file for the encoded instructions
    #[arg(short, long)]
    output: PathBuf,
    /// Optional toml configuration file, examples are provided in configs/
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();

    let config: Config = match &opts.config {
        Some(path) => match config::parse_config(path) {
            Ok(v) => v,
            Err(e) => {
                warn!("failed to parse config file ({e}), falling back to defaults");
                config::backup_config()
            }
        },
        None => config::backup_config(),
    };
    info!("using config {}", config.config_name);

    let mut translator = AssemblyTranslator::new();
    if let Err(err) = translator.translate_file(&opts.input) {
        bail!("translation failed: {err}");
    }

    let out = File::create(&opts.output)
        .with_context(|| format!("failed to create {}", opts.output.display()))?;
    let mut out = BufWriter::new(out);

    for instr in translator.instructions() {
        match config.output_format {
            OutputFormat::Binary => {
                let word = u32::from_str_radix(instr.encoding(), 2)
                    .context("encoding is not a 32-bit binary string")?;
                out.write_u32::<BigEndian>(word)?;
            }
            OutputFormat::Text => writeln!(out, "{}", instr.encoding())?,
        }
    }
    out.flush()?;

    if let Some(lineinfo_fn) = &config.lineinfo_fn {
        if let Err(e) = lineinfo_export(lineinfo_fn, translator.line_info()) {
            bail!("failed to export line info: {e}");
        }
    }

    info!(
        "assembled {} instructions from {}",
        translator.instructions().len(),
        opts.input.display()
    );

    Ok(())
}
