use serde::Deserialize;

use std::fs;
use std::path::Path;

/// How the encoded sequence is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Four big-endian bytes per instruction.
    Binary,
    /// One 32-character binary-digit line per instruction.
    Text,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub config_name: String,
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
    /// Where to export the line-info table, if anywhere. The emulator
    /// picks this up for source-level debugging.
    #[serde(default)]
    pub lineinfo_fn: Option<String>,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Binary
}

pub fn backup_config() -> Config {
    Config {
        config_name: "backup config".to_string(),
        output_format: OutputFormat::Binary,
        lineinfo_fn: None,
    }
}

pub fn parse_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let toml_content = fs::read_to_string(path)?;

    let config: Config = toml::from_str(&toml_content)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
config_name = "text with lineinfo"
output_format = "text"
lineinfo_fn = "out.lineinfo.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.config_name, "text with lineinfo");
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.lineinfo_fn.as_deref(), Some("out.lineinfo.toml"));
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let config: Config = toml::from_str(r#"config_name = "minimal""#).unwrap();
        assert_eq!(config.output_format, OutputFormat::Binary);
        assert!(config.lineinfo_fn.is_none());
    }
}
