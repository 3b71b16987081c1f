//! Output formatting helpers for CLI commands.

use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use serde_json::Value;

/// Encoding used when printing a values tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Format a values tree for printing.
pub fn format_values(
    values: &Value,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let out = match format {
        OutputFormat::Yaml => serde_yaml::to_string(values)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(values)?;
            json.push('\n');
            json
        }
    };
    Ok(out)
}

/// Read a whole input file; `-` reads standard input.
pub fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
}
