use std::path::PathBuf;

use clap::Parser;

use crate::{infer::SamplingStrategy, sql::DisplayNameEn};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate CREATE TABLE and column dictionary SQL from a labelled CSV file",
    long_about = None
)]
pub struct Cli {
    /// Input CSV file whose header holds display labels
    #[arg(default_value = "csv_01.csv")]
    pub csv_file: PathBuf,
    /// Column dictionary (.json, or .yaml/.yml)
    #[arg(default_value = "columnDict.json")]
    pub dictionary: PathBuf,
    /// Directory receiving the .sql file or errors.log
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,
    /// Prefix joined to the input file name to form the table name
    #[arg(short = 'p', long = "prefix", default_value = "bulk")]
    pub prefix: String,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Decode the input with this encoding instead of trying UTF-8 then Shift_JIS
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Value written to the displayNameEn dictionary column
    #[arg(long = "display-name-en", value_enum, default_value = "column-name")]
    pub display_name_en: DisplayNameEn,
    /// Rows sampled when inferring types for columns without a type hint
    #[arg(long = "type-sampling", value_enum, default_value = "first-row")]
    pub type_sampling: SamplingStrategy,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
