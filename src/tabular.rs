//! Loading a delimited file into a header and its data rows.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info};

use crate::{
    error::SqlGenError,
    io_utils::{self, EncodingCandidate},
};

/// Header labels and string cells exactly as they appear in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn first_row(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Cell at `column` in every data row, `""` where a row is too short.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(column).map(String::as_str).unwrap_or(""))
    }
}

/// Reads `path`, decoding it with the first candidate that accepts every byte.
/// The first record is always the header.
pub fn load_table(
    path: &Path,
    delimiter: u8,
    candidates: &[EncodingCandidate],
) -> Result<RawTable> {
    if !path.exists() {
        return Err(SqlGenError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let bytes = fs::read(path).with_context(|| format!("Reading input file {path:?}"))?;
    let (text, candidate) = io_utils::decode_with_candidates(&bytes, candidates).ok_or_else(|| {
        SqlGenError::EncodingDetectionFailure {
            path: path.to_path_buf(),
            tried: candidates.iter().map(EncodingCandidate::name).join(", "),
        }
    })?;
    debug!(
        "Decoded {:?} as {} using delimiter '{}'",
        path,
        candidate.name(),
        io_utils::printable_delimiter(delimiter)
    );

    let table = parse_table(&text, delimiter).with_context(|| format!("Parsing {path:?}"))?;
    if table.header.is_empty() {
        return Err(SqlGenError::EmptyInput {
            path: path.to_path_buf(),
        }
        .into());
    }
    info!(
        "Loaded {} column(s) and {} data row(s) from {:?} ({})",
        table.header.len(),
        table.rows.len(),
        path,
        candidate.name()
    );
    Ok(table)
}

/// Parses decoded text line by line. A blank line is an empty record, so the
/// first line stays the header and the first data row stays the sampled row
/// even when either of them is blank.
pub fn parse_table(text: &str, delimiter: u8) -> Result<RawTable> {
    let mut records = record_lines(text).into_iter().enumerate().map(|(idx, line)| {
        parse_record(line, delimiter).with_context(|| format!("Reading line {}", idx + 1))
    });
    let header = match records.next() {
        Some(record) => record?,
        None => return Ok(RawTable::default()),
    };
    let rows = records.collect::<Result<Vec<Vec<String>>>>()?;
    Ok(RawTable { header, rows })
}

/// Splits `text` at line breaks outside quoted fields, dropping the `\r` of
/// CRLF endings. A final line break does not start another record.
fn record_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                lines.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
        .into_iter()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

fn parse_record(line: &str, delimiter: u8) -> Result<Vec<String>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = io_utils::open_csv_reader(line.as_bytes(), delimiter);
    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}
