//! I/O utilities for decoding and reading delimited input.
//!
//! All input decoding in csv-sqlgen flows through this module. It provides:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding candidates**: an ordered list of `encoding_rs` decoders tried
//!   in turn until one decodes the whole input without errors.
//! - **Reader construction**: `open_csv_reader` over already-decoded text;
//!   callers feed it one record at a time since it skips blank lines.

use std::io::Read;

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// A decoder tried while detecting the encoding of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingCandidate {
    pub encoding: &'static Encoding,
    pub strip_bom: bool,
}

impl EncodingCandidate {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            strip_bom: encoding == UTF_8,
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

/// UTF-8 first (with or without a byte-order mark), then Shift_JIS.
/// `encoding_rs` serves the cp932 / windows-31j labels with the Shift_JIS
/// decoder, so one entry covers both.
pub fn default_encoding_candidates() -> Vec<EncodingCandidate> {
    vec![EncodingCandidate::new(UTF_8), EncodingCandidate::new(SHIFT_JIS)]
}

pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let trimmed = label.trim();
    if trimmed.eq_ignore_ascii_case("cp932") {
        return Ok(SHIFT_JIS);
    }
    Encoding::for_label(trimmed.as_bytes()).ok_or_else(|| anyhow!("Unknown encoding '{label}'"))
}

/// Builds the candidate list, replacing the default list with a single forced
/// encoding when one is requested.
pub fn encoding_candidates(forced: Option<&str>) -> Result<Vec<EncodingCandidate>> {
    match forced {
        Some(label) => {
            let encoding = resolve_encoding(label)?;
            Ok(vec![EncodingCandidate::new(encoding)])
        }
        None => Ok(default_encoding_candidates()),
    }
}

pub fn resolve_input_delimiter(path: &std::path::Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Decodes `bytes` strictly, returning `None` when any byte sequence is
/// invalid for the candidate.
pub fn decode_bytes(bytes: &[u8], candidate: &EncodingCandidate) -> Option<String> {
    if candidate.strip_bom {
        let (text, had_errors) = candidate.encoding.decode_with_bom_removal(bytes);
        if had_errors {
            None
        } else {
            Some(text.into_owned())
        }
    } else {
        candidate
            .encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

/// Returns the first successful decode along with the candidate that produced it.
pub fn decode_with_candidates<'a>(
    bytes: &[u8],
    candidates: &'a [EncodingCandidate],
) -> Option<(String, &'a EncodingCandidate)> {
    candidates
        .iter()
        .find_map(|candidate| decode_bytes(bytes, candidate).map(|text| (text, candidate)))
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
