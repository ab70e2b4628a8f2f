//! Column type vocabulary and sample-based type inference.
//!
//! Columns without an explicit type hint are classified from the cell at the
//! same position in the first data row. The [`SamplingStrategy::Majority`]
//! mode is an opt-in alternative that votes across every data row.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Deserializer, de};

use crate::{resolve::ResolvedColumn, tabular::RawTable};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Date,
    Text,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Date => "DATE",
            ColumnType::Text => "TEXT",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["INTEGER", "DATE", "TEXT"]
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ColumnType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(ColumnType::Integer),
            "date" => Ok(ColumnType::Date),
            "text" => Ok(ColumnType::Text),
            other => Err(anyhow!(
                "Unsupported type hint '{other}'. Supported types: {}",
                ColumnType::variants().join(", ")
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        ColumnType::from_str(&token).map_err(|err| de::Error::custom(err.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum SamplingStrategy {
    /// Classify from the first data row only
    #[default]
    FirstRow,
    /// Most frequent classification among non-empty cells of every data row
    Majority,
}

/// Classifies a single sample value.
pub fn infer_type(value: &str) -> ColumnType {
    if value.trim().is_empty() {
        return ColumnType::Text;
    }
    if is_integer(value) {
        return ColumnType::Integer;
    }
    if is_date(value) {
        return ColumnType::Date;
    }
    ColumnType::Text
}

fn is_integer(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix(['+', '-'])
        .unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Strict `YYYY-MM-DD`: no surrounding whitespace and no sign before the year.
fn is_date(value: &str) -> bool {
    value.trim() == value
        && value.as_bytes().first().is_some_and(u8::is_ascii_digit)
        && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

fn majority_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut counts = [0usize; 3];
    for value in values.filter(|value| !value.trim().is_empty()) {
        let slot = match infer_type(value) {
            ColumnType::Integer => 0,
            ColumnType::Date => 1,
            ColumnType::Text => 2,
        };
        counts[slot] += 1;
    }
    // Text wins ties, then date over integer.
    let [integer, date, text] = counts;
    if text >= date && text >= integer {
        ColumnType::Text
    } else if date >= integer {
        ColumnType::Date
    } else {
        ColumnType::Integer
    }
}

/// Settles the type of every column. Declared hints are kept; the rest are
/// inferred from the sample rows, or default to text when there are none.
///
/// `columns` must be aligned one-to-one with `table.header`, which holds once
/// every label resolved.
pub fn apply_inference(
    columns: &[ResolvedColumn],
    table: &RawTable,
    strategy: SamplingStrategy,
) -> Vec<TypedColumn> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let data_type = match column.type_hint {
                Some(declared) => declared,
                None if table.rows.is_empty() => ColumnType::Text,
                None => match strategy {
                    SamplingStrategy::FirstRow => {
                        let sample = table
                            .first_row()
                            .and_then(|row| row.get(idx))
                            .map(String::as_str)
                            .unwrap_or("");
                        infer_type(sample)
                    }
                    SamplingStrategy::Majority => majority_type(table.column_values(idx)),
                },
            };
            debug!(
                "Column '{}' ({}) typed as {}{}",
                column.physical_name,
                column.label,
                data_type,
                if column.type_hint.is_some() {
                    " (declared)"
                } else {
                    ""
                }
            );
            TypedColumn {
                label: column.label.clone(),
                physical_name: column.physical_name.clone(),
                data_type,
            }
        })
        .collect()
}

/// A resolved column whose SQL type has been settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedColumn {
    pub label: String,
    pub physical_name: String,
    pub data_type: ColumnType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Source;

    fn column(label: &str, name: &str, hint: Option<ColumnType>) -> ResolvedColumn {
        ResolvedColumn {
            label: label.to_string(),
            physical_name: name.to_string(),
            type_hint: hint,
            source: Source::Table,
        }
    }

    fn table(header: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn infer_type_classifies_samples() {
        assert_eq!(infer_type("123"), ColumnType::Integer);
        assert_eq!(infer_type("-42"), ColumnType::Integer);
        assert_eq!(infer_type(" 7 "), ColumnType::Integer);
        assert_eq!(infer_type("2024-01-01"), ColumnType::Date);
        assert_eq!(infer_type(""), ColumnType::Text);
        assert_eq!(infer_type("   "), ColumnType::Text);
        assert_eq!(infer_type("abc"), ColumnType::Text);
        assert_eq!(infer_type("12.5"), ColumnType::Text);
        assert_eq!(infer_type("2024/01/01"), ColumnType::Text);
        assert_eq!(infer_type("2024-02-30"), ColumnType::Text);
        assert_eq!(infer_type("+"), ColumnType::Text);
    }

    #[test]
    fn dates_must_not_carry_padding_or_sign() {
        assert_eq!(infer_type(" 2024-01-01"), ColumnType::Text);
        assert_eq!(infer_type("2024-01-01 "), ColumnType::Text);
        assert_eq!(infer_type("+2024-01-01"), ColumnType::Text);
        assert_eq!(infer_type("-2024-01-01"), ColumnType::Text);
    }

    #[test]
    fn type_hints_parse_case_insensitively() {
        assert_eq!("integer".parse::<ColumnType>().unwrap(), ColumnType::Integer);
        assert_eq!("INT".parse::<ColumnType>().unwrap(), ColumnType::Integer);
        assert_eq!("Date".parse::<ColumnType>().unwrap(), ColumnType::Date);
        assert_eq!("TEXT".parse::<ColumnType>().unwrap(), ColumnType::Text);
        let err = "VARCHAR(20)".parse::<ColumnType>().unwrap_err();
        assert!(err.to_string().contains("Unsupported type hint"));
    }

    #[test]
    fn first_row_drives_inference_for_every_column() {
        let columns = vec![
            column("id", "id", None),
            column("day", "day", None),
            column("memo", "memo", None),
        ];
        let table = table(&["id", "day", "memo"], &[&["1", "2024-01-01", "x"], &["a", "b", "c"]]);
        let typed = apply_inference(&columns, &table, SamplingStrategy::FirstRow);
        let types = typed.iter().map(|c| c.data_type).collect::<Vec<_>>();
        assert_eq!(
            types,
            vec![ColumnType::Integer, ColumnType::Date, ColumnType::Text]
        );
    }

    #[test]
    fn declared_hint_is_never_overridden() {
        let columns = vec![column("code", "code", Some(ColumnType::Text))];
        let table = table(&["code"], &[&["0042"]]);
        let typed = apply_inference(&columns, &table, SamplingStrategy::FirstRow);
        assert_eq!(typed[0].data_type, ColumnType::Text);
    }

    #[test]
    fn no_rows_means_text_and_short_rows_mean_text() {
        let columns = vec![column("a", "a", None), column("b", "b", None)];
        let empty = table(&["a", "b"], &[]);
        let typed = apply_inference(&columns, &empty, SamplingStrategy::FirstRow);
        assert!(typed.iter().all(|c| c.data_type == ColumnType::Text));

        let short = table(&["a", "b"], &[&["5"]]);
        let typed = apply_inference(&columns, &short, SamplingStrategy::FirstRow);
        assert_eq!(typed[0].data_type, ColumnType::Integer);
        assert_eq!(typed[1].data_type, ColumnType::Text);
    }

    #[test]
    fn majority_vote_outweighs_an_anomalous_first_row() {
        let columns = vec![column("qty", "qty", None)];
        let table = table(&["qty"], &[&["n/a"], &["1"], &["2"], &[""]]);
        let first = apply_inference(&columns, &table, SamplingStrategy::FirstRow);
        assert_eq!(first[0].data_type, ColumnType::Text);
        let majority = apply_inference(&columns, &table, SamplingStrategy::Majority);
        assert_eq!(majority[0].data_type, ColumnType::Integer);
    }
}
