//! Rendering of the table definition and column-dictionary statements.
//!
//! Identifiers and values are interpolated verbatim. Labels and column names
//! come from local configuration and are trusted; nothing here escapes quotes.

use clap::ValueEnum;
use itertools::Itertools;

use crate::infer::TypedColumn;

pub const DICTIONARY_TABLE: &str = "eSys_ColumnDictionary";
pub const INSERT_DATE_COLUMN: &str = r#"  "insertDate" TIMESTAMP WITHOUT TIME ZONE DEFAULT now()"#;

/// Value written to the `displayNameEn` dictionary column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum DisplayNameEn {
    /// Repeat the physical column name as a placeholder
    #[default]
    ColumnName,
    /// Repeat the original header label
    Label,
    /// Write SQL NULL
    Null,
}

impl DisplayNameEn {
    fn render(&self, column: &TypedColumn) -> String {
        match self {
            DisplayNameEn::ColumnName => format!("'{}'", column.physical_name),
            DisplayNameEn::Label => format!("'{}'", column.label),
            DisplayNameEn::Null => "NULL".to_string(),
        }
    }
}

/// The three statements written for one input, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlDocument {
    pub create_table: String,
    pub delete: String,
    pub insert: String,
}

impl SqlDocument {
    pub fn build(table_name: &str, columns: &[TypedColumn], display_name_en: DisplayNameEn) -> Self {
        Self {
            create_table: create_table_sql(table_name, columns),
            delete: delete_sql(table_name),
            insert: insert_sql(table_name, columns, display_name_en),
        }
    }

    /// Statements separated by one blank line, without a trailing newline.
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n\n{}", self.create_table, self.delete, self.insert)
    }
}

pub fn create_table_sql(table_name: &str, columns: &[TypedColumn]) -> String {
    let definitions = columns
        .iter()
        .map(|column| format!("  \"{}\" {}", column.physical_name, column.data_type))
        .chain(std::iter::once(INSERT_DATE_COLUMN.to_string()))
        .join(",\n");
    format!("DROP TABLE IF EXISTS {table_name};\nCREATE TABLE \"{table_name}\" (\n{definitions}\n);")
}

pub fn delete_sql(table_name: &str) -> String {
    format!("DELETE FROM \"{DICTIONARY_TABLE}\" WHERE \"tableName\" = '{table_name}';")
}

pub fn insert_sql(table_name: &str, columns: &[TypedColumn], display_name_en: DisplayNameEn) -> String {
    let values = columns
        .iter()
        .map(|column| {
            format!(
                "  ('{table_name}', '{}', '{}', {})",
                column.physical_name,
                column.label,
                display_name_en.render(column)
            )
        })
        .join(",\n");
    format!(
        "INSERT INTO \"{DICTIONARY_TABLE}\" (\"tableName\", \"columnName\", \"displayNameJa\", \"displayNameEn\")\nVALUES\n{values};"
    )
}
