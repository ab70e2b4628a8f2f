//! Column dictionary model and loading.
//!
//! A dictionary maps each table key to the labels it knows, and each label to
//! a physical column name plus an optional type hint. The `__common` section
//! is shared by every table and consulted after the table's own section.
//!
//! ```json
//! {
//!   "sample":   { "氏名": { "column": "name" } },
//!   "__common": { "日付": { "column": "event_date", "typeHint": "DATE" } }
//! }
//! ```

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{error::SqlGenError, infer::ColumnType};

pub const COMMON_SECTION: &str = "__common";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDef {
    #[serde(rename = "column")]
    pub physical_name: String,
    /// `None` means the type is inferred from sample data.
    #[serde(rename = "typeHint", default)]
    pub type_hint: Option<ColumnType>,
}

impl ColumnDef {
    pub fn new(physical_name: impl Into<String>, type_hint: Option<ColumnType>) -> Self {
        Self {
            physical_name: physical_name.into(),
            type_hint,
        }
    }
}

pub type Section = HashMap<String, ColumnDef>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColumnDictionary {
    sections: HashMap<String, Section>,
}

impl ColumnDictionary {
    pub fn from_sections<I>(sections: I) -> Self
    where
        I: IntoIterator<Item = (String, Section)>,
    {
        Self {
            sections: sections.into_iter().collect(),
        }
    }

    pub fn section(&self, table_key: &str) -> Option<&Section> {
        self.sections.get(table_key)
    }

    pub fn common(&self) -> Option<&Section> {
        self.section(COMMON_SECTION)
    }

    pub fn table_keys(&self) -> impl Iterator<Item = &str> {
        self.sections
            .keys()
            .map(String::as_str)
            .filter(|key| *key != COMMON_SECTION)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SqlGenError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading column dictionary {path:?}"))?;
        let parsed = if is_yaml_path(path) {
            serde_yaml::from_str::<ColumnDictionary>(&raw).map_err(|err| err.to_string())
        } else {
            serde_json::from_str::<ColumnDictionary>(&raw).map_err(|err| err.to_string())
        };
        let dictionary = parsed.map_err(|reason| SqlGenError::MalformedDictionary {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(dictionary)
    }
}

fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
    )
}
