//! Mapping header labels to physical columns.

use log::debug;

use crate::{
    dictionary::{ColumnDef, ColumnDictionary},
    infer::ColumnType,
};

/// Which dictionary section a label was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Table,
    Common,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub label: String,
    pub physical_name: String,
    /// `None` until the type is inferred from sample data.
    pub type_hint: Option<ColumnType>,
    pub source: Source,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved columns in header order; unresolved labels leave no entry.
    pub columns: Vec<ResolvedColumn>,
    pub unresolved: Vec<String>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Looks up a single label, table section first and common section second.
pub fn lookup<'a>(
    dictionary: &'a ColumnDictionary,
    table_key: &str,
    label: &str,
) -> Option<(&'a ColumnDef, Source)> {
    dictionary
        .section(table_key)
        .and_then(|section| section.get(label))
        .map(|def| (def, Source::Table))
        .or_else(|| {
            dictionary
                .common()
                .and_then(|section| section.get(label))
                .map(|def| (def, Source::Common))
        })
}

pub fn resolve_columns(
    header: &[String],
    dictionary: &ColumnDictionary,
    table_key: &str,
) -> Resolution {
    let mut resolution = Resolution::default();
    for label in header {
        match lookup(dictionary, table_key, label) {
            Some((def, source)) => {
                debug!(
                    "Label '{label}' -> \"{}\" ({source:?} section)",
                    def.physical_name
                );
                resolution.columns.push(ResolvedColumn {
                    label: label.clone(),
                    physical_name: def.physical_name.clone(),
                    type_hint: def.type_hint,
                    source,
                });
            }
            None => {
                debug!("Label '{label}' not found in '{table_key}' or common section");
                resolution.unresolved.push(label.clone());
            }
        }
    }
    resolution
}
