//! End-to-end generation for a single input file.
//!
//! Loads the table and dictionary, resolves every header label, and either
//! writes `<output_dir>/<prefix>_<table_key>.sql` or, when any label is
//! unresolved, writes `errors.log` and fails with
//! [`SqlGenError::UnresolvedColumns`]. The SQL document is built in memory and
//! written with a single call, so a failed run never leaves a partial file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use itertools::Itertools;
use log::{debug, info};

use crate::{
    cli::Cli,
    dictionary::ColumnDictionary,
    error::SqlGenError,
    infer::{self, SamplingStrategy},
    io_utils, report, resolve,
    sql::{DisplayNameEn, SqlDocument},
    tabular,
};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub csv_file: PathBuf,
    pub dictionary: PathBuf,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub delimiter: Option<u8>,
    pub input_encoding: Option<String>,
    pub display_name_en: DisplayNameEn,
    pub type_sampling: SamplingStrategy,
}

impl GenerateOptions {
    pub fn new(csv_file: impl Into<PathBuf>, dictionary: impl Into<PathBuf>) -> Self {
        Self {
            csv_file: csv_file.into(),
            dictionary: dictionary.into(),
            output_dir: PathBuf::from("."),
            prefix: "bulk".to_string(),
            delimiter: None,
            input_encoding: None,
            display_name_en: DisplayNameEn::default(),
            type_sampling: SamplingStrategy::default(),
        }
    }
}

impl From<&Cli> for GenerateOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            csv_file: cli.csv_file.clone(),
            dictionary: cli.dictionary.clone(),
            output_dir: cli.output_dir.clone(),
            prefix: cli.prefix.clone(),
            delimiter: cli.delimiter,
            input_encoding: cli.input_encoding.clone(),
            display_name_en: cli.display_name_en,
            type_sampling: cli.type_sampling,
        }
    }
}

/// The input file name without its extension.
pub fn table_key_for(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| anyhow!("Cannot derive a table name from {path:?}"))
}

pub fn table_name(prefix: &str, table_key: &str) -> String {
    format!("{prefix}_{table_key}")
}

/// Runs the pipeline and returns the path of the SQL file written.
pub fn execute(options: &GenerateOptions) -> Result<PathBuf> {
    fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("Creating output directory {:?}", options.output_dir))?;

    let candidates = io_utils::encoding_candidates(options.input_encoding.as_deref())?;
    let delimiter = io_utils::resolve_input_delimiter(&options.csv_file, options.delimiter);
    let table = tabular::load_table(&options.csv_file, delimiter, &candidates)
        .with_context(|| format!("Loading table from {:?}", options.csv_file))?;
    let dictionary = ColumnDictionary::load(&options.dictionary)
        .with_context(|| format!("Loading column dictionary from {:?}", options.dictionary))?;

    let table_key = table_key_for(&options.csv_file)?;
    let table_name = table_name(&options.prefix, &table_key);

    if dictionary.section(&table_key).is_none() {
        debug!(
            "No '{}' section in {:?}; only common entries apply (sections: {})",
            table_key,
            options.dictionary,
            dictionary.table_keys().sorted().join(", ")
        );
    }

    let resolution = resolve::resolve_columns(&table.header, &dictionary, &table_key);
    if !resolution.is_complete() {
        let log_path = report::write_errors(&resolution.unresolved, &options.output_dir)?;
        return Err(SqlGenError::UnresolvedColumns {
            labels: resolution.unresolved,
            log_path,
        }
        .into());
    }
    info!(
        "Resolved {} column(s) for table '{}'",
        resolution.columns.len(),
        table_name
    );

    let columns = infer::apply_inference(&resolution.columns, &table, options.type_sampling);
    let document = SqlDocument::build(&table_name, &columns, options.display_name_en);

    let sql_path = options.output_dir.join(format!("{table_name}.sql"));
    fs::write(&sql_path, document.render())
        .with_context(|| format!("Writing SQL file {sql_path:?}"))?;
    info!("Generated SQL file {:?}", sql_path);
    Ok(sql_path)
}
