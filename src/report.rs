use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::warn;

pub const ERROR_LOG_FILE: &str = "errors.log";
pub const ERROR_LOG_HEADER: &str = "未定義カラム:";

/// Writes the unresolved labels, one per line under a fixed header line, to
/// `errors.log` in `output_dir` and returns the path written.
pub fn write_errors(unresolved: &[String], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(ERROR_LOG_FILE);
    let mut contents = String::from(ERROR_LOG_HEADER);
    contents.push('\n');
    contents.push_str(&unresolved.join("\n"));
    fs::write(&path, contents).with_context(|| format!("Writing diagnostic file {path:?}"))?;
    warn!(
        "{} column label(s) could not be resolved; see {:?}",
        unresolved.len(),
        path
    );
    Ok(path)
}
