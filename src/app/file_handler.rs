//! File system helpers for the application layer.
//!
//! Validates graph file paths before loading and opens the writer used for
//! the model listing. Uses the verbose logging macros from the parent `app`
//! module.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Error as IoError};
use std::path::{Path, PathBuf};

use super::error::AppError;
use super::verbose_eprintln;

/// Checks that `graph_file_path` exists, is a file, and is valid UTF-8, and
/// returns it as a `&str` for the loader.
///
/// # Errors
/// Returns `AppError::General` if the path is missing or not a file, and
/// `AppError::InvalidPath` if it is not valid UTF-8.
pub fn validate_graph_file<'p>(
    graph_file_path: &'p PathBuf,
    quiet_mode: bool,
) -> Result<&'p str, AppError> {
    if !graph_file_path.exists() {
        let error_msg = format!("File not found: {}", graph_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::General(error_msg));
    }
    if !graph_file_path.is_file() {
        let error_msg = format!("Path is not a file: {}", graph_file_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::General(error_msg));
    }

    graph_file_path
        .to_str()
        .ok_or_else(|| AppError::InvalidPath(graph_file_path.display().to_string()))
}

/// Opens the model listing file, truncating any previous run's content.
///
/// The returned `BufWriter` is flushed by the caller once the listing is
/// complete.
pub fn init_model_log_writer(file_path: &Path) -> Result<BufWriter<File>, IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    Ok(BufWriter::new(file))
}
