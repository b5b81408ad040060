//! JSON result file.
//!
//! Results are written once, after all probing has finished, as a
//! tab-indented JSON array of `ScanResult` objects.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error_handling::ExportError;
use crate::models::ScanResult;

/// Resolves where results for `path` are written.
///
/// A path that does not exist yet and lacks a `.json` extension (any case)
/// gets `.json` appended. Existing files are overwritten as named.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }
    let has_json_ext = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if has_json_ext {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_owned();
        with_ext.push(".json");
        PathBuf::from(with_ext)
    }
}

/// Writes `results` to `path`, creating missing parent directories.
///
/// # Returns
///
/// The path actually written (see `resolve_output_path`).
///
/// # Errors
///
/// Returns `ExportError` if the directory cannot be created, the results cannot
/// be serialized, or the file cannot be written.
pub fn save_results(path: &Path, results: &[ScanResult]) -> Result<PathBuf, ExportError> {
    let output_path = resolve_output_path(path);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    results.serialize(&mut serializer)?;

    fs::write(&output_path, buf).map_err(|source| ExportError::Write {
        path: output_path.clone(),
        source,
    })?;

    log::info!(
        "Saved {} result{} to {}",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        output_path.display()
    );
    Ok(output_path)
}

/// Reads a results file written by `save_results`.
///
/// # Errors
///
/// Returns `ExportError` if the file cannot be read or is not a results array.
pub fn load_results(path: &Path) -> Result<Vec<ScanResult>, ExportError> {
    let contents = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}
