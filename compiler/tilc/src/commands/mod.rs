//! The `til` subcommands.
//!
//! Each command processes its inputs one at a time with a fresh analysis
//! session per top-level file, so a broken file cannot poison the caches of
//! the files that follow it. Commands return a process exit code; any
//! error anywhere in a run makes it nonzero, but processing always
//! continues across the remaining inputs.

mod check;
mod dump;
mod gen;

use std::io::{self, IsTerminal as _};
use std::path::{Path, PathBuf};
use std::{fs, process};

use thiserror::Error;
use til_diagnostic::{ColorMode, Diagnostics, TerminalEmitter};
use til_ir::SourceMap;

pub use check::check_files;
pub use dump::dump_files;
pub use gen::gen_files;

/// Options shared by the subcommands.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Where `gen` writes artifacts; defaults to each input's directory.
    pub out_dir: Option<PathBuf>,
    /// Treat an `auto:` expression as satisfying `complete`.
    pub auto_covers_complete: bool,
}

/// Driver-level failures, as opposed to diagnostics in the input.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not read the directory `{path}`: {source}")]
    ReadDir {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write `{path}`: {source}")]
    WriteFile {
        path: PathBuf,
        source: io::Error,
    },
}

pub(crate) fn report_driver_error(err: &DriverError) {
    eprintln!("error: {err}");
}

/// Render a run's diagnostics to stderr.
pub(crate) fn emit_diagnostics(diags: &Diagnostics, sources: &SourceMap) {
    let is_tty = io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::new(io::stderr(), ColorMode::Auto, is_tty);
    if emitter.emit_all(diags.iter(), sources).is_err() {
        // stderr is gone; nothing sensible left to do
        process::exit(1);
    }
}

/// Recursively collect every `.type` file under `dir`, sorted so runs are
/// deterministic regardless of directory iteration order.
pub fn collect_type_files(dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), DriverError> {
    let entries = fs::read_dir(dir).map_err(|source| DriverError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| DriverError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "type") {
            files.push(path);
        }
    }
    Ok(())
}

/// Artifact file name for an input path.
pub(crate) fn input_file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "out.type".to_string(), |n| n.to_string_lossy().into_owned())
}
