//! `til gen`: process inputs and write their C artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use til_analysis::{Options, Session};
use til_diagnostic::Diagnostics;

use super::{
    emit_diagnostics, input_file_name, report_driver_error, DriverError, RunOptions,
};

/// Generate artifacts for each input. Returns the process exit code.
pub fn gen_files(inputs: &[PathBuf], options: &RunOptions) -> i32 {
    let mut failed = false;
    for path in inputs {
        let mut session = Session::new(Options {
            auto_covers_complete: options.auto_covers_complete,
        });
        let mut diags = Diagnostics::new();
        let fd = match session.process_path(path, &mut diags) {
            Ok(fd) => fd,
            Err(source) => {
                report_driver_error(&DriverError::ReadFile {
                    path: path.clone(),
                    source,
                });
                failed = true;
                continue;
            }
        };
        emit_diagnostics(&diags, &session.sources);
        if diags.has_errors() {
            failed = true;
        }

        // Artifacts are still produced from whatever equipped successfully;
        // invalid units are omitted from them.
        let artifacts = til_codegen::generate(&fd, &input_file_name(path));
        let out_dir = options.out_dir.clone().unwrap_or_else(|| {
            path.parent().map(Path::to_path_buf).unwrap_or_default()
        });
        for (name, contents) in [
            (&artifacts.header_name, &artifacts.declarations),
            (&artifacts.source_name, &artifacts.definitions),
        ] {
            if let Err(err) = write_artifact(&out_dir, name, contents) {
                report_driver_error(&err);
                failed = true;
            }
        }
    }
    i32::from(failed)
}

fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<(), DriverError> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|source| DriverError::WriteFile {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let path = dir.join(name);
    tracing::debug!(path = %path.display(), "writing artifact");
    fs::write(&path, contents).map_err(|source| DriverError::WriteFile { path, source })
}
