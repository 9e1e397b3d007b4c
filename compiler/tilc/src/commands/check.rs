//! `til check`: run the full analysis without writing anything.

use std::path::PathBuf;

use til_analysis::{Options, Session};
use til_diagnostic::Diagnostics;

use super::{emit_diagnostics, report_driver_error, DriverError, RunOptions};

/// Analyze each input. Returns the process exit code.
pub fn check_files(inputs: &[PathBuf], options: &RunOptions) -> i32 {
    let mut failed = false;
    for path in inputs {
        let mut session = Session::new(Options {
            auto_covers_complete: options.auto_covers_complete,
        });
        let mut diags = Diagnostics::new();
        match session.process_path(path, &mut diags) {
            Ok(_) => {
                emit_diagnostics(&diags, &session.sources);
                if diags.has_errors() {
                    failed = true;
                }
            }
            Err(source) => {
                report_driver_error(&DriverError::ReadFile {
                    path: path.clone(),
                    source,
                });
                failed = true;
            }
        }
    }
    i32::from(failed)
}
