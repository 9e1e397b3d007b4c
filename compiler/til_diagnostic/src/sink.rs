//! Accumulating diagnostic sink.
//!
//! The sink is created by the driver, threaded through every pass as
//! `&mut Diagnostics`, and drained once at the end of a run. Diagnostics
//! never abort processing; passes report and continue.

use til_ir::{FileId, Span};

use crate::{Diagnostic, ErrorCode, Loc};

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    error_count: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Push a prebuilt diagnostic.
    pub fn push(&mut self, diag: Diagnostic) {
        if diag.is_error() {
            self.error_count += 1;
        }
        self.entries.push(diag);
    }

    /// Report an error.
    pub fn error(&mut self, code: ErrorCode, file: FileId, span: Span, message: impl Into<String>) {
        self.push(Diagnostic::error(code, Loc::new(file, span), message));
    }

    /// Report a warning.
    pub fn warning(
        &mut self,
        code: ErrorCode,
        file: FileId,
        span: Span,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::warning(code, Loc::new(file, span), message));
    }

    /// Attach a note to the most recent diagnostic.
    pub fn note(&mut self, code: ErrorCode, file: FileId, span: Span, message: impl Into<String>) {
        self.push(Diagnostic::note(code, Loc::new(file, span), message));
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Take all collected diagnostics, resetting the sink.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        std::mem::take(&mut self.entries)
    }
}
