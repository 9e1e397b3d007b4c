//! Core diagnostic types.

use std::fmt;

use til_ir::{FileId, Span};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A source location: file plus byte span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Loc {
    pub file: FileId,
    pub span: Span,
}

impl Loc {
    pub fn new(file: FileId, span: Span) -> Self {
        Loc { file, span }
    }
}

/// One reported problem.
///
/// Notes that elaborate on an error (e.g. "see previous definition") are
/// separate `Diagnostic` entries with [`Severity::Note`], immediately
/// following the entry they elaborate on.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be pushed into a sink, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub loc: Loc,
    pub message: String,
}

impl Diagnostic {
    fn new(code: ErrorCode, severity: Severity, loc: Loc, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            severity,
            loc,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode, loc: Loc, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, loc, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode, loc: Loc, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, loc, message)
    }

    /// Create a note elaborating on a preceding diagnostic.
    pub fn note(code: ErrorCode, loc: Loc, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Note, loc, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
