//! Parser for `.type` declaration files.
//!
//! Turns source text into the generic tree of tagged nodes consumed by the
//! analyzer. Parse errors go through the same diagnostic sink as semantic
//! errors; the parser recovers and keeps going so one malformed declaration
//! does not hide the rest of the file.

mod cursor;
mod grammar;
mod token;


use til_diagnostic::Diagnostics;
use til_ir::{FileId, Tree};

/// Parse one file's source text into a declaration tree.
///
/// Always returns a tree; on parse errors the tree holds whatever
/// declarations were recognizable, and the errors are in `diags`.
pub fn parse(file: FileId, source: &str, diags: &mut Diagnostics) -> Tree {
    grammar::Parser::new(file, source, diags).parse_file()
}
