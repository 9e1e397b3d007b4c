//! Source file registry.
//!
//! Owns the text of every file touched by a run and maps byte offsets back
//! to 1-based line/column pairs for diagnostic rendering.

use crate::Span;

/// Identifies one registered source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FileId(pub u32);

/// One registered source file.
#[derive(Debug)]
pub struct SourceFile {
    /// Display path (as the user wrote it, separators normalized).
    pub name: String,
    /// Full file contents.
    pub text: String,
    /// Byte offset of the start of each line, for offset -> line lookups.
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(name: String, text: String) -> Self {
        let mut line_starts = vec![0u32];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(idx + 1).unwrap_or(u32::MAX));
            }
        }
        SourceFile {
            name,
            text,
            line_starts,
        }
    }

    /// Convert a byte offset to a 1-based (line, column) pair.
    ///
    /// Offsets past the end of the file clamp to the last line.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let line = u32::try_from(line_idx).unwrap_or(u32::MAX) + 1;
        (line, offset - line_start + 1)
    }
}

/// Registry of all source files in one run.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap { files: Vec::new() }
    }

    /// Register a file and return its id.
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let id = FileId(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile::new(name.into(), text.into()));
        id
    }

    /// Look up a registered file.
    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize]
    }

    /// Display path of a file.
    pub fn name(&self, id: FileId) -> &str {
        &self.file(id).name
    }

    /// Text a span covers, for use in messages.
    pub fn snippet(&self, id: FileId, span: Span) -> &str {
        let text = &self.file(id).text;
        let start = span.start as usize;
        let end = (span.end as usize).min(text.len());
        text.get(start..end).unwrap_or("")
    }
}
