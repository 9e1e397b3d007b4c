//! Terminal emitter.
//!
//! Human-readable diagnostic output with optional ANSI color support,
//! rendered as `path:line:col: severity[CODE]: message`.

use std::io::{self, Write};

use til_ir::SourceMap;

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` decides `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter.
    pub fn new(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_severity(&mut self, severity: Severity) -> io::Result<()> {
        if self.colors {
            let color = match severity {
                Severity::Error => colors::ERROR,
                Severity::Warning => colors::WARNING,
                Severity::Note => colors::NOTE,
            };
            write!(self.writer, "{color}{severity}{}", colors::RESET)
        } else {
            write!(self.writer, "{severity}")
        }
    }

    /// Render one diagnostic.
    pub fn emit(&mut self, diag: &Diagnostic, sources: &SourceMap) -> io::Result<()> {
        let file = sources.file(diag.loc.file);
        let (line, col) = file.line_col(diag.loc.span.start);
        if self.colors {
            write!(
                self.writer,
                "{}{}:{line}:{col}:{} ",
                colors::BOLD,
                file.name,
                colors::RESET
            )?;
        } else {
            write!(self.writer, "{}:{line}:{col}: ", file.name)?;
        }
        self.write_severity(diag.severity)?;
        writeln!(self.writer, "[{}]: {}", diag.code, diag.message)
    }

    /// Render a batch of diagnostics in order.
    pub fn emit_all<'a>(
        &mut self,
        diags: impl IntoIterator<Item = &'a Diagnostic>,
        sources: &SourceMap,
    ) -> io::Result<()> {
        for diag in diags {
            self.emit(diag, sources)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, Loc};
    use pretty_assertions::assert_eq;
    use til_ir::Span;

    #[test]
    fn plain_rendering() {
        let mut sources = SourceMap::new();
        let file = sources.add("types/basic.type", "@type(basic) u32: four;\n");
        let diag = Diagnostic::error(
            ErrorCode::E1003,
            Loc::new(file, Span::new(18, 22)),
            "a basic type requires a plain integer size specifier",
        );

        let mut out = Vec::new();
        TerminalEmitter::new(&mut out, ColorMode::Never, false)
            .emit(&diag, &sources)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "types/basic.type:1:19: error[E1003]: a basic type requires a plain integer size specifier\n"
        );
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }
}
