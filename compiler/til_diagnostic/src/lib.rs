//! Diagnostic system for the TIL generator.
//!
//! Every pass reports problems as [`Diagnostic`] values pushed into an
//! explicit [`Diagnostics`] sink owned by the caller; nothing writes to a
//! global stream. A diagnostic is a (location, severity, message) triple
//! with a stable [`ErrorCode`], rendered by [`TerminalEmitter`] as
//! `path:line:col: severity[CODE]: message`.

mod code;
mod diagnostic;
mod emitter;
mod sink;

pub use code::ErrorCode;
pub use diagnostic::{Diagnostic, Loc, Severity};
pub use emitter::{ColorMode, TerminalEmitter};
pub use sink::Diagnostics;
