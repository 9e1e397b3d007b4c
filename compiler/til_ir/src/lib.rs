//! Shared data structures for the TIL type-metadata generator.
//!
//! Everything downstream of the parser works against the types in this
//! crate: byte [`Span`]s, the [`SourceMap`] that owns file contents, and the
//! generic declaration [`Tree`] of tagged nodes.

mod literal;
mod source;
mod span;
mod tree;

pub use literal::parse_int;
pub use source::{FileId, SourceFile, SourceMap};
pub use span::Span;
pub use tree::{Node, NodeId, Tag, Tree};
