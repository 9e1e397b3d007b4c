//! Semantic analysis for the TIL type-metadata generator.
//!
//! The pipeline is a strictly ordered batch of passes over one file's
//! registries:
//!
//! 1. parse (in `til_parse`) and recursively process includes
//! 2. gather top-level `@type` / `@map` declarations into registries and
//!    the symbol table
//! 3. equip passes, one concern each: basic sizes, struct members, enum
//!    underlying types, enum members, map typing, map cases
//! 4. validation passes: duplicate members, duplicate cases, completeness
//!
//! Every pass reports into an explicit [`til_diagnostic::Diagnostics`] sink
//! and keeps going; a failure invalidates only the unit (or, for member /
//! enumerant / case lists, the whole list) it was examining. Emission later
//! skips invalid units.

mod equip;
mod filedata;
mod gather;
mod session;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use filedata::{FileData, Symbol};
pub use session::{Options, Session};
pub use types::{
    ArrayLen, Enumerant, MapCase, MapInfo, MapOut, Member, TypeInfo, TypeKind, TypeRef, TypedMap,
    TYPE_INFO_MARKER,
};
