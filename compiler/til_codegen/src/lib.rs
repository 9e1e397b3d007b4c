//! C artifact emission.
//!
//! Turns one processed file's registries into a declarations header and a
//! definitions source. Emission is purely a function of the registries,
//! declaration order in, declaration order out, so rerunning the generator
//! over unchanged inputs produces byte-identical artifacts.
//!
//! Units an analysis pass invalidated are skipped entirely: no declaration,
//! no table, no record, no function.

mod decl;
mod def;

#[cfg(test)]
mod tests;

use til_analysis::{FileData, MapInfo, MapOut, TypeInfo, TypeKind, TypeRef};

/// The generated artifacts for one `.type` file.
#[derive(Debug)]
pub struct Artifacts {
    pub header_name: String,
    pub source_name: String,
    pub declarations: String,
    pub definitions: String,
}

/// Emit both artifacts for a processed file.
///
/// `file_name` is the source file's name without directories, e.g.
/// `basic.type`; artifact names and the header guard derive from it.
pub fn generate(fd: &FileData, file_name: &str) -> Artifacts {
    tracing::debug!(file = file_name, "emitting artifacts");
    Artifacts {
        header_name: format!("{file_name}.h"),
        source_name: format!("{file_name}.cpp"),
        declarations: decl::emit(fd, file_name),
        definitions: def::emit(fd, file_name),
    }
}

/// Comment placed at the top of every artifact.
const BANNER: &str = "// generated by til; do not edit by hand\n";

fn valid_types(fd: &FileData) -> impl Iterator<Item = &TypeInfo> {
    fd.types.iter().filter(|t| t.is_valid())
}

/// Declared C name of a referenced type.
fn ref_name(fd: &FileData, r: TypeRef) -> String {
    fd.get_type(r).map_or_else(String::new, |t| t.name.clone())
}

/// Enumerant names of a map's In type, empty when the list never resolved.
fn in_enumerant_names(fd: &FileData, r: TypeRef) -> Vec<String> {
    match fd.get_type(r).map(|t| &t.kind) {
        Some(TypeKind::Enum {
            enumerants: Some(e),
            ..
        }) => e.iter().map(|en| en.name.clone()).collect(),
        _ => Vec::new(),
    }
}

/// `Out Name(In v)` for a typed map, `None` if typing never resolved.
fn map_signature(fd: &FileData, map: &MapInfo) -> Option<String> {
    let typed = map.typed?;
    let in_name = ref_name(fd, typed.input);
    Some(match typed.output {
        MapOut::Type(r) => format!("{} {}({in_name} v)", ref_name(fd, r), map.name),
        MapOut::TypeInfoPtr => format!("TypeInfo *{}({in_name} v)", map.name),
    })
}

/// Header guard identifier derived from the source file's stem.
fn guard_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".type").unwrap_or(file_name);
    let mut guard: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    guard.push_str("_H");
    guard
}
