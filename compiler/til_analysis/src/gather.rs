//! The gather pass: walk the file's top-level nodes and register `@type`
//! and `@map` declarations.
//!
//! Gathering only records names and kinds; every other detail is filled in
//! by the equip passes. A duplicate name anywhere in the include chain is an
//! error, and the new declaration replaces the old binding in this file's
//! table so later references see the most recent one.

use til_diagnostic::{Diagnostics, ErrorCode};

use crate::filedata::{FileData, Symbol};
use crate::types::{MapInfo, TypeInfo, TypeKind};

pub fn gather(fd: &mut FileData, diags: &mut Diagnostics) {
    let top_level: Vec<_> = fd.tree.node(fd.tree.root).children.to_vec();
    for id in top_level {
        let node = fd.tree.node(id);
        if node.has_tag("include") {
            continue;
        }
        if let Some(tag) = node.tag("type") {
            let name = node.string.clone();
            let span = node.span;
            let kind_str = tag
                .args
                .first()
                .map(|&a| fd.tree.node(a).string.clone())
                .unwrap_or_default();
            let kind_span = tag
                .args
                .first()
                .map_or(tag.span, |&a| fd.tree.node(a).span);

            let kind = match kind_str.as_str() {
                "basic" => TypeKind::Basic {
                    size: None,
                    alias: None,
                },
                "struct" => TypeKind::Struct { members: None },
                "enum" => TypeKind::Enum {
                    underlying: None,
                    enumerants: None,
                },
                _ => {
                    diags.error(
                        ErrorCode::E1001,
                        fd.file,
                        kind_span,
                        format!("unrecognized type kind `{kind_str}`"),
                    );
                    continue;
                }
            };

            check_duplicate(fd, &name, span, diags);
            let index = u32::try_from(fd.types.len()).unwrap_or(u32::MAX);
            fd.types.push(TypeInfo {
                name: name.clone(),
                node: id,
                span,
                kind,
            });
            fd.symbols.insert(name, Symbol::Type(index));
        } else if node.has_tag("map") {
            let name = node.string.clone();
            let span = node.span;

            check_duplicate(fd, &name, span, diags);
            let index = u32::try_from(fd.maps.len()).unwrap_or(u32::MAX);
            fd.maps.push(MapInfo::new(name.clone(), id, span));
            fd.symbols.insert(name, Symbol::Map(index));
        }
    }
    tracing::debug!(
        types = fd.types.len(),
        maps = fd.maps.len(),
        "gathered declarations"
    );
}

fn check_duplicate(fd: &FileData, name: &str, span: til_ir::Span, diags: &mut Diagnostics) {
    if let Some((prev_file, prev_span)) = fd.find_symbol(name) {
        diags.error(
            ErrorCode::E1002,
            fd.file,
            span,
            format!("the symbol name `{name}` is already used"),
        );
        diags.note(
            ErrorCode::E1002,
            prev_file,
            prev_span,
            format!("see previous definition of `{name}`"),
        );
    }
}
