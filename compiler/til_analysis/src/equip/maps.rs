//! Equip passes for map declarations: typing, then explicit cases.

use til_diagnostic::{Diagnostics, ErrorCode};

use crate::filedata::FileData;
use crate::types::{MapCase, MapOut, TypeKind, TypedMap, TYPE_INFO_MARKER};

/// Resolve every map's `In -> Out` typing and pull out the `complete`,
/// `default:`, and `auto:` tag arguments.
pub fn equip_map_types(fd: &mut FileData, diags: &mut Diagnostics) {
    for i in 0..fd.maps.len() {
        let node_id = fd.maps[i].node;
        let (typed, is_complete, default_expr, auto_expr) = {
            let Some(tag) = fd.tree.node(node_id).tag("map") else {
                continue;
            };

            let is_complete = fd.tree.tag_arg_named(tag, "complete").is_some();
            let default_expr = named_arg_value(fd, tag, "default");
            let auto_expr = named_arg_value(fd, tag, "auto");
            let mut typed = None;

            // The first three tag args spell the typing: `In -> Out`.
            let in_node = tag.args.first().map(|&a| fd.tree.node(a));
            let arrow = tag.args.get(1).map(|&a| fd.tree.node(a));
            let out_node = tag.args.get(2).map(|&a| fd.tree.node(a));
            match (in_node, arrow, out_node) {
                (Some(inp), Some(arrow), Some(out)) if arrow.string == "->" => {
                    let input = match fd.resolve_type(&inp.string) {
                        None => {
                            diags.error(
                                ErrorCode::E1004,
                                fd.file,
                                inp.span,
                                format!("could not resolve the type name `{}`", inp.string),
                            );
                            None
                        }
                        Some(r) => {
                            let is_enum = fd
                                .get_type(r)
                                .is_some_and(|t| matches!(t.kind, TypeKind::Enum { .. }));
                            if is_enum {
                                Some(r)
                            } else {
                                diags.error(
                                    ErrorCode::E1011,
                                    fd.file,
                                    inp.span,
                                    "a map's In type must be an enum",
                                );
                                None
                            }
                        }
                    };
                    let output = if out.string == TYPE_INFO_MARKER {
                        Some(MapOut::TypeInfoPtr)
                    } else {
                        match fd.resolve_type(&out.string) {
                            Some(r) => Some(MapOut::Type(r)),
                            None => {
                                diags.error(
                                    ErrorCode::E1004,
                                    fd.file,
                                    out.span,
                                    format!("could not resolve the type name `{}`", out.string),
                                );
                                None
                            }
                        }
                    };
                    if let (Some(input), Some(output)) = (input, output) {
                        typed = Some(TypedMap { input, output });
                    }
                }
                _ => {
                    let span = in_node.map_or(tag.span, |n| n.span);
                    diags.error(
                        ErrorCode::E1010,
                        fd.file,
                        span,
                        "a map's type must be specified like `In -> Out`",
                    );
                }
            }
            (typed, is_complete, default_expr, auto_expr)
        };
        let map = &mut fd.maps[i];
        map.typed = typed;
        map.is_complete = is_complete;
        map.default_expr = default_expr;
        map.auto_expr = auto_expr;
    }
}

fn named_arg_value(fd: &FileData, tag: &til_ir::Tag, name: &str) -> Option<String> {
    fd.tree
        .tag_arg_named(tag, name)
        .and_then(|arg| arg.children.first().map(|&c| fd.tree.node(c).string.clone()))
}

/// Resolve every typed map's explicit cases.
///
/// A map body is a flat list of atoms read in `in -> out` triplets. A case
/// whose `in` side is not an enumerant of the In type invalidates the list
/// but scanning continues; a malformed triplet stops the scan.
pub fn equip_map_cases(fd: &mut FileData, diags: &mut Diagnostics) {
    for i in 0..fd.maps.len() {
        let Some(typed) = fd.maps[i].typed else {
            continue;
        };
        let node_id = fd.maps[i].node;

        let (enum_name, enumerant_names): (String, Vec<String>) = {
            let Some(in_ty) = fd.get_type(typed.input) else {
                continue;
            };
            let names = match &in_ty.kind {
                TypeKind::Enum {
                    enumerants: Some(e),
                    ..
                } => e.iter().map(|en| en.name.clone()).collect(),
                _ => Vec::new(),
            };
            (in_ty.name.clone(), names)
        };

        let ids: Vec<_> = fd.tree.node(node_id).children.to_vec();
        let mut cases = Vec::new();
        let mut valid = true;
        let mut idx = 0;
        while idx < ids.len() {
            let in_node = fd.tree.node(ids[idx]);
            let arrow = ids.get(idx + 1).map(|&a| fd.tree.node(a));
            let out_node = ids.get(idx + 2).map(|&a| fd.tree.node(a));
            let shape_ok = matches!((arrow, out_node), (Some(a), Some(_)) if a.string == "->");
            if !shape_ok {
                diags.error(
                    ErrorCode::E1012,
                    fd.file,
                    in_node.span,
                    "a map's case must be specified like `in -> out,`",
                );
                valid = false;
                break;
            }
            match enumerant_names.iter().position(|n| *n == in_node.string) {
                Some(pos) => {
                    // shape_ok guarantees the out node exists
                    if let Some(out) = out_node {
                        cases.push(MapCase {
                            enumerant: pos,
                            span: in_node.span,
                            out: out.string.clone(),
                        });
                    }
                }
                None => {
                    diags.error(
                        ErrorCode::E1013,
                        fd.file,
                        in_node.span,
                        format!(
                            "`{}` is not a value of the enum `{enum_name}`",
                            in_node.string
                        ),
                    );
                    valid = false;
                }
            }
            idx += 3;
        }

        fd.maps[i].cases = valid.then_some(cases);
    }
}
