//! Equip passes for type declarations: basic sizes, struct members, enum
//! underlying types, and enum members.

use til_diagnostic::{Diagnostics, ErrorCode};
use til_ir::{parse_int, NodeId, Tag};

use crate::filedata::FileData;
use crate::types::{ArrayLen, Enumerant, Member, TypeKind};

/// Fill in the byte size (and C alias, if any) of every basic type.
pub fn equip_basic_sizes(fd: &mut FileData, diags: &mut Diagnostics) {
    for i in 0..fd.types.len() {
        if !matches!(fd.types[i].kind, TypeKind::Basic { .. }) {
            continue;
        }
        let node_id = fd.types[i].node;
        let type_span = fd.types[i].span;

        let size = match fd.tree.first_child(node_id) {
            Some(value) => match parse_int(&value.string) {
                Some(v) if v >= 0 => Some(v as u64),
                _ => {
                    diags.error(
                        ErrorCode::E1003,
                        fd.file,
                        value.span,
                        format!("`{}` is not a valid size for a basic type", value.string),
                    );
                    None
                }
            },
            None => {
                diags.error(
                    ErrorCode::E1003,
                    fd.file,
                    type_span,
                    "a basic type requires a plain integer size",
                );
                None
            }
        };

        // Everything after the kind argument is the C spelling, e.g.
        // `@type(basic, unsigned int)`.
        let alias = fd.tree.node(node_id).tag("type").and_then(|tag| {
            let words: Vec<&str> = tag
                .args
                .iter()
                .skip(1)
                .map(|&a| fd.tree.node(a).string.as_str())
                .collect();
            if words.is_empty() {
                None
            } else {
                Some(words.join(" "))
            }
        });

        if let TypeKind::Basic { size: s, alias: a } = &mut fd.types[i].kind {
            *s = size;
            *a = alias;
        }
    }
}

/// Resolve every struct's member list.
///
/// Any failed member invalidates the whole list; the pass still examines
/// the remaining members so all problems are reported in one run.
pub fn equip_struct_members(fd: &mut FileData, diags: &mut Diagnostics) {
    for i in 0..fd.types.len() {
        if !matches!(fd.types[i].kind, TypeKind::Struct { .. }) {
            continue;
        }
        let node_id = fd.types[i].node;
        let struct_name = fd.types[i].name.clone();
        let member_ids: Vec<_> = fd.tree.node(node_id).children.to_vec();

        let mut members = Vec::with_capacity(member_ids.len());
        let mut valid = true;
        for (index, &member_id) in member_ids.iter().enumerate() {
            let member = fd.tree.node(member_id);
            let member_name = member.string.clone();
            let member_span = member.span;
            let Some(&ty_id) = member.children.first() else {
                diags.error(
                    ErrorCode::E1005,
                    fd.file,
                    member_span,
                    format!("the member `{member_name}` of `{struct_name}` is missing a type"),
                );
                valid = false;
                continue;
            };
            let ty_node = fd.tree.node(ty_id);
            let Some(ty) = fd.resolve_type(&ty_node.string) else {
                diags.error(
                    ErrorCode::E1004,
                    fd.file,
                    ty_node.span,
                    format!("could not resolve the type name `{}`", ty_node.string),
                );
                valid = false;
                continue;
            };

            let mut array = None;
            if let Some(array_tag) = ty_node.tag("array") {
                match parse_array_len(fd, array_tag, &members, &member_ids, index, &struct_name, diags) {
                    Some(len) => array = Some(len),
                    None => valid = false,
                }
            }
            members.push(Member {
                name: member_name,
                span: member_span,
                ty,
                array,
            });
        }

        if let TypeKind::Struct { members: m } = &mut fd.types[i].kind {
            *m = valid.then_some(members);
        }
    }
}

/// An `@array` tag either names an earlier member that holds the count at
/// runtime, or gives one or more fixed positive dimensions.
fn parse_array_len(
    fd: &FileData,
    tag: &Tag,
    members: &[Member],
    member_ids: &[NodeId],
    index: usize,
    struct_name: &str,
    diags: &mut Diagnostics,
) -> Option<ArrayLen> {
    let Some(&first_id) = tag.args.first() else {
        diags.error(
            ErrorCode::E1006,
            fd.file,
            tag.span,
            "array tags must specify a parameter for their count",
        );
        return None;
    };
    let first = fd.tree.node(first_id);

    if let Some(pos) = members.iter().position(|m| m.name == first.string) {
        return Some(ArrayLen::Count(pos));
    }

    if parse_int(&first.string).is_some() {
        let mut dims = Vec::with_capacity(tag.args.len());
        for &arg_id in &tag.args {
            let arg = fd.tree.node(arg_id);
            match parse_int(&arg.string) {
                Some(v) if v > 0 => dims.push(v as u64),
                _ => {
                    diags.error(
                        ErrorCode::E1007,
                        fd.file,
                        arg.span,
                        format!("`{}` is not a valid fixed array length", arg.string),
                    );
                    return None;
                }
            }
        }
        return Some(ArrayLen::Fixed(dims));
    }

    // Only members declared before the array can hold its count. A member
    // declared earlier that failed to resolve is never in `members`, so the
    // raw declaration order decides which message applies.
    let named = member_ids
        .iter()
        .position(|&m| fd.tree.node(m).string == first.string);
    let message = match named {
        Some(pos) if pos >= index => format!("`{}` comes after this array", first.string),
        Some(_) => format!(
            "`{}` is declared earlier but is not a valid member",
            first.string
        ),
        None => format!("`{}` is not a member of `{struct_name}`", first.string),
    };
    diags.error(ErrorCode::E1007, fd.file, first.span, message);
    None
}

/// Resolve every enum's underlying basic type, when one is declared with
/// `@type(enum, u32)`.
pub fn equip_enum_underlying(fd: &mut FileData, diags: &mut Diagnostics) {
    for i in 0..fd.types.len() {
        if !matches!(fd.types[i].kind, TypeKind::Enum { .. }) {
            continue;
        }
        let node_id = fd.types[i].node;

        let resolved = {
            let Some(tag) = fd.tree.node(node_id).tag("type") else {
                continue;
            };
            let Some(&arg_id) = tag.args.get(1) else {
                continue;
            };
            let arg = fd.tree.node(arg_id);
            match fd.resolve_type(&arg.string) {
                None => {
                    diags.error(
                        ErrorCode::E1004,
                        fd.file,
                        arg.span,
                        format!("could not resolve the type name `{}`", arg.string),
                    );
                    None
                }
                Some(r) => {
                    let is_basic = fd
                        .get_type(r)
                        .is_some_and(|t| matches!(t.kind, TypeKind::Basic { .. }));
                    if is_basic {
                        Some(r)
                    } else {
                        diags.error(
                            ErrorCode::E1009,
                            fd.file,
                            arg.span,
                            format!("`{}` is not a basic type", arg.string),
                        );
                        None
                    }
                }
            }
        };

        if let Some(r) = resolved {
            if let TypeKind::Enum { underlying, .. } = &mut fd.types[i].kind {
                *underlying = Some(r);
            }
        }
    }
}

/// Fill in every enum's enumerant list.
///
/// Values without an explicit literal continue from the previous value plus
/// one, starting at zero. A non-integer literal invalidates the whole list
/// and does not advance the counter.
pub fn equip_enum_members(fd: &mut FileData, diags: &mut Diagnostics) {
    for i in 0..fd.types.len() {
        if !matches!(fd.types[i].kind, TypeKind::Enum { .. }) {
            continue;
        }
        let node_id = fd.types[i].node;
        let child_ids: Vec<_> = fd.tree.node(node_id).children.to_vec();

        let mut enumerants = Vec::with_capacity(child_ids.len());
        let mut next_value: i64 = 0;
        let mut valid = true;
        for &id in &child_ids {
            let node = fd.tree.node(id);
            let value = match fd.tree.first_child(id) {
                None => next_value,
                Some(value_node) => match parse_int(&value_node.string) {
                    Some(v) => v,
                    None => {
                        diags.error(
                            ErrorCode::E1008,
                            fd.file,
                            value_node.span,
                            format!(
                                "`{}` is not a plain integer enumerant value",
                                value_node.string
                            ),
                        );
                        valid = false;
                        continue;
                    }
                },
            };
            next_value = value + 1;
            enumerants.push(Enumerant {
                name: node.string.clone(),
                span: node.span,
                value,
            });
        }

        if let TypeKind::Enum { enumerants: e, .. } = &mut fd.types[i].kind {
            *e = valid.then_some(enumerants);
        }
    }
}
