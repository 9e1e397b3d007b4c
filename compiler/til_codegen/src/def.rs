//! The definitions source: member and enumerant tables, the `TypeInfo`
//! record for every valid type, and one switch function per typed map.

use std::fmt::Write as _;

use til_analysis::{ArrayLen, FileData, MapInfo, MapOut, TypeKind};

use crate::{in_enumerant_names, map_signature, ref_name, valid_types, BANNER};

pub(crate) fn emit(fd: &FileData, file_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#include \"{file_name}.h\"");
    out.push_str(BANNER);
    out.push('\n');

    for ty in valid_types(fd) {
        match &ty.kind {
            TypeKind::Basic { .. } => {}
            TypeKind::Struct {
                members: Some(members),
            } if !members.is_empty() => {
                let _ = writeln!(
                    out,
                    "TypeInfoMember {}_members[{}] = {{",
                    ty.name,
                    members.len()
                );
                for member in members {
                    let array_index = match &member.array {
                        Some(ArrayLen::Count(i)) => i64::try_from(*i).unwrap_or(-1),
                        _ => -1,
                    };
                    let _ = writeln!(
                        out,
                        "    {{\"{0}\", {1}, {array_index}, &{2}_type_info}},",
                        member.name,
                        member.name.len(),
                        ref_name(fd, member.ty)
                    );
                }
                out.push_str("};\n\n");
            }
            TypeKind::Enum {
                enumerants: Some(enumerants),
                ..
            } if !enumerants.is_empty() => {
                let _ = writeln!(
                    out,
                    "TypeInfoEnumerant {}_members[{}] = {{",
                    ty.name,
                    enumerants.len()
                );
                for enumerant in enumerants {
                    let _ = writeln!(
                        out,
                        "    {{\"{0}\", {1}, {2}}},",
                        enumerant.name,
                        enumerant.name.len(),
                        enumerant.value
                    );
                }
                out.push_str("};\n\n");
            }
            _ => {}
        }
    }

    for ty in valid_types(fd) {
        let name = &ty.name;
        let name_len = name.len();
        let line = match &ty.kind {
            TypeKind::Basic { size, .. } => {
                let size = size.unwrap_or(0);
                format!("TypeInfo {name}_type_info = {{TypeKind_Basic, \"{name}\", {name_len}, {size}, 0, 0}};")
            }
            TypeKind::Struct { members } => {
                let members = members.as_deref().unwrap_or(&[]);
                let table = if members.is_empty() {
                    "0".to_string()
                } else {
                    format!("{name}_members")
                };
                format!(
                    "TypeInfo {name}_type_info = {{TypeKind_Struct, \"{name}\", {name_len}, {}, {table}, 0}};",
                    members.len()
                )
            }
            TypeKind::Enum {
                underlying,
                enumerants,
            } => {
                let enumerants = enumerants.as_deref().unwrap_or(&[]);
                let table = if enumerants.is_empty() {
                    "0".to_string()
                } else {
                    format!("{name}_members")
                };
                let under = underlying.map_or_else(
                    || "0".to_string(),
                    |r| format!("&{}_type_info", ref_name(fd, r)),
                );
                format!(
                    "TypeInfo {name}_type_info = {{TypeKind_Enum, \"{name}\", {name_len}, {}, {table}, {under}}};",
                    enumerants.len()
                )
            }
        };
        out.push_str(&line);
        out.push('\n');
    }

    for map in &fd.maps {
        if let Some(function) = map_function(fd, map) {
            out.push('\n');
            out.push_str(&function);
        }
    }
    out
}

/// One switch function.
///
/// Branch order is default, then the auto group, then the explicit cases,
/// so a reader scanning the output sees the fallbacks before the specifics.
fn map_function(fd: &FileData, map: &MapInfo) -> Option<String> {
    let typed = map.typed?;
    let signature = map_signature(fd, map)?;
    let is_ptr = typed.output == MapOut::TypeInfoPtr;
    let wrap = |expr: &str| {
        if is_ptr {
            format!("&{expr}_type_info")
        } else {
            expr.to_string()
        }
    };
    let result_decl = match typed.output {
        MapOut::Type(r) => format!("{} result;", ref_name(fd, r)),
        MapOut::TypeInfoPtr => "TypeInfo *result;".to_string(),
    };

    let enumerant_names = in_enumerant_names(fd, typed.input);
    let cases = map.cases.as_deref().unwrap_or(&[]);

    let mut out = String::new();
    let _ = writeln!(out, "{signature}");
    out.push_str("{\n");
    let _ = writeln!(out, "    {result_decl}");
    out.push_str("    switch (v)\n");
    out.push_str("    {\n");

    out.push_str("        default:\n");
    out.push_str("        {\n");
    match &map.default_expr {
        Some(expr) => {
            let _ = writeln!(out, "            result = {};", wrap(expr));
        }
        None if is_ptr => out.push_str("            result = 0;\n"),
        None => {}
    }
    out.push_str("        } break;\n");

    if let Some(auto) = &map.auto_expr {
        let uncovered: Vec<&String> = enumerant_names
            .iter()
            .enumerate()
            .filter(|(i, _)| !cases.iter().any(|c| c.enumerant == *i))
            .map(|(_, n)| n)
            .collect();
        if !uncovered.is_empty() {
            for name in uncovered {
                let _ = writeln!(out, "        case {name}:");
            }
            out.push_str("        {\n");
            let _ = writeln!(out, "            result = {};", wrap(auto));
            out.push_str("        } break;\n");
        }
    }

    for case in cases {
        let _ = writeln!(out, "        case {}:", enumerant_names[case.enumerant]);
        out.push_str("        {\n");
        let _ = writeln!(out, "            result = {};", wrap(&case.out));
        out.push_str("        } break;\n");
    }

    out.push_str("    }\n");
    out.push_str("    return result;\n");
    out.push_str("}\n");
    Some(out)
}
