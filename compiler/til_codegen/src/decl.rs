//! The declarations header: type declarations, map function prototypes, and
//! `extern TypeInfo` lines, wrapped in a header guard.

use std::fmt::Write as _;

use til_analysis::{ArrayLen, FileData, Member, TypeKind};

use crate::{guard_name, map_signature, ref_name, valid_types, BANNER};

pub(crate) fn emit(fd: &FileData, file_name: &str) -> String {
    let guard = guard_name(file_name);
    let mut out = String::new();
    let _ = writeln!(out, "#if !defined({guard})");
    let _ = writeln!(out, "#define {guard}");
    out.push_str(BANNER);
    out.push('\n');
    out.push_str("#include \"type_info.h\"\n");
    for path in &fd.include_paths {
        let _ = writeln!(out, "#include \"{path}.h\"");
    }
    out.push('\n');

    for ty in valid_types(fd) {
        match &ty.kind {
            TypeKind::Basic { alias, .. } => {
                if let Some(alias) = alias {
                    let _ = writeln!(out, "typedef {alias} {};\n", ty.name);
                }
            }
            TypeKind::Struct { members } => {
                let _ = writeln!(out, "struct {}", ty.name);
                out.push_str("{\n");
                for member in members.iter().flatten() {
                    out.push_str(&member_line(fd, member));
                }
                out.push_str("};\n\n");
            }
            TypeKind::Enum {
                underlying,
                enumerants,
            } => {
                // No declared underlying type falls back to plain int.
                let under = underlying.map_or_else(|| "int".to_string(), |r| ref_name(fd, r));
                let _ = writeln!(out, "enum {} : {under}", ty.name);
                out.push_str("{\n");
                for enumerant in enumerants.iter().flatten() {
                    let _ = writeln!(out, "    {} = {},", enumerant.name, enumerant.value);
                }
                out.push_str("};\n\n");
            }
        }
    }

    let mut wrote_map = false;
    for map in &fd.maps {
        if let Some(signature) = map_signature(fd, map) {
            let _ = writeln!(out, "{signature};");
            wrote_map = true;
        }
    }
    if wrote_map {
        out.push('\n');
    }

    for ty in valid_types(fd) {
        let _ = writeln!(out, "extern TypeInfo {}_type_info;", ty.name);
    }

    out.push('\n');
    let _ = writeln!(out, "#endif // {guard}");
    out
}

fn member_line(fd: &FileData, member: &Member) -> String {
    let ty = ref_name(fd, member.ty);
    match &member.array {
        // A counted array is carried as a pointer; the count lives in the
        // member the tag names.
        Some(ArrayLen::Count(_)) => format!("    {ty} *{};\n", member.name),
        Some(ArrayLen::Fixed(dims)) => {
            let dims: String = dims.iter().map(|d| format!("[{d}]")).collect();
            format!("    {ty} {}{dims};\n", member.name)
        }
        None => format!("    {ty} {};\n", member.name),
    }
}
