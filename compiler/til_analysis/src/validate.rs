//! Validation passes: duplicate members, duplicate cases, completeness.
//!
//! These run after every equip pass so they can reason over resolved
//! enumerant lists. They only read the registries.

use rustc_hash::FxHashSet;
use til_diagnostic::{Diagnostics, ErrorCode};
use til_ir::Span;

use crate::filedata::FileData;
use crate::types::{TypeKind, TypeRef};

/// Report struct members that reuse an earlier member's name.
///
/// This checks the raw declaration nodes, so members dropped by the equip
/// pass are still covered.
pub fn check_duplicate_members(fd: &FileData, diags: &mut Diagnostics) {
    for ty in &fd.types {
        if !matches!(ty.kind, TypeKind::Struct { .. }) {
            continue;
        }
        let ids = &fd.tree.node(ty.node).children;
        for j in 1..ids.len() {
            let current = fd.tree.node(ids[j]);
            if current.string.is_empty() {
                continue;
            }
            for k in 0..j {
                let prev = fd.tree.node(ids[k]);
                if current.string == prev.string {
                    diags.error(
                        ErrorCode::E1014,
                        fd.file,
                        current.span,
                        format!("`{}` is already defined", current.string),
                    );
                    diags.note(
                        ErrorCode::E1014,
                        fd.file,
                        prev.span,
                        format!("see previous definition of `{}`", current.string),
                    );
                    break;
                }
            }
        }
    }
}

fn enumerants_of(fd: &FileData, input: TypeRef) -> Option<Vec<(String, i64, Span)>> {
    match &fd.get_type(input)?.kind {
        TypeKind::Enum {
            enumerants: Some(e),
            ..
        } => Some(
            e.iter()
                .map(|en| (en.name.clone(), en.value, en.span))
                .collect(),
        ),
        _ => None,
    }
}

/// Report map cases that cover the same enumerant, or distinct enumerants
/// that share a value (the switch would not compile).
pub fn check_duplicate_cases(fd: &FileData, diags: &mut Diagnostics) {
    for map in &fd.maps {
        let (Some(typed), Some(cases)) = (map.typed, map.cases.as_ref()) else {
            continue;
        };
        let Some(enumerants) = enumerants_of(fd, typed.input) else {
            continue;
        };
        for j in 1..cases.len() {
            for k in 0..j {
                let (current, prev) = (&cases[j], &cases[k]);
                if current.enumerant == prev.enumerant {
                    let name = &enumerants[current.enumerant].0;
                    diags.error(
                        ErrorCode::E1015,
                        fd.file,
                        current.span,
                        format!("`{name}` is already defined"),
                    );
                    diags.note(
                        ErrorCode::E1015,
                        fd.file,
                        prev.span,
                        format!("see previous definition of `{name}`"),
                    );
                    break;
                }
                if enumerants[current.enumerant].1 == enumerants[prev.enumerant].1 {
                    let (name, value, _) = &enumerants[current.enumerant];
                    diags.error(
                        ErrorCode::E1015,
                        fd.file,
                        current.span,
                        format!("`{name}` has the value `{value}` which is already covered"),
                    );
                    diags.note(
                        ErrorCode::E1015,
                        fd.file,
                        prev.span,
                        format!("see the case for `{}`", enumerants[prev.enumerant].0),
                    );
                    break;
                }
            }
        }
    }
}

/// Warn when a map marked `complete` does not cover every enumerant of its
/// In type.
///
/// With `auto_covers_complete` set, an `auto:` expression counts as covering
/// everything and the map is skipped.
pub fn check_complete(fd: &FileData, auto_covers_complete: bool, diags: &mut Diagnostics) {
    for map in &fd.maps {
        if !map.is_complete {
            continue;
        }
        let Some(typed) = map.typed else {
            continue;
        };
        if auto_covers_complete && map.auto_expr.is_some() {
            continue;
        }
        let Some(enumerants) = enumerants_of(fd, typed.input) else {
            continue;
        };
        let covered: FxHashSet<usize> =
            map.cases.iter().flatten().map(|c| c.enumerant).collect();
        let missing: Vec<usize> = (0..enumerants.len())
            .filter(|i| !covered.contains(i))
            .collect();
        if missing.is_empty() {
            continue;
        }
        diags.warning(
            ErrorCode::W1101,
            fd.file,
            map.span,
            format!(
                "the map `{}` is marked `complete` but is missing a case (or more)",
                map.name
            ),
        );
        for idx in missing {
            let (name, _, span) = &enumerants[idx];
            diags.note(
                ErrorCode::W1101,
                typed.input.file,
                *span,
                format!("see the enumerant `{name}`"),
            );
        }
    }
}
