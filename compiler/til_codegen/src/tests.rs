use std::path::Path;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use til_analysis::{FileData, Options, Session};
use til_diagnostic::Diagnostics;

use crate::generate;

fn process(source: &str) -> Rc<FileData> {
    let mut session = Session::new(Options::default());
    let mut diags = Diagnostics::new();
    session.process_text(Path::new("test.type"), source.to_string(), &mut diags)
}

const FIXTURE: &str = "\
@type(basic, unsigned int) u32: 4;
@type(struct) Vec: { count: u32; items: @array(count) u32; }
@type(enum, u32) Color: { Red; Green: 5; Blue; }
@map(Color -> $Type, default: u32) TypeOf: { Red -> u32, }
@map(Color -> Color, auto: Red) Mirror: { Green -> Green, }
";

#[test]
fn header_guard_and_banner() {
    let fd = process(FIXTURE);
    let artifacts = generate(&fd, "test.type");
    assert_eq!(artifacts.header_name, "test.type.h");
    assert_eq!(artifacts.source_name, "test.type.cpp");
    assert!(artifacts.declarations.starts_with("#if !defined(TEST_H)\n#define TEST_H\n"));
    assert!(artifacts.declarations.ends_with("#endif // TEST_H\n"));
    assert!(artifacts.declarations.contains("#include \"type_info.h\""));
    assert!(artifacts.definitions.starts_with("#include \"test.type.h\"\n"));
}

#[test]
fn type_declarations() {
    let fd = process(FIXTURE);
    let decls = generate(&fd, "test.type").declarations;
    assert!(decls.contains("typedef unsigned int u32;"));
    assert!(decls.contains("struct Vec\n{\n    u32 count;\n    u32 *items;\n};"));
    assert!(decls.contains("enum Color : u32\n{\n    Red = 0,\n    Green = 5,\n    Blue = 6,\n};"));
    assert!(decls.contains("TypeInfo *TypeOf(Color v);"));
    assert!(decls.contains("Color Mirror(Color v);"));
    assert!(decls.contains("extern TypeInfo u32_type_info;"));
    assert!(decls.contains("extern TypeInfo Vec_type_info;"));
    assert!(decls.contains("extern TypeInfo Color_type_info;"));
}

#[test]
fn tables_and_records() {
    let fd = process(FIXTURE);
    let defs = generate(&fd, "test.type").definitions;
    assert!(defs.contains("TypeInfoMember Vec_members[2] = {"));
    assert!(defs.contains("    {\"count\", 5, -1, &u32_type_info},"));
    assert!(defs.contains("    {\"items\", 5, 0, &u32_type_info},"));
    assert!(defs.contains("TypeInfoEnumerant Color_members[3] = {"));
    assert!(defs.contains("    {\"Green\", 5, 5},"));
    assert!(defs.contains(
        "TypeInfo u32_type_info = {TypeKind_Basic, \"u32\", 3, 4, 0, 0};"
    ));
    assert!(defs.contains(
        "TypeInfo Vec_type_info = {TypeKind_Struct, \"Vec\", 3, 2, Vec_members, 0};"
    ));
    assert!(defs.contains(
        "TypeInfo Color_type_info = {TypeKind_Enum, \"Color\", 5, 3, Color_members, &u32_type_info};"
    ));
}

#[test]
fn pointer_typed_map_wraps_expressions() {
    let fd = process(FIXTURE);
    let defs = generate(&fd, "test.type").definitions;
    assert!(defs.contains("TypeInfo *TypeOf(Color v)"));
    // The default expression and explicit cases name types; the pointer-typed
    // map wraps them in type-info references.
    assert!(defs.contains("result = &u32_type_info;"));
    assert!(defs.contains("case Red:"));
}

#[test]
fn auto_group_covers_uncovered_enumerants() {
    let fd = process(FIXTURE);
    let defs = generate(&fd, "test.type").definitions;
    let mirror = defs.split("Color Mirror(Color v)").nth(1).unwrap();
    // Red and Blue have no explicit case, so they share the auto branch.
    assert!(mirror.contains("        case Red:\n        case Blue:\n        {\n            result = Red;\n"));
    assert!(mirror.contains("        case Green:\n        {\n            result = Green;\n"));
}

#[test]
fn invalid_types_are_skipped_everywhere() {
    let mut session = Session::new(Options::default());
    let mut diags = Diagnostics::new();
    let fd = session.process_text(
        Path::new("test.type"),
        "@type(basic) u32: 4;\n@type(struct) Bad: { x: Missing; }".to_string(),
        &mut diags,
    );
    assert!(diags.has_errors());
    let artifacts = generate(&fd, "test.type");
    assert!(!artifacts.declarations.contains("struct Bad"));
    assert!(!artifacts.declarations.contains("extern TypeInfo Bad_type_info;"));
    assert!(!artifacts.definitions.contains("Bad"));
    assert!(artifacts.declarations.contains("extern TypeInfo u32_type_info;"));
}

#[test]
fn fixed_arrays_render_dimensions() {
    let fd = process(
        "@type(basic) u32: 4;\n@type(struct) Grid: { cells: @array(2, 3) u32; }",
    );
    let decls = generate(&fd, "grid.type").declarations;
    assert!(decls.contains("    u32 cells[2][3];"));
}

#[test]
fn enum_without_underlying_defaults_to_int() {
    let fd = process("@type(enum) Flag: { Off; On; }");
    let decls = generate(&fd, "flag.type").declarations;
    assert!(decls.contains("enum Flag : int\n{\n    Off = 0,\n    On = 1,\n};"));
}

#[test]
fn emission_is_deterministic() {
    let fd = process(FIXTURE);
    let first = generate(&fd, "test.type");
    let second = generate(&fd, "test.type");
    assert_eq!(first.declarations, second.declarations);
    assert_eq!(first.definitions, second.definitions);
}
