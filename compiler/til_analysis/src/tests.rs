use std::path::Path;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use til_diagnostic::{Diagnostics, ErrorCode, Severity};

use crate::{ArrayLen, FileData, MapOut, Options, Session, TypeKind};

fn analyze(source: &str) -> (Rc<FileData>, Diagnostics) {
    analyze_with(source, Options::default())
}

fn analyze_with(source: &str, options: Options) -> (Rc<FileData>, Diagnostics) {
    let mut session = Session::new(options);
    let mut diags = Diagnostics::new();
    let fd = session.process_text(Path::new("test.type"), source.to_string(), &mut diags);
    (fd, diags)
}

fn codes(diags: &Diagnostics) -> Vec<ErrorCode> {
    diags.iter().map(|d| d.code).collect()
}

#[test]
fn basic_size_and_alias() {
    let (fd, diags) = analyze("@type(basic, unsigned int) u32: 4;");
    assert!(diags.is_empty(), "{:?}", codes(&diags));
    let TypeKind::Basic { size, alias } = &fd.types[0].kind else {
        panic!("expected a basic type");
    };
    assert_eq!(*size, Some(4));
    assert_eq!(alias.as_deref(), Some("unsigned int"));
}

#[test]
fn struct_members_resolve_with_array_back_reference() {
    let (fd, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @type(struct) Vec: { count: u32; items: @array(count) u32; }",
    );
    assert!(diags.is_empty(), "{:?}", codes(&diags));
    let TypeKind::Struct { members } = &fd.types[1].kind else {
        panic!("expected a struct type");
    };
    let members = members.as_ref().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].array, None);
    assert_eq!(members[1].array, Some(ArrayLen::Count(0)));
}

#[test]
fn forward_array_reference_invalidates_members() {
    let (fd, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @type(struct) Vec: { items: @array(count) u32; count: u32; }",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1007]);
    let TypeKind::Struct { members } = &fd.types[1].kind else {
        panic!("expected a struct type");
    };
    assert!(members.is_none());
}

#[test]
fn array_reference_to_unresolved_earlier_member() {
    let (fd, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @type(struct) Vec: { count: Missing; items: @array(count) u32; }",
    );
    // The unresolved `count` reports E1004; the array reference to it must
    // not be mistaken for a forward reference.
    assert_eq!(codes(&diags), [ErrorCode::E1004, ErrorCode::E1007]);
    let array_diag = diags
        .iter()
        .find(|d| d.code == ErrorCode::E1007)
        .unwrap();
    assert_eq!(
        array_diag.message,
        "`count` is declared earlier but is not a valid member"
    );
    let TypeKind::Struct { members } = &fd.types[1].kind else {
        panic!("expected a struct type");
    };
    assert!(members.is_none());
}

#[test]
fn fixed_array_dimensions() {
    let (fd, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @type(struct) Grid: { cells: @array(2, 3) u32; }",
    );
    assert!(diags.is_empty(), "{:?}", codes(&diags));
    let TypeKind::Struct { members } = &fd.types[1].kind else {
        panic!("expected a struct type");
    };
    let members = members.as_ref().unwrap();
    assert_eq!(members[0].array, Some(ArrayLen::Fixed(vec![2, 3])));
}

#[test]
fn enum_values_continue_from_explicit_literals() {
    let (fd, diags) = analyze("@type(enum) Color: { Red; Green: 5; Blue; }");
    assert!(diags.is_empty(), "{:?}", codes(&diags));
    let TypeKind::Enum { enumerants, .. } = &fd.types[0].kind else {
        panic!("expected an enum type");
    };
    let values: Vec<i64> = enumerants.as_ref().unwrap().iter().map(|e| e.value).collect();
    assert_eq!(values, [0, 5, 6]);
}

#[test]
fn enum_underlying_must_be_basic() {
    let (fd, diags) = analyze(
        "@type(struct) S: {}\n\
         @type(enum, S) E: { A; }",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1009]);
    let TypeKind::Enum {
        underlying,
        enumerants,
    } = &fd.types[1].kind
    else {
        panic!("expected an enum type");
    };
    assert!(underlying.is_none());
    // The enumerant list itself is still fine.
    assert!(enumerants.is_some());
}

#[test]
fn map_typing_and_tag_arguments() {
    let (fd, diags) = analyze(
        "@type(enum) Color: { Red; Green; }\n\
         @map(Color -> $Type, complete, default: Red) M: {\n\
             Red -> Red,\n\
             Green -> Green,\n\
         }",
    );
    assert!(diags.is_empty(), "{:?}", codes(&diags));
    let map = &fd.maps[0];
    let typed = map.typed.unwrap();
    assert_eq!(typed.output, MapOut::TypeInfoPtr);
    assert!(map.is_complete);
    assert_eq!(map.default_expr.as_deref(), Some("Red"));
    let cases = map.cases.as_ref().unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].enumerant, 0);
    assert_eq!(cases[1].enumerant, 1);
}

#[test]
fn map_in_type_must_be_an_enum() {
    let (_, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @map(u32 -> u32) M: {}",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1011]);
}

#[test]
fn unknown_case_name_invalidates_cases() {
    let (fd, diags) = analyze(
        "@type(enum) Color: { Red; }\n\
         @map(Color -> Color) M: { Purple -> Red, Red -> Red, }",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1013]);
    assert!(fd.maps[0].cases.is_none());
}

#[test]
fn duplicate_symbol_is_reported() {
    let (fd, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @type(basic) u32: 8;",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1002, ErrorCode::E1002]);
    assert_eq!(diags.error_count(), 1);
    // The newer declaration wins in the symbol table.
    let r = fd.resolve_type("u32").unwrap();
    assert_eq!(r.index, 1);
}

#[test]
fn duplicate_member_is_reported() {
    let (_, diags) = analyze(
        "@type(basic) u32: 4;\n\
         @type(struct) S: { a: u32; a: u32; }",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1014, ErrorCode::E1014]);
    assert_eq!(diags.error_count(), 1);
}

#[test]
fn duplicate_case_value_is_reported() {
    let (_, diags) = analyze(
        "@type(enum) E: { A; B: 0; }\n\
         @map(E -> E) M: { A -> A, B -> B, }",
    );
    assert_eq!(codes(&diags), [ErrorCode::E1015, ErrorCode::E1015]);
}

#[test]
fn incomplete_map_warns_per_missing_enumerant() {
    let (_, diags) = analyze(
        "@type(enum) Color: { Red; Green; Blue; }\n\
         @map(Color -> Color, complete) M: { Red -> Red, }",
    );
    assert_eq!(diags.error_count(), 0);
    let warnings = diags
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    let notes = diags
        .iter()
        .filter(|d| d.severity == Severity::Note)
        .count();
    assert_eq!(warnings, 1);
    assert_eq!(notes, 2);
}

#[test]
fn auto_expression_does_not_satisfy_complete_by_default() {
    let source = "@type(enum) Color: { Red; Green; }\n\
                  @map(Color -> Color, complete, auto: Red) M: {}";
    let (_, diags) = analyze(source);
    assert!(codes(&diags).contains(&ErrorCode::W1101));

    let (_, diags) = analyze_with(
        source,
        Options {
            auto_covers_complete: true,
        },
    );
    assert!(diags.is_empty(), "{:?}", codes(&diags));
}

#[test]
fn unrecognized_kind_is_rejected() {
    let (fd, diags) = analyze("@type(union) U: {}");
    assert_eq!(codes(&diags), [ErrorCode::E1001]);
    assert!(fd.types.is_empty());
}
