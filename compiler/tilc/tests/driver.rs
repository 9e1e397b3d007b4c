//! End-to-end tests driving the command layer over real files.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use til_analysis::{Options, Session};
use til_diagnostic::{Diagnostics, ErrorCode};
use tilc::commands::{check_files, gen_files, RunOptions};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn gen_into(inputs: &[PathBuf], out_dir: &Path) -> i32 {
    let options = RunOptions {
        out_dir: Some(out_dir.to_path_buf()),
        auto_covers_complete: false,
    };
    gen_files(inputs, &options)
}

#[test]
fn gen_writes_both_artifacts() {
    let tmp = TempDir::new().unwrap();
    let input = write(
        tmp.path(),
        "basic.type",
        "@type(basic, unsigned int) u32: 4;\n",
    );
    let out = tmp.path().join("generated");

    assert_eq!(gen_into(&[input], &out), 0);

    let header = fs::read_to_string(out.join("basic.type.h")).unwrap();
    assert!(header.contains("#if !defined(BASIC_H)"));
    assert!(header.contains("typedef unsigned int u32;"));
    let source = fs::read_to_string(out.join("basic.type.cpp")).unwrap();
    assert!(source.contains("TypeInfo u32_type_info = {TypeKind_Basic, \"u32\", 3, 4, 0, 0};"));
}

#[test]
fn includes_resolve_across_files() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "shared.type", "@type(basic) u32: 4;\n");
    let main = write(
        tmp.path(),
        "main.type",
        "@include \"shared\"\n@type(struct) Vec: { count: u32; }\n",
    );
    let out = tmp.path().join("generated");

    assert_eq!(gen_into(&[main], &out), 0);

    let header = fs::read_to_string(out.join("main.type.h")).unwrap();
    assert!(header.contains("#include \"shared.type.h\""));
    assert!(header.contains("struct Vec"));
    // Only the requested input gets artifacts; the include does not.
    assert!(!out.join("shared.type.h").exists());
    assert!(!header.contains("extern TypeInfo u32_type_info;"));
}

#[test]
fn diamond_include_is_processed_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "d.type", "@type(basic) u32: 4;\n");
    write(
        tmp.path(),
        "b.type",
        "@include \"d\"\n@type(struct) B: { x: u32; }\n",
    );
    write(
        tmp.path(),
        "c.type",
        "@include \"d\"\n@type(struct) C: { y: u32; }\n",
    );
    let a = write(
        tmp.path(),
        "a.type",
        "@include \"b\"\n@include \"c\"\n@type(struct) A: { n: u32; }\n",
    );
    let out = tmp.path().join("generated");

    // The shared leaf must not produce duplicate-symbol errors.
    assert_eq!(gen_into(&[a], &out), 0);
}

#[test]
fn include_cycle_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.type", "@include \"b\"\n");
    write(tmp.path(), "b.type", "@include \"a\"\n");

    assert_eq!(check_files(&[a], &RunOptions::default()), 1);
}

#[test]
fn include_cycle_through_parent_dirs_is_detected() {
    let tmp = TempDir::new().unwrap();
    // The include spells the cycle through `..`, so the joined path never
    // matches the file's own spelling unless keys are normalized.
    let a = write(
        tmp.path(),
        "x/a.type",
        "@include \"../x/a\"\n@type(basic) u32: 4;\n",
    );

    let mut session = Session::new(Options::default());
    let mut diags = Diagnostics::new();
    session.process_path(&a, &mut diags).unwrap();

    let codes: Vec<ErrorCode> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E1016]);
}

#[test]
fn missing_include_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let main = write(tmp.path(), "main.type", "@include \"nope\"\n");

    assert_eq!(check_files(&[main], &RunOptions::default()), 1);
}

#[test]
fn check_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = write(tmp.path(), "basic.type", "@type(basic) u32: 4;\n");

    assert_eq!(check_files(&[input], &RunOptions::default()), 0);
    assert!(!tmp.path().join("basic.type.h").exists());
    assert!(!tmp.path().join("basic.type.cpp").exists());
}

#[test]
fn errors_still_produce_artifacts_without_invalid_units() {
    let tmp = TempDir::new().unwrap();
    let input = write(
        tmp.path(),
        "bad.type",
        "@type(basic) u32: 4;\n@type(struct) S: { x: Missing; }\n",
    );
    let out = tmp.path().join("generated");

    assert_eq!(gen_into(&[input], &out), 1);
    let header = fs::read_to_string(out.join("bad.type.h")).unwrap();
    assert!(header.contains("extern TypeInfo u32_type_info;"));
    assert!(!header.contains("struct S"));
}

#[test]
fn processing_continues_past_unreadable_inputs() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.type");
    let good = write(tmp.path(), "good.type", "@type(basic) u32: 4;\n");
    let out = tmp.path().join("generated");

    assert_eq!(gen_into(&[missing, good], &out), 1);
    assert!(out.join("good.type.h").exists());
}

#[test]
fn generation_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let input = write(
        tmp.path(),
        "all.type",
        "@type(basic) u32: 4;\n\
         @type(enum, u32) Color: { Red; Green: 5; Blue; }\n\
         @type(struct) Vec: { count: u32; items: @array(count) u32; }\n\
         @map(Color -> $Type, default: u32) TypeOf: { Red -> u32, }\n",
    );
    let out1 = tmp.path().join("one");
    let out2 = tmp.path().join("two");

    assert_eq!(gen_into(std::slice::from_ref(&input), &out1), 0);
    assert_eq!(gen_into(std::slice::from_ref(&input), &out2), 0);

    for name in ["all.type.h", "all.type.cpp"] {
        let first = fs::read_to_string(out1.join(name)).unwrap();
        let second = fs::read_to_string(out2.join(name)).unwrap();
        assert_eq!(first, second, "{name} differs between runs");
    }
}
