//! `til dump`: print what the analysis made of each input, for debugging
//! type files.

use std::path::PathBuf;

use til_analysis::{
    ArrayLen, FileData, MapOut, Options, Session, TypeKind, TypeRef,
};
use til_diagnostic::Diagnostics;

use super::{emit_diagnostics, report_driver_error, DriverError, RunOptions};

/// Dump the analysis of each input to stdout. Returns the process exit code.
pub fn dump_files(inputs: &[PathBuf], options: &RunOptions) -> i32 {
    let mut failed = false;
    for path in inputs {
        let mut session = Session::new(Options {
            auto_covers_complete: options.auto_covers_complete,
        });
        let mut diags = Diagnostics::new();
        match session.process_path(path, &mut diags) {
            Ok(fd) => {
                emit_diagnostics(&diags, &session.sources);
                if diags.has_errors() {
                    failed = true;
                }
                print_file(&fd);
            }
            Err(source) => {
                report_driver_error(&DriverError::ReadFile {
                    path: path.clone(),
                    source,
                });
                failed = true;
            }
        }
    }
    i32::from(failed)
}

fn name_of(fd: &FileData, r: TypeRef) -> String {
    fd.get_type(r).map_or_else(|| "?".to_string(), |t| t.name.clone())
}

fn print_file(fd: &FileData) {
    for path in &fd.include_paths {
        println!("include {path}");
    }
    for ty in &fd.types {
        match &ty.kind {
            TypeKind::Basic { size, alias } => {
                print!("basic {}", ty.name);
                if let Some(size) = size {
                    print!(" size={size}");
                }
                if let Some(alias) = alias {
                    print!(" alias=\"{alias}\"");
                }
                println!();
            }
            TypeKind::Struct { members } => match members {
                Some(members) => {
                    println!("struct {} members={}", ty.name, members.len());
                    for member in members {
                        print!("  {}: {}", member.name, name_of(fd, member.ty));
                        match &member.array {
                            Some(ArrayLen::Count(i)) => {
                                print!(" array(count={})", members[*i].name);
                            }
                            Some(ArrayLen::Fixed(dims)) => print!(" array{dims:?}"),
                            None => {}
                        }
                        println!();
                    }
                }
                None => println!("struct {} (invalid)", ty.name),
            },
            TypeKind::Enum {
                underlying,
                enumerants,
            } => {
                print!("enum {}", ty.name);
                if let Some(r) = underlying {
                    print!(" : {}", name_of(fd, *r));
                }
                match enumerants {
                    Some(enumerants) => {
                        println!();
                        for enumerant in enumerants {
                            println!("  {} = {}", enumerant.name, enumerant.value);
                        }
                    }
                    None => println!(" (invalid)"),
                }
            }
        }
    }
    for map in &fd.maps {
        match map.typed {
            Some(typed) => {
                let out = match typed.output {
                    MapOut::Type(r) => name_of(fd, r),
                    MapOut::TypeInfoPtr => "$Type".to_string(),
                };
                print!("map {}: {} -> {out}", map.name, name_of(fd, typed.input));
                if map.is_complete {
                    print!(" complete");
                }
                if let Some(cases) = &map.cases {
                    print!(" cases={}", cases.len());
                }
                println!();
            }
            None => println!("map {} (untyped)", map.name),
        }
    }
}
