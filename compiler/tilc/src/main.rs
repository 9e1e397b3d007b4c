//! TIL generator CLI.
//!
//! Reads `.type` declaration files and generates C type-metadata headers
//! and sources.

use std::path::PathBuf;
use std::process;

use tilc::commands::{check_files, collect_type_files, dump_files, gen_files, RunOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "gen" => {
            let (inputs, options) = parse_inputs(&args[2..], "gen");
            process::exit(gen_files(&inputs, &options));
        }
        "check" => {
            let (inputs, options) = parse_inputs(&args[2..], "check");
            process::exit(check_files(&inputs, &options));
        }
        "dump" => {
            let (inputs, options) = parse_inputs(&args[2..], "dump");
            process::exit(dump_files(&inputs, &options));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("til {}", env!("CARGO_PKG_VERSION"));
        }
        command => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

/// Parse a subcommand's flags and input paths, exiting on misuse.
fn parse_inputs(args: &[String], command: &str) -> (Vec<PathBuf>, RunOptions) {
    let mut options = RunOptions::default();
    let mut inputs = Vec::new();
    let mut dir = None;

    // Both `--flag=value` and `--flag value` are accepted.
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if let Some(path) = arg.strip_prefix("--out-dir=") {
            options.out_dir = Some(PathBuf::from(path));
        } else if arg == "--out-dir" && i + 1 < args.len() {
            options.out_dir = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        } else if let Some(path) = arg.strip_prefix("--dir=") {
            dir = Some(PathBuf::from(path));
        } else if arg == "--dir" && i + 1 < args.len() {
            dir = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        } else if arg == "--auto-covers-complete" {
            options.auto_covers_complete = true;
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option '{arg}'");
            print_command_usage(command);
            process::exit(1);
        } else {
            inputs.push(PathBuf::from(arg));
        }
        i += 1;
    }

    if let Some(dir) = dir {
        match collect_type_files(&dir) {
            Ok(mut found) => inputs.append(&mut found),
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        }
    }
    if inputs.is_empty() {
        eprintln!("error: no input files");
        print_command_usage(command);
        process::exit(1);
    }
    (inputs, options)
}

fn print_command_usage(command: &str) {
    eprintln!("Usage: til {command} <file.type>... [options]");
    eprintln!();
    eprintln!("Options:");
    if command == "gen" {
        eprintln!("  --out-dir=<path>         Write artifacts to <path> (default: beside each input)");
    }
    eprintln!("  --dir=<path>             Also process every .type file under <path>");
    eprintln!("  --auto-covers-complete   An auto: expression satisfies complete");
}

fn print_usage() {
    println!("til type-metadata generator");
    println!();
    println!("Usage: til <command> [options]");
    println!();
    println!("Commands:");
    println!("  gen <file.type>...     Generate C headers and sources");
    println!("  check <file.type>...   Analyze without writing artifacts");
    println!("  dump <file.type>...    Print the analyzed declarations");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Options:");
    println!("  --out-dir=<path>         Where gen writes artifacts (default: beside each input)");
    println!("  --dir=<path>             Also process every .type file under <path>");
    println!("  --auto-covers-complete   An auto: expression satisfies complete");
    println!();
    println!("Examples:");
    println!("  til gen types/basic.type");
    println!("  til gen --dir=types --out-dir=generated");
    println!("  til check types/basic.type");
    println!();
    println!("Set TIL_LOG (e.g. TIL_LOG=debug) for internal tracing output.");
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("TIL_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
