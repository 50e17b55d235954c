use std::io::Write;

use corvid_runtime::{Runtime, RuntimeError, Value};

use crate::args::CliArgs;

pub(crate) mod entries;
pub(crate) mod glob;
pub(crate) mod methods;
pub(crate) mod walk;

/// The single positional argument, or exit 2 naming what is missing.
pub(crate) fn single_arg<'a>(args: &'a CliArgs, what: &str) -> &'a str {
    if args.positional.len() != 1 {
        eprintln!("Missing <{what}>");
        std::process::exit(2);
    }
    args.positional[0].as_str()
}

pub(crate) fn fail(e: RuntimeError) -> ! {
    eprintln!("RuntimeError: {e}");
    std::process::exit(1);
}

/// Prints a list value one item per line, or as a JSON array.
pub(crate) fn print_names(rt: &Runtime, list: &Value, json_out: bool) {
    let names = rt.list_strings(list).unwrap_or_else(|e| fail(e));
    if json_out {
        println!("{}", serde_json::json!(names));
        return;
    }
    let mut out = std::io::stdout().lock();
    for name in &names {
        write_line(&mut out, format_args!("{name}"));
    }
}

pub(crate) fn write_line(out: &mut impl Write, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{line}") {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("stdout error: {e}");
        std::process::exit(2);
    }
}
