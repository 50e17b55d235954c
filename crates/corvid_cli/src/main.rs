#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("CORVID_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = match args::parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    init_tracing(args.verbose);
    debug!(cmd = %args.cmd, args = ?args.positional, json = args.json_out, "running command");

    match args.cmd.as_str() {
        "entries" => commands::entries::run(&args),
        "glob" => commands::glob::run(&args),
        "walk" => commands::walk::run(&args),
        "methods" => commands::methods::run(),
        _ => {
            eprintln!("Unknown command: {}", args.cmd);
            eprintln!("{}", args::usage());
            std::process::exit(2);
        }
    }
}
