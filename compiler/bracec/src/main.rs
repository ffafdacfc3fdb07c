//! Brace-balance checker CLI.

use std::io::IsTerminal;

use bracec::commands::{
    check_paths, dump_regions, explain_code, find_in_file, write_checks, CheckConfig,
    CommandError, FindConfig,
};

fn main() {
    bracec::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map_or("check", String::as_str);
    let rest = args.get(2..).unwrap_or_default();

    let result = match command {
        "check" => run_check(rest),
        "find" => FindConfig::from_args(rest).and_then(|config| {
            find_in_file(&config, std::io::stdout().is_terminal(), &mut std::io::stdout())
        }),
        "regions" => match rest {
            [path] => dump_regions(path, &mut std::io::stdout()),
            _ => Err(CommandError::Usage(
                "expected one path: brace regions <PATH>".to_owned(),
            )),
        },
        "explain" | "--explain" => match rest {
            [code] => explain_code(code, &mut std::io::stdout()),
            _ => Err(CommandError::Usage(
                "expected one code: brace explain <CODE>".to_owned(),
            )),
        },
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("brace {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        if matches!(e, CommandError::Usage(_)) {
            eprintln!("Run `brace help` for usage.");
        }
        std::process::exit(1);
    }
}

fn run_check(args: &[String]) -> Result<(), CommandError> {
    let config = CheckConfig::from_args(args)?;
    let is_tty = std::io::stdout().is_terminal();
    let checks = check_paths(&config, is_tty);
    let summary = write_checks(
        &checks,
        &config,
        is_tty,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    let code = summary.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn print_usage() {
    println!("Brace-balance checker");
    println!();
    println!("Usage: brace <command> [options]");
    println!();
    println!("Commands:");
    println!("  check [paths...]       Report brace depth per file (default: convex/game.ts)");
    println!("  find <path> <name>     Find where the body following <name> closes");
    println!("  regions <path>         Dump lexical region runs (debugging)");
    println!("  explain <code>         Explain a diagnostic code (e.g., B0001)");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Options:");
    println!("  --color=<mode>         auto (default), always or never");
    println!("  --no-parallel          check: scan files one at a time");
    println!();
    println!("Environment:");
    println!("  RUST_LOG               Enable tracing, e.g. RUST_LOG=brace_lexer_core=debug");
    println!("  BRACE_LOG_TREE         With RUST_LOG, print spans as a tree");
    println!();
    println!("Exit status is 0 when every file was read, even if braces are unbalanced.");
}
