//! Brine CLI: line-protocol front-end for the Brine store.
//!
//! Two modes:
//! - **Pipe mode**: `echo "SET k v" | brine` reads line-by-line from
//!   stdin until EOF or `EXIT`
//! - **REPL mode**: `brine` gives an interactive prompt (if stdin is a TTY)
//!
//! Replies go to stdout; logs go to stderr so the protocol channel
//! stays clean.

mod dispatch;
mod repl;

use brine_engine::Database;
use clap::{Arg, ArgAction, Command};
use std::io::IsTerminal;
use std::process;
use tracing::Level;

fn build_cli() -> Command {
    Command::new("brine")
        .about("Durable key-value store speaking a line protocol on stdin/stdout")
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .help("Path of the write-ahead log file (default: data.db)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log engine internals to stderr"),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let path = matches
        .get_one::<String>("db")
        .map(|s| s.as_str())
        .unwrap_or("data.db");
    let db = match Database::open(path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("failed to open database at {}: {}", path, e);
            process::exit(1);
        }
    };

    let exit_code = if std::io::stdin().is_terminal() {
        repl::run_repl(&db)
    } else {
        repl::run_pipe(&db)
    };
    process::exit(exit_code);
}
