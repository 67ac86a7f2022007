//! Input loops: interactive REPL and pipe mode
//!
//! Both modes share the dispatcher; the only difference is where lines
//! come from. Pipe mode reads stdin until EOF or `EXIT`. The REPL runs
//! when stdin is a terminal and adds history and a prompt. Replies go
//! to stdout, flushed after every command so a driving process never
//! waits on a buffer.

use crate::dispatch::{dispatch, Reply};
use brine_engine::Database;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, Write};

/// Print a reply and flush; returns false when the session should end
fn emit(reply: Option<Reply>) -> bool {
    match reply {
        None => true,
        Some(Reply::Exit) => false,
        Some(Reply::Lines(lines)) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for line in &lines {
                // a broken pipe means the consumer is gone; stop quietly
                if writeln!(out, "{}", line).is_err() {
                    return false;
                }
            }
            out.flush().is_ok()
        }
    }
}

/// Read commands from stdin until EOF or `EXIT`
pub fn run_pipe(db: &Database) -> i32 {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("stdin error: {}", e);
                return 1;
            }
        };
        if !emit(dispatch(db, &line)) {
            break;
        }
    }
    0
}

/// Interactive prompt with history, for terminal sessions
pub fn run_repl(db: &Database) -> i32 {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("failed to start line editor: {}", e);
            return 1;
        }
    };

    loop {
        match editor.readline("brine> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if !emit(dispatch(db, &line)) {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("input error: {}", e);
                return 1;
            }
        }
    }
}
