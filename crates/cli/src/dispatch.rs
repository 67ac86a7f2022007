//! Line -> engine -> reply dispatch
//!
//! Tokenizes one input line on whitespace runs, uppercases the verb,
//! routes to the engine, and formats the reply lines. `SET` and `MSET`
//! re-join the value tokens with single spaces, so values keep their
//! internal (single-space) whitespace.
//!
//! Errors come in three shapes: wrong arity is `ERR bad command`, a
//! non-numeric `EXPIRE` count is `ERR bad value`, an unrecognized verb
//! is `ERR unknown command`. Durability failures withhold the success
//! reply and answer `ERR storage error`, with the cause logged.

use brine_engine::{Database, TtlStatus};
use tracing::error;

/// Outcome of one dispatched line
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Reply lines to print, in order
    Lines(Vec<String>),
    /// The `EXIT` command: stop reading input
    Exit,
}

fn lines(items: Vec<String>) -> Option<Reply> {
    Some(Reply::Lines(items))
}

fn one(line: impl Into<String>) -> Option<Reply> {
    lines(vec![line.into()])
}

fn bad_command() -> Option<Reply> {
    one("ERR bad command")
}

fn flag(b: bool) -> String {
    if b { "1".to_string() } else { "0".to_string() }
}

fn or_nil(value: Option<String>) -> String {
    value.unwrap_or_else(|| "nil".to_string())
}

fn storage_error(e: brine_engine::Error) -> String {
    error!(error = %e, "command failed at the storage layer");
    "ERR storage error".to_string()
}

/// Process one input line; `None` means nothing to print (empty line)
pub fn dispatch(db: &Database, line: &str) -> Option<Reply> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let cmd = parts[0].to_uppercase();
    match cmd.as_str() {
        "EXIT" => {
            if parts.len() != 1 {
                return bad_command();
            }
            Some(Reply::Exit)
        }

        "GET" => {
            if parts.len() != 2 {
                return bad_command();
            }
            one(or_nil(db.get(parts[1])))
        }

        "SET" => {
            if parts.len() < 3 {
                return bad_command();
            }
            let value = parts[2..].join(" ");
            match db.set(parts[1], &value) {
                Ok(()) => one("OK"),
                Err(e) => one(storage_error(e)),
            }
        }

        "DEL" => {
            if parts.len() != 2 {
                return bad_command();
            }
            match db.delete(parts[1]) {
                Ok(deleted) => one(flag(deleted)),
                Err(e) => one(storage_error(e)),
            }
        }

        "EXISTS" => {
            if parts.len() != 2 {
                return bad_command();
            }
            one(flag(db.exists(parts[1])))
        }

        "MSET" => {
            if parts.len() < 3 || (parts.len() - 1) % 2 != 0 {
                return bad_command();
            }
            let pairs: Vec<(&str, &str)> = parts[1..]
                .chunks_exact(2)
                .map(|pair| (pair[0], pair[1]))
                .collect();
            match db.mset(&pairs) {
                Ok(()) => one("OK"),
                Err(e) => one(storage_error(e)),
            }
        }

        "MGET" => {
            if parts.len() < 2 {
                return bad_command();
            }
            lines(db.mget(&parts[1..]).into_iter().map(or_nil).collect())
        }

        "BEGIN" => {
            if parts.len() != 1 {
                return bad_command();
            }
            db.begin();
            one("OK")
        }

        "COMMIT" => {
            if parts.len() != 1 {
                return bad_command();
            }
            match db.commit() {
                Ok(()) => one("OK"),
                Err(e) => one(storage_error(e)),
            }
        }

        "ABORT" => {
            if parts.len() != 1 {
                return bad_command();
            }
            db.abort();
            one("OK")
        }

        "EXPIRE" => {
            if parts.len() != 3 {
                return bad_command();
            }
            let ms: i64 = match parts[2].parse() {
                Ok(ms) => ms,
                Err(_) => return one("ERR bad value"),
            };
            match db.expire(parts[1], ms) {
                Ok(armed) => one(flag(armed)),
                Err(e) => one(storage_error(e)),
            }
        }

        "TTL" => {
            if parts.len() != 2 {
                return bad_command();
            }
            one(match db.ttl(parts[1]) {
                TtlStatus::Remaining(ms) => ms.to_string(),
                TtlStatus::NoExpiry => "-1".to_string(),
                TtlStatus::Missing => "-2".to_string(),
            })
        }

        "PERSIST" => {
            if parts.len() != 2 {
                return bad_command();
            }
            match db.persist(parts[1]) {
                Ok(removed) => one(flag(removed)),
                Err(e) => one(storage_error(e)),
            }
        }

        "RANGE" => {
            if parts.len() != 3 {
                return bad_command();
            }
            let mut out = db.range(parts[1], parts[2]);
            out.push("END".to_string());
            lines(out)
        }

        _ => one("ERR unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_core::ManualClock;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn open_db(dir: &TempDir) -> Database {
        Database::open(dir.path().join("data.db")).unwrap()
    }

    fn run(db: &Database, line: &str) -> Vec<String> {
        match dispatch(db, line) {
            Some(Reply::Lines(lines)) => lines,
            other => panic!("expected reply lines for {:?}, got {:?}", line, other),
        }
    }

    fn run_one(db: &Database, line: &str) -> String {
        let mut lines = run(db, line);
        assert_eq!(lines.len(), 1, "expected one reply line for {:?}", line);
        lines.remove(0)
    }

    #[test]
    fn test_set_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        assert_eq!(run_one(&db, "SET name Alice"), "OK");
        assert_eq!(run_one(&db, "GET name"), "Alice");
        assert_eq!(run_one(&db, "GET missing"), "nil");
    }

    #[test]
    fn test_set_joins_value_tokens() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        assert_eq!(run_one(&db, "SET msg hello there   world"), "OK");
        assert_eq!(run_one(&db, "GET msg"), "hello there world");
    }

    #[test]
    fn test_verb_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        assert_eq!(run_one(&db, "set k v"), "OK");
        assert_eq!(run_one(&db, "get k"), "v");
    }

    #[test]
    fn test_del_and_exists() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        run_one(&db, "SET k v");
        assert_eq!(run_one(&db, "EXISTS k"), "1");
        assert_eq!(run_one(&db, "DEL k"), "1");
        assert_eq!(run_one(&db, "DEL k"), "0");
        assert_eq!(run_one(&db, "EXISTS k"), "0");
    }

    #[test]
    fn test_mset_and_mget() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        assert_eq!(run_one(&db, "MSET a 1 b 2"), "OK");
        assert_eq!(run(&db, "MGET a missing b"), vec!["1", "nil", "2"]);
    }

    #[test]
    fn test_mset_odd_pairs_rejected() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);
        assert_eq!(run_one(&db, "MSET a 1 b"), "ERR bad command");
        assert_eq!(run_one(&db, "MSET"), "ERR bad command");
    }

    #[test]
    fn test_arity_and_unknown_errors() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        assert_eq!(run_one(&db, "GET"), "ERR bad command");
        assert_eq!(run_one(&db, "GET a b"), "ERR bad command");
        assert_eq!(run_one(&db, "SET key"), "ERR bad command");
        assert_eq!(run_one(&db, "FLY me to-the-moon"), "ERR unknown command");
        assert_eq!(run_one(&db, "EXPIRE k soon"), "ERR bad value");
    }

    #[test]
    fn test_empty_line_is_ignored() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);
        assert_eq!(dispatch(&db, ""), None);
        assert_eq!(dispatch(&db, "   \t "), None);
    }

    #[test]
    fn test_exit() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);
        assert_eq!(dispatch(&db, "EXIT"), Some(Reply::Exit));
    }

    #[test]
    fn test_range_emits_keys_then_terminator() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        for cmd in ["SET a 1", "SET c 3", "SET b 2"] {
            run_one(&db, cmd);
        }
        assert_eq!(run(&db, "RANGE a c"), vec!["a", "b", "c", "END"]);
        assert_eq!(run(&db, "RANGE x z"), vec!["END"]);
    }

    #[test]
    fn test_ttl_replies() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(1_000));
        let db = Database::builder(dir.path().join("data.db"))
            .clock(clock.clone())
            .open()
            .unwrap();

        run_one(&db, "SET k v");
        assert_eq!(run_one(&db, "TTL k"), "-1");
        assert_eq!(run_one(&db, "EXPIRE k 500"), "1");
        assert_eq!(run_one(&db, "TTL k"), "500");

        clock.advance(600);
        assert_eq!(run_one(&db, "TTL k"), "-2");
        assert_eq!(run_one(&db, "GET k"), "nil");

        assert_eq!(run_one(&db, "EXPIRE ghost 500"), "0");
    }

    #[test]
    fn test_transaction_session() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        assert_eq!(run_one(&db, "BEGIN"), "OK");
        assert_eq!(run_one(&db, "SET x 10"), "OK");
        assert_eq!(run_one(&db, "GET x"), "10");
        assert_eq!(run_one(&db, "ABORT"), "OK");
        assert_eq!(run_one(&db, "GET x"), "nil");

        assert_eq!(run_one(&db, "BEGIN"), "OK");
        assert_eq!(run_one(&db, "SET x 10"), "OK");
        assert_eq!(run_one(&db, "COMMIT"), "OK");
        assert_eq!(run_one(&db, "GET x"), "10");
    }
}
