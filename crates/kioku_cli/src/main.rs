//! Status probe over a kioku snapshot database.
//!
//! # Responsibility
//! - Verify `kioku_core` linkage and, given a database path, print a
//!   one-shot summary of the stored knowledge base.
//! - Keep output deterministic for quick local sanity checks.

use kioku_core::db::open_db;
use kioku_core::{default_log_level, init_logging, LexiconService, SqliteSnapshotRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    // File logging is opt-in for a one-shot probe; the directory must be
    // absolute per core policy.
    if let Ok(log_dir) = std::env::var("KIOKU_LOG_DIR") {
        if let Err(message) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    println!("kioku_core ping={}", kioku_core::ping());
    println!("kioku_core version={}", kioku_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        println!("usage: kioku_cli [SNAPSHOT_DB]");
        return ExitCode::SUCCESS;
    };
    match summarize(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(path: &str) -> Result<(), String> {
    let conn = open_db(path).map_err(|err| err.to_string())?;
    let service = LexiconService::open(SqliteSnapshotRepository::new(&conn))
        .map_err(|err| err.to_string())?;
    let lexicon = service.lexicon();

    println!("words={}", lexicon.word_count());
    for (slot, count) in lexicon.slot_counts().iter().enumerate() {
        println!("slot index={slot} words={count}");
    }
    for (name, size, auto_add) in service.list_named_lists() {
        println!("list name={name} words={size} auto_add={auto_add}");
    }
    for (tag, count) in service.list_categories() {
        if count > 0 {
            println!("category name={tag} examples={count}");
        }
    }
    println!("session_active={}", lexicon.session_active());
    Ok(())
}
