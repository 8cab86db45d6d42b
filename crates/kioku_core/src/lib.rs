//! Core domain logic for kioku, a kanji/word study knowledge base.
//! This crate is the single source of truth for index consistency and
//! review scheduling invariants.

pub mod db;
pub mod error;
pub mod graph;
pub mod lexicon;
pub mod logging;
pub mod model;
pub mod repo;
pub mod review;
pub mod ruby;
pub mod service;
pub mod source;
pub mod store;

pub use error::{LexiconError, LexiconResult};
pub use graph::CharacterGraph;
pub use lexicon::Lexicon;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{CategoryTag, Character, CharacterId, CharacterRecord};
pub use model::word::{ListId, Word, WordId, WordList, WordRecord, SLOT_COUNT};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
};
pub use review::{Card, ReviewSession, Selector};
pub use ruby::{align, is_phonetic, RubyLayout};
pub use service::lexicon_service::{CardFront, CharacterView, LexiconService, WordDetail};
pub use source::DictionarySource;
pub use store::SparseStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
