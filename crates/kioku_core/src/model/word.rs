//! Word domain model, user word lists and resolved word records.
//!
//! # Invariants
//! - `character_refs` holds one id per non-phonetic character of the
//!   spelling, in left-to-right order.
//! - `slot` starts at 0 and is mutated only by the review slot policy.
//! - `list_membership` mirrors the member sets of the named lists exactly.

use crate::error::{LexiconError, LexiconResult};
use crate::model::character::CharacterId;
use crate::ruby::{self, RubyLayout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Number of mastery slots a word moves through.
pub const SLOT_COUNT: usize = 6;

/// Stable arena id of a [`Word`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WordId(usize);

impl WordId {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Stable arena id of a [`WordList`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListId(usize);

impl ListId {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl Display for ListId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// A spelling with its reading, meanings and cross-reference state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub spelling: String,
    /// One phonetic annotation per non-phonetic character of the spelling.
    pub reading_chunks: Vec<String>,
    pub meanings: Vec<String>,
    pub character_refs: Vec<CharacterId>,
    pub list_membership: BTreeSet<ListId>,
    /// Mastery slot, `0..SLOT_COUNT`.
    pub slot: usize,
    /// Spelling padded for the dual-line rendering.
    pub script_line: String,
    /// Reading chunks aligned over the script line.
    pub reading_line: String,
}

impl Word {
    /// Builds a word with its dual-line rendering; `character_refs` are
    /// attached by the index once resolution has succeeded for all of them.
    pub(crate) fn new(
        spelling: String,
        reading_chunks: Vec<String>,
        meanings: Vec<String>,
        character_refs: Vec<CharacterId>,
    ) -> Self {
        let RubyLayout {
            script_line,
            reading_line,
        } = ruby::align(&spelling, &reading_chunks);
        Self {
            spelling,
            reading_chunks,
            meanings,
            character_refs,
            list_membership: BTreeSet::new(),
            slot: 0,
            script_line,
            reading_line,
        }
    }

    /// The aligned reading line, or `None` when the word has no reading.
    pub fn reading(&self) -> Option<&str> {
        if self.reading_line.trim().is_empty() {
            None
        } else {
            Some(self.reading_line.as_str())
        }
    }
}

/// A named set of words. Reserved lists are created at state init and are
/// not user-removable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub name: String,
    pub members: BTreeSet<WordId>,
    /// Every newly added word joins this list automatically.
    pub auto_add: bool,
    pub reserved: bool,
}

impl WordList {
    pub(crate) fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
            auto_add: false,
            reserved: false,
        }
    }

    pub(crate) fn reserved(name: impl Into<String>) -> Self {
        Self {
            reserved: true,
            ..Self::named(name)
        }
    }
}

/// Resolved word data handed in by the (out-of-scope) dictionary boundary.
///
/// The same shape serves scraped results, manual entry and bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub spelling: String,
    pub reading_chunks: Vec<String>,
    pub meanings: Vec<String>,
    /// JLPT proficiency level in `1..=5`, when the source carries one.
    pub level: Option<u8>,
}

impl WordRecord {
    /// Required-field validation applied before any index mutation.
    pub fn validate(&self) -> LexiconResult<()> {
        if self.spelling.trim().is_empty() {
            return Err(LexiconError::InvalidRecord("spelling is empty".into()));
        }
        if !self.meanings.iter().any(|m| !m.trim().is_empty()) {
            return Err(LexiconError::InvalidRecord(format!(
                "word `{}` has no meanings",
                self.spelling
            )));
        }
        if let Some(level) = self.level {
            if !(1..=5).contains(&level) {
                return Err(LexiconError::InvalidRecord(format!(
                    "invalid jlpt level {level} for `{}`",
                    self.spelling
                )));
            }
        }
        Ok(())
    }

    /// Meanings with surrounding whitespace and empty entries dropped.
    pub(crate) fn trimmed_meanings(&self) -> Vec<String> {
        self.meanings
            .iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect()
    }

    /// Reading chunks with whitespace-only entries dropped.
    pub(crate) fn trimmed_chunks(&self) -> Vec<String> {
        self.reading_chunks
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    }
}
