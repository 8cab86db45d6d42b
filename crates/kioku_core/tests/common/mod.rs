//! Shared test fixtures: an in-memory dictionary source with call counters.

#![allow(dead_code)]

use kioku_core::{CategoryTag, CharacterRecord, DictionarySource, WordRecord};
use std::collections::BTreeMap;

/// Scripted dictionary boundary. Symbols and words not registered here
/// resolve as nonexistent, and every lookup is counted so tests can assert
/// on caching behavior.
#[derive(Debug, Default)]
pub struct FakeDictionary {
    characters: BTreeMap<char, CharacterRecord>,
    words: BTreeMap<char, WordRecord>,
    character_lookups: BTreeMap<char, usize>,
    word_lookups: BTreeMap<char, usize>,
}

impl FakeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn character(
        mut self,
        symbol: char,
        meanings: &[&str],
        categories: &[CategoryTag],
        decomposition: &[char],
        radical_name: &str,
    ) -> Self {
        self.characters.insert(
            symbol,
            CharacterRecord {
                meanings: meanings.iter().map(|m| m.to_string()).collect(),
                categories: categories.iter().copied().collect(),
                decomposition: decomposition.to_vec(),
                radical_name: radical_name.to_string(),
            },
        );
        self
    }

    pub fn single_word(mut self, symbol: char, record: WordRecord) -> Self {
        self.words.insert(symbol, record);
        self
    }

    pub fn character_lookups(&self, symbol: char) -> usize {
        self.character_lookups.get(&symbol).copied().unwrap_or(0)
    }

    pub fn word_lookups(&self, symbol: char) -> usize {
        self.word_lookups.get(&symbol).copied().unwrap_or(0)
    }
}

impl DictionarySource for FakeDictionary {
    fn character(&mut self, symbol: char) -> Option<CharacterRecord> {
        *self.character_lookups.entry(symbol).or_insert(0) += 1;
        self.characters.get(&symbol).cloned()
    }

    fn single_character_word(&mut self, symbol: char) -> Option<WordRecord> {
        *self.word_lookups.entry(symbol).or_insert(0) += 1;
        self.words.get(&symbol).cloned()
    }
}

/// Record for a word with one reading chunk per spelling character.
pub fn word_record(spelling: &str, chunks: &[&str], meanings: &[&str]) -> WordRecord {
    WordRecord {
        spelling: spelling.to_string(),
        reading_chunks: chunks.iter().map(|c| c.to_string()).collect(),
        meanings: meanings.iter().map(|m| m.to_string()).collect(),
        level: None,
    }
}

/// A dictionary preloaded with the characters of 日本人 plus 木.
pub fn japanese_dictionary() -> FakeDictionary {
    FakeDictionary::new()
        .character(
            '日',
            &["day", "sun"],
            &[CategoryTag::Official, CategoryTag::Grade1, CategoryTag::Level5],
            &[],
            "日 (ひ)",
        )
        .character(
            '本',
            &["book", "origin"],
            &[CategoryTag::Official, CategoryTag::Grade1, CategoryTag::Level5],
            &['木', '一'],
            "木 (き)",
        )
        .character(
            '人',
            &["person"],
            &[CategoryTag::Official, CategoryTag::Grade1, CategoryTag::Level5],
            &[],
            "人 (ひと)",
        )
        .character(
            '木',
            &["tree", "wood"],
            &[CategoryTag::Official, CategoryTag::Grade1, CategoryTag::Level5],
            &[],
            "木 (き)",
        )
        .character('一', &["one"], &[CategoryTag::Official, CategoryTag::Grade1], &[], "一 (いち)")
}
