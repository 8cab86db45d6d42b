//! Knowledge-base use-case service.
//!
//! # Responsibility
//! - Provide the stable command surface over one in-memory lexicon.
//! - Delegate snapshot persistence to a repository implementation.
//!
//! # Invariants
//! - The service never bypasses index consistency maintenance; all
//!   mutation goes through `Lexicon` operations.
//! - Domain failures surface as `LexiconError`, storage failures as
//!   `RepoError`; neither aborts the process.

use crate::error::{LexiconError, LexiconResult};
use crate::lexicon::Lexicon;
use crate::model::character::{CategoryTag, CharacterId};
use crate::model::word::{ListId, WordId, WordRecord};
use crate::repo::snapshot_repo::{RepoResult, SnapshotRepository};
use crate::review::Selector;
use crate::source::DictionarySource;
use log::{info, warn};
use rand::Rng;

/// The front of a flashcard: spelling only, no reading or meanings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFront {
    pub word: WordId,
    pub spelling: String,
}

/// One character line of a word detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterView {
    pub symbol: char,
    pub meanings: Vec<String>,
    /// Whether this character is the classification radical in context.
    pub is_radical: bool,
}

/// The back of a flashcard: the full cross-referenced detail of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDetail {
    pub word: WordId,
    pub script_line: String,
    pub reading_line: Option<String>,
    pub meanings: Vec<String>,
    pub characters: Vec<CharacterView>,
    /// Decomposition of the character, for single-character words only.
    pub parts: Vec<CharacterView>,
    /// Categories of the character, for single-character words only.
    pub categories: Vec<CategoryTag>,
    pub lists: Vec<String>,
    pub slot: usize,
}

/// Use-case wrapper owning the lexicon state and its snapshot repo.
pub struct LexiconService<R: SnapshotRepository> {
    repo: R,
    lexicon: Lexicon,
}

impl<R: SnapshotRepository> LexiconService<R> {
    /// Loads the persisted state, starting fresh when none exists.
    pub fn open(repo: R) -> RepoResult<Self> {
        let lexicon = match repo.load_lexicon()? {
            Some(lexicon) => lexicon,
            None => {
                info!("event=state_load module=service status=ok mode=fresh");
                Lexicon::new()
            }
        };
        Ok(Self { repo, lexicon })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Persists the current state, review session included.
    pub fn save(&self) -> RepoResult<()> {
        self.repo.save_lexicon(&self.lexicon)
    }

    // ---- words and characters -----------------------------------------

    pub fn resolve_character<S: DictionarySource>(
        &mut self,
        symbol: char,
        source: &mut S,
    ) -> LexiconResult<CharacterId> {
        self.lexicon.resolve_character(symbol, source)
    }

    pub fn add_word<S: DictionarySource>(
        &mut self,
        record: &WordRecord,
        source: &mut S,
    ) -> LexiconResult<WordId> {
        self.lexicon.add_word(record, source)
    }

    pub fn remove_word(&mut self, id: WordId) -> LexiconResult<()> {
        self.lexicon.remove_word(id)
    }

    pub fn lookup_spelling(&self, spelling: &str) -> Option<WordId> {
        self.lexicon.lookup_spelling(spelling)
    }

    pub fn add_meaning(&mut self, id: WordId, meaning: impl Into<String>) -> LexiconResult<()> {
        self.lexicon.add_meaning(id, meaning)
    }

    pub fn change_meaning(
        &mut self,
        id: WordId,
        index: usize,
        meaning: impl Into<String>,
    ) -> LexiconResult<()> {
        self.lexicon.change_meaning(id, index, meaning)
    }

    pub fn remove_meaning(&mut self, id: WordId, index: usize) -> LexiconResult<()> {
        self.lexicon.remove_meaning(id, index)
    }

    // ---- lists ---------------------------------------------------------

    pub fn create_list(&mut self, name: impl Into<String>) -> LexiconResult<ListId> {
        self.lexicon.create_list(name)
    }

    pub fn rename_list(&mut self, id: ListId, new_name: impl Into<String>) -> LexiconResult<()> {
        self.lexicon.rename_list(id, new_name)
    }

    pub fn delete_list(&mut self, id: ListId) -> LexiconResult<()> {
        self.lexicon.delete_list(id)
    }

    pub fn set_auto_add(&mut self, id: ListId, auto_add: bool) -> LexiconResult<()> {
        self.lexicon.set_auto_add(id, auto_add)
    }

    pub fn add_word_to_list(&mut self, word: WordId, list: ListId) -> LexiconResult<()> {
        self.lexicon.add_word_to_list(word, list)
    }

    pub fn remove_word_from_list(&mut self, word: WordId, list: ListId) -> LexiconResult<()> {
        self.lexicon.remove_word_from_list(word, list)
    }

    /// `(tag, count)` for every category's single-character example list.
    pub fn list_categories(&self) -> Vec<(CategoryTag, usize)> {
        self.lexicon.category_counts()
    }

    /// `(name, member count, auto-add flag)` for every named list.
    pub fn list_named_lists(&self) -> Vec<(String, usize, bool)> {
        self.lexicon
            .lists()
            .map(|(_, list)| (list.name.clone(), list.members.len(), list.auto_add))
            .collect()
    }

    // ---- review ---------------------------------------------------------

    pub fn start_review<G: Rng>(
        &mut self,
        selectors: &[Selector],
        count: usize,
        rng: &mut G,
    ) -> LexiconResult<usize> {
        self.lexicon.start_review(selectors, count, rng)
    }

    pub fn extend_review<G: Rng>(
        &mut self,
        selectors: &[Selector],
        count: usize,
        rng: &mut G,
    ) -> LexiconResult<usize> {
        self.lexicon.extend_review(selectors, count, rng)
    }

    pub fn draw_card<G: Rng>(&mut self, rng: &mut G) -> LexiconResult<CardFront> {
        let id = self.lexicon.draw_card(rng)?;
        let word = self.lexicon.word(id)?;
        Ok(CardFront {
            word: id,
            spelling: word.spelling.clone(),
        })
    }

    /// The full back of the drawn card (or any word).
    pub fn word_detail(&self, id: WordId) -> LexiconResult<WordDetail> {
        let word = self.lexicon.word(id)?;
        let graph = self.lexicon.graph();

        let characters: Vec<CharacterView> = word
            .character_refs
            .iter()
            .filter_map(|&cref| {
                graph.get(cref).map(|c| CharacterView {
                    symbol: c.symbol,
                    meanings: c.meanings.clone(),
                    is_radical: c.is_self_radical(cref),
                })
            })
            .collect();

        let (parts, categories) = match word.character_refs.as_slice() {
            [only] => {
                let parts = graph
                    .get(*only)
                    .map(|c| {
                        c.parts
                            .iter()
                            .filter_map(|&pref| {
                                graph.get(pref).map(|p| CharacterView {
                                    symbol: p.symbol,
                                    meanings: p.meanings.clone(),
                                    is_radical: c.radical == pref,
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                let categories = graph
                    .get(*only)
                    .map(|c| c.categories.iter().copied().collect())
                    .unwrap_or_default();
                (parts, categories)
            }
            _ => (Vec::new(), Vec::new()),
        };

        let lists = word
            .list_membership
            .iter()
            .filter_map(|&lid| self.lexicon.list(lid).ok().map(|l| l.name.clone()))
            .collect();

        Ok(WordDetail {
            word: id,
            script_line: word.script_line.clone(),
            reading_line: word.reading().map(str::to_string),
            meanings: word.meanings.clone(),
            characters,
            parts,
            categories,
            lists,
            slot: word.slot,
        })
    }

    pub fn answer(&mut self, correct: bool) -> LexiconResult<()> {
        self.lexicon.answer(correct)
    }

    pub fn repeat_review(&mut self) -> LexiconResult<()> {
        self.lexicon.repeat_review()
    }

    pub fn finish_review(&mut self) -> LexiconResult<()> {
        self.lexicon.finish_review()
    }

    pub fn abort_review(&mut self) -> LexiconResult<()> {
        self.lexicon.abort_review()
    }

    // ---- bulk import/export --------------------------------------------

    /// Serializes the full state as one opaque blob.
    pub fn export_state(&self) -> LexiconResult<String> {
        self.lexicon
            .to_snapshot()
            .map_err(|err| LexiconError::InvalidRecord(err.to_string()))
    }

    /// Replaces the full state from a blob produced by `export_state`.
    pub fn import_state(&mut self, blob: &str) -> LexiconResult<()> {
        self.lexicon = Lexicon::from_snapshot(blob)
            .map_err(|err| LexiconError::InvalidRecord(err.to_string()))?;
        info!(
            "event=state_import module=service status=ok words={}",
            self.lexicon.word_count()
        );
        Ok(())
    }

    /// Boundary-shaped records for every word.
    pub fn export_records(&self) -> Vec<WordRecord> {
        self.lexicon.export_records()
    }

    /// Adds each record, skipping spellings that are already indexed.
    /// Returns the number of words actually added.
    pub fn import_records<S: DictionarySource>(
        &mut self,
        records: &[WordRecord],
        source: &mut S,
    ) -> usize {
        let mut added = 0;
        for record in records {
            if self.lexicon.lookup_spelling(&record.spelling).is_some() {
                continue;
            }
            match self.lexicon.add_word(record, source) {
                Ok(_) => added += 1,
                Err(err) => {
                    warn!(
                        "event=record_import module=service status=error spelling={} error={err}",
                        record.spelling
                    );
                }
            }
        }
        added
    }
}
