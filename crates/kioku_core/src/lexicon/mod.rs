//! The lexicon index: owner of every store and derived membership set.
//!
//! # Responsibility
//! - Wrap resolved records into words linked to character graph nodes.
//! - Keep symbol maps, named lists, category sets and slot sets consistent
//!   under every insert and delete.
//!
//! # Invariants
//! - Every word id present in any list/slot/category set is live in the
//!   word store.
//! - A word's `list_membership` is exactly the set of named lists whose
//!   member set contains its id.
//! - A word belongs to exactly one slot set at a time.
//! - `add_word` commits nothing when character resolution fails partway.

pub mod lists;

use crate::error::{LexiconError, LexiconResult};
use crate::graph::CharacterGraph;
use crate::model::character::{CategoryTag, CharacterId};
use crate::model::word::{ListId, Word, WordId, WordList, WordRecord, SLOT_COUNT};
use crate::review::ReviewSession;
use crate::ruby;
use crate::source::DictionarySource;
use crate::store::SparseStore;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Names of the reserved proficiency lists, in level order n1..n5.
const RESERVED_LIST_NAMES: [&str; 5] = ["jlpt n1", "jlpt n2", "jlpt n3", "jlpt n4", "jlpt n5"];

/// Full state of the knowledge base. Serializable as one opaque snapshot,
/// including any in-flight review session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub(crate) graph: CharacterGraph,
    pub(crate) words: SparseStore<Word>,
    pub(crate) word_by_spelling: BTreeMap<String, WordId>,
    pub(crate) lists: SparseStore<WordList>,
    pub(crate) list_by_name: BTreeMap<String, ListId>,
    /// Ids of the reserved proficiency lists, index = level - 1.
    pub(crate) reserved_lists: Vec<ListId>,
    /// Single-character example words per category, indexed by
    /// `CategoryTag::index()`.
    pub(crate) category_words: [BTreeSet<WordId>; CategoryTag::COUNT],
    /// Mastery slot partition of all word ids.
    pub(crate) slots: [BTreeSet<WordId>; SLOT_COUNT],
    /// Characters known to have no single-character example word, so the
    /// backfill never re-queries them.
    pub(crate) no_single_example: BTreeSet<CharacterId>,
    pub(crate) session: Option<ReviewSession>,
}

impl Lexicon {
    pub fn new() -> Self {
        let mut lists = SparseStore::new();
        let mut list_by_name = BTreeMap::new();
        let mut reserved_lists = Vec::with_capacity(RESERVED_LIST_NAMES.len());
        for name in RESERVED_LIST_NAMES {
            let id = ListId::new(lists.add(WordList::reserved(name)));
            list_by_name.insert(name.to_string(), id);
            reserved_lists.push(id);
        }
        Self {
            graph: CharacterGraph::new(),
            words: SparseStore::new(),
            word_by_spelling: BTreeMap::new(),
            lists,
            list_by_name,
            reserved_lists,
            category_words: Default::default(),
            slots: Default::default(),
            no_single_example: BTreeSet::new(),
            session: None,
        }
    }

    // ---- read surface -------------------------------------------------

    pub fn graph(&self) -> &CharacterGraph {
        &self.graph
    }

    pub fn word(&self, id: WordId) -> LexiconResult<&Word> {
        self.words
            .get(id.raw())
            .ok_or_else(|| LexiconError::NotFound(format!("word {id}")))
    }

    pub fn lookup_spelling(&self, spelling: &str) -> Option<WordId> {
        self.word_by_spelling.get(spelling).copied()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// All live word ids, in store order.
    pub fn word_ids(&self) -> impl Iterator<Item = WordId> + '_ {
        self.words.iter().map(|(raw, _)| WordId::new(raw))
    }

    /// Per-category counts of the single-character example lists.
    pub fn category_counts(&self) -> Vec<(CategoryTag, usize)> {
        CategoryTag::ALL
            .iter()
            .map(|&tag| (tag, self.category_words[tag.index()].len()))
            .collect()
    }

    /// Members of one mastery slot.
    pub fn slot_words(&self, slot: usize) -> LexiconResult<&BTreeSet<WordId>> {
        self.slots
            .get(slot)
            .ok_or_else(|| LexiconError::NotFound(format!("slot {slot}")))
    }

    /// Single-character example words of one category.
    pub fn category_words(&self, tag: CategoryTag) -> &BTreeSet<WordId> {
        &self.category_words[tag.index()]
    }

    pub fn slot_counts(&self) -> [usize; SLOT_COUNT] {
        let mut counts = [0usize; SLOT_COUNT];
        for (slot, members) in self.slots.iter().enumerate() {
            counts[slot] = members.len();
        }
        counts
    }

    /// Resolves one character into the graph; see [`CharacterGraph::resolve`].
    pub fn resolve_character<S: DictionarySource>(
        &mut self,
        symbol: char,
        source: &mut S,
    ) -> LexiconResult<CharacterId> {
        self.graph.resolve(symbol, source)
    }

    // ---- word registration --------------------------------------------

    /// Resolves, wraps and indexes one record. Fan-out: spelling map,
    /// slot 0, the reserved level list, auto-add lists, and the
    /// single-character category sets or the backfill heuristic.
    pub fn add_word<S: DictionarySource>(
        &mut self,
        record: &WordRecord,
        source: &mut S,
    ) -> LexiconResult<WordId> {
        record.validate()?;
        if self.word_by_spelling.contains_key(&record.spelling) {
            return Err(LexiconError::DuplicateName(record.spelling.clone()));
        }

        // Resolve every character before touching any index, so a failed
        // resolution leaves the word unregistered.
        let mut refs = Vec::new();
        for symbol in record.spelling.chars().filter(|&c| !ruby::is_phonetic(c)) {
            refs.push(self.graph.resolve(symbol, source)?);
        }

        let word = Word::new(
            record.spelling.clone(),
            record.trimmed_chunks(),
            record.trimmed_meanings(),
            refs.clone(),
        );
        let id = WordId::new(self.words.add(word));
        self.word_by_spelling.insert(record.spelling.clone(), id);
        self.slots[0].insert(id);

        if let Some(level) = record.level {
            if let Some(&list) = self.reserved_lists.get(usize::from(level) - 1) {
                self.link(id, list);
            }
        }
        let auto: Vec<ListId> = self
            .lists
            .iter()
            .filter(|(_, list)| list.auto_add)
            .map(|(raw, _)| ListId::new(raw))
            .collect();
        for list in auto {
            self.link(id, list);
        }

        match refs.as_slice() {
            [only] => {
                let categories = self.character_categories(*only);
                for tag in categories {
                    self.category_words[tag.index()].insert(id);
                }
            }
            [_, ..] => {
                for cref in refs.iter().copied() {
                    self.backfill_example(cref, source);
                }
            }
            [] => {}
        }

        info!(
            "event=word_added module=lexicon status=ok id={id} spelling={} refs={}",
            record.spelling,
            self.words.get(id.raw()).map_or(0, |w| w.character_refs.len())
        );
        Ok(id)
    }

    /// Removes a word and its membership from every index that referenced
    /// it. An in-flight review session is told lazily via its invalidity
    /// set; queued cards are dropped at draw time.
    pub fn remove_word(&mut self, id: WordId) -> LexiconResult<()> {
        let word = self
            .words
            .remove(id.raw())
            .ok_or_else(|| LexiconError::NotFound(format!("word {id}")))?;

        self.word_by_spelling.remove(&word.spelling);
        for list in &word.list_membership {
            if let Some(list) = self.lists.get_mut(list.raw()) {
                list.members.remove(&id);
            }
        }
        if let [only] = word.character_refs.as_slice() {
            for tag in self.character_categories(*only) {
                self.category_words[tag.index()].remove(&id);
            }
        }
        if let Some(slot) = self.slots.get_mut(word.slot) {
            slot.remove(&id);
        }
        if let Some(session) = &mut self.session {
            session.invalidate(id);
        }
        info!(
            "event=word_removed module=lexicon status=ok id={id} spelling={}",
            word.spelling
        );
        Ok(())
    }

    /// Ensures the character has a single-character example word in its
    /// least-populated category, fetching one from the source at most once.
    fn backfill_example<S: DictionarySource>(&mut self, cref: CharacterId, source: &mut S) {
        if self.no_single_example.contains(&cref) {
            return;
        }
        let Some(character) = self.graph.get(cref) else {
            return;
        };
        let symbol = character.symbol;
        // Least-populated category balances example coverage; strict `<`
        // keeps the first tag in set order on ties.
        let mut best: Option<(CategoryTag, usize)> = None;
        for &tag in &character.categories {
            let size = self.category_words[tag.index()].len();
            if best.map_or(true, |(_, smallest)| size < smallest) {
                best = Some((tag, size));
            }
        }
        let Some((tag, _)) = best else {
            return;
        };
        let covered = self.category_words[tag.index()].iter().any(|&wid| {
            self.words
                .get(wid.raw())
                .is_some_and(|w| w.character_refs.first() == Some(&cref))
        });
        if covered {
            return;
        }

        match source.single_character_word(symbol) {
            Some(record) => {
                let script_chars = record
                    .spelling
                    .chars()
                    .filter(|&c| !ruby::is_phonetic(c))
                    .count();
                if script_chars != 1 {
                    warn!("event=backfill module=lexicon status=error symbol={symbol} error_code=not_single_character");
                    self.no_single_example.insert(cref);
                    return;
                }
                if let Err(err) = self.add_word(&record, source) {
                    debug!("event=backfill module=lexicon status=error symbol={symbol} error={err}");
                    self.no_single_example.insert(cref);
                }
            }
            None => {
                debug!("event=backfill module=lexicon status=error symbol={symbol} error_code=no_example");
                self.no_single_example.insert(cref);
            }
        }
    }

    fn character_categories(&self, id: CharacterId) -> Vec<CategoryTag> {
        self.graph
            .get(id)
            .map(|c| c.categories.iter().copied().collect())
            .unwrap_or_default()
    }

    // ---- meanings -----------------------------------------------------

    pub fn add_meaning(&mut self, id: WordId, meaning: impl Into<String>) -> LexiconResult<()> {
        let meaning = meaning.into();
        if meaning.trim().is_empty() {
            return Err(LexiconError::InvalidRecord("meaning is empty".into()));
        }
        self.word_mut(id)?.meanings.push(meaning);
        Ok(())
    }

    pub fn change_meaning(
        &mut self,
        id: WordId,
        index: usize,
        meaning: impl Into<String>,
    ) -> LexiconResult<()> {
        let word = self.word_mut(id)?;
        let slot = word
            .meanings
            .get_mut(index)
            .ok_or_else(|| LexiconError::NotFound(format!("meaning {index} of word {id}")))?;
        *slot = meaning.into();
        Ok(())
    }

    pub fn remove_meaning(&mut self, id: WordId, index: usize) -> LexiconResult<()> {
        let word = self.word_mut(id)?;
        if index >= word.meanings.len() {
            return Err(LexiconError::NotFound(format!(
                "meaning {index} of word {id}"
            )));
        }
        if word.meanings.len() == 1 {
            return Err(LexiconError::InvalidRecord(
                "cannot delete the last meaning of a word".into(),
            ));
        }
        word.meanings.remove(index);
        Ok(())
    }

    // ---- snapshot -----------------------------------------------------

    /// Serializes the whole state, review session included, as one opaque
    /// blob. Only round-trip fidelity is guaranteed about the format.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_snapshot(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }

    /// Boundary-shaped records for every word, for bulk export.
    pub fn export_records(&self) -> Vec<WordRecord> {
        self.words
            .iter()
            .map(|(raw, word)| {
                let id = WordId::new(raw);
                let level = self
                    .reserved_lists
                    .iter()
                    .position(|list| {
                        word.list_membership.contains(list)
                            && self
                                .lists
                                .get(list.raw())
                                .is_some_and(|l| l.members.contains(&id))
                    })
                    .map(|idx| idx as u8 + 1);
                WordRecord {
                    spelling: word.spelling.clone(),
                    reading_chunks: word.reading_chunks.clone(),
                    meanings: word.meanings.clone(),
                    level,
                }
            })
            .collect()
    }

    // ---- internals ----------------------------------------------------

    pub(crate) fn word_mut(&mut self, id: WordId) -> LexiconResult<&mut Word> {
        self.words
            .get_mut(id.raw())
            .ok_or_else(|| LexiconError::NotFound(format!("word {id}")))
    }

    /// Adds `word` to `list` and mirrors the membership on the word.
    pub(crate) fn link(&mut self, word: WordId, list: ListId) {
        if let Some(entry) = self.lists.get_mut(list.raw()) {
            entry.members.insert(word);
        }
        if let Some(entry) = self.words.get_mut(word.raw()) {
            entry.list_membership.insert(list);
        }
    }

    /// Removes `word` from `list` on both sides of the membership.
    pub(crate) fn unlink(&mut self, word: WordId, list: ListId) {
        if let Some(entry) = self.lists.get_mut(list.raw()) {
            entry.members.remove(&word);
        }
        if let Some(entry) = self.words.get_mut(word.raw()) {
            entry.list_membership.remove(&list);
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}
