//! Character decomposition graph: recursive resolution, redundancy
//! trimming and radical selection.
//!
//! # Responsibility
//! - Turn resolved character records into graph nodes exactly once per
//!   symbol, caching unresolvable symbols permanently.
//! - Keep each node's `parts` an antichain: no part reachable through
//!   another listed part survives trimming.
//!
//! # Invariants
//! - A node is inserted as a placeholder *before* its candidates are
//!   resolved, so self-referential and mutually-referential decompositions
//!   terminate.
//! - Trimming runs over the resolve worklist in LIFO order: children were
//!   pushed after their parent, so popping trims bottom-up. A single
//!   top-down pass would leak redundant parts.

use crate::error::{LexiconError, LexiconResult};
use crate::model::character::{CategoryTag, Character, CharacterId, CharacterRecord};
use crate::source::DictionarySource;
use crate::store::SparseStore;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters whose upstream decompositions reference each other. The
/// reverse edge is suppressed during resolution to break the loop.
const ENDLESS_RADICAL_PAIRS: [(char, char); 2] = [('口', '囗'), ('母', '毋')];

/// Codepoints below this are annotation noise (ASCII, kana) inside the
/// radical-name field, not radical candidates. Start of the CJK Radicals
/// Supplement block.
const IDEOGRAPH_FLOOR: u32 = 0x2E80;

fn is_endless_pair(a: char, b: char) -> bool {
    ENDLESS_RADICAL_PAIRS
        .iter()
        .any(|&(x, y)| (a == x && b == y) || (a == y && b == x))
}

/// Per-symbol resolution verdict, cached forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SymbolEntry {
    Known(CharacterId),
    Unresolvable,
}

/// Builder and owner of all [`Character`] nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterGraph {
    store: SparseStore<Character>,
    by_symbol: BTreeMap<char, SymbolEntry>,
}

impl CharacterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.store.get(id.raw())
    }

    /// Id of an already-resolved symbol, if any.
    pub fn lookup(&self, symbol: char) -> Option<CharacterId> {
        match self.by_symbol.get(&symbol) {
            Some(SymbolEntry::Known(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Resolves `symbol` into a finalized, trimmed graph node.
    ///
    /// Already-indexed symbols return their id without touching the
    /// source; symbols the source reported invalid keep failing with
    /// [`LexiconError::InvalidSymbol`] without a second lookup.
    pub fn resolve<S: DictionarySource>(
        &mut self,
        symbol: char,
        source: &mut S,
    ) -> LexiconResult<CharacterId> {
        let mut worklist = Vec::new();
        let resolved = self.resolve_inner(symbol, source, &mut worklist);
        // Trim whatever was inserted even when a later candidate failed;
        // those nodes are finalized and stay in the graph.
        self.trim_parts(&mut worklist);
        resolved
    }

    fn resolve_inner<S: DictionarySource>(
        &mut self,
        symbol: char,
        source: &mut S,
        worklist: &mut Vec<CharacterId>,
    ) -> LexiconResult<CharacterId> {
        match self.by_symbol.get(&symbol) {
            Some(SymbolEntry::Known(id)) => return Ok(*id),
            Some(SymbolEntry::Unresolvable) => return Err(LexiconError::InvalidSymbol(symbol)),
            None => {}
        }

        let Some(record) = source.character(symbol) else {
            debug!("event=character_resolve module=graph status=error symbol={symbol} error_code=invalid_symbol");
            self.by_symbol.insert(symbol, SymbolEntry::Unresolvable);
            return Err(LexiconError::InvalidSymbol(symbol));
        };

        // Insert-then-fill: the placeholder makes recursive candidates that
        // loop back onto `symbol` resolve to this id instead of recursing.
        let id = CharacterId::new(self.store.add(Character::placeholder(symbol)));
        if let Some(node) = self.store.get_mut(id.raw()) {
            node.radical = id;
        }
        self.by_symbol.insert(symbol, SymbolEntry::Known(id));
        worklist.push(id);

        let mut parts: Vec<CharacterId> = Vec::new();
        for candidate in record.decomposition.iter().copied() {
            if candidate == symbol || is_endless_pair(symbol, candidate) {
                continue;
            }
            match self.resolve_inner(candidate, source, worklist) {
                Ok(part) => {
                    if !parts.contains(&part) {
                        parts.push(part);
                    }
                }
                // Verdict is cached; skip the candidate and keep going.
                Err(LexiconError::InvalidSymbol(_)) => {}
                Err(other) => return Err(other),
            }
        }

        let radical = self.select_radical(symbol, id, &parts, &record, source, worklist);
        self.finalize(id, record, parts, radical);
        info!("event=character_resolved module=graph status=ok symbol={symbol} id={id}");
        Ok(id)
    }

    /// Picks the classification radical: the part named in the record's
    /// radical field, else the named radical resolved on its own, else the
    /// node itself.
    fn select_radical<S: DictionarySource>(
        &mut self,
        symbol: char,
        own: CharacterId,
        parts: &[CharacterId],
        record: &CharacterRecord,
        source: &mut S,
        worklist: &mut Vec<CharacterId>,
    ) -> CharacterId {
        let named: Vec<char> = record
            .radical_name
            .chars()
            .filter(|&ch| ch as u32 >= IDEOGRAPH_FLOOR && !crate::ruby::is_phonetic(ch))
            .collect();
        for &part in parts {
            if let Some(node) = self.get(part) {
                if named.contains(&node.symbol) {
                    return part;
                }
            }
        }
        for ch in named {
            if ch == symbol {
                return own;
            }
            if let Ok(id) = self.resolve_inner(ch, source, worklist) {
                return id;
            }
        }
        own
    }

    fn finalize(
        &mut self,
        id: CharacterId,
        record: CharacterRecord,
        parts: Vec<CharacterId>,
        radical: CharacterId,
    ) {
        if let Some(node) = self.store.get_mut(id.raw()) {
            node.meanings = record.meanings;
            node.categories = record.categories;
            if node.categories.is_empty() {
                node.categories.insert(CategoryTag::Other);
            }
            node.parts = parts;
            node.radical = radical;
        }
    }

    /// Bottom-up redundancy trimming over the resolve worklist.
    ///
    /// Popping yields children before parents; each pop drops any part
    /// that appears in a sibling part's direct `parts`. Repeated bottom-up
    /// this one-level check leaves every final `parts` set irredundant.
    fn trim_parts(&mut self, worklist: &mut Vec<CharacterId>) {
        while let Some(id) = worklist.pop() {
            let Some(node) = self.store.get(id.raw()) else {
                continue;
            };
            let parts = node.parts.clone();
            let kept: Vec<CharacterId> = parts
                .iter()
                .copied()
                .filter(|&part| {
                    !parts.iter().any(|&sibling| {
                        sibling != part
                            && self
                                .store
                                .get(sibling.raw())
                                .is_some_and(|s| s.parts.contains(&part))
                    })
                })
                .collect();
            if kept.len() != parts.len() {
                debug!(
                    "event=parts_trimmed module=graph status=ok id={id} before={} after={}",
                    parts.len(),
                    kept.len()
                );
            }
            if let Some(node) = self.store.get_mut(id.raw()) {
                node.parts = kept;
            }
        }
    }
}
