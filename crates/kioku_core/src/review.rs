//! Slot-based spaced-repetition review sessions.
//!
//! # Responsibility
//! - Select a working set of words from the indices, run the draw/answer
//!   loop over it, and apply the slot policy once at the end.
//!
//! # Invariants
//! - Aborting a session leaves every index exactly as it was; only
//!   `finish_review` mutates slots.
//! - Queue entries are plain ids; a word deleted mid-session is recorded
//!   in the session invalidity set and silently dropped at draw time.
//! - The session is part of the serialized state, so it survives a
//!   suspend/restart cycle.

use crate::error::{LexiconError, LexiconResult};
use crate::lexicon::Lexicon;
use crate::model::character::CategoryTag;
use crate::model::word::{WordId, SLOT_COUNT};
use log::info;
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One source of word ids for session selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// A mastery slot, `0..SLOT_COUNT`.
    Slot(usize),
    /// A named list, reserved or user-defined.
    Named(String),
    /// The single-character example list of one category.
    Category(CategoryTag),
    /// Every word in the store.
    All,
}

/// One flashcard in flight: a word id and how often it was missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub word: WordId,
    pub wrong: u32,
}

/// Review session state, persisted inside the lexicon snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSession {
    /// Cards pending this pass.
    incorrect: Vec<Card>,
    /// Cards answered correctly, waiting for the slot policy.
    correct: Vec<Card>,
    /// Cards deferred after a wrong answer in the current pass.
    stash: Vec<Card>,
    /// Ids deleted or structurally edited while queued; checked at draw.
    invalid: BTreeSet<WordId>,
    /// The drawn card awaiting an answer.
    current: Option<Card>,
}

impl ReviewSession {
    fn seed(words: impl IntoIterator<Item = WordId>) -> Self {
        Self {
            incorrect: words
                .into_iter()
                .map(|word| Card { word, wrong: 0 })
                .collect(),
            ..Self::default()
        }
    }

    /// Every id the session currently holds, in any queue.
    fn drawn_ids(&self) -> BTreeSet<WordId> {
        self.incorrect
            .iter()
            .chain(self.correct.iter())
            .chain(self.stash.iter())
            .chain(self.current.iter())
            .map(|card| card.word)
            .collect()
    }

    pub(crate) fn invalidate(&mut self, word: WordId) {
        self.invalid.insert(word);
    }
}

impl Lexicon {
    /// Starts a session over a uniform sample (without replacement) of the
    /// union of the selected sets.
    pub fn start_review<R: Rng>(
        &mut self,
        selectors: &[Selector],
        count: usize,
        rng: &mut R,
    ) -> LexiconResult<usize> {
        if self.session.is_some() {
            return Err(LexiconError::SessionActive);
        }
        let pool = self.select_pool(selectors, &BTreeSet::new())?;
        let drawn = sample_pool(pool, count, rng)?;
        let size = drawn.len();
        self.session = Some(ReviewSession::seed(drawn));
        info!("event=review_started module=review status=ok cards={size}");
        Ok(size)
    }

    /// Adds a further sample to the running session, drawn from the union
    /// of the selected sets minus every id already in the session.
    pub fn extend_review<R: Rng>(
        &mut self,
        selectors: &[Selector],
        count: usize,
        rng: &mut R,
    ) -> LexiconResult<usize> {
        let already = self
            .session
            .as_ref()
            .ok_or(LexiconError::NoSession)?
            .drawn_ids();
        let pool = self.select_pool(selectors, &already)?;
        let drawn = sample_pool(pool, count, rng)?;
        let size = drawn.len();
        if let Some(session) = &mut self.session {
            session
                .incorrect
                .extend(drawn.into_iter().map(|word| Card { word, wrong: 0 }));
        }
        Ok(size)
    }

    /// Draws one card uniformly from the pending queue, refilling it from
    /// the stash when empty. Invalidated or vanished ids are discarded
    /// without being presented.
    ///
    /// Calling `draw_card` again before answering returns the same card.
    pub fn draw_card<R: Rng>(&mut self, rng: &mut R) -> LexiconResult<WordId> {
        let session = self.session.as_mut().ok_or(LexiconError::NoSession)?;
        if let Some(card) = session.current {
            return Ok(card.word);
        }
        loop {
            if session.incorrect.is_empty() {
                if session.stash.is_empty() {
                    return Err(LexiconError::SessionExhausted);
                }
                // New sub-round over the cards missed so far.
                std::mem::swap(&mut session.incorrect, &mut session.stash);
            }
            let pick = rng.gen_range(0..session.incorrect.len());
            let card = session.incorrect.swap_remove(pick);
            if session.invalid.remove(&card.word) {
                continue;
            }
            if !self.words.contains(card.word.raw()) {
                continue;
            }
            session.current = Some(card);
            return Ok(card.word);
        }
    }

    /// Records the answer for the drawn card: correct answers queue for
    /// the slot policy, wrong ones go back into the stash with their miss
    /// count bumped.
    pub fn answer(&mut self, correct: bool) -> LexiconResult<()> {
        let session = self.session.as_mut().ok_or(LexiconError::NoSession)?;
        let mut card = session.current.take().ok_or(LexiconError::NoCardDrawn)?;
        if correct {
            session.correct.push(card);
        } else {
            card.wrong += 1;
            session.stash.push(card);
        }
        Ok(())
    }

    /// Puts the answered cards back into rotation for another pass over
    /// the same deck.
    pub fn repeat_review(&mut self) -> LexiconResult<()> {
        let session = self.session.as_mut().ok_or(LexiconError::NoSession)?;
        if session.current.is_some() {
            return Err(LexiconError::NoCardDrawn);
        }
        std::mem::swap(&mut session.correct, &mut session.incorrect);
        Ok(())
    }

    /// Ends the session and applies the slot policy to every card that
    /// ended answered-correct: never missed advances one slot (capped),
    /// missed once stays, missed more than once resets to slot 0.
    pub fn finish_review(&mut self) -> LexiconResult<()> {
        let session = self.session.take().ok_or(LexiconError::NoSession)?;
        let mut promoted = 0usize;
        let mut reset = 0usize;
        for card in &session.correct {
            if session.invalid.contains(&card.word) {
                continue;
            }
            match card.wrong {
                1 => {}
                0 => {
                    if self.move_slot(card.word, |slot| (slot + 1).min(SLOT_COUNT - 1)) {
                        promoted += 1;
                    }
                }
                _ => {
                    if self.move_slot(card.word, |_| 0) {
                        reset += 1;
                    }
                }
            }
        }
        info!(
            "event=review_finished module=review status=ok answered={} promoted={promoted} reset={reset}",
            session.correct.len()
        );
        Ok(())
    }

    /// Drops the session without applying any slot update.
    pub fn abort_review(&mut self) -> LexiconResult<()> {
        if self.session.take().is_none() {
            return Err(LexiconError::NoSession);
        }
        info!("event=review_aborted module=review status=ok");
        Ok(())
    }

    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }

    // ---- internals ----------------------------------------------------

    fn select_pool(
        &self,
        selectors: &[Selector],
        exclude: &BTreeSet<WordId>,
    ) -> LexiconResult<BTreeSet<WordId>> {
        let mut pool = BTreeSet::new();
        for selector in selectors {
            match selector {
                Selector::Slot(slot) => {
                    let members = self.slots.get(*slot).ok_or_else(|| {
                        LexiconError::InvalidRecord(format!("slot {slot} out of range"))
                    })?;
                    pool.extend(members.iter().copied());
                }
                Selector::Named(name) => {
                    let id = self.list_by_name(name)?;
                    pool.extend(self.list(id)?.members.iter().copied());
                }
                Selector::Category(tag) => {
                    pool.extend(self.category_words[tag.index()].iter().copied());
                }
                Selector::All => pool.extend(self.word_ids()),
            }
        }
        for id in exclude {
            pool.remove(id);
        }
        Ok(pool)
    }

    /// Moves a live word between slot sets; returns whether it moved.
    fn move_slot(&mut self, id: WordId, next: impl Fn(usize) -> usize) -> bool {
        let Some(word) = self.words.get_mut(id.raw()) else {
            return false;
        };
        let from = word.slot;
        let to = next(from);
        if from == to {
            return false;
        }
        word.slot = to;
        self.slots[from].remove(&id);
        self.slots[to].insert(id);
        true
    }
}

fn sample_pool<R: Rng>(
    pool: BTreeSet<WordId>,
    count: usize,
    rng: &mut R,
) -> LexiconResult<Vec<WordId>> {
    if pool.is_empty() {
        return Err(LexiconError::InvalidRecord(
            "selection contains no words".into(),
        ));
    }
    if count == 0 {
        return Err(LexiconError::InvalidRecord(
            "cannot review zero cards".into(),
        ));
    }
    let count = count.min(pool.len());
    Ok(pool.into_iter().choose_multiple(rng, count))
}
