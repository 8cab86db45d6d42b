//! Interface the core needs from the external dictionary boundary.
//!
//! Network retrieval, HTML parsing and manual entry live outside this
//! crate; the core only ever sees fully resolved records through this
//! trait. Returning `None` means the source reports the symbol or word as
//! nonexistent; the core caches that verdict and never asks again.

use crate::model::character::CharacterRecord;
use crate::model::word::WordRecord;

/// Blocking resolution calls into the upstream dictionary.
///
/// The core performs no timeout or cancellation of its own; a source that
/// wants either must implement it behind this trait.
pub trait DictionarySource {
    /// Resolved data for one character, or `None` when it does not exist.
    fn character(&mut self, symbol: char) -> Option<CharacterRecord>;

    /// A word whose spelling contains exactly one non-phonetic character,
    /// used to backfill category example lists. `None` when the source has
    /// no such word.
    fn single_character_word(&mut self, symbol: char) -> Option<WordRecord>;
}
