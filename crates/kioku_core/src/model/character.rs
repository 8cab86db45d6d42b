//! Character (kanji) domain model and curriculum categories.
//!
//! # Invariants
//! - `categories` is never empty once a node is finalized; resolution falls
//!   back to [`CategoryTag::Other`].
//! - `radical` is either the character's own id or the id of another node.
//! - After trimming, `parts` contains no id reachable through another
//!   listed part.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Stable arena id of a [`Character`] node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CharacterId(usize);

impl CharacterId {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl Display for CharacterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// Curriculum / official-use / proficiency classification of a character.
///
/// Fixed enumeration of 14 values; [`CategoryTag::ALL`] gives them in
/// display order, which is also the `Ord` order used by index sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTag {
    /// Jōyō (official-use) character.
    Official,
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
    /// Taught in junior high / secondary school.
    Secondary,
    /// JLPT proficiency levels, n1 (hardest) through n5.
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    /// No curriculum or proficiency information available.
    Other,
}

impl CategoryTag {
    pub const COUNT: usize = 14;

    pub const ALL: [CategoryTag; Self::COUNT] = [
        Self::Official,
        Self::Grade1,
        Self::Grade2,
        Self::Grade3,
        Self::Grade4,
        Self::Grade5,
        Self::Grade6,
        Self::Secondary,
        Self::Level1,
        Self::Level2,
        Self::Level3,
        Self::Level4,
        Self::Level5,
        Self::Other,
    ];

    /// Dense index into per-category tables.
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&tag| tag == self)
            .unwrap_or(Self::COUNT - 1)
    }

    /// Human-readable label, matching the upstream site's wording.
    pub fn label(self) -> &'static str {
        match self {
            Self::Official => "jōyō kanji",
            Self::Grade1 => "grade 1",
            Self::Grade2 => "grade 2",
            Self::Grade3 => "grade 3",
            Self::Grade4 => "grade 4",
            Self::Grade5 => "grade 5",
            Self::Grade6 => "grade 6",
            Self::Secondary => "junior high",
            Self::Level1 => "jlpt n1",
            Self::Level2 => "jlpt n2",
            Self::Level3 => "jlpt n3",
            Self::Level4 => "jlpt n4",
            Self::Level5 => "jlpt n5",
            Self::Other => "other",
        }
    }
}

impl Display for CategoryTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A logographic character with its decomposition graph edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub symbol: char,
    pub meanings: Vec<String>,
    pub categories: BTreeSet<CategoryTag>,
    /// Direct decomposition, an antichain under "is-sub-part-of" once the
    /// graph has trimmed redundant edges.
    pub parts: Vec<CharacterId>,
    /// Classification radical: one of `parts`, another node, or self.
    pub radical: CharacterId,
}

impl Character {
    /// Node inserted before its record is filled in, so cyclic
    /// decompositions terminate. The radical is patched to the node's own
    /// id immediately after insertion.
    pub(crate) fn placeholder(symbol: char) -> Self {
        Self {
            symbol,
            meanings: Vec::new(),
            categories: BTreeSet::new(),
            parts: Vec::new(),
            radical: CharacterId::new(0),
        }
    }

    /// Whether this character is its own classification radical.
    pub fn is_self_radical(&self, own_id: CharacterId) -> bool {
        self.radical == own_id
    }
}

/// Resolved character data handed in by the (out-of-scope) dictionary
/// boundary: scraper, cache or manual entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub meanings: Vec<String>,
    pub categories: BTreeSet<CategoryTag>,
    /// Candidate decomposition characters, in source order.
    pub decomposition: Vec<char>,
    /// Raw radical-name field; may mix the radical symbol with kana or
    /// ASCII annotations.
    pub radical_name: String,
}
