//! Ruby-text alignment: renders a word as two lines, reading above script.
//!
//! # Responsibility
//! - Classify codepoints as phonetic (kana/punctuation) or script.
//! - Align reading chunks over the script characters they annotate.
//!
//! # Invariants
//! - Each codepoint is assumed to occupy a fixed two-column cell, so one
//!   chunk codepoint reserves two spaces on the opposite line.
//! - A reading line that is all whitespace counts as absent.

const PUNCTUATION: (u32, u32) = (0x3000, 0x303F);
const HIRAGANA: (u32, u32) = (0x3040, 0x309F);
const KATAKANA: (u32, u32) = (0x30A0, 0x30FF);
const KATAKANA_PHONETIC: (u32, u32) = (0x31F0, 0x31FF);

const PHONETIC_RANGES: [(u32, u32); 4] = [PUNCTUATION, HIRAGANA, KATAKANA, KATAKANA_PHONETIC];

/// Whether a codepoint belongs to the phonetic script (kana or CJK
/// punctuation) rather than to a logographic character.
pub fn is_phonetic(ch: char) -> bool {
    let code = ch as u32;
    PHONETIC_RANGES
        .iter()
        .any(|&(lo, hi)| lo <= code && code <= hi)
}

/// Dual-line rendering of a spelling and its reading chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubyLayout {
    /// The spelling itself, padded so each script character sits under
    /// the start of its reading chunk.
    pub script_line: String,
    /// Reading chunks interleaved with two-space placeholders for
    /// phonetic characters.
    pub reading_line: String,
}

impl RubyLayout {
    /// The reading line, or `None` when it carries no visible content.
    pub fn reading(&self) -> Option<&str> {
        if self.reading_line.trim().is_empty() {
            None
        } else {
            Some(self.reading_line.as_str())
        }
    }
}

/// Aligns `chunks` over the non-phonetic characters of `spelling`.
///
/// Walks the spelling once, carrying a padding debt `diff`: a chunk longer
/// than its character pushes the following script characters right, and
/// characters without a chunk of their own consume one unit of that debt
/// each, letting a single long reading spread over several characters.
pub fn align(spelling: &str, chunks: &[String]) -> RubyLayout {
    let mut script = String::new();
    let mut reading = String::new();
    let mut diff = 0usize;
    let mut next_chunk = 0usize;

    for ch in spelling.chars() {
        if !is_phonetic(ch) {
            if let Some(chunk) = chunks.get(next_chunk) {
                for _ in 0..diff * 2 {
                    script.push(' ');
                }
                script.push(ch);
                reading.push_str(chunk);
                diff = chunk.chars().count().saturating_sub(1);
                next_chunk += 1;
            } else {
                script.push(ch);
                diff = diff.saturating_sub(1);
            }
        } else {
            for _ in 0..diff * 2 {
                script.push(' ');
            }
            diff = 0;
            script.push(ch);
            reading.push_str("  ");
        }
    }
    for _ in 0..diff * 2 {
        script.push(' ');
    }

    RubyLayout {
        script_line: script,
        reading_line: reading,
    }
}
