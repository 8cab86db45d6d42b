//! Core error taxonomy shared by graph, index and review operations.
//!
//! # Responsibility
//! - Give every recoverable core failure a typed, matchable shape.
//! - Keep failure semantics independent from any transport or UI layer.
//!
//! # Invariants
//! - Core operations never abort the process on a recoverable condition.
//! - Operations that fail midway commit no index mutation.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LexiconResult<T> = Result<T, LexiconError>;

/// Typed failure surface of the knowledge base core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// Lookup by id, symbol, spelling or list name found nothing.
    NotFound(String),
    /// A record failed required-field validation.
    InvalidRecord(String),
    /// External resolution reports the character does not exist.
    InvalidSymbol(char),
    /// A draw was attempted with no cards remaining in either queue.
    SessionExhausted,
    /// List create/rename or word registration hit an existing name.
    DuplicateName(String),
    /// The operation targeted a reserved (system) word list.
    ReservedList(String),
    /// A review session is already in flight.
    SessionActive,
    /// No review session is in flight.
    NoSession,
    /// `answer` was called before any card was drawn.
    NoCardDrawn,
}

impl Display for LexiconError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::InvalidRecord(reason) => write!(f, "invalid record: {reason}"),
            Self::InvalidSymbol(symbol) => write!(f, "no dictionary entry for `{symbol}`"),
            Self::SessionExhausted => write!(f, "review session has no cards left"),
            Self::DuplicateName(name) => write!(f, "name already in use: {name}"),
            Self::ReservedList(name) => write!(f, "list `{name}` is reserved"),
            Self::SessionActive => write!(f, "a review session is already active"),
            Self::NoSession => write!(f, "no review session is active"),
            Self::NoCardDrawn => write!(f, "no card has been drawn"),
        }
    }
}

impl Error for LexiconError {}
