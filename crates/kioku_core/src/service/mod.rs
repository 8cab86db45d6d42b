//! Use-case facade over the lexicon state and its persistence.
//!
//! # Responsibility
//! - Expose the core command surface to any transport (CLI, FFI, web).
//! - Keep callers decoupled from storage and index internals.

pub mod lexicon_service;
