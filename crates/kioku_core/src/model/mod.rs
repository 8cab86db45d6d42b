//! Domain model for the lexical knowledge base.
//!
//! # Responsibility
//! - Define the canonical character/word/list shapes shared by every index.
//! - Define the resolved-record types the external dictionary boundary
//!   hands to the core.
//!
//! # Invariants
//! - Every domain object is addressed by a stable arena id, never by
//!   reference; readers re-check liveness through the owning store.

pub mod character;
pub mod word;
