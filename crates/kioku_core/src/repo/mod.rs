//! Persistence contracts for the state snapshot.
//!
//! # Responsibility
//! - Define the storage-agnostic snapshot access contract.
//! - Keep SQL details inside the core persistence boundary.

pub mod snapshot_repo;
