//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot persistence contract used by workspace
//!   orchestration.
//! - Isolate SQLite key-value details from store/service code.
//!
//! # Invariants
//! - Snapshot payloads are written as versioned envelopes.
//! - Undecodable persisted state is reported to the caller, never
//!   silently masked.

pub mod snapshot_repo;
