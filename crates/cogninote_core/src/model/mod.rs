//! Domain model for the project/branch/note tree.
//!
//! # Responsibility
//! - Define the canonical data structures owned by the tree store.
//! - Keep serialization aligned with the external snapshot schema.
//!
//! # Invariants
//! - Every record is identified by a stable string id with a kind prefix.
//! - Branch/note cross-reference consistency is enforced by the store,
//!   not by these types.

pub mod checklist;
pub mod ids;
pub mod note;
pub mod project;
