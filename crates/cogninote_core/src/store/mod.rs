//! In-memory tree store for project/branch/note collections.
//!
//! # Responsibility
//! - Own the project, branch, and note collections and the active-note
//!   pointer.
//! - Guarantee that every mutation leaves the branch↔note and
//!   branch↔branch cross-references consistent.
//!
//! # Invariants
//! - Every note id listed by a branch resolves to a note whose
//!   `branch_id`/`project_id` fields point back at that branch/project.
//! - Each project has exactly one main branch, and it has no parent.
//! - Branch parent references never form a cycle.

pub mod seed;
pub mod tree;
