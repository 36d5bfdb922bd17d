//! Stable identifier aliases and generators.
//!
//! # Responsibility
//! - Define string id aliases for project/branch/note records.
//! - Generate fresh ids carrying a one-letter kind prefix.
//!
//! # Invariants
//! - Generated ids are never reused for another record.
//! - The kind prefix (`p`/`b`/`n`) matches the owning collection.

use uuid::Uuid;

/// Stable project identifier.
pub type ProjectId = String;
/// Stable branch identifier.
pub type BranchId = String;
/// Stable note identifier.
pub type NoteId = String;

/// Generates a fresh project id.
pub fn new_project_id() -> ProjectId {
    format!("p{}", Uuid::new_v4().simple())
}

/// Generates a fresh branch id.
pub fn new_branch_id() -> BranchId {
    format!("b{}", Uuid::new_v4().simple())
}

/// Generates a fresh note id.
pub fn new_note_id() -> NoteId {
    format!("n{}", Uuid::new_v4().simple())
}
