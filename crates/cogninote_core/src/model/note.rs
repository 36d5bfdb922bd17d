//! Note domain record.
//!
//! # Responsibility
//! - Define the single user-authored text record owned by one branch.
//! - Stamp creation dates in the snapshot's calendar-date format.
//!
//! # Invariants
//! - `branch_id` must agree with the owning branch's note list; the
//!   store maintains this on every mutation.
//! - `created_at` is a `YYYY-MM-DD` date and never changes after create.

use crate::model::ids::{new_note_id, BranchId, NoteId, ProjectId};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Title used when a note is created without one.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled note";

/// A single piece of user-authored content.
///
/// Content may embed checklist lines (`[ ] text` / `[x] text`) which are
/// interpreted by [`crate::model::checklist`], not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable note id.
    pub id: NoteId,
    /// Owning project id.
    pub project_id: ProjectId,
    /// Owning branch id.
    pub branch_id: BranchId,
    /// User-facing title.
    pub title: String,
    /// Free-text body.
    pub content: String,
    /// Creation date as `YYYY-MM-DD`.
    pub created_at: String,
}

impl Note {
    /// Creates a note with a fresh id, dated today.
    ///
    /// `title` falls back to [`DEFAULT_NOTE_TITLE`] and `content` to the
    /// empty string when not provided.
    pub fn new(
        project_id: impl Into<ProjectId>,
        branch_id: impl Into<BranchId>,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Self {
        Self {
            id: new_note_id(),
            project_id: project_id.into(),
            branch_id: branch_id.into(),
            title: title.unwrap_or(DEFAULT_NOTE_TITLE).to_string(),
            content: content.unwrap_or_default().to_string(),
            created_at: today(),
        }
    }
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
