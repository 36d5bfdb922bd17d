//! Hard-coded first-run dataset.
//!
//! # Responsibility
//! - Provide the store state used when no snapshot has been persisted
//!   yet, or when a persisted snapshot cannot be decoded.
//!
//! # Invariants
//! - The seed satisfies every store invariant (one main branch, agreeing
//!   branch↔note references).
//! - Seed ids are short and stable (`p1`, `b1`, `b2`, `n1`, `n2`).

use crate::model::note::Note;
use crate::model::project::{Branch, Project, MAIN_BRANCH_NAME};
use crate::store::tree::TreeStore;

/// Builds the first-run store: one project with a main branch holding
/// one note and a child branch holding another.
pub fn seed_store() -> TreeStore {
    let main_branch = Branch {
        id: "b1".to_string(),
        name: MAIN_BRANCH_NAME.to_string(),
        is_main: true,
        parent_id: None,
        notes: vec!["n1".to_string()],
    };
    let research_branch = Branch {
        id: "b2".to_string(),
        name: "Research and Development".to_string(),
        is_main: false,
        parent_id: Some("b1".to_string()),
        notes: vec!["n2".to_string()],
    };
    let project = Project {
        id: "p1".to_string(),
        name: "Project Alpha".to_string(),
        description: "Official meetings and project management".to_string(),
        icon: "🚀".to_string(),
        branches: vec![main_branch, research_branch],
    };

    let meeting_note = Note {
        id: "n1".to_string(),
        project_id: "p1".to_string(),
        branch_id: "b1".to_string(),
        title: "Meeting notes".to_string(),
        content: "In today's Project Alpha meeting we reviewed the roadmap.\n\
                  [ ] Submit the report\n\
                  [x] Team meeting held"
            .to_string(),
        created_at: "2024-07-28".to_string(),
    };
    let market_note = Note {
        id: "n2".to_string(),
        project_id: "p1".to_string(),
        branch_id: "b2".to_string(),
        title: "Market study".to_string(),
        content: "New market trends call for AI integration across the product."
            .to_string(),
        created_at: "2024-07-29".to_string(),
    };

    TreeStore::from_snapshot(crate::store::tree::Snapshot {
        projects: vec![project],
        notes: vec![meeting_note, market_note],
        active_note_id: Some("n1".to_string()),
    })
}
