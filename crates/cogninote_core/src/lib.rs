//! Core domain logic for Cogninote.
//! This crate is the single source of truth for tree-store invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::checklist::{parse_checklist, toggle_checklist_line, ChecklistItem};
pub use model::ids::{BranchId, NoteId, ProjectId};
pub use model::note::{Note, DEFAULT_NOTE_TITLE};
pub use model::project::{Branch, Project, MAIN_BRANCH_NAME};
pub use repo::snapshot_repo::{
    SnapshotLoad, SnapshotRepoError, SnapshotRepoResult, SnapshotRepository,
    SqliteSnapshotRepository,
};
pub use service::workspace_service::{WorkspaceError, WorkspaceService};
pub use store::seed::seed_store;
pub use store::tree::{Navigation, Snapshot, TreeStore, TreeStoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
