//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `cogninote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use cogninote_core::db::open_db_in_memory;
use cogninote_core::{SqliteSnapshotRepository, WorkspaceService};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let workspace = WorkspaceService::open(repo)?;

    let store = workspace.store();
    println!("cogninote_core version={}", cogninote_core::core_version());
    println!(
        "projects={} notes={} active_note={}",
        store.projects().len(),
        store.notes().len(),
        store.active_note_id().unwrap_or("-")
    );
    for project in store.projects() {
        println!(
            "project id={} name={} branches={}",
            project.id,
            project.name,
            project.branches.len()
        );
    }
    Ok(())
}
