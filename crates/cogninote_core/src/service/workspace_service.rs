//! Workspace use-case service.
//!
//! # Responsibility
//! - Own the in-memory tree store as the single application controller.
//! - Load the persisted snapshot (or fall back to seed data) at open.
//! - Persist a fresh snapshot after every successful mutation while a
//!   session is active.
//!
//! # Invariants
//! - Mutations that fail are not persisted.
//! - Autosave never runs without an active session marker.
//! - Seed fallback on undecodable snapshots is logged, never silent.

use crate::model::checklist::toggle_checklist_line;
use crate::repo::snapshot_repo::{SnapshotLoad, SnapshotRepoError, SnapshotRepository};
use crate::store::seed::seed_store;
use crate::store::tree::{Navigation, TreeStore, TreeStoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from workspace service operations.
#[derive(Debug)]
pub enum WorkspaceError {
    /// Tree store rejected the mutation.
    Store(TreeStoreError),
    /// Snapshot persistence failed.
    Repo(SnapshotRepoError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TreeStoreError> for WorkspaceError {
    fn from(value: TreeStoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SnapshotRepoError> for WorkspaceError {
    fn from(value: SnapshotRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Single controller owning the tree store and its persistence hooks.
pub struct WorkspaceService<R: SnapshotRepository> {
    repo: R,
    store: TreeStore,
    session_active: bool,
}

impl<R: SnapshotRepository> WorkspaceService<R> {
    /// Opens a workspace from the persisted snapshot.
    ///
    /// Missing snapshots seed first-run data; undecodable snapshots fall
    /// back to seed data with a warning (documented fallback policy).
    pub fn open(repo: R) -> Result<Self, WorkspaceError> {
        let session_active = repo.session_active()?;
        let store = match repo.load_snapshot()? {
            SnapshotLoad::Loaded(snapshot) => {
                info!("event=snapshot_load module=service status=ok");
                TreeStore::from_snapshot(snapshot)
            }
            SnapshotLoad::Missing => {
                info!("event=snapshot_load module=service status=seeded reason=missing");
                seed_store()
            }
            SnapshotLoad::Invalid(reason) => {
                warn!("event=snapshot_load module=service status=seeded reason={reason}");
                seed_store()
            }
        };

        Ok(Self {
            repo,
            store,
            session_active,
        })
    }

    /// Read access to the owned store.
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Whether autosave is currently enabled.
    pub fn session_active(&self) -> bool {
        self.session_active
    }

    /// Marks the session as signed-in and persists the current state.
    pub fn begin_session(&mut self) -> Result<(), WorkspaceError> {
        self.repo.set_session_active(true)?;
        self.session_active = true;
        self.persist()
    }

    /// Clears the session marker; later mutations stay in memory only.
    pub fn end_session(&mut self) -> Result<(), WorkspaceError> {
        self.repo.set_session_active(false)?;
        self.session_active = false;
        Ok(())
    }

    /// Creates a project. See [`TreeStore::create_project`].
    pub fn create_project(
        &mut self,
        name: &str,
        description: &str,
        icon: &str,
    ) -> Result<String, WorkspaceError> {
        let project_id = self.store.create_project(name, description, icon)?;
        self.persist_if_active()?;
        Ok(project_id)
    }

    /// Creates a branch. See [`TreeStore::create_branch`].
    pub fn create_branch(
        &mut self,
        project_id: &str,
        parent_id: &str,
        name: &str,
    ) -> Result<String, WorkspaceError> {
        let branch_id = self.store.create_branch(project_id, parent_id, name)?;
        self.persist_if_active()?;
        Ok(branch_id)
    }

    /// Creates a note and activates it. See [`TreeStore::create_note`].
    pub fn create_note(
        &mut self,
        project_id: &str,
        branch_id: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(String, Navigation), WorkspaceError> {
        let created = self
            .store
            .create_note(project_id, branch_id, title, content)?;
        self.persist_if_active()?;
        Ok(created)
    }

    /// Moves a note between branches. See [`TreeStore::move_note_to_branch`].
    pub fn move_note_to_branch(
        &mut self,
        note_id: &str,
        project_id: &str,
        target_branch_id: &str,
    ) -> Result<(), WorkspaceError> {
        self.store
            .move_note_to_branch(note_id, project_id, target_branch_id)?;
        self.persist_if_active()
    }

    /// Reparents a branch. See [`TreeStore::move_branch_to_parent`].
    pub fn move_branch_to_parent(
        &mut self,
        branch_id: &str,
        project_id: &str,
        target_parent_id: &str,
    ) -> Result<(), WorkspaceError> {
        self.store
            .move_branch_to_parent(branch_id, project_id, target_parent_id)?;
        self.persist_if_active()
    }

    /// Deletes a note. See [`TreeStore::delete_note`].
    pub fn delete_note(&mut self, note_id: &str) -> Result<Option<Navigation>, WorkspaceError> {
        let navigation = self.store.delete_note(note_id)?;
        self.persist_if_active()?;
        Ok(navigation)
    }

    /// Points the editor at an existing note.
    pub fn set_active_note(&mut self, note_id: &str) -> Result<(), WorkspaceError> {
        self.store.set_active_note(note_id)?;
        self.persist_if_active()
    }

    /// Replaces note content fully.
    pub fn update_note_content(
        &mut self,
        note_id: &str,
        content: &str,
    ) -> Result<(), WorkspaceError> {
        self.store.update_note_content(note_id, content)?;
        self.persist_if_active()
    }

    /// Replaces note title fully.
    pub fn update_note_title(&mut self, note_id: &str, title: &str) -> Result<(), WorkspaceError> {
        self.store.update_note_title(note_id, title)?;
        self.persist_if_active()
    }

    /// Flips one checklist marker inside a note's content.
    ///
    /// Returns `false` when the targeted line is not a checklist line;
    /// the note is untouched in that case.
    pub fn toggle_task(&mut self, note_id: &str, line_index: usize) -> Result<bool, WorkspaceError> {
        let note = self
            .store
            .note(note_id)
            .ok_or_else(|| TreeStoreError::NoteNotFound(note_id.to_string()))?;
        let Some(updated) = toggle_checklist_line(&note.content, line_index) else {
            return Ok(false);
        };
        self.store.update_note_content(note_id, &updated)?;
        self.persist_if_active()?;
        Ok(true)
    }

    fn persist_if_active(&mut self) -> Result<(), WorkspaceError> {
        if !self.session_active {
            return Ok(());
        }
        self.persist()
    }

    fn persist(&mut self) -> Result<(), WorkspaceError> {
        self.repo.save_snapshot(&self.store.to_snapshot())?;
        Ok(())
    }
}
