//! Tree store state and mutation operations.
//!
//! # Responsibility
//! - Provide the five tree mutations (create project/branch/note, move
//!   note, move branch, delete note) plus note-edit operations.
//! - Validate caller-supplied ids and reject cycle-creating reparenting
//!   with typed errors.
//!
//! # Invariants
//! - All mutations are synchronous and atomic with respect to callers;
//!   a failed operation leaves the store unchanged.
//! - The active-note pointer only ever holds an id of an existing note,
//!   or `None`.

use crate::model::ids::{BranchId, NoteId, ProjectId};
use crate::model::note::Note;
use crate::model::project::{Branch, Project};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// View transition requested by a store mutation.
///
/// The store has no UI of its own; mutations that the original
/// application coupled to navigation report the intended transition to
/// the caller instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show the editor with the (new) active note.
    OpenEditor,
    /// Show the editor in its empty, no-note-selected state.
    EmptyEditor,
}

/// Errors from tree store mutations.
#[derive(Debug, PartialEq, Eq)]
pub enum TreeStoreError {
    /// A display name is blank after trimming.
    BlankName,
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Target branch does not exist within the named project.
    BranchNotFound {
        project_id: ProjectId,
        branch_id: BranchId,
    },
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// The main branch is the tree root and cannot be reparented.
    MainBranchImmovable(BranchId),
    /// Reparenting would make a branch its own ancestor.
    CycleDetected {
        branch_id: BranchId,
        parent_id: BranchId,
    },
}

impl Display for TreeStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::BranchNotFound {
                project_id,
                branch_id,
            } => write!(f, "branch {branch_id} not found in project {project_id}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::MainBranchImmovable(id) => {
                write!(f, "main branch cannot be reparented: {id}")
            }
            Self::CycleDetected {
                branch_id,
                parent_id,
            } => write!(
                f,
                "reparenting would create a cycle: branch {branch_id} under {parent_id}"
            ),
        }
    }
}

impl Error for TreeStoreError {}

/// Persisted projection of the full store state.
///
/// This is the shape written to and read from the snapshot repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub notes: Vec<Note>,
    pub active_note_id: Option<NoteId>,
}

/// In-memory store for the project/branch/note tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStore {
    projects: Vec<Project>,
    notes: Vec<Note>,
    active_note_id: Option<NoteId>,
}

impl TreeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            notes: Vec::new(),
            active_note_id: None,
        }
    }

    /// Rebuilds a store from a persisted snapshot.
    ///
    /// When the snapshot carries no active-note id, or an id that no
    /// longer matches any note, the most recent note (front of the
    /// collection) becomes active, matching load behavior of the
    /// original application.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let active_note_id = snapshot
            .active_note_id
            .filter(|id| snapshot.notes.iter().any(|note| &note.id == id))
            .or_else(|| snapshot.notes.first().map(|note| note.id.clone()));
        Self {
            projects: snapshot.projects,
            notes: snapshot.notes,
            active_note_id,
        }
    }

    /// Captures the full store state for persistence.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            projects: self.projects.clone(),
            notes: self.notes.clone(),
            active_note_id: self.active_note_id.clone(),
        }
    }

    /// Projects in most-recent-first order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Notes in most-recent-first order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up one project by id.
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|project| project.id == project_id)
    }

    /// Looks up one note by id.
    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Currently displayed note id, if any.
    pub fn active_note_id(&self) -> Option<&str> {
        self.active_note_id.as_deref()
    }

    /// Currently displayed note, if any.
    pub fn active_note(&self) -> Option<&Note> {
        self.active_note_id
            .as_deref()
            .and_then(|id| self.note(id))
    }

    /// Creates a project with a fresh main branch and prepends it to the
    /// project list (most-recent-first ordering).
    pub fn create_project(
        &mut self,
        name: &str,
        description: &str,
        icon: &str,
    ) -> Result<ProjectId, TreeStoreError> {
        let name = normalize_name(name)?;
        let project = Project::new(name, description, icon);
        let project_id = project.id.clone();
        self.projects.insert(0, project);
        Ok(project_id)
    }

    /// Creates a non-main branch under `parent_id` and appends it to the
    /// project's branch collection.
    pub fn create_branch(
        &mut self,
        project_id: &str,
        parent_id: &str,
        name: &str,
    ) -> Result<BranchId, TreeStoreError> {
        let name = normalize_name(name)?;
        self.ensure_branch_exists(project_id, parent_id)?;

        let branch = Branch::new_child(name, parent_id.to_string());
        let branch_id = branch.id.clone();
        // ensure_branch_exists verified the project above.
        if let Some(project) = self.project_mut(project_id) {
            project.branches.push(branch);
        }
        Ok(branch_id)
    }

    /// Creates a note in the given branch, makes it active, and asks the
    /// caller to open the editor.
    ///
    /// The note is prepended to the note collection; its id is appended
    /// to the target branch's note list.
    pub fn create_note(
        &mut self,
        project_id: &str,
        branch_id: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(NoteId, Navigation), TreeStoreError> {
        self.ensure_branch_exists(project_id, branch_id)?;

        let note = Note::new(project_id, branch_id, title, content);
        let note_id = note.id.clone();
        self.notes.insert(0, note);
        if let Some(branch) = self.branch_mut(project_id, branch_id) {
            branch.notes.push(note_id.clone());
        }
        self.active_note_id = Some(note_id.clone());
        Ok((note_id, Navigation::OpenEditor))
    }

    /// Moves a note into `target_branch_id` of `project_id` as one
    /// logical transition.
    ///
    /// The note id is removed from every branch list across all projects
    /// before being appended to the target, so a cross-project move
    /// leaves no stale entries behind.
    pub fn move_note_to_branch(
        &mut self,
        note_id: &str,
        project_id: &str,
        target_branch_id: &str,
    ) -> Result<(), TreeStoreError> {
        self.ensure_branch_exists(project_id, target_branch_id)?;
        let Some(note) = self.notes.iter_mut().find(|note| note.id == note_id) else {
            return Err(TreeStoreError::NoteNotFound(note_id.to_string()));
        };
        note.project_id = project_id.to_string();
        note.branch_id = target_branch_id.to_string();

        for project in &mut self.projects {
            for branch in &mut project.branches {
                branch.notes.retain(|id| id != note_id);
            }
        }
        if let Some(branch) = self.branch_mut(project_id, target_branch_id) {
            branch.notes.push(note_id.to_string());
        }
        Ok(())
    }

    /// Reparents a branch within one project.
    ///
    /// The main branch stays the root; moves that would make a branch
    /// its own ancestor are rejected.
    pub fn move_branch_to_parent(
        &mut self,
        branch_id: &str,
        project_id: &str,
        target_parent_id: &str,
    ) -> Result<(), TreeStoreError> {
        self.ensure_branch_exists(project_id, branch_id)?;
        self.ensure_branch_exists(project_id, target_parent_id)?;

        let project = self
            .project(project_id)
            .ok_or_else(|| TreeStoreError::ProjectNotFound(project_id.to_string()))?;
        if project
            .branch(branch_id)
            .is_some_and(|branch| branch.is_main)
        {
            return Err(TreeStoreError::MainBranchImmovable(branch_id.to_string()));
        }
        if would_create_cycle(project, branch_id, target_parent_id) {
            return Err(TreeStoreError::CycleDetected {
                branch_id: branch_id.to_string(),
                parent_id: target_parent_id.to_string(),
            });
        }

        if let Some(branch) = self.branch_mut(project_id, branch_id) {
            branch.parent_id = Some(target_parent_id.to_string());
        }
        Ok(())
    }

    /// Deletes a note from the collection and from every branch list.
    ///
    /// Returns `Some(Navigation::EmptyEditor)` when the deleted note was
    /// active, so the caller can leave the now-empty editor view.
    pub fn delete_note(
        &mut self,
        note_id: &str,
    ) -> Result<Option<Navigation>, TreeStoreError> {
        if self.note(note_id).is_none() {
            return Err(TreeStoreError::NoteNotFound(note_id.to_string()));
        }

        self.notes.retain(|note| note.id != note_id);
        for project in &mut self.projects {
            for branch in &mut project.branches {
                branch.notes.retain(|id| id != note_id);
            }
        }

        if self.active_note_id.as_deref() == Some(note_id) {
            self.active_note_id = None;
            return Ok(Some(Navigation::EmptyEditor));
        }
        Ok(None)
    }

    /// Points the editor at an existing note.
    pub fn set_active_note(&mut self, note_id: &str) -> Result<(), TreeStoreError> {
        if self.note(note_id).is_none() {
            return Err(TreeStoreError::NoteNotFound(note_id.to_string()));
        }
        self.active_note_id = Some(note_id.to_string());
        Ok(())
    }

    /// Replaces note content fully.
    pub fn update_note_content(
        &mut self,
        note_id: &str,
        content: &str,
    ) -> Result<(), TreeStoreError> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == note_id) else {
            return Err(TreeStoreError::NoteNotFound(note_id.to_string()));
        };
        note.content = content.to_string();
        Ok(())
    }

    /// Replaces note title fully.
    pub fn update_note_title(
        &mut self,
        note_id: &str,
        title: &str,
    ) -> Result<(), TreeStoreError> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == note_id) else {
            return Err(TreeStoreError::NoteNotFound(note_id.to_string()));
        };
        note.title = title.to_string();
        Ok(())
    }

    fn project_mut(&mut self, project_id: &str) -> Option<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.id == project_id)
    }

    fn branch_mut(&mut self, project_id: &str, branch_id: &str) -> Option<&mut Branch> {
        self.project_mut(project_id)
            .and_then(|project| project.branch_mut(branch_id))
    }

    fn ensure_branch_exists(
        &self,
        project_id: &str,
        branch_id: &str,
    ) -> Result<(), TreeStoreError> {
        let project = self
            .project(project_id)
            .ok_or_else(|| TreeStoreError::ProjectNotFound(project_id.to_string()))?;
        if project.branch(branch_id).is_none() {
            return Err(TreeStoreError::BranchNotFound {
                project_id: project_id.to_string(),
                branch_id: branch_id.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_name(value: &str) -> Result<String, TreeStoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TreeStoreError::BlankName);
    }
    Ok(trimmed.to_string())
}

/// Walks parent references from the candidate parent toward the root.
///
/// A cycle exists when the walk reaches the branch being moved, or when
/// a parent reference repeats (already-corrupt data).
fn would_create_cycle(project: &Project, branch_id: &str, candidate_parent_id: &str) -> bool {
    let mut visited = HashSet::new();
    let mut cursor = Some(candidate_parent_id.to_string());
    while let Some(current) = cursor {
        if current == branch_id {
            return true;
        }
        if !visited.insert(current.clone()) {
            return true;
        }
        cursor = project
            .branch(&current)
            .and_then(|branch| branch.parent_id.clone());
    }
    false
}
