//! Project and branch domain records.
//!
//! # Responsibility
//! - Define the project container and its internal branch tree nodes.
//! - Provide lookup helpers used by store mutations.
//!
//! # Invariants
//! - Exactly one branch per project has `is_main == true`.
//! - The main branch has no parent; it is the branch tree's root.
//! - Branch `parent_id` values resolve inside the same project.

use crate::model::ids::{new_branch_id, new_project_id, BranchId, NoteId, ProjectId};
use serde::{Deserialize, Serialize};

/// Display name given to every freshly created main branch.
pub const MAIN_BRANCH_NAME: &str = "Main branch";

/// One node in a project's branch tree.
///
/// Field names serialize in camelCase to match the snapshot schema of the
/// original application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Stable branch id.
    pub id: BranchId,
    /// User-facing label.
    pub name: String,
    /// Root marker. Set at project creation and never transferred.
    pub is_main: bool,
    /// Parent branch id. `None` only for the main branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BranchId>,
    /// Ordered note ids contained by this branch.
    pub notes: Vec<NoteId>,
}

impl Branch {
    /// Creates the root branch of a new project.
    pub fn new_main() -> Self {
        Self {
            id: new_branch_id(),
            name: MAIN_BRANCH_NAME.to_string(),
            is_main: true,
            parent_id: None,
            notes: Vec::new(),
        }
    }

    /// Creates a non-main branch under the given parent.
    pub fn new_child(name: impl Into<String>, parent_id: BranchId) -> Self {
        Self {
            id: new_branch_id(),
            name: name.into(),
            is_main: false,
            parent_id: Some(parent_id),
            notes: Vec::new(),
        }
    }
}

/// Top-level container grouping notes through a branch tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable project id.
    pub id: ProjectId,
    /// User-facing label.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Icon glyph shown next to the project name.
    pub icon: String,
    /// Branches in insertion order. The order carries no semantics.
    pub branches: Vec<Branch>,
}

impl Project {
    /// Creates a project with a fresh id and a single empty main branch.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: new_project_id(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            branches: vec![Branch::new_main()],
        }
    }

    /// Looks up one branch by id.
    pub fn branch(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.id == branch_id)
    }

    /// Looks up one branch by id for mutation.
    pub fn branch_mut(&mut self, branch_id: &str) -> Option<&mut Branch> {
        self.branches
            .iter_mut()
            .find(|branch| branch.id == branch_id)
    }

    /// Returns the main branch, if the project is well-formed.
    pub fn main_branch(&self) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.is_main)
    }
}
