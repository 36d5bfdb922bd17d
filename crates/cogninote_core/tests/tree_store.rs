use cogninote_core::{
    seed_store, Navigation, TreeStore, TreeStoreError, DEFAULT_NOTE_TITLE, MAIN_BRANCH_NAME,
};

/// Checks the two structural invariants over all reachable state:
/// branch↔note references agree both ways, each note is listed by exactly
/// one branch, and each project has exactly one parentless main branch.
fn assert_tree_consistent(store: &TreeStore) {
    for project in store.projects() {
        let main_branches: Vec<_> = project
            .branches
            .iter()
            .filter(|branch| branch.is_main)
            .collect();
        assert_eq!(
            main_branches.len(),
            1,
            "project {} must have exactly one main branch",
            project.id
        );
        assert_eq!(main_branches[0].parent_id, None);

        for branch in &project.branches {
            for note_id in &branch.notes {
                let note = store
                    .note(note_id)
                    .unwrap_or_else(|| panic!("dangling note id {note_id}"));
                assert_eq!(note.branch_id, branch.id);
                assert_eq!(note.project_id, project.id);
            }
        }
    }

    for note in store.notes() {
        let listings = store
            .projects()
            .iter()
            .flat_map(|project| &project.branches)
            .filter(|branch| branch.notes.contains(&note.id))
            .count();
        assert_eq!(listings, 1, "note {} listed by {listings} branches", note.id);
    }
}

fn branch_notes(store: &TreeStore, project_id: &str, branch_id: &str) -> Vec<String> {
    store
        .project(project_id)
        .unwrap()
        .branch(branch_id)
        .unwrap()
        .notes
        .clone()
}

#[test]
fn seed_store_is_consistent() {
    let store = seed_store();
    assert_tree_consistent(&store);
    assert_eq!(store.projects().len(), 1);
    assert_eq!(branch_notes(&store, "p1", "b1"), vec!["n1"]);
    assert_eq!(branch_notes(&store, "p1", "b2"), vec!["n2"]);
}

#[test]
fn create_project_prepends_with_single_empty_main_branch() {
    let mut store = seed_store();
    let project_id = store
        .create_project("Beta", "Second project", "🧪")
        .unwrap();

    assert_eq!(store.projects()[0].id, project_id);
    assert_eq!(store.projects()[1].id, "p1");

    let project = store.project(&project_id).unwrap();
    assert_eq!(project.branches.len(), 1);
    let main = project.main_branch().unwrap();
    assert_eq!(main.name, MAIN_BRANCH_NAME);
    assert!(main.notes.is_empty());
    assert_tree_consistent(&store);
}

#[test]
fn create_project_rejects_blank_name() {
    let mut store = seed_store();
    let err = store.create_project("   ", "", "🧪").unwrap_err();
    assert_eq!(err, TreeStoreError::BlankName);
}

#[test]
fn create_branch_appends_non_main_under_parent() {
    let mut store = seed_store();
    let branch_id = store.create_branch("p1", "b1", "Tasks").unwrap();

    let project = store.project("p1").unwrap();
    let branch = project.branch(&branch_id).unwrap();
    assert!(!branch.is_main);
    assert_eq!(branch.parent_id.as_deref(), Some("b1"));
    assert_eq!(project.branches.last().unwrap().id, branch_id);
    assert_tree_consistent(&store);
}

#[test]
fn create_branch_rejects_unknown_project_and_parent() {
    let mut store = seed_store();

    let err = store.create_branch("p9", "b1", "Tasks").unwrap_err();
    assert!(matches!(err, TreeStoreError::ProjectNotFound(id) if id == "p9"));

    let err = store.create_branch("p1", "b9", "Tasks").unwrap_err();
    assert!(matches!(err, TreeStoreError::BranchNotFound { branch_id, .. } if branch_id == "b9"));
}

#[test]
fn create_note_without_title_defaults_and_activates() {
    let mut store = seed_store();
    let (note_id, navigation) = store.create_note("p1", "b1", None, None).unwrap();

    assert_eq!(navigation, Navigation::OpenEditor);
    assert_eq!(store.notes()[0].id, note_id, "new note goes to the front");

    let note = store.note(&note_id).unwrap();
    assert_eq!(note.title, DEFAULT_NOTE_TITLE);
    assert_eq!(note.content, "");

    assert_eq!(
        branch_notes(&store, "p1", "b1"),
        vec!["n1".to_string(), note_id.clone()]
    );
    assert_eq!(store.active_note_id(), Some(note_id.as_str()));
    assert_tree_consistent(&store);
}

#[test]
fn move_note_between_branches_is_one_transition() {
    let mut store = seed_store();
    store.move_note_to_branch("n1", "p1", "b2").unwrap();

    assert!(branch_notes(&store, "p1", "b1").is_empty());
    assert_eq!(branch_notes(&store, "p1", "b2"), vec!["n2", "n1"]);
    assert_eq!(store.note("n1").unwrap().branch_id, "b2");
    assert_tree_consistent(&store);
}

#[test]
fn move_note_across_projects_leaves_no_stale_listing() {
    let mut store = seed_store();
    let project_id = store.create_project("Beta", "", "🧪").unwrap();
    let target_branch = store
        .project(&project_id)
        .unwrap()
        .main_branch()
        .unwrap()
        .id
        .clone();

    store
        .move_note_to_branch("n1", &project_id, &target_branch)
        .unwrap();

    assert!(branch_notes(&store, "p1", "b1").is_empty());
    assert_eq!(
        branch_notes(&store, &project_id, &target_branch),
        vec!["n1"]
    );
    let note = store.note("n1").unwrap();
    assert_eq!(note.project_id, project_id);
    assert_eq!(note.branch_id, target_branch);
    assert_tree_consistent(&store);
}

#[test]
fn move_note_rejects_unknown_target() {
    let mut store = seed_store();
    let before = store.clone();

    let err = store.move_note_to_branch("n1", "p1", "b9").unwrap_err();
    assert!(matches!(err, TreeStoreError::BranchNotFound { .. }));

    let err = store.move_note_to_branch("n9", "p1", "b2").unwrap_err();
    assert!(matches!(err, TreeStoreError::NoteNotFound(id) if id == "n9"));
    assert_eq!(store, before);
}

#[test]
fn move_branch_reparents_within_project() {
    let mut store = seed_store();
    let tasks = store.create_branch("p1", "b1", "Tasks").unwrap();

    store.move_branch_to_parent(&tasks, "p1", "b2").unwrap();
    let branch = store.project("p1").unwrap().branch(&tasks).unwrap();
    assert_eq!(branch.parent_id.as_deref(), Some("b2"));
    assert_tree_consistent(&store);
}

#[test]
fn move_branch_rejects_cycles_and_self_parenting() {
    let mut store = seed_store();
    let tasks = store.create_branch("p1", "b2", "Tasks").unwrap();

    // b2 under its own child.
    let err = store.move_branch_to_parent("b2", "p1", &tasks).unwrap_err();
    assert!(matches!(err, TreeStoreError::CycleDetected { .. }));

    let err = store.move_branch_to_parent("b2", "p1", "b2").unwrap_err();
    assert!(matches!(err, TreeStoreError::CycleDetected { .. }));
}

#[test]
fn move_branch_rejects_main_branch() {
    let mut store = seed_store();
    let err = store.move_branch_to_parent("b1", "p1", "b2").unwrap_err();
    assert!(matches!(err, TreeStoreError::MainBranchImmovable(id) if id == "b1"));
}

#[test]
fn delete_active_note_clears_pointer_everywhere() {
    let mut store = seed_store();
    assert_eq!(store.active_note_id(), Some("n1"));

    let navigation = store.delete_note("n1").unwrap();
    assert_eq!(navigation, Some(Navigation::EmptyEditor));
    assert_eq!(store.active_note_id(), None);
    assert!(store.note("n1").is_none());
    for project in store.projects() {
        for branch in &project.branches {
            assert!(!branch.notes.contains(&"n1".to_string()));
        }
    }
    assert_tree_consistent(&store);
}

#[test]
fn delete_inactive_note_keeps_pointer() {
    let mut store = seed_store();
    let navigation = store.delete_note("n2").unwrap();
    assert_eq!(navigation, None);
    assert_eq!(store.active_note_id(), Some("n1"));
    assert_tree_consistent(&store);
}

#[test]
fn note_edits_replace_fields_fully() {
    let mut store = seed_store();
    store.update_note_title("n1", "Weekly sync").unwrap();
    store.update_note_content("n1", "[ ] new agenda").unwrap();

    let note = store.note("n1").unwrap();
    assert_eq!(note.title, "Weekly sync");
    assert_eq!(note.content, "[ ] new agenda");

    let err = store.update_note_title("n9", "x").unwrap_err();
    assert!(matches!(err, TreeStoreError::NoteNotFound(_)));
}

#[test]
fn mixed_operation_sequence_preserves_invariants() {
    let mut store = seed_store();

    let beta = store.create_project("Beta", "", "🧪").unwrap();
    let beta_main = store
        .project(&beta)
        .unwrap()
        .main_branch()
        .unwrap()
        .id
        .clone();
    let tasks = store.create_branch("p1", "b1", "Tasks").unwrap();
    let (draft, _) = store.create_note("p1", &tasks, Some("Draft"), None).unwrap();

    store.move_note_to_branch("n2", "p1", &tasks).unwrap();
    store.move_note_to_branch(&draft, &beta, &beta_main).unwrap();
    store.move_branch_to_parent(&tasks, "p1", "b2").unwrap();
    store.delete_note("n1").unwrap();
    store.set_active_note(&draft).unwrap();

    assert_tree_consistent(&store);
    assert_eq!(store.active_note_id(), Some(draft.as_str()));
    assert_eq!(store.notes().len(), 2);
}
