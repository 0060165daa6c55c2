use std::rc::Rc;
use taskboard_core::{
    Board, BoardError, DragPhase, MemoryDocument, Project, ProjectId, ProjectStatus,
    ProjectStore, SubmitOutcome, Violation,
};
use uuid::Uuid;

fn mounted_board() -> (Rc<MemoryDocument>, Board) {
    let document = Rc::new(MemoryDocument::with_board_templates());
    let board = Board::mount(document.clone()).expect("board should mount");
    (document, board)
}

fn submit(board: &Board, title: &str, description: &str, effort: &str) -> SubmitOutcome {
    board
        .input()
        .fill(title, description, effort)
        .expect("fill form");
    board.input().submit().expect("submit form")
}

fn added(outcome: SubmitOutcome) -> ProjectId {
    match outcome {
        SubmitOutcome::Added(id) => id,
        SubmitOutcome::Rejected(violations) => panic!("unexpected rejection: {violations:?}"),
    }
}

fn rendered_ids(board: &Board, status: ProjectStatus) -> Vec<ProjectId> {
    board
        .list(status)
        .assigned()
        .iter()
        .map(Project::id)
        .collect()
}

fn keys(ids: &[ProjectId]) -> Vec<String> {
    ids.iter().map(ProjectId::to_string).collect()
}

#[test]
fn board_mounts_form_first_then_both_lists() {
    let (document, board) = mounted_board();

    assert_eq!(
        document.children("app"),
        vec!["user-input", "active-projects", "finished-projects"]
    );
    assert_eq!(
        document.slot_text("active-projects", "h2").as_deref(),
        Some("Active Projects")
    );
    assert_eq!(
        document.slot_text("finished-projects", "h2").as_deref(),
        Some("Finished Projects")
    );
    assert_eq!(board.list(ProjectStatus::Finished).list_id(), "finished-projects-list");
}

#[test]
fn every_view_shares_the_board_store() {
    let (_document, board) = mounted_board();
    assert!(Rc::ptr_eq(&board.store(), &board.store()));
    // Only the two lists subscribe; the form writes through the store.
    assert_eq!(board.store().listener_count(), 2);
}

#[test]
fn add_and_move_scenario_renders_expected_lists() {
    let (document, board) = mounted_board();

    let first = added(submit(&board, "Build API", "Implement REST endpoints", "15"));
    let second = added(submit(&board, "Migrate DB", "Move to new schema", "40"));

    let first_key = first.to_string();
    let second_key = second.to_string();
    assert_eq!(
        document.slot_text(&first_key, "h3").as_deref(),
        Some("15 person-days")
    );
    assert_eq!(
        document.slot_text(&second_key, "h3").as_deref(),
        Some("2 person-months")
    );
    assert_eq!(
        document.slot_text(&first_key, "p").as_deref(),
        Some("Implement REST endpoints")
    );
    assert_eq!(rendered_ids(&board, ProjectStatus::Active), vec![first, second]);

    let phase = board
        .drag_project(first, ProjectStatus::Finished)
        .expect("drag should succeed");

    assert_eq!(phase, DragPhase::DropAccepted);
    assert_eq!(rendered_ids(&board, ProjectStatus::Active), vec![second]);
    assert_eq!(rendered_ids(&board, ProjectStatus::Finished), vec![first]);
    assert_eq!(document.children("active-projects-list"), vec![second_key]);
    assert_eq!(document.children("finished-projects-list"), vec![first_key]);
}

#[test]
fn lists_partition_the_collection_after_mixed_operations() {
    let (document, board) = mounted_board();
    let store = board.store();
    let ids = (0..6)
        .map(|n| added(submit(&board, &format!("Project {n}"), "long enough", "3")))
        .collect::<Vec<_>>();

    board.drag_project(ids[1], ProjectStatus::Finished).unwrap();
    board.drag_project(ids[4], ProjectStatus::Finished).unwrap();
    board.drag_project(ids[1], ProjectStatus::Active).unwrap();
    store.move_project(ids[5], ProjectStatus::Finished);

    let active = rendered_ids(&board, ProjectStatus::Active);
    let finished = rendered_ids(&board, ProjectStatus::Finished);
    for project in store.projects() {
        let in_active = active.contains(&project.id());
        let in_finished = finished.contains(&project.id());
        assert_ne!(in_active, in_finished, "project must be in exactly one list");
        assert_eq!(in_active, project.status() == ProjectStatus::Active);
    }
    assert_eq!(active.len() + finished.len(), store.len());
    assert_eq!(finished, vec![ids[4], ids[5]]);
    assert_eq!(document.children("active-projects-list"), keys(&active));
    assert_eq!(document.children("finished-projects-list"), keys(&finished));
}

#[test]
fn moving_back_to_active_rerenders_both_lists() {
    let (document, board) = mounted_board();
    let first = added(submit(&board, "Build API", "Implement REST endpoints", "15"));
    let second = added(submit(&board, "Migrate DB", "Move to new schema", "40"));

    board.drag_project(first, ProjectStatus::Finished).unwrap();
    assert_eq!(document.children("active-projects-list"), keys(&[second]));
    assert_eq!(document.children("finished-projects-list"), keys(&[first]));

    let phase = board
        .drag_project(first, ProjectStatus::Active)
        .expect("finished item should be draggable");

    assert_eq!(phase, DragPhase::DropAccepted);
    assert_eq!(
        document.children("active-projects-list"),
        keys(&[first, second])
    );
    assert!(document.children("finished-projects-list").is_empty());
    assert!(board.list(ProjectStatus::Active).item(first).is_some());
    assert!(board.list(ProjectStatus::Finished).item(first).is_none());
    assert_eq!(
        document.slot_text(&first.to_string(), "h3").as_deref(),
        Some("15 person-days")
    );

    board
        .drag_project(first, ProjectStatus::Finished)
        .expect("item should stay draggable after moving back");
    assert_eq!(document.children("active-projects-list"), keys(&[second]));
    assert_eq!(document.children("finished-projects-list"), keys(&[first]));
}

#[test]
fn invalid_submission_alerts_and_does_not_add() {
    let (document, board) = mounted_board();

    let outcome = submit(&board, "", "ok", "0");

    match outcome {
        SubmitOutcome::Rejected(violations) => {
            let labels = violations.iter().map(Violation::label).collect::<Vec<_>>();
            assert_eq!(labels, vec!["title", "description", "effort"]);
        }
        SubmitOutcome::Added(_) => panic!("invalid input must not add a project"),
    }
    assert!(board.store().is_empty());
    assert_eq!(document.alerts().len(), 1);
    assert!(document.alerts()[0].starts_with("Invalid input"));
    assert_eq!(document.field_value_or_empty("user-input", "description"), "ok");
}

#[test]
fn non_numeric_effort_is_rejected() {
    let (_document, board) = mounted_board();
    let outcome = submit(&board, "Build API", "Implement REST endpoints", "soon");
    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert!(board.store().is_empty());
}

#[test]
fn successful_submission_clears_the_form() {
    let (document, board) = mounted_board();

    added(submit(&board, "Build API", "Implement REST endpoints", "15"));

    for field in ["title", "description", "effort"] {
        assert_eq!(document.field_value_or_empty("user-input", field), "");
    }
    assert!(document.alerts().is_empty());
}

#[test]
fn dropping_into_the_same_list_does_not_rerender() {
    let (_document, board) = mounted_board();
    let id = added(submit(&board, "Build API", "Implement REST endpoints", "15"));
    let before = board
        .list(ProjectStatus::Active)
        .item(id)
        .expect("item rendered");

    let phase = board.drag_project(id, ProjectStatus::Active).unwrap();

    assert_eq!(phase, DragPhase::DropAccepted);
    let after = board.list(ProjectStatus::Active).item(id).unwrap();
    assert!(Rc::ptr_eq(&before, &after));
}

#[test]
fn dragging_a_project_that_is_not_rendered_fails() {
    let (_document, board) = mounted_board();
    let missing = Uuid::new_v4();
    assert_eq!(
        board.drag_project(missing, ProjectStatus::Finished),
        Err(BoardError::ItemNotRendered(missing))
    );
}

#[test]
fn lists_mounted_on_a_populated_store_render_existing_projects() {
    let store = Rc::new(ProjectStore::new());
    let id = store.add_project("Build API", "Implement REST endpoints", 15.0);
    store.move_project(id, ProjectStatus::Finished);

    let document = Rc::new(MemoryDocument::with_board_templates());
    let board = Board::mount_with_store(document.clone(), store).unwrap();

    assert!(rendered_ids(&board, ProjectStatus::Active).is_empty());
    assert_eq!(rendered_ids(&board, ProjectStatus::Finished), vec![id]);
    assert!(document.contains(&id.to_string()));
}

trait FieldLookup {
    fn field_value_or_empty(&self, element_id: &str, field: &str) -> String;
}

impl FieldLookup for MemoryDocument {
    fn field_value_or_empty(&self, element_id: &str, field: &str) -> String {
        use taskboard_core::Document;
        self.field_value(element_id, field).unwrap_or_default()
    }
}
