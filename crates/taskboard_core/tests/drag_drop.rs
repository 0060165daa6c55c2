use std::rc::Rc;
use taskboard_core::{
    DataTransfer, DragGesture, DragPhase, DragSource, DropEffect, DropTarget, MemoryDocument,
    ProjectItem, ProjectList, ProjectStatus, ProjectStore, PLAIN_TEXT_MARKER,
};

struct Fixture {
    document: Rc<MemoryDocument>,
    store: Rc<ProjectStore>,
    active: Rc<ProjectList>,
    finished: Rc<ProjectList>,
}

fn fixture() -> Fixture {
    let document = Rc::new(MemoryDocument::with_board_templates());
    let store = Rc::new(ProjectStore::new());
    let active = ProjectList::mount(document.clone(), Rc::clone(&store), ProjectStatus::Active)
        .expect("active list");
    let finished =
        ProjectList::mount(document.clone(), Rc::clone(&store), ProjectStatus::Finished)
            .expect("finished list");
    Fixture {
        document,
        store,
        active,
        finished,
    }
}

#[test]
fn item_payload_carries_the_exact_project_id_with_move_only() {
    let fx = fixture();
    let id = fx.store.add_project("Build API", "Implement REST endpoints", 15.0);
    let item: Rc<ProjectItem> = fx.active.item(id).expect("item rendered");

    let mut transfer = DataTransfer::new();
    item.start_payload(&mut transfer);

    assert_eq!(transfer.types(), vec![PLAIN_TEXT_MARKER]);
    assert_eq!(transfer.get_data(PLAIN_TEXT_MARKER), Some(id.to_string().as_str()));
    assert_eq!(transfer.effect_allowed(), DropEffect::Move);
}

#[test]
fn accepting_drag_over_marks_the_list_droppable_until_leave() {
    let fx = fixture();
    let id = fx.store.add_project("Build API", "Implement REST endpoints", 15.0);
    let item = fx.active.item(id).unwrap();
    let source: &ProjectItem = &item;
    let target: &ProjectList = &fx.finished;

    let mut gesture = DragGesture::new();
    gesture.start(source).unwrap();
    assert!(gesture.drag_over(target).unwrap());
    assert!(fx
        .document
        .slot_has_class("finished-projects", "ul", "droppable"));

    gesture.leave(target).unwrap();
    assert!(!fx
        .document
        .slot_has_class("finished-projects", "ul", "droppable"));
    assert_eq!(gesture.end(None).unwrap(), DragPhase::DropRejected);
    assert_eq!(fx.store.projects()[0].status(), ProjectStatus::Active);
}

#[test]
fn foreign_content_type_never_reaches_the_store() {
    let fx = fixture();
    let id = fx.store.add_project("Build API", "Implement REST endpoints", 15.0);
    let target: &ProjectList = &fx.finished;

    let mut gesture = DragGesture::new();
    gesture
        .start_external(DataTransfer::with_data("text/html", id.to_string()))
        .unwrap();

    assert!(!target.accepts(gesture.transfer()));
    assert!(!gesture.drag_over(target).unwrap());
    assert!(!fx
        .document
        .slot_has_class("finished-projects", "ul", "droppable"));
    assert_eq!(gesture.drop_on(target).unwrap(), DragPhase::DropRejected);
    assert_eq!(fx.store.projects()[0].status(), ProjectStatus::Active);
}

#[test]
fn drop_with_unparsable_or_unknown_id_changes_nothing() {
    let fx = fixture();
    fx.store.add_project("Build API", "Implement REST endpoints", 15.0);
    let before = fx.store.projects();
    let target: &ProjectList = &fx.finished;

    for payload in ["not-a-uuid", "6f1c1c52-3a7e-4b0e-9a55-9f1e2f1d0b11"] {
        let mut gesture = DragGesture::new();
        gesture
            .start_external(DataTransfer::with_data(PLAIN_TEXT_MARKER, payload))
            .unwrap();
        assert!(gesture.drag_over(target).unwrap());
        assert_eq!(gesture.drop_on(target).unwrap(), DragPhase::DropAccepted);
        gesture.end(None).unwrap();
    }

    assert_eq!(fx.store.projects(), before);
    assert!(fx.finished.assigned().is_empty());
}

#[test]
fn full_gesture_moves_the_project_between_lists() {
    let fx = fixture();
    let id = fx.store.add_project("Build API", "Implement REST endpoints", 15.0);
    let item = fx.active.item(id).unwrap();
    let source: &ProjectItem = &item;
    let target: &ProjectList = &fx.finished;

    let mut gesture = DragGesture::new();
    gesture.start(source).unwrap();
    gesture.drag_over(target).unwrap();
    gesture.drop_on(target).unwrap();
    gesture.leave(target).unwrap();
    gesture.end(Some(source as &dyn DragSource)).unwrap();

    assert!(fx.active.assigned().is_empty());
    assert_eq!(fx.finished.assigned()[0].id(), id);
    assert!(fx.document.contains(&id.to_string()));
    assert_eq!(
        fx.document.children("finished-projects-list"),
        vec![id.to_string()]
    );
}
