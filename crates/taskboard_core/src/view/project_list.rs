//! Status list: store subscriber and drop target.
//!
//! # Invariants
//! - The list only ever renders projects whose status equals its own.
//! - The store callback captures a weak handle to the owning list, so a
//!   dropped list stops rendering without unsubscribing.
//! - A drop only requests a transition; the store decides whether it happens.

use crate::dnd::gesture::DropTarget;
use crate::dnd::transfer::{DataTransfer, PLAIN_TEXT_MARKER};
use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::project_store::ProjectStore;
use crate::view::project_item::ProjectItem;
use crate::view::{
    Document, InsertPosition, MountError, MountRequest, MountableView, APP_HOST, DROPPABLE_CLASS,
    PROJECT_LIST_TEMPLATE,
};
use log::{debug, error};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// One column of the board.
pub struct ProjectList {
    this: Weak<ProjectList>,
    document: Rc<dyn Document>,
    store: Rc<ProjectStore>,
    status: ProjectStatus,
    element_id: String,
    list_id: String,
    assigned: RefCell<Vec<Project>>,
    items: RefCell<Vec<Rc<ProjectItem>>>,
}

impl ProjectList {
    /// Mounts the list at the end of the `app` host and subscribes it to `store`.
    pub fn mount(
        document: Rc<dyn Document>,
        store: Rc<ProjectStore>,
        status: ProjectStatus,
    ) -> Result<Rc<Self>, MountError> {
        let requested_id = format!("{status}-projects");
        let element_id = document.mount(&MountRequest {
            template_id: PROJECT_LIST_TEMPLATE,
            host_id: APP_HOST,
            position: InsertPosition::End,
            element_id: Some(requested_id.as_str()),
        })?;

        let list = Rc::new_cyclic(|this| Self {
            this: this.clone(),
            document,
            store,
            status,
            element_id,
            list_id: format!("{status}-projects-list"),
            assigned: RefCell::new(Vec::new()),
            items: RefCell::new(Vec::new()),
        });
        list.render_content()?;
        list.configure()?;
        Ok(list)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Id of the list region items are mounted into.
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// Projects currently rendered by this list.
    pub fn assigned(&self) -> Vec<Project> {
        self.assigned.borrow().clone()
    }

    /// Rendered item for `id`, if this list shows it.
    pub fn item(&self, id: ProjectId) -> Option<Rc<ProjectItem>> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.project().id() == id)
            .cloned()
    }

    pub fn heading(&self) -> &'static str {
        match self.status {
            ProjectStatus::Active => "Active Projects",
            ProjectStatus::Finished => "Finished Projects",
        }
    }

    fn assign(&self, projects: Vec<Project>) {
        let relevant = projects
            .into_iter()
            .filter(|project| project.status() == self.status)
            .collect::<Vec<_>>();
        *self.assigned.borrow_mut() = relevant;

        if let Err(err) = self.render_projects() {
            error!(
                "event=list_render module=view status=error list={} error={}",
                self.status, err
            );
        }
    }

    /// Replaces the rendered region; `items` always mirrors what was mounted,
    /// even when a mount fails part way.
    fn render_projects(&self) -> Result<(), MountError> {
        self.document.clear_children(&self.list_id)?;

        let assigned = self.assigned.borrow().clone();
        let mut items = Vec::with_capacity(assigned.len());
        let mut outcome = Ok(());
        for project in assigned {
            match ProjectItem::mount(Rc::clone(&self.document), &self.list_id, project) {
                Ok(item) => items.push(Rc::new(item)),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }
        *self.items.borrow_mut() = items;
        outcome
    }

    fn set_droppable(&self, on: bool) {
        let result = if on {
            self.document
                .add_slot_class(&self.element_id, "ul", DROPPABLE_CLASS)
        } else {
            self.document
                .remove_slot_class(&self.element_id, "ul", DROPPABLE_CLASS)
        };
        if let Err(err) = result {
            error!(
                "event=list_affordance module=view status=error list={} error={}",
                self.status, err
            );
        }
    }
}

impl MountableView for ProjectList {
    fn configure(&self) -> Result<(), MountError> {
        let this = self.this.clone();
        self.store.subscribe(move |projects| {
            if let Some(list) = this.upgrade() {
                list.assign(projects);
            }
        });
        self.assign(self.store.projects());
        Ok(())
    }

    fn render_content(&self) -> Result<(), MountError> {
        self.document
            .set_slot_id(&self.element_id, "ul", &self.list_id)?;
        self.document
            .set_slot_text(&self.element_id, "h2", self.heading())
    }
}

impl DropTarget for ProjectList {
    fn target_id(&self) -> &str {
        &self.element_id
    }

    fn accepts(&self, transfer: &DataTransfer) -> bool {
        transfer.declares_plain_text()
    }

    fn on_accept(&self) {
        self.set_droppable(true);
    }

    fn on_drop(&self, transfer: &DataTransfer) {
        let Some(raw_id) = transfer.get_data(PLAIN_TEXT_MARKER) else {
            debug!(
                "event=list_drop module=view status=skipped reason=no_payload list={}",
                self.status
            );
            return;
        };
        let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
            debug!(
                "event=list_drop module=view status=skipped reason=unknown_id list={}",
                self.status
            );
            return;
        };
        self.store.move_project(id, self.status);
    }

    fn on_leave(&self) {
        self.set_droppable(false);
    }
}
