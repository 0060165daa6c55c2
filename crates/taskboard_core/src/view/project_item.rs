//! One rendered project; the drag source of the board.

use crate::dnd::gesture::DragSource;
use crate::dnd::transfer::{DataTransfer, DropEffect, PLAIN_TEXT_MARKER};
use crate::model::project::Project;
use crate::view::{
    Document, InsertPosition, MountError, MountRequest, MountableView, PROJECT_ITEM_TEMPLATE,
};
use log::debug;
use std::rc::Rc;

/// Project card mounted inside a list region.
pub struct ProjectItem {
    document: Rc<dyn Document>,
    project: Project,
    element_id: String,
}

impl ProjectItem {
    /// Mounts the card at the end of `host_id`, using the project id as element id.
    pub fn mount(
        document: Rc<dyn Document>,
        host_id: &str,
        project: Project,
    ) -> Result<Self, MountError> {
        let project_id = project.id().to_string();
        let element_id = document.mount(&MountRequest {
            template_id: PROJECT_ITEM_TEMPLATE,
            host_id,
            position: InsertPosition::End,
            element_id: Some(project_id.as_str()),
        })?;

        let item = Self {
            document,
            project,
            element_id,
        };
        item.configure()?;
        item.render_content()?;
        Ok(item)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Effort text shown on the card, e.g. `15 person-days`.
    pub fn effort_label(&self) -> String {
        self.project.effort_display().to_string()
    }
}

impl MountableView for ProjectItem {
    fn configure(&self) -> Result<(), MountError> {
        // Drag events reach the item through `DragSource`; nothing to subscribe.
        Ok(())
    }

    fn render_content(&self) -> Result<(), MountError> {
        self.document
            .set_slot_text(&self.element_id, "h2", self.project.title())?;
        self.document
            .set_slot_text(&self.element_id, "h3", &self.effort_label())?;
        self.document
            .set_slot_text(&self.element_id, "p", self.project.description())
    }
}

impl DragSource for ProjectItem {
    fn start_payload(&self, transfer: &mut DataTransfer) {
        transfer.set_data(PLAIN_TEXT_MARKER, self.project.id().to_string());
        transfer.set_effect_allowed(DropEffect::Move);
    }

    fn on_drag_end(&self) {
        debug!(
            "event=drag_end module=view status=ok project_id={}",
            self.project.id()
        );
    }
}
