//! Board root: mounts the form and both lists around one shared store.
//!
//! # Responsibility
//! - Own the single store of the board and hand it to every view.
//! - Drive complete drag gestures between the two lists.
//!
//! # Invariants
//! - All views of one board observe the same store instance.
//! - The input form is mounted before the lists; lists mount active first.

use crate::dnd::gesture::{DragGesture, DragPhase, DragSource, GestureError};
use crate::model::project::{ProjectId, ProjectStatus};
use crate::state::project_store::ProjectStore;
use crate::view::project_input::ProjectInput;
use crate::view::project_item::ProjectItem;
use crate::view::project_list::ProjectList;
use crate::view::{Document, MountError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Board-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Mount(MountError),
    Gesture(GestureError),
    /// No list currently renders the project, so there is nothing to drag.
    ItemNotRendered(ProjectId),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mount(err) => write!(f, "{err}"),
            Self::Gesture(err) => write!(f, "{err}"),
            Self::ItemNotRendered(id) => write!(f, "project is not rendered: {id}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mount(err) => Some(err),
            Self::Gesture(err) => Some(err),
            Self::ItemNotRendered(_) => None,
        }
    }
}

impl From<MountError> for BoardError {
    fn from(value: MountError) -> Self {
        Self::Mount(value)
    }
}

impl From<GestureError> for BoardError {
    fn from(value: GestureError) -> Self {
        Self::Gesture(value)
    }
}

/// Mounted task board.
pub struct Board {
    store: Rc<ProjectStore>,
    input: ProjectInput,
    active: Rc<ProjectList>,
    finished: Rc<ProjectList>,
}

impl Board {
    /// Mounts a board backed by a fresh store.
    pub fn mount(document: Rc<dyn Document>) -> Result<Self, BoardError> {
        Self::mount_with_store(document, Rc::new(ProjectStore::new()))
    }

    /// Mounts a board backed by `store`.
    pub fn mount_with_store(
        document: Rc<dyn Document>,
        store: Rc<ProjectStore>,
    ) -> Result<Self, BoardError> {
        let input = ProjectInput::mount(Rc::clone(&document), Rc::clone(&store))?;
        let active = ProjectList::mount(
            Rc::clone(&document),
            Rc::clone(&store),
            ProjectStatus::Active,
        )?;
        let finished = ProjectList::mount(document, Rc::clone(&store), ProjectStatus::Finished)?;

        Ok(Self {
            store,
            input,
            active,
            finished,
        })
    }

    pub fn store(&self) -> Rc<ProjectStore> {
        Rc::clone(&self.store)
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn list(&self, status: ProjectStatus) -> &Rc<ProjectList> {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// Drags the rendered project `id` onto the list for `to`.
    ///
    /// Runs the whole gesture: start on the item, drag-over, drop and leave
    /// on the target list, then end. Returns the phase the drop ended in.
    pub fn drag_project(&self, id: ProjectId, to: ProjectStatus) -> Result<DragPhase, BoardError> {
        let item = self
            .active
            .item(id)
            .or_else(|| self.finished.item(id))
            .ok_or(BoardError::ItemNotRendered(id))?;
        let source: &ProjectItem = &item;
        let target: &ProjectList = self.list(to);

        let mut gesture = DragGesture::new();
        gesture.start(source)?;
        gesture.drag_over(target)?;
        gesture.drop_on(target)?;
        gesture.leave(target)?;
        Ok(gesture.end(Some(source as &dyn DragSource))?)
    }
}
