//! Core of the task board: project store, validation, drag-and-drop protocol
//! and the views that render the board through a mounting collaborator.
//! This crate is the single owner of board invariants.

pub mod dnd;
pub mod logging;
pub mod model;
pub mod state;
pub mod validation;
pub mod view;

pub use dnd::gesture::{DragGesture, DragPhase, DragSource, DropTarget, GestureError};
pub use dnd::transfer::{DataTransfer, DropEffect, PLAIN_TEXT_MARKER};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{EffortDisplay, Project, ProjectId, ProjectStatus};
pub use state::listener::{ListenerRegistry, NotifyReport};
pub use state::project_store::{MoveOutcome, ProjectStore};
pub use validation::rules::{coerce_number, validate, violations, FieldValue, Validatable, Violation};
pub use view::board::{Board, BoardError};
pub use view::memory::{MemoryDocument, TemplateSpec};
pub use view::project_input::{ProjectInput, SubmitOutcome};
pub use view::project_item::ProjectItem;
pub use view::project_list::ProjectList;
pub use view::{Document, InsertPosition, MountError, MountRequest, MountableView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
