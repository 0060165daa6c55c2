//! View components and the mounting collaborator they render through.
//!
//! # Responsibility
//! - Define the `Document` contract: template mounting, slot updates, form
//!   fields and the blocking user alert.
//! - Provide the input form, project lists and project items wired to the
//!   shared store.
//!
//! # Invariants
//! - Views never mutate project state directly; they call store operations.
//! - Every view holds the store by reference counting, never by global lookup.

pub mod board;
pub mod memory;
pub mod project_input;
pub mod project_item;
pub mod project_list;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Root host the board mounts into.
pub const APP_HOST: &str = "app";
/// Template of the project input form.
pub const PROJECT_INPUT_TEMPLATE: &str = "project-input";
/// Template of one status list.
pub const PROJECT_LIST_TEMPLATE: &str = "project-list";
/// Template of one rendered project.
pub const PROJECT_ITEM_TEMPLATE: &str = "single-project";
/// Class marking a list region as a valid drop site.
pub const DROPPABLE_CLASS: &str = "droppable";

/// Where a mounted element is attached inside its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Start,
    End,
}

/// One mount call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountRequest<'a> {
    pub template_id: &'a str,
    pub host_id: &'a str,
    pub position: InsertPosition,
    /// Overrides the generated element id when set.
    pub element_id: Option<&'a str>,
}

/// Mounting collaborator errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    UnknownTemplate(String),
    UnknownHost(String),
    UnknownElement(String),
    UnknownSlot { element_id: String, slot: String },
    UnknownField { element_id: String, field: String },
    /// The requested element id already names a host region.
    DuplicateElementId(String),
}

impl Display for MountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTemplate(id) => write!(f, "template not found: {id}"),
            Self::UnknownHost(id) => write!(f, "host element not found: {id}"),
            Self::UnknownElement(id) => write!(f, "element not found: {id}"),
            Self::UnknownSlot { element_id, slot } => {
                write!(f, "slot `{slot}` not found in element {element_id}")
            }
            Self::UnknownField { element_id, field } => {
                write!(f, "field `{field}` not found in element {element_id}")
            }
            Self::DuplicateElementId(id) => write!(f, "element id already names a host: {id}"),
        }
    }
}

impl Error for MountError {}

/// View-mounting collaborator.
///
/// Elements are addressed by id; each template exposes named child slots
/// (text, id and class lists) and named form fields.
pub trait Document {
    /// Instantiates a template into a host and returns the element id.
    ///
    /// Mounting with an id that is already in use moves the element: the old
    /// instance is detached from its host first.
    fn mount(&self, request: &MountRequest<'_>) -> Result<String, MountError>;

    fn set_slot_text(&self, element_id: &str, slot: &str, text: &str) -> Result<(), MountError>;

    /// Assigns an id to a slot, making it addressable as a host.
    fn set_slot_id(&self, element_id: &str, slot: &str, slot_id: &str) -> Result<(), MountError>;

    fn add_slot_class(&self, element_id: &str, slot: &str, class: &str)
        -> Result<(), MountError>;

    fn remove_slot_class(
        &self,
        element_id: &str,
        slot: &str,
        class: &str,
    ) -> Result<(), MountError>;

    fn field_value(&self, element_id: &str, field: &str) -> Result<String, MountError>;

    fn set_field_value(&self, element_id: &str, field: &str, value: &str)
        -> Result<(), MountError>;

    /// Unmounts every element attached to `host_id`.
    fn clear_children(&self, host_id: &str) -> Result<(), MountError>;

    /// Blocking user notification.
    fn alert(&self, message: &str);
}

/// Two-step rendering contract shared by all views.
pub trait MountableView {
    /// Wires handlers and subscriptions. Called once after mounting.
    fn configure(&self) -> Result<(), MountError>;

    /// Writes the view's own content into its slots.
    fn render_content(&self) -> Result<(), MountError>;
}
