//! Drag-and-drop status-transition protocol.
//!
//! # Responsibility
//! - Define the gesture payload carried from a project item to a list.
//! - Drive the `Idle -> Dragging -> DropAccepted|DropRejected -> Idle` machine.
//!
//! # Invariants
//! - The payload is a single `text/plain` entry holding the project id.
//! - A drop only reaches a target that accepted the latest drag-over.
//! - Only `move` is an allowed effect for project drags.

pub mod gesture;
pub mod transfer;
