//! Drag gesture state machine and the two capability contracts.
//!
//! # Invariants
//! - `start` is only legal from `Idle`; `end` always returns to `Idle`.
//! - `drop_on` calls `DropTarget::on_drop` only when that same target
//!   accepted the latest drag-over; otherwise the gesture ends rejected.
//! - `leave` always clears the target affordance.

use crate::dnd::transfer::DataTransfer;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Drag source capability (rendered project items).
pub trait DragSource {
    /// Writes the payload and allowed effect at drag start.
    fn start_payload(&self, transfer: &mut DataTransfer);

    /// Called once the gesture is over, whatever its outcome.
    fn on_drag_end(&self) {}
}

/// Drop target capability (project lists).
pub trait DropTarget {
    /// Stable id distinguishing this target from other targets.
    fn target_id(&self) -> &str;

    /// Whether a gesture carrying `transfer` may drop here.
    fn accepts(&self, transfer: &DataTransfer) -> bool;

    /// Applies the droppable affordance after an accepting drag-over.
    fn on_accept(&self);

    /// Handles an accepted drop.
    fn on_drop(&self, transfer: &DataTransfer);

    /// Removes the droppable affordance.
    fn on_leave(&self);
}

/// Gesture lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    DropAccepted,
    DropRejected,
}

/// Protocol misuse on the gesture driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// A new drag was started while another gesture was in flight.
    AlreadyDragging(DragPhase),
    /// Drag-over or drop outside of the `Dragging` phase.
    NotDragging(DragPhase),
    /// Leave or end while no gesture was in flight.
    NotStarted,
}

impl Display for GestureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDragging(phase) => {
                write!(f, "drag already in progress (phase {phase:?})")
            }
            Self::NotDragging(phase) => write!(f, "no active drag (phase {phase:?})"),
            Self::NotStarted => write!(f, "no drag gesture was started"),
        }
    }
}

impl Error for GestureError {}

/// Driver for one drag gesture at a time.
#[derive(Debug)]
pub struct DragGesture {
    phase: DragPhase,
    transfer: DataTransfer,
    accepted_by: Option<String>,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            transfer: DataTransfer::new(),
            accepted_by: None,
        }
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn transfer(&self) -> &DataTransfer {
        &self.transfer
    }

    /// Starts a drag from a board item.
    pub fn start(&mut self, source: &dyn DragSource) -> Result<(), GestureError> {
        self.begin()?;
        source.start_payload(&mut self.transfer);
        debug!(
            "event=drag_start module=dnd status=ok types={:?}",
            self.transfer.types()
        );
        Ok(())
    }

    /// Starts a drag whose payload was produced outside the board.
    pub fn start_external(&mut self, transfer: DataTransfer) -> Result<(), GestureError> {
        self.begin()?;
        self.transfer = transfer;
        debug!(
            "event=drag_start module=dnd status=ok source=external types={:?}",
            self.transfer.types()
        );
        Ok(())
    }

    /// Moves the gesture over `target`; returns whether the target accepts.
    pub fn drag_over(&mut self, target: &dyn DropTarget) -> Result<bool, GestureError> {
        self.require_dragging()?;
        if target.accepts(&self.transfer) {
            target.on_accept();
            self.accepted_by = Some(target.target_id().to_string());
            return Ok(true);
        }

        if self.accepted_by.as_deref() == Some(target.target_id()) {
            self.accepted_by = None;
        }
        Ok(false)
    }

    /// Releases the gesture over `target`.
    pub fn drop_on(&mut self, target: &dyn DropTarget) -> Result<DragPhase, GestureError> {
        self.require_dragging()?;
        if self.accepted_by.as_deref() == Some(target.target_id()) {
            target.on_drop(&self.transfer);
            self.phase = DragPhase::DropAccepted;
        } else {
            self.phase = DragPhase::DropRejected;
        }
        debug!(
            "event=drop module=dnd status=ok target={} phase={:?}",
            target.target_id(),
            self.phase
        );
        Ok(self.phase)
    }

    /// Leaves `target`, clearing its affordance.
    pub fn leave(&mut self, target: &dyn DropTarget) -> Result<(), GestureError> {
        if self.phase == DragPhase::Idle {
            return Err(GestureError::NotStarted);
        }
        target.on_leave();
        if self.accepted_by.as_deref() == Some(target.target_id()) {
            self.accepted_by = None;
        }
        Ok(())
    }

    /// Finishes the gesture and returns the phase it ended in.
    ///
    /// A gesture ended while still `Dragging` counts as rejected.
    pub fn end(&mut self, source: Option<&dyn DragSource>) -> Result<DragPhase, GestureError> {
        let outcome = match self.phase {
            DragPhase::Idle => return Err(GestureError::NotStarted),
            DragPhase::Dragging => DragPhase::DropRejected,
            finished => finished,
        };
        if let Some(source) = source {
            source.on_drag_end();
        }
        self.phase = DragPhase::Idle;
        self.accepted_by = None;
        self.transfer.clear();
        Ok(outcome)
    }

    fn begin(&mut self) -> Result<(), GestureError> {
        if self.phase != DragPhase::Idle {
            return Err(GestureError::AlreadyDragging(self.phase));
        }
        self.transfer.clear();
        self.accepted_by = None;
        self.phase = DragPhase::Dragging;
        Ok(())
    }

    fn require_dragging(&self) -> Result<(), GestureError> {
        match self.phase {
            DragPhase::Dragging => Ok(()),
            other => Err(GestureError::NotDragging(other)),
        }
    }
}
