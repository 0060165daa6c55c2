//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record shared by store and views.
//! - Provide the person-day/person-month effort display transform.
//!
//! # Invariants
//! - `id` is generated once at creation and never reused.
//! - `status` only changes through `ProjectStore::move_project`.
//! - Construction is crate-private: projects only come from the store.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one project.
pub type ProjectId = Uuid;

/// Minimum description length accepted by the input form.
pub const DESCRIPTION_MIN_LENGTH: usize = 5;
/// Inclusive lower bound for effort, in person-days.
pub const EFFORT_MIN: f64 = 1.0;
/// Inclusive upper bound for effort, in person-days.
pub const EFFORT_MAX: f64 = 1000.0;
/// Efforts at or above this many person-days display as person-months.
pub const PERSON_MONTH_THRESHOLD: f64 = 20.0;

/// Board column a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl ProjectStatus {
    /// Stable lowercase id used in element ids and CLI input.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// Parses the lowercase id produced by [`ProjectStatus::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work tracked by the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    /// Person-days.
    effort: f64,
    status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated id.
    pub(crate) fn new(title: impl Into<String>, description: impl Into<String>, effort: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            effort,
            status: ProjectStatus::Active,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn effort(&self) -> f64 {
        self.effort
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the unit-aware effort presentation for rendering.
    pub fn effort_display(&self) -> EffortDisplay {
        EffortDisplay::from_effort(self.effort)
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}

/// Effort rendered in the unit a reader expects.
///
/// Pure presentation; the stored value is always person-days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffortDisplay {
    PersonDays(f64),
    PersonMonths(f64),
}

impl EffortDisplay {
    pub fn from_effort(effort: f64) -> Self {
        if effort < PERSON_MONTH_THRESHOLD {
            Self::PersonDays(effort)
        } else {
            Self::PersonMonths(effort / PERSON_MONTH_THRESHOLD)
        }
    }
}

impl Display for EffortDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonDays(days) => write!(f, "{days} person-days"),
            Self::PersonMonths(months) => write!(f, "{months} person-months"),
        }
    }
}
