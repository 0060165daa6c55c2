//! Authoritative project store.
//!
//! # Responsibility
//! - Create projects and apply status transitions.
//! - Broadcast a full-collection snapshot after every visible change.
//!
//! # Invariants
//! - Insertion order is preserved; projects are never removed.
//! - Ids are unique within the collection.
//! - A move to the current status is a no-op and does not notify.
//! - A move for an unknown id is a silent no-op.
//! - The store performs no input validation; callers validate first.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::listener::{ListenerRegistry, NotifyReport};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static SHARED_STORE: Rc<ProjectStore> = Rc::new(ProjectStore::new());
}

/// Result of one `move_project` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Status changed and listeners were notified.
    Moved {
        from: ProjectStatus,
        to: ProjectStatus,
    },
    /// Project already had the requested status.
    Unchanged,
    /// No project with that id exists.
    NotFound,
}

/// In-memory project collection with listener propagation.
#[derive(Default)]
pub struct ProjectStore {
    projects: RefCell<Vec<Project>>,
    listeners: ListenerRegistry<Project>,
}

impl ProjectStore {
    /// Creates an empty store. Boards construct exactly one and share it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared store of the current thread, created on first use.
    ///
    /// Every call on one thread returns the same instance.
    pub fn shared() -> Rc<ProjectStore> {
        SHARED_STORE.with(Rc::clone)
    }

    /// Registers a listener for full-collection snapshots.
    pub fn subscribe(&self, listener: impl Fn(Vec<Project>) + 'static) {
        self.listeners.subscribe(listener);
        debug!(
            "event=listener_subscribed module=store status=ok listeners={}",
            self.listeners.len()
        );
    }

    /// Appends a new active project and notifies listeners.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        effort: f64,
    ) -> ProjectId {
        let project = Project::new(title, description, effort);
        let id = project.id();

        let snapshot = {
            let mut projects = self.projects.borrow_mut();
            projects.push(project);
            projects.clone()
        };

        info!(
            "event=project_added module=store status=ok project_id={} total={}",
            id,
            snapshot.len()
        );
        self.broadcast(&snapshot);
        id
    }

    /// Moves one project to `new_status`, notifying only on a real change.
    pub fn move_project(&self, id: ProjectId, new_status: ProjectStatus) -> MoveOutcome {
        let (from, snapshot) = {
            let mut projects = self.projects.borrow_mut();
            let Some(project) = projects.iter_mut().find(|project| project.id() == id) else {
                debug!(
                    "event=project_move module=store status=skipped reason=not_found project_id={}",
                    id
                );
                return MoveOutcome::NotFound;
            };

            let from = project.status();
            if from == new_status {
                debug!(
                    "event=project_move module=store status=skipped reason=unchanged project_id={} status={}",
                    id, new_status
                );
                return MoveOutcome::Unchanged;
            }

            project.set_status(new_status);
            (from, projects.clone())
        };

        info!(
            "event=project_move module=store status=ok project_id={} from={} to={}",
            id, from, new_status
        );
        self.broadcast(&snapshot);
        MoveOutcome::Moved {
            from,
            to: new_status,
        }
    }

    /// Returns a snapshot of every project in insertion order.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Returns a copy of one project.
    pub fn get(&self, id: ProjectId) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|project| project.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn broadcast(&self, snapshot: &[Project]) {
        let NotifyReport { delivered, failed } = self.listeners.notify_all(snapshot);
        if failed > 0 {
            warn!(
                "event=store_notify module=store status=degraded delivered={} failed={}",
                delivered, failed
            );
        }
    }
}
