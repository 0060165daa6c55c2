//! Board domain model.
//!
//! # Responsibility
//! - Define the project record rendered by the active/finished lists.
//! - Keep display transforms (effort units) out of stored state.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Projects are never deleted; status is the only mutable field.

pub mod project;
