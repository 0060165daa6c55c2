//! Observable in-memory board state.
//!
//! # Responsibility
//! - Own the authoritative project collection.
//! - Propagate every visible change to subscribed views.
//!
//! # Invariants
//! - The store is the only writer of project state.
//! - Listeners always receive an independent snapshot.
//! - No interior borrow is held while listeners run.

pub mod listener;
pub mod project_store;
