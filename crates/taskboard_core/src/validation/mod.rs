//! Field validation contracts consumed by the input form.
//!
//! Pure predicates only: no side effects, no error values. Constraints that do
//! not apply to the value's type are skipped rather than failed.

pub mod rules;
