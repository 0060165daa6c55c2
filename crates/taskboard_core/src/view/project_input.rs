//! Project input form.
//!
//! # Responsibility
//! - Gather title/description/effort from the mounted form.
//! - Validate every field and either create a project or alert the user.
//!
//! # Invariants
//! - Any failed constraint means no store mutation and untouched fields.
//! - Fields are cleared only after a successful add.
//! - User text is never written to logs; only field labels are.

use crate::model::project::{ProjectId, DESCRIPTION_MIN_LENGTH, EFFORT_MAX, EFFORT_MIN};
use crate::state::project_store::ProjectStore;
use crate::validation::rules::{coerce_number, violations, Validatable, Violation};
use crate::view::{
    Document, InsertPosition, MountError, MountRequest, MountableView, APP_HOST,
    PROJECT_INPUT_TEMPLATE,
};
use log::{info, warn};
use std::rc::Rc;

const INPUT_ELEMENT_ID: &str = "user-input";
const TITLE_FIELD: &str = "title";
const DESCRIPTION_FIELD: &str = "description";
const EFFORT_FIELD: &str = "effort";
const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again.";

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Added(ProjectId),
    Rejected(Vec<Violation>),
}

/// Form that creates projects.
pub struct ProjectInput {
    document: Rc<dyn Document>,
    store: Rc<ProjectStore>,
    element_id: String,
}

impl ProjectInput {
    /// Mounts the form at the start of the `app` host.
    pub fn mount(document: Rc<dyn Document>, store: Rc<ProjectStore>) -> Result<Self, MountError> {
        let element_id = document.mount(&MountRequest {
            template_id: PROJECT_INPUT_TEMPLATE,
            host_id: APP_HOST,
            position: InsertPosition::Start,
            element_id: Some(INPUT_ELEMENT_ID),
        })?;

        let input = Self {
            document,
            store,
            element_id,
        };
        input.configure()?;
        input.render_content()?;
        Ok(input)
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Writes raw text into the three form fields.
    pub fn fill(&self, title: &str, description: &str, effort: &str) -> Result<(), MountError> {
        self.document
            .set_field_value(&self.element_id, TITLE_FIELD, title)?;
        self.document
            .set_field_value(&self.element_id, DESCRIPTION_FIELD, description)?;
        self.document
            .set_field_value(&self.element_id, EFFORT_FIELD, effort)
    }

    /// Handles a form submit.
    pub fn submit(&self) -> Result<SubmitOutcome, MountError> {
        let title = self.document.field_value(&self.element_id, TITLE_FIELD)?;
        let description = self
            .document
            .field_value(&self.element_id, DESCRIPTION_FIELD)?;
        let effort = coerce_number(&self.document.field_value(&self.element_id, EFFORT_FIELD)?);

        let failed = gather_violations(&title, &description, effort);
        if !failed.is_empty() {
            let fields = failed
                .iter()
                .map(Violation::label)
                .collect::<Vec<_>>()
                .join(",");
            warn!(
                "event=submit_rejected module=view status=invalid fields={}",
                fields
            );
            let details = failed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            self.document
                .alert(&format!("{INVALID_INPUT_MESSAGE} ({details})"));
            return Ok(SubmitOutcome::Rejected(failed));
        }

        let id = self.store.add_project(title, description, effort);
        self.clear_input()?;
        info!(
            "event=submit_accepted module=view status=ok project_id={}",
            id
        );
        Ok(SubmitOutcome::Added(id))
    }

    fn clear_input(&self) -> Result<(), MountError> {
        self.fill("", "", "")
    }
}

impl MountableView for ProjectInput {
    fn configure(&self) -> Result<(), MountError> {
        Ok(())
    }

    fn render_content(&self) -> Result<(), MountError> {
        Ok(())
    }
}

/// Applies the form's constraint sets to raw field values.
pub fn gather_violations(title: &str, description: &str, effort: f64) -> Vec<Violation> {
    let inputs = [
        Validatable::text(TITLE_FIELD, title).required(),
        Validatable::text(DESCRIPTION_FIELD, description)
            .required()
            .min_length(DESCRIPTION_MIN_LENGTH),
        Validatable::number(EFFORT_FIELD, effort)
            .required()
            .min(EFFORT_MIN)
            .max(EFFORT_MAX),
    ];
    inputs.iter().flat_map(violations).collect()
}

#[cfg(test)]
mod tests {
    use super::gather_violations;
    use crate::validation::rules::Violation;

    #[test]
    fn empty_form_fails_every_field() {
        let failed = gather_violations("", "ok", 0.0);
        assert_eq!(
            failed,
            vec![
                Violation::Required { label: "title" },
                Violation::TooShort {
                    label: "description",
                    min_length: 5
                },
                Violation::BelowMin {
                    label: "effort",
                    min: 1.0
                },
            ]
        );
    }

    #[test]
    fn valid_form_has_no_violations() {
        assert!(gather_violations("Build API", "Implement REST endpoints", 15.0).is_empty());
    }
}
