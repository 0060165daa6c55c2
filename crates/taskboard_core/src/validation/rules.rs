//! Constraint-set predicate over one labelled form value.
//!
//! # Invariants
//! - Absent constraints are vacuously satisfied.
//! - `required` only inspects text; numbers always pass it.
//! - Length bounds only inspect text, numeric bounds only inspect numbers.
//!   A length bound on a number (or a numeric bound on text) is ignored.
//! - `validate(v) == violations(v).is_empty()`.

use std::fmt::{Display, Formatter};

/// Raw form value under validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

/// One value plus its optional constraint set.
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    /// Field label used in violation messages.
    pub label: &'static str,
    pub value: FieldValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Inclusive.
    pub min: Option<f64>,
    /// Inclusive.
    pub max: Option<f64>,
}

impl Validatable {
    /// Creates an unconstrained text value.
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self::unconstrained(label, FieldValue::Text(value.into()))
    }

    /// Creates an unconstrained numeric value.
    pub fn number(label: &'static str, value: f64) -> Self {
        Self::unconstrained(label, FieldValue::Number(value))
    }

    fn unconstrained(label: &'static str, value: FieldValue) -> Self {
        Self {
            label,
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Required { label: &'static str },
    TooShort { label: &'static str, min_length: usize },
    TooLong { label: &'static str, max_length: usize },
    BelowMin { label: &'static str, min: f64 },
    AboveMax { label: &'static str, max: f64 },
}

impl Violation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Required { label }
            | Self::TooShort { label, .. }
            | Self::TooLong { label, .. }
            | Self::BelowMin { label, .. }
            | Self::AboveMax { label, .. } => label,
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required { label } => write!(f, "{label} is required"),
            Self::TooShort { label, min_length } => {
                write!(f, "{label} must be at least {min_length} characters")
            }
            Self::TooLong { label, max_length } => {
                write!(f, "{label} must be at most {max_length} characters")
            }
            Self::BelowMin { label, min } => write!(f, "{label} must be >= {min}"),
            Self::AboveMax { label, max } => write!(f, "{label} must be <= {max}"),
        }
    }
}

/// Returns whether every present constraint holds.
pub fn validate(input: &Validatable) -> bool {
    violations(input).is_empty()
}

/// Lists every failed constraint in declaration order.
pub fn violations(input: &Validatable) -> Vec<Violation> {
    let label = input.label;
    let mut failed = Vec::new();

    match &input.value {
        FieldValue::Text(text) => {
            if input.required && text.trim().is_empty() {
                failed.push(Violation::Required { label });
            }
            let length = text.chars().count();
            if let Some(min_length) = input.min_length {
                if length < min_length {
                    failed.push(Violation::TooShort { label, min_length });
                }
            }
            if let Some(max_length) = input.max_length {
                if length > max_length {
                    failed.push(Violation::TooLong { label, max_length });
                }
            }
        }
        FieldValue::Number(number) => {
            // NaN compares false against both bounds, so it fails any present bound.
            if let Some(min) = input.min {
                if !(*number >= min) {
                    failed.push(Violation::BelowMin { label, min });
                }
            }
            if let Some(max) = input.max {
                if !(*number <= max) {
                    failed.push(Violation::AboveMax { label, max });
                }
            }
        }
    }

    failed
}

/// Coerces numeric form text: blank is `0`, unparsable text is `NaN`.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
