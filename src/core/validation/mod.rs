//! Validation of incoming payloads
//!
//! Field-level rules come from `validator` derives on the payload types;
//! cross-field rules are plain functions returning [`FieldError`]s. Both are
//! collected into one [`ValidationProblem`] so clients see every violation at
//! once.

pub mod extractor;

pub use extractor::{ResourcePath, ResourceQuery, ValidatedJson};

use indexmap::IndexMap;
use thiserror::Error;

/// One violated rule, keyed by the offending field (or by the payload name for
/// cross-field rules)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in a payload, grouped by key in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationProblem {
    errors: IndexMap<String, Vec<String>>,
}

impl ValidationProblem {
    /// Group field errors; `None` when there are none
    pub fn from_errors(errors: impl IntoIterator<Item = FieldError>) -> Option<Self> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for error in errors {
            grouped.entry(error.field).or_default().push(error.message);
        }
        (!grouped.is_empty()).then_some(Self { errors: grouped })
    }

    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    pub fn messages_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

/// A payload that can report all of its rule violations
pub trait Validatable {
    fn validate_fields(&self) -> Vec<FieldError>;

    fn check(&self) -> Result<(), ValidationProblem> {
        match ValidationProblem::from_errors(self.validate_fields()) {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

/// Flatten `validator` field errors into [`FieldError`]s
///
/// Keys are the camelCase wire names, prefixed with `prefix` when the payload
/// is nested (e.g. `courses[0].`). Output is sorted by key so responses are
/// stable.
pub fn collect_field_errors(errors: &validator::ValidationErrors, prefix: &str) -> Vec<FieldError> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let key = format!("{prefix}{}", to_camel_case(&field.to_string()));
            let messages = field_errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("The {key} field is invalid."),
                })
                .collect();
            (key, messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(key, messages)| {
            messages
                .into_iter()
                .map(move |message| FieldError::new(key.clone(), message))
        })
        .collect()
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
