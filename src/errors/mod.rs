use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Failures a caller is expected to tell apart and report to the user.
///
/// Storage and pool failures travel as plain `anyhow::Error` with context;
/// these variants ride inside the same `anyhow::Error` and are recovered
/// with `downcast_ref` where the distinction matters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("the entered scoreline does not produce a win or a loss (two sets won)")]
    IncompleteScoreline,

    #[error("no authenticated user")]
    MissingIdentity,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("this email is already registered")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("match {0} not found")]
    MatchNotFound(i64),
}

impl From<ValidationErrors> for TrackerError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_validation_errors("", &errors, &mut details);
        details.sort();
        Self::InvalidInput(details.join(", "))
    }
}

fn collect_validation_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => out.extend(list.iter().map(|e| {
                format!(
                    "{}: {}",
                    path,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })),
            ValidationErrorsKind::Struct(inner) => collect_validation_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// Context for failures on a storage operation
pub fn storage_context(operation: &str, entity: &str) -> String {
    format!("Failed to {} {}", operation, entity)
}

/// Returns the domain error carried by an `anyhow::Error`, if any
pub fn tracker_error(error: &anyhow::Error) -> Option<&TrackerError> {
    error.downcast_ref::<TrackerError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_error_survives_anyhow_wrapping() {
        let err = anyhow::Error::new(TrackerError::MatchNotFound(7));
        assert_eq!(tracker_error(&err), Some(&TrackerError::MatchNotFound(7)));
    }

    #[test]
    fn test_tracker_error_absent_for_other_errors() {
        let err = anyhow::anyhow!("disk on fire");
        assert!(tracker_error(&err).is_none());
    }

    #[test]
    fn test_validation_errors_become_invalid_input() {
        let mut errors = ValidationErrors::new();
        let mut error = validator::ValidationError::new("range");
        error.message = Some("month must be between 1 and 12".into());
        errors.add("month", error);

        assert_eq!(
            TrackerError::from(errors),
            TrackerError::InvalidInput("month: month must be between 1 and 12".to_string())
        );
    }

    #[test]
    fn test_storage_context_message() {
        assert_eq!(storage_context("insert", "match"), "Failed to insert match");
    }
}
