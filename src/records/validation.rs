use serde::Serialize;
use thiserror::Error;
use validator::ValidateEmail;

/// A single rule a field value must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    Required,
    /// Inclusive character-count window.
    Length { min: usize, max: usize },
    /// Inclusive integer range.
    Range { min: i64, max: i64 },
    Email,
}

impl Constraint {
    fn rule(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::Length { .. } => "length",
            Constraint::Range { .. } => "range",
            Constraint::Email => "email",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(Option<i64>),
}

pub struct FieldCheck<'a> {
    pub field: &'static str,
    pub value: FieldValue<'a>,
    pub constraints: &'static [Constraint],
}

impl<'a> FieldCheck<'a> {
    pub fn text(
        field: &'static str,
        value: Option<&'a str>,
        constraints: &'static [Constraint],
    ) -> Self {
        Self {
            field,
            value: FieldValue::Text(value),
            constraints,
        }
    }

    pub fn integer(
        field: &'static str,
        value: Option<i64>,
        constraints: &'static [Constraint],
    ) -> Self {
        Self {
            field,
            value: FieldValue::Integer(value),
            constraints,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("validation failed: {}", summary(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(
        field: impl Into<String>,
        rule: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                rule,
                message: message.into(),
            }],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.rule))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs every check and collects all violations. A missing value reports only
/// the `Required` violation for that field.
pub fn validate(checks: &[FieldCheck<'_>]) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    for check in checks {
        for constraint in check.constraints {
            if let Some(message) = violation_message(constraint, check.value) {
                violations.push(FieldViolation {
                    field: check.field.to_string(),
                    rule: constraint.rule(),
                    message,
                });
                if matches!(constraint, Constraint::Required) {
                    break;
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn violation_message(constraint: &Constraint, value: FieldValue<'_>) -> Option<String> {
    match (constraint, value) {
        (Constraint::Required, FieldValue::Text(None))
        | (Constraint::Required, FieldValue::Integer(None)) => Some("field required".to_string()),
        (Constraint::Required, _) => None,
        (Constraint::Length { min, max }, FieldValue::Text(Some(text))) => {
            let len = text.chars().count();
            if len < *min {
                Some(format!("must be at least {min} characters, got {len}"))
            } else if len > *max {
                Some(format!("must be at most {max} characters, got {len}"))
            } else {
                None
            }
        }
        (Constraint::Range { min, max }, FieldValue::Integer(Some(n))) => {
            if n < *min || n > *max {
                Some(format!("must be between {min} and {max}, got {n}"))
            } else {
                None
            }
        }
        (Constraint::Email, FieldValue::Text(Some(text))) => {
            if text.validate_email() {
                None
            } else {
                Some("value is not a valid email address".to_string())
            }
        }
        // Absent values are reported by `Required`; mismatched kinds never pair up.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 2, max: 100 }];
    const EMAIL: &[Constraint] = &[Constraint::Required, Constraint::Email];
    const RATING: &[Constraint] = &[Constraint::Required, Constraint::Range { min: 1, max: 5 }];

    #[test]
    fn accepts_values_on_inclusive_bounds() {
        let two = "ab";
        let hundred = "x".repeat(100);
        assert!(validate(&[FieldCheck::text("name", Some(two), NAME)]).is_ok());
        assert!(validate(&[FieldCheck::text("name", Some(&hundred), NAME)]).is_ok());
        assert!(validate(&[FieldCheck::integer("rating", Some(1), RATING)]).is_ok());
        assert!(validate(&[FieldCheck::integer("rating", Some(5), RATING)]).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // two characters, four bytes
        assert!(validate(&[FieldCheck::text("name", Some("éé"), NAME)]).is_ok());
    }

    #[test]
    fn collects_every_violation_in_field_order() {
        let err = validate(&[
            FieldCheck::text("name", Some("A"), NAME),
            FieldCheck::text("email", Some("invalid-email"), EMAIL),
            FieldCheck::integer("rating", Some(6), RATING),
        ])
        .unwrap_err();

        assert_eq!(err.fields(), vec!["name", "email", "rating"]);
        assert_eq!(err.violations[0].rule, "length");
        assert_eq!(err.violations[1].rule, "email");
        assert_eq!(err.violations[2].rule, "range");
    }

    #[test]
    fn missing_value_reports_required_only() {
        let err = validate(&[FieldCheck::text("email", None, EMAIL)]).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, "required");
        assert_eq!(err.violations[0].message, "field required");
    }

    #[test]
    fn out_of_range_is_rejected_not_clamped() {
        let err = validate(&[FieldCheck::integer("rating", Some(0), RATING)]).unwrap_err();
        assert_eq!(err.violations[0].message, "must be between 1 and 5, got 0");
    }

    #[test]
    fn display_lists_fields_and_rules() {
        let err = validate(&[FieldCheck::text("name", Some(""), NAME)]).unwrap_err();
        assert_eq!(err.to_string(), "validation failed: name (length)");
    }
}
