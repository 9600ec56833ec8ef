//! Condition types and evaluation.
//!
//! A condition is an optional secondary gate evaluated after the trigger
//! passes: it resolves a named context value and compares it against a
//! literal. String operators never fail; numeric operators fail the whole
//! execution when either side does not parse as a number.

use crate::context::ContextProvider;
use crate::error::ConditionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator for conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// String equality of both sides' display forms.
    Equals,
    /// String inequality of both sides' display forms.
    NotEquals,
    /// Numeric greater-than.
    Greater,
    /// Numeric less-than.
    Less,
    /// Substring test: the literal occurs within the actual value.
    Contains,
    /// Catch-all for unrecognized operator identifiers. Never passes.
    #[serde(other)]
    Unknown,
}

impl Default for ConditionOperator {
    fn default() -> Self {
        Self::Equals
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Greater => "greater",
            Self::Less => "less",
            Self::Contains => "contains",
            Self::Unknown => "unknown",
        };
        f.write_str(token)
    }
}

/// A condition specification within a workflow definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionSpec {
    /// The context key whose value is compared.
    pub value: String,
    /// The comparison operator.
    pub operator: ConditionOperator,
    /// The literal to compare against.
    pub compare: String,
}

impl ConditionSpec {
    /// Creates a condition.
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        operator: ConditionOperator,
        compare: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            operator,
            compare: compare.into(),
        }
    }
}

/// The result of evaluating a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionOutcome {
    /// Whether the condition held.
    pub passed: bool,
    /// The resolved context value, rendered for display.
    pub actual_value: String,
    /// The comparison that was applied, e.g. `"greater 10"`.
    pub expected: String,
}

/// Evaluates a condition against the given context.
///
/// # Errors
///
/// Returns [`ConditionError::NonNumeric`] when a `greater` or `less`
/// comparison encounters a side that does not parse as a number. The
/// engine converts this into a failed execution.
pub fn evaluate_condition(
    spec: &ConditionSpec,
    context: &dyn ContextProvider,
) -> Result<ConditionOutcome, ConditionError> {
    let actual = context.get(&spec.value);

    let passed = match spec.operator {
        ConditionOperator::Equals => actual.to_string() == spec.compare,
        ConditionOperator::NotEquals => actual.to_string() != spec.compare,
        ConditionOperator::Greater | ConditionOperator::Less => {
            let lhs = actual.as_number().ok_or_else(|| ConditionError::NonNumeric {
                value: actual.to_string(),
            })?;
            let rhs: f64 =
                spec.compare
                    .trim()
                    .parse()
                    .map_err(|_| ConditionError::NonNumeric {
                        value: spec.compare.clone(),
                    })?;
            if spec.operator == ConditionOperator::Greater {
                lhs > rhs
            } else {
                lhs < rhs
            }
        }
        ConditionOperator::Contains => actual.to_string().contains(&spec.compare),
        ConditionOperator::Unknown => false,
    };

    Ok(ConditionOutcome {
        passed,
        actual_value: actual.to_string(),
        expected: format!("{} {}", spec.operator, spec.compare),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimulatedContext;
    use chrono::Utc;

    #[test]
    fn equals_compares_display_forms() {
        let spec = ConditionSpec::new("status", ConditionOperator::Equals, "active");
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(outcome.passed);
        assert_eq!(outcome.actual_value, "active");
        assert_eq!(outcome.expected, "equals active");
    }

    #[test]
    fn not_equals() {
        let spec = ConditionSpec::new("status", ConditionOperator::NotEquals, "archived");
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(outcome.passed);
    }

    #[test]
    fn greater_compares_numerically() {
        let spec = ConditionSpec::new("count", ConditionOperator::Greater, "10");
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(outcome.passed);
    }

    #[test]
    fn less_fails_when_actual_is_larger() {
        let spec = ConditionSpec::new("temperature", ConditionOperator::Less, "32");
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(!outcome.passed);
    }

    #[test]
    fn contains_finds_weekday_name() {
        let weekday = Utc::now().format("%A").to_string();
        let spec = ConditionSpec::new("day", ConditionOperator::Contains, weekday);
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(outcome.passed);
    }

    #[test]
    fn numeric_operator_on_text_errors() {
        let spec = ConditionSpec::new("status", ConditionOperator::Greater, "10");
        let err = evaluate_condition(&spec, &SimulatedContext).unwrap_err();
        assert!(err.to_string().contains("active"));
    }

    #[test]
    fn non_numeric_literal_errors() {
        let spec = ConditionSpec::new("count", ConditionOperator::Less, "lots");
        let err = evaluate_condition(&spec, &SimulatedContext).unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn unknown_operator_never_passes() {
        let spec: ConditionSpec =
            serde_json::from_str(r#"{"value": "status", "operator": "matches", "compare": "x"}"#)
                .expect("deserialize");
        assert_eq!(spec.operator, ConditionOperator::Unknown);
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(!outcome.passed);
    }

    #[test]
    fn unrecognized_context_key_compares_against_unknown() {
        let spec = ConditionSpec::new("nonexistent", ConditionOperator::Equals, "unknown");
        let outcome = evaluate_condition(&spec, &SimulatedContext).expect("evaluate");
        assert!(outcome.passed);
    }
}
