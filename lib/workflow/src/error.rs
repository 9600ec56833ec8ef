//! Error types for the workflow crate.
//!
//! The error surface is deliberately small: every recoverable failure in
//! the pipeline is represented as data in the execution record, not as an
//! error. Only referencing an unknown workflow crosses the engine
//! boundary as an error value, and condition evaluation reports its one
//! fallible case for the engine to fold into a failed record.

use flowmate_core::WorkflowId;
use std::fmt;

/// Errors from condition evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// A numeric comparison encountered a side that does not parse as a
    /// number.
    NonNumeric {
        /// The offending value, rendered for display.
        value: String,
    },
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNumeric { value } => {
                write!(f, "non-numeric value in comparison: '{value}'")
            }
        }
    }
}

impl std::error::Error for ConditionError {}

/// Errors from engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No workflow with the given ID is loaded.
    WorkflowNotFound {
        /// The unknown ID.
        workflow_id: WorkflowId,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkflowNotFound { workflow_id } => {
                write!(f, "workflow not found: {workflow_id}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_error_display() {
        let err = ConditionError::NonNumeric {
            value: "active".to_string(),
        };
        assert!(err.to_string().contains("non-numeric"));
        assert!(err.to_string().contains("active"));
    }

    #[test]
    fn engine_error_display() {
        let workflow_id = WorkflowId::new();
        let err = EngineError::WorkflowNotFound { workflow_id };
        assert!(err.to_string().contains("workflow not found"));
        assert!(err.to_string().contains(&workflow_id.to_string()));
    }
}
