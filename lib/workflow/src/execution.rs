//! Execution records.
//!
//! Every `execute_workflow` call produces exactly one [`ExecutionRecord`]:
//! the ordered audit trail of the stages that ran, the terminal status,
//! and timing. Records are immutable once constructed; the engine appends
//! them to its in-memory history (trigger skips excepted; see the engine
//! module).

use crate::action::ActionOutcome;
use crate::condition::ConditionOutcome;
use crate::definition::Workflow;
use crate::trigger::TriggerOutcome;
use chrono::{DateTime, Utc};
use flowmate_core::{ExecutionId, WorkflowId};
use serde::{Deserialize, Serialize};

/// Terminal status of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// The action ran and reported success.
    Success,
    /// The action reported failure, or the pipeline aborted.
    Failed,
    /// A gate (trigger or condition) did not pass; no action ran.
    Skipped,
}

/// The outcome of one pipeline stage, tagged by stage name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepRecord {
    /// Trigger evaluation.
    Trigger {
        /// The evaluation outcome.
        result: TriggerOutcome,
    },
    /// Condition evaluation.
    Condition {
        /// The evaluation outcome.
        result: ConditionOutcome,
    },
    /// Action execution.
    Action {
        /// The handler's outcome.
        result: ActionOutcome,
    },
}

impl StepRecord {
    /// Returns the stage name.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Trigger { .. } => "trigger",
            Self::Condition { .. } => "condition",
            Self::Action { .. } => "action",
        }
    }
}

/// The audit trail of one workflow execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Unique identifier for this execution.
    pub id: ExecutionId,
    /// The executed workflow.
    pub workflow_id: WorkflowId,
    /// The workflow's display name at execution time.
    pub flow_name: String,
    /// When the execution started.
    pub started_at: DateTime<Utc>,
    /// Per-stage outcomes, in pipeline order.
    pub steps: Vec<StepRecord>,
    /// Terminal status.
    pub status: ExecutionStatus,
    /// Human-readable summary.
    pub message: String,
    /// When the pipeline completed; absent for skipped executions.
    pub completed_at: Option<DateTime<Utc>>,
    /// The abort reason, when the pipeline aborted.
    pub error: Option<String>,
}

impl ExecutionRecord {
    /// Creates a skipped record: a gate did not pass, no action ran.
    #[must_use]
    pub fn skipped(
        workflow: &Workflow,
        started_at: DateTime<Utc>,
        steps: Vec<StepRecord>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: ExecutionId::new(),
            workflow_id: workflow.id,
            flow_name: workflow.name.clone(),
            started_at,
            steps,
            status: ExecutionStatus::Skipped,
            message: message.into(),
            completed_at: None,
            error: None,
        }
    }

    /// Creates a finished record whose status reflects the action
    /// handler's own success flag.
    #[must_use]
    pub fn finished(
        workflow: &Workflow,
        started_at: DateTime<Utc>,
        steps: Vec<StepRecord>,
        outcome: &ActionOutcome,
    ) -> Self {
        Self {
            id: ExecutionId::new(),
            workflow_id: workflow.id,
            flow_name: workflow.name.clone(),
            started_at,
            steps,
            status: if outcome.success {
                ExecutionStatus::Success
            } else {
                ExecutionStatus::Failed
            },
            message: outcome.message.clone(),
            completed_at: Some(Utc::now()),
            error: None,
        }
    }

    /// Creates a failed record for a pipeline abort.
    #[must_use]
    pub fn aborted(
        workflow: &Workflow,
        started_at: DateTime<Utc>,
        steps: Vec<StepRecord>,
        error: impl Into<String>,
    ) -> Self {
        let error = error.into();
        Self {
            id: ExecutionId::new(),
            workflow_id: workflow.id,
            flow_name: workflow.name.clone(),
            started_at,
            steps,
            status: ExecutionStatus::Failed,
            message: error.clone(),
            completed_at: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::WorkflowDraft;

    fn workflow() -> Workflow {
        Workflow::from_draft(WorkflowDraft::named("Audit"))
    }

    #[test]
    fn skipped_record_has_no_completion_time() {
        let wf = workflow();
        let record = ExecutionRecord::skipped(
            &wf,
            Utc::now(),
            vec![StepRecord::Trigger {
                result: TriggerOutcome::held("Unknown trigger type"),
            }],
            "Trigger condition not met",
        );
        assert_eq!(record.status, ExecutionStatus::Skipped);
        assert!(record.completed_at.is_none());
        assert!(record.error.is_none());
        assert_eq!(record.steps.len(), 1);
    }

    #[test]
    fn finished_record_mirrors_action_success() {
        let wf = workflow();
        let success = ExecutionRecord::finished(
            &wf,
            Utc::now(),
            Vec::new(),
            &ActionOutcome::succeeded("Data logged"),
        );
        assert_eq!(success.status, ExecutionStatus::Success);
        assert_eq!(success.message, "Data logged");
        assert!(success.completed_at.is_some());

        let failure = ExecutionRecord::finished(
            &wf,
            Utc::now(),
            Vec::new(),
            &ActionOutcome::failed("quota exhausted"),
        );
        assert_eq!(failure.status, ExecutionStatus::Failed);
    }

    #[test]
    fn aborted_record_captures_error() {
        let wf = workflow();
        let record =
            ExecutionRecord::aborted(&wf, Utc::now(), Vec::new(), "non-numeric value");
        assert_eq!(record.status, ExecutionStatus::Failed);
        assert_eq!(record.error.as_deref(), Some("non-numeric value"));
    }

    #[test]
    fn step_record_stage_names() {
        let step = StepRecord::Trigger {
            result: TriggerOutcome::fired("Manual trigger activated"),
        };
        assert_eq!(step.stage(), "trigger");
    }

    #[test]
    fn step_record_serde_tags_by_stage() {
        let step = StepRecord::Action {
            result: ActionOutcome::succeeded("Task created"),
        };
        let json = serde_json::to_value(&step).expect("serialize");
        assert_eq!(json["step"], "action");
        assert_eq!(json["result"]["success"], true);
    }

    #[test]
    fn execution_record_serde_roundtrip() {
        let wf = workflow();
        let record = ExecutionRecord::finished(
            &wf,
            Utc::now(),
            vec![StepRecord::Trigger {
                result: TriggerOutcome::fired("Manual trigger activated"),
            }],
            &ActionOutcome::succeeded("Email sent successfully"),
        );
        let json = serde_json::to_string(&record).expect("serialize");
        let parsed: ExecutionRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(record, parsed);
    }
}
