//! Workflow definition types.
//!
//! A workflow is a declarative automation: a trigger, an optional
//! condition, and an action. Definitions arrive as loosely-typed
//! [`WorkflowDraft`]s (every field optional, malformed or absent fields
//! coerced to defaults rather than rejected) and are normalized into
//! immutable [`Workflow`] records when loaded.

use crate::action::ActionSpec;
use crate::condition::ConditionSpec;
use crate::trigger::TriggerSpec;
use chrono::{DateTime, Utc};
use flowmate_core::WorkflowId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// The workflow is live and executable.
    Active,
    /// The workflow is retained but no longer executed.
    Archived,
}

impl WorkflowStatus {
    /// Returns true if the workflow is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A loosely-typed workflow submission.
///
/// Every field is optional; loading fills in defaults. There is no
/// validation failure path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowDraft {
    /// Caller-supplied ID; generated when absent.
    pub id: Option<WorkflowId>,
    /// Display name; defaults to `"Unnamed Workflow"`.
    pub name: Option<String>,
    /// Trigger specification; defaults to a manual trigger.
    pub trigger: TriggerSpec,
    /// Optional condition.
    pub condition: Option<ConditionSpec>,
    /// Action specification; defaults to log-data.
    pub action: ActionSpec,
}

impl WorkflowDraft {
    /// Creates a draft with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerSpec) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets the condition.
    #[must_use]
    pub fn with_condition(mut self, condition: ConditionSpec) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the action.
    #[must_use]
    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.action = action;
        self
    }
}

/// A normalized, loaded workflow definition.
///
/// Immutable once created; the engine's collection owns the canonical
/// copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier.
    pub id: WorkflowId,
    /// Display name.
    pub name: String,
    /// The trigger gating execution.
    pub trigger: TriggerSpec,
    /// Optional secondary gate.
    pub condition: Option<ConditionSpec>,
    /// The action executed when the gates pass.
    pub action: ActionSpec,
    /// Lifecycle status.
    pub status: WorkflowStatus,
    /// When the workflow was loaded.
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    /// Normalizes a draft into a workflow, filling missing fields.
    #[must_use]
    pub fn from_draft(draft: WorkflowDraft) -> Self {
        Self {
            id: draft.id.unwrap_or_default(),
            name: draft.name.unwrap_or_else(|| "Unnamed Workflow".to_string()),
            trigger: draft.trigger,
            condition: draft.condition,
            action: draft.action,
            status: WorkflowStatus::Active,
            created_at: Utc::now(),
        }
    }
}

/// Summary information about a workflow, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    /// Workflow ID.
    pub id: WorkflowId,
    /// Display name.
    pub name: String,
    /// Trigger kind name.
    pub trigger: String,
    /// Action kind name.
    pub action: String,
    /// Whether a condition is attached.
    pub has_condition: bool,
    /// Lifecycle status.
    pub status: WorkflowStatus,
    /// When loaded.
    pub created_at: DateTime<Utc>,
}

impl From<&Workflow> for WorkflowSummary {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id,
            name: workflow.name.clone(),
            trigger: workflow.trigger.kind.name().to_string(),
            action: workflow.action.kind.name().to_string(),
            has_condition: workflow.condition.is_some(),
            status: workflow.status,
            created_at: workflow.created_at,
        }
    }
}
