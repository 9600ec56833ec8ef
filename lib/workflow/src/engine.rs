//! The workflow engine.
//!
//! Owns the loaded workflow collection and the execution history, and
//! runs the three-stage pipeline with short-circuit semantics:
//!
//! 1. Trigger evaluation: a held trigger skips the run immediately.
//! 2. Condition evaluation (when present): a failed predicate skips the
//!    run; an evaluation error aborts it as failed.
//! 3. Action dispatch: the handler's own success flag decides the
//!    terminal status.
//!
//! No pipeline failure escapes `execute_workflow` as an error; callers
//! inspect the returned record's status. The only error value is
//! referencing an unknown workflow ID.
//!
//! One engine instance owns its state for its lifetime and performs no
//! internal locking; concurrent hosts wrap the engine in their own
//! mutual exclusion.

use crate::action::ActionRegistry;
use crate::condition::evaluate_condition;
use crate::context::{ContextProvider, SimulatedContext};
use crate::definition::{Workflow, WorkflowDraft, WorkflowSummary};
use crate::error::EngineError;
use crate::execution::{ExecutionRecord, ExecutionStatus, StepRecord};
use crate::trigger::{DefaultTriggerEvaluator, TriggerEvaluator};
use chrono::Utc;
use flowmate_core::WorkflowId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Aggregate counters over an engine's workflows and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Number of loaded workflows.
    pub total_workflows: usize,
    /// Number of active workflows.
    pub active_workflows: usize,
    /// Recorded executions that succeeded.
    pub successful_runs: usize,
    /// Recorded executions that failed.
    pub failed_runs: usize,
    /// Percentage of terminal runs that succeeded; 100.0 when none have
    /// run.
    pub success_rate: f64,
}

/// The core workflow execution engine.
pub struct WorkflowEngine {
    workflows: Vec<Workflow>,
    history: Vec<ExecutionRecord>,
    registry: ActionRegistry,
    context: Box<dyn ContextProvider>,
    triggers: Box<dyn TriggerEvaluator>,
}

impl WorkflowEngine {
    /// Creates an engine with the built-in action registry, the simulated
    /// context, and the default trigger policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workflows: Vec::new(),
            history: Vec::new(),
            registry: ActionRegistry::new(),
            context: Box::new(SimulatedContext),
            triggers: Box::new(DefaultTriggerEvaluator),
        }
    }

    /// Replaces the action registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the context provider.
    #[must_use]
    pub fn with_context(mut self, context: Box<dyn ContextProvider>) -> Self {
        self.context = context;
        self
    }

    /// Replaces the trigger evaluator.
    #[must_use]
    pub fn with_trigger_evaluator(mut self, triggers: Box<dyn TriggerEvaluator>) -> Self {
        self.triggers = triggers;
        self
    }

    /// Loads a workflow definition, normalizing missing fields, and
    /// returns the loaded record.
    ///
    /// Loading never deduplicates: submitting the same draft twice yields
    /// two workflows with distinct IDs.
    pub fn load_workflow(&mut self, draft: WorkflowDraft) -> Workflow {
        let workflow = Workflow::from_draft(draft);
        info!(workflow_id = %workflow.id, name = %workflow.name, "loaded workflow");
        self.workflows.push(workflow.clone());
        workflow
    }

    /// Executes a workflow by ID.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkflowNotFound`] for an unknown ID. Every
    /// other outcome, including action failure and condition evaluation
    /// errors, is reported through the returned record's status.
    pub fn execute_workflow(&mut self, id: WorkflowId) -> Result<ExecutionRecord, EngineError> {
        let Some(workflow) = self.workflows.iter().find(|w| w.id == id).cloned() else {
            return Err(EngineError::WorkflowNotFound { workflow_id: id });
        };

        debug!(workflow_id = %id, name = %workflow.name, "executing workflow");
        let started_at = Utc::now();
        let mut steps = Vec::new();

        let trigger_result = self.triggers.evaluate(&workflow.trigger);
        let trigger_passed = trigger_result.passed;
        steps.push(StepRecord::Trigger {
            result: trigger_result,
        });
        if !trigger_passed {
            // Returned to the caller but never recorded: history holds
            // only executions that got past the trigger gate.
            return Ok(ExecutionRecord::skipped(
                &workflow,
                started_at,
                steps,
                "Trigger condition not met",
            ));
        }

        if let Some(condition) = &workflow.condition {
            match evaluate_condition(condition, self.context.as_ref()) {
                Ok(result) => {
                    let condition_passed = result.passed;
                    steps.push(StepRecord::Condition { result });
                    if !condition_passed {
                        let record = ExecutionRecord::skipped(
                            &workflow,
                            started_at,
                            steps,
                            "Condition not met",
                        );
                        self.history.push(record.clone());
                        return Ok(record);
                    }
                }
                Err(err) => {
                    warn!(workflow_id = %id, error = %err, "condition evaluation aborted the run");
                    let record =
                        ExecutionRecord::aborted(&workflow, started_at, steps, err.to_string());
                    self.history.push(record.clone());
                    return Ok(record);
                }
            }
        }

        let outcome = self.registry.dispatch(&workflow.action);
        steps.push(StepRecord::Action {
            result: outcome.clone(),
        });
        let record = ExecutionRecord::finished(&workflow, started_at, steps, &outcome);
        info!(workflow_id = %id, status = ?record.status, "workflow execution finished");
        self.history.push(record.clone());
        Ok(record)
    }

    /// Looks up a loaded workflow.
    #[must_use]
    pub fn workflow(&self, id: WorkflowId) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    /// Returns all loaded workflows, in load order.
    #[must_use]
    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Returns listing summaries for all loaded workflows.
    #[must_use]
    pub fn summaries(&self) -> Vec<WorkflowSummary> {
        self.workflows.iter().map(WorkflowSummary::from).collect()
    }

    /// Returns the recorded execution history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    /// Returns up to `limit` recorded executions, newest first.
    #[must_use]
    pub fn recent_history(&self, limit: usize) -> Vec<&ExecutionRecord> {
        self.history.iter().rev().take(limit).collect()
    }

    /// Returns recorded executions of one workflow, newest first.
    #[must_use]
    pub fn history_for_workflow(&self, id: WorkflowId) -> Vec<&ExecutionRecord> {
        self.history
            .iter()
            .rev()
            .filter(|record| record.workflow_id == id)
            .collect()
    }

    /// Computes aggregate counters over workflows and history.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        let successful_runs = self
            .history
            .iter()
            .filter(|r| r.status == ExecutionStatus::Success)
            .count();
        let failed_runs = self
            .history
            .iter()
            .filter(|r| r.status == ExecutionStatus::Failed)
            .count();
        let terminal = successful_runs + failed_runs;
        let success_rate = if terminal == 0 {
            100.0
        } else {
            successful_runs as f64 / terminal as f64 * 100.0
        };

        EngineStats {
            total_workflows: self.workflows.len(),
            active_workflows: self
                .workflows
                .iter()
                .filter(|w| w.status.is_active())
                .count(),
            successful_runs,
            failed_runs,
            success_rate,
        }
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionSpec, NoLatency};
    use crate::condition::{ConditionOperator, ConditionSpec};
    use crate::context::ContextValue;
    use crate::trigger::{Schedule, TriggerKind, TriggerSpec};

    fn quiet_engine() -> WorkflowEngine {
        WorkflowEngine::new().with_registry(ActionRegistry::with_latency(Box::new(NoLatency)))
    }

    fn manual_draft(name: &str) -> WorkflowDraft {
        WorkflowDraft::named(name)
            .with_trigger(TriggerSpec::manual())
            .with_action(ActionSpec::new(ActionKind::LogData))
    }

    #[test]
    fn manual_trigger_reaches_the_action_stage() {
        let mut engine = quiet_engine();
        let workflow = engine.load_workflow(manual_draft("Manual"));
        let record = engine.execute_workflow(workflow.id).expect("execute");

        assert_eq!(record.status, ExecutionStatus::Success);
        assert_eq!(record.steps.len(), 2);
        assert_eq!(record.steps[0].stage(), "trigger");
        assert_eq!(record.steps[1].stage(), "action");
        assert!(record.completed_at.is_some());
    }

    #[test]
    fn unknown_trigger_skips_with_failed_trigger_step() {
        let mut engine = quiet_engine();
        let draft = WorkflowDraft::named("Mystery").with_trigger(TriggerSpec {
            kind: TriggerKind::Unknown,
            ..TriggerSpec::default()
        });
        let workflow = engine.load_workflow(draft);
        let record = engine.execute_workflow(workflow.id).expect("execute");

        assert_eq!(record.status, ExecutionStatus::Skipped);
        assert_eq!(record.message, "Trigger condition not met");
        let StepRecord::Trigger { result } = &record.steps[0] else {
            panic!("first step should be the trigger");
        };
        assert!(!result.passed);
    }

    #[test]
    fn trigger_skip_is_returned_but_not_recorded() {
        // Deliberate asymmetry: condition skips are recorded, trigger
        // skips are not.
        let mut engine = quiet_engine();
        let draft = WorkflowDraft::named("Unrecorded").with_trigger(TriggerSpec {
            kind: TriggerKind::Unknown,
            ..TriggerSpec::default()
        });
        let workflow = engine.load_workflow(draft);
        let record = engine.execute_workflow(workflow.id).expect("execute");

        assert_eq!(record.status, ExecutionStatus::Skipped);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn condition_skip_is_recorded() {
        let mut engine = quiet_engine();
        let draft = manual_draft("Gated").with_condition(ConditionSpec::new(
            "status",
            ConditionOperator::Equals,
            "archived",
        ));
        let workflow = engine.load_workflow(draft);
        let record = engine.execute_workflow(workflow.id).expect("execute");

        assert_eq!(record.status, ExecutionStatus::Skipped);
        assert_eq!(record.message, "Condition not met");
        assert_eq!(record.steps.len(), 2);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn passing_condition_proceeds_to_the_action() {
        let mut engine = quiet_engine();
        let draft = manual_draft("Open gate").with_condition(ConditionSpec::new(
            "count",
            ConditionOperator::Greater,
            "10",
        ));
        let workflow = engine.load_workflow(draft);
        let record = engine.execute_workflow(workflow.id).expect("execute");

        assert_eq!(record.status, ExecutionStatus::Success);
        assert_eq!(record.steps.len(), 3);
    }

    #[test]
    fn malformed_numeric_condition_fails_the_run() {
        let mut engine = quiet_engine();
        let draft = manual_draft("Bad compare").with_condition(ConditionSpec::new(
            "status",
            ConditionOperator::Greater,
            "10",
        ));
        let workflow = engine.load_workflow(draft);
        let record = engine.execute_workflow(workflow.id).expect("execute");

        assert_eq!(record.status, ExecutionStatus::Failed);
        assert!(record.error.as_deref().unwrap_or("").contains("non-numeric"));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn unknown_workflow_is_an_error_value() {
        let mut engine = quiet_engine();
        let err = engine.execute_workflow(WorkflowId::new()).unwrap_err();
        assert!(matches!(err, EngineError::WorkflowNotFound { .. }));
    }

    #[test]
    fn loading_is_not_deduplicating() {
        let mut engine = quiet_engine();
        let first = engine.load_workflow(manual_draft("Twin"));
        let second = engine.load_workflow(manual_draft("Twin"));
        assert_ne!(first.id, second.id);
        assert_eq!(engine.workflows().len(), 2);
    }

    #[test]
    fn history_grows_monotonically() {
        let mut engine = quiet_engine();
        let a = engine.load_workflow(manual_draft("A"));
        let b = engine.load_workflow(
            WorkflowDraft::named("B")
                .with_trigger(TriggerSpec::scheduled(Schedule::Daily))
                .with_action(ActionSpec::new(ActionKind::SendEmail)),
        );

        let mut last_len = 0;
        for id in [a.id, b.id, a.id] {
            engine.execute_workflow(id).expect("execute");
            assert!(engine.history().len() > last_len);
            last_len = engine.history().len();
        }
        assert_eq!(last_len, 3);
    }

    #[test]
    fn recent_history_is_newest_first_and_bounded() {
        let mut engine = quiet_engine();
        let early = engine.load_workflow(manual_draft("Early"));
        let late = engine.load_workflow(manual_draft("Late"));
        engine.execute_workflow(early.id).expect("execute");
        engine.execute_workflow(late.id).expect("execute");

        let recent = engine.recent_history(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].workflow_id, late.id);
    }

    #[test]
    fn history_for_workflow_filters_by_id() {
        let mut engine = quiet_engine();
        let a = engine.load_workflow(manual_draft("A"));
        let b = engine.load_workflow(manual_draft("B"));
        engine.execute_workflow(a.id).expect("execute");
        engine.execute_workflow(b.id).expect("execute");
        engine.execute_workflow(a.id).expect("execute");

        assert_eq!(engine.history_for_workflow(a.id).len(), 2);
        assert_eq!(engine.history_for_workflow(b.id).len(), 1);
    }

    #[test]
    fn stats_reflect_workflows_and_runs() {
        let mut engine = quiet_engine();
        assert_eq!(engine.stats().success_rate, 100.0);

        let ok = engine.load_workflow(manual_draft("Fine"));
        let bad = engine.load_workflow(manual_draft("Broken").with_condition(
            ConditionSpec::new("status", ConditionOperator::Less, "10"),
        ));
        engine.execute_workflow(ok.id).expect("execute");
        engine.execute_workflow(bad.id).expect("execute");

        let stats = engine.stats();
        assert_eq!(stats.total_workflows, 2);
        assert_eq!(stats.active_workflows, 2);
        assert_eq!(stats.successful_runs, 1);
        assert_eq!(stats.failed_runs, 1);
        assert!((stats.success_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn injected_context_drives_conditions() {
        struct FleetContext;
        impl ContextProvider for FleetContext {
            fn get(&self, key: &str) -> ContextValue {
                match key {
                    "region" => ContextValue::from("eu-west"),
                    _ => ContextValue::from("unknown"),
                }
            }
        }

        let mut engine = quiet_engine().with_context(Box::new(FleetContext));
        let draft = manual_draft("Regional").with_condition(ConditionSpec::new(
            "region",
            ConditionOperator::Contains,
            "eu",
        ));
        let workflow = engine.load_workflow(draft);
        let record = engine.execute_workflow(workflow.id).expect("execute");
        assert_eq!(record.status, ExecutionStatus::Success);
    }

    #[test]
    fn injected_trigger_policy_can_hold_everything() {
        struct Lockdown;
        impl TriggerEvaluator for Lockdown {
            fn evaluate(&self, _spec: &TriggerSpec) -> crate::trigger::TriggerOutcome {
                crate::trigger::TriggerOutcome::held("all triggers held")
            }
        }

        let mut engine = quiet_engine().with_trigger_evaluator(Box::new(Lockdown));
        let workflow = engine.load_workflow(manual_draft("Held"));
        let record = engine.execute_workflow(workflow.id).expect("execute");
        assert_eq!(record.status, ExecutionStatus::Skipped);
    }
}
